//! Lexical pipeline: tokenisation, term normalisation and n-grams.
//!
//! Two distinct views of a word exist. Display tokens come out of
//! [`tokenize`] and keep their readable surface form. Statistical keys come out
//! of [`normalize_term`] and are stemmed so that lexical variants group
//! together.

use std::collections::HashSet;

use crate::config::{FieldWeights, Stopwords};
use crate::metadata::Headings;
use crate::stem::stem_to_fixpoint;

/// Characters replaced by a space before splitting into tokens.
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '`', '/', '\\', '|', '*', '_',
    '~', '=', '+', '#', '@', '$', '%', '^', '&', '-', '\u{2013}', '\u{2014}', '\u{2018}', '\u{2019}', '\u{201c}',
    '\u{201d}', '\u{2026}',
];

/// Splits text into filtered, lowercase display tokens.
///
/// Token order is preserved. Tokens of one character, tokens with no
/// alphabetic character, pure digit strings and stopwords are dropped.
pub fn tokenize(text: &str, stopwords: &Stopwords) -> Vec<String> {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered.chars().map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c }).collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .filter(|token| token.chars().any(char::is_alphabetic))
        .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
        .filter(|token| !stopwords.contains(token))
        .map(str::to_string)
        .collect()
}

/// Normalises a raw term into its statistical key.
///
/// Lowercases, strips everything that is not alphanumeric or whitespace, then
/// stems each word. Pure digit words and words of two characters or fewer
/// are left unstemmed, and a word the stemmer cannot handle keeps its
/// cleaned form. Multi-word terms (n-grams) are re-joined with single spaces.
/// Applying the function to its own output returns the same string.
pub fn normalize_term(term: &str) -> String {
    let cleaned: String =
        term.to_lowercase().chars().filter(|c| c.is_alphanumeric() || c.is_whitespace()).collect();

    cleaned.split_whitespace().map(stem_word).collect::<Vec<_>>().join(" ")
}

fn stem_word(word: &str) -> String {
    if word.chars().count() <= 2 || word.chars().all(|c| c.is_ascii_digit()) {
        return word.to_string();
    }
    stem_to_fixpoint(word).unwrap_or_else(|| word.to_string())
}

/// Builds contiguous n-grams of size `n` joined with a single space.
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|window| window.join(" ")).collect()
}

/// Builds the weighted term bag that feeds TF-IDF.
///
/// Starts with the plain body tokens. Title, description and heading tokens
/// follow, each repeated by its field weight.
pub fn weighted_terms(
    title: Option<&str>, description: Option<&str>, headings: &Headings, body: &[String], weights: &FieldWeights,
    stopwords: &Stopwords,
) -> Vec<String> {
    let mut bag = body.to_vec();

    let mut push_weighted = |text: &str, weight: usize| {
        let tokens = tokenize(text, stopwords);
        for _ in 0..weight {
            bag.extend(tokens.iter().cloned());
        }
    };

    if let Some(title) = title {
        push_weighted(title, weights.title);
    }
    if let Some(description) = description {
        push_weighted(description, weights.description);
    }
    for heading in &headings.h1 {
        push_weighted(heading, weights.h1);
    }
    for heading in &headings.h2 {
        push_weighted(heading, weights.h2);
    }
    for heading in &headings.h3 {
        push_weighted(heading, weights.h3);
    }

    bag
}

/// Distinct normalised keys of a token sequence.
pub fn vocabulary(tokens: &[String]) -> HashSet<String> {
    tokens.iter().map(|token| normalize_term(token)).filter(|term| !term.is_empty()).collect()
}
