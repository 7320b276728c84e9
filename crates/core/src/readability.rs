//! Readability scoring.
//!
//! Computes sentence, word and syllable counts over natural prose and derives
//! the Flesch Reading Ease and Flesch-Kincaid Grade indices. Words here are a
//! looser view than the lexical pipeline's tokens: stopwords stay, since
//! readability has to reflect real prose density.
//!
//! Results are not clamped. A score outside the conventional 0-100 range is a
//! valid result, not an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// Counts and indices for one document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ReadabilityScores {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
}

/// Scores a body of prose.
pub fn score(text: &str) -> ReadabilityScores {
    let words = readability_words(text);
    let sentences = count_sentences(text);
    let syllables = words.iter().map(|w| count_syllables(w)).sum();
    from_counts(words.len(), sentences, syllables)
}

/// Derives both indices from raw counts.
///
/// Sentence count floors at 1; ratios involving words are 0 when there are no words.
pub fn from_counts(words: usize, sentences: usize, syllables: usize) -> ReadabilityScores {
    let sentences = sentences.max(1);
    let (words_per_sentence, syllables_per_word) =
        if words == 0 { (0.0, 0.0) } else { (words as f64 / sentences as f64, syllables as f64 / words as f64) };

    ReadabilityScores {
        words,
        sentences,
        syllables,
        flesch_reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        flesch_kincaid_grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
    }
}

/// Whitespace-separated words with non-alphabetic characters removed.
pub fn readability_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.chars().filter(|c| c.is_alphabetic()).collect::<String>().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Sentences split on runs of `.`, `!` or `?` followed by whitespace, minimum 1.
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_BREAK.split(text).filter(|s| !s.trim().is_empty()).count().max(1)
}

/// Vowel-group syllable estimate with a silent-e correction, minimum 1.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0;
    let mut prev_vowel = false;

    for c in word.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    if word.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("reading"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("xyz"), 1);
        assert_eq!(count_syllables("brr"), 1);
    }

    #[test]
    fn test_count_sentences() {
        assert_eq!(count_sentences("One. Two! Three?  Four"), 4);
        assert_eq!(count_sentences("Wait... what?! Really"), 3);
        assert_eq!(count_sentences("version 1.2 is out"), 1);
        assert_eq!(count_sentences(""), 1);
    }

    #[test]
    fn test_readability_words_keep_stopwords() {
        assert_eq!(readability_words("The cat's 3 hats!"), vec!["the", "cats", "hats"]);
    }

    #[test]
    fn test_empty_text_does_not_divide_by_zero() {
        let scores = score("");
        assert_eq!(scores.words, 0);
        assert_eq!(scores.sentences, 1);
        assert!((scores.flesch_reading_ease - 206.835).abs() < 1e-9);
        assert!((scores.flesch_kincaid_grade + 15.59).abs() < 1e-9);
    }

    #[test]
    fn test_formulas() {
        let scores = from_counts(100, 5, 150);
        assert!((scores.flesch_reading_ease - (206.835 - 1.015 * 20.0 - 84.6 * 1.5)).abs() < 1e-9);
        assert!((scores.flesch_kincaid_grade - (0.39 * 20.0 + 11.8 * 1.5 - 15.59)).abs() < 1e-9);
    }

    #[test]
    fn test_simple_prose_scores_easier_than_dense_prose() {
        let simple = score("The cat sat on the mat. The dog ran to the park. We had fun.");
        let dense = score(
            "Comprehensive organizational restructuring necessitates interdepartmental communication \
             and considerable administrative deliberation regarding institutional responsibilities.",
        );
        assert!(simple.flesch_reading_ease > dense.flesch_reading_ease);
        assert!(simple.flesch_kincaid_grade < dense.flesch_kincaid_grade);
    }

    #[test]
    fn test_scores_are_not_clamped() {
        let scores = from_counts(1, 1, 12);
        assert!(scores.flesch_reading_ease < 0.0);
    }
}
