//! Porter stemmer for English terms.
//!
//! Groups lexical variants ("pages", "page"; "running", "run") under one
//! statistical key. The stemmer works on lowercase ASCII alphanumerics; any
//! other input is reported as unstemmable and callers keep the original word.

/// Stems a single lowercase word.
///
/// Returns `None` when the word contains characters outside `[a-z0-9]`.
/// Words of two characters or fewer are returned unchanged.
pub fn porter_stem(word: &str) -> Option<String> {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
        return None;
    }
    if word.len() <= 2 {
        return Some(word.to_string());
    }

    let mut stemmer = Stemmer::new(word);
    stemmer.step1ab();
    if stemmer.k > 0 {
        stemmer.step1c();
        stemmer.step2();
        stemmer.step3();
        stemmer.step4();
        stemmer.step5();
    }

    String::from_utf8(stemmer.b).ok()
}

/// Stems repeatedly until the result stops changing, so that stemming an
/// already-stemmed word is a no-op.
pub fn stem_to_fixpoint(word: &str) -> Option<String> {
    let mut current = porter_stem(word)?;
    for _ in 0..word.len() {
        match porter_stem(&current) {
            Some(next) if next != current => current = next,
            _ => break,
        }
    }
    Some(current)
}

struct Stemmer {
    b: Vec<u8>,
    /// Index of the last byte of the current word.
    k: isize,
    /// End of the stem once a suffix has matched.
    j: isize,
}

impl Stemmer {
    fn new(word: &str) -> Self {
        let b = word.as_bytes().to_vec();
        let k = b.len() as isize - 1;
        Self { b, k, j: 0 }
    }

    fn set_k(&mut self, k: isize) {
        self.k = k;
        self.b.truncate((k + 1) as usize);
    }

    fn cons(&self, i: isize) -> bool {
        match self.b[i as usize] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of consonant-vowel sequences between 0 and j.
    fn m(&self) -> usize {
        let mut n = 0;
        let mut i = 0;
        loop {
            if i > self.j {
                return n;
            }
            if !self.cons(i) {
                break;
            }
            i += 1;
        }
        i += 1;
        loop {
            loop {
                if i > self.j {
                    return n;
                }
                if self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
            n += 1;
            loop {
                if i > self.j {
                    return n;
                }
                if !self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..=self.j).any(|i| !self.cons(i))
    }

    fn double_c(&self, j: isize) -> bool {
        j >= 1 && self.b[j as usize] == self.b[(j - 1) as usize] && self.cons(j)
    }

    /// consonant-vowel-consonant ending at i, where the last consonant is not w, x or y.
    fn cvc(&self, i: isize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.b[i as usize], b'w' | b'x' | b'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let s = suffix.as_bytes();
        let len = s.len() as isize;
        if len > self.k + 1 {
            return false;
        }
        let start = (self.k - len + 1) as usize;
        if &self.b[start..=self.k as usize] != s {
            return false;
        }
        self.j = self.k - len;
        true
    }

    fn set_to(&mut self, s: &str) {
        self.b.truncate((self.j + 1) as usize);
        self.b.extend_from_slice(s.as_bytes());
        self.k = self.j + s.len() as isize;
    }

    fn replace(&mut self, s: &str) {
        if self.m() > 0 {
            self.set_to(s);
        }
    }

    fn at(&self, i: isize) -> u8 {
        self.b[i as usize]
    }

    /// Plurals and -ed / -ing.
    fn step1ab(&mut self) {
        if self.at(self.k) == b's' {
            if self.ends("sses") {
                self.set_k(self.k - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.k >= 1 && self.at(self.k - 1) != b's' {
                self.set_k(self.k - 1);
            }
        }
        if self.ends("eed") {
            if self.m() > 0 {
                self.set_k(self.k - 1);
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.set_k(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_c(self.k) {
                if !matches!(self.at(self.k), b'l' | b's' | b'z') {
                    self.set_k(self.k - 1);
                }
            } else {
                self.j = self.k;
                if self.m() == 1 && self.cvc(self.k) {
                    self.set_to("e");
                }
            }
        }
    }

    /// Terminal y to i when there is another vowel in the stem.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let k = self.k as usize;
            self.b[k] = b'i';
        }
    }

    fn step2(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k - 1) {
            b'a' => &[("ational", "ate"), ("tional", "tion")],
            b'c' => &[("enci", "ence"), ("anci", "ance")],
            b'e' => &[("izer", "ize")],
            b'l' => &[("bli", "ble"), ("alli", "al"), ("entli", "ent"), ("eli", "e"), ("ousli", "ous")],
            b'o' => &[("ization", "ize"), ("ation", "ate"), ("ator", "ate")],
            b's' => &[("alism", "al"), ("iveness", "ive"), ("fulness", "ful"), ("ousness", "ous")],
            b't' => &[("aliti", "al"), ("iviti", "ive"), ("biliti", "ble")],
            b'g' => &[("logi", "log")],
            _ => &[],
        };
        self.apply_first(rules);
    }

    fn step3(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k) {
            b'e' => &[("icate", "ic"), ("ative", ""), ("alize", "al")],
            b'i' => &[("iciti", "ic")],
            b'l' => &[("ical", "ic"), ("ful", "")],
            b's' => &[("ness", "")],
            _ => &[],
        };
        self.apply_first(rules);
    }

    fn apply_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace(replacement);
                return;
            }
        }
    }

    /// Removes -ant, -ence etc. in context <c>vcvc<v>.
    fn step4(&mut self) {
        let suffixes: &[&str] = match self.at(self.k - 1) {
            b'a' => &["al"],
            b'c' => &["ance", "ence"],
            b'e' => &["er"],
            b'i' => &["ic"],
            b'l' => &["able", "ible"],
            b'n' => &["ant", "ement", "ment", "ent"],
            b'o' => {
                if self.ends("ion") && self.j >= 0 && matches!(self.at(self.j), b's' | b't') {
                    return self.drop_suffix_if_long();
                }
                &["ou"]
            }
            b's' => &["ism"],
            b't' => &["ate", "iti"],
            b'u' => &["ous"],
            b'v' => &["ive"],
            b'z' => &["ize"],
            _ => &[],
        };
        if suffixes.iter().any(|suffix| self.ends(suffix)) {
            self.drop_suffix_if_long();
        }
    }

    fn drop_suffix_if_long(&mut self) {
        if self.m() > 1 {
            self.set_k(self.j);
        }
    }

    /// Final -e and -ll.
    fn step5(&mut self) {
        self.j = self.k;
        if self.at(self.k) == b'e' {
            let a = self.m();
            if a > 1 || (a == 1 && !self.cvc(self.k - 1)) {
                self.set_k(self.k - 1);
            }
        }
        self.j = self.k;
        if self.at(self.k) == b'l' && self.double_c(self.k) && self.m() > 1 {
            self.set_k(self.k - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        porter_stem(word).unwrap()
    }

    #[test]
    fn test_plurals() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("cats"), "cat");
        assert_eq!(stem("pages"), "page");
    }

    #[test]
    fn test_ed_and_ing() {
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("plastered"), "plaster");
        assert_eq!(stem("motoring"), "motor");
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("filing"), "file");
    }

    #[test]
    fn test_derivational_suffixes() {
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("hopefulness"), "hope");
        assert_eq!(stem("adjustment"), "adjust");
        assert_eq!(stem("generalization"), "gener");
    }

    #[test]
    fn test_short_words_unchanged() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("go"), "go");
    }

    #[test]
    fn test_rejects_non_ascii() {
        assert_eq!(porter_stem("café"), None);
        assert_eq!(porter_stem("Upper"), None);
        assert_eq!(porter_stem(""), None);
    }

    #[test]
    fn test_digits_are_kept() {
        assert_eq!(stem("html5"), "html5");
    }

    #[test]
    fn test_fixpoint_is_idempotent() {
        for word in ["agreed", "generalizations", "components", "running", "relational"] {
            let once = stem_to_fixpoint(word).unwrap();
            let twice = stem_to_fixpoint(&once).unwrap();
            assert_eq!(once, twice, "{word}");
        }
    }
}
