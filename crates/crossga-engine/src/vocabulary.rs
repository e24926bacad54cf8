//! The set of valid words.

use std::collections::{HashMap, HashSet};

use crate::GeneAlphabet;

/// Read-only word list shared by every evaluator in a run.
///
/// Besides exact membership, words are indexed by length (in characters) so
/// that partial-credit scoring and wildcard matching only scan candidates of
/// the right length.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
    by_len: HashMap<usize, Vec<Vec<char>>>,
    wildcard: Option<char>,
}

/// Outcome of building a [`Vocabulary`] from raw input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VocabularyStats {
    /// Words kept after filtering (duplicates counted once).
    pub kept: usize,
    /// Words longer than the maximum length.
    pub too_long: usize,
    /// Words containing symbols outside the alphabet.
    pub foreign: usize,
}

impl Vocabulary {
    /// Builds a vocabulary from raw words.
    ///
    /// Each word is trimmed and lower-cased. Empty words, words longer than
    /// `max_len` characters, and words containing anything other than the
    /// alphabet's letters (or its wildcard) are dropped.
    pub fn from_words<I, S>(
        words: I,
        alphabet: &GeneAlphabet,
        max_len: usize,
    ) -> (Self, VocabularyStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self {
            wildcard: alphabet.wildcard(),
            ..Self::default()
        };
        let mut stats = VocabularyStats::default();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if word.chars().count() > max_len {
                stats.too_long += 1;
                continue;
            }
            if !word.chars().all(|c| alphabet.is_word_symbol(c)) {
                stats.foreign += 1;
                continue;
            }
            vocabulary.insert(word);
        }
        stats.kept = vocabulary.len();
        (vocabulary, stats)
    }

    fn insert(&mut self, word: String) {
        if self.words.contains(&word) {
            return;
        }
        let chars: Vec<char> = word.chars().collect();
        self.by_len.entry(chars.len()).or_default().push(chars);
        self.words.insert(word);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Membership test.
    ///
    /// A wildcard symbol in `word` matches any character of a vocabulary word
    /// at the same position.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let Some(wildcard) = self.wildcard else {
            return false;
        };
        if !word.contains(wildcard) {
            return false;
        }
        let chars: Vec<char> = word.chars().collect();
        self.candidates(chars.len()).iter().any(|cand| {
            chars
                .iter()
                .zip(cand)
                .all(|(&w, &c)| w == c || w == wildcard)
        })
    }

    /// Highest number of matching positions between `word` and any vocabulary
    /// word of the same length, or `None` if there is no word of that length.
    #[must_use]
    pub fn best_overlap(&self, word: &str) -> Option<usize> {
        let chars: Vec<char> = word.chars().collect();
        self.candidates(chars.len())
            .iter()
            .map(|cand| {
                chars
                    .iter()
                    .zip(cand)
                    .filter(|&(&w, &c)| w == c || Some(w) == self.wildcard)
                    .count()
            })
            .max()
    }

    fn candidates(&self, len: usize) -> &[Vec<char>] {
        self.by_len.get(&len).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> GeneAlphabet {
        GeneAlphabet::new('#', "abcdegorst".chars(), Some('?')).unwrap()
    }

    fn vocabulary(words: &[&str]) -> Vocabulary {
        Vocabulary::from_words(words, &alphabet(), 4).0
    }

    #[test]
    fn test_filters_words() {
        let (vocabulary, stats) = Vocabulary::from_words(
            [" Cat\n", "dog", "", "cats", "boats", "cow", "cat"],
            &alphabet(),
            4,
        );
        assert!(vocabulary.contains("cat"));
        assert!(vocabulary.contains("cats"));
        assert!(!vocabulary.contains("boats"));
        assert!(!vocabulary.contains("cow"));
        assert_eq!(
            stats,
            VocabularyStats {
                kept: 3,
                too_long: 1,
                foreign: 1
            }
        );
    }

    #[test]
    fn test_wildcard_matches_any_letter() {
        let vocabulary = vocabulary(&["cat", "dog"]);
        assert!(vocabulary.contains("c?t"));
        assert!(vocabulary.contains("???"));
        assert!(!vocabulary.contains("c?g"));
        assert!(!vocabulary.contains("??"));
    }

    #[test]
    fn test_best_overlap() {
        let vocabulary = vocabulary(&["cat", "dog", "at"]);
        assert_eq!(vocabulary.best_overlap("cot"), Some(2));
        assert_eq!(vocabulary.best_overlap("dag"), Some(2));
        assert_eq!(vocabulary.best_overlap("xyz"), Some(0));
        assert_eq!(vocabulary.best_overlap("abcd"), None);
    }
}
