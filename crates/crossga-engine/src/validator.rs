use crate::{Chromosome, Vocabulary, words};

/// Decides whether a grid is a finished crossword.
///
/// A line is valid when every word in it (after splitting on the block symbol
/// and dropping empty words) is in the vocabulary. A line with no words at all
/// is valid. A grid is valid when all of its rows and columns are.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    vocabulary: &'a Vocabulary,
    block: char,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary, block: char) -> Self {
        Self { vocabulary, block }
    }

    #[must_use]
    pub fn crossline_valid(&self, line: &str) -> bool {
        words::split_words(line, self.block).all(|word| self.vocabulary.contains(word))
    }

    #[must_use]
    pub fn crossword_valid(&self, chromosome: &Chromosome) -> bool {
        chromosome.lines().all(|line| self.crossline_valid(&line))
    }

    /// Words of `line` that are not in the vocabulary.
    #[must_use]
    pub fn unknown_words<'l>(&self, line: &'l str) -> Vec<&'l str> {
        words::split_words(line, self.block)
            .filter(|word| !self.vocabulary.contains(word))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::GeneAlphabet;

    use super::*;

    fn alphabet() -> GeneAlphabet {
        GeneAlphabet::new('#', "acdgort".chars(), None).unwrap()
    }

    #[test]
    fn test_crossline_valid() {
        let (vocabulary, _) = Vocabulary::from_words(["cat"], &alphabet(), 7);
        let validator = Validator::new(&vocabulary, '#');
        assert!(validator.crossline_valid("cat"));
        assert!(validator.crossline_valid("#cat#"));
        assert!(!validator.crossline_valid("cat#dog"));
        assert_eq!(validator.unknown_words("cat#dog"), ["dog"]);
        assert!(!validator.crossline_valid("catdog"));
    }

    #[test]
    fn test_line_without_words_is_valid() {
        let (vocabulary, _) = Vocabulary::from_words(["cat"], &alphabet(), 7);
        let validator = Validator::new(&vocabulary, '#');
        assert!(validator.crossline_valid("###"));
        assert!(validator.crossline_valid(""));
    }

    #[test]
    fn test_crossword_valid() {
        let alphabet = alphabet();
        let (vocabulary, _) = Vocabulary::from_words(["ca", "rt", "cr", "at"], &alphabet, 2);
        let validator = Validator::new(&vocabulary, '#');
        let grid = Chromosome::from_rows(&alphabet, &["ca", "rt"]).unwrap();
        assert!(validator.crossword_valid(&grid));
        assert!(validator.crossword_valid(&grid));

        let grid = Chromosome::from_rows(&alphabet, &["ac", "rt"]).unwrap();
        assert!(!validator.crossword_valid(&grid));

        let grid = Chromosome::from_rows(&alphabet, &["##", "##"]).unwrap();
        assert!(validator.crossword_valid(&grid));
    }
}
