//! Fitness evaluation of crossword grids.
//!
//! The fitness of a grid is the sum of the fitness of all its rows and columns.
//! A line's fitness is the sum of the fitness of the words it splits into, halved
//! when the line contains two adjacent blocks.
//!
//! # Word scoring
//!
//! - A vocabulary word scores `len ^ long_word_multiplier`.
//! - Any other word scores 0 when only full words count.
//! - Otherwise it earns partial credit: the best positional overlap with a
//!   vocabulary word of the same length, raised to the partial-credit exponent.

use serde::{Deserialize, Serialize};

use crate::{Chromosome, Vocabulary, words};

/// Scoring knobs for [`FitnessEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringParams {
    /// Score non-vocabulary words as 0 instead of by partial overlap.
    pub only_full_words: bool,
    /// Exponent applied to the length of vocabulary words.
    pub long_word_multiplier: f64,
    /// Exponent applied to partial overlaps. Defaults to `long_word_multiplier`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_credit_exponent: Option<f64>,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            only_full_words: true,
            long_word_multiplier: 1.0,
            partial_credit_exponent: None,
        }
    }
}

/// Scores grids against a vocabulary.
///
/// Holds only shared references, so one evaluator can be used from many
/// threads at once.
///
/// # Example
///
/// ```
/// use crossga_engine::{Chromosome, FitnessEvaluator, GeneAlphabet, ScoringParams, Vocabulary};
///
/// let alphabet = GeneAlphabet::new('#', "acrt".chars(), None).unwrap();
/// let (vocabulary, _) = Vocabulary::from_words(["ca", "rt", "cr", "at"], &alphabet, 2);
/// let evaluator = FitnessEvaluator::new(&vocabulary, alphabet.block(), ScoringParams::default());
///
/// let grid = Chromosome::from_rows(&alphabet, &["ca", "rt"]).unwrap();
/// assert_eq!(evaluator.crossword_fitness(&grid), 8.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    vocabulary: &'a Vocabulary,
    block: char,
    params: ScoringParams,
}

impl<'a> FitnessEvaluator<'a> {
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary, block: char, params: ScoringParams) -> Self {
        Self {
            vocabulary,
            block,
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    #[must_use]
    pub fn word_fitness(&self, word: &str) -> f64 {
        if self.vocabulary.contains(word) {
            #[expect(clippy::cast_precision_loss)]
            let len = word.chars().count() as f64;
            return len.powf(self.params.long_word_multiplier);
        }
        if self.params.only_full_words {
            return 0.0;
        }
        let exponent = self
            .params
            .partial_credit_exponent
            .unwrap_or(self.params.long_word_multiplier);
        let Some(overlap) = self.vocabulary.best_overlap(word) else {
            return 0.0;
        };
        #[expect(clippy::cast_precision_loss)]
        let overlap = overlap as f64;
        overlap.powf(exponent)
    }

    #[must_use]
    pub fn crossline_fitness(&self, line: &str) -> f64 {
        let sum = words::split_words(line, self.block)
            .map(|word| self.word_fitness(word))
            .sum::<f64>();
        if words::has_adjacent_blocks(line, self.block) {
            sum / 2.0
        } else {
            sum
        }
    }

    #[must_use]
    pub fn crossword_fitness(&self, chromosome: &Chromosome) -> f64 {
        chromosome
            .lines()
            .map(|line| self.crossline_fitness(&line))
            .sum()
    }
}
