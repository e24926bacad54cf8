//! Grid model and scoring for the crossword genetic search.
//!
//! This crate holds everything that does not involve evolution itself:
//!
//! - [`GeneAlphabet`] / [`GeneSampler`]: which symbols a cell may hold and how
//!   random genes are drawn
//! - [`Chromosome`] / [`GridShape`]: a candidate grid as a flat row-major gene
//!   sequence
//! - [`Vocabulary`]: the read-only word list
//! - [`FitnessEvaluator`]: numeric score of a grid (drives selection)
//! - [`Validator`]: whether every word of a grid is a real word (ends the search)
//!
//! Fitness and validity share one line-splitting routine ([`words::split_words`])
//! so the two never disagree about what counts as a word.
//!
//! # Example
//!
//! ```
//! use crossga_engine::{Chromosome, GeneAlphabet, Validator, Vocabulary};
//!
//! let alphabet = GeneAlphabet::new('#', "acrt".chars(), None).unwrap();
//! let (vocabulary, _) = Vocabulary::from_words(["ca", "rt", "cr", "at"], &alphabet, 2);
//! let validator = Validator::new(&vocabulary, alphabet.block());
//!
//! let grid = Chromosome::from_rows(&alphabet, &["ca", "rt"]).unwrap();
//! assert!(validator.crossword_valid(&grid));
//! ```

pub use self::{
    alphabet::{AlphabetError, GeneAlphabet, GeneSampler},
    chromosome::{Chromosome, ChromosomeError, GridShape},
    fitness::{FitnessEvaluator, ScoringParams},
    validator::Validator,
    vocabulary::{Vocabulary, VocabularyStats},
};

pub mod alphabet;
pub mod chromosome;
pub mod fitness;
pub mod validator;
pub mod vocabulary;
pub mod words;
