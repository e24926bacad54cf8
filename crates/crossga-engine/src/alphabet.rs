//! Gene alphabet and random gene generation.
//!
//! A [`GeneAlphabet`] is the fixed, ordered set of symbols a grid cell may hold:
//! one block symbol, the letter symbols, and optionally a wildcard symbol.
//! A [`GeneSampler`] draws genes from an alphabet, either uniformly or weighted
//! by letter frequency in a vocabulary.
//!
//! # Block density
//!
//! The weighted table never contains the block symbol with a meaningful weight
//! (vocabulary words do not contain it). Block density is controlled separately
//! by `block_probability`: after a symbol has been drawn, an independent draw
//! replaces it with the block symbol with that probability. This applies in
//! both sampling modes.

use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

/// Block symbol used by the default alphabet.
pub const DEFAULT_BLOCK: char = '*';

/// Letters of the default (Danish) alphabet.
pub const DEFAULT_LETTERS: &str = "-abcdefghijklmnopqrstuvyæøå";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AlphabetError {
    #[display("alphabet has no letters")]
    NoLetters,
    #[display("block symbol '{block}' must not also be a letter")]
    BlockIsLetter { block: char },
    #[display("wildcard symbol '{wildcard}' must differ from the block symbol and the letters")]
    WildcardConflict { wildcard: char },
    #[display("letter '{letter}' appears more than once")]
    DuplicateLetter { letter: char },
}

/// The ordered set of symbols a gene may take.
///
/// Symbol order is `[block, letters.., wildcard?]` and is fixed for the lifetime
/// of the alphabet; weight tables are indexed in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneAlphabet {
    block: char,
    letters: Vec<char>,
    wildcard: Option<char>,
}

impl Default for GeneAlphabet {
    fn default() -> Self {
        Self {
            block: DEFAULT_BLOCK,
            letters: DEFAULT_LETTERS.chars().collect(),
            wildcard: None,
        }
    }
}

impl GeneAlphabet {
    /// Creates an alphabet from a block symbol, a list of letters and an
    /// optional wildcard.
    ///
    /// Letters are lower-cased.
    pub fn new<I>(block: char, letters: I, wildcard: Option<char>) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut uniq: Vec<char> = vec![];
        for letter in letters.into_iter().flat_map(char::to_lowercase) {
            if uniq.contains(&letter) {
                return Err(AlphabetError::DuplicateLetter { letter });
            }
            uniq.push(letter);
        }
        if uniq.is_empty() {
            return Err(AlphabetError::NoLetters);
        }
        if uniq.contains(&block) {
            return Err(AlphabetError::BlockIsLetter { block });
        }
        if let Some(wildcard) = wildcard {
            if wildcard == block || uniq.contains(&wildcard) {
                return Err(AlphabetError::WildcardConflict { wildcard });
            }
        }
        Ok(Self {
            block,
            letters: uniq,
            wildcard,
        })
    }

    #[must_use]
    pub fn block(&self) -> char {
        self.block
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    #[must_use]
    pub fn wildcard(&self) -> Option<char> {
        self.wildcard
    }

    /// Returns every symbol in table order: block, letters, then the wildcard.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        std::iter::once(self.block)
            .chain(self.letters.iter().copied())
            .chain(self.wildcard)
    }

    /// Number of symbols, block and wildcard included.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.letters.len() + usize::from(self.wildcard.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        symbol == self.block || self.is_word_symbol(symbol)
    }

    /// Returns `true` if `symbol` may appear inside a word (a letter or the wildcard).
    #[must_use]
    pub fn is_word_symbol(&self, symbol: char) -> bool {
        self.letters.contains(&symbol) || self.wildcard == Some(symbol)
    }
}

/// How a [`GeneSampler`] picks the base symbol.
#[derive(Debug, Clone, PartialEq)]
enum GeneWeights {
    /// Uniform pick over all symbols, block included.
    Uniform,
    /// Cumulative weight table, one entry per symbol in alphabet order.
    Cumulative(Vec<f64>),
}

/// Draws random genes from an alphabet.
///
/// Immutable once built, so it can be shared freely between breeding workers.
///
/// # Example
///
/// ```
/// use crossga_engine::{GeneAlphabet, GeneSampler};
///
/// let alphabet = GeneAlphabet::new('#', "ab".chars(), None).unwrap();
/// let sampler = GeneSampler::uniform(alphabet, 0.0);
/// let gene = sampler.draw_gene(&mut rand::rng());
/// assert!("#ab".contains(gene));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneSampler {
    alphabet: GeneAlphabet,
    symbols: Vec<char>,
    weights: GeneWeights,
    block_probability: f64,
}

impl GeneSampler {
    /// Sampler that picks every symbol (block included) with equal probability.
    ///
    /// `block_probability` is the chance that a drawn symbol is replaced by the
    /// block symbol.
    #[must_use]
    pub fn uniform(alphabet: GeneAlphabet, block_probability: f64) -> Self {
        Self {
            symbols: alphabet.symbols().collect(),
            alphabet,
            weights: GeneWeights::Uniform,
            block_probability,
        }
    }

    /// Sampler weighted by symbol frequency over the concatenation of `words`.
    ///
    /// `block_probability` is the chance that a drawn letter is replaced by the
    /// block symbol. Falls back to uniform sampling if `words` contain no
    /// alphabet symbols at all.
    #[must_use]
    pub fn weighted<'a, I>(alphabet: GeneAlphabet, words: I, block_probability: f64) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let symbols: Vec<char> = alphabet.symbols().collect();
        let mut counts = vec![0_usize; symbols.len()];
        let mut total = 0_usize;
        for ch in words.into_iter().flat_map(str::chars) {
            total += 1;
            if let Some(idx) = symbols.iter().position(|&s| s == ch) {
                counts[idx] += 1;
            }
        }
        if counts.iter().all(|&c| c == 0) {
            return Self::uniform(alphabet, block_probability);
        }

        #[expect(clippy::cast_precision_loss)]
        let cumulative = counts
            .iter()
            .scan(0.0, |acc, &c| {
                *acc += c as f64 / total as f64;
                Some(*acc)
            })
            .collect();
        Self {
            alphabet,
            symbols,
            weights: GeneWeights::Cumulative(cumulative),
            block_probability,
        }
    }

    #[must_use]
    pub fn alphabet(&self) -> &GeneAlphabet {
        &self.alphabet
    }

    #[must_use]
    pub fn block_probability(&self) -> f64 {
        self.block_probability
    }

    #[must_use]
    pub fn is_weighted(&self) -> bool {
        matches!(self.weights, GeneWeights::Cumulative(_))
    }

    /// Draws one gene.
    pub fn draw_gene<R>(&self, rng: &mut R) -> char
    where
        R: Rng + ?Sized,
    {
        let symbol = match &self.weights {
            GeneWeights::Uniform => *self.symbols.choose(rng).unwrap_or(&self.alphabet.block),
            GeneWeights::Cumulative(table) => {
                let r: f64 = rng.random();
                // The table may end slightly below 1.0 after rounding.
                let idx = table.partition_point(|&c| c <= r).min(table.len() - 1);
                self.symbols[idx]
            }
        };
        if rng.random_bool(self.block_probability) {
            self.alphabet.block
        } else {
            symbol
        }
    }
}
