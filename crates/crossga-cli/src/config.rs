//! Settings file for the `crossga` binary.
//!
//! Settings are read from a TOML file. Every key is optional and falls back to
//! the defaults below, so an empty file (or no file) is a valid configuration.
//!
//! ```toml
//! [grid]
//! height = 4
//! width = 4
//!
//! [alphabet]
//! block = "*"
//! letters = "-abcdefghijklmnopqrstuvyæøå"
//!
//! [algorithm]
//! sampling = "weighted"     # or "uniform"
//! gene_pool_size = 1000
//! mutate_probability = 0.1
//! block_probability = 0.05
//! elite_fraction = 0.01     # or elite_count = 10
//! new_fraction = 0.2        # or new_count = 200
//! max_generations = 10000
//! selection = "roulette"    # or "quick"
//! crossover = "mixed"       # or "linear", "column_wise"
//! report_interval = 10
//!
//! [scoring]
//! only_full_words = true
//! long_word_multiplier = 1.0
//! ```

use std::{fs, path::Path};

use anyhow::Context as _;
use crossga_engine::{
    GeneAlphabet, GridShape, ScoringParams,
    alphabet::{DEFAULT_BLOCK, DEFAULT_LETTERS},
};
use crossga_training::{
    breeding::CrossoverPolicy,
    params::{GeneSampling, GeneticAlgorithmParams},
    selection::SelectionPolicy,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub grid: GridSettings,
    pub alphabet: AlphabetSettings,
    pub algorithm: AlgorithmSettings,
    pub scoring: ScoringParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GridSettings {
    pub height: usize,
    pub width: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            height: 4,
            width: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AlphabetSettings {
    pub block: char,
    pub letters: String,
    pub wildcard: Option<char>,
}

impl Default for AlphabetSettings {
    fn default() -> Self {
        Self {
            block: DEFAULT_BLOCK,
            letters: DEFAULT_LETTERS.to_owned(),
            wildcard: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AlgorithmSettings {
    /// Draw genes by letter frequency in the dictionary or uniformly.
    pub sampling: GeneSampling,
    pub gene_pool_size: usize,
    pub mutate_probability: f64,
    pub block_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elite_count: Option<usize>,
    pub elite_fraction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_count: Option<usize>,
    pub new_fraction: f64,
    pub max_generations: usize,
    pub selection: SelectionPolicy,
    pub crossover: CrossoverPolicy,
    pub report_interval: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AlgorithmSettings {
    fn default() -> Self {
        Self {
            sampling: GeneSampling::default(),
            gene_pool_size: 1000,
            mutate_probability: 0.10,
            block_probability: 0.05,
            elite_count: None,
            elite_fraction: 0.01,
            new_count: None,
            new_fraction: 0.2,
            max_generations: 10000,
            selection: SelectionPolicy::default(),
            crossover: CrossoverPolicy::default(),
            report_interval: 10,
            seed: None,
        }
    }
}

impl Settings {
    /// Reads settings from a TOML file.
    pub(crate) fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }

    pub(crate) fn build_alphabet(&self) -> anyhow::Result<GeneAlphabet> {
        let AlphabetSettings {
            block,
            letters,
            wildcard,
            ..
        } = &self.alphabet;
        GeneAlphabet::new(*block, letters.chars(), *wildcard).context("Invalid alphabet settings")
    }

    /// Converts the settings into validated search parameters.
    pub(crate) fn build_params(&self) -> anyhow::Result<GeneticAlgorithmParams> {
        let algorithm = &self.algorithm;
        let pool = algorithm.gene_pool_size;
        let params = GeneticAlgorithmParams {
            shape: GridShape::new(self.grid.height, self.grid.width),
            sampling: algorithm.sampling,
            block_probability: algorithm.block_probability,
            gene_pool_size: pool,
            mutate_probability: algorithm.mutate_probability,
            elite_count: group_size(
                "elite",
                algorithm.elite_count,
                algorithm.elite_fraction,
                pool,
            )?,
            new_count: group_size("new", algorithm.new_count, algorithm.new_fraction, pool)?,
            max_generations: algorithm.max_generations,
            scoring: self.scoring,
            selection: algorithm.selection,
            crossover: algorithm.crossover,
            report_interval: algorithm.report_interval,
        };
        params.validate().context("Invalid algorithm settings")?;
        Ok(params)
    }
}

/// Resolves a group size given as an absolute count or a fraction of the pool.
///
/// A count takes precedence over a fraction. Fractions round down.
fn group_size(
    name: &str,
    count: Option<usize>,
    fraction: f64,
    pool: usize,
) -> anyhow::Result<usize> {
    if let Some(count) = count {
        return Ok(count);
    }
    if !(0.0..=1.0).contains(&fraction) {
        anyhow::bail!("{name} fraction must be within [0, 1], got {fraction}");
    }
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let size = (pool as f64 * fraction) as usize;
    Ok(size)
}
