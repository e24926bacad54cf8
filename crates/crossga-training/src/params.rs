//! Immutable configuration of one genetic search.

use crossga_engine::{GeneAlphabet, GeneSampler, GridShape, ScoringParams, Vocabulary};
use serde::{Deserialize, Serialize};

use crate::{breeding::CrossoverPolicy, selection::SelectionPolicy};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    #[display("grid dimensions must be positive, got {height}x{width}")]
    EmptyGrid { height: usize, width: usize },
    #[display("gene pool size must be positive")]
    EmptyPopulation,
    #[display(
        "elite ({elite}) plus new ({new}) chromosomes exceed the gene pool size ({gene_pool_size})"
    )]
    GroupsExceedPopulation {
        elite: usize,
        new: usize,
        gene_pool_size: usize,
    },
    #[display("max generations must be positive")]
    NoGenerations,
    #[display("report interval must be positive")]
    ZeroReportInterval,
    #[display("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[display("{name} must be a finite non-negative number, got {value}")]
    InvalidExponent { name: &'static str, value: f64 },
}

/// How random genes are drawn.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum GeneSampling {
    /// By letter frequency over the vocabulary.
    #[default]
    Weighted,
    /// Every symbol equally likely.
    Uniform,
}

/// Parameters of a genetic search.
///
/// Built once (typically from a settings file) and validated with
/// [`Self::validate`] before the search starts; the search never re-checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticAlgorithmParams {
    /// Grid dimensions.
    pub shape: GridShape,
    /// How fresh genes are drawn.
    pub sampling: GeneSampling,
    /// Chance that a freshly drawn gene becomes a block.
    pub block_probability: f64,
    /// Number of chromosomes in every generation.
    pub gene_pool_size: usize,
    /// Per-gene chance of being redrawn after crossover.
    pub mutate_probability: f64,
    /// Top chromosomes carried unchanged into the next generation.
    pub elite_count: usize,
    /// Fresh random chromosomes injected every generation.
    pub new_count: usize,
    /// Generation budget.
    pub max_generations: usize,
    /// Word scoring.
    pub scoring: ScoringParams,
    /// Parent selection policy.
    pub selection: SelectionPolicy,
    /// Crossover mode choice.
    pub crossover: CrossoverPolicy,
    /// Progress is reported every this many generations.
    pub report_interval: usize,
}

impl Default for GeneticAlgorithmParams {
    fn default() -> Self {
        Self {
            shape: GridShape::new(4, 4),
            sampling: GeneSampling::default(),
            block_probability: 0.05,
            gene_pool_size: 1000,
            mutate_probability: 0.10,
            elite_count: 10,
            new_count: 200,
            max_generations: 10000,
            scoring: ScoringParams::default(),
            selection: SelectionPolicy::default(),
            crossover: CrossoverPolicy::default(),
            report_interval: 10,
        }
    }
}

impl GeneticAlgorithmParams {
    /// Number of children bred each generation.
    #[must_use]
    pub fn breed_count(&self) -> usize {
        self.gene_pool_size - self.elite_count - self.new_count
    }

    /// Builds the gene sampler described by `sampling` and `block_probability`.
    #[must_use]
    pub fn build_sampler(&self, alphabet: GeneAlphabet, vocabulary: &Vocabulary) -> GeneSampler {
        match self.sampling {
            GeneSampling::Weighted => {
                GeneSampler::weighted(alphabet, vocabulary.iter(), self.block_probability)
            }
            GeneSampling::Uniform => GeneSampler::uniform(alphabet, self.block_probability),
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let GridShape { height, width } = self.shape;
        if height == 0 || width == 0 {
            return Err(ParamsError::EmptyGrid { height, width });
        }
        if self.gene_pool_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if self.elite_count + self.new_count > self.gene_pool_size {
            return Err(ParamsError::GroupsExceedPopulation {
                elite: self.elite_count,
                new: self.new_count,
                gene_pool_size: self.gene_pool_size,
            });
        }
        if self.max_generations == 0 {
            return Err(ParamsError::NoGenerations);
        }
        if self.report_interval == 0 {
            return Err(ParamsError::ZeroReportInterval);
        }
        check_probability("block probability", self.block_probability)?;
        check_probability("mutate probability", self.mutate_probability)?;
        check_exponent("long word multiplier", self.scoring.long_word_multiplier)?;
        if let Some(exponent) = self.scoring.partial_credit_exponent {
            check_exponent("partial credit exponent", exponent)?;
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ParamsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamsError::ProbabilityOutOfRange { name, value })
    }
}

fn check_exponent(name: &'static str, value: f64) -> Result<(), ParamsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::InvalidExponent { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GeneticAlgorithmParams::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.breed_count(), 790);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let params = GeneticAlgorithmParams {
            shape: GridShape::new(0, 4),
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::EmptyGrid {
                height: 0,
                width: 4
            })
        );
    }

    #[test]
    fn test_rejects_oversized_groups() {
        let params = GeneticAlgorithmParams {
            gene_pool_size: 10,
            elite_count: 6,
            new_count: 5,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("exceed the gene pool size (10)"));
    }

    #[test]
    fn test_groups_may_fill_population() {
        let params = GeneticAlgorithmParams {
            gene_pool_size: 10,
            elite_count: 5,
            new_count: 5,
            ..Default::default()
        };
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.breed_count(), 0);
    }

    #[test]
    fn test_rejects_bad_probabilities_and_exponents() {
        let params = GeneticAlgorithmParams {
            mutate_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::ProbabilityOutOfRange {
                name: "mutate probability",
                ..
            })
        ));

        let mut params = GeneticAlgorithmParams::default();
        params.scoring.long_word_multiplier = f64::NAN;
        assert!(matches!(
            params.validate(),
            Err(ParamsError::InvalidExponent { .. })
        ));
    }

    #[test]
    fn test_build_sampler_follows_params() {
        let alphabet = GeneAlphabet::new('#', "ab".chars(), None).unwrap();
        let (vocabulary, _) = Vocabulary::from_words(["ab"], &alphabet, 2);

        let params = GeneticAlgorithmParams {
            block_probability: 0.25,
            ..Default::default()
        };
        let sampler = params.build_sampler(alphabet.clone(), &vocabulary);
        assert!(sampler.is_weighted());
        assert!((sampler.block_probability() - 0.25).abs() < f64::EPSILON);

        let params = GeneticAlgorithmParams {
            sampling: GeneSampling::Uniform,
            block_probability: 0.4,
            ..Default::default()
        };
        let sampler = params.build_sampler(alphabet, &vocabulary);
        assert!(!sampler.is_weighted());
        assert!((sampler.block_probability() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_zero_budgets() {
        let params = GeneticAlgorithmParams {
            max_generations: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::NoGenerations));

        let params = GeneticAlgorithmParams {
            gene_pool_size: 0,
            elite_count: 0,
            new_count: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::EmptyPopulation));
    }
}
