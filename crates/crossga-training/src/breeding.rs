//! Crossover and mutation.
//!
//! A child is produced from two parents in two steps:
//!
//! 1. **Crossover** at a breakpoint drawn uniformly from `0..=len`. Genes before
//!    the breakpoint come from the father, the rest from the mother. Positions
//!    are counted either row-major ([`CrossoverMode::Linear`]) or column-major
//!    ([`CrossoverMode::ColumnWise`]), so the two modes cut the grid along
//!    different axes.
//! 2. **Mutation**: every gene of the child is independently redrawn with
//!    probability `mutate_probability`.
//!
//! Parents are only read. A breakpoint of 0 clones the mother, a breakpoint of
//! `len` clones the father.

use std::str::FromStr;

use crossga_engine::{Chromosome, GeneSampler};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How one crossover traverses the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverMode {
    /// Row-major order (the chromosome as one flat sequence).
    Linear,
    /// Column-major order.
    ColumnWise,
}

/// Which [`CrossoverMode`] each breeding event uses.
///
/// Parses from the same names it serializes to (`mixed`, `linear`,
/// `column_wise`), ignoring case.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverPolicy {
    /// Fair coin flip between linear and column-wise per child.
    #[default]
    Mixed,
    /// Always linear.
    Linear,
    /// Always column-wise.
    ColumnWise,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown crossover policy '{name}', expected mixed, linear or column_wise")]
pub struct ParseCrossoverPolicyError {
    name: String,
}

impl FromStr for CrossoverPolicy {
    type Err = ParseCrossoverPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mixed" => Ok(CrossoverPolicy::Mixed),
            "linear" => Ok(CrossoverPolicy::Linear),
            "column_wise" => Ok(CrossoverPolicy::ColumnWise),
            _ => Err(ParseCrossoverPolicyError { name: s.to_owned() }),
        }
    }
}

impl CrossoverPolicy {
    pub fn pick_mode<R>(self, rng: &mut R) -> CrossoverMode
    where
        R: Rng + ?Sized,
    {
        match self {
            CrossoverPolicy::Mixed => {
                if rng.random_bool(0.5) {
                    CrossoverMode::Linear
                } else {
                    CrossoverMode::ColumnWise
                }
            }
            CrossoverPolicy::Linear => CrossoverMode::Linear,
            CrossoverPolicy::ColumnWise => CrossoverMode::ColumnWise,
        }
    }
}

/// Combines two parents at `breakpoint` without mutation.
///
/// # Panics
///
/// Panics if the parents have different shapes or `breakpoint > len`.
///
/// # Example
///
/// ```
/// use crossga_engine::{Chromosome, GeneAlphabet};
/// use crossga_training::breeding::{CrossoverMode, crossover};
///
/// let alphabet = GeneAlphabet::new('#', "abcdefgh".chars(), None).unwrap();
/// let father = Chromosome::from_rows(&alphabet, &["ab", "cd"]).unwrap();
/// let mother = Chromosome::from_rows(&alphabet, &["ef", "gh"]).unwrap();
///
/// let child = crossover(&father, &mother, 1, CrossoverMode::Linear);
/// assert_eq!(child.to_string(), "af\ngh");
///
/// let child = crossover(&father, &mother, 1, CrossoverMode::ColumnWise);
/// assert_eq!(child.to_string(), "af\ngh");
///
/// let child = crossover(&father, &mother, 2, CrossoverMode::ColumnWise);
/// assert_eq!(child.to_string(), "af\nch");
/// ```
#[must_use]
pub fn crossover(
    father: &Chromosome,
    mother: &Chromosome,
    breakpoint: usize,
    mode: CrossoverMode,
) -> Chromosome {
    assert_eq!(father.shape(), mother.shape(), "parents must share a shape");
    assert!(breakpoint <= father.len(), "breakpoint out of range");
    let shape = father.shape();
    match mode {
        CrossoverMode::Linear => {
            let genes = father.genes()[..breakpoint]
                .iter()
                .chain(&mother.genes()[breakpoint..])
                .copied()
                .collect();
            Chromosome::from_genes(shape, genes)
        }
        CrossoverMode::ColumnWise => {
            let mut child = father.clone();
            for i in breakpoint..shape.cell_count() {
                let idx = shape.column_major_index(i);
                child.set_gene(idx, mother.genes()[idx]);
            }
            child
        }
    }
}

/// Redraws each gene of `chromosome` with probability `probability`.
pub fn mutate<R>(chromosome: &mut Chromosome, sampler: &GeneSampler, probability: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for idx in 0..chromosome.len() {
        if rng.random_bool(probability) {
            chromosome.set_gene(idx, sampler.draw_gene(rng));
        }
    }
}

/// Produces children from pairs of parents.
#[derive(Debug, Clone, Copy)]
pub struct Breeder<'a> {
    sampler: &'a GeneSampler,
    crossover: CrossoverPolicy,
    mutate_probability: f64,
}

impl<'a> Breeder<'a> {
    #[must_use]
    pub fn new(
        sampler: &'a GeneSampler,
        crossover: CrossoverPolicy,
        mutate_probability: f64,
    ) -> Self {
        Self {
            sampler,
            crossover,
            mutate_probability,
        }
    }

    /// Crossover at a random breakpoint, then mutation.
    pub fn breed<R>(&self, father: &Chromosome, mother: &Chromosome, rng: &mut R) -> Chromosome
    where
        R: Rng + ?Sized,
    {
        let breakpoint = rng.random_range(0..=father.len());
        let mode = self.crossover.pick_mode(rng);
        let mut child = crossover(father, mother, breakpoint, mode);
        mutate(&mut child, self.sampler, self.mutate_probability, rng);
        child
    }
}

#[cfg(test)]
mod tests {
    use crossga_engine::{GeneAlphabet, GridShape};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn alphabet() -> GeneAlphabet {
        GeneAlphabet::new('#', "abcdefghijklmnopqrstuvwx".chars(), None).unwrap()
    }

    fn parents() -> (Chromosome, Chromosome) {
        let alphabet = alphabet();
        let father = Chromosome::from_rows(&alphabet, &["abcd", "efgh", "ijkl"]).unwrap();
        let mother = Chromosome::from_rows(&alphabet, &["mnop", "qrst", "uvwx"]).unwrap();
        (father, mother)
    }

    #[test]
    fn test_linear_crossover_concatenates() {
        let (father, mother) = parents();
        let child = crossover(&father, &mother, 5, CrossoverMode::Linear);
        assert_eq!(child.rows().collect::<Vec<_>>(), ["abcd", "erst", "uvwx"]);
    }

    #[test]
    fn test_column_wise_crossover_interleaves() {
        let (father, mother) = parents();
        // First column (a, e, i) and the top of the second (b) from the father.
        let child = crossover(&father, &mother, 4, CrossoverMode::ColumnWise);
        assert_eq!(child.rows().collect::<Vec<_>>(), ["abop", "erst", "ivwx"]);
    }

    #[test]
    fn test_breakpoint_extremes_clone_a_parent() {
        let (father, mother) = parents();
        for mode in [CrossoverMode::Linear, CrossoverMode::ColumnWise] {
            assert_eq!(crossover(&father, &mother, 0, mode), mother);
            assert_eq!(crossover(&father, &mother, father.len(), mode), father);
        }
    }

    #[test]
    fn test_mutation_probability_extremes() {
        let (father, _) = parents();
        let sampler = GeneSampler::weighted(alphabet(), ["ab"], 1.0);
        let mut rng = Pcg32::seed_from_u64(4);

        let mut child = father.clone();
        mutate(&mut child, &sampler, 0.0, &mut rng);
        assert_eq!(child, father);

        // every gene redrawn, and the sampler only produces blocks
        mutate(&mut child, &sampler, 1.0, &mut rng);
        assert!(child.genes().iter().all(|&g| g == '#'));
    }

    #[test]
    fn test_breed_keeps_parents_and_shape() {
        let (father, mother) = parents();
        let (father_before, mother_before) = (father.clone(), mother.clone());
        let sampler = GeneSampler::uniform(alphabet(), 0.0);
        let breeder = Breeder::new(&sampler, CrossoverPolicy::Mixed, 0.1);
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..50 {
            let child = breeder.breed(&father, &mother, &mut rng);
            assert_eq!(child.shape(), GridShape::new(3, 4));
        }
        assert_eq!(father, father_before);
        assert_eq!(mother, mother_before);
    }

    #[test]
    fn test_breed_without_mutation_takes_genes_from_parents() {
        let (father, mother) = parents();
        let sampler = GeneSampler::uniform(alphabet(), 0.0);
        let breeder = Breeder::new(&sampler, CrossoverPolicy::Mixed, 0.0);
        let mut rng = Pcg32::seed_from_u64(15);
        for _ in 0..50 {
            let child = breeder.breed(&father, &mother, &mut rng);
            for (idx, gene) in child.genes().iter().enumerate() {
                assert!(*gene == father.genes()[idx] || *gene == mother.genes()[idx]);
            }
        }
    }

    #[test]
    fn test_fixed_policies() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..20 {
            assert_eq!(
                CrossoverPolicy::Linear.pick_mode(&mut rng),
                CrossoverMode::Linear
            );
            assert_eq!(
                CrossoverPolicy::ColumnWise.pick_mode(&mut rng),
                CrossoverMode::ColumnWise
            );
        }
    }

    #[test]
    fn test_policy_parses_serialized_names() {
        for policy in [
            CrossoverPolicy::Mixed,
            CrossoverPolicy::Linear,
            CrossoverPolicy::ColumnWise,
        ] {
            let name = serde_json::to_value(policy).unwrap();
            let name = name.as_str().unwrap();
            assert_eq!(name.parse::<CrossoverPolicy>(), Ok(policy));
            assert_eq!(name.to_uppercase().parse::<CrossoverPolicy>(), Ok(policy));
        }
        let err = "columnwise".parse::<CrossoverPolicy>().unwrap_err();
        assert!(err.to_string().contains("column_wise"));
    }
}
