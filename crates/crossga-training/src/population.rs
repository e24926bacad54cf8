//! Populations of candidate grids.
//!
//! A generation moves through two representations:
//!
//! - [`Population`]: plain chromosomes, not yet scored
//! - [`RankedPopulation`]: chromosomes paired with fitness, best first
//!
//! [`PopulationEvolver`] turns a ranked generation into the next plain one.

use crossga_engine::{Chromosome, FitnessEvaluator, GeneSampler, GridShape};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use rayon::prelude::*;

use crate::{
    breeding::Breeder,
    params::GeneticAlgorithmParams,
    selection::Selector,
    stats::FitnessStats,
};

/// A chromosome together with the fitness it scored this generation.
#[derive(Debug, Clone)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: f64,
}

impl Individual {
    #[must_use]
    pub fn new(chromosome: Chromosome, fitness: f64) -> Self {
        Self {
            chromosome,
            fitness,
        }
    }

    #[must_use]
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

/// One generation of chromosomes before evaluation.
#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Creates `count` random chromosomes.
    pub fn random<R>(shape: GridShape, count: usize, sampler: &GeneSampler, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let chromosomes = (0..count)
            .map(|_| Chromosome::random(shape, sampler, rng))
            .collect();
        Self { chromosomes }
    }

    #[must_use]
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Scores every chromosome in parallel and sorts by fitness, best first.
    ///
    /// The sort is stable, so equal scores keep their population order.
    #[must_use]
    pub fn evaluate(self, evaluator: &FitnessEvaluator<'_>) -> RankedPopulation {
        let mut individuals: Vec<Individual> = self
            .chromosomes
            .into_par_iter()
            .map(|chromosome| {
                let fitness = evaluator.crossword_fitness(&chromosome);
                Individual::new(chromosome, fitness)
            })
            .collect();
        individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        let fitness_sum = individuals.iter().map(Individual::fitness).sum();
        RankedPopulation {
            individuals,
            fitness_sum,
        }
    }
}

/// A scored generation, sorted by fitness descending.
#[derive(Debug, Clone)]
pub struct RankedPopulation {
    individuals: Vec<Individual>,
    fitness_sum: f64,
}

impl RankedPopulation {
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The fittest individual.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn best(&self) -> &Individual {
        &self.individuals[0]
    }

    #[must_use]
    pub fn fitness_sum(&self) -> f64 {
        self.fitness_sum
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            0.0
        } else {
            self.fitness_sum / self.individuals.len() as f64
        }
    }

    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<FitnessStats> {
        FitnessStats::new(self.individuals.iter().map(Individual::fitness))
    }

    /// Picks one parent.
    pub fn select<R>(&self, selector: &Selector, rng: &mut R) -> &Individual
    where
        R: Rng + ?Sized,
    {
        selector.select(&self.individuals, self.fitness_sum, rng)
    }
}

/// Builds the next generation from a ranked one.
///
/// The next generation is, in order:
///
/// 1. `new_count` fresh random chromosomes,
/// 2. the `elite_count` best chromosomes, unchanged,
/// 3. `gene_pool_size - new_count - elite_count` children of selected parents.
///
/// Each child is bred with its own generator seeded from `rng`, so children can
/// be built in parallel and a seeded run stays reproducible.
#[derive(Debug, Clone)]
pub struct PopulationEvolver<'a> {
    params: &'a GeneticAlgorithmParams,
    sampler: &'a GeneSampler,
    selector: Selector,
}

impl<'a> PopulationEvolver<'a> {
    #[must_use]
    pub fn new(params: &'a GeneticAlgorithmParams, sampler: &'a GeneSampler) -> Self {
        Self {
            params,
            sampler,
            selector: Selector::new(params.selection),
        }
    }

    /// Evolves `ranked` into the next generation.
    ///
    /// # Panics
    ///
    /// Panics if `ranked` holds fewer than `elite_count` individuals.
    pub fn evolve<R>(&self, ranked: &RankedPopulation, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let params = self.params;
        assert!(
            ranked
                .individuals
                .is_sorted_by(|a, b| a.fitness >= b.fitness)
        );

        let mut next = Vec::with_capacity(params.gene_pool_size);

        // diversity injection
        next.extend(
            (0..params.new_count).map(|_| Chromosome::random(params.shape, self.sampler, rng)),
        );

        // elite selection
        next.extend(
            ranked.individuals[..params.elite_count]
                .iter()
                .map(|ind| ind.chromosome.clone()),
        );

        // breeding
        let breeder = Breeder::new(self.sampler, params.crossover, params.mutate_probability);
        let seeds: Vec<u64> = (0..params.breed_count()).map(|_| rng.random()).collect();
        let children: Vec<Chromosome> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = Pcg32::seed_from_u64(seed);
                let father = ranked.select(&self.selector, &mut rng);
                let mother = ranked.select(&self.selector, &mut rng);
                breeder.breed(&father.chromosome, &mother.chromosome, &mut rng)
            })
            .collect();
        next.extend(children);

        Population::from_chromosomes(next)
    }
}
