//! The generational loop.
//!
//! Every generation goes through the same barrier-separated phases:
//!
//! 1. **Evaluate** every chromosome (parallel)
//! 2. **Rank** by fitness, best first
//! 3. **Check termination** on the best chromosome: a valid grid ends the
//!    search successfully, an exhausted generation budget or an observer stop
//!    request ends it unsuccessfully
//! 4. **Reproduce** the next generation (fresh + elites + children)
//!
//! The search owns its population and its random generator. Given the same
//! parameters, vocabulary and seed, two searches produce the same result.

use crossga_engine::{
    Chromosome, FitnessEvaluator, GeneAlphabet, GeneSampler, Validator, Vocabulary,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    params::GeneticAlgorithmParams,
    population::{Population, PopulationEvolver, RankedPopulation},
    stats::FitnessStats,
};

/// Snapshot of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProgress {
    pub generation: usize,
    pub best_fitness: f64,
    pub average_fitness: f64,
    pub stats: Option<FitnessStats>,
}

/// Receives progress events from a running search.
///
/// Observation never changes the search, except that [`Self::should_stop`] may
/// end it early at a generation boundary.
pub trait SearchObserver {
    /// Called every `report_interval` generations.
    fn on_progress(&mut self, _progress: &GenerationProgress) {}

    /// Called once per generation before the next one is bred.
    fn should_stop(&mut self, _generation: usize) -> bool {
        false
    }
}

impl SearchObserver for () {}

/// Why a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The best grid is a valid crossword.
    #[display("solved")]
    Solved,
    /// The generation budget ran out.
    #[display("exhausted")]
    Exhausted,
    /// The observer asked to stop.
    #[display("stopped")]
    Stopped,
}

/// Result of a finished search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best grid of the final generation (valid only when solved).
    pub best: Chromosome,
    pub best_fitness: f64,
    /// Index of the final generation.
    pub generation: usize,
    pub termination: Termination,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.termination == Termination::Solved
    }

    /// Number of generations evaluated.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.generation + 1
    }
}

/// Record of a finished run, suitable for appending to a results log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generation: usize,
    pub generations: usize,
    pub termination: Termination,
    pub solved: bool,
    pub best_fitness: f64,
    pub grid: Vec<String>,
    pub seed: u64,
    pub params: GeneticAlgorithmParams,
}

/// A genetic search for a valid crossword.
///
/// # Example
///
/// ```
/// use crossga_engine::{GeneAlphabet, GridShape, Vocabulary};
/// use crossga_training::{params::GeneticAlgorithmParams, search::Search};
///
/// let alphabet = GeneAlphabet::new('#', "ab".chars(), None).unwrap();
/// let (vocabulary, _) = Vocabulary::from_words(["aa", "ab", "ba", "bb"], &alphabet, 2);
/// let params = GeneticAlgorithmParams {
///     shape: GridShape::new(2, 2),
///     block_probability: 0.0,
///     gene_pool_size: 10,
///     elite_count: 1,
///     new_count: 2,
///     max_generations: 5,
///     ..Default::default()
/// };
///
/// let mut search = Search::with_seed(params, alphabet, &vocabulary, 42);
/// let outcome = search.run(&mut ());
/// assert!(outcome.is_solved());
/// ```
#[derive(Debug)]
pub struct Search<'a> {
    params: GeneticAlgorithmParams,
    sampler: GeneSampler,
    vocabulary: &'a Vocabulary,
    seed: u64,
    rng: Pcg32,
}

impl<'a> Search<'a> {
    /// Creates a search with a random seed.
    ///
    /// `params` must already be validated. Genes are drawn from `alphabet` as
    /// `params` describes, so the parameters are the whole configuration.
    #[must_use]
    pub fn new(
        params: GeneticAlgorithmParams,
        alphabet: GeneAlphabet,
        vocabulary: &'a Vocabulary,
    ) -> Self {
        Self::with_seed(params, alphabet, vocabulary, rand::rng().random())
    }

    /// Like [`Self::new`], but reproducible.
    #[must_use]
    pub fn with_seed(
        params: GeneticAlgorithmParams,
        alphabet: GeneAlphabet,
        vocabulary: &'a Vocabulary,
        seed: u64,
    ) -> Self {
        debug_assert_eq!(params.validate(), Ok(()));
        let sampler = params.build_sampler(alphabet, vocabulary);
        Self {
            params,
            sampler,
            vocabulary,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn params(&self) -> &GeneticAlgorithmParams {
        &self.params
    }

    #[must_use]
    pub fn sampler(&self) -> &GeneSampler {
        &self.sampler
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs generations until a valid grid appears, the budget runs out, or the
    /// observer asks to stop.
    pub fn run<O>(&mut self, observer: &mut O) -> SearchOutcome
    where
        O: SearchObserver + ?Sized,
    {
        let block = self.sampler.alphabet().block();
        let evaluator = FitnessEvaluator::new(self.vocabulary, block, self.params.scoring);
        let validator = Validator::new(self.vocabulary, block);
        let evolver = PopulationEvolver::new(&self.params, &self.sampler);

        log::debug!(
            "initializing {} chromosomes of {} cells (seed {})",
            self.params.gene_pool_size,
            self.params.shape.cell_count(),
            self.seed
        );
        let mut population = Population::random(
            self.params.shape,
            self.params.gene_pool_size,
            &self.sampler,
            &mut self.rng,
        );

        let mut generation = 0;
        loop {
            let ranked = population.evaluate(&evaluator);

            if generation % self.params.report_interval == 0 {
                observer.on_progress(&progress(generation, &ranked));
            }

            let termination = if validator.crossword_valid(ranked.best().chromosome()) {
                Some(Termination::Solved)
            } else if generation + 1 >= self.params.max_generations {
                Some(Termination::Exhausted)
            } else if observer.should_stop(generation) {
                Some(Termination::Stopped)
            } else {
                None
            };
            if let Some(termination) = termination {
                let best = ranked.best();
                log::debug!(
                    "search {termination} at generation {generation} with fitness {}",
                    best.fitness()
                );
                return SearchOutcome {
                    best: best.chromosome().clone(),
                    best_fitness: best.fitness(),
                    generation,
                    termination,
                };
            }

            population = evolver.evolve(&ranked, &mut self.rng);
            generation += 1;
        }
    }

    /// Bundles a finished outcome with this search's seed and parameters.
    #[must_use]
    pub fn summarize(&self, outcome: &SearchOutcome) -> RunSummary {
        RunSummary {
            generation: outcome.generation,
            generations: outcome.generations(),
            termination: outcome.termination,
            solved: outcome.is_solved(),
            best_fitness: outcome.best_fitness,
            grid: outcome.best.rows().collect(),
            seed: self.seed,
            params: self.params.clone(),
        }
    }
}

fn progress(generation: usize, ranked: &RankedPopulation) -> GenerationProgress {
    GenerationProgress {
        generation,
        best_fitness: ranked.best().fitness(),
        average_fitness: ranked.average_fitness(),
        stats: ranked.compute_fitness_stats(),
    }
}
