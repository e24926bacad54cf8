//! Parent selection.
//!
//! Both policies take a population ranked by fitness (best first).
//!
//! - [`SelectionPolicy::Roulette`]: chance of being picked is proportional to an
//!   individual's share of the total fitness. Falls back to a uniform pick when
//!   the total is zero.
//! - [`SelectionPolicy::Quick`]: picks rank `floor(x * n)` with `x ~ Exp(8)`,
//!   clamped to the last rank. It ignores fitness magnitudes entirely and puts
//!   roughly 70% of picks in the top 15% of ranks, which is much stronger
//!   pressure than the roulette wheel on a flat fitness landscape.

use rand::Rng;
use rand_distr::{Distribution as _, Exp};
use serde::{Deserialize, Serialize};

use crate::population::Individual;

/// Rate of the exponential distribution used by [`SelectionPolicy::Quick`].
pub const QUICK_SELECTION_RATE: f64 = 8.0;

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Fitness-proportional roulette wheel.
    #[default]
    Roulette,
    /// Exponentially distributed rank.
    Quick,
}

/// Picks parents from a ranked population according to a [`SelectionPolicy`].
///
/// Built once and shared by every pick, including picks on other threads.
#[derive(Debug, Clone)]
pub struct Selector {
    policy: SelectionPolicy,
    quick: Exp<f64>,
}

impl Selector {
    #[must_use]
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            quick: Exp::new(QUICK_SELECTION_RATE).unwrap(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Picks one individual from `ranked`.
    ///
    /// `fitness_sum` must be the sum of every individual's fitness.
    ///
    /// # Panics
    ///
    /// Panics if `ranked` is empty.
    pub fn select<'a, R>(
        &self,
        ranked: &'a [Individual],
        fitness_sum: f64,
        rng: &mut R,
    ) -> &'a Individual
    where
        R: Rng + ?Sized,
    {
        assert!(!ranked.is_empty(), "cannot select from an empty population");
        match self.policy {
            SelectionPolicy::Roulette => roulette_select(ranked, fitness_sum, rng),
            SelectionPolicy::Quick => quick_select(ranked, &self.quick, rng),
        }
    }
}

fn roulette_select<'a, R>(ranked: &'a [Individual], fitness_sum: f64, rng: &mut R) -> &'a Individual
where
    R: Rng + ?Sized,
{
    if fitness_sum <= 0.0 || !fitness_sum.is_finite() {
        return &ranked[rng.random_range(0..ranked.len())];
    }
    let draw = rng.random_range(0.0..=fitness_sum);
    roulette_pick(ranked, draw)
}

/// Returns the first individual whose accumulated fitness exceeds `draw`.
///
/// A draw at the total lands on the last individual with positive fitness.
fn roulette_pick(ranked: &[Individual], draw: f64) -> &Individual {
    let mut accumulated = 0.0;
    for ind in ranked {
        accumulated += ind.fitness();
        if accumulated > draw {
            return ind;
        }
    }
    ranked
        .iter()
        .rev()
        .find(|ind| ind.fitness() > 0.0)
        .unwrap_or(&ranked[ranked.len() - 1])
}

fn quick_select<'a, R>(ranked: &'a [Individual], exp: &Exp<f64>, rng: &mut R) -> &'a Individual
where
    R: Rng + ?Sized,
{
    let x: f64 = exp.sample(rng);
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let idx = (x * ranked.len() as f64) as usize;
    &ranked[idx.min(ranked.len() - 1)]
}

#[cfg(test)]
mod tests {
    use crossga_engine::{Chromosome, GridShape};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn individual(gene: char, fitness: f64) -> Individual {
        Individual::new(Chromosome::from_genes(GridShape::new(1, 1), vec![gene]), fitness)
    }

    fn ranked(fitness: &[f64]) -> Vec<Individual> {
        fitness
            .iter()
            .zip('a'..)
            .map(|(&f, gene)| individual(gene, f))
            .collect()
    }

    #[test]
    fn test_roulette_never_picks_zero_fitness() {
        let population = ranked(&[5.0, 3.0, 0.0, 0.0]);
        let roulette = Selector::new(SelectionPolicy::Roulette);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let picked = roulette.select(&population, 8.0, &mut rng);
            assert!(picked.fitness() > 0.0);
        }
    }

    #[test]
    fn test_roulette_is_proportional() {
        let population = ranked(&[3.0, 1.0]);
        let roulette = Selector::new(SelectionPolicy::Roulette);
        let mut rng = Pcg32::seed_from_u64(5);
        let trials = 4000;
        let first = (0..trials)
            .filter(|_| roulette.select(&population, 4.0, &mut rng).fitness() == 3.0)
            .count();
        // expected 3000
        assert!((2700..3300).contains(&first), "first picked {first} times");
    }

    #[test]
    fn test_roulette_draw_at_total_skips_zero_fitness_tail() {
        let population = ranked(&[5.0, 3.0, 0.0, 0.0]);
        let picked = roulette_pick(&population, 8.0);
        assert!(std::ptr::eq(picked, &population[1]));
        // just below the total still lands inside the last positive share
        let picked = roulette_pick(&population, 7.999);
        assert!(std::ptr::eq(picked, &population[1]));
        assert!(std::ptr::eq(roulette_pick(&population, 0.0), &population[0]));
    }

    #[test]
    fn test_roulette_zero_sum_falls_back_to_uniform() {
        let population = ranked(&[0.0, 0.0, 0.0]);
        let roulette = Selector::new(SelectionPolicy::Roulette);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let picked = roulette.select(&population, 0.0, &mut rng);
            let idx = population
                .iter()
                .position(|ind| std::ptr::eq(ind, picked))
                .unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_quick_favours_top_ranks() {
        let population = ranked(&[0.0; 100]);
        let quick = Selector::new(SelectionPolicy::Quick);
        let mut rng = Pcg32::seed_from_u64(21);
        let trials = 2000;
        let top = (0..trials)
            .filter(|_| {
                let picked = quick.select(&population, 0.0, &mut rng);
                let idx = population
                    .iter()
                    .position(|ind| std::ptr::eq(ind, picked))
                    .unwrap();
                idx < 15
            })
            .count();
        // P(x < 0.15) = 1 - e^-1.2 ~= 0.70
        assert!(top > 1200, "top ranks picked {top} times");
    }

    #[test]
    fn test_single_individual() {
        let population = ranked(&[0.0]);
        let mut rng = Pcg32::seed_from_u64(0);
        for policy in [SelectionPolicy::Roulette, SelectionPolicy::Quick] {
            let picked = Selector::new(policy).select(&population, 0.0, &mut rng);
            assert!(std::ptr::eq(picked, &population[0]));
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "roulette".parse::<SelectionPolicy>().unwrap(),
            SelectionPolicy::Roulette
        );
        assert_eq!(
            "Quick".parse::<SelectionPolicy>().unwrap(),
            SelectionPolicy::Quick
        );
        assert!("tournament".parse::<SelectionPolicy>().is_err());
    }
}
