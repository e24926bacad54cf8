//! Genetic search for filled crossword grids.
//!
//! This crate evolves populations of candidate grids (see `crossga-engine`)
//! until one of them is a valid crossword: every horizontal and vertical run of
//! letters is a vocabulary word.
//!
//! # How a Search Works
//!
//! 1. **Population** - `gene_pool_size` random grids, genes drawn by letter
//!    frequency in the vocabulary
//! 2. **Evaluation** - each grid is scored by the words in its rows and columns
//! 3. **Ranking** - grids are sorted best first
//! 4. **Termination** - the search ends when the best grid is valid, the
//!    generation budget is spent, or the observer asks to stop
//! 5. **Reproduction** - fresh random grids, unchanged elites, and children
//!    bred from selected parents form the next generation
//!
//! # Architecture
//!
//! ```text
//! GeneticAlgorithmParams ──┐
//!                          ▼
//! Search ── owns ──> Population ── evaluate ──> RankedPopulation
//!   │                     ▲                          │
//!   │                     └──── PopulationEvolver <──┘
//!   │                              │ uses
//!   │                              ├─ selection (roulette / quick)
//!   │                              └─ breeding (crossover + mutation)
//!   └── reports ──> SearchObserver
//! ```
//!
//! # Concurrency
//!
//! Evaluation and breeding run on the rayon thread pool. Each child is bred with
//! its own generator seeded from the search's generator, so a seeded search is
//! reproducible regardless of scheduling.
//!
//! # Current Limitations
//!
//! - **No convergence guarantee**: larger grids with sparse vocabularies may
//!   never produce a valid grid within the budget
//! - **No structural rules**: block placement follows no symmetry or
//!   connectivity rules; blocks are only discouraged through the adjacent-block
//!   fitness penalty

pub mod breeding;
pub mod params;
pub mod population;
pub mod search;
pub mod selection;
pub mod stats;
