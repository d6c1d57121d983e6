//! # metasolve
//!
//! Metaheuristic solvers for classic combinatorial optimization problems.
//!
//! The crate is built around two generic engines, [`annealing`] (simulated
//! annealing) and [`genetic`] (a genetic algorithm), that know nothing about
//! any concrete problem. Each engine is driven through a small trait an
//! adapter implements: the adapter owns the solution representation, the
//! evaluator with its constraint penalties, and the move or genetic
//! operators, while the engine owns the search loop.
//!
//! The [`problems`] module ships six such adapters (knapsack, TSP routing,
//! generalized assignment, bin packing, circuit connections, n-queens)
//! together with their instance-file formats and calibration constants.
//!
//! All randomness flows through an injected, seedable
//! [`rng::RandomNumberGenerator`], so any run can be reproduced exactly.

pub mod annealing;
pub mod error;
pub mod genetic;
pub mod history;
pub mod problems;
pub mod report;
pub mod rng;

// Re-export commonly used types for convenience
pub use annealing::{Annealer, AnnealingOutcome, AnnealingProblem, AnnealingSchedule};
pub use error::{Result, SolverError};
pub use genetic::{GeneticConfig, GeneticEngine, GeneticOutcome, GeneticProblem};
pub use history::{History, HistoryPoint};
pub use rng::RandomNumberGenerator;
