//! # Simulated Annealing
//!
//! A generic, cooling-schedule driven local search.
//!
//! The engine knows nothing about any particular problem: it is handed an
//! implementation of [`AnnealingProblem`] (a cost function plus a neighbor
//! generator over an opaque state type) and an [`AnnealingSchedule`], and runs
//! the Metropolis acceptance loop to its fixed budget.
//!
//! ## Example
//!
//! ```rust
//! use metasolve::annealing::{Annealer, AnnealingProblem, AnnealingSchedule};
//! use metasolve::rng::RandomNumberGenerator;
//!
//! struct Parabola;
//!
//! impl AnnealingProblem for Parabola {
//!     type State = f64;
//!
//!     fn cost(&self, state: &f64) -> f64 {
//!         state * state
//!     }
//!
//!     fn neighbor(&self, state: &f64, rng: &mut RandomNumberGenerator) -> f64 {
//!         state + rng.uniform() - 0.5
//!     }
//! }
//!
//! let schedule = AnnealingSchedule::new(10.0, 0.95, 500).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let outcome = Annealer::new(schedule).run(&Parabola, 3.0, &mut rng).unwrap();
//! assert!(outcome.best_cost <= 9.0);
//! ```

pub mod engine;
pub mod schedule;

pub use engine::{Annealer, AnnealingOutcome, AnnealingProblem};
pub use schedule::AnnealingSchedule;
