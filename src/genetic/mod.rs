//! # Genetic Algorithm
//!
//! A generic population-based search.
//!
//! The engine owns the evolutionary loop (tournament selection, single-point
//! crossover over consecutive parent pairs, per-position mutation and elitist
//! carry-forward) while everything semantic about the encoding lives behind
//! the [`GeneticProblem`] trait an adapter implements.
//!
//! ## Example
//!
//! ```rust
//! use metasolve::genetic::{GeneticConfig, GeneticEngine, GeneticProblem};
//! use metasolve::rng::RandomNumberGenerator;
//!
//! /// Maximize the number of ones in a fixed-width bit-vector.
//! struct OneMax;
//!
//! impl GeneticProblem for OneMax {
//!     type Genome = Vec<u8>;
//!
//!     fn genome_len(&self) -> usize {
//!         16
//!     }
//!
//!     fn random_genome(&self, rng: &mut RandomNumberGenerator) -> Vec<u8> {
//!         (0..16).map(|_| rng.index(2) as u8).collect()
//!     }
//!
//!     fn fitness(&self, genome: &Vec<u8>) -> f64 {
//!         genome.iter().map(|&bit| bit as f64).sum()
//!     }
//!
//!     fn crossover(&self, a: &Vec<u8>, b: &Vec<u8>, cut: usize) -> (Vec<u8>, Vec<u8>) {
//!         let first = [&a[..cut], &b[cut..]].concat();
//!         let second = [&b[..cut], &a[cut..]].concat();
//!         (first, second)
//!     }
//!
//!     fn mutate_gene(&self, genome: &mut Vec<u8>, position: usize, _rng: &mut RandomNumberGenerator) {
//!         genome[position] ^= 1;
//!     }
//! }
//!
//! let config = GeneticConfig::new(30, 60, 0.02, 3).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let outcome = GeneticEngine::new(config).run(&OneMax, &mut rng).unwrap();
//! assert!(outcome.best_fitness >= 14.0);
//! ```

pub mod config;
pub mod engine;

pub use config::GeneticConfig;
pub use engine::{GeneticEngine, GeneticOutcome, GeneticProblem};
