//! # Problem Adapters
//!
//! One module per combinatorial problem. Each adapter owns its solution
//! representation, its evaluator (constraint penalties included), its move or
//! genetic operators, its instance-file format and its output format. The
//! engines see none of that, only the [`AnnealingProblem`](crate::annealing::AnnealingProblem)
//! or [`GeneticProblem`](crate::genetic::GeneticProblem) hooks.
//!
//! Every adapter also carries the calibration constants recommended for its
//! instances and a `solve_file` entry point the CLI drives.

pub mod assignment;
pub mod binpacking;
pub mod circuits;
pub mod knapsack;
pub mod queens;
pub mod tsp;

pub use assignment::AssignmentInstance;
pub use binpacking::BinPackingInstance;
pub use circuits::CircuitInstance;
pub use knapsack::KnapsackInstance;
pub use queens::QueensInstance;
pub use tsp::TspInstance;
