//! Metropolis acceptance loop.

use std::fmt::Debug;

use tracing::debug;

use crate::error::Result;
use crate::history::{History, HistoryPoint};
use crate::rng::RandomNumberGenerator;

use super::AnnealingSchedule;

/// How often the engine emits a progress event.
const PROGRESS_INTERVAL: usize = 1_000;

/// Problem hooks the annealing engine drives.
///
/// An implementor owns the state representation and everything semantic about
/// it: the cost function (including any constraint penalties) and the
/// neighborhood move. The engine only ever clones states and compares costs.
///
/// Both hooks must be deterministic functions of their inputs (plus the
/// injected RNG), and a neighbor must be syntactically valid for its encoding:
/// a permutation stays a permutation, an assignment stays in range. The engine
/// does not check this per candidate; [`validate`](Self::validate) exists so
/// tests can opt in via [`Annealer::with_candidate_validation`].
pub trait AnnealingProblem {
    type State: Clone + Debug;

    /// Scalar cost of a state. Lower is better.
    fn cost(&self, state: &Self::State) -> f64;

    /// Produces one perturbation of `state`.
    fn neighbor(&self, state: &Self::State, rng: &mut RandomNumberGenerator) -> Self::State;

    /// Structural check for a candidate, used only when candidate validation
    /// is switched on.
    fn validate(&self, _state: &Self::State) -> Result<()> {
        Ok(())
    }
}

/// Result of an annealing run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct AnnealingOutcome<S> {
    /// Lowest-cost state observed at any point during the run. Not
    /// necessarily the final current state, which may have drifted uphill.
    pub best: S,
    /// Cost of `best`.
    pub best_cost: f64,
    /// Best cost so far, one point per executed iteration plus the initial
    /// state at step 0.
    pub history: History,
    /// Iterations actually executed; below the budget when a stop condition
    /// fired early.
    pub iterations_run: usize,
    /// Moves accepted by the Metropolis criterion, improvements included.
    pub accepted_moves: usize,
    /// Accepted moves that strictly improved on the current cost.
    pub improving_moves: usize,
    /// Temperature when the loop exited.
    pub final_temperature: f64,
}

/// Simulated annealing engine.
///
/// Owns nothing between runs: each call to [`run`](Self::run) is a pure
/// function of the schedule, the problem, the initial state and the RNG
/// stream. Runs with the same seed are identical.
#[derive(Debug, Clone)]
pub struct Annealer {
    schedule: AnnealingSchedule,
    validate_candidates: bool,
}

impl Annealer {
    pub fn new(schedule: AnnealingSchedule) -> Self {
        Self {
            schedule,
            validate_candidates: false,
        }
    }

    /// Checks every generated candidate against
    /// [`AnnealingProblem::validate`]. Intended for tests; per-candidate
    /// validation is too expensive for production runs.
    pub fn with_candidate_validation(mut self) -> Self {
        self.validate_candidates = true;
        self
    }

    /// Runs the search from `initial` and returns the best state observed.
    ///
    /// Each iteration draws one neighbor of the current state and accepts it
    /// unconditionally when it is no worse, otherwise with the Metropolis
    /// probability `exp(-delta / temperature)` against a single uniform draw.
    /// The temperature is multiplied by the cooling rate after every
    /// iteration. When the temperature is small enough that the probability
    /// underflows to zero, the move is a plain reject.
    ///
    /// # Errors
    ///
    /// Only fails when candidate validation is enabled and the problem's
    /// `validate` hook rejects a generated neighbor.
    pub fn run<P: AnnealingProblem>(
        &self,
        problem: &P,
        initial: P::State,
        rng: &mut RandomNumberGenerator,
    ) -> Result<AnnealingOutcome<P::State>> {
        let mut current = initial;
        let mut current_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = self.schedule.initial_temperature();
        let mut history: History = vec![HistoryPoint::new(0, best_cost)];
        let mut iterations_run = 0;
        let mut accepted_moves = 0;
        let mut improving_moves = 0;

        for step in 1..=self.schedule.iterations() {
            if let Some(target) = self.schedule.target_cost() {
                if best_cost <= target {
                    debug!(step, best_cost, "target cost reached, stopping early");
                    break;
                }
            }
            if temperature <= self.schedule.min_temperature() && self.schedule.min_temperature() > 0.0 {
                debug!(step, temperature, "temperature floor reached, stopping early");
                break;
            }

            let candidate = problem.neighbor(&current, rng);
            if self.validate_candidates {
                problem.validate(&candidate)?;
            }
            let candidate_cost = problem.cost(&candidate);
            let delta = candidate_cost - current_cost;

            let accept = if delta <= 0.0 {
                true
            } else {
                let probability = (-delta / temperature).exp();
                rng.uniform() < probability
            };

            if accept {
                accepted_moves += 1;
                if delta < 0.0 {
                    improving_moves += 1;
                }
                current = candidate;
                current_cost = candidate_cost;
                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                }
            }

            temperature *= self.schedule.cooling_rate();
            iterations_run = step;
            history.push(HistoryPoint::new(step, best_cost));

            if step % PROGRESS_INTERVAL == 0 {
                debug!(step, temperature, best_cost, "annealing progress");
            }
        }

        Ok(AnnealingOutcome {
            best,
            best_cost,
            history,
            iterations_run,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
        })
    }
}
