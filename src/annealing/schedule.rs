//! Cooling schedule configuration for the annealing engine.

use crate::error::{Result, SolverError};

/// Geometric cooling schedule plus the run budget.
///
/// Temperature starts at `initial_temperature` and is multiplied by
/// `cooling_rate` after every iteration, so it stays strictly positive for the
/// whole run; the iteration cap terminates the search before the temperature
/// could decay to zero asymptotically.
///
/// Two optional extra stop conditions can be layered on top of the iteration
/// cap: a temperature floor ([`with_min_temperature`](Self::with_min_temperature))
/// and a target cost ([`with_target_cost`](Self::with_target_cost)). Both
/// default to off, leaving the budget purely iteration-bound.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct AnnealingSchedule {
    initial_temperature: f64,
    cooling_rate: f64,
    iterations: usize,
    min_temperature: f64,
    target_cost: Option<f64>,
}

impl AnnealingSchedule {
    /// Creates a schedule with the given initial temperature, cooling rate
    /// and iteration budget.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] if:
    /// - `initial_temperature` is not a positive finite number
    /// - `cooling_rate` is outside the open interval (0, 1)
    ///
    /// An `iterations` budget of 0 is accepted: the run then returns its
    /// initial state untouched.
    pub fn new(initial_temperature: f64, cooling_rate: f64, iterations: usize) -> Result<Self> {
        if !initial_temperature.is_finite() || initial_temperature <= 0.0 {
            return Err(SolverError::Configuration(format!(
                "initial temperature must be positive, got {initial_temperature}"
            )));
        }
        if !cooling_rate.is_finite() || cooling_rate <= 0.0 || cooling_rate >= 1.0 {
            return Err(SolverError::Configuration(format!(
                "cooling rate must lie strictly between 0 and 1, got {cooling_rate}"
            )));
        }
        Ok(Self {
            initial_temperature,
            cooling_rate,
            iterations,
            min_temperature: 0.0,
            target_cost: None,
        })
    }

    /// Adds a temperature floor: the run stops once the temperature has
    /// decayed to `min_temperature`, even with budget left.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] if the floor is negative, not
    /// finite, or not below the initial temperature.
    pub fn with_min_temperature(mut self, min_temperature: f64) -> Result<Self> {
        if !min_temperature.is_finite() || min_temperature < 0.0 {
            return Err(SolverError::Configuration(format!(
                "minimum temperature must be non-negative, got {min_temperature}"
            )));
        }
        if min_temperature >= self.initial_temperature {
            return Err(SolverError::Configuration(format!(
                "minimum temperature {} must be below the initial temperature {}",
                min_temperature, self.initial_temperature
            )));
        }
        self.min_temperature = min_temperature;
        Ok(self)
    }

    /// Adds a target cost: the run stops as soon as the best cost reaches the
    /// target or better. Useful when the optimum is known, e.g. zero conflicts
    /// on a constraint-satisfaction board.
    pub fn with_target_cost(mut self, target_cost: f64) -> Self {
        self.target_cost = Some(target_cost);
        self
    }

    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn min_temperature(&self) -> f64 {
        self.min_temperature
    }

    pub fn target_cost(&self) -> Option<f64> {
        self.target_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_schedule() {
        let schedule = AnnealingSchedule::new(100.0, 0.95, 1000).unwrap();
        assert_eq!(schedule.initial_temperature(), 100.0);
        assert_eq!(schedule.cooling_rate(), 0.95);
        assert_eq!(schedule.iterations(), 1000);
        assert_eq!(schedule.min_temperature(), 0.0);
        assert!(schedule.target_cost().is_none());
    }

    #[test]
    fn test_rejects_non_positive_temperature() {
        assert!(AnnealingSchedule::new(0.0, 0.9, 10).is_err());
        assert!(AnnealingSchedule::new(-5.0, 0.9, 10).is_err());
        assert!(AnnealingSchedule::new(f64::NAN, 0.9, 10).is_err());
    }

    #[test]
    fn test_rejects_cooling_rate_outside_open_interval() {
        assert!(AnnealingSchedule::new(10.0, 0.0, 10).is_err());
        assert!(AnnealingSchedule::new(10.0, 1.0, 10).is_err());
        assert!(AnnealingSchedule::new(10.0, 1.5, 10).is_err());
        assert!(AnnealingSchedule::new(10.0, -0.1, 10).is_err());
    }

    #[test]
    fn test_zero_iterations_accepted() {
        assert!(AnnealingSchedule::new(10.0, 0.9, 0).is_ok());
    }

    #[test]
    fn test_min_temperature_must_be_below_initial() {
        let schedule = AnnealingSchedule::new(10.0, 0.9, 10).unwrap();
        assert!(schedule.clone().with_min_temperature(10.0).is_err());
        assert!(schedule.clone().with_min_temperature(-1.0).is_err());
        let floored = schedule.with_min_temperature(0.01).unwrap();
        assert_eq!(floored.min_temperature(), 0.01);
    }
}
