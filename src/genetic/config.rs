//! Run configuration for the genetic engine.

use crate::error::{Result, SolverError};

/// Population and operator parameters for one evolutionary run.
///
/// All four values are caller-supplied; the engine bakes in no defaults. The
/// per-problem calibration constants live with the adapters that recommend
/// them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct GeneticConfig {
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
    tournament_size: usize,
}

impl GeneticConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Configuration`] if:
    /// - `population_size` is below 2
    /// - `mutation_rate` is outside [0, 1]
    /// - `tournament_size` is 0 or exceeds `population_size`
    ///
    /// A `generations` budget of 0 is accepted: the run then returns the best
    /// individual of the initial random population without ever invoking
    /// crossover or mutation.
    pub fn new(
        population_size: usize,
        generations: usize,
        mutation_rate: f64,
        tournament_size: usize,
    ) -> Result<Self> {
        if population_size < 2 {
            return Err(SolverError::Configuration(format!(
                "population size must be at least 2, got {population_size}"
            )));
        }
        if !mutation_rate.is_finite() || !(0.0..=1.0).contains(&mutation_rate) {
            return Err(SolverError::Configuration(format!(
                "mutation rate must lie within [0, 1], got {mutation_rate}"
            )));
        }
        if tournament_size == 0 {
            return Err(SolverError::Configuration(
                "tournament size must be at least 1".to_string(),
            ));
        }
        if tournament_size > population_size {
            return Err(SolverError::Configuration(format!(
                "tournament size {tournament_size} exceeds population size {population_size}"
            )));
        }
        Ok(Self {
            population_size,
            generations,
            mutation_rate,
            tournament_size,
        })
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = GeneticConfig::new(100, 500, 0.01, 5).unwrap();
        assert_eq!(config.population_size(), 100);
        assert_eq!(config.generations(), 500);
        assert_eq!(config.mutation_rate(), 0.01);
        assert_eq!(config.tournament_size(), 5);
    }

    #[test]
    fn test_rejects_tiny_population() {
        assert!(GeneticConfig::new(0, 10, 0.1, 1).is_err());
        assert!(GeneticConfig::new(1, 10, 0.1, 1).is_err());
    }

    #[test]
    fn test_rejects_bad_mutation_rate() {
        assert!(GeneticConfig::new(10, 10, -0.1, 2).is_err());
        assert!(GeneticConfig::new(10, 10, 1.1, 2).is_err());
        assert!(GeneticConfig::new(10, 10, f64::NAN, 2).is_err());
    }

    #[test]
    fn test_rejects_bad_tournament_size() {
        assert!(GeneticConfig::new(10, 10, 0.1, 0).is_err());
        assert!(GeneticConfig::new(10, 10, 0.1, 11).is_err());
        // Tournament size equal to the population is aggressive but legal.
        assert!(GeneticConfig::new(10, 10, 0.1, 10).is_ok());
    }

    #[test]
    fn test_zero_generations_accepted() {
        assert!(GeneticConfig::new(10, 0, 0.1, 2).is_ok());
    }

    #[test]
    fn test_boundary_mutation_rates_accepted() {
        assert!(GeneticConfig::new(10, 10, 0.0, 2).is_ok());
        assert!(GeneticConfig::new(10, 10, 1.0, 2).is_ok());
    }
}
