//! Binary knapsack, solved with the genetic engine.
//!
//! The genome is a bit-vector over the items; an overweight selection scores
//! zero, so the capacity constraint is enforced entirely by the evaluator.
//!
//! Instance format: capacity on the first line, item values on the second,
//! item weights on the third (tab-separated).

use std::path::Path;

use crate::error::{Result, ResultExt, SolverError};
use crate::genetic::{GeneticConfig, GeneticEngine, GeneticProblem};
use crate::report::{self, SolvedInstance};
use crate::rng::RandomNumberGenerator;

/// Calibration recommended for the bundled instances.
pub const POPULATION_SIZE: usize = 100;
pub const GENERATIONS: usize = 500;
pub const MUTATION_RATE: f64 = 0.01;
pub const TOURNAMENT_SIZE: usize = 5;

/// One knapsack instance: a capacity and the item value/weight tables.
#[derive(Debug, Clone)]
pub struct KnapsackInstance {
    pub capacity: i64,
    pub values: Vec<i64>,
    pub weights: Vec<i64>,
}

impl KnapsackInstance {
    pub fn new(capacity: i64, values: Vec<i64>, weights: Vec<i64>) -> Result<Self> {
        if values.is_empty() || values.len() != weights.len() {
            return Err(SolverError::Parse(format!(
                "item tables must be non-empty and of equal length, got {} values and {} weights",
                values.len(),
                weights.len()
            )));
        }
        Ok(Self {
            capacity,
            values,
            weights,
        })
    }

    /// Parses the three-line instance format.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let capacity = report::expect_line(lines, 0, "knapsack capacity")?
            .parse::<i64>()
            .context("knapsack capacity")?;
        let values = report::parse_ints(report::expect_line(lines, 1, "item values")?, "item values")?;
        let weights =
            report::parse_ints(report::expect_line(lines, 2, "item weights")?, "item weights")?;
        Self::new(capacity, values, weights)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&report::read_instance_lines(path)?)
    }

    pub fn item_count(&self) -> usize {
        self.values.len()
    }

    /// Total weight carried by a selection.
    pub fn total_weight(&self, genome: &[u8]) -> i64 {
        genome
            .iter()
            .zip(self.weights.iter())
            .map(|(&bit, &weight)| bit as i64 * weight)
            .sum()
    }

    /// Indices of the selected items.
    pub fn selected_items(genome: &[u8]) -> Vec<usize> {
        genome
            .iter()
            .enumerate()
            .filter(|(_, &bit)| bit == 1)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn recommended_config() -> Result<GeneticConfig> {
        GeneticConfig::new(POPULATION_SIZE, GENERATIONS, MUTATION_RATE, TOURNAMENT_SIZE)
    }

    /// Output body: selected item indices and the value achieved.
    pub fn format_solution(genome: &[u8], value: i64) -> String {
        let items: Vec<String> = Self::selected_items(genome)
            .into_iter()
            .map(|index| index.to_string())
            .collect();
        format!(
            "Itens selecionados: {}\nValor total: {}\n",
            items.join(", "),
            value
        )
    }
}

impl GeneticProblem for KnapsackInstance {
    type Genome = Vec<u8>;

    fn genome_len(&self) -> usize {
        self.item_count()
    }

    fn random_genome(&self, rng: &mut RandomNumberGenerator) -> Vec<u8> {
        (0..self.item_count()).map(|_| rng.index(2) as u8).collect()
    }

    /// Total value of the selection, zero when the capacity is exceeded.
    fn fitness(&self, genome: &Vec<u8>) -> f64 {
        if self.total_weight(genome) > self.capacity {
            return 0.0;
        }
        genome
            .iter()
            .zip(self.values.iter())
            .map(|(&bit, &value)| bit as i64 * value)
            .sum::<i64>() as f64
    }

    fn crossover(&self, a: &Vec<u8>, b: &Vec<u8>, cut: usize) -> (Vec<u8>, Vec<u8>) {
        let first = [&a[..cut], &b[cut..]].concat();
        let second = [&b[..cut], &a[cut..]].concat();
        (first, second)
    }

    fn mutate_gene(&self, genome: &mut Vec<u8>, position: usize, _rng: &mut RandomNumberGenerator) {
        genome[position] ^= 1;
    }

    fn validate(&self, genome: &Vec<u8>) -> Result<()> {
        if genome.len() != self.item_count() {
            return Err(SolverError::InvalidCandidate(format!(
                "genome has {} bits for {} items",
                genome.len(),
                self.item_count()
            )));
        }
        if let Some(&bit) = genome.iter().find(|&&bit| bit > 1) {
            return Err(SolverError::InvalidCandidate(format!(
                "genome contains non-binary gene {bit}"
            )));
        }
        Ok(())
    }
}

/// Solves one instance file with the recommended calibration.
pub fn solve_file(path: &Path, rng: &mut RandomNumberGenerator) -> Result<SolvedInstance> {
    let instance = KnapsackInstance::load(path)?;
    let engine = GeneticEngine::new(KnapsackInstance::recommended_config()?);
    let outcome = engine.run(&instance, rng)?;

    let value = outcome.best_fitness as i64;
    let id = report::instance_id(path);
    Ok(SolvedInstance {
        file_name: report::output_name(1, "mochila", &id, value),
        body: KnapsackInstance::format_solution(&outcome.best, value),
        summary: format!(
            "mochila{id}: valor {value}, peso {}/{}",
            instance.total_weight(&outcome.best),
            instance.capacity
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> KnapsackInstance {
        KnapsackInstance::new(5, vec![3, 4, 5], vec![2, 3, 4]).unwrap()
    }

    #[test]
    fn test_parse_instance() {
        let lines = vec![
            "5".to_string(),
            "3\t4\t5".to_string(),
            "2\t3\t4".to_string(),
        ];
        let instance = KnapsackInstance::parse(&lines).unwrap();
        assert_eq!(instance.capacity, 5);
        assert_eq!(instance.values, vec![3, 4, 5]);
        assert_eq!(instance.weights, vec![2, 3, 4]);
    }

    #[test]
    fn test_parse_rejects_mismatched_tables() {
        let lines = vec!["5".to_string(), "3\t4".to_string(), "2".to_string()];
        assert!(KnapsackInstance::parse(&lines).is_err());
    }

    #[test]
    fn test_fitness_zero_when_overweight() {
        let instance = toy();
        assert_eq!(instance.fitness(&vec![1, 1, 1]), 0.0);
        assert_eq!(instance.fitness(&vec![1, 1, 0]), 7.0);
        assert_eq!(instance.fitness(&vec![0, 0, 1]), 5.0);
    }

    #[test]
    fn test_crossover_splices_at_cut() {
        let instance = toy();
        let (a, b) = instance.crossover(&vec![1, 1, 1], &vec![0, 0, 0], 1);
        assert_eq!(a, vec![1, 0, 0]);
        assert_eq!(b, vec![0, 1, 1]);
    }

    #[test]
    fn test_toy_instance_converges_to_seven() {
        // Items (2,3) and (3,4) fill the capacity exactly for value 7.
        let instance = toy();
        let config = GeneticConfig::new(20, 50, 0.01, 3).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let outcome = GeneticEngine::new(config).run(&instance, &mut rng).unwrap();
        assert_eq!(outcome.best_fitness, 7.0);
        assert_eq!(outcome.best, vec![1, 1, 0]);
    }

    #[test]
    fn test_format_solution() {
        let body = KnapsackInstance::format_solution(&[1, 1, 0], 7);
        assert_eq!(body, "Itens selecionados: 0, 1\nValor total: 7\n");
    }

    #[test]
    fn test_operators_preserve_encoding() {
        let instance = toy();
        let mut rng = RandomNumberGenerator::from_seed(7);
        let mut genome = instance.random_genome(&mut rng);
        for trial in 0..10_000 {
            let position = trial % instance.genome_len();
            instance.mutate_gene(&mut genome, position, &mut rng);
            instance.validate(&genome).unwrap();
        }
    }
}
