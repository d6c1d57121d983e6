//! Traveling salesman routing, solved with the annealing engine.
//!
//! The state is a permutation of the cities; the neighbor move is a 2-opt
//! segment reversal, which keeps the permutation invariant by construction.
//!
//! Instance format: city count on the first line, then one distance-matrix
//! row per line.

use std::path::Path;

use crate::annealing::{Annealer, AnnealingProblem, AnnealingSchedule};
use crate::error::{Result, ResultExt, SolverError};
use crate::report::{self, SolvedInstance};
use crate::rng::RandomNumberGenerator;

/// Calibration recommended for the bundled instances.
pub const INITIAL_TEMPERATURE: f64 = 1_000.0;
pub const MIN_TEMPERATURE: f64 = 0.01;
pub const COOLING_RATE: f64 = 0.995;
pub const MAX_ITERATIONS: usize = 10_000;

/// One routing instance: a symmetric distance matrix over the cities.
#[derive(Debug, Clone)]
pub struct TspInstance {
    distances: Vec<Vec<i64>>,
}

impl TspInstance {
    pub fn new(distances: Vec<Vec<i64>>) -> Result<Self> {
        let n = distances.len();
        if n < 2 {
            return Err(SolverError::Parse(format!(
                "a route needs at least two cities, got {n}"
            )));
        }
        if let Some(row) = distances.iter().find(|row| row.len() != n) {
            return Err(SolverError::Parse(format!(
                "distance matrix must be {n}x{n}, found a row of {} entries",
                row.len()
            )));
        }
        Ok(Self { distances })
    }

    /// Parses the count-plus-matrix instance format.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let n = report::expect_line(lines, 0, "city count")?
            .parse::<usize>()
            .context("city count")?;
        let mut distances = Vec::with_capacity(n);
        for row in 0..n {
            let line = report::expect_line(lines, row + 1, "distance matrix row")?;
            distances.push(report::parse_ints(line, "distance matrix row")?);
        }
        Self::new(distances)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&report::read_instance_lines(path)?)
    }

    pub fn city_count(&self) -> usize {
        self.distances.len()
    }

    /// A uniformly random tour.
    pub fn random_tour(&self, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let mut tour: Vec<usize> = (0..self.city_count()).collect();
        rng.shuffle(&mut tour);
        tour
    }

    /// Cost of the closed route through `tour`.
    pub fn tour_cost(&self, tour: &[usize]) -> i64 {
        tour.iter()
            .enumerate()
            .map(|(index, &city)| {
                let next = tour[(index + 1) % tour.len()];
                self.distances[city][next]
            })
            .sum()
    }

    pub fn recommended_schedule() -> Result<AnnealingSchedule> {
        AnnealingSchedule::new(INITIAL_TEMPERATURE, COOLING_RATE, MAX_ITERATIONS)?
            .with_min_temperature(MIN_TEMPERATURE)
    }

    /// Output body: the closed route and its cost.
    pub fn format_solution(tour: &[usize], cost: i64) -> String {
        let mut stops: Vec<String> = tour.iter().map(|city| city.to_string()).collect();
        stops.push(tour[0].to_string());
        format!("Rota: {}\nCusto total: {}\n", stops.join(" -> "), cost)
    }
}

impl AnnealingProblem for TspInstance {
    type State = Vec<usize>;

    fn cost(&self, tour: &Vec<usize>) -> f64 {
        self.tour_cost(tour) as f64
    }

    /// 2-opt move: reverse the segment between two random positions.
    fn neighbor(&self, tour: &Vec<usize>, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let n = tour.len();
        let mut i = rng.index(n);
        let mut j = rng.index(n - 1);
        if j >= i {
            j += 1;
        }
        if i > j {
            std::mem::swap(&mut i, &mut j);
        }
        let mut next = tour.clone();
        next[i..=j].reverse();
        next
    }

    fn validate(&self, tour: &Vec<usize>) -> Result<()> {
        let n = self.city_count();
        if tour.len() != n {
            return Err(SolverError::InvalidCandidate(format!(
                "tour visits {} cities out of {n}",
                tour.len()
            )));
        }
        let mut seen = vec![false; n];
        for &city in tour {
            if city >= n || seen[city] {
                return Err(SolverError::InvalidCandidate(format!(
                    "tour is not a permutation: city {city} out of range or repeated"
                )));
            }
            seen[city] = true;
        }
        Ok(())
    }
}

/// Solves one instance file with the recommended calibration.
pub fn solve_file(path: &Path, rng: &mut RandomNumberGenerator) -> Result<SolvedInstance> {
    let instance = TspInstance::load(path)?;
    let annealer = Annealer::new(TspInstance::recommended_schedule()?);
    let initial = instance.random_tour(rng);
    let outcome = annealer.run(&instance, initial, rng)?;

    let cost = outcome.best_cost as i64;
    let id = report::instance_id(path);
    Ok(SolvedInstance {
        file_name: report::output_name(2, "tsp", &id, cost),
        body: TspInstance::format_solution(&outcome.best, cost),
        summary: format!(
            "tsp{id}: custo {cost} apos {} iteracoes",
            outcome.iterations_run
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> TspInstance {
        // Unit square: corners (0,0), (0,1), (1,1), (1,0) with rounded
        // diagonal distances; optimal perimeter tour costs 4.
        TspInstance::new(vec![
            vec![0, 1, 2, 1],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![1, 2, 1, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_instance() {
        let lines = vec![
            "3".to_string(),
            "0 2 9".to_string(),
            "2 0 6".to_string(),
            "9 6 0".to_string(),
        ];
        let instance = TspInstance::parse(&lines).unwrap();
        assert_eq!(instance.city_count(), 3);
        assert_eq!(instance.tour_cost(&[0, 1, 2]), 17);
    }

    #[test]
    fn test_parse_rejects_ragged_matrix() {
        let lines = vec!["2".to_string(), "0 1".to_string(), "1".to_string()];
        assert!(TspInstance::parse(&lines).is_err());
    }

    #[test]
    fn test_tour_cost_closes_the_loop() {
        let instance = square();
        assert_eq!(instance.tour_cost(&[0, 1, 2, 3]), 4);
        assert_eq!(instance.tour_cost(&[0, 2, 1, 3]), 6);
    }

    #[test]
    fn test_neighbor_preserves_permutation() {
        let instance = square();
        let mut rng = RandomNumberGenerator::from_seed(13);
        let mut tour = instance.random_tour(&mut rng);
        for _ in 0..10_000 {
            tour = instance.neighbor(&tour, &mut rng);
            instance.validate(&tour).unwrap();
        }
    }

    #[test]
    fn test_unit_square_converges_to_perimeter() {
        let instance = square();
        let schedule = AnnealingSchedule::new(100.0, 0.9, 200).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);
        let initial = instance.random_tour(&mut rng);
        let outcome = Annealer::new(schedule)
            .run(&instance, initial, &mut rng)
            .unwrap();
        assert_eq!(outcome.best_cost, 4.0);
    }

    #[test]
    fn test_format_solution_returns_to_start() {
        let body = TspInstance::format_solution(&[2, 0, 1], 17);
        assert_eq!(body, "Rota: 2 -> 0 -> 1 -> 2\nCusto total: 17\n");
    }
}
