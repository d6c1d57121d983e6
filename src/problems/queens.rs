//! N-queens placement, solved with the annealing engine.
//!
//! One queen per column; the state stores each queen's row. The cost is the
//! number of attacking pairs, so zero means a solved board and the schedule
//! carries a matching target cost to stop as soon as one is found.
//!
//! Instance format: board size on the first line, piece sizes on the second
//! (carried through to the report, not used by the search).

use std::path::Path;

use crate::annealing::{Annealer, AnnealingProblem, AnnealingSchedule};
use crate::error::{Result, ResultExt, SolverError};
use crate::report::{self, SolvedInstance};
use crate::rng::RandomNumberGenerator;

/// Calibration recommended for the bundled instances.
pub const INITIAL_TEMPERATURE: f64 = 100.0;
pub const MIN_TEMPERATURE: f64 = 0.01;
pub const COOLING_RATE: f64 = 0.995;
pub const MAX_ITERATIONS: usize = 10_000;

/// One board instance.
#[derive(Debug, Clone)]
pub struct QueensInstance {
    pub n: usize,
    pub piece_sizes: Vec<i64>,
}

impl QueensInstance {
    pub fn new(n: usize, piece_sizes: Vec<i64>) -> Result<Self> {
        if n == 0 {
            return Err(SolverError::Parse("board size must be positive".to_string()));
        }
        Ok(Self { n, piece_sizes })
    }

    /// Parses the size-plus-pieces instance format.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let n = report::expect_line(lines, 0, "board size")?
            .parse::<usize>()
            .context("board size")?;
        let piece_sizes = match lines.get(1) {
            Some(line) => report::parse_ints(line, "piece sizes")?,
            None => Vec::new(),
        };
        Self::new(n, piece_sizes)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&report::read_instance_lines(path)?)
    }

    /// A random row for every column.
    pub fn random_board(&self, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        (0..self.n).map(|_| rng.index(self.n)).collect()
    }

    /// Number of queen pairs attacking each other along rows or diagonals.
    pub fn conflicts(&self, rows: &[usize]) -> usize {
        let mut conflicts = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let same_row = rows[i] == rows[j];
                let same_diagonal = rows[i].abs_diff(rows[j]) == j - i;
                if same_row || same_diagonal {
                    conflicts += 1;
                }
            }
        }
        conflicts
    }

    pub fn recommended_schedule() -> Result<AnnealingSchedule> {
        Ok(AnnealingSchedule::new(INITIAL_TEMPERATURE, COOLING_RATE, MAX_ITERATIONS)?
            .with_min_temperature(MIN_TEMPERATURE)?
            .with_target_cost(0.0))
    }

    /// Output body: queen positions and an ASCII board.
    pub fn format_solution(&self, rows: &[usize]) -> String {
        let mut body = format!("Solução para {}-Rainhas:\n\n", self.n);
        body.push_str("Posições (coluna, linha):\n");
        for (column, &row) in rows.iter().enumerate() {
            body.push_str(&format!("  Rainha {column}: ({column}, {row})\n"));
        }
        body.push_str(&format!("\nTabuleiro {}x{}:\n", self.n, self.n));
        for row in 0..self.n {
            for column in 0..self.n {
                body.push_str(if rows[column] == row { "♛ " } else { ". " });
            }
            body.push('\n');
        }
        body
    }
}

impl AnnealingProblem for QueensInstance {
    type State = Vec<usize>;

    fn cost(&self, rows: &Vec<usize>) -> f64 {
        self.conflicts(rows) as f64
    }

    /// Moves the queen of one random column to one random row.
    fn neighbor(&self, rows: &Vec<usize>, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let mut next = rows.clone();
        let column = rng.index(self.n);
        next[column] = rng.index(self.n);
        next
    }

    fn validate(&self, rows: &Vec<usize>) -> Result<()> {
        if rows.len() != self.n {
            return Err(SolverError::InvalidCandidate(format!(
                "board has {} columns, expected {}",
                rows.len(),
                self.n
            )));
        }
        if let Some(&row) = rows.iter().find(|&&row| row >= self.n) {
            return Err(SolverError::InvalidCandidate(format!(
                "queen placed on row {row} of a {}-row board",
                self.n
            )));
        }
        Ok(())
    }
}

/// Solves one instance file with the recommended calibration.
pub fn solve_file(path: &Path, rng: &mut RandomNumberGenerator) -> Result<SolvedInstance> {
    let instance = QueensInstance::load(path)?;
    let annealer = Annealer::new(QueensInstance::recommended_schedule()?);
    let initial = instance.random_board(rng);
    let outcome = annealer.run(&instance, initial, rng)?;

    let conflicts = outcome.best_cost as usize;
    let id = report::instance_id(path);
    Ok(SolvedInstance {
        file_name: report::output_name(6, "rainhas", &id, conflicts),
        body: instance.format_solution(&outcome.best),
        summary: format!(
            "rainhas{id}: {conflicts} conflitos apos {} iteracoes",
            outcome.iterations_run
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instance() {
        let lines: Vec<String> = ["8", "1\t1\t1\t1\t1\t1\t1\t1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let instance = QueensInstance::parse(&lines).unwrap();
        assert_eq!(instance.n, 8);
        assert_eq!(instance.piece_sizes.len(), 8);
    }

    #[test]
    fn test_conflicts_counts_rows_and_diagonals() {
        let instance = QueensInstance::new(4, Vec::new()).unwrap();
        // All queens on one row: every pair attacks.
        assert_eq!(instance.conflicts(&[0, 0, 0, 0]), 6);
        // Main diagonal: every pair attacks.
        assert_eq!(instance.conflicts(&[0, 1, 2, 3]), 6);
        // A known 4-queens solution.
        assert_eq!(instance.conflicts(&[1, 3, 0, 2]), 0);
    }

    #[test]
    fn test_neighbor_preserves_encoding() {
        let instance = QueensInstance::new(8, Vec::new()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(31);
        let mut rows = instance.random_board(&mut rng);
        for _ in 0..10_000 {
            rows = instance.neighbor(&rows, &mut rng);
            instance.validate(&rows).unwrap();
        }
    }

    #[test]
    fn test_annealing_solves_eight_queens() {
        let instance = QueensInstance::new(8, Vec::new()).unwrap();
        // A generous budget: sideways moves keep the walk alive on plateaus
        // and the target cost stops the run at the first solved board.
        let schedule = AnnealingSchedule::new(100.0, 0.9995, 200_000)
            .unwrap()
            .with_target_cost(0.0);
        let annealer = Annealer::new(schedule);
        let mut rng = RandomNumberGenerator::from_seed(42);
        let initial = instance.random_board(&mut rng);
        let outcome = annealer.run(&instance, initial, &mut rng).unwrap();
        assert_eq!(outcome.best_cost, 0.0);
        assert_eq!(instance.conflicts(&outcome.best), 0);
    }

    #[test]
    fn test_format_draws_the_board() {
        let instance = QueensInstance::new(2, Vec::new()).unwrap();
        let body = instance.format_solution(&[0, 1]);
        assert!(body.contains("Rainha 0: (0, 0)"));
        assert!(body.contains("Rainha 1: (1, 1)"));
        assert!(body.contains("♛ . \n. ♛ \n"));
    }
}
