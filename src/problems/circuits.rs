//! Circuit connection layout, solved with the annealing engine.
//!
//! The state is an undirected edge list over the component coordinates. The
//! evaluator charges the total Euclidean wire length plus a penalty per unit
//! of degree-constraint violation, so the search may pass through layouts
//! that leave a component under- or over-connected.
//!
//! Instance format: component count, connection count, minimum connections
//! per component, then the X and Y coordinate rows (decimal commas allowed).

use std::path::Path;

use crate::annealing::{Annealer, AnnealingProblem, AnnealingSchedule};
use crate::error::{Result, ResultExt, SolverError};
use crate::report::{self, SolvedInstance};
use crate::rng::RandomNumberGenerator;

/// Calibration recommended for the bundled instances.
pub const INITIAL_TEMPERATURE: f64 = 300.0;
pub const MIN_TEMPERATURE: f64 = 0.1;
pub const COOLING_RATE: f64 = 0.98;
pub const MAX_ITERATIONS: usize = 5_000;

/// Cost added per missing or surplus connection at a component.
pub const DEGREE_PENALTY: f64 = 100.0;

/// Attempts per edge when drawing or repairing a layout.
const PLACEMENT_ATTEMPTS: usize = 100;

/// A connection between two components, stored with the smaller index first.
pub type Connection = (usize, usize);

/// One layout instance: component coordinates and degree constraints.
#[derive(Debug, Clone)]
pub struct CircuitInstance {
    pub components: usize,
    pub connections: usize,
    pub min_degree: Vec<usize>,
    pub max_degree: Vec<usize>,
    pub positions: Vec<(f64, f64)>,
}

impl CircuitInstance {
    pub fn new(
        connections: usize,
        min_degree: Vec<usize>,
        max_degree: Vec<usize>,
        positions: Vec<(f64, f64)>,
    ) -> Result<Self> {
        let components = positions.len();
        if components < 2 {
            return Err(SolverError::Parse(format!(
                "a circuit needs at least two components, got {components}"
            )));
        }
        if min_degree.len() != components || max_degree.len() != components {
            return Err(SolverError::Parse(
                "degree constraint tables must cover every component".to_string(),
            ));
        }
        Ok(Self {
            components,
            connections,
            min_degree,
            max_degree,
            positions,
        })
    }

    /// Parses the counts-then-coordinates instance format. The minimum degree
    /// line holds a single value applied to every component; the maximum is
    /// everything but a self-loop.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let components = report::expect_line(lines, 0, "component count")?
            .parse::<usize>()
            .context("component count")?;
        if components < 2 {
            return Err(SolverError::Parse(format!(
                "a circuit needs at least two components, got {components}"
            )));
        }
        let connections = report::expect_line(lines, 1, "connection count")?
            .parse::<usize>()
            .context("connection count")?;
        let min_common = report::expect_line(lines, 2, "minimum connections")?
            .parse::<usize>()
            .context("minimum connections")?;
        let xs = report::parse_floats(report::expect_line(lines, 3, "x coordinates")?, "x coordinates")?;
        let ys = report::parse_floats(report::expect_line(lines, 4, "y coordinates")?, "y coordinates")?;
        if xs.len() != components || ys.len() != components {
            return Err(SolverError::Parse(format!(
                "expected {components} coordinates, got {} x and {} y",
                xs.len(),
                ys.len()
            )));
        }
        let positions: Vec<(f64, f64)> = xs.into_iter().zip(ys).collect();
        Self::new(
            connections,
            vec![min_common; components],
            vec![components - 1; components],
            positions,
        )
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&report::read_instance_lines(path)?)
    }

    /// Euclidean distance between two components.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        let (xa, ya) = self.positions[a];
        let (xb, yb) = self.positions[b];
        ((xb - xa).powi(2) + (yb - ya).powi(2)).sqrt()
    }

    /// Connection count per component.
    pub fn degrees(&self, layout: &[Connection]) -> Vec<usize> {
        let mut degrees = vec![0; self.components];
        for &(a, b) in layout {
            degrees[a] += 1;
            degrees[b] += 1;
        }
        degrees
    }

    /// Total wire length of a layout.
    pub fn wire_length(&self, layout: &[Connection]) -> f64 {
        layout.iter().map(|&(a, b)| self.distance(a, b)).sum()
    }

    /// Whether every component's degree sits within its bounds.
    pub fn is_feasible(&self, layout: &[Connection]) -> bool {
        self.degrees(layout)
            .iter()
            .enumerate()
            .all(|(component, &degree)| {
                degree >= self.min_degree[component] && degree <= self.max_degree[component]
            })
    }

    /// Draws a random layout, respecting the maximum-degree bounds with a
    /// bounded number of attempts; short layouts are simply penalized.
    pub fn random_layout(&self, rng: &mut RandomNumberGenerator) -> Vec<Connection> {
        let mut layout: Vec<Connection> = Vec::with_capacity(self.connections);
        let mut degrees = vec![0usize; self.components];
        let mut attempts = 0;
        let max_attempts = self.connections * 10;

        while layout.len() < self.connections && attempts < max_attempts {
            attempts += 1;
            let a = rng.index(self.components);
            let b = rng.index(self.components);
            if a == b {
                continue;
            }
            let edge = (a.min(b), a.max(b));
            if layout.contains(&edge) {
                continue;
            }
            if degrees[edge.0] < self.max_degree[edge.0] && degrees[edge.1] < self.max_degree[edge.1] {
                degrees[edge.0] += 1;
                degrees[edge.1] += 1;
                layout.push(edge);
            }
        }
        layout
    }

    pub fn recommended_schedule() -> Result<AnnealingSchedule> {
        AnnealingSchedule::new(INITIAL_TEMPERATURE, COOLING_RATE, MAX_ITERATIONS)?
            .with_min_temperature(MIN_TEMPERATURE)
    }

    /// Output body: the enumerated connections and the total wire length.
    pub fn format_solution(layout: &[Connection], total: f64) -> String {
        let mut body = String::from("Conexões estabelecidas:\n");
        for (index, &(a, b)) in layout.iter().enumerate() {
            body.push_str(&format!(
                "  Conexão {}: componente {} <-> componente {}\n",
                index + 1,
                a,
                b
            ));
        }
        body.push_str(&format!(
            "\nCusto total (soma das distâncias): {total:.2}\n"
        ));
        body
    }
}

impl AnnealingProblem for CircuitInstance {
    type State = Vec<Connection>;

    /// Wire length plus [`DEGREE_PENALTY`] per unit of degree violation.
    fn cost(&self, layout: &Vec<Connection>) -> f64 {
        let mut penalty = 0usize;
        for (component, &degree) in self.degrees(layout).iter().enumerate() {
            if degree < self.min_degree[component] {
                penalty += self.min_degree[component] - degree;
            } else if degree > self.max_degree[component] {
                penalty += degree - self.max_degree[component];
            }
        }
        self.wire_length(layout) + DEGREE_PENALTY * penalty as f64
    }

    /// Swaps one connection: removes a random edge and inserts a fresh one
    /// not already present.
    fn neighbor(&self, layout: &Vec<Connection>, rng: &mut RandomNumberGenerator) -> Vec<Connection> {
        if layout.is_empty() {
            return self.random_layout(rng);
        }
        let mut next = layout.clone();
        next.swap_remove(rng.index(next.len()));

        for _ in 0..PLACEMENT_ATTEMPTS {
            let a = rng.index(self.components);
            let b = rng.index(self.components);
            if a == b {
                continue;
            }
            let edge = (a.min(b), a.max(b));
            if !next.contains(&edge) {
                next.push(edge);
                break;
            }
        }
        next
    }

    fn validate(&self, layout: &Vec<Connection>) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for &(a, b) in layout {
            if a >= b || b >= self.components {
                return Err(SolverError::InvalidCandidate(format!(
                    "connection ({a}, {b}) is not an ordered pair of distinct components"
                )));
            }
            if !seen.insert((a, b)) {
                return Err(SolverError::InvalidCandidate(format!(
                    "connection ({a}, {b}) appears twice"
                )));
            }
        }
        Ok(())
    }
}

/// Solves one instance file with the recommended calibration.
pub fn solve_file(path: &Path, rng: &mut RandomNumberGenerator) -> Result<SolvedInstance> {
    let instance = CircuitInstance::load(path)?;
    let annealer = Annealer::new(CircuitInstance::recommended_schedule()?);
    let initial = instance.random_layout(rng);
    let outcome = annealer.run(&instance, initial, rng)?;

    // The report carries the raw wire length, not the penalized search cost.
    let total = instance.wire_length(&outcome.best);
    let feasible = instance.is_feasible(&outcome.best);
    let id = report::instance_id(path);
    Ok(SolvedInstance {
        file_name: report::output_name(5, "circuito", &id, total as i64),
        body: CircuitInstance::format_solution(&outcome.best, total),
        summary: format!("circuito{id}: comprimento {total:.2}, viavel: {feasible}"),
    })
}
