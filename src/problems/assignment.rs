//! Generalized assignment of modules to programmers, solved with the
//! annealing engine.
//!
//! The state maps each module to a programmer; hour-capacity overruns are
//! folded into the cost as a penalty instead of being forbidden by the
//! representation, so the search can cross infeasible regions.
//!
//! Instance format: programmer count, module count, one cost-matrix row per
//! programmer, one hour-matrix row per programmer, then the capacities line.

use std::path::Path;

use crate::annealing::{Annealer, AnnealingProblem, AnnealingSchedule};
use crate::error::{Result, ResultExt, SolverError};
use crate::report::{self, SolvedInstance};
use crate::rng::RandomNumberGenerator;

/// Calibration recommended for the bundled instances.
pub const INITIAL_TEMPERATURE: f64 = 500.0;
pub const MIN_TEMPERATURE: f64 = 0.1;
pub const COOLING_RATE: f64 = 0.99;
pub const MAX_ITERATIONS: usize = 5_000;

/// Cost added per hour of capacity overrun.
pub const OVERLOAD_PENALTY: f64 = 1_000.0;

/// One assignment instance: per-programmer cost and hour tables plus
/// hour capacities.
#[derive(Debug, Clone)]
pub struct AssignmentInstance {
    pub programmers: usize,
    pub modules: usize,
    /// `costs[programmer][module]`
    pub costs: Vec<Vec<i64>>,
    /// `hours[programmer][module]`
    pub hours: Vec<Vec<i64>>,
    pub capacities: Vec<i64>,
}

impl AssignmentInstance {
    pub fn new(
        costs: Vec<Vec<i64>>,
        hours: Vec<Vec<i64>>,
        capacities: Vec<i64>,
    ) -> Result<Self> {
        let programmers = costs.len();
        if programmers == 0 {
            return Err(SolverError::Parse("no programmers in instance".to_string()));
        }
        let modules = costs[0].len();
        if modules == 0 {
            return Err(SolverError::Parse("no modules in instance".to_string()));
        }
        let tables_consistent = costs.iter().all(|row| row.len() == modules)
            && hours.len() == programmers
            && hours.iter().all(|row| row.len() == modules)
            && capacities.len() == programmers;
        if !tables_consistent {
            return Err(SolverError::Parse(
                "cost/hour/capacity tables disagree on their dimensions".to_string(),
            ));
        }
        Ok(Self {
            programmers,
            modules,
            costs,
            hours,
            capacities,
        })
    }

    /// Parses the counts-then-matrices instance format.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let programmers = report::expect_line(lines, 0, "programmer count")?
            .parse::<usize>()
            .context("programmer count")?;
        let modules = report::expect_line(lines, 1, "module count")?
            .parse::<usize>()
            .context("module count")?;

        let mut index = 2;
        let mut costs = Vec::with_capacity(programmers);
        for _ in 0..programmers {
            let line = report::expect_line(lines, index, "cost matrix row")?;
            costs.push(report::parse_ints(line, "cost matrix row")?);
            index += 1;
        }
        let mut hours = Vec::with_capacity(programmers);
        for _ in 0..programmers {
            let line = report::expect_line(lines, index, "hour matrix row")?;
            hours.push(report::parse_ints(line, "hour matrix row")?);
            index += 1;
        }
        let capacities = report::parse_ints(
            report::expect_line(lines, index, "capacities")?,
            "capacities",
        )?;

        let instance = Self::new(costs, hours, capacities)?;
        if instance.modules != modules {
            return Err(SolverError::Parse(format!(
                "header announces {modules} modules but the matrices carry {}",
                instance.modules
            )));
        }
        Ok(instance)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&report::read_instance_lines(path)?)
    }

    /// Hours consumed per programmer under `assignment`.
    pub fn loads(&self, assignment: &[usize]) -> Vec<i64> {
        let mut loads = vec![0; self.programmers];
        for (module, &programmer) in assignment.iter().enumerate() {
            loads[programmer] += self.hours[programmer][module];
        }
        loads
    }

    /// Real (unpenalized) cost of an assignment.
    pub fn real_cost(&self, assignment: &[usize]) -> i64 {
        assignment
            .iter()
            .enumerate()
            .map(|(module, &programmer)| self.costs[programmer][module])
            .sum()
    }

    /// Whether every programmer stays within their hour capacity.
    pub fn is_feasible(&self, assignment: &[usize]) -> bool {
        self.loads(assignment)
            .iter()
            .zip(self.capacities.iter())
            .all(|(&load, &capacity)| load <= capacity)
    }

    /// Greedy initial solution: each module goes to the cheapest programmer
    /// that still has capacity; when nobody has room the module is placed
    /// randomly and the penalty cost takes over.
    pub fn greedy_initial(&self, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let mut assignment = Vec::with_capacity(self.modules);
        let mut used = vec![0i64; self.programmers];

        for module in 0..self.modules {
            let mut chosen: Option<usize> = None;
            for programmer in 0..self.programmers {
                let fits = used[programmer] + self.hours[programmer][module]
                    <= self.capacities[programmer];
                let cheaper = chosen
                    .map(|current| self.costs[programmer][module] < self.costs[current][module])
                    .unwrap_or(true);
                if fits && cheaper {
                    chosen = Some(programmer);
                }
            }
            let programmer = chosen.unwrap_or_else(|| rng.index(self.programmers));
            used[programmer] += self.hours[programmer][module];
            assignment.push(programmer);
        }
        assignment
    }

    pub fn recommended_schedule() -> Result<AnnealingSchedule> {
        AnnealingSchedule::new(INITIAL_TEMPERATURE, COOLING_RATE, MAX_ITERATIONS)?
            .with_min_temperature(MIN_TEMPERATURE)
    }

    /// Output body: modules grouped per programmer plus the total cost.
    pub fn format_solution(&self, assignment: &[usize], cost: i64) -> String {
        let mut body = String::from("Designação de módulos por programador:\n");
        for programmer in 0..self.programmers {
            let modules: Vec<String> = assignment
                .iter()
                .enumerate()
                .filter(|(_, &assigned)| assigned == programmer)
                .map(|(module, _)| module.to_string())
                .collect();
            if modules.is_empty() {
                body.push_str(&format!("Programador {programmer}: nenhum módulo\n"));
            } else {
                body.push_str(&format!(
                    "Programador {programmer}: módulos {}\n",
                    modules.join(", ")
                ));
            }
        }
        body.push_str(&format!("\nCusto total: {cost}\n"));
        body
    }
}

impl AnnealingProblem for AssignmentInstance {
    type State = Vec<usize>;

    /// Real cost plus [`OVERLOAD_PENALTY`] per hour of capacity overrun.
    fn cost(&self, assignment: &Vec<usize>) -> f64 {
        let mut excess = 0i64;
        for (load, &capacity) in self.loads(assignment).into_iter().zip(self.capacities.iter()) {
            excess += (load - capacity).max(0);
        }
        self.real_cost(assignment) as f64 + OVERLOAD_PENALTY * excess as f64
    }

    /// Reassigns one random module to one random programmer.
    fn neighbor(&self, assignment: &Vec<usize>, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let mut next = assignment.clone();
        let module = rng.index(self.modules);
        next[module] = rng.index(self.programmers);
        next
    }

    fn validate(&self, assignment: &Vec<usize>) -> Result<()> {
        if assignment.len() != self.modules {
            return Err(SolverError::InvalidCandidate(format!(
                "assignment covers {} modules out of {}",
                assignment.len(),
                self.modules
            )));
        }
        if let Some(&programmer) = assignment.iter().find(|&&p| p >= self.programmers) {
            return Err(SolverError::InvalidCandidate(format!(
                "assignment names programmer {programmer}, only {} exist",
                self.programmers
            )));
        }
        Ok(())
    }
}

/// Solves one instance file with the recommended calibration.
pub fn solve_file(path: &Path, rng: &mut RandomNumberGenerator) -> Result<SolvedInstance> {
    let instance = AssignmentInstance::load(path)?;
    let annealer = Annealer::new(AssignmentInstance::recommended_schedule()?);
    let initial = instance.greedy_initial(rng);
    let outcome = annealer.run(&instance, initial, rng)?;

    // The report carries the real cost, not the penalized search cost.
    let cost = instance.real_cost(&outcome.best);
    let feasible = instance.is_feasible(&outcome.best);
    let id = report::instance_id(path);
    Ok(SolvedInstance {
        file_name: report::output_name(3, "pdg", &id, cost),
        body: instance.format_solution(&outcome.best, cost),
        summary: format!("pdg{id}: custo {cost}, viavel: {feasible}"),
    })
}
