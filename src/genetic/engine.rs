//! Evolutionary loop: selection, crossover, mutation, elitism.

use std::fmt::Debug;

use tracing::debug;

use crate::error::Result;
use crate::history::{History, HistoryPoint};
use crate::rng::RandomNumberGenerator;

use super::GeneticConfig;

/// How often the engine emits a progress event.
const PROGRESS_INTERVAL: usize = 100;

/// Domain hooks the genetic engine drives.
///
/// The engine decides *when* to recombine and mutate (it picks the cut index
/// and the positions to perturb) while the implementor decides *what* those
/// operations mean for its encoding. Operators must keep candidates
/// syntactically valid (a one-point splice of two bit-vectors is a bit-vector
/// of the same width; encodings with richer invariants repair their children
/// inside [`crossover`](Self::crossover)). The engine never checks this per
/// candidate; [`validate`](Self::validate) is the opt-in hook for tests.
pub trait GeneticProblem {
    type Genome: Clone + Debug;

    /// Number of positions in the encoding.
    fn genome_len(&self) -> usize;

    /// Draws one random, syntactically valid genome.
    fn random_genome(&self, rng: &mut RandomNumberGenerator) -> Self::Genome;

    /// Scalar fitness of a genome. Higher is better; constraint violations
    /// are the evaluator's business, typically via penalties.
    fn fitness(&self, genome: &Self::Genome) -> f64;

    /// Single-point recombination: prefix of `a` up to `cut` joined with the
    /// suffix of `b`, and symmetrically for the second child. The engine draws
    /// `cut` uniformly from `1..genome_len()`.
    fn crossover(
        &self,
        a: &Self::Genome,
        b: &Self::Genome,
        cut: usize,
    ) -> (Self::Genome, Self::Genome);

    /// Perturbs one position of the genome in place.
    fn mutate_gene(
        &self,
        genome: &mut Self::Genome,
        position: usize,
        rng: &mut RandomNumberGenerator,
    );

    /// Structural check for a candidate, used only when candidate validation
    /// is switched on.
    fn validate(&self, _genome: &Self::Genome) -> Result<()> {
        Ok(())
    }
}

/// Result of an evolutionary run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct GeneticOutcome<G> {
    /// The elite: best individual observed across the whole run.
    pub best: G,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Elite fitness per generation; entry 0 is the initial population.
    pub history: History,
}

/// Genetic algorithm engine.
///
/// Holds only its configuration between runs; each [`run`](Self::run) is a
/// pure function of the config, the problem and the RNG stream, so a fixed
/// seed reproduces the run exactly.
#[derive(Debug, Clone)]
pub struct GeneticEngine {
    config: GeneticConfig,
    validate_candidates: bool,
}

impl GeneticEngine {
    pub fn new(config: GeneticConfig) -> Self {
        Self {
            config,
            validate_candidates: false,
        }
    }

    /// Checks every generated genome against [`GeneticProblem::validate`].
    /// Intended for tests; per-candidate validation is too expensive for
    /// production runs.
    pub fn with_candidate_validation(mut self) -> Self {
        self.validate_candidates = true;
        self
    }

    /// Evolves a fresh random population and returns the elite.
    ///
    /// Every generation rebuilds the population at constant size: tournament
    /// selection picks `population_size` parents (with replacement across
    /// tournaments), consecutive pairs recombine at one uniform cut, each
    /// child position mutates independently with the configured rate, and the
    /// tracked elite is injected over the worst newcomer whenever it would
    /// otherwise be lost. The elite never regresses.
    ///
    /// # Errors
    ///
    /// Only fails when candidate validation is enabled and the problem's
    /// `validate` hook rejects a genome.
    pub fn run<P: GeneticProblem>(
        &self,
        problem: &P,
        rng: &mut RandomNumberGenerator,
    ) -> Result<GeneticOutcome<P::Genome>> {
        let population_size = self.config.population_size();
        let genome_len = problem.genome_len();

        let mut population: Vec<P::Genome> = (0..population_size)
            .map(|_| problem.random_genome(rng))
            .collect();
        if self.validate_candidates {
            for genome in &population {
                problem.validate(genome)?;
            }
        }
        let mut scores: Vec<f64> = population.iter().map(|g| problem.fitness(g)).collect();

        // Seed the elite from the initial population, first-encountered wins.
        let mut elite_index = 0;
        for (index, &score) in scores.iter().enumerate() {
            if score > scores[elite_index] {
                elite_index = index;
            }
        }
        let mut elite = population[elite_index].clone();
        let mut elite_fitness = scores[elite_index];

        let mut history: History = vec![HistoryPoint::new(0, elite_fitness)];
        let mut deck: Vec<usize> = (0..population_size).collect();

        for generation in 1..=self.config.generations() {
            // Selection: one tournament per slot in the next generation.
            let parents: Vec<usize> = (0..population_size)
                .map(|_| run_tournament(&scores, &mut deck, self.config.tournament_size(), rng))
                .collect();

            // Crossover over consecutive parent pairs.
            let mut offspring: Vec<P::Genome> = Vec::with_capacity(population_size);
            for pair in parents.chunks(2) {
                match *pair {
                    [first, second] if genome_len > 1 => {
                        let cut = rng.range_inclusive(1, genome_len - 1);
                        let (child_a, child_b) =
                            problem.crossover(&population[first], &population[second], cut);
                        offspring.push(child_a);
                        offspring.push(child_b);
                    }
                    [first, second] => {
                        // Single-position encodings have no interior cut.
                        offspring.push(population[first].clone());
                        offspring.push(population[second].clone());
                    }
                    // Odd population: the unpaired winner passes through
                    // recombination untouched but still mutates below.
                    [single] => offspring.push(population[single].clone()),
                    _ => unreachable!("chunks(2) yields one- or two-element slices"),
                }
            }

            // Mutation: each position independently, with the configured rate.
            for child in offspring.iter_mut() {
                for position in 0..genome_len {
                    if rng.chance(self.config.mutation_rate()) {
                        problem.mutate_gene(child, position, rng);
                    }
                }
            }
            if self.validate_candidates {
                for genome in &offspring {
                    problem.validate(genome)?;
                }
            }

            let mut offspring_scores: Vec<f64> =
                offspring.iter().map(|g| problem.fitness(g)).collect();

            // Elitism: if the tracked elite beats the entire new population,
            // it replaces the worst newcomer so it is never lost.
            let generation_best = offspring_scores
                .iter()
                .fold(f64::NEG_INFINITY, |acc, &s| acc.max(s));
            if elite_fitness > generation_best {
                let mut worst_index = 0;
                for (index, &score) in offspring_scores.iter().enumerate() {
                    if score < offspring_scores[worst_index] {
                        worst_index = index;
                    }
                }
                offspring[worst_index] = elite.clone();
                offspring_scores[worst_index] = elite_fitness;
            }

            // Elite update: strict improvement only, first-encountered wins.
            for (genome, &score) in offspring.iter().zip(offspring_scores.iter()) {
                if score > elite_fitness {
                    elite = genome.clone();
                    elite_fitness = score;
                }
            }

            population = offspring;
            scores = offspring_scores;
            history.push(HistoryPoint::new(generation, elite_fitness));

            if generation % PROGRESS_INTERVAL == 0 {
                debug!(generation, elite_fitness, "evolution progress");
            }
        }

        Ok(GeneticOutcome {
            best: elite,
            best_fitness: elite_fitness,
            history,
        })
    }
}

/// One tournament: `k` distinct participants drawn by partial Fisher–Yates
/// over the index deck, best fitness wins, earliest drawn wins ties.
///
/// Distinct participants make `k == population_size` degenerate into always
/// selecting the population's best individual.
fn run_tournament(
    scores: &[f64],
    deck: &mut [usize],
    k: usize,
    rng: &mut RandomNumberGenerator,
) -> usize {
    for slot in 0..k {
        let pick = rng.range_inclusive(slot, deck.len() - 1);
        deck.swap(slot, pick);
    }
    let mut winner = deck[0];
    for &candidate in &deck[1..k] {
        if scores[candidate] > scores[winner] {
            winner = candidate;
        }
    }
    winner
}
