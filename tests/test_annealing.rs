use metasolve::annealing::{Annealer, AnnealingProblem, AnnealingSchedule};
use metasolve::error::SolverError;
use metasolve::rng::RandomNumberGenerator;

/// Euclidean TSP over fixed city coordinates, with a swap-two-cities move.
struct EuclideanTour {
    cities: Vec<(f64, f64)>,
}

impl EuclideanTour {
    fn distance(&self, a: usize, b: usize) -> f64 {
        let (xa, ya) = self.cities[a];
        let (xb, yb) = self.cities[b];
        ((xb - xa).powi(2) + (yb - ya).powi(2)).sqrt()
    }
}

impl AnnealingProblem for EuclideanTour {
    type State = Vec<usize>;

    fn cost(&self, tour: &Vec<usize>) -> f64 {
        tour.iter()
            .enumerate()
            .map(|(index, &city)| self.distance(city, tour[(index + 1) % tour.len()]))
            .sum()
    }

    fn neighbor(&self, tour: &Vec<usize>, rng: &mut RandomNumberGenerator) -> Vec<usize> {
        let n = tour.len();
        let mut next = tour.clone();
        let i = rng.index(n);
        let mut j = rng.index(n - 1);
        if j >= i {
            j += 1;
        }
        next.swap(i, j);
        next
    }

    fn validate(&self, tour: &Vec<usize>) -> metasolve::error::Result<()> {
        let mut seen = vec![false; self.cities.len()];
        for &city in tour {
            if city >= seen.len() || seen[city] {
                return Err(SolverError::InvalidCandidate(
                    "tour is not a permutation".to_string(),
                ));
            }
            seen[city] = true;
        }
        if tour.len() != self.cities.len() {
            return Err(SolverError::InvalidCandidate(
                "tour length drifted".to_string(),
            ));
        }
        Ok(())
    }
}

fn unit_square() -> EuclideanTour {
    EuclideanTour {
        cities: vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
    }
}

#[test]
fn test_unit_square_tour_converges_to_perimeter() {
    // Four cities on the unit square; the optimal tour walks the perimeter
    // for a cost of exactly 4.
    let problem = unit_square();
    let schedule = AnnealingSchedule::new(100.0, 0.9, 200).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(42);
    let outcome = Annealer::new(schedule)
        .with_candidate_validation()
        .run(&problem, vec![0, 2, 1, 3], &mut rng)
        .unwrap();
    assert!((outcome.best_cost - 4.0).abs() < 1e-9);
}

#[test]
fn test_history_never_worsens() {
    let problem = unit_square();
    let schedule = AnnealingSchedule::new(100.0, 0.9, 200).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(7);
    let outcome = Annealer::new(schedule)
        .run(&problem, vec![0, 2, 1, 3], &mut rng)
        .unwrap();
    assert_eq!(outcome.history.first().map(|p| p.step), Some(0));
    for pair in outcome.history.windows(2) {
        assert!(pair[1].best <= pair[0].best);
        assert_eq!(pair[1].step, pair[0].step + 1);
    }
}

#[test]
fn test_identical_seeds_give_identical_runs() {
    let problem = unit_square();
    let schedule = AnnealingSchedule::new(50.0, 0.95, 300).unwrap();
    let annealer = Annealer::new(schedule);

    let mut rng_a = RandomNumberGenerator::from_seed(1234);
    let mut rng_b = RandomNumberGenerator::from_seed(1234);
    let a = annealer.run(&problem, vec![3, 1, 0, 2], &mut rng_a).unwrap();
    let b = annealer.run(&problem, vec![3, 1, 0, 2], &mut rng_b).unwrap();

    assert_eq!(a.best, b.best);
    assert_eq!(a.best_cost, b.best_cost);
    assert_eq!(a.history, b.history);
    assert_eq!(a.accepted_moves, b.accepted_moves);
}

#[test]
fn test_zero_iteration_budget_returns_initial_state() {
    let problem = unit_square();
    let schedule = AnnealingSchedule::new(100.0, 0.9, 0).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(9);
    let initial = vec![0, 2, 1, 3];
    let outcome = Annealer::new(schedule)
        .run(&problem, initial.clone(), &mut rng)
        .unwrap();
    assert_eq!(outcome.best, initial);
    assert_eq!(outcome.iterations_run, 0);
    assert_eq!(outcome.history.len(), 1);
}

/// Every neighbor is one step uphill, so acceptance depends on the
/// temperature alone.
struct UphillRamp;

impl AnnealingProblem for UphillRamp {
    type State = u64;

    fn cost(&self, state: &u64) -> f64 {
        *state as f64
    }

    fn neighbor(&self, state: &u64, _rng: &mut RandomNumberGenerator) -> u64 {
        state + 1
    }
}

#[test]
fn test_cold_search_rejects_every_uphill_move() {
    // At a vanishing temperature exp(-delta/T) underflows to zero: the move
    // is rejected, never a NaN or a panic.
    let schedule = AnnealingSchedule::new(1e-300, 0.5, 500).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(3);
    let outcome = Annealer::new(schedule).run(&UphillRamp, 0, &mut rng).unwrap();
    assert_eq!(outcome.best, 0);
    assert_eq!(outcome.accepted_moves, 0);
    assert_eq!(outcome.improving_moves, 0);
}

#[test]
fn test_hot_search_accepts_uphill_moves() {
    // At an enormous temperature the acceptance probability is essentially 1
    // for a unit uphill step, so the walk drifts away from the start.
    let schedule = AnnealingSchedule::new(1e9, 0.9999, 200).unwrap();
    let mut rng = RandomNumberGenerator::from_seed(3);
    let outcome = Annealer::new(schedule).run(&UphillRamp, 0, &mut rng).unwrap();
    assert!(outcome.accepted_moves >= 195);
    // The best never moves off the start: uphill acceptance explores, the
    // best-so-far tracking keeps the lowest cost seen.
    assert_eq!(outcome.best, 0);
    assert_eq!(outcome.best_cost, 0.0);
}

#[test]
fn test_invalid_schedules_are_rejected_eagerly() {
    assert!(matches!(
        AnnealingSchedule::new(-1.0, 0.9, 10),
        Err(SolverError::Configuration(_))
    ));
    assert!(matches!(
        AnnealingSchedule::new(10.0, 1.0, 10),
        Err(SolverError::Configuration(_))
    ));
    assert!(matches!(
        AnnealingSchedule::new(10.0, 0.0, 10),
        Err(SolverError::Configuration(_))
    ));
}

#[test]
fn test_neighbor_validity_over_many_trials() {
    // Spec-level sweep: 10 000 random swap moves never break the permutation.
    let problem = EuclideanTour {
        cities: (0..12).map(|i| (i as f64, (i * i) as f64)).collect(),
    };
    let mut rng = RandomNumberGenerator::from_seed(99);
    let mut tour: Vec<usize> = (0..12).collect();
    for _ in 0..10_000 {
        tour = problem.neighbor(&tour, &mut rng);
        problem.validate(&tour).unwrap();
    }
}
