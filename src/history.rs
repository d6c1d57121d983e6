//! Best-so-far traces recorded by both engines.
//!
//! A history is diagnostic evidence of a run, not an input to the search: the
//! engines append one point per iteration (annealing) or per generation
//! (genetic), and the recorded `best` values never worsen in the optimizing
//! direction.

/// One sample of the best objective value seen so far.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    /// Iteration or generation index. Index 0 is the initial solution.
    pub step: usize,
    /// Best cost (annealing) or best fitness (genetic) observed up to `step`.
    pub best: f64,
}

impl HistoryPoint {
    pub fn new(step: usize, best: f64) -> Self {
        Self { step, best }
    }
}

/// Append-only sequence of [`HistoryPoint`]s.
pub type History = Vec<HistoryPoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_point_fields() {
        let point = HistoryPoint::new(3, 42.0);
        assert_eq!(point.step, 3);
        assert_eq!(point.best, 42.0);
    }
}
