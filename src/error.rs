//! # Error Types
//!
//! Error types shared by the search engines and the problem adapters.
//!
//! The engines themselves can only fail at configuration time: every numeric
//! parameter is checked before the search loop starts, so a running search
//! never raises. The remaining variants cover the peripheral concerns the
//! adapters own (instance parsing, file I/O) and the opt-in candidate
//! validation hooks.
//!
//! ## Examples
//!
//! ```rust
//! use metasolve::error::{Result, SolverError};
//!
//! fn check_rate(rate: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(SolverError::Configuration(format!(
//!             "mutation rate must be within [0, 1], got {rate}"
//!         )));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Errors produced by the solvers and their adapters.
#[derive(Error, Debug)]
pub enum SolverError {
    /// A search parameter violates its precondition. Raised eagerly, before
    /// the search loop executes a single step.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A candidate produced by a neighbor, crossover or mutation operator is
    /// structurally invalid for its encoding. Only surfaced through the
    /// optional validation hooks; the engines never validate per candidate.
    #[error("invalid candidate: {0}")]
    InvalidCandidate(String),

    /// An instance file does not match the documented format.
    #[error("parse error: {0}")]
    Parse(String),

    /// An I/O operation on an instance or output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Extension trait for attaching context when converting foreign errors.
///
/// Mostly used on the adapter I/O paths, where a bare parse failure says
/// nothing about which line of which instance file caused it.
///
/// ```rust
/// use metasolve::error::{Result, ResultExt};
///
/// fn parse_count(line: &str) -> Result<usize> {
///     line.trim().parse::<usize>().context("first line must be a count")
/// }
/// ```
pub trait ResultExt<T> {
    /// Maps the error into [`SolverError::Parse`] with the given context
    /// prefixed to the underlying message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: fmt::Display,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| SolverError::Parse(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_parse_errors() {
        let result: Result<usize> = "abc".parse::<usize>().context("bad count");
        let err = result.unwrap_err();
        assert!(matches!(err, SolverError::Parse(_)));
        assert!(err.to_string().contains("bad count"));
    }

    #[test]
    fn test_io_error_converts() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here")?)
        }
        assert!(matches!(read_missing(), Err(SolverError::Io(_))));
    }
}
