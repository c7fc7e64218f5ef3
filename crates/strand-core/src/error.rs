//! Error types for the driver-side helpers.
//!
//! Constraint functions themselves are infallible; only configuration and
//! buffer-level helpers return `SolverResult<T>`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    /// Configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two buffers that must be indexed in lockstep have different lengths.
    #[error("Buffer length mismatch: {name} has {actual} elements, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;
