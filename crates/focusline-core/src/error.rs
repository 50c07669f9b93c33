//! Core error types for focusline-core.
//!
//! Errors here cover caller contract violations (malformed date/time
//! strings, out-of-range queue indices). Expected-absence cases such as
//! a task without a usable anchor or duration are modeled as result
//! variants on the calculators, not as errors, and the orchestrator's
//! suppression reasons are successful decisions (see `nudge`).

use thiserror::Error;

/// Core error type for focusline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A date field did not parse as an ISO date (YYYY-MM-DD)
    #[error("Invalid date in '{field}': '{value}' is not an ISO date")]
    InvalidDate { field: String, value: String },

    /// A time-of-day field did not parse as HH:MM
    #[error("Invalid time in '{field}': '{value}' is not HH:MM")]
    InvalidTime { field: String, value: String },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
