//! Error types for the PTO engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while scheduling accruals,
//! simulating balances or loading preset configuration.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the PTO engine.
///
/// All engine errors are synchronous and local. None of them are retried by
/// the engine; the caller must correct the input.
///
/// # Example
///
/// ```
/// use pto_engine::error::EngineError;
///
/// let error = EngineError::InvalidDuration {
///     input: "1h75".to_string(),
///     message: "unexpected trailing number".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid duration '1h75': unexpected trailing number"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A duration string could not be parsed.
    #[error("Invalid duration '{input}': {message}")]
    InvalidDuration {
        /// The raw input that failed to parse.
        input: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A date range was empty or reversed.
    #[error("Invalid range: {to} is before {from}")]
    InvalidRange {
        /// The start of the requested range.
        from: NaiveDate,
        /// The end of the requested range.
        to: NaiveDate,
    },

    /// A category lacks a field required by its accrual rules.
    #[error("Category '{category}' is missing required field '{field}'")]
    MissingConfig {
        /// The name of the category.
        category: String,
        /// The missing field.
        field: String,
    },

    /// A work shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A ledger entry was added to a ledger for a different category.
    #[error("Ledger entry for category '{found}' does not belong to category '{expected}'")]
    CategoryMismatch {
        /// The ledger's category.
        expected: String,
        /// The entry's category.
        found: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
