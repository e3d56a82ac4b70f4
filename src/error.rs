//! Error types for the front ends
//!
//! The engine itself never fails: an unsolvable yield is NaN, not an error.

use thiserror::Error;

/// Problems with a typed parameter line
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Not exactly four fields
    #[error("Expected 4 parameters separated by single spaces, got {0}")]
    WrongParameterCount(usize),

    /// Two separators in a row
    #[error("Please separate each parameter with a single space only")]
    EmptyParameter,

    /// A field that does not parse as the required number type
    #[error("Non-number value '{value}' given for {field}")]
    InvalidNumber {
        /// Parameter name
        field: &'static str,
        /// Text as typed
        value: String,
    },

    /// A whole number larger than its field allows
    #[error("Value '{value}' for {field} is out of range (maximum {max})")]
    OutOfRange {
        /// Parameter name
        field: &'static str,
        /// Text as typed
        value: String,
        /// Largest accepted value
        max: u64,
    },
}

/// Input result type
pub type InputResult<T> = Result<T, InputError>;

/// Batch file failures
#[derive(Debug, Error)]
pub enum BatchError {
    /// Malformed or unreadable CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Batch result type
pub type BatchResult<T> = Result<T, BatchError>;
