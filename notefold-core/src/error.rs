//! Error types for location parsing and aggregation

use thiserror::Error;

/// Errors produced by the core library
#[derive(Error, Debug)]
pub enum CoreError {
    /// Neither an Arabic nor a Roman numeral could be extracted from a
    /// field expected to contain one
    #[error("no integer found in \"{input}\"")]
    NumeralNotFound {
        /// The text that was searched
        input: String,
    },

    /// A location value was rejected at construction
    #[error("invalid location: {reason}")]
    InvalidLocation {
        /// Why the value was rejected
        reason: String,
    },

    /// A heading's location segment could not be parsed
    #[error("malformed heading \"{heading}\": {reason}")]
    MalformedHeading {
        /// The offending heading text
        heading: String,
        /// What was wrong with it
        reason: String,
    },

    /// A flush was requested before any run was opened
    #[error("no open run to flush")]
    NoOpenRun,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
