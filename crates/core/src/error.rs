//! Error types for the tickfence outlier detector.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tickfence outlier detector.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (rejected before any processing begins).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (invalid or missing data).
    #[error("Data error: {0}")]
    Data(String),

    /// Classification attempted on an empty point set.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record's date or price could not be parsed.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord {
        /// 1-based line number in the input file (the header is line 1).
        line: usize,
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a malformed record error.
    pub fn malformed_record(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
