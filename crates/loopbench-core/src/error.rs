//! Error types for the measurement harness
//!
//! There is deliberately no recoverable-error taxonomy for the kernels
//! themselves: a kernel runs to completion or (for the non-local-exit
//! pattern) ends the process. Errors exist only at the edges, for
//! configuration validation and report output.

use thiserror::Error;

/// Harness error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A kernel name the checksum reducer or registry does not know
    #[error("Unknown kernel: {0}")]
    UnknownKernel(String),

    /// IO error while writing the report
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a length that is not a positive multiple of 40
    pub fn bad_length(name: &str, value: usize) -> Self {
        Self::InvalidConfig(format!(
            "{name} must be a positive multiple of 40, got {value}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfig("len_1d must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: len_1d must be positive"
        );

        let err = Error::UnknownKernel("s999".to_string());
        assert_eq!(err.to_string(), "Unknown kernel: s999");

        let err = Error::bad_length("len_1d", 41);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: len_1d must be a positive multiple of 40, got 41"
        );
    }
}
