//! Error module for the heavy-hitter toolkit.
//!
//! This module provides the application-level error type. The data structures
//! have their own [`SketchError`](crate::data_structures::SketchError), raised only
//! at construction; everything else that can fail (configuration loading,
//! workload generation, report output) is collected here.

use thiserror::Error;

use crate::data_structures::SketchError;
use crate::harness::WorkloadError;

pub mod config;

/// Result type alias used throughout the application.
pub type HeavyHittersResult<T> = Result<T, HeavyHittersError>;

/// Core error enum for the heavy-hitter toolkit.
#[derive(Error, Debug)]
pub enum HeavyHittersError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised while building a data structure.
    #[error("Sketch error: {0}")]
    Sketch(#[from] SketchError),

    /// Errors raised while generating a workload.
    #[error("Workload error: {0}")]
    Workload(#[from] WorkloadError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors when writing reports.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketch_error_conversion() {
        let err: HeavyHittersError = SketchError::InvalidRange(0).into();
        assert!(matches!(err, HeavyHittersError::Sketch(_)));
        assert_eq!(err.to_string(), "Sketch error: Invalid hash range: 0");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: HeavyHittersError = config::ConfigError::ValidationError("bad".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Configuration validation error: bad"
        );
    }
}
