// Copyright (c) 2025 Heavy Hitters Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types shared by the heavy-hitter data structures.

/// Errors that can occur when building a heavy-hitter data structure.
///
/// Once a structure has been constructed, `add_new`, `should_exists` and
/// `is_exists` are total and never produce one of these.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum SketchError {
    /// A size, capacity or count parameter is not strictly positive
    #[error("Invalid sketch configuration: {0}")]
    InvalidConfiguration(String),

    /// A hash range of zero was requested
    #[error("Invalid hash range: {0}")]
    InvalidRange(usize),
}

impl SketchError {
    /// Shorthand for the "must be greater than 0" configuration error.
    pub(crate) fn not_positive(field: &str) -> Self {
        Self::InvalidConfiguration(format!("{field} must be greater than 0"))
    }
}

/// Result type for data structure construction
pub type SketchResult<T> = std::result::Result<T, SketchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SketchError::InvalidRange(0);
        assert_eq!(err.to_string(), "Invalid hash range: 0");

        let err = SketchError::not_positive("bf_size");
        assert_eq!(
            err.to_string(),
            "Invalid sketch configuration: bf_size must be greater than 0"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = SketchError::InvalidConfiguration("cache_size".to_string());
        let err2 = SketchError::InvalidConfiguration("cache_size".to_string());
        let err3 = SketchError::InvalidRange(0);

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
