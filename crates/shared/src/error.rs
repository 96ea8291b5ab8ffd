//! Application-wide error types.
//!
//! The statement engine never fails on chart or ledger content. These errors
//! cover the shell around it: configuration, snapshot loading, and requests
//! that name master data which does not exist.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Snapshot could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// Snapshot could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Configuration(String::new()), "CONFIGURATION_ERROR")]
    #[case(AppError::NotFound(String::new()), "NOT_FOUND")]
    #[case(AppError::Validation(String::new()), "VALIDATION_ERROR")]
    #[case(AppError::Io(String::new()), "IO_ERROR")]
    #[case(AppError::Serialization(String::new()), "SERIALIZATION_ERROR")]
    fn test_error_codes(#[case] error: AppError, #[case] code: &str) {
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Configuration("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(AppError::Io("msg".into()).to_string(), "I/O error: msg");
    }

    #[test]
    fn test_from_io_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(err.to_string().contains("gone"));
    }
}
