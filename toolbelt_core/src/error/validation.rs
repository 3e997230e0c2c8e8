//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid input parameter
    #[error("Invalid argument '{parameter}': {reason}")]
    InvalidArgument { parameter: String, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl ValidationError {
    /// Create an invalid argument error
    pub fn invalid_argument(parameter: &str, reason: &str) -> Self {
        Self::InvalidArgument {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let error = ValidationError::invalid_argument("minimum_size_bytes", "must be at least 1");
        assert!(error.to_string().contains("Invalid argument"));
        assert!(error.to_string().contains("minimum_size_bytes"));
        assert!(error.to_string().contains("must be at least 1"));
    }

    #[test]
    fn test_invalid_configuration_error() {
        let error = ValidationError::invalid_configuration("minimum exceeds maximum");
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.to_string().contains("minimum exceeds maximum"));
    }
}
