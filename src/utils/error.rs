use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Network error contacting {endpoint}: {message}")]
    NetworkError { endpoint: String, message: String },

    #[error("Response from {endpoint} is missing field `{field}`")]
    MissingFieldError { endpoint: String, field: String },

    #[error("Malformed coordinate data '{value}': {reason}")]
    MalformedDataError { value: String, reason: String },

    #[error("Solar position computation failed: {0}")]
    ComputationError(#[from] solar_positioning::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Computation,
    Configuration,
}

impl LocatorError {
    pub fn network(endpoint: &str, message: impl Into<String>) -> Self {
        Self::NetworkError {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_field(endpoint: &str, field: &str) -> Self {
        Self::MissingFieldError {
            endpoint: endpoint.to_string(),
            field: field.to_string(),
        }
    }

    pub fn malformed(value: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDataError {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors the location stage answers with the configured defaults.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::MissingFieldError { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkError { .. } => ErrorCategory::Network,
            Self::MissingFieldError { .. } | Self::MalformedDataError { .. } => {
                ErrorCategory::Data
            }
            Self::ComputationError(_) => ErrorCategory::Computation,
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a lookup service ({})", self),
            ErrorCategory::Data => format!("The geolocation service sent unusable data ({})", self),
            ErrorCategory::Computation => format!("Could not compute the sun position ({})", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LocatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(LocatorError::network("http://ip", "timed out").is_recoverable());
        assert!(LocatorError::missing_field("http://geo", "loc").is_recoverable());
        assert!(!LocatorError::malformed("abc,1", "not a number").is_recoverable());
        assert!(!LocatorError::ConfigError {
            message: "bad".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            LocatorError::network("http://ip", "status 500").category(),
            ErrorCategory::Network
        );
        assert_eq!(
            LocatorError::malformed("x", "y").category(),
            ErrorCategory::Data
        );
        assert_eq!(
            LocatorError::MissingConfigError {
                field: "location".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
    }
}
