use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },
}

/// Coarse grouping used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Operational,
    Transport,
    Configuration,
    Local,
}

impl ClaimsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClaimsError::ApiError(_) | ClaimsError::SerializationError(_) => {
                ErrorCategory::Transport
            }
            ClaimsError::UnexpectedResponse { .. } => ErrorCategory::Operational,
            ClaimsError::ValidationError { .. } => ErrorCategory::Validation,
            ClaimsError::ConfigError { .. }
            | ClaimsError::MissingConfigError { .. }
            | ClaimsError::InvalidConfigValueError { .. }
            | ClaimsError::UrlError(_) => ErrorCategory::Configuration,
            ClaimsError::CsvError(_) | ClaimsError::IoError(_) => ErrorCategory::Local,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => "Check that the claims server is reachable and try again",
            ErrorCategory::Operational => "The server rejected the request; reload and retry",
            ErrorCategory::Validation => "Fill in the required input and submit again",
            ErrorCategory::Configuration => "Check the configuration file and command-line flags",
            ErrorCategory::Local => "Check the output directory permissions and free space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClaimsError>;
