use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdoptError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration parse error in {field}: {message}")]
    ConfigParseError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error in {field}: {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Network,
    Data,
    System,
}

impl AdoptError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdoptError::ConfigError { .. }
            | AdoptError::ConfigParseError { .. }
            | AdoptError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdoptError::ValidationError { .. } => ErrorCategory::Validation,
            AdoptError::HttpError(_) => ErrorCategory::Network,
            AdoptError::SerializationError(_) => ErrorCategory::Data,
            AdoptError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file and the WEBHOOK_URL / RECIPIENT_IDENTIFIER variables"
            }
            ErrorCategory::Validation => "Correct the applicant answers and submit again",
            ErrorCategory::Network => "Check network connectivity and the webhook endpoint",
            ErrorCategory::Data => "Check that the answers file is valid JSON",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AdoptError::ValidationError { field, message } => {
                format!("The answer for '{}' is not valid: {}", field, message)
            }
            AdoptError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is not valid: {}", field, reason)
            }
            AdoptError::ConfigParseError { message, .. } => {
                format!("The configuration could not be read: {}", message)
            }
            AdoptError::ConfigError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Process exit code used by the command-line shell.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Validation => 2,
            _ => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdoptError>;
