use crate::domain::registrant::RegistrantError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    BackendError { status: u16, body: String },

    #[error("Malformed backend response: {message}")]
    MalformedResponseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{}: {}", .0.title(), .0)]
    RegistrationError(#[from] RegistrantError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Prompt failed: {message}")]
    PromptError { message: String },
}

impl KioskError {
    /// Whether the failure came from talking to the ticket backend.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            KioskError::ApiError(_)
                | KioskError::BackendError { .. }
                | KioskError::MalformedResponseError { .. }
        )
    }

    /// Text safe to show at the kiosk. Backend failures are deliberately not
    /// told apart: timeouts, server errors and bad payloads read the same.
    pub fn user_friendly_message(&self) -> String {
        if self.is_backend_failure() {
            return "The ticket service is not available right now. Please try again.".to_string();
        }
        match self {
            KioskError::ConfigError { .. }
            | KioskError::InvalidConfigValueError { .. } => format!("Kiosk is misconfigured: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KioskError>;
