//! Error types for deck planning.

use thiserror::Error;

/// Banner text shown for any failed material generation.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate material list. Please check your API key and try again.";

/// Errors that can occur while planning a deck.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlannerError {
    /// A dimension was zero, negative or not a number.
    #[error("invalid {field}: {value} (must be a positive number)")]
    InvalidDimensions {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// No API key was configured.
    #[error("missing credential: set {0}")]
    MissingCredential(String),

    /// The generative service could not be reached or answered with an error.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// The service answered, but not with a usable material catalog.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl PlannerError {
    /// Returns the message shown to the user.
    ///
    /// Request-cycle failures collapse into one generic banner; the distinct
    /// cause is only logged.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDimensions { field, .. } => {
                format!("Please enter a positive {field}.")
            }
            Self::MissingCredential(_) | Self::TransportFailure(_) | Self::MalformedResponse(_) => {
                GENERATION_FAILED_MESSAGE.to_string()
            }
        }
    }

    /// Returns whether a manual retry might succeed without changing anything.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportFailure(_))
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailure(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
