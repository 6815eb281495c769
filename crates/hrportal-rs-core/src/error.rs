//! Error types for the portal client core.

use thiserror::Error;

/// Errors returned by fetches, mutations, and assistant sends.
///
/// Form validation never produces one of these; field problems are returned as
/// data by [`crate::validation::validate`].
#[derive(Debug, Error)]
pub enum PortalError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The action needs a signed-in user.
    #[error("sign in required")]
    Unauthenticated,
    /// The signed-in user's role does not allow the action.
    #[error("not authorized: {0}")]
    Forbidden(String),
    /// Input rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// An assistant message is already awaiting its reply.
    #[error("assistant is still responding")]
    AssistantBusy,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] hrportal_rs_config::ConfigError),
}

impl PortalError {
    /// Text suitable for an error toast.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Status { message, .. } if !message.is_empty() => message.clone(),
            PortalError::Transport(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => PortalError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => PortalError::Transport(err.to_string()),
        }
    }
}
