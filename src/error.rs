// Error taxonomy for the portal client.
//
// Three failure families matter to callers: local validation (rejected before any
// network call), backend/transport failures (surfaced as a notification, never fatal),
// and session-blob problems (always recovered silently to "unset").

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    /// A required, visible field on the current step is empty. The step does not
    /// advance and no network call is made.
    #[error("'{label}' is required before continuing")]
    MissingField { key: String, label: String },

    /// The backend rejected the call and supplied a message worth showing the user.
    #[error("{0}")]
    Backend(String),

    /// The request never got a usable response (network failure, timeout, non-JSON
    /// body). Indistinguishable from a backend rejection beyond the message text.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid portal configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

impl PortalError {
    /// Message suitable for a transient user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::MissingField { label, .. } => {
                format!("'{}' is required before continuing", label)
            }
            PortalError::Backend(msg) => msg.clone(),
            PortalError::Transport(_) => {
                "Something went wrong while saving. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PortalError::MissingField { .. })
    }
}
