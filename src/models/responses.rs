// API response models
//
// Every portal endpoint wraps its payload in the same `{ success, data?, message? }`
// envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Payload of `GET /{form}/data/{userId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDataResponse {
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub form_data: Map<String, Value>,
    /// Older backend versions omit this; completion then falls back to the
    /// current-step-equals-terminal-step rule.
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Payload of `PUT /{form}/save`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStepResponse {
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub form_data: Map<String, Value>,
}
