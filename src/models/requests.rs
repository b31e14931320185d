// API request models
//
// Wire shapes for the portal backend. The step index and user identifier travel
// alongside the field payload, never merged into it, so a persistence field literally
// named `user_id` can never collide with a UI field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStepRequest {
    pub user_id: i64,
    pub current_step: u32,
    /// Snake_case persistence-format fields for the step being saved.
    pub step_data: Map<String, Value>,
}
