use serde::{Deserialize, Serialize};
use validator::Validate;

/// Business profile managed on the settings page and mirrored by the
/// remote API.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSettings {
    #[validate(length(min = 1, max = 80, message = "Business name must be 1-80 characters"))]
    pub business_name: String,

    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,

    /// Alphanumeric SMS sender id, 11 characters max per GSM rules.
    #[validate(length(min = 1, max = 11, message = "Sender ID must be 1-11 characters"))]
    pub sender_id: String,
}

impl Default for BusinessSettings {
    fn default() -> Self {
        Self {
            business_name: "My Business".to_string(),
            currency: "GHS".to_string(),
            sender_id: "SOKOFLOW".to_string(),
        }
    }
}
