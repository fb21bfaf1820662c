use serde::{Deserialize, Serialize};

/// A contact as returned by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: Option<String>,
    pub phone: String,
    pub category: String,
}

/// One submission unit for a contact import run: a valid phone number plus
/// the category shared by the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub phone: String,
    pub category: String,
}

impl ImportTarget {
    pub fn new(phone: &str, category: &str) -> Self {
        Self {
            phone: phone.to_string(),
            category: category.to_string(),
        }
    }
}
