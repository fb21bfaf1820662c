use serde::{Deserialize, Serialize};

/// Aggregate result of one sequential import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub success_count: usize,
    pub fail_count: usize,
}

impl ImportOutcome {
    /// User-facing summary, e.g. "Successfully imported 1 contact. 1 failed."
    pub fn message(&self) -> String {
        let noun = if self.success_count == 1 {
            "contact"
        } else {
            "contacts"
        };
        let mut message = format!("Successfully imported {} {}.", self.success_count, noun);
        if self.fail_count > 0 {
            message.push_str(&format!(" {} failed.", self.fail_count));
        }
        message
    }
}
