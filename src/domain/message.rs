use serde::{Deserialize, Serialize};

/// Longest message body the SMS gateway accepts (three concatenated parts).
pub const MAX_MESSAGE_CHARS: usize = 480;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    pub category: String,
    pub body: String,
}

/// Aggregate result of one broadcast run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

impl BroadcastReport {
    pub fn message(&self) -> String {
        let noun = if self.delivered == 1 { "contact" } else { "contacts" };
        let mut message = format!("Message sent to {} {}.", self.delivered, noun);
        if self.failed > 0 {
            message.push_str(&format!(" {} failed.", self.failed));
        }
        message
    }
}
