use serde::{Deserialize, Serialize};

/// A raw record lifted from an uploaded product CSV, before validation.
/// Values stay as strings; the import use case decides what is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// 1-based line number in the uploaded file (header is line 1).
    pub line: usize,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub category: Option<String>,
}

/// A validated product ready for submission to the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
}

/// A rejected product row with the reason shown in the import report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub line: usize,
    pub reason: String,
}

/// Aggregate result of one product import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImportReport {
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
    pub row_errors: Vec<RowError>,
}

impl ProductImportReport {
    pub fn message(&self) -> String {
        let noun = if self.created == 1 { "product" } else { "products" };
        let mut message = format!("Imported {} {}.", self.created, noun);
        if self.failed > 0 {
            message.push_str(&format!(" {} failed.", self.failed));
        }
        if self.skipped > 0 {
            message.push_str(&format!(" {} skipped.", self.skipped));
        }
        message
    }
}
