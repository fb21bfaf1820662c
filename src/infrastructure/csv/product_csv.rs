// ============================================================
// PRODUCT CSV PARSER
// ============================================================
// Lift uploaded product files into raw records; validation
// happens in the import use case.

use crate::domain::error::{AppError, Result};
use crate::domain::product::ProductRecord;
use csv::{ReaderBuilder, StringRecord, Trim};

pub struct ProductCsvParser {
    delimiter: u8,
}

impl Default for ProductCsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ProductCsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV content into raw product records. Requires `name`,
    /// `price` and `quantity` columns; `category` is optional.
    pub fn parse_content(&self, content: &str) -> Result<Vec<ProductRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let name_idx = find_column(&headers, "name")
            .ok_or_else(|| AppError::ParseError("Product file is missing a 'name' column".to_string()))?;
        let price_idx = find_column(&headers, "price")
            .ok_or_else(|| AppError::ParseError("Product file is missing a 'price' column".to_string()))?;
        let quantity_idx = find_column(&headers, "quantity").ok_or_else(|| {
            AppError::ParseError("Product file is missing a 'quantity' column".to_string())
        })?;
        let category_idx = find_column(&headers, "category");

        let mut records = Vec::new();
        for (offset, result) in reader.records().enumerate() {
            let line = offset + 2; // header is line 1
            let record = result
                .map_err(|e| AppError::ParseError(format!("Failed to parse CSV row {}: {}", line, e)))?;

            records.push(ProductRecord {
                line,
                name: field(&record, name_idx),
                price: field(&record, price_idx),
                quantity: field(&record, quantity_idx),
                category: category_idx
                    .map(|idx| field(&record, idx))
                    .filter(|value| !value.is_empty()),
            });
        }

        Ok(records)
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe) by
    /// scoring per-line counts for consistency and frequency.
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            if sample_lines.is_empty() {
                continue;
            }

            let counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.chars().filter(|&c| c as u8 == delimiter).count())
                .collect();

            let avg = counts.iter().sum::<usize>() as f32 / counts.len() as f32;
            let variance = counts
                .iter()
                .map(|&count| (count as f32 - avg).powi(2))
                .sum::<f32>()
                / counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());
            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

fn find_column(headers: &StringRecord, wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(wanted))
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").to_string()
}
