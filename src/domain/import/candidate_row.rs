// ============================================================
// CONTACT IMPORT ROW TYPES
// ============================================================
// Per-line classification of uploaded contact files

use serde::{Deserialize, Serialize};

/// Why a line was rejected during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    #[serde(rename = "Empty line")]
    EmptyLine,
    #[serde(rename = "Phone number too short")]
    TooShort,
    #[serde(rename = "Phone number too long")]
    TooLong,
}

/// One candidate contact derived from a line of uploaded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRow {
    /// Digits-only phone number. For lines with no digits at all this holds
    /// the original untrimmed line instead, so the preview can show what was
    /// rejected.
    pub normalized_phone: String,

    pub is_valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<InvalidReason>,
}

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

impl CandidateRow {
    /// Classify a single retained (non-blank) line.
    pub fn classify(line: &str) -> Self {
        let normalized: String = line.chars().filter(|c| c.is_ascii_digit()).collect();

        if normalized.is_empty() {
            return Self {
                normalized_phone: line.to_string(),
                is_valid: false,
                invalid_reason: Some(InvalidReason::EmptyLine),
            };
        }

        let reason = if normalized.len() < MIN_PHONE_DIGITS {
            Some(InvalidReason::TooShort)
        } else if normalized.len() > MAX_PHONE_DIGITS {
            Some(InvalidReason::TooLong)
        } else {
            None
        };

        Self {
            normalized_phone: normalized,
            is_valid: reason.is_none(),
            invalid_reason: reason,
        }
    }
}

/// Validated rows plus the summary counts the preview screen shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub rows: Vec<CandidateRow>,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl ImportPreview {
    pub fn from_rows(rows: Vec<CandidateRow>) -> Self {
        let valid_count = rows.iter().filter(|row| row.is_valid).count();
        let invalid_count = rows.len() - valid_count;
        Self {
            rows,
            valid_count,
            invalid_count,
        }
    }
}

/// Parse raw uploaded text into candidate rows, one per non-blank line.
///
/// Lines are split on `\n` or `\r\n`. Blank and whitespace-only lines are
/// dropped before classification, so they never surface as "Empty line"
/// rejections. Output order matches input order.
pub fn parse_contact_lines(text: &str) -> ImportPreview {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(CandidateRow::classify)
        .collect();
    ImportPreview::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phone_within_window() {
        let row = CandidateRow::classify("233501234567");
        assert!(row.is_valid);
        assert_eq!(row.normalized_phone, "233501234567");
        assert_eq!(row.invalid_reason, None);
    }

    #[test]
    fn test_formatting_characters_are_stripped() {
        let row = CandidateRow::classify("+233 (50) 123-4567");
        assert!(row.is_valid);
        assert_eq!(row.normalized_phone, "233501234567");
    }

    #[test]
    fn test_no_digits_keeps_original_line() {
        let row = CandidateRow::classify("abc");
        assert!(!row.is_valid);
        assert_eq!(row.invalid_reason, Some(InvalidReason::EmptyLine));
        // Display compatibility: the original line, not the stripped value.
        assert_eq!(row.normalized_phone, "abc");
    }

    #[test]
    fn test_no_digits_keeps_surrounding_whitespace() {
        let row = CandidateRow::classify("  abc  ");
        assert_eq!(row.normalized_phone, "  abc  ");
    }

    #[test]
    fn test_too_short() {
        let row = CandidateRow::classify("12345");
        assert!(!row.is_valid);
        assert_eq!(row.invalid_reason, Some(InvalidReason::TooShort));
        assert_eq!(row.normalized_phone, "12345");
    }

    #[test]
    fn test_too_long() {
        let row = CandidateRow::classify("1234567890123456");
        assert!(!row.is_valid);
        assert_eq!(row.invalid_reason, Some(InvalidReason::TooLong));
    }

    #[test]
    fn test_boundary_lengths() {
        assert!(CandidateRow::classify("1234567890").is_valid);
        assert!(CandidateRow::classify("123456789012345").is_valid);
        assert!(!CandidateRow::classify("123456789").is_valid);
    }

    #[test]
    fn test_blank_lines_are_dropped_before_classification() {
        let preview = parse_contact_lines("233501234567\n\n   \n233509876543");
        assert_eq!(preview.rows.len(), 2);
        assert!(preview
            .rows
            .iter()
            .all(|row| row.invalid_reason != Some(InvalidReason::EmptyLine)));
    }

    #[test]
    fn test_crlf_line_endings() {
        let preview = parse_contact_lines("233501234567\r\n233509876543\r\n");
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.valid_count, 2);
        assert_eq!(preview.rows[1].normalized_phone, "233509876543");
    }

    #[test]
    fn test_order_matches_input() {
        let preview = parse_contact_lines("233501234567\nabc\n233509876543");
        let phones: Vec<&str> = preview
            .rows
            .iter()
            .map(|row| row.normalized_phone.as_str())
            .collect();
        assert_eq!(phones, vec!["233501234567", "abc", "233509876543"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "233501234567\nabc\n12345\n";
        let first = parse_contact_lines(text);
        let second = parse_contact_lines(text);
        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn test_mixed_file_scenario() {
        let preview = parse_contact_lines("233501234567\n233509876543\nabc\n12345");
        assert_eq!(preview.rows.len(), 4);
        assert_eq!(preview.valid_count, 2);
        assert_eq!(preview.invalid_count, 2);
        assert_eq!(preview.rows[0].normalized_phone, "233501234567");
        assert_eq!(preview.rows[1].normalized_phone, "233509876543");
        assert_eq!(preview.rows[2].invalid_reason, Some(InvalidReason::EmptyLine));
        assert_eq!(preview.rows[3].invalid_reason, Some(InvalidReason::TooShort));
    }
}
