// ============================================================
// UPLOAD DECODING
// ============================================================
// Extension gate and text decoding for user-selected files

use crate::domain::error::{AppError, Result};
use std::path::Path;

const ACCEPTED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Gate an upload on its file extension, then decode the bytes to text.
///
/// Only `.csv` and `.txt` are accepted, case-insensitively; anything else
/// is rejected before any parsing happens.
pub fn decode_upload(file_name: &str, bytes: &[u8]) -> Result<String> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext) => {}
        _ => {
            return Err(AppError::ValidationError(
                "Please upload a CSV or TXT file".to_string(),
            ))
        }
    }

    decode_text(bytes)
}

/// Decode uploaded bytes: strict UTF-8 first, windows-1252 fallback for
/// files exported by older spreadsheet tools. An empty payload means the
/// browser failed to read the file.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(AppError::IoError("Failed to read file".to_string()));
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let (text, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
    if had_errors {
        return Err(AppError::IoError("Failed to read file".to_string()));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_csv_and_txt() {
        assert!(decode_upload("contacts.csv", b"233501234567").is_ok());
        assert!(decode_upload("contacts.txt", b"233501234567").is_ok());
        assert!(decode_upload("CONTACTS.TXT", b"233501234567").is_ok());
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["contacts.xlsx", "contacts.pdf", "contacts", ".csv.exe"] {
            let err = decode_upload(name, b"233501234567").unwrap_err();
            assert_eq!(err.message(), "Please upload a CSV or TXT file");
        }
    }

    #[test]
    fn test_extension_checked_before_content() {
        // A bad extension wins over an unreadable payload.
        let err = decode_upload("contacts.xlsx", b"").unwrap_err();
        assert_eq!(err.message(), "Please upload a CSV or TXT file");
    }

    #[test]
    fn test_empty_payload_is_a_read_failure() {
        let err = decode_upload("contacts.txt", b"").unwrap_err();
        assert_eq!(err.message(), "Failed to read file");
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "café" encoded as windows-1252; invalid as UTF-8.
        let text = decode_text(b"caf\xe9").unwrap();
        assert_eq!(text, "caf\u{e9}");
    }
}
