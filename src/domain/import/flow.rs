// ============================================================
// IMPORT FLOW STATE MACHINE
// ============================================================
// Tracks one contact-import session from file selection to a
// terminal state. Re-selecting a file resets the flow from any
// state; terminal states are only reached by a completed run.

use serde::{Deserialize, Serialize};

use super::{CandidateRow, ImportPreview};
use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPhase {
    Idle,
    Validating,
    Previewing,
    Importing,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub struct ImportFlow {
    phase: ImportPhase,
    preview: Option<ImportPreview>,
}

impl ImportFlow {
    pub fn new() -> Self {
        Self {
            phase: ImportPhase::Idle,
            preview: None,
        }
    }

    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    pub fn preview(&self) -> Option<&ImportPreview> {
        self.preview.as_ref()
    }

    /// A new file was selected. Allowed from any state; discards any
    /// previously parsed rows.
    pub fn select_file(&mut self) {
        self.phase = ImportPhase::Validating;
        self.preview = None;
    }

    /// Parsing finished for the currently selected file.
    pub fn preview_ready(&mut self, preview: ImportPreview) -> Result<()> {
        if self.phase != ImportPhase::Validating {
            return Err(AppError::Internal(format!(
                "Cannot attach a preview while {:?}",
                self.phase
            )));
        }
        self.preview = Some(preview);
        self.phase = ImportPhase::Previewing;
        Ok(())
    }

    /// The user confirmed the import. Returns the previewed rows; the
    /// caller runs the submission loop without holding the flow lock.
    pub fn begin_import(&mut self) -> Result<Vec<CandidateRow>> {
        if self.phase != ImportPhase::Previewing {
            return Err(AppError::ValidationError(
                "No contact file has been previewed".to_string(),
            ));
        }
        let rows = self
            .preview
            .as_ref()
            .map(|preview| preview.rows.clone())
            .unwrap_or_default();
        self.phase = ImportPhase::Importing;
        Ok(rows)
    }

    /// The confirm was rejected before any submission (blank category,
    /// no valid rows). Returns to the preview; the parsed rows survive.
    pub fn reject_import(&mut self) {
        if self.phase == ImportPhase::Importing {
            self.phase = ImportPhase::Previewing;
        }
    }

    /// The sequential loop ran to completion. Ignored when a file
    /// re-selection already superseded this run.
    pub fn finish(&mut self, success: bool) {
        if self.phase == ImportPhase::Importing {
            self.phase = if success {
                ImportPhase::Succeeded
            } else {
                ImportPhase::Failed
            };
        }
    }
}

impl Default for ImportFlow {
    fn default() -> Self {
        Self::new()
    }
}
