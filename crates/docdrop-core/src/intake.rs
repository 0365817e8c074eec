//! Single-slot file intake state
//!
//! Holds the selected document in Rust so the host page only forwards DOM
//! events and reads presentational state back. One `IntakeSession` per
//! widget instance; nothing is global.

use serde::Serialize;

use crate::error::IntakeError;
use crate::file_kind::DocumentKind;
use crate::format::format_size;

/// An unvalidated file offered to the intake, as reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// The file currently held by the intake slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub kind: DocumentKind,
}

impl SelectedFile {
    /// Declared MIME type for display; empty types render as "unknown".
    pub fn mime_display(&self) -> &str {
        if self.mime_type.is_empty() {
            "unknown"
        } else {
            &self.mime_type
        }
    }

    /// Human-readable size, e.g. "1.5 KB".
    pub fn size_display(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Result of a multi-file drop after the first-file-only policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Whether a file was accepted into the slot.
    pub accepted: bool,
    /// How many files beyond the first were ignored.
    pub discarded: usize,
}

impl DropOutcome {
    /// Outcome of an empty drop: nothing accepted, nothing discarded.
    pub fn empty() -> Self {
        Self {
            accepted: false,
            discarded: 0,
        }
    }
}

/// Acknowledgment produced by a successful finish action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinishReceipt {
    pub name: String,
    pub size_display: String,
}

impl FinishReceipt {
    /// One-line confirmation for display, e.g. `file ready: report.pdf (1.5 KB)`.
    pub fn summary(&self) -> String {
        format!("file ready: {} ({})", self.name, self.size_display)
    }
}

/// The two states the widget renders. A selection can be replaced but
/// never cleared; reloading the page is the only way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePhase {
    NoFileSelected,
    FileSelected,
}

/// Single-slot intake session.
#[derive(Debug, Default)]
pub struct IntakeSession {
    selected: Option<SelectedFile>,
}

impl IntakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one candidate through the acceptance gate.
    ///
    /// Both the file picker and the drop path feed this method, so neither
    /// can bypass validation. On success the slot is replaced wholesale; a
    /// rejected candidate leaves the slot untouched.
    pub fn offer(&mut self, candidate: FileCandidate) -> Result<&SelectedFile, IntakeError> {
        let kind = DocumentKind::detect(&candidate.name, &candidate.mime_type)
            .ok_or_else(|| IntakeError::UnsupportedType(candidate.name.clone()))?;

        Ok(self.selected.insert(SelectedFile {
            name: candidate.name,
            size_bytes: candidate.size_bytes,
            mime_type: candidate.mime_type,
            kind,
        }))
    }

    /// Apply a dropped file list under the first-file-only policy.
    ///
    /// Only the first candidate is considered; the rest are counted so the
    /// caller can tell the user they were ignored. An empty drop is a no-op.
    pub fn offer_drop(
        &mut self,
        candidates: Vec<FileCandidate>,
    ) -> Result<DropOutcome, IntakeError> {
        let mut candidates = candidates.into_iter();
        let first = match candidates.next() {
            Some(first) => first,
            None => return Ok(DropOutcome::empty()),
        };
        let discarded = candidates.count();

        self.offer(first)?;
        Ok(DropOutcome {
            accepted: true,
            discarded,
        })
    }

    /// The file currently held, if any.
    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Current state of the two-state intake machine.
    pub fn phase(&self) -> IntakePhase {
        if self.selected.is_some() {
            IntakePhase::FileSelected
        } else {
            IntakePhase::NoFileSelected
        }
    }

    /// Whether the finish action is available. True iff a file is held.
    pub fn can_finish(&self) -> bool {
        self.selected.is_some()
    }

    /// Acknowledge the selection. Errors when no file is held; otherwise
    /// returns a receipt carrying the name and human-readable size.
    pub fn finish(&self) -> Result<FinishReceipt, IntakeError> {
        let file = self.selected.as_ref().ok_or(IntakeError::NothingSelected)?;
        Ok(FinishReceipt {
            name: file.name.clone(),
            size_display: file.size_display(),
        })
    }
}
