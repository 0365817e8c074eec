//! Single-document intake logic
//!
//! Pure state and validation for a browser file-intake widget: the
//! acceptance gate for PDF/DOC/DOCX files, the single-slot selection state
//! machine, human-readable size formatting, and the transient-notice
//! lifecycle model. No browser APIs here; the `docdrop-wasm` crate binds
//! this to the DOM.

pub mod error;
pub mod file_kind;
pub mod format;
pub mod intake;
pub mod notice;

pub use error::IntakeError;
pub use file_kind::{is_acceptable_file, DocumentKind, ACCEPTED_EXTENSIONS, ACCEPTED_MIME_TYPES};
pub use format::format_size;
pub use intake::{
    DropOutcome, FileCandidate, FinishReceipt, IntakePhase, IntakeSession, SelectedFile,
};
pub use notice::{Notice, NoticeLevel, NoticePhase, NoticeTiming, PRESS_FEEDBACK_MS};
