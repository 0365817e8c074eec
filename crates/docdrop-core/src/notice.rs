//! Transient user notices
//!
//! Pure model of the auto-dismissing notification lifecycle. The DOM layer
//! schedules timers against [`NoticeTiming`]; nothing here touches a
//! browser API, so the whole lifecycle is testable natively.

/// How long an actuator stays visually pressed, in milliseconds.
pub const PRESS_FEEDBACK_MS: u32 = 150;

/// Rejection notice for files that fail the acceptance gate.
pub const MSG_UNSUPPORTED_TYPE: &str = "please upload a PDF, DOC, or DOCX file";

/// Notice shown when finish is triggered with no file selected.
pub const MSG_NO_FILE_SELECTED: &str = "please select a file first";

/// Placeholder notice for the previous-step action.
pub const MSG_PREVIOUS_STEP: &str = "the previous step is not available yet";

/// Severity of a transient notice; decides its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Info,
    Success,
}

/// A transient notice to surface to the user. Notices stack; there is no
/// de-duplication or queuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    /// Info notice naming how many dropped files were ignored beyond the first.
    pub fn discarded_files(count: usize) -> Self {
        let noun = if count == 1 { "file" } else { "files" };
        Self::info(format!(
            "only the first file was used ({} extra {} ignored)",
            count, noun
        ))
    }
}

/// Lifecycle phase of a spawned notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticePhase {
    /// Fully visible on screen.
    Visible,
    /// Dismiss transition is playing.
    Dismissing,
    /// Removed from the surface.
    Expired,
}

/// Display and dismissal timing for transient notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTiming {
    /// How long the notice stays fully visible, in milliseconds.
    pub display_ms: u32,
    /// Length of the dismiss transition before removal, in milliseconds.
    pub dismiss_ms: u32,
}

impl NoticeTiming {
    pub fn new(display_ms: u32, dismiss_ms: u32) -> Self {
        Self {
            display_ms,
            dismiss_ms,
        }
    }

    /// Total lifetime from spawn to removal; saturates at `u32::MAX`.
    pub fn total_ms(&self) -> u32 {
        self.display_ms.saturating_add(self.dismiss_ms)
    }

    /// Lifecycle phase at `elapsed_ms` since the notice appeared.
    pub fn phase_at(&self, elapsed_ms: u32) -> NoticePhase {
        if elapsed_ms < self.display_ms {
            NoticePhase::Visible
        } else if elapsed_ms < self.total_ms() {
            NoticePhase::Dismissing
        } else {
            NoticePhase::Expired
        }
    }
}

impl Default for NoticeTiming {
    /// 3000 ms on screen, then a 300 ms dismiss transition.
    fn default() -> Self {
        Self::new(3000, 300)
    }
}
