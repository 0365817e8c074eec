//! Accepted document types and the intake acceptance gate
//!
//! Browsers and operating systems populate the declared MIME type
//! inconsistently, especially for drag-and-drop, so acceptance checks the
//! declared type first and falls back to the filename extension. File
//! contents are never inspected; a renamed file with the wrong contents
//! passes the gate.

use serde::{Deserialize, Serialize};

/// MIME types accepted by the intake gate.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Extensions accepted when the declared MIME type is missing or unrecognized.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

/// The closed set of document types the intake accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    /// Detect the kind from a declared MIME type, if recognized.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match normalize_mime(mime).as_str() {
            "application/pdf" => Some(Self::Pdf),
            "application/msword" => Some(Self::Doc),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            _ => None,
        }
    }

    /// Detect the kind from the filename extension, case-insensitively.
    /// Accepted suffixes come from [`ACCEPTED_EXTENSIONS`].
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let ext = ACCEPTED_EXTENSIONS
            .iter()
            .copied()
            .find(|ext| lower.ends_with(ext))?;
        match ext {
            ".pdf" => Some(Self::Pdf),
            ".doc" => Some(Self::Doc),
            ".docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect from the declared MIME type first, falling back to the extension.
    pub fn detect(name: &str, mime: &str) -> Option<Self> {
        Self::from_mime(mime).or_else(|| Self::from_name(name))
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Doc => "DOC",
            Self::Docx => "DOCX",
        }
    }
}

/// Lowercase the declared type and strip parameters like "; charset=...".
fn normalize_mime(mime: &str) -> String {
    mime.split(';').next().unwrap_or("").trim().to_lowercase()
}

/// Check whether a file passes the gate by declared MIME type or extension.
pub fn is_acceptable_file(name: &str, mime: &str) -> bool {
    DocumentKind::detect(name, mime).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all_allowed_mime_types() {
        for mime in ACCEPTED_MIME_TYPES {
            assert!(
                is_acceptable_file("anything.bin", mime),
                "{} should be accepted",
                mime
            );
        }
    }

    #[test]
    fn test_accepts_all_allowed_extensions() {
        for ext in ACCEPTED_EXTENSIONS {
            let name = format!("sample{}", ext);
            assert!(
                is_acceptable_file(&name, ""),
                "{} should be accepted",
                name
            );
        }
    }

    #[test]
    fn test_accepts_extension_when_mime_empty() {
        assert!(is_acceptable_file("a.pdf", ""));
        assert!(is_acceptable_file("a.doc", ""));
        assert!(is_acceptable_file("a.docx", ""));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(is_acceptable_file("REPORT.PDF", ""));
        assert!(is_acceptable_file("Thesis.DocX", ""));
    }

    #[test]
    fn test_rejects_plain_text() {
        assert!(!is_acceptable_file("a.txt", "text/plain"));
    }

    #[test]
    fn test_rejects_name_without_matching_extension() {
        assert!(!is_acceptable_file("archive", ""));
        assert!(!is_acceptable_file("pdf", "")); // no dot, no match
        assert!(!is_acceptable_file("slides.pptx", ""));
    }

    #[test]
    fn test_mime_parameters_and_case_are_normalized() {
        assert!(is_acceptable_file("a.bin", "application/pdf; charset=binary"));
        assert!(is_acceptable_file("a.bin", " Application/PDF "));
    }

    #[test]
    fn test_detect_prefers_declared_mime_over_extension() {
        let kind = DocumentKind::detect("notes.docx", "application/pdf");
        assert_eq!(kind, Some(DocumentKind::Pdf));
    }

    #[test]
    fn test_docx_extension_is_not_mistaken_for_doc() {
        assert_eq!(DocumentKind::from_name("thesis.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_name("memo.doc"), Some(DocumentKind::Doc));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(DocumentKind::Pdf.label(), "PDF");
        assert_eq!(DocumentKind::Doc.label(), "DOC");
        assert_eq!(DocumentKind::Docx.label(), "DOCX");
    }
}
