//! Error types for the pdf2deck-extract library.
//!
//! There is deliberately only one error enum: extraction is all-or-nothing.
//! A pdfium failure on page N aborts the whole document rather than
//! returning a partial `Vec<PageResult>` — the downstream outline planner
//! builds a global view of the document, and a silently missing page would
//! corrupt its output far more than a loud failure does.
//!
//! Degenerate *content* is never an error. An empty page, a page with a
//! single glyph, or a page of overlapping zero-width runs all produce a
//! well-formed [`crate::output::PageResult`]; only I/O-level failures from
//! the file system or pdfium surface here.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2deck-extract library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with ExtractConfig::builder().password(..).")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// Selected page numbers exceed the actual page count.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// pdfium failed to deliver the text content of a page.
    ///
    /// Aborts the whole extraction; no partial results are returned.
    #[error("Text retrieval failed for page {page}: {detail}")]
    TextReadFailed { page: usize, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install pdfium or set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy."
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_out_of_range_display() {
        let e = ExtractError::PageOutOfRange { page: 12, total: 8 };
        let msg = e.to_string();
        assert!(msg.contains("Page 12"), "got: {msg}");
        assert!(msg.contains("8 pages"), "got: {msg}");
    }

    #[test]
    fn text_read_failed_display() {
        let e = ExtractError::TextReadFailed {
            page: 3,
            detail: "FPDF_ERR_PAGE".into(),
        };
        assert!(e.to_string().contains("page 3"));
        assert!(e.to_string().contains("FPDF_ERR_PAGE"));
    }

    #[test]
    fn not_a_pdf_shows_magic() {
        let e = ExtractError::NotAPdf {
            path: PathBuf::from("x.bin"),
            magic: *b"PK\x03\x04",
        };
        assert!(e.to_string().contains("x.bin"));
    }
}
