//! Extraction entry points.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the whole document walk
//! onto a dedicated blocking-pool thread, keeping the Tokio workers free.
//!
//! ## Why sequential pages?
//!
//! Pages are processed in page order, one at a time. The pipeline holds
//! no cross-page state, so per-page parallelism would be safe — but
//! structure extraction is pure CPU over small arrays and finishes in
//! milliseconds per page; the deterministic, order-stable output of a
//! simple loop is worth more than the speedup. A failure on any page
//! aborts the whole document (see [`crate::error`]).

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::output::{DocumentMetadata, PageResult};
use crate::pipeline::{assemble, source};
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extract structured text from a PDF file.
///
/// This is the primary entry point for the library. For each selected
/// page it returns classified line blocks in reading order plus the
/// page's raw text and font statistics.
///
/// # Arguments
/// * `input`  — Path to a PDF file
/// * `config` — Extraction configuration
///
/// # Errors
/// Returns `Err(ExtractError)` for I/O-level failures only: missing or
/// unreadable file, not a PDF, corrupt PDF, password problems, or a
/// pdfium failure on any page. Pages with no text are not errors; they
/// yield empty results.
pub async fn extract_structured_text(
    input: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<Vec<PageResult>, ExtractError> {
    let path = input.as_ref().to_path_buf();
    validate_pdf_file(&path)?;

    let cfg = config.clone();
    tokio::task::spawn_blocking(move || extract_blocking(&path, &cfg))
        .await
        .map_err(|e| ExtractError::Internal(format!("extraction task panicked: {e}")))?
}

/// Synchronous wrapper around [`extract_structured_text`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_structured_text_sync(
    input: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<Vec<PageResult>, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(extract_structured_text(input, config))
}

/// Extract structured text from PDF bytes in memory.
///
/// Internally the library writes `bytes` to a managed [`tempfile`] and
/// cleans it up automatically on return or panic. This is the
/// recommended API when PDF data arrives from an upload or a database
/// rather than a file on disk.
pub async fn extract_from_bytes(
    bytes: &[u8],
    config: &ExtractConfig,
) -> Result<Vec<PageResult>, ExtractError> {
    use std::io::Write;
    let mut tmp = tempfile::NamedTempFile::new()
        .map_err(|e| ExtractError::Internal(format!("tempfile: {e}")))?;
    tmp.write_all(bytes)
        .map_err(|e| ExtractError::Internal(format!("tempfile write: {e}")))?;
    // `tmp` is dropped (and the file deleted) when extraction returns.
    extract_structured_text(tmp.path(), config).await
}

/// Read document metadata without extracting any text.
pub async fn inspect(input: impl AsRef<Path>) -> Result<DocumentMetadata, ExtractError> {
    let path = input.as_ref().to_path_buf();
    validate_pdf_file(&path)?;

    tokio::task::spawn_blocking(move || inspect_blocking(&path))
        .await
        .map_err(|e| ExtractError::Internal(format!("metadata task panicked: {e}")))?
}

// ── Blocking implementations ─────────────────────────────────────────────

fn extract_blocking(
    pdf_path: &Path,
    config: &ExtractConfig,
) -> Result<Vec<PageResult>, ExtractError> {
    let pdfium = Pdfium::default();
    let document = load_document(&pdfium, pdf_path, config.password.as_deref())?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    let page_indices = config.pages.to_indices(total_pages);
    if page_indices.is_empty() {
        return Err(ExtractError::PageOutOfRange {
            page: first_requested_page(&config.pages),
            total: total_pages,
        });
    }
    debug!("Selected {} pages for extraction", page_indices.len());

    let mut results = Vec::with_capacity(page_indices.len());
    for &idx in &page_indices {
        let page_num = idx + 1;
        let page = pages
            .get(idx as u16)
            .map_err(|e| ExtractError::TextReadFailed {
                page: page_num,
                detail: format!("{e:?}"),
            })?;
        let runs = source::page_runs(&page).map_err(|e| ExtractError::TextReadFailed {
            page: page_num,
            detail: format!("{e:?}"),
        })?;
        let result = assemble::assemble_page(page_num, &runs, config);
        debug!(
            "Page {}: {} chunks, {} columns, {} chars",
            page_num,
            result.chunks.len(),
            result.stats.columns,
            result.text.len()
        );
        results.push(result);
    }

    info!(
        "Extraction complete: {} pages, {} chunks",
        results.len(),
        results.iter().map(|r| r.chunks.len()).sum::<usize>()
    );
    Ok(results)
}

/// Representative page number for an empty selection's error message.
fn first_requested_page(pages: &crate::config::PageSelection) -> usize {
    use crate::config::PageSelection;
    match pages {
        PageSelection::All => 1,
        PageSelection::Single(p) => *p,
        PageSelection::Range(start, _) => *start,
        PageSelection::Set(set) => set.iter().copied().min().unwrap_or(1),
    }
}

fn inspect_blocking(pdf_path: &Path) -> Result<DocumentMetadata, ExtractError> {
    let pdfium = Pdfium::default();
    let document = load_document(&pdfium, pdf_path, None)?;

    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}

fn load_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, ExtractError> {
    pdfium.load_pdf_from_file(pdf_path, password).map_err(|e| {
        let err_str = format!("{e:?}");
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                ExtractError::WrongPassword {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                ExtractError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            }
        } else {
            ExtractError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: err_str,
            }
        }
    })
}

/// Cheap sanity checks before handing the file to pdfium: existence,
/// readability, and the `%PDF` magic. Catches the common "passed the
/// wrong file" mistakes with a precise error instead of a generic
/// pdfium load failure.
fn validate_pdf_file(path: &PathBuf) -> Result<(), ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound { path: path.clone() });
    }
    let mut file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => {
            ExtractError::PermissionDenied { path: path.clone() }
        }
        std::io::ErrorKind::NotFound => ExtractError::FileNotFound { path: path.clone() },
        _ => ExtractError::Internal(format!("failed to open '{}': {e}", path.display())),
    })?;
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)
        .map_err(|_| ExtractError::NotAPdf {
            path: path.clone(),
            magic: [0; 4],
        })?;
    if &magic != b"%PDF" {
        return Err(ExtractError::NotAPdf {
            path: path.clone(),
            magic,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_file_is_file_not_found() {
        let err = extract_structured_text("/no/such/file.pdf", &ExtractConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn non_pdf_file_is_rejected_by_magic() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"PK\x03\x04 definitely a zip").unwrap();
        let err = extract_structured_text(tmp.path(), &ExtractConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotAPdf { magic, .. } if &magic == b"PK\x03\x04"));
    }

    #[tokio::test]
    async fn truncated_file_is_not_a_pdf() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"%P").unwrap();
        let err = extract_structured_text(tmp.path(), &ExtractConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotAPdf { .. }));
    }
}
