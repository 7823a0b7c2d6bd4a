//! # pdf2deck-extract
//!
//! Structured text extraction from PDFs: classified line blocks in
//! reading order, ready for slide-outline planning.
//!
//! ## Why this crate?
//!
//! A PDF page is a flat bag of positioned glyph runs — no lines, no
//! paragraphs, no headings, no columns. Anything that wants to *reason*
//! about a document (such as an LLM planning a slide deck from it) needs
//! structure back. This crate reconstructs it geometrically: it clusters
//! glyph runs into lines, lines into blocks, classifies each block as a
//! heading, list item or paragraph from the page's own font
//! distribution, and detects multi-column layouts so text comes out in
//! true reading order instead of y-sorted word salad.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF page
//!  │
//!  ├─ 1. Source    read per-glyph geometry via pdfium (spawn_blocking)
//!  ├─ 2. Spans     normalise runs, estimate missing width/height/font
//!  ├─ 3. Lines     baseline clustering + bimodal over-merge correction
//!  ├─ 4. Blocks    gap-aware text join, median font, union bbox
//!  ├─ 5. Classify  heading / list / paragraph from font distribution
//!  ├─ 6. Columns   gutter detection, narrow-column merge, reading order
//!  └─ 7. Result    PageResult { text, chunks, stats } per page
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2deck_extract::{extract_structured_text, ExtractConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractConfig::default();
//!     let pages = extract_structured_text("document.pdf", &config).await?;
//!     for page in &pages {
//!         println!("page {}: {} chunks in {} columns",
//!             page.page, page.chunks.len(), page.stats.columns);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfstruct` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2deck-extract = { version = "0.3", default-features = false }
//! ```
//!
//! ## Guarantees
//!
//! * **Deterministic** — identical input produces byte-identical output;
//!   every sort in the pipeline has a total tie-break.
//! * **Total over content** — empty pages, single glyphs and degenerate
//!   geometry yield well-formed (possibly empty) results, never errors.
//! * **All-or-nothing** — a pdfium failure on any page aborts the whole
//!   document; no partial page lists are returned.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractConfig, ExtractConfigBuilder, PageSelection};
pub use error::ExtractError;
pub use extract::{
    extract_from_bytes, extract_structured_text, extract_structured_text_sync, inspect,
};
pub use output::{
    BBox, Chunk, ChunkKind, DocumentMetadata, FontInfo, PageResult, PageStats, Span,
};
