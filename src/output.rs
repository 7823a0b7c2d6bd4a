//! Output types: the data model handed to the outline-planning stage.
//!
//! Everything here is plain data with `serde` derives. The downstream
//! consumer (the slide-outline planner) receives `Vec<PageResult>` and
//! typically serialises it straight to JSON, so every type keeps a stable,
//! self-describing wire shape.
//!
//! Coordinates are in the page's native point space as reported by pdfium:
//! origin at the bottom-left corner, **larger y = higher on the page**.
//! All comparison logic in the pipeline assumes this convention.

use serde::{Deserialize, Serialize};

/// Round to two decimal places.
///
/// Applied to every coordinate that leaves the pipeline so that output is
/// byte-stable across runs and platforms regardless of accumulated float
/// noise in intermediate sums.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One positioned glyph-run extracted from a page.
///
/// Created fresh per page by the span normaliser and retained inside
/// [`Chunk::spans`] for traceability; never persisted across pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Run text. Never empty; whitespace-only runs are dropped upstream.
    pub text: String,
    /// Left edge, page points.
    pub x: f64,
    /// Bottom edge, page points (larger y = higher on page).
    pub y: f64,
    /// Box width. Estimated as `0.6 × font_size × char_count` when the
    /// source does not supply one.
    pub width: f64,
    /// Box height. Falls back to `max(font_size, 1)`.
    pub height: f64,
    /// Font size derived from the run's scale transform or explicit height.
    pub font_size: f64,
    /// Raw font resource name, e.g. `"TimesNewRomanPS-BoldMT"`.
    pub font_name: Option<String>,
    /// Family portion of the font name, subset tag stripped.
    pub font_family: Option<String>,
}

impl Span {
    /// Vertical anchor used for line grouping.
    ///
    /// Baselines are far more stable across mixed font sizes than raw
    /// top/bottom edges, so grouping keys off `y + max(height, font_size)`.
    pub fn baseline_y(&self) -> f64 {
        self.y + self.height.max(self.font_size)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Copy with all geometry rounded to two decimals.
    pub(crate) fn rounded(&self) -> Span {
        Span {
            text: self.text.clone(),
            x: round2(self.x),
            y: round2(self.y),
            width: round2(self.width),
            height: round2(self.height),
            font_size: round2(self.font_size),
            font_name: self.font_name.clone(),
            font_family: self.font_family.clone(),
        }
    }
}

/// Axis-aligned bounding box in page points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BBox {
    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y1 = (self.y + self.height).max(other.y + other.height);
        BBox {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Horizontal midpoint, the key used for column clustering.
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub(crate) fn rounded(&self) -> BBox {
        BBox {
            x: round2(self.x),
            y: round2(self.y),
            width: round2(self.width),
            height: round2(self.height),
        }
    }
}

/// Representative font metadata for one line block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    /// Median font size of the member spans.
    pub size: f64,
    /// Most frequent family among the member spans.
    pub family: Option<String>,
    pub bold: bool,
    pub italic: bool,
}

/// Structural label for a chunk. Mutually exclusive; list detection takes
/// priority over heading detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Heading,
    List,
    Paragraph,
}

/// One classified line of text — the externally visible unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Structural classification.
    #[serde(rename = "type")]
    pub kind: ChunkKind,
    /// Member span texts joined left-to-right with inferred spacing.
    pub text: String,
    /// Union bounding box of the member spans.
    pub bbox: BBox,
    pub font: FontInfo,
    /// Member spans, rounded, retained for traceability.
    pub spans: Vec<Span>,
}

/// Per-page summary statistics, computed over the page's own line blocks.
///
/// The classifier thresholds derive from `max_font` / `median_font`, so a
/// page of 8 pt footnotes and a page of 32 pt slides each get headings
/// detected relative to their own typography.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageStats {
    pub max_font: f64,
    pub median_font: f64,
    /// Number of line blocks on the page.
    pub line_count: usize,
    /// Number of detected reading-order columns.
    pub columns: usize,
    /// Left edge of each detected column, left to right.
    pub column_boundaries: Vec<f64>,
}

/// Extraction result for one page.
///
/// Computed once per page per extraction call and immutable thereafter.
/// Always well-formed: an empty page yields empty `text`, empty `chunks`
/// and zeroed `stats`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page: usize,
    /// Reading-order concatenation of chunk texts, newline-separated,
    /// whitespace-normalised, truncated to the configured character budget.
    pub text: String,
    /// Classified line blocks in reading order.
    pub chunks: Vec<Chunk>,
    pub stats: PageStats,
}

/// Document-level metadata, available without running extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}
