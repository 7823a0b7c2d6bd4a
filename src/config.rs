//! Configuration types for structured text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractConfig`], built
//! via its [`ExtractConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! Most callers only ever touch `max_chars_per_page` and `password`; the
//! heuristic knobs exist for documents with unusual typography. The builder
//! lets callers set only what they care about and rely on well-documented
//! defaults for the rest.
//!
//! The heading-detection ratios are heuristics tuned on mixed report/paper
//! corpora, not contracts. If a document's headings are set in the body
//! size but bold, lower `heading_median_font_ratio`; if footnote-heavy
//! pages misfire, raise it.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a structured text extraction run.
///
/// Built via [`ExtractConfig::builder()`] or using
/// [`ExtractConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2deck_extract::{ExtractConfig, PageSelection};
///
/// let config = ExtractConfig::builder()
///     .max_chars_per_page(2000)
///     .pages(PageSelection::Range(1, 10))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractConfig {
    /// Character budget for each page's `text` field. Default: 4000.
    ///
    /// The reading-order concatenation is truncated (on a character
    /// boundary) to this many characters. 4000 keeps a dense page within a
    /// few thousand LLM tokens while preserving enough context for outline
    /// planning. `chunks` are never truncated.
    pub max_chars_per_page: usize,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Page selection. Default: all pages.
    pub pages: PageSelection,

    /// Heading threshold as a fraction of the page's maximum font size.
    /// Default: 0.9.
    ///
    /// A block within 90 % of the largest font on the page is heading-sized
    /// even when the title itself is slightly larger (drop caps, logos).
    pub heading_max_font_ratio: f64,

    /// Heading threshold as a multiple of the page's median font size.
    /// Default: 1.35.
    ///
    /// The effective threshold is the stricter of the two ratios; this one
    /// keeps the max-font rule from firing on pages where the largest font
    /// is barely above body size.
    pub heading_median_font_ratio: f64,

    /// Fallback heading multiple of the median font when no maximum is
    /// known. Default: 1.5.
    pub heading_fallback_median_ratio: f64,

    /// Maximum character count for a block to qualify as a heading.
    /// Default: 120. Longer lines are body text regardless of size.
    pub heading_max_len: usize,

    /// Maximum font-size ratio between spans merged into one line.
    /// Default: 1.6.
    ///
    /// Prevents a heading from swallowing an adjacent smaller line that
    /// happens to share its baseline band.
    pub font_ratio_limit: f64,

    /// Lower clamp for the dynamic vertical line-grouping tolerance, in
    /// page points. Default: 1.2.
    pub line_tolerance_min: f64,

    /// Upper clamp for the dynamic vertical line-grouping tolerance, in
    /// page points. Default: 4.5.
    pub line_tolerance_max: f64,

    /// Absolute floor for the column gutter threshold, in page points.
    /// Default: 12. Prevents a zero-width threshold on sparse pages.
    pub gutter_floor: f64,

    /// Absolute floor below which a detected column is considered a stray
    /// side-annotation and merged into its neighbour, in page points.
    /// Default: 40. The effective floor is `max(this, 0.08 × page_width)`.
    pub narrow_column_floor: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_chars_per_page: 4000,
            password: None,
            pages: PageSelection::default(),
            heading_max_font_ratio: 0.9,
            heading_median_font_ratio: 1.35,
            heading_fallback_median_ratio: 1.5,
            heading_max_len: 120,
            font_ratio_limit: 1.6,
            line_tolerance_min: 1.2,
            line_tolerance_max: 4.5,
            gutter_floor: 12.0,
            narrow_column_floor: 40.0,
        }
    }
}

impl fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("max_chars_per_page", &self.max_chars_per_page)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pages", &self.pages)
            .field("heading_max_font_ratio", &self.heading_max_font_ratio)
            .field("heading_median_font_ratio", &self.heading_median_font_ratio)
            .field("font_ratio_limit", &self.font_ratio_limit)
            .field("line_tolerance_min", &self.line_tolerance_min)
            .field("line_tolerance_max", &self.line_tolerance_max)
            .field("gutter_floor", &self.gutter_floor)
            .field("narrow_column_floor", &self.narrow_column_floor)
            .finish()
    }
}

impl ExtractConfig {
    /// Create a new builder for `ExtractConfig`.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn max_chars_per_page(mut self, n: usize) -> Self {
        self.config.max_chars_per_page = n.max(1);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    pub fn heading_max_font_ratio(mut self, r: f64) -> Self {
        self.config.heading_max_font_ratio = r.clamp(0.1, 1.0);
        self
    }

    pub fn heading_median_font_ratio(mut self, r: f64) -> Self {
        self.config.heading_median_font_ratio = r.max(1.0);
        self
    }

    pub fn heading_fallback_median_ratio(mut self, r: f64) -> Self {
        self.config.heading_fallback_median_ratio = r.max(1.0);
        self
    }

    pub fn heading_max_len(mut self, n: usize) -> Self {
        self.config.heading_max_len = n.max(1);
        self
    }

    pub fn font_ratio_limit(mut self, r: f64) -> Self {
        self.config.font_ratio_limit = r.max(1.0);
        self
    }

    pub fn line_tolerance(mut self, min: f64, max: f64) -> Self {
        self.config.line_tolerance_min = min.max(0.1);
        self.config.line_tolerance_max = max.max(0.1);
        self
    }

    pub fn gutter_floor(mut self, pts: f64) -> Self {
        self.config.gutter_floor = pts.max(0.0);
        self
    }

    pub fn narrow_column_floor(mut self, pts: f64) -> Self {
        self.config.narrow_column_floor = pts.max(0.0);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, ExtractError> {
        let c = &self.config;
        if c.line_tolerance_min > c.line_tolerance_max {
            return Err(ExtractError::InvalidConfig(format!(
                "line tolerance min ({}) exceeds max ({})",
                c.line_tolerance_min, c.line_tolerance_max
            )));
        }
        if c.font_ratio_limit < 1.0 {
            return Err(ExtractError::InvalidConfig(
                "font_ratio_limit must be ≥ 1.0".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Specifies which pages of the PDF to extract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum PageSelection {
    /// Extract all pages (default).
    #[default]
    All,
    /// Extract a single page (1-indexed).
    Single(usize),
    /// Extract a contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Extract specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed
    /// page numbers, dropping anything outside `1..=total_pages`.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}
