//! Line block building: aggregate one line's spans into a single block.
//!
//! pdfium hands us kerned glyph runs, so two adjacent runs on one line may
//! be separate words ("Hello" / "World" with a gap) or two halves of one
//! word split at a kern pair. Text joining is gap-aware: a space is
//! inserted only when the horizontal gap between spans exceeds
//! `max(1.5, 0.2 × font_size)` page points, which tracks word spacing
//! across font sizes without inventing spaces inside kerned words.
//!
//! Representative metadata: font size is the median of member spans (one
//! superscript won't skew it), family is a plurality vote, and
//! bold/italic are pattern-matched from the combined family + raw font
//! name strings — PDF producers encode style in names
//! ("Helvetica-BoldOblique", "Arial,Italic") far more reliably than in
//! font descriptors.

use super::median;
use crate::output::{BBox, Span};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)bold|semibold|medium").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)italic|oblique").unwrap());

/// The aggregated form of one visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBlock {
    pub text: String,
    /// Median font size of the member spans.
    pub font_size: f64,
    /// Plurality font family among the member spans.
    pub font_family: Option<String>,
    pub bold: bool,
    pub italic: bool,
    /// Union bounding box; contains every member span's extent.
    pub bbox: BBox,
    pub spans: Vec<Span>,
}

/// Aggregate one line (spans already sorted left-to-right) into a block.
///
/// Must be called with at least one span; the line grouper never emits an
/// empty line.
pub fn build_block(spans: Vec<Span>) -> LineBlock {
    debug_assert!(!spans.is_empty(), "line grouper never emits empty lines");

    let text = join_spans(&spans);
    let sizes: Vec<f64> = spans.iter().map(|s| s.font_size).collect();
    let font_size = median(&sizes);
    let font_family = plurality_family(&spans);

    let style_key: String = spans
        .iter()
        .flat_map(|s| [s.font_family.as_deref(), s.font_name.as_deref()])
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let bold = RE_BOLD.is_match(&style_key);
    let italic = RE_ITALIC.is_match(&style_key);

    let mut bbox = span_bbox(&spans[0]);
    for span in &spans[1..] {
        bbox = bbox.union(&span_bbox(span));
    }

    LineBlock {
        text,
        font_size,
        font_family,
        bold,
        italic,
        bbox,
        spans,
    }
}

/// Join span texts left-to-right with inferred inter-word spacing.
fn join_spans(spans: &[Span]) -> String {
    let mut text = String::new();
    let mut prev: Option<&Span> = None;
    for span in spans {
        if let Some(p) = prev {
            let gap = span.x - p.right();
            let threshold = (0.2 * p.font_size).max(1.5);
            if gap > threshold {
                text.push(' ');
            }
        }
        text.push_str(&span.text);
        prev = Some(span);
    }
    text
}

/// Most frequent non-empty font family; ties go to the family seen first.
fn plurality_family(spans: &[Span]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut best: Option<(&str, usize)> = None;
    for family in spans.iter().filter_map(|s| s.font_family.as_deref()) {
        if family.is_empty() {
            continue;
        }
        let count = counts.entry(family).or_insert(0);
        *count += 1;
        match best {
            Some((_, n)) if *count <= n => {}
            _ => best = Some((family, *count)),
        }
    }
    best.map(|(family, _)| family.to_string())
}

fn span_bbox(span: &Span) -> BBox {
    BBox {
        x: span.x,
        y: span.y,
        width: span.width,
        height: span.height,
    }
}
