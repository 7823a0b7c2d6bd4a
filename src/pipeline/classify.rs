//! Structure classification: label each line block heading / list /
//! paragraph.
//!
//! Decision order, first match wins:
//!
//! 1. **List** — the text starts with a recognised marker: a bullet or
//!    dash glyph, a numeric marker (`1.`, `(1)`, `1)`), an alphabetic
//!    marker (`a.`, `a)`) or a checkbox (`[ ]`, `[x]`), each followed by
//!    whitespace. List detection takes priority, so `1. Introduction` in
//!    a 20 pt font stays a list item, never a heading.
//! 2. **Heading** — short text whose font size clears a threshold derived
//!    from the page's own font distribution. Bare 1–3-digit numbers are
//!    excluded: page-number artefacts often render in display sizes.
//! 3. **Paragraph** — everything else.
//!
//! The thresholds are recomputed per page from that page's blocks, so the
//! classifier adapts to each document's typography instead of relying on
//! a universal point-size cutoff.

use super::block::LineBlock;
use crate::config::ExtractConfig;
use crate::output::ChunkKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Bullet/dash glyph followed by whitespace.
static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[•‣◦–—\-*]\s+").unwrap());
/// Numeric markers: `1.`, `(1)`, `1)`.
static RE_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\(\d{1,3}\)|\d{1,3}[.)])\s+").unwrap());
/// Alphabetic markers: `a.`, `a)`.
static RE_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[A-Za-z][.)]\s+").unwrap());
/// Checkbox markers: `[ ]`, `[x]`, `[X]`.
static RE_CHECKBOX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[(?: |x|X)\]\s+").unwrap());
/// A bare 1–3-digit number (page-number artefact).
static RE_BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}$").unwrap());

/// Classify every block on a page.
///
/// `max_font` / `median_font` are computed across the page's blocks by the
/// caller; passing them in keeps this function pure over its inputs.
pub fn classify_blocks(
    blocks: &[LineBlock],
    max_font: f64,
    median_font: f64,
    cfg: &ExtractConfig,
) -> Vec<ChunkKind> {
    blocks
        .iter()
        .map(|b| classify_block(b, max_font, median_font, cfg))
        .collect()
}

fn classify_block(
    block: &LineBlock,
    max_font: f64,
    median_font: f64,
    cfg: &ExtractConfig,
) -> ChunkKind {
    if is_list_item(&block.text) {
        return ChunkKind::List;
    }
    if is_heading(block, max_font, median_font, cfg) {
        return ChunkKind::Heading;
    }
    ChunkKind::Paragraph
}

/// Does the text start with a list marker?
pub fn is_list_item(text: &str) -> bool {
    RE_BULLET.is_match(text)
        || RE_NUMERIC.is_match(text)
        || RE_ALPHA.is_match(text)
        || RE_CHECKBOX.is_match(text)
}

fn is_heading(block: &LineBlock, max_font: f64, median_font: f64, cfg: &ExtractConfig) -> bool {
    let trimmed = block.text.trim();
    if trimmed.is_empty() || trimmed.chars().count() > cfg.heading_max_len {
        return false;
    }
    if RE_BARE_NUMBER.is_match(trimmed) {
        return false;
    }
    let threshold = if max_font > 0.0 {
        (cfg.heading_max_font_ratio * max_font).max(cfg.heading_median_font_ratio * median_font)
    } else {
        cfg.heading_fallback_median_ratio * median_font
    };
    threshold > 0.0 && block.font_size >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BBox;

    fn block(text: &str, font: f64) -> LineBlock {
        LineBlock {
            text: text.into(),
            font_size: font,
            font_family: None,
            bold: false,
            italic: false,
            bbox: BBox::default(),
            spans: vec![],
        }
    }

    fn kind(text: &str, font: f64, max: f64, med: f64) -> ChunkKind {
        classify_block(&block(text, font), max, med, &ExtractConfig::default())
    }

    #[test]
    fn bullet_markers_are_lists() {
        for t in [
            "• First item",
            "‣ second",
            "◦ third",
            "– dashed",
            "— em dashed",
            "- plain dash",
            "* star",
        ] {
            assert_eq!(kind(t, 12.0, 28.0, 12.0), ChunkKind::List, "text: {t}");
        }
    }

    #[test]
    fn numeric_markers_are_lists() {
        for t in ["1. Introduction", "(1) first", "1) first", "42. item"] {
            assert_eq!(kind(t, 12.0, 28.0, 12.0), ChunkKind::List, "text: {t}");
        }
    }

    #[test]
    fn alpha_and_checkbox_markers_are_lists() {
        for t in ["a. first", "b) second", "[ ] open", "[x] done", "[X] done"] {
            assert_eq!(kind(t, 12.0, 28.0, 12.0), ChunkKind::List, "text: {t}");
        }
    }

    #[test]
    fn list_wins_over_heading() {
        // Display-sized, but the marker decides.
        assert_eq!(kind("1. Overview", 26.0, 28.0, 12.0), ChunkKind::List);
    }

    #[test]
    fn large_short_text_is_heading() {
        // 26 ≥ max(0.9 × 28, 1.35 × 12) = 25.2
        assert_eq!(kind("Executive Summary", 26.0, 28.0, 12.0), ChunkKind::Heading);
    }

    #[test]
    fn bare_page_number_is_not_heading() {
        assert_eq!(kind("42", 26.0, 28.0, 12.0), ChunkKind::Paragraph);
        // Four digits is no longer a page-number artefact.
        assert_eq!(kind("2024", 26.0, 28.0, 12.0), ChunkKind::Heading);
    }

    #[test]
    fn long_text_is_not_heading() {
        let long = "word ".repeat(30);
        assert_eq!(kind(long.trim(), 26.0, 28.0, 12.0), ChunkKind::Paragraph);
    }

    #[test]
    fn body_font_is_paragraph() {
        assert_eq!(kind("Plain sentence here.", 12.0, 28.0, 12.0), ChunkKind::Paragraph);
    }

    #[test]
    fn threshold_is_stricter_of_the_two_ratios() {
        // max(0.9 × 28, 1.35 × 12) = 25.2: near-body sizes never qualify.
        assert_eq!(kind("Methods and data", 17.0, 28.0, 12.0), ChunkKind::Paragraph);
        // On a page whose largest font IS the section head, the median
        // ratio governs: max(0.9 × 14, 1.35 × 10) = 13.5.
        assert_eq!(kind("Methods and data", 14.0, 14.0, 10.0), ChunkKind::Heading);
    }

    #[test]
    fn fallback_uses_median_only() {
        // max unknown (0): threshold 1.5 × 12 = 18.
        assert_eq!(kind("Heading", 18.0, 0.0, 12.0), ChunkKind::Heading);
        assert_eq!(kind("Heading", 17.0, 0.0, 12.0), ChunkKind::Paragraph);
    }

    #[test]
    fn hyphenated_word_is_not_a_list() {
        // No whitespace after the dash.
        assert_eq!(kind("-dashedword", 12.0, 28.0, 12.0), ChunkKind::Paragraph);
    }
}
