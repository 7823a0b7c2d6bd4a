//! Raw glyph-run retrieval: the boundary between pdfium and the pipeline.
//!
//! pdfium exposes position/glyph primitives, not document structure. This
//! module reads per-character geometry (bounds, scaled font size, font
//! name) and repackages it as [`RawTextRun`] records, the only input type
//! the rest of the pipeline knows about. Every stage downstream of here is
//! pure and testable without a pdfium binary.
//!
//! ## Coordinate convention
//!
//! pdfium reports bounds in page points with the origin at the bottom-left
//! corner: larger y = higher on the page. All vertical comparisons in the
//! pipeline (baseline grouping, top-to-bottom sorting) rely on this.

use pdfium_render::prelude::*;

/// One raw positioned glyph-run record as delivered by the rasteriser.
///
/// `width`/`height` are optional because not every text object carries
/// usable bounds (rotated or degenerate glyphs); the span normaliser
/// estimates them from the font scale when absent. `scale_x`/`scale_y` are
/// the diagonal components of the run's effective scale transform, zero
/// when unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTextRun {
    pub text: String,
    /// Left edge, page points.
    pub x: f64,
    /// Bottom edge, page points.
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub scale_x: f64,
    pub scale_y: f64,
    pub font_name: Option<String>,
    pub font_family: Option<String>,
}

/// Collect the raw glyph runs for one page.
///
/// Iterates pdfium's character objects, skipping the synthetic newlines
/// pdfium injects between text objects (the line grouper reconstructs its
/// own lines from geometry). Whitespace glyphs are skipped as well: word
/// spacing is re-derived from horizontal gaps, so keeping space glyphs
/// would only add zero-information spans.
pub fn page_runs(page: &PdfPage) -> Result<Vec<RawTextRun>, PdfiumError> {
    let text = page.text()?;
    let mut runs = Vec::new();

    for ch in text.chars().iter() {
        let Some(c) = ch.unicode_char() else {
            continue;
        };
        if c.is_whitespace() {
            continue;
        }

        let rect = ch
            .tight_bounds()
            .or_else(|_| ch.loose_bounds())
            .unwrap_or(PdfRect::ZERO);
        let left = rect.left().value as f64;
        let bottom = rect.bottom().value as f64;
        let width = (rect.right().value as f64 - left).max(0.0);
        let height = (rect.top().value as f64 - bottom).max(0.0);

        let scaled = ch.scaled_font_size().value as f64;
        let name = ch.font_name();
        let font_name = if name.is_empty() { None } else { Some(name) };
        let font_family = font_name.as_deref().map(family_of);

        runs.push(RawTextRun {
            text: c.to_string(),
            x: left,
            y: bottom,
            width: (width > 0.0).then_some(width),
            height: (height > 0.0).then_some(height),
            scale_x: scaled,
            scale_y: scaled,
            font_name,
            font_family,
        });
    }

    Ok(runs)
}

/// Derive a family name from a raw PDF font resource name.
///
/// Strips the six-letter subset tag (`"ABCDEF+Helvetica-Bold"`) and the
/// style suffix after the first `-` or `,` (`"Helvetica-Bold"` →
/// `"Helvetica"`). The full name is kept separately on the run so the
/// block builder can still pattern-match bold/italic tokens against it.
pub fn family_of(font_name: &str) -> String {
    let name = match font_name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => rest,
        _ => font_name,
    };
    name.split([',', '-']).next().unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::family_of;

    #[test]
    fn family_strips_subset_tag() {
        assert_eq!(family_of("ABCDEF+TimesNewRomanPSMT"), "TimesNewRomanPSMT");
    }

    #[test]
    fn family_strips_style_suffix() {
        assert_eq!(family_of("Helvetica-BoldOblique"), "Helvetica");
        assert_eq!(family_of("Arial,Bold"), "Arial");
    }

    #[test]
    fn family_keeps_plain_names() {
        assert_eq!(family_of("Courier"), "Courier");
    }

    #[test]
    fn family_ignores_lowercase_prefix() {
        // Not a subset tag: lowercase letters before '+'.
        assert_eq!(family_of("abcdef+Foo"), "abcdef+Foo");
    }
}
