//! Span normalisation: raw glyph-run records → [`Span`].
//!
//! The rasteriser does not guarantee complete geometry. Runs may arrive
//! without usable bounds or without an explicit font size, so this stage
//! fills every hole with a deterministic estimate:
//!
//! * font size — median of up to three positive candidates: the explicit
//!   height and the two diagonal scale-transform components. The median
//!   shrugs off a single outlier (e.g. a squashed bounds box under a
//!   normal font scale).
//! * width — `0.6 × font_size × char_count`, the classic average-glyph
//!   advance approximation.
//! * height — `max(font_size, 1)`, floored so later tolerance maths never
//!   divides or compares against zero.
//!
//! Empty and whitespace-only runs are dropped here; every surviving span
//! is guaranteed non-empty text with strictly positive width and height.
//! This stage never fails — degenerate input yields an empty vector.

use super::median;
use super::source::RawTextRun;
use crate::output::Span;

/// Average glyph advance as a fraction of the font size, used when the
/// source supplies no width.
const WIDTH_PER_CHAR: f64 = 0.6;

/// Normalise one page's raw runs into spans.
pub fn normalize_runs(runs: &[RawTextRun]) -> Vec<Span> {
    runs.iter().filter_map(normalize_run).collect()
}

fn normalize_run(run: &RawTextRun) -> Option<Span> {
    if run.text.trim().is_empty() {
        return None;
    }

    let font_size = derive_font_size(run);
    let char_count = run.text.chars().count() as f64;

    let width = run
        .width
        .filter(|w| *w > 0.0)
        .unwrap_or(WIDTH_PER_CHAR * font_size * char_count);
    let height = run.height.filter(|h| *h > 0.0).unwrap_or(font_size).max(1.0);

    Some(Span {
        text: run.text.clone(),
        x: run.x,
        y: run.y,
        width,
        height,
        font_size,
        font_name: run.font_name.clone(),
        font_family: run.font_family.clone(),
    })
}

/// Median of the positive candidates among explicit height and the two
/// diagonal scale components. Falls back to the explicit height, then to
/// 1.0, when no candidate is positive.
fn derive_font_size(run: &RawTextRun) -> f64 {
    let candidates: Vec<f64> = [run.height.unwrap_or(0.0), run.scale_x.abs(), run.scale_y.abs()]
        .into_iter()
        .filter(|v| *v > 0.0)
        .collect();
    if candidates.is_empty() {
        run.height.filter(|h| *h > 0.0).unwrap_or(1.0)
    } else {
        median(&candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> RawTextRun {
        RawTextRun {
            text: text.into(),
            x: 10.0,
            y: 700.0,
            width: None,
            height: None,
            scale_x: 0.0,
            scale_y: 0.0,
            font_name: None,
            font_family: None,
        }
    }

    #[test]
    fn whitespace_only_runs_are_dropped() {
        let runs = vec![run("  "), run("\t"), run("a")];
        let spans = normalize_runs(&runs);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "a");
    }

    #[test]
    fn font_size_is_median_of_candidates() {
        let mut r = run("x");
        r.height = Some(10.0);
        r.scale_x = 12.0;
        r.scale_y = 14.0;
        let s = normalize_runs(&[r]).remove(0);
        assert_eq!(s.font_size, 12.0);
    }

    #[test]
    fn font_size_from_scale_when_height_missing() {
        let mut r = run("x");
        r.scale_x = 12.0;
        r.scale_y = 12.0;
        let s = normalize_runs(&[r]).remove(0);
        assert_eq!(s.font_size, 12.0);
    }

    #[test]
    fn width_estimated_from_char_count() {
        let mut r = run("Hello");
        r.scale_x = 10.0;
        r.scale_y = 10.0;
        let s = normalize_runs(&[r]).remove(0);
        // 0.6 × 10 pt × 5 chars
        assert_eq!(s.width, 30.0);
    }

    #[test]
    fn explicit_width_wins_over_estimate() {
        let mut r = run("Hello");
        r.width = Some(28.5);
        r.scale_x = 10.0;
        r.scale_y = 10.0;
        let s = normalize_runs(&[r]).remove(0);
        assert_eq!(s.width, 28.5);
    }

    #[test]
    fn height_floors_at_one() {
        let r = run("x"); // no geometry at all
        let s = normalize_runs(&[r]).remove(0);
        assert_eq!(s.font_size, 1.0);
        assert_eq!(s.height, 1.0);
        assert!(s.width > 0.0);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_runs(&[]).is_empty());
    }
}
