//! Pipeline stages for structured text extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different line-clustering strategy)
//! without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! source ──▶ span ──▶ line ──▶ block ──┬──▶ classify ──┐
//! (pdfium)  (normalise) (group) (aggregate)            ├──▶ assemble
//!                                      └──▶ column ────┘
//! ```
//!
//! 1. [`source`]   — pull raw positioned glyph-run records out of pdfium
//! 2. [`span`]     — normalise runs into [`crate::output::Span`] records,
//!    estimating missing geometry
//! 3. [`line`]     — cluster spans into visual lines (dynamic tolerance,
//!    bimodal post-split for over-merged table rows)
//! 4. [`block`]    — aggregate each line into one block: joined text,
//!    representative font, bounding box
//! 5. [`classify`] — label blocks heading / list / paragraph from the
//!    page's own font distribution
//! 6. [`column`]   — detect columns and emit blocks in reading order
//! 7. [`assemble`] — run 2–6 for one page and build the `PageResult`
//!
//! Classification (5) and column resolution (6) are independent of each
//! other; both read the block list produced by (4) and their outputs are
//! combined by (7).

pub mod assemble;
pub mod block;
pub mod classify;
pub mod column;
pub mod line;
pub mod source;
pub mod span;

/// Median of a slice, averaging the two middle elements for even lengths.
///
/// Sorts a scratch copy with a total order so NaN inputs cannot poison the
/// comparison (they sort last and are effectively ignored by callers, which
/// only pass finite measurements).
pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::median;

    #[test]
    fn median_of_empty_is_zero() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn median_odd_picks_middle() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn median_even_averages_middles() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }
}
