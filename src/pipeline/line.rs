//! Line grouping: cluster spans into visual text lines.
//!
//! A PDF page is a bag of positioned glyph runs with no line structure.
//! This stage reconstructs lines by clustering span baselines:
//!
//! 1. Compute a **dynamic vertical tolerance** from the page's own glyph
//!    metrics (median height/font measure, clamped, with a jitter bump
//!    when baselines spread more than clean text would).
//! 2. Greedily assign each span to the first line whose running mean
//!    baseline is within tolerance and whose font sizes stay within a
//!    bounded ratio of the span's. The ratio guard stops a heading from
//!    swallowing an adjacent smaller line that shares its baseline band.
//! 3. Post-split: a greedy running mean can drift and fuse two tight
//!    table rows into one line. Any line whose baseline spread exceeds
//!    `max(1.5 × tolerance, 0.65 × median font)` gets a 2-cluster 1-D
//!    k-means split on baselines, accepted only when both halves are
//!    non-empty.
//! 4. Sort lines top-to-bottom (mean baseline descending — larger y is
//!    higher on the page), ties broken by leftmost x ascending. Spans
//!    within a line sort left-to-right. Both sorts are total, so output
//!    order is reproducible run to run.

use super::median;
use crate::config::ExtractConfig;
use crate::output::Span;

/// Fraction of the median glyph measure used as the base tolerance.
/// Roughly a third of the em box: comfortably above sub-point baseline
/// jitter, comfortably below single-spaced leading.
const TOLERANCE_FACTOR: f64 = 0.28;

/// Upper bound (as a multiple of the base tolerance) on the jitter bump.
/// Gaps beyond this are real line leading, not jitter.
const JITTER_CEILING: f64 = 2.2;

/// Group one page's spans into visual lines.
///
/// Zero spans yield zero lines; spans on one shared baseline yield one
/// line. Every input span lands in exactly one output line.
pub fn group_lines(spans: Vec<Span>, cfg: &ExtractConfig) -> Vec<Vec<Span>> {
    if spans.is_empty() {
        return Vec::new();
    }
    let tol = vertical_tolerance(&spans, cfg);

    // Greedy assignment against running mean baselines.
    let mut lines: Vec<LineAccum> = Vec::new();
    for span in spans {
        let b = span.baseline_y();
        let slot = lines
            .iter()
            .position(|line| (b - line.mean()).abs() <= tol && line.font_compatible(&span, cfg));
        match slot {
            Some(i) => lines[i].push(span),
            None => lines.push(LineAccum::new(span)),
        }
    }

    // Post-split pass for over-merged lines.
    let mut result: Vec<Vec<Span>> = Vec::new();
    for line in lines {
        let spread = line.max_baseline - line.min_baseline;
        let fonts: Vec<f64> = line.spans.iter().map(|s| s.font_size).collect();
        let limit = (1.5 * tol).max(0.65 * median(&fonts));
        if spread > limit {
            match split_bimodal(line.spans) {
                Ok((lo, hi)) => {
                    result.push(lo);
                    result.push(hi);
                }
                Err(spans) => result.push(spans),
            }
        } else {
            result.push(line.spans);
        }
    }

    // Deterministic ordering: top-to-bottom, then left-to-right.
    for line in &mut result {
        line.sort_by(|a, b| a.x.total_cmp(&b.x).then(b.y.total_cmp(&a.y)));
    }
    result.sort_by(|a, b| {
        mean_baseline(b)
            .total_cmp(&mean_baseline(a))
            .then(min_x(a).total_cmp(&min_x(b)))
    });
    result
}

/// Dynamic vertical tolerance for this page.
///
/// Base: `TOLERANCE_FACTOR ×` the median of each span's
/// `max(height, font_size)` measure, clamped to the configured range.
/// Jitter bump: when the median nearest-neighbour baseline gap sits just
/// above the base tolerance (but below obvious line leading), the page's
/// baselines are noisier than clean text — scans and OCR overlays do this
/// — and the tolerance is lifted to just cover that gap.
fn vertical_tolerance(spans: &[Span], cfg: &ExtractConfig) -> f64 {
    let measures: Vec<f64> = spans.iter().map(|s| s.height.max(s.font_size)).collect();
    let base = (TOLERANCE_FACTOR * median(&measures))
        .clamp(cfg.line_tolerance_min, cfg.line_tolerance_max);

    if spans.len() < 2 {
        return base;
    }
    let baselines: Vec<f64> = spans.iter().map(Span::baseline_y).collect();
    let mut gaps = Vec::with_capacity(baselines.len());
    for (i, b) in baselines.iter().enumerate() {
        let nearest = baselines
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, other)| (b - other).abs())
            .fold(f64::INFINITY, f64::min);
        gaps.push(nearest);
    }
    let med_gap = median(&gaps);
    if med_gap > base && med_gap <= JITTER_CEILING * base {
        med_gap * 1.05
    } else {
        base
    }
}

/// Split a line's spans into two baseline clusters with 1-D 2-means.
///
/// Centres initialise at the extreme baselines and settle in a handful of
/// Lloyd iterations (1-D, two clusters). Returns `Err` with the original
/// spans when one cluster would be empty, which only happens when every
/// baseline coincides — and such lines never exceed the spread limit.
fn split_bimodal(spans: Vec<Span>) -> Result<(Vec<Span>, Vec<Span>), Vec<Span>> {
    let baselines: Vec<f64> = spans.iter().map(Span::baseline_y).collect();
    let mut lo = baselines.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = baselines.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    for _ in 0..8 {
        let (mut lo_sum, mut lo_n, mut hi_sum, mut hi_n) = (0.0, 0usize, 0.0, 0usize);
        for &b in &baselines {
            if (b - lo).abs() <= (b - hi).abs() {
                lo_sum += b;
                lo_n += 1;
            } else {
                hi_sum += b;
                hi_n += 1;
            }
        }
        if lo_n == 0 || hi_n == 0 {
            return Err(spans);
        }
        let (new_lo, new_hi) = (lo_sum / lo_n as f64, hi_sum / hi_n as f64);
        if new_lo == lo && new_hi == hi {
            break;
        }
        lo = new_lo;
        hi = new_hi;
    }

    let mut low_half = Vec::new();
    let mut high_half = Vec::new();
    for span in spans {
        let b = span.baseline_y();
        if (b - lo).abs() <= (b - hi).abs() {
            low_half.push(span);
        } else {
            high_half.push(span);
        }
    }
    if low_half.is_empty() || high_half.is_empty() {
        low_half.extend(high_half);
        return Err(low_half);
    }
    Ok((low_half, high_half))
}

fn mean_baseline(spans: &[Span]) -> f64 {
    spans.iter().map(Span::baseline_y).sum::<f64>() / spans.len() as f64
}

fn min_x(spans: &[Span]) -> f64 {
    spans.iter().map(|s| s.x).fold(f64::INFINITY, f64::min)
}

/// Running accumulator for one line during the greedy pass.
struct LineAccum {
    spans: Vec<Span>,
    baseline_sum: f64,
    min_baseline: f64,
    max_baseline: f64,
    min_font: f64,
    max_font: f64,
}

impl LineAccum {
    fn new(span: Span) -> Self {
        let b = span.baseline_y();
        let f = span.font_size;
        Self {
            spans: vec![span],
            baseline_sum: b,
            min_baseline: b,
            max_baseline: b,
            min_font: f,
            max_font: f,
        }
    }

    fn mean(&self) -> f64 {
        self.baseline_sum / self.spans.len() as f64
    }

    /// Would adding `span` keep all member font sizes within the ratio
    /// limit of each other?
    fn font_compatible(&self, span: &Span, cfg: &ExtractConfig) -> bool {
        let lo = self.min_font.min(span.font_size);
        let hi = self.max_font.max(span.font_size);
        lo <= 0.0 || hi / lo <= cfg.font_ratio_limit
    }

    fn push(&mut self, span: Span) {
        let b = span.baseline_y();
        self.baseline_sum += b;
        self.min_baseline = self.min_baseline.min(b);
        self.max_baseline = self.max_baseline.max(b);
        self.min_font = self.min_font.min(span.font_size);
        self.max_font = self.max_font.max(span.font_size);
        self.spans.push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f64, y: f64, font: f64) -> Span {
        Span {
            text: text.into(),
            x,
            y,
            width: 10.0,
            height: font,
            font_size: font,
            font_name: None,
            font_family: None,
        }
    }

    #[test]
    fn zero_spans_zero_lines() {
        assert!(group_lines(vec![], &ExtractConfig::default()).is_empty());
    }

    #[test]
    fn identical_baselines_form_one_line() {
        let cfg = ExtractConfig::default();
        let spans = vec![
            span("a", 0.0, 700.0, 12.0),
            span("b", 20.0, 700.0, 12.0),
            span("c", 40.0, 700.0, 12.0),
        ];
        let lines = group_lines(spans, &cfg);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn separate_lines_sorted_top_to_bottom() {
        let cfg = ExtractConfig::default();
        // Bottom line first in input order; output must be top-first.
        let spans = vec![
            span("low", 0.0, 650.0, 12.0),
            span("high", 0.0, 700.0, 12.0),
        ];
        let lines = group_lines(spans, &cfg);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].text, "high");
        assert_eq!(lines[1][0].text, "low");
    }

    #[test]
    fn spans_within_line_sorted_left_to_right() {
        let cfg = ExtractConfig::default();
        let spans = vec![
            span("world", 50.0, 700.0, 12.0),
            span("hello", 0.0, 700.0, 12.0),
        ];
        let lines = group_lines(spans, &cfg);
        assert_eq!(lines[0][0].text, "hello");
        assert_eq!(lines[0][1].text, "world");
    }

    #[test]
    fn font_ratio_guard_keeps_heading_apart() {
        let cfg = ExtractConfig::default();
        // Same baseline band, but 24 pt vs 10 pt exceeds the 1.6× limit.
        let heading = span("Title", 0.0, 700.0, 24.0);
        let caption = Span {
            height: 10.0,
            ..span("fig", 200.0, 714.0, 10.0)
        };
        // baseline: 700+24=724 vs 714+10=724 — identical.
        let lines = group_lines(vec![heading, caption], &cfg);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn overmerged_table_rows_are_split() {
        // Force a fixed tolerance of 3 pt so greedy mean drift fuses two
        // jittery table rows, then verify the bimodal pass pulls them
        // back apart with their original members intact.
        let cfg = ExtractConfig::builder()
            .line_tolerance(3.0, 3.0)
            .build()
            .unwrap();
        // Baselines (y + font 6): hi row {102, 103.4}, lo row {99.2, 98.7}.
        // Greedy in this input order accepts all four into one line:
        // 102 → mean 102; 99.2 (Δ2.8) → 100.6; 103.4 (Δ2.8) → 101.53;
        // 98.7 (Δ2.83) → merged. Spread 4.7 > max(1.5×3, 0.65×6) = 4.5.
        let rows = vec![
            span("a1", 0.0, 96.0, 6.0),
            span("b1", 0.0, 93.2, 6.0),
            span("a2", 30.0, 97.4, 6.0),
            span("b2", 30.0, 92.7, 6.0),
        ];
        let lines = group_lines(rows, &cfg);
        assert_eq!(lines.len(), 2, "expected bimodal split into two rows");
        let texts: Vec<Vec<&str>> = lines
            .iter()
            .map(|l| l.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(texts[0], vec!["a1", "a2"]);
        assert_eq!(texts[1], vec!["b1", "b2"]);
    }

    #[test]
    fn single_shared_baseline_never_splits() {
        let cfg = ExtractConfig::default();
        let spans = vec![span("a", 0.0, 700.0, 12.0), span("b", 15.0, 700.0, 12.0)];
        let lines = group_lines(spans, &cfg);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn grouping_is_deterministic() {
        let cfg = ExtractConfig::default();
        let spans = vec![
            span("a", 10.0, 700.0, 12.0),
            span("b", 10.0, 685.0, 12.0),
            span("c", 10.0, 670.0, 12.0),
        ];
        let first = group_lines(spans.clone(), &cfg);
        let second = group_lines(spans, &cfg);
        assert_eq!(first, second);
    }
}
