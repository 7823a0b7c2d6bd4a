//! Per-page assembly: run the stages for one page and build the
//! [`PageResult`].
//!
//! Classification and column resolution both read the block list and are
//! independent of each other; this module runs them and combines their
//! outputs — classified chunks emitted in resolved reading order — plus
//! the whitespace-normalised text concatenation and the page statistics
//! the outline planner uses for weighting.
//!
//! This function is total: any raw-run input, including none at all,
//! yields a well-formed result.

use super::{block, classify, column, line, median, source::RawTextRun, span};
use crate::config::ExtractConfig;
use crate::output::{round2, Chunk, FontInfo, PageResult, PageStats, Span};

/// Assemble the extraction result for one page.
pub fn assemble_page(page: usize, runs: &[RawTextRun], cfg: &ExtractConfig) -> PageResult {
    let spans = span::normalize_runs(runs);
    if spans.is_empty() {
        return PageResult {
            page,
            text: String::new(),
            chunks: Vec::new(),
            stats: PageStats::default(),
        };
    }

    let page_width = spans.iter().map(Span::right).fold(0.0, f64::max);

    let lines = line::group_lines(spans, cfg);
    let blocks: Vec<block::LineBlock> = lines.into_iter().map(block::build_block).collect();

    let sizes: Vec<f64> = blocks.iter().map(|b| b.font_size).collect();
    let max_font = sizes.iter().copied().fold(0.0, f64::max);
    let median_font = median(&sizes);
    let line_count = blocks.len();

    let kinds = classify::classify_blocks(&blocks, max_font, median_font, cfg);
    let chunks: Vec<Chunk> = blocks
        .into_iter()
        .zip(kinds)
        .map(|(b, kind)| Chunk {
            kind,
            text: b.text,
            bbox: b.bbox.rounded(),
            font: FontInfo {
                size: round2(b.font_size),
                family: b.font_family,
                bold: b.bold,
                italic: b.italic,
            },
            spans: b.spans.iter().map(Span::rounded).collect(),
        })
        .collect();

    let columns = column::resolve_columns(chunks, page_width, cfg);
    let column_boundaries: Vec<f64> = columns.iter().map(|c| round2(c.x)).collect();
    let column_count = columns.len();

    let ordered: Vec<Chunk> = columns.into_iter().flat_map(|c| c.chunks).collect();
    let text = page_text(&ordered, cfg.max_chars_per_page);

    PageResult {
        page,
        text,
        chunks: ordered,
        stats: PageStats {
            max_font: round2(max_font),
            median_font: round2(median_font),
            line_count,
            columns: column_count,
            column_boundaries,
        },
    }
}

/// Reading-order concatenation: one line per chunk, internal whitespace
/// collapsed, truncated on a character boundary to the configured budget.
fn page_text(chunks: &[Chunk], max_chars: usize) -> String {
    let joined = chunks
        .iter()
        .map(|c| c.text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    truncate_chars(joined, max_chars)
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            text.truncate(byte_idx);
            text
        }
        None => text,
    }
}
