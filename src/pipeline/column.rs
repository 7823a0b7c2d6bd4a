//! Column detection and reading-order resolution.
//!
//! Multi-column layouts break naive top-to-bottom ordering: interleaving
//! the two columns of a paper by y-coordinate produces word salad. This
//! stage clusters blocks horizontally and emits them column by column.
//!
//! The clustering is single-linkage in one dimension: sort blocks by
//! horizontal midpoint and cut wherever the gap between consecutive
//! midpoints exceeds a **gutter threshold**,
//! `max(12, min(0.12 × page_width, 0.8 × median_block_width))`.
//! Midpoints rather than edges make the cut robust to ragged line
//! lengths, and the absolute floor keeps sparse pages from degenerating
//! into a column per block.
//!
//! Detected columns narrower than `max(40, 0.08 × page_width)` are stray
//! side-annotations or page numbers, not real columns; they are merged
//! into the nearest preceding column (the following one when they lead
//! the page) so downstream ordering never sees a spurious column.

use crate::config::ExtractConfig;
use crate::output::Chunk;
use crate::pipeline::median;

/// A horizontal cluster of chunks: one reading-order column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Left edge of the cluster's bounding range.
    pub x: f64,
    /// Width of the cluster's bounding range.
    pub width: f64,
    /// Member chunks, sorted top-to-bottom (ties left-to-right).
    pub chunks: Vec<Chunk>,
}

impl Column {
    fn from_chunks(mut chunks: Vec<Chunk>) -> Column {
        sort_reading_order(&mut chunks);
        let x = chunks
            .iter()
            .map(|c| c.bbox.x)
            .fold(f64::INFINITY, f64::min);
        let right = chunks
            .iter()
            .map(|c| c.bbox.x + c.bbox.width)
            .fold(f64::NEG_INFINITY, f64::max);
        Column {
            x,
            width: (right - x).max(0.0),
            chunks,
        }
    }

    fn absorb(&mut self, other: Column) {
        self.chunks.extend(other.chunks);
        sort_reading_order(&mut self.chunks);
        let right = (self.x + self.width).max(other.x + other.width);
        self.x = self.x.min(other.x);
        self.width = right - self.x;
    }
}

/// Resolve columns and reading order for one page's classified chunks.
///
/// Returns columns sorted left-to-right, each with its chunks sorted
/// top-to-bottom. Zero chunks yield zero columns; a single chunk is a
/// trivial single-column result.
pub fn resolve_columns(chunks: Vec<Chunk>, page_width: f64, cfg: &ExtractConfig) -> Vec<Column> {
    if chunks.is_empty() {
        return Vec::new();
    }
    if chunks.len() == 1 {
        return vec![Column::from_chunks(chunks)];
    }

    let widths: Vec<f64> = chunks.iter().map(|c| c.bbox.width).collect();
    let gutter = cfg
        .gutter_floor
        .max((0.12 * page_width).min(0.8 * median(&widths)));

    // Single-linkage 1-D clustering on midpoints.
    let mut sorted = chunks;
    sorted.sort_by(|a, b| {
        a.bbox
            .mid_x()
            .total_cmp(&b.bbox.mid_x())
            .then(a.bbox.x.total_cmp(&b.bbox.x))
            .then(b.bbox.y.total_cmp(&a.bbox.y))
    });

    let mut clusters: Vec<Vec<Chunk>> = Vec::new();
    let mut prev_mid = f64::NEG_INFINITY;
    for chunk in sorted {
        let mid = chunk.bbox.mid_x();
        match clusters.last_mut() {
            Some(cluster) if mid - prev_mid <= gutter => cluster.push(chunk),
            _ => clusters.push(vec![chunk]),
        }
        prev_mid = mid;
    }

    let mut columns: Vec<Column> = clusters.into_iter().map(Column::from_chunks).collect();
    columns.sort_by(|a, b| a.x.total_cmp(&b.x));
    if columns.len() == 1 {
        return columns;
    }

    // Merge stray narrow columns into their neighbours.
    let floor = cfg.narrow_column_floor.max(0.08 * page_width);
    let mut merged: Vec<Column> = Vec::new();
    for column in columns {
        match merged.last_mut() {
            Some(prev) if column.width < floor => prev.absorb(column),
            _ => merged.push(column),
        }
    }
    while merged.len() > 1 && merged[0].width < floor {
        let head = merged.remove(0);
        merged[0].absorb(head);
    }
    merged
}

/// Top-to-bottom (larger y first), ties broken left-to-right.
fn sort_reading_order(chunks: &mut [Chunk]) {
    chunks.sort_by(|a, b| {
        b.bbox
            .y
            .total_cmp(&a.bbox.y)
            .then(a.bbox.x.total_cmp(&b.bbox.x))
    });
}
