//! Flat derivations of the composed view: tabular export rows and the
//! geometry bounding box for snapshot export.

use laneboard_protocol::{ExportRow, Rect, TimelineView};

use crate::ingest::dates;

/// One export record per visible bar, in row order (top to bottom).
pub fn export_rows(view: &TimelineView) -> Vec<ExportRow> {
    view.bars()
        .map(|bar| ExportRow {
            identifier: bar.identifier.clone(),
            resource: bar.resource.clone(),
            start: dates::format_instant(bar.start_ms),
            end: dates::format_instant(bar.end_ms),
            quantity: bar.quantity,
            duration_minutes: ((bar.end_ms - bar.start_ms) as f64 / 60_000.0).round() as i64,
        })
        .collect()
}

/// Bounding box of the content: the full content area, widened if any bar
/// geometry spills past it.
pub fn content_bounds(view: &TimelineView) -> Rect {
    let content = Rect::new(0.0, 0.0, view.content_width, view.content_height);
    view.bars().fold(content, |acc, bar| acc.union(&bar.rect))
}
