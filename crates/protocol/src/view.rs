use serde::{Deserialize, Serialize};

use crate::types::{Point, Rect};

/// The derived timeline view — everything a renderer needs to paint one
/// frame: positioned bars grouped into resource rows, axis ticks, and the
/// optional route overlay.
///
/// ```text
///   rows ──▶ Task bars (lane-packed per resource)
///   ticks ─▶ Hour / midnight gridlines
///   route ─▶ Highlighted steps + elbow connectors
/// ```
///
/// Built wholesale by the view composer on every state change; never
/// mutated in place. Serializable so a host can move it across a process
/// or WASM boundary as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineView {
    /// Visible instant range, already padded.
    pub domain: TimeSpan,
    /// Horizontal scale in pixels per hour.
    pub scale: u32,
    /// Total content width in pixels (domain duration at `scale`).
    pub content_width: f64,
    /// Total content height in pixels (sum of row heights).
    pub content_height: f64,
    pub rows: Vec<ResourceRow>,
    pub ticks: AxisTicks,
    pub route: Option<RoutePath>,
}

impl TimelineView {
    /// All bars across all rows, top to bottom.
    pub fn bars(&self) -> impl Iterator<Item = &TaskBar> {
        self.rows.iter().flat_map(|row| row.bars.iter())
    }
}

/// A half-open instant range in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeSpan {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// One horizontal resource row: its lane-packed bars and vertical extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRow {
    pub resource: String,
    /// Top edge in content pixels.
    pub top: f64,
    /// Full row height including lane gaps and padding.
    pub height: f64,
    pub lane_count: usize,
    pub bars: Vec<TaskBar>,
}

/// A positioned task bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskBar {
    pub identifier: String,
    pub resource: String,
    pub start_ms: i64,
    pub end_ms: i64,
    pub quantity: Option<f64>,
    /// Sub-row within the resource row.
    pub lane: usize,
    pub rect: Rect,
}

/// Axis tick positions: minor at hour boundaries, major at local midnights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxisTicks {
    pub minor_ms: Vec<i64>,
    pub major_ms: Vec<i64>,
}

/// Elbow connector between two consecutive route steps, drawn as a
/// four-point polyline: horizontal out of the earlier bar, vertical to the
/// later bar's center line, horizontal into the later bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub points: [Point; 4],
}

/// The active route: chronologically ordered steps sharing one identifier,
/// plus the connectors linking consecutive steps (oldest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePath {
    pub identifier: String,
    pub steps: Vec<TaskBar>,
    pub connectors: Vec<Connector>,
}
