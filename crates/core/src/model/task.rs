use serde::{Deserialize, Serialize};

/// A canonical scheduled task — one bar on the timeline.
///
/// Instants are epoch milliseconds. Tasks are immutable: the whole list is
/// rebuilt when source rows or the field mapping change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Non-empty order/job identifier. Several tasks sharing one identifier
    /// across resources form a route.
    pub identifier: String,
    /// Non-empty resource (machine, station) the task occupies.
    pub resource: String,
    pub start_ms: i64,
    /// Strictly greater than `start_ms`.
    pub end_ms: i64,
    pub quantity: Option<f64>,
}

impl Task {
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// Optional visibility window narrowing the timeline, independent of zoom.
///
/// Both bounds are exclusive in the half-open sense: a task ending exactly
/// at `from_ms` or starting exactly at `to_ms` is outside the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
}

impl TimeWindow {
    pub fn new(from_ms: Option<i64>, to_ms: Option<i64>) -> Self {
        Self { from_ms, to_ms }
    }

    /// Whether a task is at least partly inside the window. Unset bounds
    /// impose no constraint.
    pub fn admits(&self, task: &Task) -> bool {
        if let Some(from) = self.from_ms
            && task.end_ms <= from
        {
            return false;
        }
        if let Some(to) = self.to_ms
            && task.start_ms >= to
        {
            return false;
        }
        true
    }

    pub fn is_unbounded(&self) -> bool {
        self.from_ms.is_none() && self.to_ms.is_none()
    }
}
