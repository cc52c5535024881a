//! Time ↔ pixel mapping and the cursor-anchored zoom transform.

use serde::{Deserialize, Serialize};

use crate::model::{MAX_SCALE, MIN_SCALE};

pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// Multiplicative scale change per zoom step.
const ZOOM_STEP: f64 = 0.1;

/// Bidirectional mapping between absolute time and a linear content-pixel
/// coordinate: `px = (instant − origin) · scale / 1h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeScale {
    /// Pixels per hour, clamped to [`MIN_SCALE`]..=[`MAX_SCALE`].
    px_per_hour: u32,
    /// Instant mapped to pixel 0 — the domain minimum.
    origin_ms: i64,
}

impl TimeScale {
    pub fn new(px_per_hour: u32, origin_ms: i64) -> Self {
        Self {
            px_per_hour: px_per_hour.clamp(MIN_SCALE, MAX_SCALE),
            origin_ms,
        }
    }

    pub fn px_per_hour(&self) -> u32 {
        self.px_per_hour
    }

    pub fn origin_ms(&self) -> i64 {
        self.origin_ms
    }

    pub fn time_to_px(&self, instant_ms: i64) -> f64 {
        (instant_ms - self.origin_ms) as f64 * f64::from(self.px_per_hour) / MS_PER_HOUR
    }

    pub fn px_to_time(&self, px: f64) -> i64 {
        self.origin_ms + (px * MS_PER_HOUR / f64::from(self.px_per_hour)).round() as i64
    }

    /// Width in pixels of a duration.
    pub fn span_px(&self, duration_ms: i64) -> f64 {
        duration_ms as f64 * f64::from(self.px_per_hour) / MS_PER_HOUR
    }
}

/// Scroll/zoom state of the horizontal viewport. Each zoom event reads the
/// latest value before computing its own delta, so rapid interleaved events
/// never corrupt the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    /// Pixels per hour.
    pub scale: u32,
    /// Horizontal scroll offset of the viewport into the content, ≥ 0.
    pub scroll_px: f64,
}

/// One zoom step (±10%) anchored at the cursor.
///
/// The content point under the cursor is converted to an instant at the
/// pre-change scale; after clamping the new scale, the scroll offset is
/// recomputed so that instant falls back under the cursor. A step that
/// clamps to the current scale is a no-op.
pub fn zoom_at_cursor(
    state: ZoomState,
    origin_ms: i64,
    cursor_viewport_px: f64,
    zoom_in: bool,
) -> ZoomState {
    let factor = if zoom_in { 1.0 + ZOOM_STEP } else { 1.0 - ZOOM_STEP };
    let new_scale = (f64::from(state.scale) * factor).round() as u32;
    let new_scale = new_scale.clamp(MIN_SCALE, MAX_SCALE);
    if new_scale == state.scale {
        return state;
    }

    let before = TimeScale::new(state.scale, origin_ms);
    let anchor_ms = before.px_to_time(cursor_viewport_px + state.scroll_px);

    let after = TimeScale::new(new_scale, origin_ms);
    let scroll_px = (after.time_to_px(anchor_ms) - cursor_viewport_px).max(0.0);

    ZoomState {
        scale: new_scale,
        scroll_px,
    }
}
