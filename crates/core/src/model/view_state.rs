use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::TimeWindow;

/// Minimum horizontal scale, pixels per hour.
pub const MIN_SCALE: u32 = 30;
/// Maximum horizontal scale, pixels per hour.
pub const MAX_SCALE: u32 = 300;

const DEFAULT_SCALE: u32 = 60;

/// The single source of truth for one open session.
///
/// Every derived structure (filtered tasks, layout, ticks, route) is a pure
/// function of this value plus the canonical task list. Mutation always
/// builds a new `ViewState`; nothing downstream is patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Pixels per hour, always within [`MIN_SCALE`]..=[`MAX_SCALE`].
    scale: u32,
    pub window: TimeWindow,
    /// Free-text identifier query. A route match overrides all other filters.
    pub query: String,
    /// Explicit multi-resource selection; empty means "all".
    pub selected_resources: BTreeSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            window: TimeWindow::default(),
            query: String::new(),
            selected_resources: BTreeSet::new(),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// New state with the scale clamped into the valid range.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_selection<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_resources = resources.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
