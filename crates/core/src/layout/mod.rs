pub mod lanes;
pub mod scale;

pub use lanes::{LANE_EPSILON_MS, LaneAssignment, pack_lanes};
pub use scale::{TimeScale, ZoomState, zoom_at_cursor};
