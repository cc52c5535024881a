//! Greedy lane packing: overlapping tasks on one resource are spread over
//! parallel sub-rows using the earliest available lane.

use crate::model::Task;

/// Tasks whose intervals overlap by no more than this still share a lane.
/// Keeps back-to-back operations with sloppy minute rounding on one line.
pub const LANE_EPSILON_MS: i64 = 60_000;

/// Lane indices parallel to the input slice, plus the number of lanes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    pub lanes: Vec<usize>,
    /// At least 1, so an empty resource still reserves one row.
    pub lane_count: usize,
}

/// Assign each task of one resource a lane such that no two concurrently
/// active tasks share one.
///
/// Tasks are processed in start order (a stable index sort; equal starts
/// keep their input order, which for canonical input means identifier
/// order). Each task takes the first lane whose last occupant ends no
/// later than `start + LANE_EPSILON_MS`, opening a new lane otherwise.
/// Greedy interval coloring — O(n·lanes), minimal for exact overlap and
/// close enough under the epsilon fuzz.
pub fn pack_lanes(tasks: &[Task]) -> LaneAssignment {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by_key(|&i| tasks[i].start_ms);

    let mut lane_ends: Vec<i64> = Vec::new();
    let mut lanes = vec![0usize; tasks.len()];

    for idx in order {
        let task = &tasks[idx];
        let lane = lane_ends
            .iter()
            .position(|&end| end <= task.start_ms + LANE_EPSILON_MS);
        let lane = match lane {
            Some(lane) => {
                lane_ends[lane] = task.end_ms;
                lane
            }
            None => {
                lane_ends.push(task.end_ms);
                lane_ends.len() - 1
            }
        };
        lanes[idx] = lane;
    }

    LaneAssignment {
        lanes,
        lane_count: lane_ends.len().max(1),
    }
}
