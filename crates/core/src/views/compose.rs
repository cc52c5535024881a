//! The view composer: a pure function of (canonical tasks, view state,
//! now) producing the full derived timeline view — visible tasks, resource
//! rows with lane-packed geometry, axis ticks, and the route overlay.

use laneboard_protocol::{Rect, ResourceRow, RoutePath, TaskBar, TimeSpan, TimelineView};

use crate::collate::natural_cmp;
use crate::layout::{TimeScale, pack_lanes};
use crate::model::{Task, TimeWindow, ViewState};
use crate::views::{axis, route};

/// Margin added to each side of the task-derived domain.
const DOMAIN_PAD_MS: i64 = 3_600_000;
/// Half-width of the default domain when nothing is visible.
const EMPTY_HALF_SPAN_MS: i64 = 12 * 3_600_000;

const LANE_GAP_PX: f64 = 6.0;
const ROW_PAD_PX: f64 = 10.0;
const BAR_HEIGHT_BASE_PX: f64 = 26.0;
const BAR_HEIGHT_MID_PX: f64 = 32.0;
const BAR_HEIGHT_WIDE_PX: f64 = 40.0;

/// Compose the derived view. `now_ms` anchors the empty-state domain and
/// is passed in so composition stays a pure function.
pub fn compose(tasks: &[Task], state: &ViewState, now_ms: i64) -> TimelineView {
    let route_steps = route::find_route(tasks, &state.query);
    let visible = visible_tasks(tasks, route_steps.as_deref(), state);

    let effective: &[&Task] = match &route_steps {
        Some(steps) => steps,
        None => &visible,
    };
    let domain = domain_of(effective, &state.window, now_ms);
    let scale = TimeScale::new(state.scale(), domain.start_ms);

    let render_resources = resources_to_render(tasks, &visible, route_steps.is_some(), state);

    let mut rows = Vec::with_capacity(render_resources.len());
    let mut top = 0.0;
    for resource in &render_resources {
        let row = build_row(resource, &visible, &scale, top);
        top += row.height;
        rows.push(row);
    }

    let route = route_steps
        .filter(|_| !visible.is_empty())
        .map(|_| build_route_path(&visible, &rows));

    TimelineView {
        domain,
        scale: scale.px_per_hour(),
        content_width: scale.time_to_px(domain.end_ms),
        content_height: top,
        ticks: axis::build_ticks(domain),
        rows,
        route,
    }
}

/// Filter precedence: an active route shows only its tasks, further
/// narrowed by selection and window. Without a route, an explicit
/// selection restricts by resource; otherwise a non-empty query restricts
/// by identifier substring.
fn visible_tasks<'a>(
    tasks: &'a [Task],
    route_steps: Option<&[&'a Task]>,
    state: &ViewState,
) -> Vec<&'a Task> {
    let needle = state.query.trim().to_lowercase();
    let selected = &state.selected_resources;

    let candidates: Vec<&Task> = match route_steps {
        Some(steps) => steps
            .iter()
            .copied()
            .filter(|t| selected.is_empty() || selected.contains(&t.resource))
            .collect(),
        None => tasks
            .iter()
            .filter(|t| {
                if !selected.is_empty() {
                    selected.contains(&t.resource)
                } else if !needle.is_empty() {
                    t.identifier.to_lowercase().contains(&needle)
                } else {
                    true
                }
            })
            .collect(),
    };

    candidates
        .into_iter()
        .filter(|t| state.window.admits(t))
        .collect()
}

/// Domain = [min start, max end] of the effective set, widened by explicit
/// window bounds, padded one hour each side. Empty set falls back to
/// now ± 12h, each side replaced by an explicit window bound if set.
fn domain_of(effective: &[&Task], window: &TimeWindow, now_ms: i64) -> TimeSpan {
    let min_start = effective.iter().map(|t| t.start_ms).min();
    let max_end = effective.iter().map(|t| t.end_ms).max();

    let (Some(mut start), Some(mut end)) = (min_start, max_end) else {
        let start = window.from_ms.unwrap_or(now_ms - EMPTY_HALF_SPAN_MS);
        let end = window.to_ms.unwrap_or(now_ms + EMPTY_HALF_SPAN_MS);
        return TimeSpan::new(start, end.max(start + DOMAIN_PAD_MS));
    };

    if let Some(from) = window.from_ms {
        start = start.min(from);
    }
    if let Some(to) = window.to_ms {
        end = end.max(to);
    }
    TimeSpan::new(start - DOMAIN_PAD_MS, end + DOMAIN_PAD_MS)
}

/// Route resources win, then the explicit selection intersected with the
/// resource universe, then the full universe — all naturally sorted.
fn resources_to_render(
    tasks: &[Task],
    visible: &[&Task],
    route_active: bool,
    state: &ViewState,
) -> Vec<String> {
    let mut resources: Vec<String> = if route_active {
        visible.iter().map(|t| t.resource.clone()).collect()
    } else if !state.selected_resources.is_empty() {
        tasks
            .iter()
            .filter(|t| state.selected_resources.contains(&t.resource))
            .map(|t| t.resource.clone())
            .collect()
    } else {
        tasks.iter().map(|t| t.resource.clone()).collect()
    };
    resources.sort_by(|a, b| natural_cmp(a, b));
    resources.dedup();
    resources
}

fn bar_height(width_px: f64) -> f64 {
    if width_px >= 220.0 {
        BAR_HEIGHT_WIDE_PX
    } else if width_px >= 120.0 {
        BAR_HEIGHT_MID_PX
    } else {
        BAR_HEIGHT_BASE_PX
    }
}

/// Lane-pack one resource's visible tasks and position its bars. Lanes
/// stack top to bottom with fixed gaps inside the row's vertical padding;
/// a bar shorter than its lane is centered within it.
fn build_row(resource: &str, visible: &[&Task], scale: &TimeScale, top: f64) -> ResourceRow {
    let row_tasks: Vec<Task> = visible
        .iter()
        .filter(|t| t.resource == resource)
        .map(|&t| t.clone())
        .collect();

    let assignment = pack_lanes(&row_tasks);
    let heights: Vec<f64> = row_tasks
        .iter()
        .map(|t| bar_height(scale.span_px(t.duration_ms())))
        .collect();

    let mut lane_heights = vec![0.0f64; assignment.lane_count];
    for (i, &lane) in assignment.lanes.iter().enumerate() {
        lane_heights[lane] = lane_heights[lane].max(heights[i]);
    }
    for h in &mut lane_heights {
        if *h == 0.0 {
            *h = BAR_HEIGHT_BASE_PX;
        }
    }

    let mut lane_tops = Vec::with_capacity(lane_heights.len());
    let mut offset = ROW_PAD_PX;
    for h in &lane_heights {
        lane_tops.push(offset);
        offset += h + LANE_GAP_PX;
    }
    let height = ROW_PAD_PX * 2.0
        + lane_heights.iter().sum::<f64>()
        + LANE_GAP_PX * (lane_heights.len() - 1) as f64;

    let bars = row_tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let lane = assignment.lanes[i];
            let w = scale.span_px(task.duration_ms());
            let h = heights[i];
            let y = top + lane_tops[lane] + (lane_heights[lane] - h) / 2.0;
            TaskBar {
                identifier: task.identifier.clone(),
                resource: task.resource.clone(),
                start_ms: task.start_ms,
                end_ms: task.end_ms,
                quantity: task.quantity,
                lane,
                rect: Rect::new(scale.time_to_px(task.start_ms), y, w, h),
            }
        })
        .collect();

    ResourceRow {
        resource: resource.to_string(),
        top,
        height,
        lane_count: assignment.lane_count,
        bars,
    }
}

/// Collect the visible route steps' bars in chronological order and link
/// consecutive steps with connectors.
fn build_route_path(visible: &[&Task], rows: &[ResourceRow]) -> RoutePath {
    let mut ordered: Vec<&Task> = visible.to_vec();
    ordered.sort_by_key(|t| t.start_ms);

    let mut used: Vec<(usize, usize)> = Vec::new();
    let mut steps = Vec::with_capacity(ordered.len());
    for task in &ordered {
        let found = rows.iter().enumerate().find_map(|(ri, row)| {
            row.bars.iter().enumerate().find_map(|(bi, bar)| {
                let matches = bar.identifier == task.identifier
                    && bar.resource == task.resource
                    && bar.start_ms == task.start_ms
                    && bar.end_ms == task.end_ms
                    && !used.contains(&(ri, bi));
                matches.then_some((ri, bi))
            })
        });
        if let Some((ri, bi)) = found {
            used.push((ri, bi));
            steps.push(rows[ri].bars[bi].clone());
        }
    }

    let connectors = route::build_connectors(&steps);
    let identifier = steps
        .first()
        .map(|s| s.identifier.clone())
        .unwrap_or_default();
    RoutePath {
        identifier,
        steps,
        connectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::model::{MAX_SCALE, MIN_SCALE};
    use chrono::NaiveDate;

    fn ms_of(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(i64::MIN)
    }

    fn task(id: &str, resource: &str, start_ms: i64, end_ms: i64) -> Task {
        Task {
            identifier: id.into(),
            resource: resource.into(),
            start_ms,
            end_ms,
            quantity: None,
        }
    }

    const H: i64 = 3_600_000;
    const NOW: i64 = 1_736_500_000_000;

    #[test]
    fn empty_state_defaults_to_day_around_now() {
        let view = compose(&[], &ViewState::new(), NOW);
        assert_eq!(view.domain.start_ms, NOW - 12 * H);
        assert_eq!(view.domain.end_ms, NOW + 12 * H);
        assert!(view.rows.is_empty());
        assert!(view.route.is_none());
    }

    #[test]
    fn empty_state_honors_window_bounds() {
        let state = ViewState::new().with_window(TimeWindow::new(Some(0), None));
        let view = compose(&[], &state, NOW);
        assert_eq!(view.domain.start_ms, 0);
        assert_eq!(view.domain.end_ms, NOW + 12 * H);
    }

    #[test]
    fn domain_is_padded_one_hour() {
        let tasks = vec![task("1", "A", 10 * H, 12 * H)];
        let view = compose(&tasks, &ViewState::new(), NOW);
        assert_eq!(view.domain, TimeSpan::new(9 * H, 13 * H));
    }

    #[test]
    fn window_bounds_expand_the_domain() {
        let tasks = vec![task("1", "A", 10 * H, 12 * H)];
        let state = ViewState::new().with_window(TimeWindow::new(Some(2 * H), Some(20 * H)));
        let view = compose(&tasks, &state, NOW);
        assert_eq!(view.domain, TimeSpan::new(H, 21 * H));
    }

    #[test]
    fn window_drops_boundary_tasks() {
        let tasks = vec![
            task("ends-at-from", "A", 0, 2 * H),
            task("inside", "A", 3 * H, 4 * H),
            task("starts-at-to", "A", 6 * H, 7 * H),
        ];
        let state = ViewState::new().with_window(TimeWindow::new(Some(2 * H), Some(6 * H)));
        let view = compose(&tasks, &state, NOW);
        let ids: Vec<&str> = view.bars().map(|b| b.identifier.as_str()).collect();
        assert_eq!(ids, vec!["inside"]);
    }

    #[test]
    fn selection_restricts_resources() {
        let tasks = vec![
            task("1", "A", 0, H),
            task("2", "B", 0, H),
            task("3", "C", 0, H),
        ];
        let state = ViewState::new().with_selection(["A", "C"]);
        let view = compose(&tasks, &state, NOW);
        let resources: Vec<&str> = view.rows.iter().map(|r| r.resource.as_str()).collect();
        assert_eq!(resources, vec!["A", "C"]);
    }

    #[test]
    fn query_without_route_falls_back_to_substring() {
        // No identifier equals or contains "77" → nothing visible, but the
        // resource universe still renders.
        let tasks = vec![task("1", "A", 0, H)];
        let state = ViewState::new().with_query("77");
        let view = compose(&tasks, &state, NOW);
        assert_eq!(view.bars().count(), 0);
        assert!(view.route.is_none());
    }

    #[test]
    fn exact_route_wins_over_substring_sibling() {
        let tasks = vec![
            task("100", "A", 0, H),
            task("1001", "B", 2 * H, 3 * H),
            task("100", "C", 4 * H, 5 * H),
        ];
        let state = ViewState::new().with_query("100");
        let view = compose(&tasks, &state, NOW);
        let route = view.route.expect("route should be active");
        assert_eq!(route.identifier, "100");
        assert_eq!(route.steps.len(), 2);
        let resources: Vec<&str> = view.rows.iter().map(|r| r.resource.as_str()).collect();
        assert_eq!(resources, vec!["A", "C"]);
    }

    #[test]
    fn route_across_three_resources_has_two_connectors() {
        let state = ViewState::new().with_query(demo::DEMO_ROUTE_IDENTIFIER);
        let tasks = demo::demo_tasks();
        let view = compose(&tasks, &state, NOW);

        let route = view.route.expect("demo route should resolve");
        assert_eq!(route.steps.len(), 3);
        assert_eq!(route.connectors.len(), 2);
        // Steps ascend chronologically.
        assert!(route.steps.windows(2).all(|p| p[0].start_ms <= p[1].start_ms));

        let resources: Vec<&str> = view.rows.iter().map(|r| r.resource.as_str()).collect();
        assert_eq!(resources, vec!["Assembly 1", "Laser 1", "Press 1"]);
    }

    #[test]
    fn overlapping_tasks_stack_in_lanes() {
        let tasks = vec![task("1", "A", 0, 2 * H), task("2", "A", H, 3 * H)];
        let state = ViewState::new().with_scale(MIN_SCALE);
        let view = compose(&tasks, &state, NOW);
        let row = &view.rows[0];
        assert_eq!(row.lane_count, 2);
        // 30 px/h → 2h bars are 60 px wide → baseline height 26.
        assert_eq!(row.height, 10.0 + 26.0 + 6.0 + 26.0 + 10.0);
        let lanes: Vec<usize> = row.bars.iter().map(|b| b.lane).collect();
        assert_eq!(lanes, vec![0, 1]);
        assert!(row.bars[0].rect.y < row.bars[1].rect.y);
    }

    #[test]
    fn bar_height_follows_pixel_width() {
        // 300 px/h: a 1h bar is 300 px (wide), 30m is 150 px (mid),
        // 15m is 75 px (baseline).
        let tasks = vec![
            task("wide", "A", 0, H),
            task("mid", "B", 0, H / 2),
            task("slim", "C", 0, H / 4),
        ];
        let state = ViewState::new().with_scale(MAX_SCALE);
        let view = compose(&tasks, &state, NOW);
        let heights: Vec<f64> = view.bars().map(|b| b.rect.h).collect();
        assert_eq!(heights, vec![40.0, 32.0, 26.0]);
    }

    #[test]
    fn resources_render_in_natural_order() {
        let tasks = vec![
            task("1", "Line 10", 0, H),
            task("2", "Line 2", 0, H),
            task("3", "Assembly", 0, H),
        ];
        let view = compose(&tasks, &ViewState::new(), NOW);
        let resources: Vec<&str> = view.rows.iter().map(|r| r.resource.as_str()).collect();
        assert_eq!(resources, vec!["Assembly", "Line 2", "Line 10"]);
    }

    #[test]
    fn rows_tile_the_content_height() {
        let tasks = vec![
            task("1", "A", 0, H),
            task("2", "A", 0, H),
            task("3", "B", 0, H),
        ];
        let view = compose(&tasks, &ViewState::new(), NOW);
        let mut expected_top = 0.0;
        for row in &view.rows {
            assert!((row.top - expected_top).abs() < 1e-9);
            expected_top += row.height;
        }
        assert!((view.content_height - expected_top).abs() < 1e-9);
    }

    #[test]
    fn recompute_is_pure() {
        let tasks = demo::demo_tasks();
        let state = ViewState::new().with_query(demo::DEMO_ROUTE_IDENTIFIER);
        let a = compose(&tasks, &state, NOW);
        let b = compose(&tasks, &state, NOW);
        assert_eq!(a.domain, b.domain);
        assert_eq!(a.content_height, b.content_height);
        assert_eq!(a.bars().count(), b.bars().count());
    }

    #[test]
    fn midnight_ticks_inside_padded_domain() {
        let start = ms_of(2025, 1, 10, 8, 0);
        let tasks = vec![task("1", "A", start, start + 40 * H)];
        let view = compose(&tasks, &ViewState::new(), NOW);
        assert_eq!(view.ticks.major_ms.len(), 2); // 11 Jan and 12 Jan
        assert!(!view.ticks.minor_ms.is_empty());
    }
}
