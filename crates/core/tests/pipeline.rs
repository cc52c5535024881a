//! Integration test: raw tabular rows through the full pipeline — header
//! detection, date parsing, canonical ordering, view composition with an
//! active route, zoom, and export derivation.

use laneboard_core::layout::{TimeScale, ZoomState, zoom_at_cursor};
use laneboard_core::model::ViewState;
use laneboard_core::{demo, ingest, views};

#[test]
fn demo_rows_to_route_overlay() {
    let normalized = ingest::normalize(&demo::demo_headers(), &demo::demo_rows(), None)
        .expect("demo dataset should ingest");
    assert!(normalized.mapping.has_mandatory());
    assert_eq!(normalized.tasks.len(), demo::demo_rows().len());

    // Canonical order: resource, then start, then identifier.
    for pair in normalized.tasks.windows(2) {
        if pair[0].resource == pair[1].resource {
            assert!(pair[0].start_ms <= pair[1].start_ms);
        }
    }

    let state = ViewState::new().with_query(demo::DEMO_ROUTE_IDENTIFIER);
    let view = views::compose(&normalized.tasks, &state, 0);

    let route = view.route.as_ref().expect("query should activate the route");
    assert_eq!(route.identifier, demo::DEMO_ROUTE_IDENTIFIER);
    assert_eq!(route.steps.len(), 3);
    assert_eq!(route.connectors.len(), 2);

    // Only the route's three resources render, one row each.
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.bars().count(), 3);

    // Connector elbows are drawn oldest-to-newest, left to right.
    for (connector, pair) in route.connectors.iter().zip(route.steps.windows(2)) {
        assert!(pair[0].start_ms <= pair[1].start_ms);
        assert!(connector.points[0].x <= connector.points[1].x);
    }

    // Export covers exactly the visible bars and carries positive durations.
    let records = views::export_rows(&view);
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.duration_minutes > 0));

    let bounds = views::content_bounds(&view);
    assert!(bounds.w > 0.0 && bounds.h > 0.0);
}

#[test]
fn zoom_series_keeps_anchor_stable() {
    let tasks = demo::demo_tasks();
    let view = views::compose(&tasks, &ViewState::new(), 0);
    let origin = view.domain.start_ms;

    let mut zoom = ZoomState {
        scale: view.scale,
        scroll_px: 50.0,
    };
    let cursor = 200.0;
    let anchor = TimeScale::new(zoom.scale, origin).px_to_time(cursor + zoom.scroll_px);

    // A burst of zoom-in events, each reading the latest state.
    for _ in 0..5 {
        zoom = zoom_at_cursor(zoom, origin, cursor, true);
        let anchor_px = TimeScale::new(zoom.scale, origin).time_to_px(anchor);
        assert!(
            (anchor_px - zoom.scroll_px - cursor).abs() <= 1.0,
            "anchor drifted at scale {}",
            zoom.scale
        );
    }
    assert!(zoom.scale > view.scale);
}
