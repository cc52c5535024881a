//! Route detection and connector geometry.
//!
//! A route is the set of tasks sharing one identifier across resources —
//! an item's journey through the shop. When the free-text query matches
//! one, the view narrows to exactly that route and consecutive steps get
//! elbow connectors.

use laneboard_protocol::{Connector, Point, TaskBar};

use crate::model::Task;

/// Horizontal stub length out of a bar before the connector turns.
const CONNECTOR_STUB_PX: f64 = 30.0;

/// Find the route for a query: exact case-insensitive identifier matches
/// win; only if there are none do substring matches count. Steps are
/// ordered by start ascending (stable, so canonical order breaks ties).
pub fn find_route<'a>(tasks: &'a [Task], query: &str) -> Option<Vec<&'a Task>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let exact: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.identifier.to_lowercase() == needle)
        .collect();
    let mut steps = if exact.is_empty() {
        tasks
            .iter()
            .filter(|t| t.identifier.to_lowercase().contains(&needle))
            .collect()
    } else {
        exact
    };
    if steps.is_empty() {
        return None;
    }

    steps.sort_by_key(|t| t.start_ms);
    Some(steps)
}

/// Elbow connectors between consecutive steps, oldest pair first.
///
/// Each connector runs horizontally from the earlier bar's end to
/// `mid_x = min(end + 30px, midpoint)`, vertically to the later bar's
/// center line, then horizontally into the later bar's start.
pub fn build_connectors(steps: &[TaskBar]) -> Vec<Connector> {
    steps
        .windows(2)
        .map(|pair| {
            let (from, to) = (&pair[0], &pair[1]);
            let start = Point::new(from.rect.right(), from.rect.center_y());
            let end = Point::new(to.rect.x, to.rect.center_y());
            let mid_x = (from.rect.right() + CONNECTOR_STUB_PX)
                .min((from.rect.right() + to.rect.x) / 2.0);
            Connector {
                points: [
                    start,
                    Point::new(mid_x, start.y),
                    Point::new(mid_x, end.y),
                    end,
                ],
            }
        })
        .collect()
}
