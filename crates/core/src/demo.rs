//! Built-in demo dataset: a small shop schedule with one order routed
//! across three resources, plus enough overlap on the laser to exercise
//! lane packing. Fed through the normal ingestion path so it also covers
//! header detection and date parsing.

use serde_json::json;

use crate::ingest::{self, RawRow};
use crate::model::Task;

/// Order routed Laser → Press → Assembly; querying it shows the overlay.
pub const DEMO_ROUTE_IDENTIFIER: &str = "3260996";

pub fn demo_headers() -> Vec<String> {
    ["Auftrag", "Beginn", "Ende", "Ressource", "Menge"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

pub fn demo_rows() -> Vec<RawRow> {
    let rows = [
        ("3260996", "10.01.2025 08:00", "10.01.2025 10:30", "Laser 1", 120),
        ("3260996", "10.01.2025 11:00", "10.01.2025 13:00", "Press 1", 120),
        ("3260996", "10.01.2025 14:00", "10.01.2025 16:30", "Assembly 1", 120),
        ("3261010", "10.01.2025 09:00", "10.01.2025 12:00", "Laser 1", 80),
        ("3261011", "10.01.2025 09:30", "10.01.2025 10:15", "Laser 1", 40),
        ("3261014", "10.01.2025 07:00", "10.01.2025 09:45", "Press 1", 200),
        ("3261014", "10.01.2025 10:00", "10.01.2025 12:30", "Assembly 1", 200),
        ("3261020", "10.01.2025 06:30", "10.01.2025 11:00", "Press 2", 64),
        ("3261021", "10.01.2025 12:00", "10.01.2025 15:00", "Press 2", 64),
        ("3261022", "11.01.2025 08:00", "11.01.2025 09:30", "Laser 1", 16),
    ];

    rows.iter()
        .map(|(id, start, end, resource, quantity)| {
            let mut row = RawRow::new();
            row.insert("Auftrag".into(), json!(id));
            row.insert("Beginn".into(), json!(start));
            row.insert("Ende".into(), json!(end));
            row.insert("Ressource".into(), json!(resource));
            row.insert("Menge".into(), json!(quantity));
            row
        })
        .collect()
}

/// The demo dataset already normalized into canonical tasks.
pub fn demo_tasks() -> Vec<Task> {
    ingest::normalize(&demo_headers(), &demo_rows(), None)
        .map(|n| n.tasks)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_normalizes_completely() {
        let tasks = demo_tasks();
        assert_eq!(tasks.len(), demo_rows().len());
    }

    #[test]
    fn demo_route_has_three_steps_on_distinct_resources() {
        let tasks = demo_tasks();
        let steps: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.identifier == DEMO_ROUTE_IDENTIFIER)
            .collect();
        assert_eq!(steps.len(), 3);
        let mut resources: Vec<&str> = steps.iter().map(|t| t.resource.as_str()).collect();
        resources.sort_unstable();
        resources.dedup();
        assert_eq!(resources.len(), 3);
    }

    #[test]
    fn demo_laser_needs_multiple_lanes() {
        let tasks = demo_tasks();
        let laser: Vec<Task> = tasks
            .iter()
            .filter(|t| t.resource == "Laser 1")
            .cloned()
            .collect();
        let packed = crate::layout::pack_lanes(&laser);
        assert!(packed.lane_count >= 2);
    }
}
