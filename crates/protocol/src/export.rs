use serde::{Deserialize, Serialize};

/// One flat record of the tabular export: formatted timestamps and a
/// precomputed duration so spreadsheet consumers need no date math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub identifier: String,
    pub resource: String,
    /// Start formatted as `DD.MM.YYYY HH:MM`.
    pub start: String,
    /// End formatted as `DD.MM.YYYY HH:MM`.
    pub end: String,
    pub quantity: Option<f64>,
    pub duration_minutes: i64,
}
