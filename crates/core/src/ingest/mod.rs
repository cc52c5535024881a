pub mod dates;
pub mod fields;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::collate::natural_cmp;
use crate::model::{Field, FieldMapping, Task};

/// One raw input row: column header → cell value.
pub type RawRow = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The dataset carries no header row — nothing can be mapped.
    #[error("input has no header row")]
    NoHeaders,
}

/// Normalizer output: the detected mapping plus the canonical task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Normalized {
    pub mapping: FieldMapping,
    pub tasks: Vec<Task>,
}

/// Map arbitrary headers to semantic fields and convert raw rows into the
/// canonical task list.
///
/// Rows failing validity (missing mandatory cell, unparseable date,
/// non-positive duration) are silently dropped — only whole-file problems
/// are errors. The result is sorted by (resource, start, identifier) with
/// natural string collation; downstream consumers rely on that order.
pub fn normalize(
    headers: &[String],
    rows: &[RawRow],
    overrides: Option<&FieldMapping>,
) -> Result<Normalized, IngestError> {
    if headers.is_empty() {
        return Err(IngestError::NoHeaders);
    }

    let mapping = fields::detect_mapping(headers, overrides);
    let mut tasks = Vec::with_capacity(rows.len());
    if mapping.has_mandatory() {
        tasks.extend(rows.iter().filter_map(|row| task_from_row(row, &mapping)));
    }

    tasks.sort_by(|a, b| {
        natural_cmp(&a.resource, &b.resource)
            .then(a.start_ms.cmp(&b.start_ms))
            .then_with(|| natural_cmp(&a.identifier, &b.identifier))
    });

    Ok(Normalized { mapping, tasks })
}

fn task_from_row(row: &RawRow, mapping: &FieldMapping) -> Option<Task> {
    let identifier = text_cell(row, mapping.column(Field::Identifier)?)?;
    let resource = text_cell(row, mapping.column(Field::Resource)?)?;
    let start_ms = dates::parse_instant(row.get(mapping.column(Field::Start)?)?)?;
    let end_ms = dates::parse_instant(row.get(mapping.column(Field::End)?)?)?;
    if end_ms <= start_ms {
        return None;
    }
    let quantity = mapping
        .column(Field::Quantity)
        .and_then(|col| row.get(col))
        .and_then(number_cell);

    Some(Task {
        identifier,
        resource,
        start_ms,
        end_ms,
        quantity,
    })
}

/// Trimmed, non-empty text cell. Numbers are accepted and stringified so
/// purely numeric identifier columns survive.
fn text_cell(row: &RawRow, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_cell(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // Decimal commas appear in localized exports.
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
}
