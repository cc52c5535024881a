use serde::{Deserialize, Serialize};

/// Semantic fields a source column can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Identifier,
    Start,
    End,
    Resource,
    Quantity,
}

impl Field {
    /// Detection order. Earlier fields claim their column first.
    pub const ALL: [Field; 5] = [
        Field::Identifier,
        Field::Start,
        Field::End,
        Field::Resource,
        Field::Quantity,
    ];

    /// Fields a row cannot do without.
    pub const MANDATORY: [Field; 4] =
        [Field::Identifier, Field::Start, Field::End, Field::Resource];

    /// The canonical column label checked before any pattern matching.
    pub fn canonical_label(&self) -> &'static str {
        match self {
            Field::Identifier => "order",
            Field::Start => "start",
            Field::End => "end",
            Field::Resource => "resource",
            Field::Quantity => "quantity",
        }
    }
}

/// Which raw column supplies each semantic field, or `None` if undetected.
///
/// Recomputed once per load; individual assignments may be overridden by an
/// exact case-insensitive header match before heuristics run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub identifier: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub resource: Option<String>,
    pub quantity: Option<String>,
}

impl FieldMapping {
    pub fn column(&self, field: Field) -> Option<&str> {
        match field {
            Field::Identifier => self.identifier.as_deref(),
            Field::Start => self.start.as_deref(),
            Field::End => self.end.as_deref(),
            Field::Resource => self.resource.as_deref(),
            Field::Quantity => self.quantity.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, column: impl Into<String>) {
        let column = Some(column.into());
        match field {
            Field::Identifier => self.identifier = column,
            Field::Start => self.start = column,
            Field::End => self.end = column,
            Field::Resource => self.resource = column,
            Field::Quantity => self.quantity = column,
        }
    }

    /// Whether every mandatory field has a source column.
    pub fn has_mandatory(&self) -> bool {
        Field::MANDATORY.iter().all(|f| self.column(*f).is_some())
    }
}
