//! Header → semantic field detection.
//!
//! Two stages, explicit overrides first:
//! 1. Exact case-insensitive match against the canonical label.
//! 2. Scan headers against a priority-ordered regex table per field,
//!    including localized synonyms; the first hit wins.
//!
//! Columns are claimed in [`Field::ALL`] order, so a header can supply at
//! most one field.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Field, FieldMapping};

/// Priority-ordered detection patterns per field. Earlier entries win.
const PATTERN_TABLE: &[(Field, &str)] = &[
    (Field::Identifier, r"(?i)auftrag"),
    (Field::Identifier, r"(?i)order"),
    (Field::Identifier, r"(?i)vorgang"),
    (Field::Identifier, r"(?i)\bjob\b"),
    (Field::Identifier, r"(?i)^ident"),
    (Field::Identifier, r"(?i)^id$"),
    (Field::Start, r"(?i)start"),
    (Field::Start, r"(?i)beginn"),
    (Field::Start, r"(?i)anfang"),
    (Field::Start, r"(?i)^von$"),
    (Field::Start, r"(?i)^from$"),
    (Field::End, r"(?i)end"),
    (Field::End, r"(?i)fertig"),
    (Field::End, r"(?i)^bis$"),
    (Field::End, r"(?i)^to$"),
    (Field::End, r"(?i)^until$"),
    (Field::Resource, r"(?i)ressource"),
    (Field::Resource, r"(?i)resource"),
    (Field::Resource, r"(?i)maschine"),
    (Field::Resource, r"(?i)machine"),
    (Field::Resource, r"(?i)arbeitsplatz"),
    (Field::Resource, r"(?i)anlage"),
    (Field::Resource, r"(?i)station"),
    (Field::Resource, r"(?i)\bline\b"),
    (Field::Quantity, r"(?i)menge"),
    (Field::Quantity, r"(?i)quantity"),
    (Field::Quantity, r"(?i)\bqty\b"),
    (Field::Quantity, r"(?i)anzahl"),
    (Field::Quantity, r"(?i)amount"),
    (Field::Quantity, r"(?i)st(ü|ue)ck"),
];

fn compiled_patterns() -> &'static [(Field, Regex)] {
    static TABLE: OnceLock<Vec<(Field, Regex)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        PATTERN_TABLE
            .iter()
            .filter_map(|(field, pattern)| Regex::new(pattern).ok().map(|re| (*field, re)))
            .collect()
    })
}

/// Detect the field mapping for a header list.
///
/// `overrides` assignments are honored first when they match a header
/// exactly (case-insensitive); heuristics fill the remaining fields.
pub fn detect_mapping(headers: &[String], overrides: Option<&FieldMapping>) -> FieldMapping {
    let mut mapping = FieldMapping::default();
    let mut claimed: HashSet<usize> = HashSet::new();

    if let Some(overrides) = overrides {
        for field in Field::ALL {
            if let Some(wanted) = overrides.column(field)
                && let Some(idx) = find_exact(headers, &claimed, wanted)
            {
                mapping.set(field, headers[idx].clone());
                claimed.insert(idx);
            }
        }
    }

    for field in Field::ALL {
        if mapping.column(field).is_some() {
            continue;
        }
        if let Some(idx) = detect_field(field, headers, &claimed) {
            mapping.set(field, headers[idx].clone());
            claimed.insert(idx);
        }
    }

    mapping
}

fn detect_field(field: Field, headers: &[String], claimed: &HashSet<usize>) -> Option<usize> {
    if let Some(idx) = find_exact(headers, claimed, field.canonical_label()) {
        return Some(idx);
    }
    for (pat_field, re) in compiled_patterns() {
        if *pat_field != field {
            continue;
        }
        for (idx, header) in headers.iter().enumerate() {
            if !claimed.contains(&idx) && re.is_match(header.trim()) {
                return Some(idx);
            }
        }
    }
    None
}

fn find_exact(headers: &[String], claimed: &HashSet<usize>, wanted: &str) -> Option<usize> {
    headers.iter().enumerate().find_map(|(idx, h)| {
        (!claimed.contains(&idx) && h.trim().eq_ignore_ascii_case(wanted.trim())).then_some(idx)
    })
}
