//! Row ingestion.
//!
//! Turns the upload service's grouped rows into a [`Registry`]. Display
//! fields are read through ordered [`FieldSource`] chains so that the
//! defaulting policy for loosely-typed spreadsheet rows is explicit.

use crate::config::BoardConfig;
use crate::domain::{Group, GroupId, Item, ItemId, Registry, Row};
use crate::error::Result;
use crate::export::ExportedGroup;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name used when no source field yields one
pub const UNKNOWN_NAME: &str = "Unknown";

/// A place to look for a field value in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A literal column name
    Key(&'static str),
    /// Whatever column the upload declared first
    FirstColumn,
}

pub const NAME_SOURCES: &[FieldSource] = &[
    FieldSource::Key("name"),
    FieldSource::Key("Name"),
    FieldSource::FirstColumn,
];
pub const ADDRESS_SOURCES: &[FieldSource] =
    &[FieldSource::Key("location"), FieldSource::Key("Location")];
pub const CONTACT_SOURCES: &[FieldSource] =
    &[FieldSource::Key("contact"), FieldSource::Key("Contact")];
pub const PRIORITY_SOURCES: &[FieldSource] =
    &[FieldSource::Key("priority"), FieldSource::Key("Priority")];

/// Grouped rows as returned by the upload and grouping service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPayload {
    pub filename: String,
    pub columns: Vec<String>,
    pub groups: Vec<Vec<Row>>,
    /// Optional per-group titles, matched to `groups` by position
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,
}

impl UploadPayload {
    pub fn new(filename: impl Into<String>, columns: Vec<String>, groups: Vec<Vec<Row>>) -> Self {
        Self {
            filename: filename.into(),
            columns,
            groups,
            titles: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuilds a payload from a previously exported arrangement
    pub fn from_export(
        filename: impl Into<String>,
        columns: Vec<String>,
        exported: &[ExportedGroup],
    ) -> Self {
        Self {
            filename: filename.into(),
            columns,
            groups: exported.iter().map(|g| g.rows.clone()).collect(),
            titles: exported.iter().map(|g| g.title.clone()).collect(),
        }
    }
}

/// Returns the first non-null value found along `sources`
pub fn resolve_field<'a>(
    row: &'a Row,
    columns: &[String],
    sources: &[FieldSource],
) -> Option<&'a Value> {
    sources.iter().find_map(|source| {
        let key = match source {
            FieldSource::Key(key) => *key,
            FieldSource::FirstColumn => columns.first()?.as_str(),
        };
        row.get(key).filter(|value| !value.is_null())
    })
}

/// Renders a cell as display text; strings are taken verbatim
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerces a cell to an integer priority
///
/// Accepts integers, floats without a fractional part, and strings holding
/// either. Everything else is rejected.
pub fn coerce_priority(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Derives an item from a row at `row_index` of the group at `group_index`
pub fn ingest_row(row: &Row, columns: &[String], group_index: usize, row_index: usize) -> Item {
    let text = |sources: &[FieldSource]| resolve_field(row, columns, sources).map(display_text);
    let position = row_index as i64 + 1;

    Item {
        id: ItemId::new(group_index, row_index),
        name: text(NAME_SOURCES).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        address: text(ADDRESS_SOURCES).unwrap_or_default(),
        contact: text(CONTACT_SOURCES).unwrap_or_default(),
        priority: resolve_field(row, columns, PRIORITY_SOURCES)
            .and_then(coerce_priority)
            .unwrap_or(position),
        row: row.clone(),
    }
}

/// Builds the initial registry, one group per uploaded group
pub fn ingest(payload: &UploadPayload, config: &BoardConfig) -> Registry {
    let groups: Vec<Group> = payload
        .groups
        .iter()
        .enumerate()
        .map(|(group_index, rows)| {
            let title = payload
                .titles
                .get(group_index)
                .cloned()
                .unwrap_or_else(|| config.group_title(group_index));
            let items = rows
                .iter()
                .enumerate()
                .map(|(row_index, row)| ingest_row(row, &payload.columns, group_index, row_index))
                .collect();

            Group::new(GroupId::new(&config.group_id_prefix, group_index), title).with_items(items)
        })
        .collect();

    let registry = Registry::from_groups(groups);
    tracing::debug!(
        filename = %payload.filename,
        groups = registry.groups().len(),
        items = registry.item_count(),
        "ingested upload"
    );
    registry
}
