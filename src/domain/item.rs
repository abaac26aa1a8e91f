use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A raw spreadsheet row, keyed by column name in source order
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Unique identifier for an item (e.g., 0-0, 2-15)
///
/// Built from the item's group position and row position at ingestion
/// time. The identifier travels with the item across every move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an ItemId from the zero-based group and row positions
    pub fn new(group_index: usize, row_index: usize) -> Self {
        Self(format!("{}-{}", group_index, row_index))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ItemId {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .split_once('-')
            .map(|(group, row)| group.parse::<usize>().is_ok() && row.parse::<usize>().is_ok())
            .unwrap_or(false);

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(crate::error::BoardError::InvalidItemId(s.to_string()))
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single relocatable stop on a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub address: String,
    pub contact: String,
    pub priority: i64,
    /// The source row, kept verbatim for export
    pub row: Row,
}

impl Item {
    /// Creates an item with placeholder display fields
    pub fn new(id: ItemId, row: Row) -> Self {
        Self {
            id,
            name: "Unknown".to_string(),
            address: String::new(),
            contact: String::new(),
            priority: 1,
            row,
        }
    }
}
