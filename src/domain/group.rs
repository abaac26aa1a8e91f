use crate::domain::item::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a group (e.g., group-0, group-4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a GroupId from a prefix and the zero-based group position
    pub fn new(prefix: &str, index: usize) -> Self {
        Self(format!("{}-{}", prefix, index))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named bucket of items, in user-controlled order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub title: String,
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(id: GroupId, title: String) -> Self {
        Self {
            id,
            title,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the item with the given id, if this group holds it
    pub fn position_of(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id.as_str() == item_id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }
}
