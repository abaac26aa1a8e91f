use crate::domain::group::{Group, GroupId};
use crate::domain::item::Item;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where an item sits: which group, and at which index within it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub group_id: GroupId,
    pub index: usize,
}

/// The ordered set of groups and the single source of truth for the
/// arrangement.
///
/// A registry is never edited in place. [`Registry::relocate`] returns a new
/// snapshot and leaves the receiver untouched, so a failed move can never be
/// observed half-applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    groups: Vec<Group>,
}

impl Registry {
    /// Builds a registry, checking that group and item ids are unique
    pub fn new(groups: Vec<Group>) -> Result<Self> {
        let registry = Self { groups };
        registry.validate()?;
        Ok(registry)
    }

    /// Builds a registry from groups whose ids are unique by construction
    pub(crate) fn from_groups(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id.as_str() == group_id)
    }

    pub fn group_index(&self, group_id: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.id.as_str() == group_id)
    }

    /// Total number of items across all groups
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Finds the group and index currently holding an item
    pub fn locate(&self, item_id: &str) -> Option<Position> {
        self.groups.iter().find_map(|group| {
            group.position_of(item_id).map(|index| Position {
                group_id: group.id.clone(),
                index,
            })
        })
    }

    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter())
            .find(|item| item.id.as_str() == item_id)
    }

    /// Checks that no group id and no item id appears twice, and that no
    /// group id doubles as an item id (drop targets are told apart by id)
    pub fn validate(&self) -> Result<()> {
        let mut group_ids = HashSet::new();
        let mut item_ids = HashSet::new();

        for group in &self.groups {
            if !group_ids.insert(group.id.as_str()) {
                return Err(BoardError::DuplicateGroup(group.id.to_string()));
            }
            for id in group.item_ids() {
                if !item_ids.insert(id.as_str()) {
                    return Err(BoardError::DuplicateItem(id.to_string()));
                }
            }
        }

        if let Some(id) = group_ids.iter().find(|id| item_ids.contains(*id)) {
            return Err(BoardError::IdCollision(id.to_string()));
        }

        Ok(())
    }

    /// Moves one item and returns the resulting snapshot.
    ///
    /// The item must be the one at `from_index` of `from_group`. `to_index`
    /// may range over `[0, len]` of the destination group; `len` appends.
    /// Within one group the insert is clamped to the end once the item has
    /// been taken out.
    pub fn relocate(
        &self,
        item_id: &str,
        from_group: &str,
        from_index: usize,
        to_group: &str,
        to_index: usize,
    ) -> Result<Registry> {
        let from = self
            .group_index(from_group)
            .ok_or_else(|| BoardError::GroupNotFound(from_group.to_string()))?;
        let to = self
            .group_index(to_group)
            .ok_or_else(|| BoardError::GroupNotFound(to_group.to_string()))?;

        let source = &self.groups[from];
        let item = source
            .items
            .get(from_index)
            .ok_or_else(|| BoardError::IndexOutOfBounds {
                group: from_group.to_string(),
                index: from_index,
                max: source.len().saturating_sub(1),
            })?;
        if item.id.as_str() != item_id {
            return Err(BoardError::PositionMismatch {
                item: item_id.to_string(),
                group: from_group.to_string(),
                index: from_index,
            });
        }

        let max = self.groups[to].len();
        if to_index > max {
            return Err(BoardError::IndexOutOfBounds {
                group: to_group.to_string(),
                index: to_index,
                max,
            });
        }

        if from == to && from_index == to_index {
            return Ok(self.clone());
        }

        let mut groups = self.groups.clone();
        let moved = groups[from].items.remove(from_index);
        let insert_at = to_index.min(groups[to].items.len());
        groups[to].items.insert(insert_at, moved);

        tracing::debug!(
            item = item_id,
            from = from_group,
            from_index,
            to = to_group,
            to_index,
            "relocated item"
        );

        Ok(Self { groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{ItemId, Row};

    fn group(index: usize, rows: usize) -> Group {
        let items = (0..rows)
            .map(|r| Item::new(ItemId::new(index, r), Row::new()))
            .collect();
        Group::new(GroupId::new("group", index), format!("Route {}", index + 1)).with_items(items)
    }

    fn ids(registry: &Registry, group_id: &str) -> Vec<String> {
        registry
            .group(group_id)
            .unwrap()
            .item_ids()
            .map(|id| id.to_string())
            .collect()
    }

    #[test]
    fn test_registry_new_rejects_duplicate_groups() {
        let result = Registry::new(vec![group(0, 1), group(0, 0)]);
        assert!(matches!(result, Err(BoardError::DuplicateGroup(_))));
    }

    #[test]
    fn test_registry_new_rejects_duplicate_items() {
        let mut second = group(1, 0);
        second.items.push(Item::new(ItemId::new(0, 0), Row::new()));

        let result = Registry::new(vec![group(0, 1), second]);
        assert!(matches!(result, Err(BoardError::DuplicateItem(_))));
    }

    #[test]
    fn test_locate_and_find() {
        let registry = Registry::new(vec![group(0, 2), group(1, 3)]).unwrap();

        let pos = registry.locate("1-2").unwrap();
        assert_eq!(pos.group_id.as_str(), "group-1");
        assert_eq!(pos.index, 2);
        assert!(registry.locate("2-0").is_none());
        assert_eq!(registry.find_item("0-1").unwrap().id.as_str(), "0-1");
        assert_eq!(registry.item_count(), 5);
    }

    #[test]
    fn test_relocate_within_group_moves_not_swaps() {
        let registry = Registry::new(vec![group(0, 4)]).unwrap();

        let next = registry.relocate("0-0", "group-0", 0, "group-0", 2).unwrap();

        assert_eq!(ids(&next, "group-0"), vec!["0-1", "0-2", "0-0", "0-3"]);
        // The original snapshot is untouched
        assert_eq!(ids(&registry, "group-0"), vec!["0-0", "0-1", "0-2", "0-3"]);
    }

    #[test]
    fn test_relocate_across_groups_appends_at_end() {
        let registry = Registry::new(vec![group(0, 2), group(1, 2)]).unwrap();

        let next = registry.relocate("0-0", "group-0", 0, "group-1", 2).unwrap();

        assert_eq!(ids(&next, "group-0"), vec!["0-1"]);
        assert_eq!(ids(&next, "group-1"), vec!["1-0", "1-1", "0-0"]);
    }

    #[test]
    fn test_relocate_into_empty_group() {
        let registry = Registry::new(vec![group(0, 2), group(1, 0)]).unwrap();

        let next = registry.relocate("0-0", "group-0", 0, "group-1", 0).unwrap();

        assert_eq!(ids(&next, "group-0"), vec!["0-1"]);
        assert_eq!(ids(&next, "group-1"), vec!["0-0"]);
    }

    #[test]
    fn test_relocate_same_position_is_noop() {
        let registry = Registry::new(vec![group(0, 3)]).unwrap();
        let next = registry.relocate("0-1", "group-0", 1, "group-0", 1).unwrap();
        assert_eq!(next, registry);
    }

    #[test]
    fn test_relocate_rejects_wrong_item() {
        let registry = Registry::new(vec![group(0, 3)]).unwrap();
        let result = registry.relocate("0-2", "group-0", 0, "group-0", 1);
        assert!(matches!(result, Err(BoardError::PositionMismatch { .. })));
    }

    #[test]
    fn test_relocate_within_group_to_end() {
        let registry = Registry::new(vec![group(0, 3)]).unwrap();

        let next = registry.relocate("0-0", "group-0", 0, "group-0", 3).unwrap();

        assert_eq!(ids(&next, "group-0"), vec!["0-1", "0-2", "0-0"]);
    }

    #[test]
    fn test_relocate_rejects_out_of_bounds_destination() {
        let registry = Registry::new(vec![group(0, 3), group(1, 1)]).unwrap();

        let within = registry.relocate("0-0", "group-0", 0, "group-0", 4);
        assert!(matches!(within, Err(BoardError::IndexOutOfBounds { max: 3, .. })));

        let across = registry.relocate("0-0", "group-0", 0, "group-1", 2);
        assert!(matches!(across, Err(BoardError::IndexOutOfBounds { max: 1, .. })));
    }

    #[test]
    fn test_registry_new_rejects_group_id_matching_item_id() {
        let shadowing = Group::new(GroupId::new("0", 0), "Route 1".to_string())
            .with_items(vec![Item::new(ItemId::new(0, 0), Row::new())]);

        let result = Registry::new(vec![shadowing, group(1, 1)]);

        assert!(matches!(result, Err(BoardError::IdCollision(id)) if id == "0-0"));
    }

    #[test]
    fn test_relocate_rejects_unknown_group() {
        let registry = Registry::new(vec![group(0, 1)]).unwrap();
        let result = registry.relocate("0-0", "group-0", 0, "group-9", 0);
        assert!(matches!(result, Err(BoardError::GroupNotFound(_))));
    }
}
