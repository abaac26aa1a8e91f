//! Drag gesture resolution.
//!
//! [`resolve`] classifies a finished gesture into a [`Relocation`] without
//! touching the registry; [`apply`] commits it as a new snapshot.

use crate::domain::{ItemId, Position, Registry};
use crate::error::Result;

/// How a relocation was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Reordered within its own group
    Reorder,
    /// Dropped on an item in another group
    Transfer,
    /// Dropped on an empty group's placeholder
    EmptyGroupLanding,
}

/// A fully resolved move, ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub item_id: ItemId,
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
}

/// Resolves a drop of `active_id` over `over_id` against the registry.
///
/// `over_id` is an item id, or a group id when the pointer is over an empty
/// group. A group id only counts while that group is empty; a non-empty
/// group exposes its items as drop targets instead. Returns `None` when the
/// gesture should not change anything.
pub fn resolve(registry: &Registry, active_id: &str, over_id: Option<&str>) -> Option<Relocation> {
    let over_id = over_id?;
    if active_id == over_id {
        return None;
    }

    let Some(item) = registry.find_item(active_id) else {
        tracing::warn!(active = active_id, "dragged item is not in any group");
        return None;
    };
    let from = registry.locate(active_id)?;

    let (to, kind) = match registry.group(over_id) {
        Some(group) if group.is_empty() => (
            Position {
                group_id: group.id.clone(),
                index: 0,
            },
            MoveKind::EmptyGroupLanding,
        ),
        Some(group) => {
            tracing::debug!(group = %group.id, "ignoring drop on non-empty group container");
            return None;
        }
        None => {
            let Some(to) = registry.locate(over_id) else {
                tracing::warn!(over = over_id, "drop target does not resolve to a group");
                return None;
            };
            let kind = if to.group_id == from.group_id {
                MoveKind::Reorder
            } else {
                MoveKind::Transfer
            };
            (to, kind)
        }
    };

    Some(Relocation {
        item_id: item.id.clone(),
        from,
        to,
        kind,
    })
}

/// Applies a relocation, returning the new snapshot
pub fn apply(registry: &Registry, relocation: &Relocation) -> Result<Registry> {
    registry.relocate(
        relocation.item_id.as_str(),
        relocation.from.group_id.as_str(),
        relocation.from.index,
        relocation.to.group_id.as_str(),
        relocation.to.index,
    )
}

/// Resolves and applies in one step; unresolved gestures return the
/// registry unchanged
pub fn move_item(registry: &Registry, active_id: &str, over_id: Option<&str>) -> Result<Registry> {
    match resolve(registry, active_id, over_id) {
        Some(relocation) => apply(registry, &relocation),
        None => Ok(registry.clone()),
    }
}
