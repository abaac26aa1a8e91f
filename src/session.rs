//! Gesture handling for one editing session.
//!
//! A [`Session`] owns the committed [`Registry`] and drives it from drag
//! events: `begin_drag` -> optional `drag_over` -> `end_drag` or
//! `cancel_drag`. The [`DragTracker`] only mirrors the gesture for transient
//! feedback and never affects committed state.

use crate::config::BoardConfig;
use crate::domain::{Item, ItemId, Registry};
use crate::error::{BoardError, Result};
use crate::export::{export, ExportedGroup};
use crate::ingest::{ingest, UploadPayload};
use crate::resolver::{self, Relocation};
use std::collections::VecDeque;

/// Gesture state machine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(ItemId),
}

/// The item currently lifted by a gesture, plus what it hovers over
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    lifted: Option<Item>,
    over: Option<String>,
}

impl DragTracker {
    /// Looks the item up across all groups and lifts a copy of it
    pub fn lift(&mut self, registry: &Registry, item_id: &str) -> Option<&Item> {
        self.over = None;
        self.lifted = registry.find_item(item_id).cloned();
        self.lifted.as_ref()
    }

    pub fn hover(&mut self, over_id: Option<&str>) {
        self.over = over_id.map(str::to_string);
    }

    pub fn clear(&mut self) {
        self.lifted = None;
        self.over = None;
    }

    pub fn lifted(&self) -> Option<&Item> {
        self.lifted.as_ref()
    }

    pub fn over(&self) -> Option<&str> {
        self.over.as_deref()
    }
}

/// A single user's editing session over one uploaded file
#[derive(Debug, Clone)]
pub struct Session {
    registry: Registry,
    state: GestureState,
    tracker: DragTracker,
    undo_stack: VecDeque<Registry>,
    redo_stack: Vec<Registry>,
    history_limit: usize,
}

impl Session {
    pub fn new(registry: Registry, config: &BoardConfig) -> Self {
        Self {
            registry,
            state: GestureState::Idle,
            tracker: DragTracker::default(),
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            history_limit: config.history_limit,
        }
    }

    /// Ingests an upload and opens a session on it
    pub fn from_payload(payload: &UploadPayload, config: &BoardConfig) -> Self {
        Self::new(ingest(payload, config), config)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// The lifted item, present only while a gesture is in progress
    pub fn lifted(&self) -> Option<&Item> {
        self.tracker.lifted()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.tracker.over()
    }

    pub fn begin_drag(&mut self, active_id: &str) -> Result<&Item> {
        if let GestureState::Dragging(current) = &self.state {
            tracing::warn!(active = %current, requested = active_id, "overlapping drag gesture");
            return Err(BoardError::GestureInProgress(current.to_string()));
        }

        let active: ItemId = active_id.parse().map_err(|err| {
            tracing::warn!(active = active_id, "drag started with a malformed item id");
            err
        })?;

        let Some(item) = self.tracker.lift(&self.registry, active.as_str()) else {
            tracing::warn!(active = active_id, "drag started on an item outside every group");
            return Err(BoardError::ItemNotFound(active_id.to_string()));
        };

        tracing::debug!(active = active_id, "drag started");
        self.state = GestureState::Dragging(item.id.clone());
        Ok(item)
    }

    /// Records the current hover target; has no effect when idle
    pub fn drag_over(&mut self, over_id: Option<&str>) {
        if self.is_dragging() {
            self.tracker.hover(over_id);
        }
    }

    /// Finishes the gesture and commits the resolved move, if any
    pub fn end_drag(&mut self, over_id: Option<&str>) -> Result<Option<Relocation>> {
        self.tracker.clear();
        let active = match std::mem::take(&mut self.state) {
            GestureState::Dragging(active) => active,
            GestureState::Idle => {
                tracing::debug!("drag end received while idle");
                return Ok(None);
            }
        };

        let Some(relocation) = resolver::resolve(&self.registry, active.as_str(), over_id) else {
            tracing::debug!(active = %active, over = ?over_id, "drag ended without a move");
            return Ok(None);
        };

        let next = resolver::apply(&self.registry, &relocation)?;
        self.commit(next);
        tracing::debug!(
            item = %relocation.item_id,
            to = %relocation.to.group_id,
            index = relocation.to.index,
            kind = ?relocation.kind,
            "drag committed"
        );
        Ok(Some(relocation))
    }

    pub fn cancel_drag(&mut self) {
        self.tracker.clear();
        self.state = GestureState::Idle;
    }

    fn commit(&mut self, next: Registry) {
        let previous = std::mem::replace(&mut self.registry, next);
        self.undo_stack.push_back(previous);
        if self.undo_stack.len() > self.history_limit {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restores the snapshot before the last committed move.
    /// Returns false when there is nothing to undo or a drag is in progress.
    pub fn undo(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        match self.undo_stack.pop_back() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.registry, previous);
                self.redo_stack.push(current);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        match self.redo_stack.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.registry, next);
                self.undo_stack.push_back(current);
                true
            }
            None => false,
        }
    }

    pub fn export(&self) -> Vec<ExportedGroup> {
        export(&self.registry)
    }
}
