//! # Routeboard Core
//!
//! Core data model and move rules for route grouping boards.
//!
//! Rows from an uploaded spreadsheet arrive already split into groups.
//! This crate turns them into a [`Registry`] of ordered groups, resolves
//! drag gestures into moves between and within those groups, and exports
//! the final arrangement back into the original row shape, without any
//! dependency on a specific UI or upload transport.

pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod ingest;
pub mod resolver;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::BoardConfig;
pub use domain::{
    group::{Group, GroupId},
    item::{Item, ItemId, Row},
    registry::{Position, Registry},
};
pub use error::{BoardError, Result};
pub use export::ExportedGroup;
pub use ingest::UploadPayload;
pub use resolver::{MoveKind, Relocation};
pub use session::{DragTracker, GestureState, Session};
pub use storage::Storage;
