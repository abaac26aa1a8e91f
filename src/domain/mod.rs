pub mod group;
pub mod item;
pub mod registry;

pub use group::{Group, GroupId};
pub use item::{Item, ItemId, Row};
pub use registry::{Position, Registry};
