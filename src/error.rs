use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid item ID format: {0}")]
    InvalidItemId(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Item {item} is not at index {index} of group {group}")]
    PositionMismatch {
        item: String,
        group: String,
        index: usize,
    },

    #[error("Index {index} out of bounds for group {group} (max {max})")]
    IndexOutOfBounds {
        group: String,
        index: usize,
        max: usize,
    },

    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    #[error("Duplicate group id: {0}")]
    DuplicateGroup(String),

    #[error("Group id {0} is also used as an item id")]
    IdCollision(String),

    #[error("A drag gesture is already in progress for item {0}")]
    GestureInProgress(String),

    #[error("Export not found: {0}")]
    ExportNotFound(String),

    #[error("Invalid export file name: {0}")]
    InvalidFileName(String),

    #[error("Storage not initialized")]
    StorageNotInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    ConfigWriteError(#[from] toml::ser::Error),
}
