use crate::{
    config::BoardConfig,
    domain::Registry,
    error::Result,
    export::{export, export_file_name, ExportedGroup},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;

pub mod file_storage;

/// Storage trait for board configuration and materialised exports
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Loads the board configuration
    async fn load_config(&self) -> Result<BoardConfig>;

    /// Saves the board configuration
    async fn save_config(&self, config: &BoardConfig) -> Result<()>;

    /// Writes an export under the given file name, returning where it landed
    async fn save_export(&self, file_name: &str, groups: &[ExportedGroup]) -> Result<PathBuf>;

    /// Loads a previously saved export
    async fn load_export(&self, file_name: &str) -> Result<Vec<ExportedGroup>>;

    /// Lists saved export file names, sorted
    async fn list_exports(&self) -> Result<Vec<String>>;

    /// Checks if the storage has been initialized
    async fn is_initialized(&self) -> bool;
}

/// Exports the registry and saves it under a name derived from the upload
pub async fn save_arrangement(
    storage: &dyn Storage,
    registry: &Registry,
    source_filename: &str,
    config: &BoardConfig,
    date: NaiveDate,
) -> Result<PathBuf> {
    let file_name = export_file_name(source_filename, &config.export_prefix, date);
    let path = storage.save_export(&file_name, &export(registry)).await?;
    tracing::info!(path = %path.display(), groups = registry.groups().len(), "saved arrangement");
    Ok(path)
}
