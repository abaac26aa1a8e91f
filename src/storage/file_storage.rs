use crate::{
    config::BoardConfig,
    error::{BoardError, Result},
    export::ExportedGroup,
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const ROUTEBOARD_DIR: &'static str = ".routeboard";
    const EXPORTS_DIR: &'static str = "exports";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::ROUTEBOARD_DIR),
        }
    }

    fn exports_dir(&self) -> PathBuf {
        self.root_path.join(Self::EXPORTS_DIR)
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    fn export_file(&self, file_name: &str) -> Result<PathBuf> {
        let plain = Path::new(file_name)
            .file_name()
            .is_some_and(|name| name == file_name);
        if !plain || !file_name.ends_with(".json") {
            return Err(BoardError::InvalidFileName(file_name.to_string()));
        }
        Ok(self.exports_dir().join(file_name))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.exports_dir()).await?;

        if !self.config_file().exists() {
            self.save_config(&BoardConfig::default()).await?;
        }

        Ok(())
    }

    async fn load_config(&self) -> Result<BoardConfig> {
        let config_file = self.config_file();

        if !config_file.exists() {
            return Err(BoardError::StorageNotInitialized);
        }

        let contents = fs::read_to_string(&config_file).await?;
        BoardConfig::from_toml_str(&contents)
    }

    async fn save_config(&self, config: &BoardConfig) -> Result<()> {
        config.validate()?;
        self.ensure_directory_exists(&self.root_path).await?;

        fs::write(self.config_file(), config.to_toml_string()?).await?;
        Ok(())
    }

    async fn save_export(&self, file_name: &str, groups: &[ExportedGroup]) -> Result<PathBuf> {
        let file_path = self.export_file(file_name)?;
        self.ensure_directory_exists(&self.exports_dir()).await?;

        let json = serde_json::to_string_pretty(groups)?;
        fs::write(&file_path, json).await?;

        Ok(file_path)
    }

    async fn load_export(&self, file_name: &str) -> Result<Vec<ExportedGroup>> {
        let file_path = self.export_file(file_name)?;

        if !file_path.exists() {
            return Err(BoardError::ExportNotFound(file_name.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let groups: Vec<ExportedGroup> = serde_json::from_str(&contents)?;

        Ok(groups)
    }

    async fn list_exports(&self) -> Result<Vec<String>> {
        let exports_dir = self.exports_dir();

        if !exports_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&exports_dir).await?;
        let mut names: Vec<String> = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.config_file().exists()
    }
}
