use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Prefix for generated group ids (`<prefix>-<index>`)
    pub group_id_prefix: String,
    /// Title used when the upload carries none; `{n}` is the 1-based group number
    pub group_title_template: String,
    /// Leading segment of exported file names
    pub export_prefix: String,
    /// Number of committed moves kept for undo
    pub history_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            group_id_prefix: "group".to_string(),
            group_title_template: "Route {n}".to_string(),
            export_prefix: "routes".to_string(),
            history_limit: 50,
        }
    }
}

impl BoardConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.group_id_prefix.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "group_id_prefix must not be empty".to_string(),
            ));
        }
        // Item ids start with a digit; a digit-leading prefix could collide with them
        if self
            .group_id_prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
        {
            return Err(BoardError::ConfigError(format!(
                "group_id_prefix '{}' must not start with a digit",
                self.group_id_prefix
            )));
        }
        if self.export_prefix.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "export_prefix must not be empty".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(BoardError::ConfigError(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Renders the fallback title for the group at `index` (zero-based)
    pub fn group_title(&self, index: usize) -> String {
        self.group_title_template
            .replace("{n}", &(index + 1).to_string())
    }
}
