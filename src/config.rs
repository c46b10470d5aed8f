use crate::error::{Result, TermMatchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use term_match_common::SelectionMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selection_mode: SelectionMode,
    pub termbase_has_header: bool,
    pub update_has_header: bool,
    pub copy_notice_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Global,
            termbase_has_header: true,
            update_has_header: true,
            copy_notice_ms: 2000,
        }
    }
}

impl Config {
    /// ~/.config/term-match/config.json を読み込む（なければデフォルト）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TermMatchError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("term-match").join("config.json"))
    }
}
