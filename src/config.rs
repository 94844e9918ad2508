use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::inference::DEFAULT_ENDPOINT;

/// On-disk settings. Everything is optional; a missing file or field
/// falls back to defaults. Conversation and theme state are never
/// persisted.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub api_token: Option<String>,
    pub endpoint: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// API token for the inference endpoint: `HF_API_TOKEN` env var wins
    /// over the config file. `None` means request without authorization.
    pub fn resolve_token(&self) -> Option<String> {
        std::env::var("HF_API_TOKEN")
            .ok()
            .or_else(|| self.api_token.clone())
    }

    pub fn resolve_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("pizzabot").join("config.json"))
    }
}
