use anyhow::{Context, Result};
use cora_identity::OAuthSettings;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub oauth: OAuthSettings,
    /// Reject `/oauth/exchange` calls whose `state` was not issued by `/oauth/login`.
    #[serde(rename = "validateState", default = "default_validate_state")]
    pub validate_state: bool,
}

fn default_validate_state() -> bool {
    true
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Error parsing config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }
}
