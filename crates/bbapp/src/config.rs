//! # Configuration
//!
//! Credentials and defaults live in a JSON file in the OS config directory
//! (`config.json` under the `bb` app dir, resolved via the `directories`
//! crate). The file uses camelCase keys and round-trips through `auth login`
//! and the workspace default prompt, so it has to stay writable: a plain
//! serde file, not a layered read-only config loader.
//!
//! Resolution order for each value:
//! 1. **Environment**: `BITBUCKET_USERNAME`, `BITBUCKET_API_TOKEN`,
//!    `BITBUCKET_WORKSPACE`.
//! 2. **Config file**: `config.json`.
//!
//! `BB_CONFIG_DIR` overrides the directory itself, which is how the
//! integration tests point the binary at a scratch location.

use crate::error::{BbError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_ENV: &str = "BB_CONFIG_DIR";
const CONFIG_FILE: &str = "config.json";
const TEMPLATES_DIR: &str = "templates";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub username: Option<String>,
    pub api_token: Option<String>,
    pub workspace: Option<String>,
    pub default_repo: Option<String>,
}

impl Config {
    /// Directory holding `config.json` and the templates subdirectory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        ProjectDirs::from("com", "bb", "bb")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(BbError::NoConfigDir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn templates_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(TEMPLATES_DIR))
    }

    /// Loads the config file. A missing or unreadable file degrades to the
    /// default (empty) config; credentials problems surface later, at use.
    pub fn load() -> Result<Config> {
        Ok(Self::load_from(&Self::config_dir()?))
    }

    pub fn load_from(dir: &Path) -> Config {
        let path = dir.join(CONFIG_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Config::default(),
        }
    }

    /// Persists the config, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_dir()?)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    pub fn username(&self) -> Option<String> {
        env_or("BITBUCKET_USERNAME", &self.username)
    }

    pub fn api_token(&self) -> Option<String> {
        env_or("BITBUCKET_API_TOKEN", &self.api_token)
    }

    pub fn workspace(&self) -> Option<String> {
        env_or("BITBUCKET_WORKSPACE", &self.workspace)
    }

    pub fn default_repo(&self) -> Option<String> {
        self.default_repo.clone().filter(|v| !v.is_empty())
    }

    /// Username and API token, or the canonical missing-credentials error.
    pub fn credentials(&self) -> Result<(String, String)> {
        match (self.username(), self.api_token()) {
            (Some(username), Some(token)) => Ok((username, token)),
            _ => Err(BbError::MissingCredentials),
        }
    }
}

fn env_or(var: &str, fallback: &Option<String>) -> Option<String> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => fallback.clone().filter(|v| !v.is_empty()),
    }
}
