///! CLI configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SERVER: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend root; API paths are appended as `/api/...`
    pub server: String,
    /// Default output format (table, json, yaml)
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            output: "table".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok(config)
    }

    fn config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME is not set")?;
        Ok(PathBuf::from(home).join(".config/hrms"))
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("cli.toml"))
    }

    /// Directory holding the persisted session, one file per entry
    pub fn session_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("cli.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(&path, "server = \"https://hr.example.com\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server, "https://hr.example.com");
        assert_eq!(config.output, "table");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(&path, "server = [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
