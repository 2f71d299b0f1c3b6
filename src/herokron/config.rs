use crate::error::{HerokronError, Result};
use crate::provider::heroku::DEFAULT_API_URL;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const HOME_ENV: &str = "HEROKRON_HOME";
pub const API_URL_ENV: &str = "HEROKRON_API_URL";
pub const LOG_ENV: &str = "HEROKRON_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Process settings taken from the environment. Everything the user configures through
/// the CLI (keys, webhook, color) lives in the database instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HerokronConfig {
    /// Directory holding `database.json`
    pub data_dir: PathBuf,

    /// Base URL of the Heroku Platform API
    pub api_url: String,
}

impl HerokronConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = match var(HOME_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let api_url = var(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self { data_dir, api_url })
    }
}

/// Per-user data directory:
/// `~/.local/share/herokron` on Linux, `~/Library/Application Support/Herokron` on macOS,
/// `%APPDATA%\Herokron\data` on Windows.
pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "Herokron")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| HerokronError::Store("Could not determine the data directory".to_string()))
}
