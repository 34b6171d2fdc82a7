//! Settings loaded from `~/.booklist/config.yaml`
//!
//! Every key is optional. A missing file yields the defaults, and
//! `BOOKLIST_BASE_URL` overrides the service address.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::constants::{BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, LOG_FILE_NAME};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_base_url")]
    pub base_url: String,
    #[serde(default = "Settings::default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "Settings::default_log_dir")]
    pub log_dir: PathBuf,
}

impl Settings {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    fn default_log_dir() -> PathBuf {
        PathBuf::from(".")
    }

    /// Config file location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".booklist")
            .join("config.yaml")
    }

    /// Load from the default location and apply the environment override
    pub fn load() -> Result<Self> {
        let settings = Self::load_from(&Self::default_path())?;
        Ok(settings.with_base_url_override(std::env::var(BASE_URL_ENV).ok()))
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Open `booklist.log` under `log_dir`, creating the directory if needed
    pub fn log_appender(&self) -> Result<RollingFileAppender> {
        RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_NAME)
            .build(&self.log_dir)
            .with_context(|| format!("failed to open log file in {}", self.log_dir.display()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: Self::default_base_url(),
            request_timeout_secs: Self::default_timeout_secs(),
            log_dir: Self::default_log_dir(),
        }
    }
}
