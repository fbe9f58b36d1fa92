//! `sauti-grid` configuration.
//!
//! Read from TOML in the platform config directory, or from `--config`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use sauti_query::DEFAULT_API_BASE;

/// Environment variable consulted for the bearer token unless configured otherwise.
pub const DEFAULT_TOKEN_ENV: &str = "SAUTI_API_TOKEN";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// API root the `client/` endpoints hang off.
    pub api_base: String,
    /// Where the session keys are stored. Defaults to the platform data dir.
    pub state_dir: Option<PathBuf>,
    /// Environment variable holding the bearer token.
    pub token_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            state_dir: None,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            timeout_secs: 30,
        }
    }
}

impl GridConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("read config {}", path.display()))?;
                Self::parse(&content, path)
            }
            None => match Self::config_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Load from a file that may not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("read config {}", path.display())),
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Default config file location.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Resolved state directory.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().join("session"))
                .unwrap_or_else(|| PathBuf::from(".sauti-grid"))
        })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "Sauti", "sauti-grid")
}
