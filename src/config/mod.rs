//! Configuration module
//!
//! Persists the project API key as a single JSON record at `~/.skald/config`.
//! The record is always rewritten whole; there is no partial update.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored credential record
///
/// Wire format matches the config file: `{"apiKey": "...", "updatedAt": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub api_key: String,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential stamped with the current time
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            updated_at: Utc::now(),
        }
    }
}

/// Handle to the per-user config directory
///
/// Loaded once at process start and passed into command handlers; commands
/// never re-read the file mid-invocation.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the default `~/.skald` directory
    pub fn open_default() -> Result<Self> {
        let home = directories::UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not determine home directory")?;
        Ok(Self::at(home.join(".skald")))
    }

    /// Store rooted at an explicit directory
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the credential file
    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config")
    }

    /// Overwrite the credential file, creating the directory if needed
    pub fn save(&self, credential: &Credential) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create config directory {}", self.dir.display()))?;

        let content = serde_json::to_string_pretty(credential)?;
        std::fs::write(self.config_path(), content).with_context(|| {
            format!("Failed to write config to {}", self.config_path().display())
        })?;

        Ok(())
    }

    /// Read the stored credential
    ///
    /// An absent file is `None`. A corrupt file is reported and also treated
    /// as `None` so callers see a uniform "not authenticated" state.
    pub fn load(&self) -> Option<Credential> {
        let path = self.config_path();
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("Error reading config: {}", err);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(credential) => Some(credential),
            Err(err) => {
                eprintln!("Error reading config: {}", err);
                None
            }
        }
    }

    /// Return the API key or fail the command with an auth hint
    pub fn require_auth(&self, command: &str) -> Result<String> {
        match self.load() {
            Some(credential) if !credential.api_key.is_empty() => Ok(credential.api_key),
            _ => bail!(
                "Authentication required. Please run \"skald auth\" before running \"{}\".",
                command
            ),
        }
    }

    /// Directory this store is rooted at
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
