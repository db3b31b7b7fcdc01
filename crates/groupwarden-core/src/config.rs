//! Warden configuration
//!
//! Built once at startup and shared behind an `Arc`. Loaded from TOML,
//! falls back to defaults when no config file exists.

use crate::error::{Error, Result};
use crate::types::{GroupId, MemberStatus, UserId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `owner_id`.
pub const OWNER_ENV: &str = "GROUPWARDEN_OWNER_ID";

pub const DEFAULT_MAX_WARNINGS: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    /// The single identity allowed to run owner diagnostics. `0` means no owner.
    pub owner_id: UserId,
    /// Warnings at which a member is excluded.
    pub max_warnings: u32,
    /// SQLite database holding warnings and rules.
    pub database: PathBuf,
    /// Static membership used when no platform lookup is wired in.
    pub roster: Vec<RosterEntry>,
}

/// One known membership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub status: MemberStatus,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            owner_id: UserId::new(0),
            max_warnings: DEFAULT_MAX_WARNINGS,
            database: PathBuf::from("data.db"),
            roster: Vec::new(),
        }
    }
}

impl WardenConfig {
    /// Load config from a TOML file. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml(&content)
                    .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))?;
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Serialize back to the TOML form `from_toml` reads.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Apply `GROUPWARDEN_OWNER_ID` if it is set.
    pub fn with_env_overrides(self) -> Result<Self> {
        match std::env::var(OWNER_ENV) {
            Ok(raw) => self.with_owner_str(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_owner_str(mut self, raw: &str) -> Result<Self> {
        let id = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::ConfigError(format!("{OWNER_ENV}={raw:?}: {e}")))?;
        self.owner_id = UserId::new(id);
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_warnings == 0 {
            return Err(Error::ConfigError("max_warnings must be at least 1".into()));
        }
        Ok(())
    }

    pub fn has_owner(&self) -> bool {
        self.owner_id.get() != 0
    }
}
