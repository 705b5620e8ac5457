//! User configuration loaded from `~/.flapper/config.json`.
//!
//! Every field is optional in the file; missing ones take their defaults.

use crate::game::Variant;
use crate::input::{Key, KeyBindings};
use crate::logging::parse_filter;
use crate::utils::persistence::{read_if_exists, save_json, AppDirs};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// ~60 frames per second.
pub const DEFAULT_FRAME_MS: u64 = 16;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("not overwriting {}: {reason}", .path.display())]
    Overwrite { path: PathBuf, reason: String },
}

/// Per-action key overrides on top of the variant's bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flap: Option<Key>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Key>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    pub keys: KeyOverrides,
    /// Target frame interval in milliseconds.
    pub frame_ms: u64,
    /// `tracing_subscriber::EnvFilter` directives, overridden by `FLAPPER_LOG`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            keys: KeyOverrides::default(),
            frame_ms: DEFAULT_FRAME_MS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load from the app directory. A missing file yields the defaults.
    pub fn load(dirs: &AppDirs) -> Result<Self, ConfigError> {
        match read_if_exists(&dirs.config_path())? {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, dirs: &AppDirs) -> Result<(), ConfigError> {
        save_json(&dirs.config_path(), self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.frame_ms) {
            return Err(ConfigError::Invalid {
                field: "frame_ms",
                reason: format!("{} is outside 1..=1000", self.frame_ms),
            });
        }
        let bindings = self.key_bindings();
        if bindings.flap == bindings.start {
            return Err(ConfigError::Invalid {
                field: "keys",
                reason: format!("flap and start are both bound to {}", bindings.flap),
            });
        }
        if let Err(reason) = parse_filter(&self.log_filter) {
            return Err(ConfigError::Invalid {
                field: "log_filter",
                reason,
            });
        }
        Ok(())
    }

    /// The variant's bindings with this config's overrides applied.
    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::for_variant(self.variant).with_overrides(self.keys.flap, self.keys.start)
    }
}
