use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use timemachine_core::{text, Theme, ThemeConfig};
use timemachine_git::{GatewayConfig, Identity};

/// Shortest accepted tick interval
const MIN_TICK_RATE_MS: u64 = 16;

/// User configuration for timemachine
///
/// Read from `config.toml` in the platform config directory. Every section
/// and field is optional; missing values fall back to the defaults below.
/// The file is only ever read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Remote used by sync
    pub sync: SyncConfig,
    /// Authors written into checkpoints
    pub identity: IdentityConfig,
    pub ui: UiConfig,
    pub debug: DebugConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub remote: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub checkpoint_name: String,
    pub checkpoint_email: String,
    /// Author of automatic conflict-resolution commits
    pub conflict_name: String,
    pub conflict_email: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        let defaults = GatewayConfig::default();
        Self {
            checkpoint_name: defaults.checkpoint_identity.name,
            checkpoint_email: defaults.checkpoint_identity.email,
            conflict_name: defaults.conflict_identity.name,
            conflict_email: defaults.conflict_identity.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Suggested checkpoint descriptions, picked with the digit keys
    pub suggestions: Vec<String>,
    /// Spinner and redraw interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            suggestions: text::default_suggestions(),
            tick_rate_ms: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    /// Log file written when debugging is enabled, relative to the
    /// current directory unless absolute
    pub log_file: PathBuf,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("debug.log"),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one the default location is
    /// used, and a missing file there yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config from {:?}", path))?;
        Self::parse(&contents).wrap_err_with(|| format!("Failed to parse config from {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.theme()?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| eyre!("Failed to find config directory"))?;
        Ok(config_dir.join("timemachine").join("config.toml"))
    }

    pub fn theme(&self) -> Result<Theme> {
        Theme::from_config(&self.theme).map_err(|name| eyre!("Unknown theme preset: {}", name))
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            remote: self.sync.remote.clone(),
            checkpoint_identity: Identity::new(
                &self.identity.checkpoint_name,
                &self.identity.checkpoint_email,
            ),
            conflict_identity: Identity::new(
                &self.identity.conflict_name,
                &self.identity.conflict_email,
            ),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms.max(MIN_TICK_RATE_MS))
    }
}
