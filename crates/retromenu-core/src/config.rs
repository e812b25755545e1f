//! Menu configuration
//!
//! Timing windows and storage location, loaded from
//! `~/.config/retromenu/config.toml` when present.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_DEBOUNCE_WINDOW_MS: i64 = 200;
pub const DEFAULT_PRESS_CYCLE_TIMEOUT_MS: i64 = 500;
pub const DEFAULT_TOUCH_ACTIVATION_DELAY_MS: i64 = 100;
pub const DEFAULT_GRACE_PERIOD_MS: i64 = 200;
pub const DEFAULT_BLOCKED_KEYS_CLEAR_MS: i64 = 500;

/// Tunables for the navigation subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Minimum gap between two processed events
    pub debounce_window_ms: i64,
    /// Separate window for `Navigate` events (uniform window when unset)
    pub navigate_debounce_ms: Option<i64>,
    /// DOWN-to-DOWN gap that starts a new press cycle
    pub press_cycle_timeout_ms: i64,
    /// Delay between touch highlight and activation
    pub touch_activation_delay_ms: i64,
    /// How long the closing button stays intercepted after close
    pub grace_period_ms: i64,
    /// How long keys held at menu open stay blocked after close
    pub blocked_keys_clear_ms: i64,
    /// Digits 1-9 jump straight to an item
    pub quick_jump_keys: bool,
    /// Emulation speed restored on close when the host has no preference
    pub default_game_speed: u32,
    /// Root of the save-slot directory tree
    pub saves_dir: Option<PathBuf>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            navigate_debounce_ms: None,
            press_cycle_timeout_ms: DEFAULT_PRESS_CYCLE_TIMEOUT_MS,
            touch_activation_delay_ms: DEFAULT_TOUCH_ACTIVATION_DELAY_MS,
            grace_period_ms: DEFAULT_GRACE_PERIOD_MS,
            blocked_keys_clear_ms: DEFAULT_BLOCKED_KEYS_CLEAR_MS,
            quick_jump_keys: true,
            default_game_speed: 1,
            saves_dir: None,
        }
    }
}

impl MenuConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("retromenu").join("config.toml"))
    }

    /// Default data directory (saves, logs)
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("retromenu")
    }

    /// Load from a TOML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load from the default location, falling back to defaults
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: MenuConfig = toml::from_str(text)?;
        tracing::info!(
            debounce_ms = config.debounce_window_ms,
            press_cycle_ms = config.press_cycle_timeout_ms,
            "Loaded menu config"
        );
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Saves directory, defaulting under the data directory
    pub fn saves_root(&self) -> PathBuf {
        self.saves_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }
}
