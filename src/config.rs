//! Configuration file for preset durations
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_POMODORO_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config format: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub presets: PresetMinutes,
}

/// Default minutes offered by each preset
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PresetMinutes {
    pub pomodoro: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Default for PresetMinutes {
    fn default() -> Self {
        Self {
            pomodoro: DEFAULT_POMODORO_MINUTES,
            short_break: DEFAULT_SHORT_BREAK_MINUTES,
            long_break: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}

impl Config {
    /// Load from the default location, creating it on first run
    pub fn load() -> Self {
        Self::load_or_create(&config_path())
    }

    /// Read `path`; fall back to defaults on any failure.
    ///
    /// A missing file is written with the defaults so users can edit it.
    pub fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.save(path) {
                Ok(()) => info!("wrote default config to {}", path.display()),
                Err(e) => warn!("{}", e),
            }
            return config;
        }

        match Self::read(path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config.validated()
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(write_err)
    }

    /// Replace zero-minute presets with the built-in defaults
    pub fn validated(mut self) -> Self {
        let defaults = PresetMinutes::default();
        let presets = &mut self.presets;
        for (name, value, fallback) in [
            ("pomodoro", &mut presets.pomodoro, defaults.pomodoro),
            ("short_break", &mut presets.short_break, defaults.short_break),
            ("long_break", &mut presets.long_break, defaults.long_break),
        ] {
            if *value == 0 {
                warn!("preset {} must be greater than zero, using {}", name, fallback);
                *value = fallback;
            }
        }
        self
    }
}

/// Directory holding the config file and the log
pub fn config_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("pomo-cli"))
}

pub fn config_path() -> PathBuf {
    match config_dir() {
        Some(dir) => dir.join("config.json"),
        None => PathBuf::from("pomo-cli-config.json"),
    }
}
