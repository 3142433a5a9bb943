//! Host configuration, loaded from `<config dir>/obx/config.toml`.
//!
//! Every field has a serde default so a partial (or absent) file works; the
//! core itself only ever sees the resolved values.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Channel catalog file. Missing file → builtin channel list.
    #[serde(default = "default_channels_toml")]
    pub channels_toml: PathBuf,
    /// Log + command-trace directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Cadence of the simulated channel-scan producer.
    #[serde(default = "default_scan_tick_ms")]
    pub tick_ms: u64,
    /// Mean progress added per tick, in percent. The producer jitters
    /// around this value.
    #[serde(default = "default_scan_step_pct")]
    pub step_pct: f32,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            channels_toml: default_channels_toml(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_scan_tick_ms(),
            step_pct: default_scan_step_pct(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("obx")
}

fn default_channels_toml() -> PathBuf {
    config_dir().join("channels.toml")
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("obx")
}

fn default_scan_tick_ms() -> u64 {
    400
}

fn default_scan_step_pct() -> f32 {
    4.0
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }
}
