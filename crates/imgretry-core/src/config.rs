use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::upstream::UpstreamLimits;

/// Simulated upstream queue (`[upstream]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Requests the upstream keeps queued before answering 429.
    pub max_queued: u32,
    /// Queue timeout in milliseconds; admitted requests leave the queue after this.
    pub queue_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            max_queued: UpstreamLimits::THUMBOR.max_queued,
            queue_timeout_ms: UpstreamLimits::THUMBOR.queue_timeout.as_millis() as u64,
        }
    }
}

impl UpstreamConfig {
    pub fn limits(&self) -> UpstreamLimits {
        UpstreamLimits {
            max_queued: self.max_queued.max(1),
            queue_timeout: Duration::from_millis(self.queue_timeout_ms),
        }
    }
}

/// Simulation run parameters (`[simulate]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateConfig {
    /// Number of gallery images loaded in the initial burst.
    pub images: usize,
    /// Give up waiting for images after this many seconds.
    pub max_duration_secs: u64,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            images: 80,
            max_duration_secs: 60,
        }
    }
}

impl SimulateConfig {
    pub fn max_duration(&self) -> Duration {
        Duration::from_secs(self.max_duration_secs)
    }
}

/// Global configuration loaded from `~/.config/imgretry/config.toml`.
///
/// Only the simulation is configurable; the reload interval is fixed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImgretryConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub simulate: SimulateConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgretry")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgretryConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, writing defaults there if it is missing.
pub fn load_or_init_at(path: &Path) -> Result<ImgretryConfig> {
    if !path.exists() {
        let default_cfg = ImgretryConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ImgretryConfig = toml::from_str(&data)?;
    Ok(cfg)
}
