use anyhow::{Context, Result};
use ps2tap_core::SamplerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Polling quantum in microseconds when tapping real GPIO lines.
    pub quantum_us: u32,
    /// Wait budget for a transmission to start, in quanta (~1 s by default).
    pub idle_timeout_quanta: u32,
    /// Wait budget for the line to return to idle after a bad frame.
    pub resync_timeout_quanta: u32,
    pub show_timestamps: bool,
    pub show_hex: bool,
    pub max_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quantum_us: ps2tap_core::DEFAULT_QUANTUM_US,
            idle_timeout_quanta: 200_000,
            resync_timeout_quanta: 20_000,
            show_timestamps: false,
            show_hex: true,
            max_entries: 10_000,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ps2tap").join("config.json"))
    }

    /// Loads the config from `path`, or from the platform config dir when no
    /// path is given. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn sampler(&self) -> SamplerConfig {
        SamplerConfig {
            idle_timeout_quanta: self.idle_timeout_quanta,
            resync_timeout_quanta: self.resync_timeout_quanta,
        }
    }
}
