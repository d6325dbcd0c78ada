//! Persistent driver settings
//!
//! Only the device selection is stored; lighting state always lives on the
//! keyboard itself.

use razer_transport::DEFAULT_DEVICE_ROOT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which keyboard the driver talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// razerkbd driver directory
    pub device_root: PathBuf,
    /// Device folder inside `device_root`, e.g. `0003:1532:0226.0003`
    pub device_folder: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            device_root: PathBuf::from(DEFAULT_DEVICE_ROOT),
            device_folder: None,
        }
    }
}

impl DriverConfig {
    /// Default config path (~/.config/razer-driver/config.toml)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("razer-driver")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: DriverConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
