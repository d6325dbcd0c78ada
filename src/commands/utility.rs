//! Utility command handlers.

use super::CommandResult;
use razer_driver::config::DriverConfig;
use std::path::Path;
use tracing::warn;

/// Record the device folder in the config file
pub fn set_device(config_path: &Path, mut config: DriverConfig, folder: String) -> CommandResult {
    if !config.device_root.join(&folder).is_dir() {
        warn!("{} not found under {}", folder, config.device_root.display());
    }

    config.device_folder = Some(folder);
    config.save(config_path)?;
    println!("Saved device selection to {}", config_path.display());
    Ok(())
}
