//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (info)
//! - `effect`: Hardware effects and indicator LEDs
//! - `matrix`: Custom matrix streaming (fill, image, rainbow)
//! - `utility`: Utility commands (set-device)

pub mod effect;
pub mod matrix;
pub mod query;
pub mod utility;

use anyhow::{bail, Context};
use razer_driver::config::DriverConfig;
use razer_keyboard::KeyboardController;
use razer_transport::protocol::file;
use razer_transport::{ControlFs, FileFilter, MemoryFs, PrinterConfig, PrinterFs, SysfsFs};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Device folder used when dry-running without a configured device
const DRY_RUN_DEVICE: &str = "dry-run";

/// Where and how to reach the keyboard, after merging flags and config
#[derive(Debug, Clone)]
pub struct Target {
    pub root: PathBuf,
    pub device: Option<String>,
    pub printer: Option<PrinterConfig>,
    pub dry_run: bool,
}

/// Open a controller for the selected device
pub fn open_keyboard(target: &Target) -> anyhow::Result<KeyboardController> {
    let device = match (&target.device, target.dry_run) {
        (Some(device), _) => device.clone(),
        (None, true) => DRY_RUN_DEVICE.to_string(),
        (None, false) => bail!(
            "no device selected; pass --device or run `razer-driver set-device <folder>`"
        ),
    };

    let base: Arc<dyn ControlFs> = if target.dry_run {
        Arc::new(dry_run_fs(&target.root.join(&device)))
    } else {
        Arc::new(SysfsFs::new())
    };
    let fs = match &target.printer {
        Some(config) => PrinterFs::wrap(base, config.clone()),
        None => base,
    };

    debug!("Using {} under {}", device, target.root.display());
    let mut keyboard = KeyboardController::with_backend(fs, &target.root);
    keyboard.set_device_folder_name(device)?;
    Ok(keyboard)
}

/// In-memory backend with placeholder identity files
fn dry_run_fs(device_dir: &Path) -> MemoryFs {
    let fs = MemoryFs::new();
    fs.set_file(device_dir.join(file::DEVICE_TYPE), "Dry run keyboard\n");
    fs.set_file(device_dir.join(file::DEVICE_SERIAL), "DRYRUN000000\n");
    fs.set_file(device_dir.join(file::FIRMWARE_VERSION), "v0.0\n");
    fs
}

/// Merge CLI flags over the config file
pub fn resolve_target(
    config: &DriverConfig,
    root: Option<PathBuf>,
    device: Option<String>,
    printer: Option<PrinterConfig>,
    dry_run: bool,
) -> Target {
    Target {
        root: root.unwrap_or_else(|| config.device_root.clone()),
        device: device.or_else(|| config.device_folder.clone()),
        printer,
        dry_run,
    }
}

/// Set up a Ctrl-C handler that sets the given flag to false when triggered.
/// Returns the Arc<AtomicBool> for use in the main loop.
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    running
}

/// Create printer config from CLI flags
pub fn create_printer_config(
    monitor: bool,
    hex: bool,
    filter: Option<&str>,
) -> anyhow::Result<Option<PrinterConfig>> {
    if !monitor {
        return Ok(None);
    }

    let filter = match filter {
        Some(f) => f
            .parse::<FileFilter>()
            .map_err(anyhow::Error::msg)
            .context("invalid --filter")?,
        None => FileFilter::All,
    };

    Ok(Some(
        PrinterConfig::default().with_hex(hex).with_filter(filter),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printer_config_only_when_monitoring() {
        assert!(create_printer_config(false, true, Some("frames"))
            .unwrap()
            .is_none());
        assert!(create_printer_config(true, false, None).unwrap().is_some());
        assert!(create_printer_config(true, false, Some("bogus")).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = DriverConfig {
            device_root: PathBuf::from("/cfg/root"),
            device_folder: Some("cfg-device".into()),
        };

        let target = resolve_target(&config, None, None, None, false);
        assert_eq!(target.root, Path::new("/cfg/root"));
        assert_eq!(target.device.as_deref(), Some("cfg-device"));

        let target = resolve_target(
            &config,
            Some("/flag/root".into()),
            Some("flag-device".into()),
            None,
            false,
        );
        assert_eq!(target.root, Path::new("/flag/root"));
        assert_eq!(target.device.as_deref(), Some("flag-device"));
    }

    #[tokio::test]
    async fn test_dry_run_reads_placeholders() {
        let target = Target {
            root: PathBuf::from("/nonexistent"),
            device: None,
            printer: None,
            dry_run: true,
        };
        let keyboard = open_keyboard(&target).unwrap();
        assert_eq!(keyboard.device_folder_name(), DRY_RUN_DEVICE);
        assert_eq!(keyboard.get_serial_number().await.unwrap(), "DRYRUN000000");
    }

    #[test]
    fn test_missing_device_is_an_error() {
        // A folder under the root is never picked automatically
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("0003:1532:0226.0003")).unwrap();
        let target = Target {
            root: dir.path().to_path_buf(),
            device: None,
            printer: None,
            dry_run: false,
        };
        let Err(err) = open_keyboard(&target) else {
            panic!("expected an error without a selected device");
        };
        assert!(err.to_string().contains("set-device"));
    }
}
