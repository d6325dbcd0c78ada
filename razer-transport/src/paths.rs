//! Control-file path resolution
//!
//! Every control file lives at `<root>/<device folder>/<file name>`. The root
//! defaults to the razerkbd driver directory but is configurable so a fake
//! tree can stand in for sysfs.

use std::path::{Path, PathBuf};

use crate::protocol::DEFAULT_DEVICE_ROOT;

/// Device identity: driver root plus the bound device's folder name
/// (e.g. `0003:1532:0226.0003`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePaths {
    root: PathBuf,
    folder: String,
}

impl DevicePaths {
    /// Create paths for `folder` under `root`
    pub fn new(root: impl Into<PathBuf>, folder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            folder: folder.into(),
        }
    }

    /// Driver root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Device folder name
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Replace the device folder name
    pub fn set_folder(&mut self, folder: impl Into<String>) {
        self.folder = folder.into();
    }

    /// Full path of a control file for this device
    pub fn resolve(&self, file: &str) -> PathBuf {
        self.root.join(&self.folder).join(file)
    }
}

impl Default for DevicePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_ROOT, "")
    }
}
