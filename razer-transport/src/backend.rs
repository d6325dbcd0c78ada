//! Control-file backends
//!
//! [`ControlFs`] is the seam between the protocol layer and the file system.
//! [`SysfsFs`] talks to the real driver files through `tokio::fs`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

use crate::error::TransportError;

/// File-system operations needed to drive the keyboard
#[async_trait]
pub trait ControlFs: Send + Sync {
    /// Open a control file for writing (created and truncated like `fopen("w")`)
    async fn open_write(&self, path: &Path) -> Result<Box<dyn ControlHandle>, TransportError>;

    /// Open, write `data` in one go, and close
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), TransportError>;

    /// Read the whole contents of a control file
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, TransportError>;
}

/// A long-lived writable control file
#[async_trait]
pub trait ControlHandle: Send {
    /// Path this handle was opened on
    fn path(&self) -> &Path;

    /// Write `data`; returns once the write has completed or failed
    async fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Release the descriptor. The handle must not be written after this.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Backend for the real sysfs attribute files
#[derive(Debug, Clone, Copy, Default)]
pub struct SysfsFs;

impl SysfsFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ControlFs for SysfsFs {
    async fn open_write(&self, path: &Path) -> Result<Box<dyn ControlHandle>, TransportError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await
            .map_err(|e| TransportError::io("open", path, e))?;
        debug!("Opened {}", path.display());
        Ok(Box::new(SysfsHandle {
            path: path.to_path_buf(),
            file: Some(file),
        }))
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), TransportError> {
        trace!("write {} <- {:02x?}", path.display(), data);
        tokio::fs::write(path, data)
            .await
            .map_err(|e| TransportError::io("write", path, e))
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, TransportError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| TransportError::io("read", path, e))
    }
}

/// Open sysfs attribute file
struct SysfsHandle {
    path: PathBuf,
    file: Option<File>,
}

#[async_trait]
impl ControlHandle for SysfsHandle {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let path = &self.path;
        let file = self.file.as_mut().ok_or(TransportError::ChannelClosed)?;
        // tokio hands the write to a blocking thread; flush waits for it and
        // surfaces its error, so the driver has the bytes when this returns
        file.write_all(data)
            .await
            .map_err(|e| TransportError::io("write", path, e))?;
        file.flush()
            .await
            .map_err(|e| TransportError::io("write", path, e))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };
        let flushed = file
            .flush()
            .await
            .map_err(|e| TransportError::io("close", &self.path, e));
        // into_std waits for any in-flight operation, then the descriptor is dropped here
        drop(file.into_std().await);
        debug!("Closed {}", self.path.display());
        flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[tokio::test]
    async fn test_sysfs_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix_effect_static");
        let fs = SysfsFs::new();

        fs.write_file(&path, &[1, 2, 3]).await.unwrap();
        assert_eq!(fs.read_file(&path).await.unwrap(), vec![1, 2, 3]);

        // Truncates like the driver expects of a fresh write
        fs.write_file(&path, &[9]).await.unwrap();
        assert_eq!(fs.read_file(&path).await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn test_sysfs_handle_sequential_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix_custom_frame");
        let fs = SysfsFs::new();

        let mut handle = fs.open_write(&path).await.unwrap();
        assert_eq!(handle.path(), path.as_path());
        handle.write_all(b"ab").await.unwrap();
        handle.write_all(b"cd").await.unwrap();
        handle.close().await.unwrap();
        // Second close is a no-op
        handle.close().await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"abcd");
        assert!(matches!(
            handle.write_all(b"x").await,
            Err(TransportError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_sysfs_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-device").join("device_type");
        let fs = SysfsFs::new();

        let err = fs.read_file(&path).await.unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(fs.open_write(&path).await.is_err());
    }
}
