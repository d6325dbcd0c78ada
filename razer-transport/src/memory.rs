//! In-memory control-file backend
//!
//! Records every operation in program order and keeps written bytes per path.
//! Used for dry runs and for exercising the channel state machine without a
//! device, including injected open/write failures.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::{ControlFs, ControlHandle};
use crate::error::TransportError;

/// One recorded file-system operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOp {
    Open(PathBuf),
    Write { path: PathBuf, data: Vec<u8> },
    Close(PathBuf),
    WriteFile { path: PathBuf, data: Vec<u8> },
    Read(PathBuf),
}

impl FsOp {
    pub fn path(&self) -> &Path {
        match self {
            Self::Open(p) | Self::Close(p) | Self::Read(p) => p,
            Self::Write { path, .. } | Self::WriteFile { path, .. } => path,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    ops: Vec<FsOp>,
    files: HashMap<PathBuf, Vec<u8>>,
    fail_open: HashSet<PathBuf>,
    fail_write: HashSet<PathBuf>,
    open_handles: usize,
}

/// Control-file backend that lives entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the contents returned when `path` is read
    pub fn set_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.state.lock().files.insert(path.into(), contents.into());
    }

    /// Make every open of `path` fail
    pub fn fail_open(&self, path: impl Into<PathBuf>) {
        self.state.lock().fail_open.insert(path.into());
    }

    /// Make every write to `path` fail (handle writes and one-shot writes)
    pub fn fail_write(&self, path: impl Into<PathBuf>) {
        self.state.lock().fail_write.insert(path.into());
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        let mut state = self.state.lock();
        state.fail_open.clear();
        state.fail_write.clear();
    }

    /// Operations so far, oldest first
    pub fn ops(&self) -> Vec<FsOp> {
        self.state.lock().ops.clone()
    }

    /// Forget recorded operations
    pub fn clear_ops(&self) {
        self.state.lock().ops.clear();
    }

    /// Handles opened and not yet closed
    pub fn open_handles(&self) -> usize {
        self.state.lock().open_handles
    }

    /// Bytes accumulated at `path` (handle writes append, one-shot writes replace)
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.state.lock().files.get(path).cloned()
    }

    fn injected(op: &'static str, path: &Path) -> TransportError {
        TransportError::io(
            op,
            path,
            io::Error::other("injected failure"),
        )
    }
}

#[async_trait]
impl ControlFs for MemoryFs {
    async fn open_write(&self, path: &Path) -> Result<Box<dyn ControlHandle>, TransportError> {
        let mut state = self.state.lock();
        state.ops.push(FsOp::Open(path.to_path_buf()));
        if state.fail_open.contains(path) {
            return Err(Self::injected("open", path));
        }
        state.files.insert(path.to_path_buf(), Vec::new());
        state.open_handles += 1;
        Ok(Box::new(MemoryHandle {
            path: path.to_path_buf(),
            state: Arc::clone(&self.state),
            open: true,
        }))
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.ops.push(FsOp::WriteFile {
            path: path.to_path_buf(),
            data: data.to_vec(),
        });
        if state.fail_open.contains(path) {
            return Err(Self::injected("open", path));
        }
        if state.fail_write.contains(path) {
            return Err(Self::injected("write", path));
        }
        state.files.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state.lock();
        state.ops.push(FsOp::Read(path.to_path_buf()));
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| TransportError::io("read", path, io::ErrorKind::NotFound.into()))
    }
}

struct MemoryHandle {
    path: PathBuf,
    state: Arc<Mutex<MemoryState>>,
    open: bool,
}

#[async_trait]
impl ControlHandle for MemoryHandle {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::ChannelClosed);
        }
        let mut state = self.state.lock();
        state.ops.push(FsOp::Write {
            path: self.path.clone(),
            data: data.to_vec(),
        });
        if state.fail_write.contains(&self.path) {
            return Err(MemoryFs::injected("write", &self.path));
        }
        state
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(data);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        let mut state = self.state.lock();
        state.ops.push(FsOp::Close(self.path.clone()));
        state.open_handles -= 1;
        Ok(())
    }
}
