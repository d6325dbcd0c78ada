//! Custom-matrix streaming channel
//!
//! Custom matrix mode keeps two control files open: `matrix_custom_frame`
//! receives row packets and `matrix_effect_custom` receives a one-byte
//! trigger that makes the driver apply the last frame. The channel owns both
//! handles and the frame scratch buffer; they exist together or not at all.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::{ControlFs, ControlHandle};
use crate::error::TransportError;
use crate::frame::{FrameBuffer, RowSpan};
use crate::paths::DevicePaths;
use crate::protocol::{file, COMMIT_TRIGGER};

/// Everything held while the channel is open
struct OpenChannel {
    frame: Box<dyn ControlHandle>,
    commit: Box<dyn ControlHandle>,
    buffer: FrameBuffer,
}

/// Two-handle streaming channel with a Closed/Open state machine.
///
/// Methods take `&mut self`, so at most one operation is in flight.
pub struct ControlChannel {
    fs: Arc<dyn ControlFs>,
    open: Option<OpenChannel>,
}

impl ControlChannel {
    /// Create a closed channel over `fs`
    pub fn new(fs: Arc<dyn ControlFs>) -> Self {
        Self { fs, open: None }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open both handles for `paths`.
    ///
    /// An already open channel is closed first. If the commit file fails to
    /// open, the frame handle is closed again before the error is returned.
    pub async fn open(&mut self, paths: &DevicePaths) -> Result<(), TransportError> {
        if self.is_open() {
            debug!("Custom matrix channel already open, reopening");
            self.close().await;
        }

        let mut frame = self
            .fs
            .open_write(&paths.resolve(file::MATRIX_CUSTOM_FRAME))
            .await?;

        let commit = match self
            .fs
            .open_write(&paths.resolve(file::MATRIX_EFFECT_CUSTOM))
            .await
        {
            Ok(commit) => commit,
            Err(e) => {
                if let Err(close_err) = frame.close().await {
                    warn!("Failed to close {}: {}", frame.path().display(), close_err);
                }
                return Err(e);
            }
        };

        self.open = Some(OpenChannel {
            frame,
            commit,
            buffer: FrameBuffer::new(),
        });
        debug!("Custom matrix channel open for {}", paths.folder());
        Ok(())
    }

    /// Encode `span` of `rgb` and stream it, then send the commit trigger.
    ///
    /// The frame write completes before the trigger is issued. Both writes
    /// are attempted even if the first fails; the first error is returned and
    /// the channel stays open.
    pub async fn write_frame(&mut self, span: RowSpan, rgb: &[u8]) -> Result<(), TransportError> {
        let OpenChannel {
            frame,
            commit,
            buffer,
        } = self.open.as_mut().ok_or(TransportError::ChannelClosed)?;

        let bytes = buffer.encode(span, rgb)?;
        let frame_result = frame.write_all(bytes).await;
        let commit_result = commit.write_all(&COMMIT_TRIGGER).await;

        frame_result.and(commit_result)
    }

    /// Close both handles. Closing a closed channel does nothing.
    ///
    /// Close failures are logged; afterwards no handle is referenced either way.
    pub async fn close(&mut self) {
        let Some(OpenChannel {
            mut frame,
            mut commit,
            buffer,
        }) = self.open.take()
        else {
            return;
        };
        drop(buffer);

        if let Err(e) = frame.close().await {
            warn!("Failed to close {}: {}", frame.path().display(), e);
        }
        if let Err(e) = commit.close().await {
            warn!("Failed to close {}: {}", commit.path().display(), e);
        }
        debug!("Custom matrix channel closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{FsOp, MemoryFs};
    use crate::protocol::matrix::IMAGE_LEN;
    use std::path::PathBuf;

    const ROOT: &str = "/sys/bus/hid/drivers/razerkbd";
    const DEVICE: &str = "0003:1532:0226.0003";

    fn setup() -> (MemoryFs, ControlChannel, DevicePaths) {
        let memory = MemoryFs::new();
        let channel = ControlChannel::new(Arc::new(memory.clone()));
        (memory, channel, DevicePaths::new(ROOT, DEVICE))
    }

    fn frame_path() -> PathBuf {
        DevicePaths::new(ROOT, DEVICE).resolve(file::MATRIX_CUSTOM_FRAME)
    }

    fn commit_path() -> PathBuf {
        DevicePaths::new(ROOT, DEVICE).resolve(file::MATRIX_EFFECT_CUSTOM)
    }

    #[tokio::test]
    async fn test_open_write_close() {
        let (memory, mut channel, paths) = setup();

        channel.open(&paths).await.unwrap();
        assert!(channel.is_open());
        assert_eq!(memory.open_handles(), 2);

        let rgb = vec![0u8; IMAGE_LEN];
        channel.write_frame(RowSpan::full(), &rgb).await.unwrap();
        channel.close().await;
        assert!(!channel.is_open());
        assert_eq!(memory.open_handles(), 0);

        let ops = memory.ops();
        assert_eq!(ops[0], FsOp::Open(frame_path()));
        assert_eq!(ops[1], FsOp::Open(commit_path()));
        match &ops[2] {
            FsOp::Write { path, data } => {
                assert_eq!(path, &frame_path());
                assert_eq!(data.len(), 621);
            }
            other => panic!("expected frame write, got {other:?}"),
        }
        assert_eq!(
            ops[3],
            FsOp::Write {
                path: commit_path(),
                data: vec![b'1']
            }
        );
        assert_eq!(ops[4], FsOp::Close(frame_path()));
        assert_eq!(ops[5], FsOp::Close(commit_path()));
    }

    #[tokio::test]
    async fn test_reopen_closes_previous_handles() {
        let (memory, mut channel, paths) = setup();

        channel.open(&paths).await.unwrap();
        channel.open(&paths).await.unwrap();
        assert!(channel.is_open());
        assert_eq!(memory.open_handles(), 2);

        let ops = memory.ops();
        assert_eq!(ops[2], FsOp::Close(frame_path()));
        assert_eq!(ops[3], FsOp::Close(commit_path()));
        assert_eq!(ops[4], FsOp::Open(frame_path()));

        channel.close().await;
        assert_eq!(memory.open_handles(), 0);
    }

    #[tokio::test]
    async fn test_frame_open_failure_skips_commit_file() {
        let (memory, mut channel, paths) = setup();
        memory.fail_open(frame_path());

        let err = channel.open(&paths).await.unwrap_err();
        assert!(matches!(err, TransportError::Io { op: "open", .. }));
        assert!(!channel.is_open());
        assert_eq!(memory.ops(), vec![FsOp::Open(frame_path())]);
    }

    #[tokio::test]
    async fn test_commit_open_failure_rolls_back_frame_handle() {
        let (memory, mut channel, paths) = setup();
        memory.fail_open(commit_path());

        assert!(channel.open(&paths).await.is_err());
        assert!(!channel.is_open());
        assert_eq!(memory.open_handles(), 0);
        assert_eq!(
            memory.ops(),
            vec![
                FsOp::Open(frame_path()),
                FsOp::Open(commit_path()),
                FsOp::Close(frame_path()),
            ]
        );
    }

    #[tokio::test]
    async fn test_write_on_closed_channel_does_no_io() {
        let (memory, mut channel, _) = setup();
        let rgb = vec![0u8; IMAGE_LEN];

        let err = channel.write_frame(RowSpan::full(), &rgb).await.unwrap_err();
        assert!(matches!(err, TransportError::ChannelClosed));
        assert!(memory.ops().is_empty());
    }

    #[tokio::test]
    async fn test_frame_write_failure_still_commits_and_stays_open() {
        let (memory, mut channel, paths) = setup();
        channel.open(&paths).await.unwrap();
        memory.fail_write(frame_path());
        memory.clear_ops();

        let rgb = vec![0u8; IMAGE_LEN];
        let err = channel.write_frame(RowSpan::full(), &rgb).await.unwrap_err();
        assert!(matches!(err, TransportError::Io { op: "write", .. }));
        assert!(channel.is_open());

        let ops = memory.ops();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1].path(), commit_path().as_path());

        // Caller may retry once the fault clears
        memory.clear_failures();
        channel.write_frame(RowSpan::full(), &rgb).await.unwrap();
        channel.close().await;
    }

    #[tokio::test]
    async fn test_commit_write_failure_is_reported() {
        let (memory, mut channel, paths) = setup();
        channel.open(&paths).await.unwrap();
        memory.fail_write(commit_path());

        let rgb = vec![0u8; IMAGE_LEN];
        assert!(channel.write_frame(RowSpan::full(), &rgb).await.is_err());
        assert!(channel.is_open());
        channel.close().await;
    }

    #[tokio::test]
    async fn test_encode_error_before_any_write() {
        let (memory, mut channel, paths) = setup();
        channel.open(&paths).await.unwrap();
        memory.clear_ops();

        let err = channel
            .write_frame(RowSpan::full(), &[0u8; 10])
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Frame(_)));
        assert!(memory.ops().is_empty());
        channel.close().await;
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (memory, mut channel, paths) = setup();
        channel.close().await;
        assert!(memory.ops().is_empty());

        channel.open(&paths).await.unwrap();
        channel.close().await;
        channel.close().await;
        assert_eq!(memory.ops().len(), 4);
    }
}
