//! PrinterFs middleware for monitoring control-file traffic
//!
//! Wraps any [`ControlFs`] and prints every open, write, close and read
//! passing through it, naming the control file and decoding custom frames.
//!
//! # Example
//!
//! ```ignore
//! use razer_transport::{PrinterConfig, PrinterFs, SysfsFs};
//!
//! let fs = PrinterFs::wrap(Arc::new(SysfsFs::new()), PrinterConfig::default());
//! // Now every control-file write is printed to stderr
//! ```

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use crossterm::style::Stylize;

use crate::backend::{ControlFs, ControlHandle};
use crate::error::TransportError;
use crate::frame::row_headers;
use crate::protocol::file;

/// Filter for selective display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileFilter {
    #[default]
    All,
    /// Custom matrix frame and commit traffic
    Frames,
    /// Effect and indicator LED writes
    Effects,
    /// One control file by name
    File(String),
}

impl FromStr for FileFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "frames" | "frame" | "matrix" => Ok(Self::Frames),
            "effects" | "effect" => Ok(Self::Effects),
            s if s.starts_with("file=") => {
                let name = s.trim_start_matches("file=");
                if name.is_empty() {
                    Err("Empty file name in filter".to_string())
                } else {
                    Ok(Self::File(name.to_string()))
                }
            }
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Configuration for PrinterFs
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Dump full frame bytes instead of a row summary
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: FileFilter,
}

impl PrinterConfig {
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    fn should_show(&self, path: &Path) -> bool {
        let name = file_name(path);
        match &self.filter {
            FileFilter::All => true,
            FileFilter::Frames => {
                name == file::MATRIX_CUSTOM_FRAME || name == file::MATRIX_EFFECT_CUSTOM
            }
            FileFilter::Effects => file::is_effect(name),
            FileFilter::File(f) => f == name,
        }
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Format a write payload for display
fn describe_payload(name: &str, data: &[u8], show_hex: bool) -> String {
    if name == file::MATRIX_CUSTOM_FRAME && !show_hex {
        let rows: Vec<u8> = row_headers(data).map(|h| h.row).collect();
        format!("{} bytes, rows {:?}", data.len(), rows)
    } else {
        format!("{:02x?}", data)
    }
}

/// Control-file middleware that prints all traffic
pub struct PrinterFs {
    inner: Arc<dyn ControlFs>,
    config: PrinterConfig,
}

impl PrinterFs {
    /// Wrap a backend with printing middleware
    pub fn wrap(inner: Arc<dyn ControlFs>, config: PrinterConfig) -> Arc<dyn ControlFs> {
        Arc::new(Self { inner, config })
    }

    fn print_write(&self, path: &Path, data: &[u8]) {
        if !self.config.should_show(path) {
            return;
        }
        print_write(path, data, self.config.show_hex);
    }

    fn print_event(&self, tag: &str, path: &Path) {
        if !self.config.should_show(path) {
            return;
        }
        let name = file_name(path);
        eprintln!(
            "{} {}  {} {}",
            "---".dim(),
            tag.dim().bold(),
            name,
            file::name(name).yellow()
        );
    }
}

fn print_write(path: &Path, data: &[u8], show_hex: bool) {
    let name = file_name(path);
    eprintln!(
        "{} {}  {} {} {}",
        ">>>".cyan(),
        "WRITE".cyan().bold(),
        name,
        file::name(name).yellow(),
        describe_payload(name, data, show_hex)
    );
}

fn print_failure(path: &Path, err: &TransportError) {
    eprintln!(
        "{} {}  {} {}",
        "!!!".red(),
        "FAIL".red().bold(),
        file_name(path),
        err
    );
}

#[async_trait]
impl ControlFs for PrinterFs {
    async fn open_write(&self, path: &Path) -> Result<Box<dyn ControlHandle>, TransportError> {
        self.print_event("OPEN", path);
        match self.inner.open_write(path).await {
            Ok(inner) => Ok(Box::new(PrinterHandle {
                inner,
                show: self.config.should_show(path),
                show_hex: self.config.show_hex,
            })),
            Err(e) => {
                print_failure(path, &e);
                Err(e)
            }
        }
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), TransportError> {
        self.print_write(path, data);
        let result = self.inner.write_file(path, data).await;
        if let Err(ref e) = result {
            print_failure(path, e);
        }
        result
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, TransportError> {
        let result = self.inner.read_file(path).await;
        if self.config.should_show(path) {
            match &result {
                Ok(data) => eprintln!(
                    "{} {}  {} {:?}",
                    "<<<".green(),
                    "READ".green().bold(),
                    file_name(path),
                    String::from_utf8_lossy(data).trim_end()
                ),
                Err(e) => print_failure(path, e),
            }
        }
        result
    }
}

/// Handle wrapper printing each write
struct PrinterHandle {
    inner: Box<dyn ControlHandle>,
    show: bool,
    show_hex: bool,
}

#[async_trait]
impl ControlHandle for PrinterHandle {
    fn path(&self) -> &Path {
        self.inner.path()
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if self.show {
            print_write(self.inner.path(), data, self.show_hex);
        }
        let result = self.inner.write_all(data).await;
        if let Err(ref e) = result {
            print_failure(self.inner.path(), e);
        }
        result
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.show {
            let name = file_name(self.inner.path());
            eprintln!("{} {}  {}", "---".dim(), "CLOSE".dim().bold(), name);
        }
        self.inner.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{FsOp, MemoryFs};
    use std::path::PathBuf;

    #[test]
    fn test_file_filter_parse() {
        assert_eq!(FileFilter::from_str("all").unwrap(), FileFilter::All);
        assert_eq!(FileFilter::from_str("frames").unwrap(), FileFilter::Frames);
        assert_eq!(FileFilter::from_str("Effects").unwrap(), FileFilter::Effects);
        assert_eq!(
            FileFilter::from_str("file=matrix_effect_wave").unwrap(),
            FileFilter::File("matrix_effect_wave".into())
        );
        assert!(FileFilter::from_str("file=").is_err());
        assert!(FileFilter::from_str("bogus").is_err());
    }

    #[test]
    fn test_filter_matching() {
        let frames = PrinterConfig::default().with_filter(FileFilter::Frames);
        assert!(frames.should_show(Path::new("/r/d/matrix_custom_frame")));
        assert!(frames.should_show(Path::new("/r/d/matrix_effect_custom")));
        assert!(!frames.should_show(Path::new("/r/d/matrix_effect_wave")));

        let effects = PrinterConfig::default().with_filter(FileFilter::Effects);
        assert!(effects.should_show(Path::new("/r/d/matrix_effect_wave")));
        assert!(effects.should_show(Path::new("/r/d/macro_led_state")));
        assert!(!effects.should_show(Path::new("/r/d/matrix_effect_custom")));
    }

    #[test]
    fn test_frame_summary() {
        let frame = vec![0u8; 2 * 69];
        assert_eq!(
            describe_payload(file::MATRIX_CUSTOM_FRAME, &frame, false),
            "138 bytes, rows [0, 0]"
        );
        assert_eq!(
            describe_payload(file::MATRIX_EFFECT_STATIC, &[255, 0, 16], false),
            "[ff, 00, 10]"
        );
    }

    #[tokio::test]
    async fn test_passes_traffic_through() {
        let memory = MemoryFs::new();
        let fs = PrinterFs::wrap(Arc::new(memory.clone()), PrinterConfig::default());
        let path = PathBuf::from("/r/d/matrix_custom_frame");

        let mut handle = fs.open_write(&path).await.unwrap();
        handle.write_all(&[7; 69]).await.unwrap();
        handle.close().await.unwrap();

        assert_eq!(memory.open_handles(), 0);
        assert_eq!(memory.ops().len(), 3);
        assert!(matches!(memory.ops()[1], FsOp::Write { .. }));
    }
}
