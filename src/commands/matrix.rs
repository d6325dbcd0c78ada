//! Custom matrix command handlers.
//!
//! Every handler leaves custom matrix mode before returning, including on
//! a failed frame write.

use super::{setup_interrupt_handler, CommandResult};
use razer_driver::animation::rainbow_frame;
use razer_driver::picture::load_image;
use razer_keyboard::{KeyboardController, LedMatrix, Rgb};
use std::path::Path;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Degrees of hue the rainbow moves per second
const RAINBOW_DEGREES_PER_SEC: f32 = 90.0;

/// Show one still frame, then leave custom matrix mode
async fn show_frame(keyboard: &mut KeyboardController, frame: &LedMatrix) -> CommandResult {
    keyboard.init_custom_matrix_mode().await?;
    let result = keyboard.set_custom_matrix_image(frame).await;
    keyboard.finish_custom_matrix_mode().await;
    result?;
    Ok(())
}

/// Solid color through custom matrix mode
pub async fn fill(keyboard: &mut KeyboardController, color: Rgb) -> CommandResult {
    show_frame(keyboard, &LedMatrix::filled(color)).await?;
    println!("Filled matrix with #{:02X}{:02X}{:02X}", color.r, color.g, color.b);
    Ok(())
}

/// Show a 22x9 image
pub async fn image(keyboard: &mut KeyboardController, file: &Path) -> CommandResult {
    let frame = load_image(file)?;
    show_frame(keyboard, &frame).await?;
    println!("Showing {}", file.display());
    Ok(())
}

/// Stream a moving rainbow until Ctrl-C
pub async fn rainbow(keyboard: &mut KeyboardController, fps: u32) -> CommandResult {
    let running = setup_interrupt_handler();
    let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let step = RAINBOW_DEGREES_PER_SEC / fps.max(1) as f32;

    keyboard.init_custom_matrix_mode().await?;
    println!("Streaming rainbow at {fps} fps (Ctrl-C to stop)...");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut phase = 0.0f32;
    let mut frames = 0u64;
    let mut result = Ok(());

    while running.load(Ordering::SeqCst) {
        ticker.tick().await;
        if let Err(e) = keyboard.set_custom_matrix_image(&rainbow_frame(phase)).await {
            result = Err(e);
            break;
        }
        phase = (phase + step) % 360.0;
        frames += 1;
    }

    keyboard.finish_custom_matrix_mode().await;
    info!("Sent {frames} frames");
    result?;
    println!("\nStopped after {frames} frames");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use razer_transport::protocol::file;
    use razer_transport::{FsOp, MemoryFs};
    use std::sync::Arc;

    fn keyboard() -> (MemoryFs, KeyboardController) {
        let fs = MemoryFs::new();
        let mut kb = KeyboardController::with_backend(Arc::new(fs.clone()), "/root");
        kb.set_device_folder_name("dev").unwrap();
        (fs, kb)
    }

    #[tokio::test]
    async fn test_fill_leaves_matrix_mode() {
        let (fs, mut kb) = keyboard();
        fill(&mut kb, Rgb::WHITE).await.unwrap();

        assert!(!kb.is_custom_matrix_mode());
        assert_eq!(fs.open_handles(), 0);
        let frame = fs
            .contents(Path::new("/root/dev/matrix_custom_frame"))
            .unwrap();
        assert_eq!(frame.len(), 621);
        assert_eq!(&frame[3..6], &[255, 255, 255]);
    }

    #[tokio::test]
    async fn test_fill_failure_still_closes() {
        let (fs, mut kb) = keyboard();
        fs.fail_write(format!("/root/dev/{}", file::MATRIX_CUSTOM_FRAME));

        assert!(fill(&mut kb, Rgb::RED).await.is_err());
        assert!(!kb.is_custom_matrix_mode());
        assert!(fs.ops().iter().any(|op| matches!(op, FsOp::Close(_))));
        assert_eq!(fs.open_handles(), 0);
    }
}
