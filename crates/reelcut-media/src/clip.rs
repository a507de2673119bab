//! Clip cutting via ffmpeg.

use std::path::Path;

use tokio::process::Command;
use tracing::info;

use crate::download::stderr_tail;
use crate::error::{MediaError, MediaResult};

/// Cut the `[start, end)` span out of `video` into `dest`, re-encoded for
/// safe playback start.
pub async fn cut_clip(video: &Path, start: f64, end: f64, dest: &Path) -> MediaResult<()> {
    let duration = end - start;
    info!(video = %video.display(), start, duration, dest = %dest.display(), "Cutting clip");

    let output = Command::new("ffmpeg")
        .arg("-ss")
        .arg(start.to_string())
        .arg("-i")
        .arg(video)
        .arg("-t")
        .arg(duration.to_string())
        .arg("-c:v")
        .arg("libx264")
        .arg("-c:a")
        .arg("aac")
        .arg("-movflags")
        .arg("+faststart")
        .arg(dest)
        .arg("-y")
        .output()
        .await
        .map_err(|e| MediaError::command_failed("ffmpeg", e.to_string()))?;

    if !output.status.success() {
        return Err(MediaError::command_failed(
            "ffmpeg",
            stderr_tail(&output.stderr),
        ));
    }
    Ok(())
}
