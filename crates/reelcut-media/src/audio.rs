//! Audio extraction via ffmpeg.

use std::path::Path;

use tokio::process::Command;
use tracing::info;

use crate::download::stderr_tail;
use crate::error::{MediaError, MediaResult};

/// Extract the audio track of `video` into `dest` as mp3.
pub async fn extract_audio(video: &Path, dest: &Path) -> MediaResult<()> {
    info!(video = %video.display(), dest = %dest.display(), "Extracting audio");

    let output = Command::new("ffmpeg")
        .arg("-i")
        .arg(video)
        .arg("-vn")
        .arg("-acodec")
        .arg("libmp3lame")
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
