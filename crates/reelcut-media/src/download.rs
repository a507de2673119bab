//! Source video download via yt-dlp.

use std::path::Path;

use tokio::process::Command;
use tracing::info;

use crate::error::{MediaError, MediaResult};

/// Download the source video to `dest` as mp4.
pub async fn download_video(url: &str, dest: &Path) -> MediaResult<()> {
    info!(url, dest = %dest.display(), "Downloading source video");

    let output = Command::new("yt-dlp")
        .arg("-f")
        .arg("mp4")
        .arg("-o")
        .arg(dest)
        .arg(url)
        .output()
        .await
        .map_err(|e| MediaError::command_failed("yt-dlp", e.to_string()))?;

    if !output.status.success() {
        return Err(MediaError::command_failed(
            "yt-dlp",
            stderr_tail(&output.stderr),
        ));
    }
    Ok(())
}

/// Last lines of a tool's stderr, for error reporting.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().rev().take(5).collect();
    lines.into_iter().rev().collect::<Vec<_>>().join("\n")
}
