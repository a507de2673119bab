//! Storage layout and media tool collaborators.
//!
//! This crate provides:
//! - The per-job storage path contract shared by stage workers and the
//!   cleanup sweeper
//! - Subprocess wrappers for the external tools: yt-dlp download, ffmpeg
//!   audio extraction and clip cutting, and the transcriber script

pub mod audio;
pub mod clip;
pub mod download;
pub mod error;
pub mod layout;
pub mod transcript;

pub use audio::extract_audio;
pub use clip::cut_clip;
pub use download::download_video;
pub use error::{MediaError, MediaResult};
pub use layout::StorageLayout;
pub use transcript::{read_transcript_text, Transcriber};

use std::path::PathBuf;

/// Resolve an external tool on PATH, failing early with a clear error.
pub fn ensure_tool(name: &str) -> MediaResult<PathBuf> {
    which::which(name).map_err(|_| MediaError::ToolMissing(name.to_string()))
}
