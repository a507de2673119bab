//! Per-job storage path contract.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use reelcut_models::JobId;

use crate::error::MediaResult;

/// Fixed category roots under the storage directory. Stage workers write
/// into them and the cleanup sweeper reclaims them; both sides derive
/// every path from this type so the contract lives in one place.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root from `STORAGE_ROOT`, defaulting to `storage/`.
    pub fn from_env() -> Self {
        let root = std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".to_string());
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create all category directories. Idempotent, called at worker startup.
    pub async fn ensure_dirs(&self) -> MediaResult<()> {
        for dir in ["videos", "audio", "transcripts", "highlights", "clips"] {
            fs::create_dir_all(self.root.join(dir)).await?;
        }
        Ok(())
    }

    pub fn video_path(&self, id: &JobId) -> PathBuf {
        self.root.join("videos").join(format!("{id}.mp4"))
    }

    pub fn audio_path(&self, id: &JobId) -> PathBuf {
        self.root.join("audio").join(format!("{id}.mp3"))
    }

    pub fn transcript_path(&self, id: &JobId) -> PathBuf {
        self.root.join("transcripts").join(format!("{id}.json"))
    }

    pub fn highlights_path(&self, id: &JobId) -> PathBuf {
        self.root.join("highlights").join(format!("{id}.json"))
    }

    /// Directory holding a job's rendered clips.
    pub fn clips_dir(&self, id: &JobId) -> PathBuf {
        self.root.join("clips").join(id.as_str())
    }

    /// Path of the n-th rendered clip (1-indexed).
    pub fn clip_path(&self, id: &JobId, n: usize) -> PathBuf {
        self.clips_dir(id).join(format!("clip_{n}.mp4"))
    }

    /// Delete every storage artifact belonging to a job.
    ///
    /// Best-effort and idempotent: missing paths are skipped, individual
    /// deletion failures are logged and do not prevent the remaining
    /// artifacts from being removed. Returns how many paths were deleted.
    pub async fn remove_job_artifacts(&self, id: &JobId) -> usize {
        let mut removed = 0;

        for path in [
            self.video_path(id),
            self.audio_path(id),
            self.transcript_path(id),
            self.highlights_path(id),
        ] {
            match fs::remove_file(&path).await {
                Ok(()) => {
                    debug!(path = %path.display(), "Deleted artifact");
                    removed += 1;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete artifact"),
            }
        }

        let clips = self.clips_dir(id);
        match fs::remove_dir_all(&clips).await {
            Ok(()) => {
                debug!(path = %clips.display(), "Deleted clip directory");
                removed += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %clips.display(), error = %e, "Failed to delete clip directory"),
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_the_category_contract() {
        let layout = StorageLayout::new("storage");
        let id = JobId::from_string("j-1");

        assert_eq!(layout.video_path(&id), PathBuf::from("storage/videos/j-1.mp4"));
        assert_eq!(layout.audio_path(&id), PathBuf::from("storage/audio/j-1.mp3"));
        assert_eq!(
            layout.transcript_path(&id),
            PathBuf::from("storage/transcripts/j-1.json")
        );
        assert_eq!(
            layout.highlights_path(&id),
            PathBuf::from("storage/highlights/j-1.json")
        );
        assert_eq!(
            layout.clip_path(&id, 1),
            PathBuf::from("storage/clips/j-1/clip_1.mp4")
        );
    }

    #[tokio::test]
    async fn removal_is_idempotent_and_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path());
        layout.ensure_dirs().await.unwrap();

        let id = JobId::from_string("j-2");
        tokio::fs::write(layout.video_path(&id), b"v").await.unwrap();
        tokio::fs::create_dir_all(layout.clips_dir(&id)).await.unwrap();
        tokio::fs::write(layout.clip_path(&id, 1), b"c").await.unwrap();

        assert_eq!(layout.remove_job_artifacts(&id).await, 2);
        assert!(!layout.video_path(&id).exists());
        assert!(!layout.clips_dir(&id).exists());

        // Nothing left to delete; still succeeds.
        assert_eq!(layout.remove_job_artifacts(&id).await, 0);
    }
}
