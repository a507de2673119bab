//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Audio extraction failed: {0}")]
    AudioFailed(String),

    #[error("Transcription failed: {0}")]
    TranscribeFailed(String),

    #[error("Clip cutting failed: {0}")]
    CutFailed(String),

    #[error("Highlight detection failed: {0}")]
    DetectionFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing {0} artifact for this stage")]
    MissingArtifact(&'static str),

    #[error("Job vanished from the store: {0}")]
    JobVanished(String),

    #[error("Store error: {0}")]
    Store(#[from] reelcut_store::StoreError),

    #[error("Queue error: {0}")]
    Queue(#[from] reelcut_queue::QueueError),

    #[error("Media error: {0}")]
    Media(#[from] reelcut_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkerError {
    pub fn detection_failed(msg: impl Into<String>) -> Self {
        Self::DetectionFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
