//! Media error types.

use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Tool not found on PATH: {0}")]
    ToolMissing(String),

    #[error("{tool} failed: {detail}")]
    CommandFailed { tool: String, detail: String },

    #[error("Invalid transcript artifact: {0}")]
    InvalidTranscript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MediaError {
    pub fn command_failed(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            detail: detail.into(),
        }
    }
}
