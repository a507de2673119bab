//! Status-channel wire messages.

use serde::{Deserialize, Serialize};

use crate::status::JobStatus;

/// Message published on a job's status topic for every transition.
///
/// The minimal form carries just `status`; terminal transitions may attach
/// richer payloads (clip list on completion, error text on failure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// New job status
    pub status: JobStatus,
    /// Rendered clips, attached on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clips: Option<Vec<String>>,
    /// Failure description, attached on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusEvent {
    /// Plain transition event.
    pub fn status(status: JobStatus) -> Self {
        Self {
            status,
            clips: None,
            error: None,
        }
    }

    /// Completion event with the rendered clip list.
    pub fn completed(clips: Vec<String>) -> Self {
        Self {
            status: JobStatus::Completed,
            clips: Some(clips),
            error: None,
        }
    }

    /// Failure event with a description.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            clips: None,
            error: Some(error.into()),
        }
    }

    /// Whether this event ends the stream for subscribers.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
