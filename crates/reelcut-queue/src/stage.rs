//! Pipeline stage tags.

use std::str::FromStr;

use reelcut_models::JobStatus;

use crate::error::QueueError;

/// A pipeline stage with its own queue and worker role.
///
/// The worker loop is stage-agnostic: everything role-specific hangs off
/// this tag — the queue key the role pops from, the in-progress status it
/// sets, and the queue it forwards to on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Download,
    Transcribe,
    Render,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 3] = [Stage::Download, Stage::Transcribe, Stage::Render];

    /// Role name, as passed on the worker command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Download => "download",
            Stage::Transcribe => "transcribe",
            Stage::Render => "render",
        }
    }

    /// Redis list this stage's workers block on.
    pub fn queue_key(&self) -> String {
        format!("queue:{}", self.as_str())
    }

    /// Status a worker sets when it picks a job off this stage's queue.
    pub fn active_status(&self) -> JobStatus {
        match self {
            Stage::Download => JobStatus::Downloading,
            Stage::Transcribe => JobStatus::Transcribing,
            Stage::Render => JobStatus::Rendering,
        }
    }

    /// Queue the job id is forwarded to on success. `None` for the
    /// terminal render stage.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Download => Some(Stage::Transcribe),
            Stage::Transcribe => Some(Stage::Render),
            Stage::Render => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "download" => Ok(Stage::Download),
            "transcribe" => Ok(Stage::Transcribe),
            "render" => Ok(Stage::Render),
            other => Err(QueueError::UnknownRole(other.to_string())),
        }
    }
}
