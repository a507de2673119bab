//! Job lifecycle status.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Job processing status.
///
/// A job moves forward through the stage order
/// `queued → downloading → transcribing → rendering → completed`,
/// or jumps from any non-terminal state to `failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum JobStatus {
    /// Waiting for the download worker
    #[default]
    Queued,
    /// Download worker is fetching the source video
    Downloading,
    /// Transcribe worker is producing the transcript
    Transcribing,
    /// Render worker is detecting highlights and cutting clips
    Rendering,
    /// All clips rendered
    Completed,
    /// A stage collaborator failed; terminal
    Failed,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Error)]
#[error("unknown job status: {0}")]
pub struct StatusParseError(pub String);

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Downloading => "downloading",
            JobStatus::Transcribing => "transcribing",
            JobStatus::Rendering => "rendering",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more transitions expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Position of the status along the stage order. `failed` sorts last.
    fn rank(&self) -> u8 {
        match self {
            JobStatus::Queued => 0,
            JobStatus::Downloading => 1,
            JobStatus::Transcribing => 2,
            JobStatus::Rendering => 3,
            JobStatus::Completed => 4,
            JobStatus::Failed => 5,
        }
    }

    /// Check whether a transition to `next` keeps the status monotonic.
    ///
    /// Allowed: any forward move along the stage order, or any non-terminal
    /// state to `failed`. `completed` is only reachable from `rendering`.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            JobStatus::Failed => true,
            JobStatus::Completed => *self == JobStatus::Rendering,
            _ => next.rank() > self.rank(),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(JobStatus::Queued),
            "downloading" => Ok(JobStatus::Downloading),
            "transcribing" => Ok(JobStatus::Transcribing),
            "rendering" => Ok(JobStatus::Rendering),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        for status in [
            JobStatus::Queued,
            JobStatus::Downloading,
            JobStatus::Transcribing,
            JobStatus::Rendering,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
        assert!("processing".parse::<JobStatus>().is_err());
    }

    #[test]
    fn forward_transitions_allowed() {
        assert!(JobStatus::Queued.can_transition_to(JobStatus::Downloading));
        assert!(JobStatus::Downloading.can_transition_to(JobStatus::Transcribing));
        assert!(JobStatus::Transcribing.can_transition_to(JobStatus::Rendering));
        assert!(JobStatus::Rendering.can_transition_to(JobStatus::Completed));
    }

    #[test]
    fn any_non_terminal_state_can_fail() {
        for status in [
            JobStatus::Queued,
            JobStatus::Downloading,
            JobStatus::Transcribing,
            JobStatus::Rendering,
        ] {
            assert!(status.can_transition_to(JobStatus::Failed));
        }
    }

    #[test]
    fn backward_and_terminal_transitions_rejected() {
        assert!(!JobStatus::Transcribing.can_transition_to(JobStatus::Downloading));
        assert!(!JobStatus::Rendering.can_transition_to(JobStatus::Queued));
        assert!(!JobStatus::Completed.can_transition_to(JobStatus::Failed));
        assert!(!JobStatus::Failed.can_transition_to(JobStatus::Queued));
    }

    #[test]
    fn completed_requires_rendering() {
        assert!(!JobStatus::Queued.can_transition_to(JobStatus::Completed));
        assert!(!JobStatus::Transcribing.can_transition_to(JobStatus::Completed));
        assert!(JobStatus::Rendering.can_transition_to(JobStatus::Completed));
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&JobStatus::Transcribing).unwrap();
        assert_eq!(json, "\"transcribing\"");
    }
}
