//! Job record and identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::fmt;
use uuid::Uuid;

use crate::status::JobStatus;

/// Default number of clips when the request carries no usable count.
pub const DEFAULT_CLIP_COUNT: i32 = 3;

/// Maximum number of clips a single job may request.
pub const MAX_CLIP_COUNT: i32 = 10;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable job record.
///
/// Created once by the submission path; mutated only through the store's
/// `advance` afterwards. Artifact paths fill in progressively as stages
/// complete and are nulled again only by the cleanup sweeper.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,
    /// Owning user
    pub user_id: String,
    /// Source video URL
    pub url: String,
    /// Requested number of clips (1-10)
    pub clip_count: i32,
    /// Current lifecycle status
    pub status: JobStatus,
    /// Downloaded source video
    pub video_path: Option<String>,
    /// Extracted audio track
    pub audio_path: Option<String>,
    /// Transcript artifact
    pub transcript_path: Option<String>,
    /// Detected highlights artifact
    pub highlights_path: Option<String>,
    /// Rendered clip files
    pub clips_path: Option<Json<Vec<String>>>,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Set exactly once, when the job reaches `completed`
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Rendered clip paths, empty when the render stage has not run.
    pub fn clips(&self) -> &[String] {
        self.clips_path.as_ref().map(|c| c.0.as_slice()).unwrap_or(&[])
    }

    /// Check whether any artifact path is still set.
    pub fn has_artifacts(&self) -> bool {
        self.video_path.is_some()
            || self.audio_path.is_some()
            || self.transcript_path.is_some()
            || self.highlights_path.is_some()
            || self.clips_path.is_some()
    }
}

/// Resolve a requested clip count from untyped request input.
///
/// Anything that is not an integer in `[1, MAX_CLIP_COUNT]` resolves to the
/// default, matching the submission contract: missing, fractional, zero,
/// negative and oversized counts all fall back rather than erroring.
pub fn resolve_clip_count(input: Option<&serde_json::Value>) -> i32 {
    match input.and_then(|v| v.as_i64()) {
        Some(n) if (1..=MAX_CLIP_COUNT as i64).contains(&n) => n as i32,
        _ => DEFAULT_CLIP_COUNT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }

    #[test]
    fn valid_counts_pass_through() {
        assert_eq!(resolve_clip_count(Some(&json!(1))), 1);
        assert_eq!(resolve_clip_count(Some(&json!(5))), 5);
        assert_eq!(resolve_clip_count(Some(&json!(10))), 10);
    }

    #[test]
    fn bad_counts_resolve_to_default() {
        assert_eq!(resolve_clip_count(None), DEFAULT_CLIP_COUNT);
        assert_eq!(resolve_clip_count(Some(&json!(0))), DEFAULT_CLIP_COUNT);
        assert_eq!(resolve_clip_count(Some(&json!(-2))), DEFAULT_CLIP_COUNT);
        assert_eq!(resolve_clip_count(Some(&json!(11))), DEFAULT_CLIP_COUNT);
        assert_eq!(resolve_clip_count(Some(&json!(2.5))), DEFAULT_CLIP_COUNT);
        assert_eq!(resolve_clip_count(Some(&json!("4"))), DEFAULT_CLIP_COUNT);
        assert_eq!(resolve_clip_count(Some(&json!(null))), DEFAULT_CLIP_COUNT);
    }

    #[test]
    fn clips_accessor_defaults_to_empty() {
        let job = Job {
            id: JobId::new(),
            user_id: "user-1".into(),
            url: "https://example.com/v".into(),
            clip_count: 3,
            status: JobStatus::Queued,
            video_path: None,
            audio_path: None,
            transcript_path: None,
            highlights_path: None,
            clips_path: None,
            created_at: Utc::now(),
            completed_at: None,
        };
        assert!(job.clips().is_empty());
        assert!(!job.has_artifacts());
    }
}
