//! Job store.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::debug;

use reelcut_models::{Job, JobId, JobStatus};

use crate::error::StoreResult;

/// Artifact paths produced by a stage, merged into the row by `advance`.
///
/// `None` fields leave the existing column value untouched; paths are never
/// retroactively cleared through this path (only the sweeper clears them).
#[derive(Debug, Clone, Default)]
pub struct ArtifactUpdate {
    pub video_path: Option<String>,
    pub audio_path: Option<String>,
    pub transcript_path: Option<String>,
    pub highlights_path: Option<String>,
    pub clips_path: Option<Vec<String>>,
}

/// Durable job record access.
///
/// `create` is the only insert path and `advance` the only mutation path
/// after creation; the API layer never writes progress fields directly.
#[derive(Clone)]
pub struct JobStore {
    pool: PgPool,
}

impl JobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new job with status `queued`.
    pub async fn create(&self, user_id: &str, url: &str, clip_count: i32) -> StoreResult<Job> {
        let id = JobId::new();
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (id, user_id, url, clip_count, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(url)
        .bind(clip_count)
        .bind(JobStatus::Queued)
        .fetch_one(&self.pool)
        .await?;

        debug!(job_id = %job.id, user_id, "Job created");
        Ok(job)
    }

    /// Fetch a job scoped to its owner.
    pub async fn get(&self, id: &JobId, user_id: &str) -> StoreResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    /// Fetch a job by id alone. Used by stage workers, which receive ids
    /// through queue handoff rather than from a caller.
    pub async fn get_unscoped(&self, id: &JobId) -> StoreResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    /// All jobs for one owner, newest first.
    pub async fn list_by_owner(&self, user_id: &str) -> StoreResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    /// Advance a job's status and merge produced artifact paths.
    ///
    /// Runs as a single statement so a concurrent operator override cannot
    /// interleave with a worker's update. `completed_at` is set exactly once,
    /// the first time the status becomes `completed`.
    pub async fn advance(
        &self,
        id: &JobId,
        status: JobStatus,
        artifacts: ArtifactUpdate,
    ) -> StoreResult<Option<Job>> {
        let clips_json = artifacts
            .clips_path
            .map(serde_json::to_value)
            .transpose()?;

        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                status = $2,
                video_path = COALESCE($3, video_path),
                audio_path = COALESCE($4, audio_path),
                transcript_path = COALESCE($5, transcript_path),
                highlights_path = COALESCE($6, highlights_path),
                clips_path = COALESCE($7, clips_path),
                completed_at = CASE
                    WHEN $2 = 'completed' THEN COALESCE(completed_at, now())
                    ELSE completed_at
                END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(artifacts.video_path)
        .bind(artifacts.audio_path)
        .bind(artifacts.transcript_path)
        .bind(artifacts.highlights_path)
        .bind(clips_json)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(job) = &job {
            debug!(job_id = %job.id, status = %job.status, "Job advanced");
        }
        Ok(job)
    }

    /// Completed jobs past the retention window that still hold artifacts.
    pub async fn expired_completed(&self, retention: Duration) -> StoreResult<Vec<Job>> {
        let cutoff = Utc::now() - retention;
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE status = 'completed'
              AND completed_at IS NOT NULL
              AND completed_at < $1
              AND (
                video_path IS NOT NULL
                OR audio_path IS NOT NULL
                OR transcript_path IS NOT NULL
                OR highlights_path IS NOT NULL
                OR clips_path IS NOT NULL
              )
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    /// Null out all artifact columns after the sweeper removed the files.
    /// Identity, status and timestamps stay untouched.
    pub async fn clear_artifacts(&self, id: &JobId) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE jobs SET
                video_path = NULL,
                audio_path = NULL,
                transcript_path = NULL,
                highlights_path = NULL,
                clips_path = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
