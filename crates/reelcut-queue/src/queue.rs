//! Per-stage work queues.

use redis::AsyncCommands;
use tracing::debug;

use reelcut_models::JobId;

use crate::error::QueueResult;
use crate::stage::Stage;

/// FIFO work queues, one Redis list per pipeline stage.
///
/// Job ids are the only payload. LPUSH + BRPOP gives per-queue FIFO order
/// and guarantees a given id is delivered to exactly one worker instance,
/// which is the sole mutual-exclusion mechanism between workers.
pub struct WorkQueue {
    client: redis::Client,
}

impl WorkQueue {
    /// Create a work queue client.
    pub fn new(redis_url: &str) -> QueueResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// Push a job id onto a stage's queue.
    pub async fn push(&self, stage: Stage, job_id: &JobId) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.lpush::<_, _, ()>(stage.queue_key(), job_id.as_str())
            .await?;
        debug!(job_id = %job_id, queue = %stage.queue_key(), "Job enqueued");
        Ok(())
    }

    /// Block until a job id arrives on a stage's queue.
    ///
    /// Waits indefinitely on an empty queue; this is the worker loop's only
    /// suspension point. Each call opens a dedicated connection so the
    /// blocking pop cannot stall unrelated commands.
    pub async fn pop_blocking(&self, stage: Stage) -> QueueResult<JobId> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = stage.queue_key();
        loop {
            let popped: Option<(String, String)> = conn.brpop(&key, 0.0).await?;
            if let Some((_, id)) = popped {
                debug!(job_id = %id, queue = %key, "Job received");
                return Ok(JobId::from_string(id));
            }
        }
    }

    /// Number of ids waiting on a stage's queue.
    pub async fn len(&self, stage: Stage) -> QueueResult<u64> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let len: u64 = conn.llen(stage.queue_key()).await?;
        Ok(len)
    }
}
