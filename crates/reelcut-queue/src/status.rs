//! Status events via Redis Pub/Sub.

use redis::AsyncCommands;
use tracing::debug;

use reelcut_models::{JobId, JobStatus, StatusEvent};

use crate::error::QueueResult;

/// Per-job publish/subscribe topic for status transitions.
///
/// Delivery is best-effort with no replay: a subscriber only sees events
/// published after it subscribed. Exactly one terminal event ends a job's
/// stream.
pub struct StatusChannel {
    client: redis::Client,
}

impl StatusChannel {
    /// Create a new status channel.
    pub fn new(redis_url: &str) -> QueueResult<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// Get the topic name for a job.
    pub fn channel_name(job_id: &JobId) -> String {
        format!("job:{}", job_id)
    }

    /// Publish a status event on a job's topic.
    pub async fn publish(&self, job_id: &JobId, event: &StatusEvent) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let channel = Self::channel_name(job_id);
        let payload = serde_json::to_string(event)?;

        debug!(job_id = %job_id, status = %event.status, "Publishing status event");
        conn.publish::<_, _, ()>(channel, payload).await?;
        Ok(())
    }

    /// Publish a plain transition.
    pub async fn transition(&self, job_id: &JobId, status: JobStatus) -> QueueResult<()> {
        self.publish(job_id, &StatusEvent::status(status)).await
    }

    /// Publish the terminal completion event with the rendered clips.
    pub async fn completed(&self, job_id: &JobId, clips: Vec<String>) -> QueueResult<()> {
        self.publish(job_id, &StatusEvent::completed(clips)).await
    }

    /// Publish the terminal failure event.
    pub async fn failed(&self, job_id: &JobId, error: impl Into<String>) -> QueueResult<()> {
        self.publish(job_id, &StatusEvent::failed(error)).await
    }

    /// Subscribe to a job's status events.
    /// Returns a pinned stream that can be polled with `.next()`.
    pub async fn subscribe(
        &self,
        job_id: &JobId,
    ) -> QueueResult<std::pin::Pin<Box<dyn futures_util::Stream<Item = StatusEvent> + Send>>> {
        use futures_util::StreamExt;

        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(Self::channel_name(job_id)).await?;

        let stream = pubsub.into_on_message().filter_map(|msg| async move {
            let payload: String = msg.get_payload().ok()?;
            serde_json::from_str(&payload).ok()
        });

        Ok(Box::pin(stream))
    }
}
