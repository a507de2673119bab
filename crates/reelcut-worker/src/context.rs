//! Shared worker context.

use reelcut_media::{StorageLayout, Transcriber};
use reelcut_queue::{StatusChannel, WorkQueue};
use reelcut_store::JobStore;

use crate::config::WorkerConfig;
use crate::error::WorkerResult;

/// Handles a stage worker needs: the job store, the work queues, the
/// status channel, the storage layout and the transcriber collaborator.
/// Constructed once at startup and passed into the loop.
pub struct WorkerContext {
    pub store: JobStore,
    pub queue: WorkQueue,
    pub status: StatusChannel,
    pub layout: StorageLayout,
    pub transcriber: Transcriber,
}

impl WorkerContext {
    /// Connect all handles.
    pub async fn new(config: &WorkerConfig) -> WorkerResult<Self> {
        let pool = reelcut_store::connect(&config.database_url).await?;
        reelcut_store::ensure_schema(&pool).await?;

        let layout = StorageLayout::new(&config.storage_root);
        layout.ensure_dirs().await?;

        Ok(Self {
            store: JobStore::new(pool),
            queue: WorkQueue::new(&config.redis_url)?,
            status: StatusChannel::new(&config.redis_url)?,
            layout,
            transcriber: Transcriber::from_env(),
        })
    }
}
