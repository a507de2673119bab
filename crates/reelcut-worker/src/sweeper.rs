//! Retention-based cleanup sweeper.

use tracing::{error, info};

use reelcut_media::StorageLayout;
use reelcut_store::JobStore;

use crate::config::SweeperConfig;
use crate::error::WorkerResult;

/// Periodically reclaims storage from completed jobs past their retention
/// window. Deletes the job's artifacts and nulls the artifact columns while
/// keeping the row itself — audit metadata survives cleanup.
///
/// Only completed jobs are eligible; failed jobs keep their artifacts.
pub struct Sweeper {
    store: JobStore,
    layout: StorageLayout,
    config: SweeperConfig,
}

impl Sweeper {
    pub fn new(store: JobStore, layout: StorageLayout, config: SweeperConfig) -> Self {
        Self {
            store,
            layout,
            config,
        }
    }

    /// Run forever on the configured interval, sweeping once immediately.
    pub async fn run(&self) -> WorkerResult<()> {
        info!(
            interval_secs = self.config.interval.as_secs(),
            retention_hours = self.config.retention.num_hours(),
            "Cleanup sweeper started"
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(0) => {}
                Ok(n) => info!(swept = n, "Cleanup run finished"),
                Err(e) => error!(error = %e, "Cleanup run failed"),
            }
        }
    }

    /// Sweep every eligible job once. A failure on one job is logged and
    /// does not stop the rest of the run.
    pub async fn run_once(&self) -> WorkerResult<usize> {
        let expired = self.store.expired_completed(self.config.retention).await?;

        let mut swept = 0;
        for job in expired {
            info!(job_id = %job.id, "Cleaning expired job");

            let removed = self.layout.remove_job_artifacts(&job.id).await;
            if let Err(e) = self.store.clear_artifacts(&job.id).await {
                error!(job_id = %job.id, error = %e, "Failed to clear artifact columns");
                continue;
            }

            info!(job_id = %job.id, removed, "Cleanup done");
            swept += 1;
        }
        Ok(swept)
    }
}
