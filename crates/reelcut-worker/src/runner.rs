//! Stage-agnostic worker loop.

use std::time::Duration;

use tracing::{debug, error, info};

use reelcut_models::JobStatus;
use reelcut_queue::Stage;
use reelcut_store::ArtifactUpdate;

use crate::context::WorkerContext;
use crate::error::WorkerResult;
use crate::stages;

/// Run one worker instance for one stage role. Never returns under normal
/// operation.
///
/// The blocking pop is the loop's only suspension point; a popped id is
/// owned by this instance until it is forwarded or finalized. Per-job
/// errors mark the job failed and the loop keeps serving the queue — one
/// bad job never takes the worker down.
pub async fn run_worker(ctx: &WorkerContext, stage: Stage) -> WorkerResult<()> {
    info!(stage = %stage, "Worker started");

    loop {
        let job_id = match ctx.queue.pop_blocking(stage).await {
            Ok(id) => id,
            Err(e) => {
                error!(stage = %stage, error = %e, "Queue pop failed");
                tokio::time::sleep(Duration::from_secs(1)).await;
                continue;
            }
        };

        let job = match ctx.store.get_unscoped(&job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                // Queue and store should never diverge; tolerate it if they do.
                debug!(job_id = %job_id, "Job id popped but no store record, skipping");
                continue;
            }
            Err(e) => {
                error!(job_id = %job_id, error = %e, "Failed to load job record");
                continue;
            }
        };

        let active = stage.active_status();
        if let Err(e) = ctx
            .store
            .advance(&job_id, active, ArtifactUpdate::default())
            .await
        {
            error!(job_id = %job_id, error = %e, "Failed to mark job {active}");
            continue;
        }
        if let Err(e) = ctx.status.transition(&job_id, active).await {
            // Status delivery is best-effort; the job itself goes on.
            error!(job_id = %job_id, error = %e, "Failed to publish status");
        }

        if let Err(e) = stages::process(ctx, stage, &job).await {
            error!(job_id = %job_id, stage = %stage, error = %e, "Stage failed, job is terminal");

            if let Err(store_err) = ctx
                .store
                .advance(&job_id, JobStatus::Failed, ArtifactUpdate::default())
                .await
            {
                error!(job_id = %job_id, error = %store_err, "Failed to mark job failed");
            }
            if let Err(pub_err) = ctx.status.failed(&job_id, e.to_string()).await {
                error!(job_id = %job_id, error = %pub_err, "Failed to publish failure");
            }
        }
    }
}
