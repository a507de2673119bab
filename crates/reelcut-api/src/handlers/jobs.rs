//! Job submission, listing, detail, live stream and status override.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::Response;
use axum::Json;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::info;
use validator::ValidateUrl;

use reelcut_models::{resolve_clip_count, JobId, JobStatus};
use reelcut_queue::Stage;
use reelcut_store::ArtifactUpdate;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::response::Envelope;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub url: Option<String>,
    /// Accepted as raw JSON so a bad count degrades to the default
    /// instead of failing deserialization.
    pub count: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// POST /jobs
///
/// Creates the job record, then hands its id to the download queue. The
/// rate-limit counter is incremented on every attempt, allowed or not.
pub async fn create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateJobRequest>,
) -> ApiResult<Response> {
    let url = body
        .url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Valid URL is required"))?;
    if !url.validate_url() {
        return Err(ApiError::validation("Valid URL is required"));
    }

    if !state.job_limiter.hit(&user.id).await? {
        return Err(ApiError::rate_limited(
            "Job limit exceeded. Max 10 jobs per hour.",
        ));
    }

    let clip_count = resolve_clip_count(body.count.as_ref());
    let job = state.store.create(&user.id, url, clip_count).await?;
    state.queue.push(Stage::Download, &job.id).await?;

    info!(job_id = %job.id, user_id = %user.id, clip_count, "Job submitted");
    Ok(Envelope::created("Job created successfully", job))
}

/// GET /jobs
pub async fn list_jobs(State(state): State<AppState>, user: AuthUser) -> ApiResult<Response> {
    let jobs = state.store.list_by_owner(&user.id).await?;
    Ok(Envelope::ok(jobs))
}

/// GET /jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: AuthUser,
) -> ApiResult<Response> {
    let job = state
        .store
        .get(&JobId::from_string(id), &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Envelope::ok(job))
}

/// GET /jobs/:id/stream
///
/// Server-sent events of the job's status channel. There is no replay:
/// the stream carries only events published after the subscription, and
/// closes after forwarding the first terminal one. Dropping the response
/// releases the subscription.
pub async fn stream_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: AuthUser,
) -> ApiResult<Sse<BoxStream<'static, Result<Event, Infallible>>>> {
    let job_id = JobId::from_string(id);
    state
        .store
        .get(&job_id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    let events = state
        .status
        .subscribe(&job_id)
        .await?
        .scan(false, |done, event| {
            let out = if *done {
                None
            } else {
                *done = event.is_terminal();
                Some(event)
            };
            futures_util::future::ready(out)
        })
        .map(|event| {
            Ok(Event::default().data(serde_json::to_string(&event).unwrap_or_default()))
        })
        .boxed();

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// PATCH /jobs/:id/status
///
/// Administrative escape hatch. The new status must be a known enum value
/// and keep the job's lifecycle monotonic; the override is published on the
/// status channel like any worker transition.
pub async fn update_job_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: AuthUser,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<Response> {
    let new_status: JobStatus = body
        .status
        .as_deref()
        .ok_or_else(|| ApiError::validation("Status is required"))?
        .parse()
        .map_err(|_| ApiError::validation("Invalid status"))?;

    let job_id = JobId::from_string(id);
    let job = state
        .store
        .get(&job_id, &user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    if !job.status.can_transition_to(new_status) {
        return Err(ApiError::validation(format!(
            "Cannot move a {} job to {}",
            job.status, new_status
        )));
    }

    let updated = state
        .store
        .advance(&job_id, new_status, ArtifactUpdate::default())
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    if new_status == JobStatus::Completed {
        state
            .status
            .completed(&job_id, updated.clips().to_vec())
            .await?;
    } else {
        state.status.transition(&job_id, new_status).await?;
    }

    info!(job_id = %job_id, status = %new_status, "Status overridden");
    Ok(Envelope::ok(updated))
}
