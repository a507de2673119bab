//! Per-stage processing.

use tracing::{info, warn};

use reelcut_media::{cut_clip, download_video, extract_audio, read_transcript_text};
use reelcut_models::{sanitize_highlights, Job, JobStatus};
use reelcut_queue::Stage;
use reelcut_store::ArtifactUpdate;

use crate::context::WorkerContext;
use crate::error::{WorkerError, WorkerResult};
use crate::gemini::GeminiClient;

/// Run one job through one stage.
///
/// Persists produced artifact paths and forwards the job id to the next
/// stage's queue; the render stage finalizes the job instead. Any error
/// returned here permanently fails the job — there is no retry.
pub async fn process(ctx: &WorkerContext, stage: Stage, job: &Job) -> WorkerResult<()> {
    match stage {
        Stage::Download => download(ctx, job).await,
        Stage::Transcribe => transcribe(ctx, job).await,
        Stage::Render => render(ctx, job).await,
    }
}

/// Fetch the source video and extract its audio track.
async fn download(ctx: &WorkerContext, job: &Job) -> WorkerResult<()> {
    let video = ctx.layout.video_path(&job.id);
    download_video(&job.url, &video)
        .await
        .map_err(|e| WorkerError::DownloadFailed(e.to_string()))?;

    let audio = ctx.layout.audio_path(&job.id);
    extract_audio(&video, &audio)
        .await
        .map_err(|e| WorkerError::AudioFailed(e.to_string()))?;

    ctx.store
        .advance(
            &job.id,
            JobStatus::Downloading,
            ArtifactUpdate {
                video_path: Some(video.to_string_lossy().into_owned()),
                audio_path: Some(audio.to_string_lossy().into_owned()),
                ..Default::default()
            },
        )
        .await?;

    ctx.queue.push(Stage::Transcribe, &job.id).await?;
    info!(job_id = %job.id, "Moved to transcribe queue");
    Ok(())
}

/// Produce the transcript artifact from the extracted audio.
async fn transcribe(ctx: &WorkerContext, job: &Job) -> WorkerResult<()> {
    let audio = job
        .audio_path
        .as_deref()
        .ok_or(WorkerError::MissingArtifact("audio"))?;

    let transcript = ctx.layout.transcript_path(&job.id);
    ctx.transcriber
        .transcribe(audio.as_ref(), &transcript)
        .await
        .map_err(|e| WorkerError::TranscribeFailed(e.to_string()))?;

    ctx.store
        .advance(
            &job.id,
            JobStatus::Transcribing,
            ArtifactUpdate {
                transcript_path: Some(transcript.to_string_lossy().into_owned()),
                ..Default::default()
            },
        )
        .await?;

    ctx.queue.push(Stage::Render, &job.id).await?;
    info!(job_id = %job.id, "Moved to render queue");
    Ok(())
}

/// Detect highlights, cut clips and finalize the job.
///
/// Detector failure is non-fatal: the job completes with an empty highlight
/// list and zero clips rather than failing. Everything downstream of
/// detection (writing the artifact, cutting) fails the job as usual.
async fn render(ctx: &WorkerContext, job: &Job) -> WorkerResult<()> {
    let transcript_path = job
        .transcript_path
        .as_deref()
        .ok_or(WorkerError::MissingArtifact("transcript"))?;
    let video_path = job
        .video_path
        .as_deref()
        .ok_or(WorkerError::MissingArtifact("video"))?;

    let transcript = read_transcript_text(transcript_path.as_ref()).await?;

    let detected = match GeminiClient::from_env() {
        Ok(client) => client.detect_highlights(&transcript, job.clip_count).await,
        Err(e) => Err(e),
    };
    let detected = detected.unwrap_or_else(|e| {
        warn!(job_id = %job.id, error = %e, "Highlight detection failed, completing with no clips");
        Vec::new()
    });

    let highlights = sanitize_highlights(detected, job.clip_count as usize);

    let highlights_path = ctx.layout.highlights_path(&job.id);
    tokio::fs::write(&highlights_path, serde_json::to_vec_pretty(&highlights)?).await?;

    tokio::fs::create_dir_all(ctx.layout.clips_dir(&job.id)).await?;

    let mut clips = Vec::with_capacity(highlights.len());
    for (i, highlight) in highlights.iter().enumerate() {
        let out = ctx.layout.clip_path(&job.id, i + 1);
        cut_clip(video_path.as_ref(), highlight.start, highlight.end, &out)
            .await
            .map_err(|e| WorkerError::CutFailed(e.to_string()))?;
        clips.push(out.to_string_lossy().into_owned());
    }

    ctx.store
        .advance(
            &job.id,
            JobStatus::Completed,
            ArtifactUpdate {
                highlights_path: Some(highlights_path.to_string_lossy().into_owned()),
                clips_path: Some(clips.clone()),
                ..Default::default()
            },
        )
        .await?;

    ctx.status.completed(&job.id, clips).await?;
    info!(job_id = %job.id, clip_count = highlights.len(), "Job completed");
    Ok(())
}
