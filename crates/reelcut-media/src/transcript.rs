//! Transcription collaborator and transcript artifact access.

use std::path::Path;

use serde::Deserialize;
use tokio::process::Command;
use tracing::info;

use crate::download::stderr_tail;
use crate::error::{MediaError, MediaResult};

/// Transcript artifact shape: a JSON object with at least a `text` field.
#[derive(Debug, Deserialize)]
struct TranscriptArtifact {
    text: String,
}

/// Speech-to-text subprocess.
///
/// The transcriber is an external script invoked as
/// `<program> <script> <audio> <dest>`, writing the transcript artifact
/// to `dest`.
#[derive(Debug, Clone)]
pub struct Transcriber {
    program: String,
    script: String,
}

impl Transcriber {
    pub fn new(program: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
        }
    }

    /// Configure from `TRANSCRIBER_PROGRAM` / `TRANSCRIBER_SCRIPT`,
    /// defaulting to the bundled whisper script.
    pub fn from_env() -> Self {
        Self {
            program: std::env::var("TRANSCRIBER_PROGRAM")
                .unwrap_or_else(|_| "python3".to_string()),
            script: std::env::var("TRANSCRIBER_SCRIPT")
                .unwrap_or_else(|_| "scripts/transcribe.py".to_string()),
        }
    }

    /// Transcribe `audio` into the artifact at `dest`.
    pub async fn transcribe(&self, audio: &Path, dest: &Path) -> MediaResult<()> {
        info!(audio = %audio.display(), dest = %dest.display(), "Transcribing audio");

        let output = Command::new(&self.program)
            .arg(&self.script)
            .arg(audio)
            .arg(dest)
            .output()
            .await
            .map_err(|e| MediaError::command_failed(&self.program, e.to_string()))?;

        if !output.status.success() {
            return Err(MediaError::command_failed(
                &self.program,
                stderr_tail(&output.stderr),
            ));
        }
        Ok(())
    }
}

/// Read the plain text out of a transcript artifact.
pub async fn read_transcript_text(path: &Path) -> MediaResult<String> {
    let raw = tokio::fs::read_to_string(path).await?;
    let artifact: TranscriptArtifact = serde_json::from_str(&raw)
        .map_err(|e| MediaError::InvalidTranscript(e.to_string()))?;
    Ok(artifact.text)
}
