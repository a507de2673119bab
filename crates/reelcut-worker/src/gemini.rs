//! Gemini highlight detector client.
//!
//! Sends a job's transcript to the Gemini API and parses the returned
//! highlight array. Callers treat any error here as degraded detection,
//! not as a job failure.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use reelcut_models::Highlight;

use crate::error::{WorkerError, WorkerResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Transcripts are trimmed to this many characters before prompting.
const MAX_TRANSCRIPT_CHARS: usize = 25_000;

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Create a client from `GEMINI_API_KEY`.
    pub fn from_env() -> WorkerResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| WorkerError::config_error("GEMINI_API_KEY not set"))?;
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, base_url, model))
    }

    /// Create a client with explicit endpoint settings.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    /// Detect up to `clip_count` highlights in a transcript.
    ///
    /// Returns the raw detector output; span validation and truncation to
    /// the requested count happen at the render stage.
    pub async fn detect_highlights(
        &self,
        transcript: &str,
        clip_count: i32,
    ) -> WorkerResult<Vec<Highlight>> {
        let prompt = build_prompt(transcript, clip_count);
        info!(clip_count, "Requesting highlight detection");

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WorkerError::detection_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WorkerError::detection_failed(format!(
                "Gemini returned {}",
                response.status()
            )));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| WorkerError::detection_failed(e.to_string()))?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| WorkerError::detection_failed("Empty Gemini response"))?;

        let highlights = parse_highlights(text)?;
        debug!(count = highlights.len(), "Detector returned highlights");
        Ok(highlights)
    }
}

/// Parse the detector's JSON array, tolerating markdown code fences.
fn parse_highlights(text: &str) -> WorkerResult<Vec<Highlight>> {
    let cleaned = strip_code_fences(text);
    let value: serde_json::Value = serde_json::from_str(&cleaned)
        .map_err(|e| WorkerError::detection_failed(format!("Unparseable response: {e}")))?;

    if !value.is_array() {
        return Err(WorkerError::detection_failed("Response is not an array"));
    }
    serde_json::from_value(value)
        .map_err(|e| WorkerError::detection_failed(format!("Malformed highlight entry: {e}")))
}

/// Remove markdown fencing Gemini sometimes wraps JSON in.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Build the detection prompt, trimming oversized transcripts.
fn build_prompt(transcript: &str, clip_count: i32) -> String {
    let safe_transcript: String = transcript.chars().take(MAX_TRANSCRIPT_CHARS).collect();

    format!(
        r#"You are a world-class viral content editor, retention analyst,
and short-form algorithm expert (YouTube Shorts, Reels, TikTok).

STRICT OBJECTIVE:
Extract EXACTLY {clip_count} high-retention viral clips.

SELECTION CRITERIA:
Select emotional spikes, bold claims, secrets,
money stories, transformation, controversy, humor, value bombs.

REJECT greetings, context setup, repetition, sponsor talk,
generic advice, neutral tone.

CLIP RULES:
- Each clip must feel COMPLETE
- Minimum duration: 18 seconds
- Maximum duration: 65 seconds
- First 3 seconds must hook strongly
- Ending must feel impactful

LANGUAGE:
Auto-detect the language. Preserve it. Do NOT translate.

OUTPUT FORMAT (STRICT JSON ARRAY ONLY):

[
  {{
    "start": number,
    "end": number,
    "title": "Short viral hook title",
    "hook": "Powerful opening sentence",
    "viral_score": number,
    "reason": "Why this clip works"
  }}
]

IMPORTANT:
Return EXACTLY {clip_count} clips.
Return ONLY JSON.
No markdown.
No explanation.

Transcript:
{safe_transcript}"#
    )
}
