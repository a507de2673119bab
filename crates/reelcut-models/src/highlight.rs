//! Detected highlight model.

use serde::{Deserialize, Serialize};

/// A detected clip candidate within the source video.
///
/// Produced by the highlight detector during the render stage and persisted
/// only as a JSON array artifact; never stored relationally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Clip start offset in seconds
    pub start: f64,
    /// Clip end offset in seconds
    pub end: f64,
    /// Short hook title
    #[serde(default)]
    pub title: String,
    /// Opening sentence of the clip
    #[serde(default)]
    pub hook: String,
    /// Detector's retention score
    #[serde(default)]
    pub viral_score: f64,
    /// Why the detector picked this span
    #[serde(default)]
    pub reason: String,
}

impl Highlight {
    /// A highlight is usable only when its span is non-empty.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Clip duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Drop highlights with empty or inverted spans and cap the list at the
/// requested clip count. Detector output may exceed the request; the job
/// must never render more clips than were asked for.
pub fn sanitize_highlights(highlights: Vec<Highlight>, max: usize) -> Vec<Highlight> {
    highlights
        .into_iter()
        .filter(Highlight::is_valid)
        .take(max)
        .collect()
}
