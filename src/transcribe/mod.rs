// Transcription behind a trait so the pipeline can be driven by test
// doubles without invoking a real speech model.

pub mod whisper_cli;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::TranscriberConfig;
use crate::error::Result;

/// A timed span of recognized speech text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Ordered transcription result as emitted by the speech model.
/// Segments are assumed to arrive in non-decreasing start order; the
/// subtitle serializer does not re-sort them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    pub language: Option<String>,
}

/// Main trait for transcription operations
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a media file into timed text segments
    async fn transcribe(
        &self,
        media_path: &Path,
        language: Option<&str>,
    ) -> Result<Transcription>;

    /// Check if the transcriber is available
    fn check_availability(&self) -> Result<()>;
}

/// Create the default transcriber implementation (whisper CLI)
pub fn create_transcriber(config: TranscriberConfig) -> Box<dyn Transcriber> {
    Box::new(whisper_cli::WhisperCliTranscriber::new(config))
}
