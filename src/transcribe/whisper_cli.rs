use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::info;

use super::{Transcriber, TranscriptSegment, Transcription};
use crate::config::TranscriberConfig;
use crate::error::{ClipcastError, Result};

/// Whisper CLI JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperOutput {
    pub text: String,
    pub segments: Vec<WhisperSegment>,
    pub language: Option<String>,
}

/// Whisper CLI segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl From<WhisperOutput> for Transcription {
    fn from(output: WhisperOutput) -> Self {
        let segments = output
            .segments
            .into_iter()
            .map(|seg| TranscriptSegment {
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
            })
            .collect();

        Transcription {
            text: output.text,
            segments,
            language: output.language,
        }
    }
}

/// Transcriber backed by the whisper command-line tool.
pub struct WhisperCliTranscriber {
    config: TranscriberConfig,
}

impl WhisperCliTranscriber {
    pub fn new(config: TranscriberConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Transcriber for WhisperCliTranscriber {
    async fn transcribe(
        &self,
        media_path: &Path,
        language: Option<&str>,
    ) -> Result<Transcription> {
        info!("Transcribing with whisper: {}", media_path.display());

        // Whisper writes its output next to a directory we control, so
        // each invocation gets a fresh temp directory.
        let temp_dir = tempfile::tempdir()
            .map_err(|e| ClipcastError::Transcriber(format!("Failed to create temp directory: {}", e)))?;
        let output_dir = temp_dir.path();

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg(media_path)
            .arg("--model")
            .arg(&self.config.model)
            .arg("--output_dir")
            .arg(output_dir)
            .arg("--output_format")
            .arg("json");

        if let Some(lang) = language {
            cmd.arg("--language").arg(lang);
        }

        let output = cmd
            .output()
            .map_err(|e| ClipcastError::Transcriber(format!("Failed to execute whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipcastError::Transcriber(format!(
                "Whisper failed: {}",
                stderr
            )));
        }

        // Whisper names the JSON after the input file stem.
        let media_stem = media_path
            .file_stem()
            .ok_or_else(|| ClipcastError::Transcriber("Invalid media filename".to_string()))?;
        let json_file = output_dir.join(format!("{}.json", media_stem.to_string_lossy()));

        let json_content = std::fs::read_to_string(&json_file)
            .map_err(|e| ClipcastError::Transcriber(format!("Failed to read whisper output: {}", e)))?;

        let whisper_output: WhisperOutput = serde_json::from_str(&json_content)
            .map_err(|e| ClipcastError::Transcriber(format!("Failed to parse whisper JSON: {}", e)))?;

        info!(
            "Transcription completed: {} segments",
            whisper_output.segments.len()
        );

        Ok(whisper_output.into())
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("--help")
            .output()
            .map_err(|e| ClipcastError::Transcriber(format!("whisper not found: {}", e)))?;

        if output.status.success() {
            info!("whisper is available");
            Ok(())
        } else {
            Err(ClipcastError::Transcriber(
                "whisper availability check failed".to_string(),
            ))
        }
    }
}
