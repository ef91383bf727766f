use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::Result;
use crate::transcribe::TranscriptSegment;

/// Generate an SRT subtitle file from transcript segments.
///
/// Blocks are numbered sequentially from 1 regardless of any numbering
/// in the input. An empty segment list produces an empty file. Existing
/// content at `output_path` is overwritten.
pub async fn write_srt<P: AsRef<Path>>(
    segments: &[TranscriptSegment],
    output_path: P,
) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Generating SRT file: {}", output_path.display());

    fs::write(output_path, render_srt(segments)).await?;

    info!("SRT file generated successfully");
    Ok(())
}

/// Render transcript segments to SRT text.
pub fn render_srt(segments: &[TranscriptSegment]) -> String {
    let mut srt_content = String::new();

    for (index, segment) in segments.iter().enumerate() {
        let start_time = format_srt_time(segment.start);
        let end_time = format_srt_time(segment.end);

        srt_content.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            start_time,
            end_time,
            segment.text.trim()
        ));
    }

    srt_content
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm).
///
/// Milliseconds are rounded before the split into fields, so a value
/// like 59.9995 carries into the seconds field instead of rendering a
/// four-digit millisecond component. Negative or non-finite input is
/// clamped to zero.
pub fn format_srt_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };

    let total_milliseconds = (seconds * 1000.0).round() as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Reconstruct an approximate flat transcript from a previously
/// serialized SRT file.
///
/// Lines that are bare sequence numbers or contain the `" --> "` time
/// separator are skipped; everything else is trimmed and space-joined.
/// This is a lossy heuristic, not a structured parser: subtitle text
/// that is itself a bare integer or contains the arrow token will be
/// misclassified. Downstream consumers only need a rough text sample,
/// so the heuristic is kept as-is.
pub async fn plain_text_from_srt<P: AsRef<Path>>(srt_path: P) -> Result<String> {
    let content = fs::read_to_string(srt_path.as_ref()).await?;

    let mut text = String::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.parse::<u64>().is_ok() || line.contains(" --> ") {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(trimmed);
    }

    Ok(text)
}
