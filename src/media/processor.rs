use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::info;

use super::{FfmpegCommand, MediaProcessor};
use crate::config::{ClipConfig, MediaConfig};
use crate::error::{ClipcastError, Result};

/// Concrete ffmpeg-based media processor.
pub struct FfmpegProcessor {
    config: MediaConfig,
}

impl FfmpegProcessor {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    /// Scale the source to the target height, then crop a centered
    /// vertical window out of it.
    fn vertical_crop_filter(clip: &ClipConfig) -> String {
        format!(
            "scale=-1:{h},crop={w}:{h}:(iw-{w})/2:0",
            w = clip.crop_width,
            h = clip.crop_height
        )
    }

    fn encode_options(&self, cmd: FfmpegCommand) -> FfmpegCommand {
        cmd.video_codec("libx264")
            .preset(&self.config.preset)
            .crf(self.config.crf)
            .pixel_format(&self.config.pixel_format)
            .profile(&self.config.profile)
            .copy_audio()
    }
}

#[async_trait]
impl MediaProcessor for FfmpegProcessor {
    async fn cut_clip(
        &self,
        source_path: &Path,
        clip_path: &Path,
        clip: &ClipConfig,
    ) -> Result<()> {
        info!(
            "Cutting {}s vertical clip from {} -> {}",
            clip.duration_secs,
            source_path.display(),
            clip_path.display()
        );

        let cmd = FfmpegCommand::new(&self.config.binary_path, "Clip extraction")
            .overwrite()
            .seek(clip.start_secs)
            .input(source_path)
            .limit_duration(clip.duration_secs)
            .video_filter(Self::vertical_crop_filter(clip));

        self.encode_options(cmd).output(clip_path).execute().await?;

        info!("Clip extraction completed");
        Ok(())
    }

    async fn burn_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        info!(
            "Burning subtitles from {} into {} -> {}",
            subtitle_path.display(),
            video_path.display(),
            output_path.display()
        );

        let cmd = FfmpegCommand::new(&self.config.binary_path, "Subtitle burning")
            .overwrite()
            .input(video_path)
            .video_filter(format!("subtitles={}", subtitle_path.display()));

        self.encode_options(cmd).output(output_path).execute().await?;

        info!("Subtitle burning completed");
        Ok(())
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("-version")
            .output()
            .map_err(|e| ClipcastError::Media(format!("ffmpeg not found: {}", e)))?;

        if output.status.success() {
            info!("ffmpeg is available");
            Ok(())
        } else {
            Err(ClipcastError::Media("ffmpeg version check failed".to_string()))
        }
    }
}
