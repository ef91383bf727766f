// Media processing built around ffmpeg:
// - commands: abstract command builder
// - processor: clip extraction and subtitle burning

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;

pub use commands::*;
pub use processor::*;

use crate::config::{ClipConfig, MediaConfig};
use crate::error::Result;

/// Main trait for media processing operations
#[async_trait]
pub trait MediaProcessor: Send + Sync {
    /// Cut a vertical sub-clip out of the source video
    async fn cut_clip(
        &self,
        source_path: &Path,
        clip_path: &Path,
        clip: &ClipConfig,
    ) -> Result<()>;

    /// Burn subtitles into a video file
    async fn burn_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<()>;

    /// Check if the media processor is available
    fn check_availability(&self) -> Result<()>;
}

/// Create the default media processor implementation (ffmpeg-based)
pub fn create_processor(config: MediaConfig) -> Box<dyn MediaProcessor> {
    Box::new(processor::FfmpegProcessor::new(config))
}
