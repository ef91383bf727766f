use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ClipcastError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub downloader: DownloaderConfig,
    pub clip: ClipConfig,
    pub media: MediaConfig,
    pub transcriber: TranscriberConfig,
    pub metadata: MetadataConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Base directory under which downloads/, clips/, subtitles/ and
    /// output/ are created
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// Path to downloader binary (e.g., yt-dlp)
    pub binary_path: String,
    /// Format selector passed to the downloader
    pub format: String,
    /// Container format for merged output
    pub merge_output_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Offset into the source video where the clip starts (seconds)
    pub start_secs: u32,
    /// Clip duration (seconds)
    pub duration_secs: u32,
    /// Width of the vertical crop window
    pub crop_width: u32,
    /// Height the source is scaled to before cropping
    pub crop_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// x264 preset used for clip extraction and subtitle burning
    pub preset: String,
    /// Constant rate factor (0-51, lower = better quality)
    pub crf: u32,
    /// Pixel format for player compatibility
    pub pixel_format: String,
    /// H.264 profile
    pub profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Path to transcriber binary (e.g., whisper)
    pub binary_path: String,
    /// Model to use for transcription
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Title hook phrases, selected by seed modulo list length
    pub hooks: Vec<String>,
    /// Maximum title length in characters
    pub title_max_chars: usize,
    /// Number of transcript characters sampled into the description
    pub description_sample_chars: usize,
    /// Line appended after the transcript sample
    pub call_to_action: String,
    /// Hashtag line appended to the description
    pub hashtags: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Upload endpoint of the publishing platform
    pub endpoint: String,
    /// File holding the OAuth bearer token, obtained out-of-band.
    /// The CLIPCAST_YT_TOKEN environment variable takes precedence.
    pub token_path: Option<PathBuf>,
    /// Platform category id
    pub category_id: String,
    /// Privacy status of the published video
    pub privacy_status: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig {
                base_dir: PathBuf::from("."),
            },
            downloader: DownloaderConfig {
                binary_path: "yt-dlp".to_string(),
                format: "bv*[vcodec=h264]+ba[acodec=aac]/mp4".to_string(),
                merge_output_format: "mp4".to_string(),
            },
            clip: ClipConfig {
                start_secs: 60,
                duration_secs: 45,
                crop_width: 2160,
                crop_height: 3840,
            },
            media: MediaConfig {
                binary_path: "ffmpeg".to_string(),
                preset: "slow".to_string(),
                crf: 16,
                pixel_format: "yuv420p".to_string(),
                profile: "high".to_string(),
            },
            transcriber: TranscriberConfig {
                binary_path: "whisper".to_string(),
                model: "base".to_string(),
            },
            metadata: MetadataConfig {
                hooks: vec![
                    "Nobody tells you this about life".to_string(),
                    "Most people learn this too late".to_string(),
                    "This advice changed my mindset".to_string(),
                    "You need to hear this today".to_string(),
                    "This hit harder than expected".to_string(),
                ],
                title_max_chars: 60,
                description_sample_chars: 140,
                call_to_action: "Watch till the end.".to_string(),
                hashtags: "#Shorts #Mindset #LifeAdvice".to_string(),
            },
            upload: UploadConfig {
                endpoint: "https://www.googleapis.com/upload/youtube/v3/videos".to_string(),
                token_path: None,
                category_id: "22".to_string(),
                privacy_status: "public".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClipcastError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ClipcastError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ClipcastError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ClipcastError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
