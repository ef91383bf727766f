use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::debug;

use crate::error::Result;

/// Stable identifier for a single work item.
///
/// Either extracted from the source URL's `v=` parameter or generated
/// from wall-clock seconds when the URL carries no recognizable id.
/// The two variants let callers log which path was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoId {
    Extracted(String),
    Generated(String),
}

impl VideoId {
    /// Resolve an identifier from a source URL.
    ///
    /// The `v=` value is truncated at the first `&`. A URL without a
    /// `v=` parameter falls back to the current Unix time in seconds,
    /// which keeps artifact names unique across interactive runs.
    pub fn from_url(url: &str) -> Self {
        match url.split_once("v=") {
            Some((_, rest)) => {
                let id = match rest.split_once('&') {
                    Some((id, _)) => id,
                    None => rest,
                };
                VideoId::Extracted(id.to_string())
            }
            None => VideoId::Generated(Utc::now().timestamp().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VideoId::Extracted(id) | VideoId::Generated(id) => id,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, VideoId::Generated(_))
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run filesystem layout, derived once from the video identifier
/// and passed by reference to every pipeline stage.
#[derive(Debug, Clone)]
pub struct Workspace {
    video_id: VideoId,
    downloads_dir: PathBuf,
    clips_dir: PathBuf,
    subtitles_dir: PathBuf,
    output_dir: PathBuf,
}

impl Workspace {
    pub fn new<P: AsRef<Path>>(base_dir: P, video_id: VideoId) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            video_id,
            downloads_dir: base_dir.join("downloads"),
            clips_dir: base_dir.join("clips"),
            subtitles_dir: base_dir.join("subtitles"),
            output_dir: base_dir.join("output"),
        }
    }

    /// Create the four artifact directories if they do not exist yet.
    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [
            &self.downloads_dir,
            &self.clips_dir,
            &self.subtitles_dir,
            &self.output_dir,
        ] {
            fs::create_dir_all(dir).await?;
            debug!("Ensured directory: {}", dir.display());
        }
        Ok(())
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    /// Acquired source video.
    pub fn source_path(&self) -> PathBuf {
        self.downloads_dir
            .join(format!("{}.mp4", self.video_id.as_str()))
    }

    /// Extracted vertical sub-clip.
    pub fn clip_path(&self) -> PathBuf {
        self.clips_dir
            .join(format!("{}_clip.mp4", self.video_id.as_str()))
    }

    /// Serialized subtitle track.
    pub fn subtitle_path(&self) -> PathBuf {
        self.subtitles_dir
            .join(format!("{}.srt", self.video_id.as_str()))
    }

    /// Composed, subtitle-burned final video.
    pub fn final_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_final.mp4", self.video_id.as_str()))
    }
}
