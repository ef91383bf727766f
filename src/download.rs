use async_trait::async_trait;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::config::DownloaderConfig;
use crate::error::{ClipcastError, Result};

/// Main trait for source acquisition
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Fetch the video at `url` into `dest_path`
    async fn download(&self, url: &str, dest_path: &Path) -> Result<()>;

    /// Check if the downloader is available
    fn check_availability(&self) -> Result<()>;
}

/// Downloader backed by the yt-dlp command-line tool.
pub struct YtDlpDownloader {
    config: DownloaderConfig,
}

impl YtDlpDownloader {
    pub fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    async fn download(&self, url: &str, dest_path: &Path) -> Result<()> {
        info!("Downloading video to {}", dest_path.display());

        let mut cmd = Command::new(&self.config.binary_path);
        cmd.arg("-f")
            .arg(&self.config.format)
            .arg("--merge-output-format")
            .arg(&self.config.merge_output_format)
            .arg("-o")
            .arg(dest_path)
            .arg("--no-overwrites")
            .arg(url);

        debug!("Executing downloader command: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| ClipcastError::Downloader(format!("Failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipcastError::Downloader(format!(
                "Download failed: {}",
                stderr
            )));
        }

        info!("Download completed");
        Ok(())
    }

    fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.config.binary_path)
            .arg("--version")
            .output()
            .map_err(|e| ClipcastError::Downloader(format!("yt-dlp not found: {}", e)))?;

        if output.status.success() {
            info!("yt-dlp is available");
            Ok(())
        } else {
            Err(ClipcastError::Downloader(
                "yt-dlp version check failed".to_string(),
            ))
        }
    }
}
