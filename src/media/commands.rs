use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{ClipcastError, Result};

/// Abstract ffmpeg command representation.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl FfmpegCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Seek to position before decoding (seconds)
    pub fn seek(self, seconds: u32) -> Self {
        self.arg("-ss").arg(seconds.to_string())
    }

    /// Limit output duration (seconds)
    pub fn limit_duration(self, seconds: u32) -> Self {
        self.arg("-t").arg(seconds.to_string())
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Copy audio stream
    pub fn copy_audio(self) -> Self {
        self.audio_codec("copy")
    }

    /// Add video filter
    pub fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-vf").arg(filter)
    }

    /// Set x264 preset
    pub fn preset<S: Into<String>>(self, preset: S) -> Self {
        self.arg("-preset").arg(preset)
    }

    /// Set constant rate factor
    pub fn crf(self, crf: u32) -> Self {
        self.arg("-crf").arg(crf.to_string())
    }

    /// Set pixel format
    pub fn pixel_format<S: Into<String>>(self, format: S) -> Self {
        self.arg("-pix_fmt").arg(format)
    }

    /// Set H.264 profile
    pub fn profile<S: Into<String>>(self, profile: S) -> Self {
        self.arg("-profile:v").arg(profile)
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        debug!("Executing ffmpeg command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let mut cmd = Command::new(&self.binary_path);
        cmd.args(&self.args);

        let output = cmd
            .output()
            .map_err(|e| ClipcastError::Media(format!("Failed to execute ffmpeg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipcastError::Media(format!(
                "{} failed: {}",
                self.description, stderr
            )));
        }

        Ok(())
    }
}
