//! Clipcast - Automated Short-Clip Pipeline
//!
//! A Rust implementation of a linear pipeline that downloads a video,
//! cuts a vertical clip, transcribes it, burns subtitles, and uploads
//! the result using yt-dlp, whisper, and ffmpeg.

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod media;
pub mod metadata;
pub mod pipeline;
pub mod subtitle;
pub mod transcribe;
pub mod upload;
pub mod workspace;
