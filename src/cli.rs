use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: download, clip, subtitle, burn, upload
    Run {
        /// Source video URL; prompted on stdin when omitted
        url: Option<String>,
    },

    /// Download a source video
    Download {
        /// Source video URL
        #[arg(short, long)]
        url: String,

        /// Destination video file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Cut a vertical clip out of a source video
    Clip {
        /// Input video file
        #[arg(short, long)]
        input: PathBuf,

        /// Output clip file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Transcribe a media file to an SRT subtitle file
    Transcribe {
        /// Input media file
        #[arg(short, long)]
        input: PathBuf,

        /// Output subtitle file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Burn subtitles into a video file
    Burn {
        /// Input video file
        #[arg(short, long)]
        video: PathBuf,

        /// Subtitle file
        #[arg(short, long)]
        subtitles: PathBuf,

        /// Output video file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Upload a finished video
    Upload {
        /// Video file to upload
        #[arg(short, long)]
        video: PathBuf,

        /// Video title
        #[arg(short, long)]
        title: String,

        /// Video description
        #[arg(short, long)]
        description: String,
    },
}
