//! Clipcast - Automated Short-Clip Pipeline
//!
//! This is the main entry point for the clipcast binary, which turns a
//! video URL into a published, subtitle-burned vertical clip using
//! yt-dlp, whisper, and ffmpeg.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clipcast::cli::{Args, Commands};
use clipcast::config::Config;
use clipcast::metadata::VideoMetadata;
use clipcast::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            // Try to load clipcast.toml from current directory first
            if std::path::Path::new("clipcast.toml").exists() {
                info!("Found clipcast.toml in current directory, loading...");
                Config::from_file("clipcast.toml")?
            } else {
                Config::default()
            }
        }
    };

    let pipeline = Pipeline::new(config)?;

    match args.command {
        Commands::Run { url } => {
            let url = match url {
                Some(url) => url,
                None => prompt_for_url()?,
            };
            info!("Running pipeline for: {}", url);

            let published_id = pipeline.run(&url).await?;
            println!("Published video id: {}", published_id);
        }
        Commands::Download { url, output } => {
            info!("Downloading {} -> {}", url, output.display());
            pipeline.download_source(&url, &output).await?;
        }
        Commands::Clip { input, output } => {
            info!("Cutting clip from: {}", input.display());
            pipeline.cut_clip(&input, &output).await?;
        }
        Commands::Transcribe { input, output } => {
            info!("Transcribing: {}", input.display());
            pipeline.transcribe_to_srt(&input, &output).await?;
        }
        Commands::Burn {
            video,
            subtitles,
            output,
        } => {
            info!("Burning subtitles into: {}", video.display());
            pipeline.burn(&video, &subtitles, &output).await?;
        }
        Commands::Upload {
            video,
            title,
            description,
        } => {
            info!("Uploading: {}", video.display());
            let metadata = VideoMetadata { title, description };
            let published_id = pipeline.publish(&video, &metadata).await?;
            println!("Published video id: {}", published_id);
        }
    }

    info!("clipcast completed successfully");
    Ok(())
}

/// Read one URL from standard input.
fn prompt_for_url() -> Result<String> {
    print!("Paste video URL: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let url = line.trim().to_string();
    if url.is_empty() {
        anyhow::bail!("No URL provided");
    }
    Ok(url)
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".clipcast").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "clipcast.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer
    let console_layer = fmt::layer().with_target(false);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
