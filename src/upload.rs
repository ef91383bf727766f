use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::error::{ClipcastError, Result};
use crate::metadata::VideoMetadata;

const TOKEN_ENV_VAR: &str = "CLIPCAST_YT_TOKEN";

/// Main trait for publishing finished videos
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Upload a finished video with its metadata, returning the
    /// platform-assigned video id
    async fn upload(&self, video_path: &Path, metadata: &VideoMetadata) -> Result<String>;
}

/// Publisher backed by the YouTube Data API v3 multipart upload.
///
/// Authentication is out-of-band: the OAuth bearer token comes from
/// the CLIPCAST_YT_TOKEN environment variable or from the token file
/// named in the configuration. Obtaining and refreshing the token is
/// not this binary's job.
pub struct YouTubeUploader {
    client: Client,
    config: UploadConfig,
}

impl YouTubeUploader {
    pub fn new(config: UploadConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()
            .map_err(ClipcastError::Http)?;

        Ok(Self { client, config })
    }

    fn bearer_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            return Ok(token.trim().to_string());
        }

        let token_path = self.config.token_path.as_ref().ok_or_else(|| {
            ClipcastError::Upload(format!(
                "No upload credentials: set {} or configure upload.token_path",
                TOKEN_ENV_VAR
            ))
        })?;

        let token = std::fs::read_to_string(token_path).map_err(|e| {
            ClipcastError::Upload(format!(
                "Failed to read token file {}: {}",
                token_path.display(),
                e
            ))
        })?;

        Ok(token.trim().to_string())
    }

    fn snippet_body(&self, metadata: &VideoMetadata) -> serde_json::Value {
        json!({
            "snippet": {
                "title": metadata.title,
                "description": metadata.description,
                "categoryId": self.config.category_id,
            },
            "status": {
                "privacyStatus": self.config.privacy_status,
            }
        })
    }
}

/// Assemble a `multipart/related` request body as the upload endpoint
/// expects it: the JSON metadata part first, then the media part, with
/// bare Content-Type part headers. reqwest's multipart support only
/// produces `multipart/form-data` with Content-Disposition headers,
/// which this endpoint rejects.
fn multipart_related_body(boundary: &str, metadata_json: &str, video_bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(video_bytes.len() + metadata_json.len() + 256);

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata_json.as_bytes());
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Type: video/mp4\r\n\r\n");
    body.extend_from_slice(video_bytes);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

#[async_trait]
impl Publisher for YouTubeUploader {
    async fn upload(&self, video_path: &Path, metadata: &VideoMetadata) -> Result<String> {
        info!("Uploading {} to YouTube", video_path.display());

        let token = self.bearer_token()?;
        let body = self.snippet_body(metadata);

        let video_bytes = tokio::fs::read(video_path).await.map_err(|e| {
            ClipcastError::Upload(format!(
                "Failed to read video file {}: {}",
                video_path.display(),
                e
            ))
        })?;

        let boundary = format!("clipcast-{}", Utc::now().timestamp_millis());
        let request_body = multipart_related_body(&boundary, &body.to_string(), &video_bytes);

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("uploadType", "multipart"), ("part", "snippet,status")])
            .bearer_auth(token)
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(request_body)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;
        debug!("Upload response ({}): {}", status, response_body);

        if !status.is_success() {
            return Err(ClipcastError::Upload(format!(
                "Upload failed with status {}: {}",
                status, response_body
            )));
        }

        let parsed: serde_json::Value = serde_json::from_str(&response_body)?;
        let video_id = parsed
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| {
                ClipcastError::Upload("Upload response did not contain a video id".to_string())
            })?
            .to_string();

        info!("Upload completed, video id: {}", video_id);
        Ok(video_id)
    }
}
