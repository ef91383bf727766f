use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::MetadataConfig;

/// Title and description derived from the transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
}

/// Derive upload metadata from a flat transcript sample.
///
/// The hook phrase is picked by `seed` modulo the hook list length so
/// repeated uploads rotate through the list; the pipeline passes
/// wall-clock seconds as the seed. The transcript sample and the title
/// are truncated by character count, not bytes.
pub fn derive_metadata(transcript: &str, config: &MetadataConfig, seed: u64) -> VideoMetadata {
    let hook = if config.hooks.is_empty() {
        ""
    } else {
        config.hooks[(seed as usize) % config.hooks.len()].as_str()
    };
    let title: String = hook.chars().take(config.title_max_chars).collect();

    let sample: String = transcript
        .chars()
        .take(config.description_sample_chars)
        .collect();
    let description = format!(
        "{}...\n{}\n{}",
        sample, config.call_to_action, config.hashtags
    );

    info!("Derived metadata with title: {}", title);

    VideoMetadata { title, description }
}
