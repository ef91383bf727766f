use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::config::Config;
use crate::download::{Downloader, YtDlpDownloader};
use crate::error::{ClipcastError, Result};
use crate::media::{create_processor, MediaProcessor};
use crate::metadata::{derive_metadata, VideoMetadata};
use crate::subtitle::{plain_text_from_srt, write_srt};
use crate::transcribe::{create_transcriber, Transcriber};
use crate::upload::{Publisher, YouTubeUploader};
use crate::workspace::{VideoId, Workspace};

/// Linear five-stage pipeline over a single work item.
///
/// Control flows strictly forward; the first stage error aborts the
/// whole run and propagates to the caller.
pub struct Pipeline {
    config: Config,
    downloader: Box<dyn Downloader>,
    media: Box<dyn MediaProcessor>,
    transcriber: Box<dyn Transcriber>,
    publisher: Box<dyn Publisher>,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        let downloader = Box::new(YtDlpDownloader::new(config.downloader.clone()));
        let media = create_processor(config.media.clone());
        let transcriber = create_transcriber(config.transcriber.clone());
        let publisher = Box::new(YouTubeUploader::new(config.upload.clone())?);

        Ok(Self {
            config,
            downloader,
            media,
            transcriber,
            publisher,
        })
    }

    /// Construct a pipeline from explicit collaborators. Used by tests
    /// to substitute doubles for the external tools.
    pub fn with_collaborators(
        config: Config,
        downloader: Box<dyn Downloader>,
        media: Box<dyn MediaProcessor>,
        transcriber: Box<dyn Transcriber>,
        publisher: Box<dyn Publisher>,
    ) -> Self {
        Self {
            config,
            downloader,
            media,
            transcriber,
            publisher,
        }
    }

    /// Run all five stages for one URL, returning the published video id.
    pub async fn run(&self, url: &str) -> Result<String> {
        // Fail fast when any external tool is missing, before the
        // long-running stages start.
        self.downloader.check_availability()?;
        self.media.check_availability()?;
        self.transcriber.check_availability()?;

        let video_id = VideoId::from_url(url);
        if video_id.is_generated() {
            info!("URL carries no video id, using generated identifier: {}", video_id);
        } else {
            info!("Processing video: {}", video_id);
        }

        let workspace = Workspace::new(&self.config.workspace.base_dir, video_id);
        workspace.ensure_dirs().await?;

        let source_path = workspace.source_path();
        let clip_path = workspace.clip_path();
        let subtitle_path = workspace.subtitle_path();
        let final_path = workspace.final_path();

        // Stage 1: acquisition
        self.downloader.download(url, &source_path).await?;

        // Stage 2: extraction
        self.media
            .cut_clip(&source_path, &clip_path, &self.config.clip)
            .await?;

        // Stage 3: transcription + subtitle serialization
        let transcription = self.transcriber.transcribe(&clip_path, None).await?;
        write_srt(&transcription.segments, &subtitle_path).await?;

        // Stage 4: composition
        self.media
            .burn_subtitles(&clip_path, &subtitle_path, &final_path)
            .await?;

        // Stage 5: metadata + publication
        let metadata = self.derive_upload_metadata(&subtitle_path).await?;
        info!("Title: {}", metadata.title);
        info!("Description:\n{}", metadata.description);

        let published_id = self.publisher.upload(&final_path, &metadata).await?;

        info!("Pipeline completed, published video id: {}", published_id);
        Ok(published_id)
    }

    /// Download a source video to an explicit destination.
    ///
    /// Stage helpers check only the tool they actually invoke, so the
    /// standalone subcommands work on machines missing the others.
    pub async fn download_source(&self, url: &str, dest_path: &Path) -> Result<()> {
        self.downloader.check_availability()?;
        self.downloader.download(url, dest_path).await
    }

    /// Cut a vertical clip out of an existing source file.
    pub async fn cut_clip(&self, source_path: &Path, clip_path: &Path) -> Result<()> {
        if !source_path.exists() {
            return Err(ClipcastError::FileNotFound(
                source_path.display().to_string(),
            ));
        }
        self.media.check_availability()?;
        self.media
            .cut_clip(source_path, clip_path, &self.config.clip)
            .await
    }

    /// Transcribe a media file and serialize the result as SRT.
    pub async fn transcribe_to_srt(&self, media_path: &Path, srt_path: &Path) -> Result<()> {
        self.transcriber.check_availability()?;
        let transcription = self.transcriber.transcribe(media_path, None).await?;
        write_srt(&transcription.segments, srt_path).await
    }

    /// Burn an SRT file into a video.
    pub async fn burn(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        self.media.check_availability()?;
        self.media
            .burn_subtitles(video_path, subtitle_path, output_path)
            .await
    }

    /// Upload a finished video with explicit metadata.
    pub async fn publish(&self, video_path: &Path, metadata: &VideoMetadata) -> Result<String> {
        self.publisher.upload(video_path, metadata).await
    }

    async fn derive_upload_metadata(&self, subtitle_path: &Path) -> Result<VideoMetadata> {
        let transcript = plain_text_from_srt(subtitle_path).await?;
        let seed = Utc::now().timestamp() as u64;
        Ok(derive_metadata(&transcript, &self.config.metadata, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClipConfig;
    use crate::transcribe::{TranscriptSegment, Transcription};
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::Sequence;
    use std::path::PathBuf;

    mock! {
        pub TestDownloader {}

        #[async_trait]
        impl Downloader for TestDownloader {
            async fn download(&self, url: &str, dest_path: &Path) -> Result<()>;
            fn check_availability(&self) -> Result<()>;
        }
    }

    mock! {
        pub TestMedia {}

        #[async_trait]
        impl MediaProcessor for TestMedia {
            async fn cut_clip(
                &self,
                source_path: &Path,
                clip_path: &Path,
                clip: &ClipConfig,
            ) -> Result<()>;
            async fn burn_subtitles(
                &self,
                video_path: &Path,
                subtitle_path: &Path,
                output_path: &Path,
            ) -> Result<()>;
            fn check_availability(&self) -> Result<()>;
        }
    }

    mock! {
        pub TestTranscriber {
            pub fn transcribe<'a>(
                &self,
                media_path: &Path,
                language: Option<&'a str>,
            ) -> Result<Transcription>;
            pub fn check_availability(&self) -> Result<()>;
        }
    }

    #[async_trait]
    impl Transcriber for MockTestTranscriber {
        async fn transcribe(
            &self,
            media_path: &Path,
            language: Option<&str>,
        ) -> Result<Transcription> {
            MockTestTranscriber::transcribe(self, media_path, language)
        }

        fn check_availability(&self) -> Result<()> {
            MockTestTranscriber::check_availability(self)
        }
    }

    mock! {
        pub TestPublisher {}

        #[async_trait]
        impl Publisher for TestPublisher {
            async fn upload(&self, video_path: &Path, metadata: &VideoMetadata) -> Result<String>;
        }
    }

    fn test_config(base_dir: PathBuf) -> Config {
        let mut config = Config::default();
        config.workspace.base_dir = base_dir;
        config
    }

    fn test_transcription() -> Transcription {
        Transcription {
            text: "hello world".to_string(),
            segments: vec![
                TranscriptSegment {
                    start: 0.0,
                    end: 1.0,
                    text: "hello".to_string(),
                },
                TranscriptSegment {
                    start: 1.0,
                    end: 2.5,
                    text: "world".to_string(),
                },
            ],
            language: Some("en".to_string()),
        }
    }

    #[tokio::test]
    async fn test_run_executes_stages_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_path_buf());
        let url = "https://www.youtube.com/watch?v=abc123&t=5";

        let source = tmp.path().join("downloads/abc123.mp4");
        let clip = tmp.path().join("clips/abc123_clip.mp4");
        let srt = tmp.path().join("subtitles/abc123.srt");
        let final_video = tmp.path().join("output/abc123_final.mp4");

        let mut seq = Sequence::new();

        let mut downloader = MockTestDownloader::new();
        downloader
            .expect_check_availability()
            .times(1)
            .returning(|| Ok(()));
        downloader
            .expect_download()
            .withf({
                let source = source.clone();
                move |u, dest| u == "https://www.youtube.com/watch?v=abc123&t=5" && dest == source
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut media = MockTestMedia::new();
        media
            .expect_check_availability()
            .times(1)
            .returning(|| Ok(()));
        media
            .expect_cut_clip()
            .withf({
                let clip = clip.clone();
                move |src, dst, spec| {
                    src.ends_with("downloads/abc123.mp4") && dst == clip && spec.start_secs == 60
                }
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let mut transcriber = MockTestTranscriber::new();
        transcriber
            .expect_check_availability()
            .times(1)
            .returning(|| Ok(()));
        transcriber
            .expect_transcribe()
            .withf({
                let clip = clip.clone();
                move |path, language| path == clip && language.is_none()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(test_transcription()));

        media
            .expect_burn_subtitles()
            .withf({
                let clip = clip.clone();
                let srt = srt.clone();
                let final_video = final_video.clone();
                move |video, subs, out| video == clip && subs == srt && out == final_video
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));

        let mut publisher = MockTestPublisher::new();
        publisher
            .expect_upload()
            .withf(move |path, metadata| {
                path == final_video && metadata.description.starts_with("hello world...")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("published123".to_string()));

        let pipeline = Pipeline::with_collaborators(
            config,
            Box::new(downloader),
            Box::new(media),
            Box::new(transcriber),
            Box::new(publisher),
        );

        let published = pipeline.run(url).await.unwrap();
        assert_eq!(published, "published123");

        // The subtitle file stays behind as a flat-file artifact.
        let srt_content = tokio::fs::read_to_string(&srt).await.unwrap();
        assert!(srt_content.starts_with("1\n00:00:00,000 --> 00:00:01,000\nhello\n"));
    }

    #[tokio::test]
    async fn test_download_failure_aborts_run() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_path_buf());

        let mut downloader = MockTestDownloader::new();
        downloader
            .expect_check_availability()
            .returning(|| Ok(()));
        downloader
            .expect_download()
            .times(1)
            .returning(|_, _| Err(ClipcastError::Downloader("network down".to_string())));

        let mut media = MockTestMedia::new();
        media.expect_check_availability().returning(|| Ok(()));
        media.expect_cut_clip().times(0);
        media.expect_burn_subtitles().times(0);

        let mut transcriber = MockTestTranscriber::new();
        transcriber.expect_check_availability().returning(|| Ok(()));
        transcriber.expect_transcribe().times(0);

        let mut publisher = MockTestPublisher::new();
        publisher.expect_upload().times(0);

        let pipeline = Pipeline::with_collaborators(
            config,
            Box::new(downloader),
            Box::new(media),
            Box::new(transcriber),
            Box::new(publisher),
        );

        let result = pipeline.run("https://www.youtube.com/watch?v=abc123").await;
        assert!(matches!(result, Err(ClipcastError::Downloader(_))));
    }

    #[tokio::test]
    async fn test_transcription_failure_skips_composition_and_upload() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_path_buf());

        let mut downloader = MockTestDownloader::new();
        downloader
            .expect_check_availability()
            .returning(|| Ok(()));
        downloader.expect_download().times(1).returning(|_, _| Ok(()));

        let mut media = MockTestMedia::new();
        media.expect_check_availability().returning(|| Ok(()));
        media.expect_cut_clip().times(1).returning(|_, _, _| Ok(()));
        media.expect_burn_subtitles().times(0);

        let mut transcriber = MockTestTranscriber::new();
        transcriber.expect_check_availability().returning(|| Ok(()));
        transcriber
            .expect_transcribe()
            .times(1)
            .returning(|_, _| Err(ClipcastError::Transcriber("model failed".to_string())));

        let mut publisher = MockTestPublisher::new();
        publisher.expect_upload().times(0);

        let pipeline = Pipeline::with_collaborators(
            config,
            Box::new(downloader),
            Box::new(media),
            Box::new(transcriber),
            Box::new(publisher),
        );

        let result = pipeline.run("https://www.youtube.com/watch?v=abc123").await;
        assert!(matches!(result, Err(ClipcastError::Transcriber(_))));
    }

    #[tokio::test]
    async fn test_missing_transcriber_aborts_before_any_stage() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_path_buf());

        let mut downloader = MockTestDownloader::new();
        downloader
            .expect_check_availability()
            .returning(|| Ok(()));
        downloader.expect_download().times(0);

        let mut media = MockTestMedia::new();
        media.expect_check_availability().returning(|| Ok(()));
        media.expect_cut_clip().times(0);
        media.expect_burn_subtitles().times(0);

        let mut transcriber = MockTestTranscriber::new();
        transcriber
            .expect_check_availability()
            .times(1)
            .returning(|| Err(ClipcastError::Transcriber("whisper not found".to_string())));
        transcriber.expect_transcribe().times(0);

        let mut publisher = MockTestPublisher::new();
        publisher.expect_upload().times(0);

        let pipeline = Pipeline::with_collaborators(
            config,
            Box::new(downloader),
            Box::new(media),
            Box::new(transcriber),
            Box::new(publisher),
        );

        let result = pipeline.run("https://www.youtube.com/watch?v=abc123").await;
        assert!(matches!(result, Err(ClipcastError::Transcriber(_))));
    }

    #[tokio::test]
    async fn test_stage_helpers_check_only_their_own_tool() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_path_buf());

        // Neither the downloader nor the transcriber gets any
        // expectations: touching them would fail the test.
        let downloader = MockTestDownloader::new();
        let transcriber = MockTestTranscriber::new();

        let mut media = MockTestMedia::new();
        media
            .expect_check_availability()
            .times(1)
            .returning(|| Ok(()));
        media
            .expect_burn_subtitles()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let publisher = MockTestPublisher::new();

        let pipeline = Pipeline::with_collaborators(
            config,
            Box::new(downloader),
            Box::new(media),
            Box::new(transcriber),
            Box::new(publisher),
        );

        pipeline
            .burn(
                &tmp.path().join("clip.mp4"),
                &tmp.path().join("subs.srt"),
                &tmp.path().join("out.mp4"),
            )
            .await
            .unwrap();
    }
}
