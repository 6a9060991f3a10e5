//! Download orchestration
//!
//! Turns one [`DownloadRequest`] into per-video yt-dlp runs: probe the URL, build
//! an invocation per video, run each with bounded retries and aggregate the
//! outcome. A failed video never stops the rest of the run.

use crate::downloader::command::{download_args, Invocation};
use crate::downloader::progress::{DownloadEvent, LineAction, OutputFilter, ProgressReporter};
use crate::downloader::quality::{resolve_actual_quality, VideoQuality};
use crate::downloader::request::{DownloadRequest, DownloadSummary, DownloadType};
use crate::downloader::runner::ProcessRunner;
use crate::extractor::{Extractor, VideoInfo};
use crate::utils::config::Settings;
use crate::utils::error::DownloaderError;
use anyhow::Result;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How often and how patiently a single video is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Runs download requests against an extractor and a process runner
#[derive(Clone)]
pub struct DownloadOrchestrator {
    extractor: Arc<dyn Extractor>,
    runner: Arc<dyn ProcessRunner>,
    ytdlp_path: PathBuf,
    settings: Settings,
    retry: RetryPolicy,
    cookies_from_browser: Option<String>,
}

impl DownloadOrchestrator {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        runner: Arc<dyn ProcessRunner>,
        ytdlp_path: impl Into<PathBuf>,
        settings: Settings,
    ) -> Self {
        Self {
            extractor,
            runner,
            ytdlp_path: ytdlp_path.into(),
            settings,
            retry: RetryPolicy::default(),
            cookies_from_browser: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cookies_from_browser(mut self, browser: Option<String>) -> Self {
        self.cookies_from_browser = browser;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process a request, returning how many of its videos were downloaded.
    ///
    /// Only request validation and probing fail the whole call; per-video
    /// failures are counted in the summary.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        reporter: &dyn ProgressReporter,
    ) -> Result<DownloadSummary> {
        let request = self.effective_request(request)?;

        reporter.report(DownloadEvent::Preparing {
            url: request.url.clone(),
        });
        info!(
            "Preparing {} download of {} into {}",
            request.download_type.as_str(),
            request.url,
            request.output_path.display()
        );

        let videos = self
            .extractor
            .probe(&request.url, request.is_playlist)
            .await?;
        let total = videos.len();
        reporter.report(DownloadEvent::Probed {
            total,
            is_playlist: request.is_playlist,
        });

        let parallel = usize::from(self.settings.max_parallel.max(1));
        debug!("Downloading {} video(s), {} at a time", total, parallel);

        let outcomes: Vec<(String, bool)> = stream::iter(videos.into_iter().enumerate())
            .map(|(i, video)| {
                let request = &request;
                async move {
                    let ok = self
                        .download_video(i + 1, total, &video, request, reporter)
                        .await;
                    (video.display_title().to_string(), ok)
                }
            })
            .buffered(parallel)
            .collect()
            .await;

        let summary = DownloadSummary {
            successful: outcomes.iter().filter(|(_, ok)| *ok).count(),
            total,
            failed: outcomes
                .into_iter()
                .filter(|(_, ok)| !*ok)
                .map(|(title, _)| title)
                .collect(),
        };

        info!("Completed: {}", summary);
        reporter.report(DownloadEvent::Finished(summary.clone()));
        Ok(summary)
    }

    /// Validate the request and fill in the configured default quality
    fn effective_request(&self, request: &DownloadRequest) -> Result<DownloadRequest> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(DownloaderError::InvalidUrl("URL must not be empty".to_string()).into());
        }

        let quality = match request.quality.trim() {
            "" => self
                .settings
                .default_quality_for(request.download_type)
                .to_string(),
            q => q.to_string(),
        };

        Ok(DownloadRequest {
            url: url.to_string(),
            quality,
            ..request.clone()
        })
    }

    async fn download_video(
        &self,
        index: usize,
        total: usize,
        video: &VideoInfo,
        request: &DownloadRequest,
        reporter: &dyn ProgressReporter,
    ) -> bool {
        let title = video.display_title().to_string();
        let detail = match request.download_type {
            DownloadType::Mp3 => "Audio".to_string(),
            DownloadType::Video => {
                let actual =
                    resolve_actual_quality(video.heights(), VideoQuality::parse(&request.quality));
                format!("Video at {}", actual)
            }
        };

        reporter.report(DownloadEvent::VideoStarted {
            index,
            total,
            title: title.clone(),
            detail,
        });

        let Some(page_url) = video.page_url() else {
            warn!("No URL for '{}', skipping", title);
            reporter.report(DownloadEvent::VideoFailed {
                index,
                title,
                attempts: 0,
            });
            return false;
        };

        let invocation = Invocation::new(
            self.ytdlp_path.clone(),
            download_args(request, page_url, self.cookies_from_browser.as_deref()),
        );

        self.run_with_retries(index, &title, &invocation, &request.output_path, reporter)
            .await
    }

    async fn run_with_retries(
        &self,
        index: usize,
        title: &str,
        invocation: &Invocation,
        output_dir: &Path,
        reporter: &dyn ProgressReporter,
    ) -> bool {
        let max_attempts = self.retry.attempts.max(1);
        let mut filter = OutputFilter::default();

        for attempt in 1..=max_attempts {
            reporter.report(DownloadEvent::AttemptStarted {
                index,
                title: title.to_string(),
                attempt,
                max_attempts,
            });

            let reason = match self
                .run_attempt(index, invocation, output_dir, &mut filter, reporter)
                .await
            {
                Ok(true) => {
                    info!("Downloaded {}", title);
                    reporter.report(DownloadEvent::VideoCompleted {
                        index,
                        title: title.to_string(),
                    });
                    return true;
                }
                Ok(false) => "yt-dlp exited with an error".to_string(),
                Err(e) => e.to_string(),
            };

            warn!(
                "Failed to download {} (Attempt {}/{}): {}",
                title, attempt, max_attempts, reason
            );
            reporter.report(DownloadEvent::AttemptFailed {
                index,
                title: title.to_string(),
                attempt,
                max_attempts,
                reason,
            });

            if attempt < max_attempts {
                tokio::time::sleep(self.retry.delay).await;
            }
        }

        reporter.report(DownloadEvent::VideoFailed {
            index,
            title: title.to_string(),
            attempts: max_attempts,
        });
        false
    }

    async fn run_attempt(
        &self,
        index: usize,
        invocation: &Invocation,
        output_dir: &Path,
        filter: &mut OutputFilter,
        reporter: &dyn ProgressReporter,
    ) -> Result<bool> {
        tokio::fs::create_dir_all(output_dir).await?;

        let mut on_line = |line: String| match filter.classify(&line) {
            LineAction::Show(line) => reporter.report(DownloadEvent::Output { index, line }),
            LineAction::RateLimited => reporter.report(DownloadEvent::RateLimited { index }),
            LineAction::Suppress => {}
        };

        self.runner.run(invocation, &mut on_line).await
    }
}
