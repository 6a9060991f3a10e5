//! Fakes shared by the integration tests: no network, no yt-dlp
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use yt_mp3_downloader::downloader::{
    DownloadEvent, DownloadOrchestrator, Invocation, ProcessRunner, ProgressReporter, RetryPolicy,
};
use yt_mp3_downloader::extractor::{Extractor, Format, VideoInfo};
use yt_mp3_downloader::Settings;

pub fn video(title: &str, url: &str, heights: &[u32]) -> VideoInfo {
    VideoInfo {
        id: title.to_lowercase(),
        title: title.to_string(),
        webpage_url: Some(url.to_string()),
        formats: heights
            .iter()
            .map(|h| Format {
                format_id: format!("{}p", h),
                ext: "mp4".to_string(),
                height: Some(*h),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// Extractor returning canned metadata
pub struct FakeExtractor {
    pub videos: Vec<VideoInfo>,
    pub error: Option<String>,
}

impl FakeExtractor {
    pub fn new(videos: Vec<VideoInfo>) -> Self {
        Self {
            videos,
            error: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            videos: Vec::new(),
            error: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    fn id(&self) -> &'static str {
        "fake"
    }

    async fn extract_info(&self, _url: &str) -> Result<VideoInfo> {
        if let Some(e) = &self.error {
            return Err(anyhow!(e.clone()));
        }
        self.videos
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("no video"))
    }

    async fn extract_playlist(&self, _url: &str) -> Result<Vec<VideoInfo>> {
        if let Some(e) = &self.error {
            return Err(anyhow!(e.clone()));
        }
        Ok(self.videos.clone())
    }
}

/// How the fake yt-dlp behaves for one page URL
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    /// Attempts that fail before one succeeds; `u32::MAX` never succeeds
    pub failures: u32,
    /// Output printed on every attempt
    pub lines: Vec<String>,
}

/// Process runner that pretends to be yt-dlp
#[derive(Default)]
pub struct ScriptedRunner {
    behaviors: HashMap<String, Behavior>,
    delay: Duration,
    calls: Mutex<Vec<Invocation>>,
    attempts: Mutex<HashMap<String, u32>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(mut self, url: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(url.to_string(), behavior);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn attempts_for(&self, url: &str) -> u32 {
        self.attempts
            .lock()
            .expect("attempts lock")
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut (dyn FnMut(String) + Send),
    ) -> Result<bool> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(invocation.clone());

        let url = invocation
            .args
            .iter()
            .find(|a| a.starts_with("https://"))
            .cloned()
            .unwrap_or_default();
        let attempt = {
            let mut attempts = self.attempts.lock().expect("attempts lock");
            let n = attempts.entry(url.clone()).or_insert(0);
            *n += 1;
            *n
        };
        let behavior = self.behaviors.get(&url).cloned().unwrap_or_default();

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        for line in &behavior.lines {
            on_line(line.clone());
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(attempt > behavior.failures)
    }
}

/// Reporter that keeps every event
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<DownloadEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<DownloadEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, event: DownloadEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

/// Orchestrator over the fakes with instant retries
pub fn orchestrator(
    extractor: FakeExtractor,
    runner: Arc<ScriptedRunner>,
    settings: Settings,
) -> DownloadOrchestrator {
    DownloadOrchestrator::new(Arc::new(extractor), runner, "/usr/bin/yt-dlp", settings)
        .with_retry_policy(RetryPolicy {
            attempts: 3,
            delay: Duration::ZERO,
        })
}
