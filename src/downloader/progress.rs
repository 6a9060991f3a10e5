//! Progress events emitted while a request is processed
//!
//! Front ends (terminal, GUI) implement [`ProgressReporter`] and receive every
//! event; the orchestrator never prints anything itself.

use crate::downloader::request::DownloadSummary;
use tokio::sync::mpsc;

/// Maximum characters of a subprocess line shown to the user
pub const MAX_LINE_WIDTH: usize = 80;

const FORBIDDEN_MARKER: &str = "HTTP Error 403";

/// Something that happened during a download run.
///
/// `index` is 1-based and identifies the video within the run.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    Preparing {
        url: String,
    },
    Probed {
        total: usize,
        is_playlist: bool,
    },
    VideoStarted {
        index: usize,
        total: usize,
        title: String,
        detail: String,
    },
    AttemptStarted {
        index: usize,
        title: String,
        attempt: u32,
        max_attempts: u32,
    },
    Output {
        index: usize,
        line: String,
    },
    RateLimited {
        index: usize,
    },
    AttemptFailed {
        index: usize,
        title: String,
        attempt: u32,
        max_attempts: u32,
        reason: String,
    },
    VideoCompleted {
        index: usize,
        title: String,
    },
    VideoFailed {
        index: usize,
        title: String,
        attempts: u32,
    },
    Finished(DownloadSummary),
}

impl DownloadEvent {
    /// One-line, human readable description
    pub fn status_text(&self) -> String {
        match self {
            DownloadEvent::Preparing { url } => format!("Preparing download for {}...", url),
            DownloadEvent::Probed { total, is_playlist } => format!(
                "Found {} video(s) in {}",
                total,
                if *is_playlist { "playlist" } else { "video" }
            ),
            DownloadEvent::VideoStarted {
                index,
                total,
                title,
                detail,
            } => format!("Processing video {}/{}: {} ({})", index, total, title, detail),
            DownloadEvent::AttemptStarted {
                title,
                attempt,
                max_attempts,
                ..
            } => format!("Downloading {} (Attempt {}/{})...", title, attempt, max_attempts),
            DownloadEvent::Output { line, .. } => line.clone(),
            DownloadEvent::RateLimited { .. } => {
                "HTTP Error 403: Possible rate-limiting or restricted content".to_string()
            }
            DownloadEvent::AttemptFailed {
                title,
                attempt,
                max_attempts,
                reason,
                ..
            } => format!(
                "Failed to download {} (Attempt {}/{}): {}",
                title, attempt, max_attempts, reason
            ),
            DownloadEvent::VideoCompleted { title, .. } => format!("Downloaded {}", title),
            DownloadEvent::VideoFailed {
                title, attempts, ..
            } => format!("Failed to download {} after {} attempts", title, attempts),
            DownloadEvent::Finished(summary) => format!(
                "Completed: {}/{} downloads successful!",
                summary.successful, summary.total
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            DownloadEvent::RateLimited { .. }
                | DownloadEvent::AttemptFailed { .. }
                | DownloadEvent::VideoFailed { .. }
        )
    }
}

/// Receives progress events from the orchestrator
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: DownloadEvent);
}

/// Forward events over a channel, e.g. to the GUI event loop
impl ProgressReporter for mpsc::UnboundedSender<DownloadEvent> {
    fn report(&self, event: DownloadEvent) {
        // The receiver is gone once the window closes; nothing left to update.
        let _ = self.send(event);
    }
}

/// Reporter that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _event: DownloadEvent) {}
}

/// Truncate a subprocess line for display
pub fn truncate_line(line: &str) -> String {
    line.trim().chars().take(MAX_LINE_WIDTH).collect()
}

/// What to do with one line of subprocess output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    Show(String),
    RateLimited,
    Suppress,
}

/// Filters subprocess output for one video.
///
/// 403 responses usually repeat on every fragment; only the first one is
/// surfaced.
#[derive(Debug, Default)]
pub struct OutputFilter {
    forbidden_count: usize,
}

impl OutputFilter {
    pub fn classify(&mut self, line: &str) -> LineAction {
        if line.contains(FORBIDDEN_MARKER) {
            self.forbidden_count += 1;
            return if self.forbidden_count == 1 {
                LineAction::RateLimited
            } else {
                LineAction::Suppress
            };
        }

        let text = truncate_line(line);
        if text.is_empty() {
            LineAction::Suppress
        } else {
            LineAction::Show(text)
        }
    }

    pub fn forbidden_count(&self) -> usize {
        self.forbidden_count
    }
}
