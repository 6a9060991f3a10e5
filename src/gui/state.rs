//! Window state kept outside of iced so it can be exercised directly

use crate::downloader::quality::{AUDIO_QUALITY_OPTIONS, VIDEO_QUALITY_OPTIONS};
use crate::downloader::{DownloadEvent, DownloadRequest, DownloadType};
use crate::utils::config::Settings;
use crate::utils::paths::{default_dir_name, normalize_output_path};
use std::collections::HashMap;

/// Entries kept in the activity log before the oldest are dropped
pub const MAX_LOG_ENTRIES: usize = 500;

/// Quality labels offered for a download type
pub fn quality_options(download_type: DownloadType) -> Vec<String> {
    let options: &[&str] = match download_type {
        DownloadType::Mp3 => &AUDIO_QUALITY_OPTIONS,
        DownloadType::Video => &VIDEO_QUALITY_OPTIONS,
    };
    options.iter().map(|s| s.to_string()).collect()
}

/// The download form on the main view
#[derive(Debug, Clone)]
pub struct DownloadForm {
    pub url: String,
    pub download_type: DownloadType,
    pub output_path: String,
    pub quality: String,
    pub is_playlist: bool,
    pub url_error: Option<String>,
    /// Last quality picked for each type, restored when switching back
    last_quality: HashMap<DownloadType, String>,
}

impl DownloadForm {
    pub fn new(settings: &Settings) -> Self {
        let last_quality = DownloadType::ALL
            .iter()
            .map(|t| (*t, settings.default_quality_for(*t).to_string()))
            .collect();
        let download_type = DownloadType::default();

        Self {
            url: String::new(),
            download_type,
            output_path: default_dir_name(download_type).to_string(),
            quality: settings.default_quality_for(download_type).to_string(),
            is_playlist: false,
            url_error: None,
            last_quality,
        }
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
        self.url_error = None;
    }

    pub fn set_quality(&mut self, quality: String) {
        self.last_quality.insert(self.download_type, quality.clone());
        self.quality = quality;
    }

    /// Switch type, restoring the quality last used for it.
    ///
    /// The output directory follows along while it still holds the other
    /// type's default name.
    pub fn set_download_type(&mut self, download_type: DownloadType) {
        if download_type == self.download_type {
            return;
        }

        let previous_default = default_dir_name(self.download_type);
        if self.output_path.trim().is_empty() || self.output_path == previous_default {
            self.output_path = default_dir_name(download_type).to_string();
        }

        self.download_type = download_type;
        self.quality = self
            .last_quality
            .get(&download_type)
            .cloned()
            .unwrap_or_else(|| "best".to_string());
    }

    pub fn quality_options(&self) -> Vec<String> {
        quality_options(self.download_type)
    }

    /// Apply new defaults from the settings view without losing explicit picks
    pub fn apply_settings(&mut self, old: &Settings, new: &Settings) {
        for download_type in DownloadType::ALL {
            let old_default = old.default_quality_for(download_type);
            let remembered = self.last_quality.get(&download_type).map(String::as_str);
            if remembered.is_none() || remembered == Some(old_default) {
                self.last_quality
                    .insert(download_type, new.default_quality_for(download_type).to_string());
            }
        }
        if let Some(quality) = self.last_quality.get(&self.download_type) {
            self.quality = quality.clone();
        }
    }

    /// Build a request, or record why the form cannot be submitted
    pub fn to_request(&mut self) -> Option<DownloadRequest> {
        let url = self.url.trim();
        if url.is_empty() {
            self.url_error = Some("Please enter a YouTube URL".to_string());
            return None;
        }
        self.url_error = None;

        Some(DownloadRequest {
            url: url.to_string(),
            is_playlist: self.is_playlist,
            output_path: normalize_output_path(&self.output_path, self.download_type),
            download_type: self.download_type,
            quality: self.quality.clone(),
        })
    }
}

/// One line of the activity log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub is_error: bool,
}

/// Progress of the current run as shown in the window
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub running: bool,
    pub status: String,
    pub total: usize,
    pub finished: usize,
    pub log: Vec<LogEntry>,
}

impl RunState {
    pub fn start(&mut self, url: &str) {
        self.running = true;
        self.total = 0;
        self.finished = 0;
        self.log.clear();
        self.status = format!("Preparing download for {}...", url);
    }

    /// Fold one progress event into the visible state
    pub fn apply(&mut self, event: &DownloadEvent) {
        match event {
            DownloadEvent::Probed { total, .. } => self.total = *total,
            DownloadEvent::VideoCompleted { .. } | DownloadEvent::VideoFailed { .. } => {
                self.finished += 1
            }
            _ => {}
        }

        let text = event.status_text();
        match event {
            // Raw subprocess output only updates the status line
            DownloadEvent::Output { .. } => {}
            _ => self.push_log(text.clone(), event.is_error()),
        }
        self.status = text;
    }

    pub fn finish(&mut self, status: String, is_error: bool) {
        self.running = false;
        if is_error {
            self.push_log(status.clone(), true);
        }
        self.status = status;
    }

    /// Completed fraction of the run, 0.0 until the probe reports a total
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.finished as f32 / self.total as f32
        }
    }

    fn push_log(&mut self, text: String, is_error: bool) {
        self.log.push(LogEntry { text, is_error });
        if self.log.len() > MAX_LOG_ENTRIES {
            let excess = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(..excess);
        }
    }
}
