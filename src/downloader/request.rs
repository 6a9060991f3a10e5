//! Download requests and their outcome

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

/// What to produce from a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DownloadType {
    /// Extract audio and convert to MP3
    #[default]
    Mp3,
    /// Best video + audio merged into MP4
    Video,
}

impl DownloadType {
    pub const ALL: [DownloadType; 2] = [DownloadType::Mp3, DownloadType::Video];

    /// Lowercase token used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadType::Mp3 => "mp3",
            DownloadType::Video => "video",
        }
    }
}

impl fmt::Display for DownloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadType::Mp3 => f.write_str("MP3"),
            DownloadType::Video => f.write_str("Video"),
        }
    }
}

/// A single user request: one URL, possibly expanding to many videos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub is_playlist: bool,
    pub output_path: PathBuf,
    pub download_type: DownloadType,
    /// Raw quality label; empty means "use the configured default"
    pub quality: String,
}

/// Aggregate result of a download run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub successful: usize,
    pub total: usize,
    /// Titles of the videos that exhausted their attempts
    pub failed: Vec<String>,
}

impl DownloadSummary {
    pub fn all_succeeded(&self) -> bool {
        self.successful == self.total
    }
}

impl fmt::Display for DownloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} successful", self.successful, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_type_tokens() {
        assert_eq!(DownloadType::Mp3.as_str(), "mp3");
        assert_eq!(DownloadType::Video.as_str(), "video");
        assert_eq!(DownloadType::Video.to_string(), "Video");
        assert_eq!(
            DownloadType::from_str("video", true).ok(),
            Some(DownloadType::Video)
        );
    }

    #[test]
    fn test_summary_display() {
        let summary = DownloadSummary {
            successful: 2,
            total: 3,
            failed: vec!["Second".to_string()],
        };
        assert_eq!(summary.to_string(), "2/3 successful");
        assert!(!summary.all_succeeded());
    }
}
