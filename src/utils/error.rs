//! Error handling for the downloader

use thiserror::Error;

/// Main error type for the downloader
#[derive(Debug, Error)]
pub enum DownloaderError {
    #[error("{0} is required but was not found")]
    DependencyMissing(String),

    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Failed to extract video info: {0}")]
    ExtractionError(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(String),
}
