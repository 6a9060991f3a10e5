//! YT to MP3 downloader library

pub mod cli;
pub mod downloader;
pub mod extractor;
pub mod gui;
pub mod utils;

// Re-export main types for easier use
pub use downloader::{
    DownloadEvent, DownloadOrchestrator, DownloadRequest, DownloadSummary, DownloadType,
    ProgressReporter, RetryPolicy,
};
pub use extractor::{Extractor, Format, VideoInfo, YtDlpExtractor};
pub use gui::{DownloaderApp, Message, View};
pub use utils::{DownloaderError, Settings};
