//! Download pipeline: quality resolution, yt-dlp invocations and retries

pub mod command;
pub mod orchestrator;
pub mod progress;
pub mod quality;
pub mod request;
pub mod runner;

pub use command::Invocation;
pub use orchestrator::{DownloadOrchestrator, RetryPolicy};
pub use progress::{DownloadEvent, ProgressReporter, SilentReporter};
pub use quality::{AudioQuality, VideoQuality, VideoTier};
pub use request::{DownloadRequest, DownloadSummary, DownloadType};
pub use runner::{ProcessRunner, YtDlpRunner};
