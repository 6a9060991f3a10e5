pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{Format, VideoInfo};
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
