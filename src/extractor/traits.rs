use crate::extractor::models::VideoInfo;
use anyhow::Result;
use async_trait::async_trait;

/// Metadata probe for a URL
///
/// Resolves titles, page URLs and available formats without fetching media.
/// The download pipeline only talks to this trait so probing can be swapped out
/// in tests.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Extracts information for a single video
    async fn extract_info(&self, url: &str) -> Result<VideoInfo>;

    /// Extracts every entry of a playlist
    async fn extract_playlist(&self, url: &str) -> Result<Vec<VideoInfo>>;

    /// Probes a URL in single-video or playlist mode
    async fn probe(&self, url: &str, is_playlist: bool) -> Result<Vec<VideoInfo>> {
        if is_playlist {
            self.extract_playlist(url).await
        } else {
            Ok(vec![self.extract_info(url).await?])
        }
    }
}
