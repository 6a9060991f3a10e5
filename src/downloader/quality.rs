//! Quality tiers and format selection
//!
//! Labels arrive as free text from flags, prompts and the settings file. Anything
//! unrecognised resolves to `best`; parsing never fails.

use std::fmt;
use tracing::warn;

/// Audio options offered by the menu and the GUI
pub const AUDIO_QUALITY_OPTIONS: [&str; 4] = ["best", "192k", "128k", "64k"];

/// Video options offered by the menu and the GUI
pub const VIDEO_QUALITY_OPTIONS: [&str; 8] =
    ["best", "4K", "2K", "1080p", "720p", "480p", "360p", "144p"];

/// Format selector for audio extraction
pub const AUDIO_FORMAT_SELECTOR: &str = "bestaudio/best";

const BEST_VIDEO_SELECTOR: &str = "bestvideo+bestaudio/best";

/// Named video resolution buckets, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoTier {
    Uhd4K,
    Qhd2K,
    P1080,
    P720,
    P480,
    P360,
    P144,
}

impl VideoTier {
    /// Every tier, highest first
    pub const ALL: [VideoTier; 7] = [
        VideoTier::Uhd4K,
        VideoTier::Qhd2K,
        VideoTier::P1080,
        VideoTier::P720,
        VideoTier::P480,
        VideoTier::P360,
        VideoTier::P144,
    ];

    pub fn height(&self) -> u32 {
        match self {
            VideoTier::Uhd4K => 2160,
            VideoTier::Qhd2K => 1440,
            VideoTier::P1080 => 1080,
            VideoTier::P720 => 720,
            VideoTier::P480 => 480,
            VideoTier::P360 => 360,
            VideoTier::P144 => 144,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VideoTier::Uhd4K => "4K",
            VideoTier::Qhd2K => "2K",
            VideoTier::P1080 => "1080p",
            VideoTier::P720 => "720p",
            VideoTier::P480 => "480p",
            VideoTier::P360 => "360p",
            VideoTier::P144 => "144p",
        }
    }

    /// Case-insensitive lookup by label or by `<height>p`
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|tier| {
            tier.label().eq_ignore_ascii_case(label)
                || format!("{}p", tier.height()).eq_ignore_ascii_case(label)
        })
    }

    /// Lowest tier, used when nothing else qualifies
    pub fn lowest() -> Self {
        VideoTier::P144
    }
}

/// Requested video quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoQuality {
    #[default]
    Best,
    Tier(VideoTier),
}

impl VideoQuality {
    /// Parse a label, falling back to `best`
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("best") {
            return VideoQuality::Best;
        }
        match VideoTier::from_label(trimmed) {
            Some(tier) => VideoQuality::Tier(tier),
            None => {
                warn!("Unknown video quality '{}', using best", trimmed);
                VideoQuality::Best
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VideoQuality::Best => "best",
            VideoQuality::Tier(tier) => tier.label(),
        }
    }

    /// yt-dlp `--format` selector capping the video height
    pub fn format_selector(&self) -> String {
        match self {
            VideoQuality::Best => BEST_VIDEO_SELECTOR.to_string(),
            VideoQuality::Tier(tier) => {
                format!("bestvideo[height<=?{}]+bestaudio/best", tier.height())
            }
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Requested MP3 bitrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioQuality {
    #[default]
    Best,
    Kbps(u16),
}

impl AudioQuality {
    const MIN_KBPS: u16 = 8;
    const MAX_KBPS: u16 = 320;

    /// Parse `best` or `<N>k`, falling back to `best`
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("best") {
            return AudioQuality::Best;
        }

        let kbps = trimmed
            .strip_suffix(['k', 'K'])
            .and_then(|n| n.parse::<u16>().ok())
            .filter(|n| (Self::MIN_KBPS..=Self::MAX_KBPS).contains(n));

        match kbps {
            Some(n) => AudioQuality::Kbps(n),
            None => {
                warn!("Unknown audio quality '{}', using best", trimmed);
                AudioQuality::Best
            }
        }
    }

    /// Value for yt-dlp `--audio-quality` (`0` is best VBR)
    pub fn ytdlp_value(&self) -> String {
        match self {
            AudioQuality::Best => "0".to_string(),
            AudioQuality::Kbps(n) => format!("{}K", n),
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioQuality::Best => f.write_str("best"),
            AudioQuality::Kbps(n) => write!(f, "{}k", n),
        }
    }
}

/// Resolve the tier a video will actually be delivered at.
///
/// Picks the tallest available format not exceeding the requested cap and
/// reports the highest tier that height reaches. When no format fits under the
/// cap, the lowest tier is reported.
pub fn resolve_actual_quality(
    heights: impl IntoIterator<Item = u32>,
    requested: VideoQuality,
) -> VideoQuality {
    let VideoQuality::Tier(cap) = requested else {
        return VideoQuality::Best;
    };

    let max_height = heights
        .into_iter()
        .filter(|h| *h > 0 && *h <= cap.height())
        .max()
        .unwrap_or(0);

    let tier = VideoTier::ALL
        .into_iter()
        .find(|tier| max_height >= tier.height())
        .unwrap_or_else(VideoTier::lowest);

    VideoQuality::Tier(tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHTS: [u32; 4] = [144, 360, 720, 1080];

    #[test]
    fn test_resolves_nearest_lower_tier() {
        let resolved = resolve_actual_quality(HEIGHTS, VideoQuality::parse("480p"));
        assert_eq!(resolved.label(), "360p");
    }

    #[test]
    fn test_exact_tier_available() {
        let resolved = resolve_actual_quality(HEIGHTS, VideoQuality::parse("720p"));
        assert_eq!(resolved, VideoQuality::Tier(VideoTier::P720));
    }

    #[test]
    fn test_cap_above_everything_gives_highest_available() {
        let resolved = resolve_actual_quality(HEIGHTS, VideoQuality::parse("4K"));
        assert_eq!(resolved.label(), "1080p");
    }

    #[test]
    fn test_nothing_under_cap_falls_back_to_lowest() {
        let resolved = resolve_actual_quality([720, 1080], VideoQuality::parse("360p"));
        assert_eq!(resolved.label(), "144p");

        let resolved = resolve_actual_quality(Vec::new(), VideoQuality::parse("1080p"));
        assert_eq!(resolved.label(), "144p");
    }

    #[test]
    fn test_odd_heights_map_down() {
        // 1088 is reported by some encoders for 1080p content
        let resolved = resolve_actual_quality([1088, 540], VideoQuality::parse("2K"));
        assert_eq!(resolved.label(), "1080p");
    }

    #[test]
    fn test_best_is_passed_through() {
        assert_eq!(
            resolve_actual_quality(HEIGHTS, VideoQuality::Best),
            VideoQuality::Best
        );
    }

    #[test]
    fn test_unknown_labels_fall_back_to_best() {
        for label in ["", "ultra", "999p", "8K", "hd"] {
            assert_eq!(VideoQuality::parse(label), VideoQuality::Best, "{label}");
        }
        for label in ["", "loud", "0k", "1000k", "192"] {
            assert_eq!(AudioQuality::parse(label), AudioQuality::Best, "{label}");
        }
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        assert_eq!(VideoQuality::parse("4k"), VideoQuality::Tier(VideoTier::Uhd4K));
        assert_eq!(VideoQuality::parse("1440P"), VideoQuality::Tier(VideoTier::Qhd2K));
        assert_eq!(AudioQuality::parse("192K"), AudioQuality::Kbps(192));
        assert_eq!(AudioQuality::parse(" BEST "), AudioQuality::Best);
    }

    #[test]
    fn test_format_selectors() {
        assert_eq!(
            VideoQuality::parse("720p").format_selector(),
            "bestvideo[height<=?720]+bestaudio/best"
        );
        assert_eq!(VideoQuality::Best.format_selector(), "bestvideo+bestaudio/best");
    }

    #[test]
    fn test_audio_ytdlp_values() {
        assert_eq!(AudioQuality::Best.ytdlp_value(), "0");
        assert_eq!(AudioQuality::parse("128k").ytdlp_value(), "128K");
    }

    #[test]
    fn test_offered_options_parse() {
        for label in VIDEO_QUALITY_OPTIONS {
            assert_eq!(VideoQuality::parse(label).label(), label);
        }
        for label in AUDIO_QUALITY_OPTIONS {
            assert_eq!(AudioQuality::parse(label).to_string(), label);
        }
    }
}
