//! Application configuration
//!
//! Settings live in a flat INI-flavoured file with a single `[Settings]`
//! section. Reading is forgiving: anything missing or malformed falls back to
//! the default for that key.

use crate::downloader::DownloadType;
use crate::utils::error::DownloaderError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default settings file name, resolved against the working directory
pub const CONFIG_FILE_NAME: &str = "config.ini";

const SECTION: &str = "[Settings]";
const KEY_DEFAULT_QUALITY: &str = "default_quality";
const KEY_DEFAULT_VIDEO_QUALITY: &str = "default_video_quality";
const KEY_MAX_PARALLEL: &str = "max_parallel";

/// Allowed range for parallel downloads
pub const MAX_PARALLEL_RANGE: std::ops::RangeInclusive<u8> = 1..=10;
pub const DEFAULT_MAX_PARALLEL: u8 = 3;

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Audio quality used when a request leaves quality empty
    pub default_quality: String,

    /// Video quality used when a request leaves quality empty
    pub default_video_quality: String,

    /// Maximum downloads in flight at once
    pub max_parallel: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_quality: "best".to_string(),
            default_video_quality: "best".to_string(),
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

impl Settings {
    /// Load settings from `path`, silently using defaults for anything unusable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                debug!("Loaded settings from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Could not read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse `key=value` lines, ignoring section headers, comments and unknown keys
    pub fn parse(contents: &str) -> Self {
        let mut settings = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('[') || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.trim() {
                KEY_DEFAULT_QUALITY => settings.default_quality = value.to_string(),
                KEY_DEFAULT_VIDEO_QUALITY => settings.default_video_quality = value.to_string(),
                KEY_MAX_PARALLEL => {
                    if let Some(n) = parse_max_parallel(value) {
                        settings.max_parallel = n;
                    }
                }
                other => debug!("Ignoring unknown settings key: {}", other),
            }
        }

        settings
    }

    /// Render the settings file contents
    pub fn to_ini_string(&self) -> String {
        format!(
            "{SECTION}\n{KEY_DEFAULT_QUALITY}={}\n{KEY_DEFAULT_VIDEO_QUALITY}={}\n{KEY_MAX_PARALLEL}={}\n",
            self.default_quality, self.default_video_quality, self.max_parallel
        )
    }

    /// Overwrite the settings file at `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ini_string()).map_err(|e| {
            DownloaderError::ConfigError(format!("failed to write {}: {}", path.display(), e))
        })?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Default quality for the given download type
    pub fn default_quality_for(&self, download_type: DownloadType) -> &str {
        match download_type {
            DownloadType::Mp3 => &self.default_quality,
            DownloadType::Video => &self.default_video_quality,
        }
    }
}

/// Parse a `max_parallel` value, accepting only integers in range
pub fn parse_max_parallel(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|n| MAX_PARALLEL_RANGE.contains(n))
}

/// Resolve the settings file location, defaulting to `config.ini` in the working directory
pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_quality, "best");
        assert_eq!(settings.default_video_quality, "best");
        assert_eq!(settings.max_parallel, 3);
    }

    #[test]
    fn test_only_max_parallel_present() {
        let settings = Settings::parse("max_parallel=7");
        assert_eq!(settings.default_quality, "best");
        assert_eq!(settings.default_video_quality, "best");
        assert_eq!(settings.max_parallel, 7);
    }

    #[test]
    fn test_full_file() {
        let settings = Settings::parse(
            "[Settings]\ndefault_quality=192k\ndefault_video_quality=720p\nmax_parallel=2",
        );
        assert_eq!(settings.default_quality, "192k");
        assert_eq!(settings.default_video_quality, "720p");
        assert_eq!(settings.max_parallel, 2);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let settings = Settings::parse(
            "[Settings]\ngarbage line\nmax_parallel=lots\ndefault_quality=\n; comment",
        );
        assert_eq!(settings, Settings::default());

        assert_eq!(Settings::parse("max_parallel=0").max_parallel, 3);
        assert_eq!(Settings::parse("max_parallel=11").max_parallel, 3);
        assert_eq!(Settings::parse("max_parallel=-2").max_parallel, 3);
    }

    #[test]
    fn test_video_key_does_not_clobber_audio_key() {
        let settings = Settings::parse("default_video_quality=1080p");
        assert_eq!(settings.default_quality, "best");
        assert_eq!(settings.default_video_quality, "1080p");
    }

    #[test]
    fn test_whitespace_around_keys_and_values() {
        let settings = Settings::parse("  default_quality = 128k  \r\n max_parallel= 5\r\n");
        assert_eq!(settings.default_quality, "128k");
        assert_eq!(settings.max_parallel, 5);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.ini");
        let settings = Settings {
            default_quality: "64k".to_string(),
            default_video_quality: "480p".to_string(),
            max_parallel: 10,
        };

        settings.save(&path).expect("save settings");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.starts_with("[Settings]\n"));
        assert!(written.contains("max_parallel=10"));

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().expect("temp dir");
        let settings = Settings::load(&dir.path().join("absent.ini"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_default_quality_for_type() {
        let settings = Settings {
            default_quality: "128k".to_string(),
            default_video_quality: "720p".to_string(),
            max_parallel: 1,
        };
        assert_eq!(settings.default_quality_for(DownloadType::Mp3), "128k");
        assert_eq!(settings.default_quality_for(DownloadType::Video), "720p");
    }

    #[test]
    fn test_parse_max_parallel() {
        assert_eq!(parse_max_parallel("1"), Some(1));
        assert_eq!(parse_max_parallel(" 10 "), Some(10));
        assert_eq!(parse_max_parallel("0"), None);
        assert_eq!(parse_max_parallel("abc"), None);
    }

    #[test]
    fn test_settings_path() {
        assert_eq!(settings_path(None), PathBuf::from("config.ini"));
        assert_eq!(
            settings_path(Some(Path::new("/tmp/custom.ini"))),
            PathBuf::from("/tmp/custom.ini")
        );
    }
}
