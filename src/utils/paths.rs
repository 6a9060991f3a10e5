//! Output path resolution
//!
//! User-supplied directories may be relative or start with `~`; downloads always
//! receive an absolute path so yt-dlp's output template never depends on where
//! the subprocess happens to run.

use crate::downloader::DownloadType;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default output directory name for a download type
pub fn default_dir_name(download_type: DownloadType) -> &'static str {
    match download_type {
        DownloadType::Mp3 => "downloads",
        DownloadType::Video => "videos",
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` and `~/...` are expanded; `~user` forms are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
            .or_else(|| path.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Validate and normalize an output directory.
///
/// Empty input yields `<cwd>/downloads` for MP3 and `<cwd>/videos` for video.
pub fn normalize_output_path(input: &str, download_type: DownloadType) -> PathBuf {
    let trimmed = input.trim();
    let candidate = if trimmed.is_empty() {
        PathBuf::from(default_dir_name(download_type))
    } else {
        expand_home(trimmed)
    };

    absolutize(&candidate)
}

fn absolutize(path: &Path) -> PathBuf {
    match path.absolutize() {
        Ok(abs) => abs.into_owned(),
        Err(e) => {
            warn!("Could not absolutize {}: {}", path.display(), e);
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    }
}
