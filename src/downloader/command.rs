//! yt-dlp invocation building

use crate::downloader::quality::{AudioQuality, VideoQuality, AUDIO_FORMAT_SELECTOR};
use crate::downloader::request::{DownloadRequest, DownloadType};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Output file template, relative to the output directory
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// A fully-built external command for one video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Tokio command with piped output, killed if the handle is dropped
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Build the argument list downloading `page_url` for `request`
pub fn download_args(
    request: &DownloadRequest,
    page_url: &str,
    cookies_from_browser: Option<&str>,
) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    let format = match request.download_type {
        DownloadType::Mp3 => {
            let quality = AudioQuality::parse(&request.quality);
            args.extend([
                "-x".to_string(),
                "--audio-format".to_string(),
                "mp3".to_string(),
                "--audio-quality".to_string(),
                quality.ytdlp_value(),
            ]);
            AUDIO_FORMAT_SELECTOR.to_string()
        }
        DownloadType::Video => VideoQuality::parse(&request.quality).format_selector(),
    };

    args.extend([
        "--format".to_string(),
        format,
        "--output".to_string(),
        output_template(&request.output_path),
        "--quiet".to_string(),
        "--no-warnings".to_string(),
        // --quiet hides progress unless it is asked for explicitly
        "--progress".to_string(),
        "--newline".to_string(),
    ]);

    if let Some(browser) = cookies_from_browser {
        args.push("--cookies-from-browser".to_string());
        args.push(browser.to_string());
    }

    args.push(page_url.to_string());

    if request.download_type == DownloadType::Video {
        args.push("--merge-output-format".to_string());
        args.push("mp4".to_string());
    }

    args.push(if request.is_playlist {
        "--yes-playlist".to_string()
    } else {
        "--no-playlist".to_string()
    });

    args
}

fn output_template(output_dir: &Path) -> String {
    output_dir.join(OUTPUT_TEMPLATE).to_string_lossy().into_owned()
}
