//! Subprocess execution

use crate::downloader::command::Invocation;
use crate::utils::error::DownloaderError;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Runs one external download and streams its output
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` to completion, calling `on_line` for every output line.
    ///
    /// Returns whether the process exited successfully. Errors are reserved for
    /// failures to start or read from the process.
    async fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut (dyn FnMut(String) + Send),
    ) -> Result<bool>;
}

/// Runs invocations as real child processes, merging stdout and stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct YtDlpRunner;

#[async_trait]
impl ProcessRunner for YtDlpRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut (dyn FnMut(String) + Send),
    ) -> Result<bool> {
        debug!("Running: {}", invocation);

        let mut child = invocation.command().spawn().map_err(|e| {
            DownloaderError::DownloadError(format!(
                "failed to start {}: {}",
                invocation.program.display(),
                e
            ))
        })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(
                DownloaderError::DownloadError("failed to capture yt-dlp output".to_string()).into(),
            );
        };

        // Split on raw bytes so a stray non-UTF-8 title cannot abort the read
        let mut out_lines = BufReader::new(stdout).split(b'\n');
        let mut err_lines = BufReader::new(stderr).split(b'\n');
        let mut out_done = false;
        let mut err_done = false;

        while !(out_done && err_done) {
            tokio::select! {
                segment = out_lines.next_segment(), if !out_done => match segment? {
                    Some(bytes) => on_line(String::from_utf8_lossy(&bytes).into_owned()),
                    None => out_done = true,
                },
                segment = err_lines.next_segment(), if !err_done => match segment? {
                    Some(bytes) => on_line(String::from_utf8_lossy(&bytes).into_owned()),
                    None => err_done = true,
                },
            }
        }

        let status = child.wait().await?;
        debug!("{} exited with {}", invocation.program.display(), status);
        Ok(status.success())
    }
}
