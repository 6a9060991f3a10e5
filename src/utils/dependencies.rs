//! External tool checks
//!
//! Downloads need `yt-dlp` on the machine and `ffmpeg` for audio extraction and
//! merging. Missing tools are reported through a [`DependencyPrompt`], which may
//! accept an install step; refusing is fatal.

use crate::extractor::ytdlp::find_ytdlp;
use crate::utils::error::DownloaderError;
use anyhow::Result;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info, warn};

/// Tools the downloader shells out to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    YtDlp,
    Ffmpeg,
}

impl ExternalTool {
    pub const ALL: [ExternalTool; 2] = [ExternalTool::YtDlp, ExternalTool::Ffmpeg];

    pub fn binary_name(&self) -> &'static str {
        match self {
            ExternalTool::YtDlp => "yt-dlp",
            ExternalTool::Ffmpeg => "ffmpeg",
        }
    }

    /// Find the tool on this machine
    pub fn locate(&self) -> Option<PathBuf> {
        match self {
            ExternalTool::YtDlp => find_ytdlp(),
            ExternalTool::Ffmpeg => which::which("ffmpeg").ok(),
        }
    }

    /// Platform command that installs the tool, if one is known
    pub fn install_command(&self) -> Option<InstallCommand> {
        match self {
            ExternalTool::YtDlp => {
                let python = which::which("python3")
                    .or_else(|_| which::which("python"))
                    .ok()?;
                Some(InstallCommand::new(
                    python.to_string_lossy(),
                    ["-m", "pip", "install", "yt-dlp"],
                ))
            }
            ExternalTool::Ffmpeg => ffmpeg_install_command(),
        }
    }
}

impl fmt::Display for ExternalTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

#[cfg(target_os = "linux")]
fn ffmpeg_install_command() -> Option<InstallCommand> {
    Some(InstallCommand::new("sudo", ["apt", "install", "ffmpeg", "-y"]))
}

#[cfg(target_os = "macos")]
fn ffmpeg_install_command() -> Option<InstallCommand> {
    Some(InstallCommand::new("brew", ["install", "ffmpeg"]))
}

#[cfg(target_os = "windows")]
fn ffmpeg_install_command() -> Option<InstallCommand> {
    Some(InstallCommand::new(
        "winget",
        ["install", "--id", "Gyan.FFmpeg", "-e"],
    ))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn ffmpeg_install_command() -> Option<InstallCommand> {
    None
}

/// A program plus arguments, run without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run to completion, returning stderr on failure
    pub fn run(&self) -> Result<(), String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| format!("failed to start {}: {}", self.program, e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
        }
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// User-facing side of the dependency check
pub trait DependencyPrompt {
    /// A tool is missing; return `true` to run `install`
    fn confirm_install(&mut self, tool: ExternalTool, install: Option<&InstallCommand>) -> bool;

    fn installing(&mut self, _tool: ExternalTool) {}

    fn installed(&mut self, _tool: ExternalTool) {}

    fn install_failed(&mut self, _tool: ExternalTool, _error: &str) {}
}

/// Make sure every external tool is present, offering to install missing ones
pub fn check_dependencies(prompt: &mut dyn DependencyPrompt) -> Result<()> {
    check_tools(&ExternalTool::ALL, ExternalTool::locate, prompt)
}

fn check_tools(
    tools: &[ExternalTool],
    locate: impl Fn(&ExternalTool) -> Option<PathBuf>,
    prompt: &mut dyn DependencyPrompt,
) -> Result<()> {
    for tool in tools {
        if let Some(path) = locate(tool) {
            debug!("✓ {} found at {}", tool, path.display());
            continue;
        }

        warn!("{} not found", tool);
        let install = tool.install_command();
        if !prompt.confirm_install(*tool, install.as_ref()) {
            return Err(DownloaderError::DependencyMissing(tool.to_string()).into());
        }

        let Some(install) = install else {
            return Err(DownloaderError::DependencyMissing(tool.to_string()).into());
        };

        prompt.installing(*tool);
        info!("Installing {} with `{}`", tool, install);
        match install.run() {
            Ok(()) => prompt.installed(*tool),
            Err(e) => {
                prompt.install_failed(*tool, &e);
                return Err(DownloaderError::DependencyMissing(tool.to_string()).into());
            }
        }
    }

    Ok(())
}
