//! YT to MP3 / Video Downloader
//!
//! Downloads YouTube videos and playlists as MP3 audio or video files through
//! yt-dlp, driven by command-line flags, an interactive menu or a desktop window.

use anyhow::Result;
use clap::Parser;
use console::style;
use iced::Application;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use yt_mp3_downloader::cli::{self, Menu, MenuExit, TerminalDependencyPrompt, TerminalReporter};
use yt_mp3_downloader::downloader::{DownloadOrchestrator, DownloadRequest, DownloadType, YtDlpRunner};
use yt_mp3_downloader::extractor::YtDlpExtractor;
use yt_mp3_downloader::gui::{DownloaderApp, GuiFlags};
use yt_mp3_downloader::utils::config::{settings_path, Settings};
use yt_mp3_downloader::utils::{check_dependencies, normalize_output_path};

#[derive(Parser, Debug)]
#[command(version, about = "Download YouTube videos and playlists as MP3 or video")]
struct Args {
    /// Video or playlist URL; skips the interactive menu
    #[arg(long)]
    url: Option<String>,

    /// What to download
    #[arg(long = "type", value_enum, default_value_t = DownloadType::Mp3)]
    download_type: DownloadType,

    /// Quality label, e.g. 192k or 720p (default: from settings)
    #[arg(long)]
    quality: Option<String>,

    /// Output directory (default: ./downloads or ./videos)
    #[arg(long)]
    output: Option<String>,

    /// Treat the URL as a playlist
    #[arg(long)]
    playlist: bool,

    /// Open the desktop window
    #[arg(long)]
    gui: bool,

    /// Settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Browser to read cookies from, or "none"
    #[arg(long, value_name = "NAME", default_value = "firefox")]
    cookies_from_browser: String,

    /// Do not look for yt-dlp and ffmpeg at startup
    #[arg(long)]
    skip_dependency_check: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    if !args.skip_dependency_check {
        if let Err(e) = check_dependencies(&mut TerminalDependencyPrompt::stdin()) {
            eprintln!("{}", style(format!("[-] {}", e)).red());
            std::process::exit(1);
        }
    }

    let settings_path = settings_path(args.config.as_deref());
    let settings = Settings::load(&settings_path);
    let orchestrator = build_orchestrator(settings, cookies_browser(&args.cookies_from_browser))?;

    if args.gui {
        return launch_gui(orchestrator, settings_path);
    }

    let runtime = tokio::runtime::Runtime::new()?;

    if let Some(url) = args.url {
        let request = DownloadRequest {
            url,
            is_playlist: args.playlist,
            output_path: normalize_output_path(
                args.output.as_deref().unwrap_or_default(),
                args.download_type,
            ),
            download_type: args.download_type,
            quality: args.quality.unwrap_or_default(),
        };

        let reporter = TerminalReporter::new();
        runtime.block_on(async {
            if let Err(e) = orchestrator.download(&request, &reporter).await {
                eprintln!("{}", style(format!("[-] Error: {}", e)).red());
            }
        });
        return Ok(());
    }

    let reporter = TerminalReporter::new();
    let exit = runtime.block_on(cli::run_menu(
        &mut Menu::stdio(),
        orchestrator.clone(),
        &settings_path,
        &reporter,
    ))?;

    // iced starts its own runtime
    drop(runtime);

    if let MenuExit::LaunchGui(settings) = exit {
        launch_gui(orchestrator.with_settings(settings), settings_path)?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cookies_browser(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

fn build_orchestrator(settings: Settings, cookies: Option<String>) -> Result<DownloadOrchestrator> {
    let extractor = YtDlpExtractor::new()?;
    let ytdlp_path = extractor.ytdlp_path().to_path_buf();

    Ok(DownloadOrchestrator::new(
        Arc::new(extractor),
        Arc::new(YtDlpRunner),
        ytdlp_path,
        settings,
    )
    .with_cookies_from_browser(cookies))
}

fn launch_gui(orchestrator: DownloadOrchestrator, settings_path: PathBuf) -> Result<()> {
    let mut settings = iced::Settings::with_flags(GuiFlags {
        orchestrator,
        settings_path,
    });
    settings.window = iced::window::Settings {
        size: iced::Size::new(800.0, 600.0),
        min_size: Some(iced::Size::new(640.0, 520.0)),
        ..Default::default()
    };

    DownloaderApp::run(settings)?;
    Ok(())
}
