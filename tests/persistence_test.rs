mod common;

use common::{orchestrator, video, FakeExtractor, RecordingReporter, ScriptedRunner};
use std::sync::Arc;
use tempfile::tempdir;
use yt_mp3_downloader::cli::{run_menu, Menu, MenuExit};
use yt_mp3_downloader::downloader::DownloadEvent;
use yt_mp3_downloader::Settings;

#[tokio::test]
async fn test_menu_settings_are_persisted() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = temp_dir.path().join("nested").join("config.ini");

    let mut menu = Menu::new("3\n192k\n1080p\n4\n5\n".as_bytes(), Vec::new());
    let exit = run_menu(
        &mut menu,
        orchestrator(FakeExtractor::new(Vec::new()), Arc::new(ScriptedRunner::new()), Settings::default()),
        &config,
        &RecordingReporter::default(),
    )
    .await
    .expect("menu");

    assert_eq!(exit, MenuExit::Quit);

    let contents = std::fs::read_to_string(&config).expect("config written");
    assert!(contents.starts_with("[Settings]"));

    let reloaded = Settings::load(&config);
    assert_eq!(reloaded.default_quality, "192k");
    assert_eq!(reloaded.default_video_quality, "1080p");
    assert_eq!(reloaded.max_parallel, 4);

    let output = String::from_utf8(menu.into_output()).expect("utf8");
    assert!(output.contains("Settings saved!"));
    assert!(output.contains("Goodbye!"));
}

#[tokio::test]
async fn test_menu_download_then_gui() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = temp_dir.path().join("config.ini");
    let out_dir = temp_dir.path().join("music");
    let url = "https://www.youtube.com/watch?v=menu";

    let runner = Arc::new(ScriptedRunner::new());
    let extractor = FakeExtractor::new(vec![video("Menu Song", url, &[])]);
    let reporter = RecordingReporter::default();

    let script = format!("2\n{}\n1\n{}\n\n4\n", url, out_dir.display());
    let mut menu = Menu::new(script.as_bytes(), Vec::new());
    let exit = run_menu(
        &mut menu,
        orchestrator(extractor, runner.clone(), Settings::default()),
        &config,
        &reporter,
    )
    .await
    .expect("menu");

    assert_eq!(exit, MenuExit::LaunchGui(Settings::default()));
    assert_eq!(runner.calls().len(), 1);
    assert!(out_dir.is_dir());
    assert!(reporter
        .events()
        .iter()
        .any(|e| matches!(e, DownloadEvent::Finished(s) if s.successful == 1)));
    // Settings were never saved
    assert!(!config.exists());
}

#[tokio::test]
async fn test_menu_survives_probe_failure_and_bad_input() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = temp_dir.path().join("config.ini");

    let mut menu = Menu::new(
        "7\n2\nhttps://www.youtube.com/watch?v=gone\n2\n\n\n".as_bytes(),
        Vec::new(),
    );
    let exit = run_menu(
        &mut menu,
        orchestrator(
            FakeExtractor::failing("ERROR: Video unavailable"),
            Arc::new(ScriptedRunner::new()),
            Settings::default(),
        ),
        &config,
        &RecordingReporter::default(),
    )
    .await
    .expect("menu");

    // Input runs out after the failed download, which ends the menu
    assert_eq!(exit, MenuExit::Quit);
    let output = String::from_utf8_lossy(&menu.into_output()).to_string();
    assert!(output.contains("Invalid choice. Try again."));
    assert!(output.contains("Video unavailable"));
}

#[test]
fn test_settings_file_round_trip_on_disk() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = temp_dir.path().join("config.ini");

    std::fs::write(
        &config,
        "[Settings]\n; edited by hand\ndefault_quality = 64k\nmax_parallel=99\n",
    )
    .expect("write");

    let settings = Settings::load(&config);
    assert_eq!(settings.default_quality, "64k");
    assert_eq!(settings.default_video_quality, "best");
    assert_eq!(settings.max_parallel, 3);

    settings.save(&config).expect("save");
    assert_eq!(Settings::load(&config), settings);
}
