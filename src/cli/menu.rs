//! Interactive terminal menu

use crate::cli::terminal::{banner, menu_table};
use crate::downloader::{DownloadRequest, DownloadType};
use crate::utils::config::{parse_max_parallel, Settings, DEFAULT_MAX_PARALLEL};
use crate::utils::paths::{default_dir_name, normalize_output_path};
use console::style;
use std::io::{self, BufRead, Write};

/// What the user picked from the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Download(DownloadRequest),
    ConfigureSettings,
    LaunchGui,
    Exit,
    /// Unrecognised input; carries the message already shown
    Invalid(String),
}

/// Prompts over any line-based input and output.
///
/// End of input is treated as a request to exit.
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl Menu<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line to the menu output
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Show `question` and read one trimmed answer, `None` at end of input
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn show_banner(&mut self) -> io::Result<()> {
        write!(self.output, "{}", banner())
    }

    /// Show the options and read one choice
    pub fn next_action(&mut self, settings: &Settings) -> io::Result<MenuAction> {
        write!(self.output, "\n{}", menu_table())?;

        let Some(choice) = self.ask(&format!("{} ", style("Enter your choice (1-5):").bold()))?
        else {
            return Ok(MenuAction::Exit);
        };

        match choice.as_str() {
            "1" => self.read_request(true, settings),
            "2" => self.read_request(false, settings),
            "3" => Ok(MenuAction::ConfigureSettings),
            "4" => Ok(MenuAction::LaunchGui),
            "5" => Ok(MenuAction::Exit),
            _ => self.invalid("Invalid choice. Try again."),
        }
    }

    fn invalid(&mut self, message: &str) -> io::Result<MenuAction> {
        self.say(format!("{}", style(message).red()))?;
        Ok(MenuAction::Invalid(message.to_string()))
    }

    fn read_request(&mut self, is_playlist: bool, settings: &Settings) -> io::Result<MenuAction> {
        let what = if is_playlist { "playlist" } else { "video" };
        let Some(url) = self.ask(&format!("Enter YouTube {} URL: ", what))? else {
            return Ok(MenuAction::Exit);
        };
        if url.is_empty() {
            return self.invalid("URL must not be empty.");
        }

        self.say("Select download type:")?;
        self.say("  [1] MP3")?;
        self.say("  [2] Video")?;
        let Some(kind) = self.ask("Enter choice (1-2): ")? else {
            return Ok(MenuAction::Exit);
        };
        let download_type = match kind.as_str() {
            "1" => DownloadType::Mp3,
            "2" => DownloadType::Video,
            _ => return self.invalid("Invalid choice"),
        };

        let default_dir = default_dir_name(download_type);
        let Some(output) =
            self.ask(&format!("Enter output directory (default: {}): ", default_dir))?
        else {
            return Ok(MenuAction::Exit);
        };

        let default_quality = settings.default_quality_for(download_type).to_string();
        let Some(quality) = self.ask(&format!(
            "Enter quality ({}) [default: {}]: ",
            quality_hint(download_type),
            default_quality
        ))?
        else {
            return Ok(MenuAction::Exit);
        };

        Ok(MenuAction::Download(DownloadRequest {
            url,
            is_playlist,
            output_path: normalize_output_path(&output, download_type),
            download_type,
            quality: if quality.is_empty() {
                default_quality
            } else {
                quality
            },
        }))
    }

    /// Prompt for new settings; empty answers fall back to defaults
    pub fn read_settings(&mut self) -> io::Result<Settings> {
        let defaults = Settings::default();
        self.say(format!("\n{}", style("Configure Settings").bold()))?;

        let default_quality = self
            .ask("Default MP3 quality (best, 192k, 128k, 64k) [best]: ")?
            .filter(|q| !q.is_empty())
            .unwrap_or(defaults.default_quality);

        let default_video_quality = self
            .ask("Default video quality (best, 4K, 2K, 1080p, 720p, 480p, 360p, 144p) [best]: ")?
            .filter(|q| !q.is_empty())
            .unwrap_or(defaults.default_video_quality);

        let max_parallel = match self.ask("Max parallel downloads (1-10) [3]: ")? {
            Some(answer) if !answer.is_empty() => match parse_max_parallel(&answer) {
                Some(n) => n,
                None => {
                    self.say(format!(
                        "{}",
                        style(format!("Invalid number. Using default ({}).", DEFAULT_MAX_PARALLEL))
                            .yellow()
                    ))?;
                    DEFAULT_MAX_PARALLEL
                }
            },
            _ => DEFAULT_MAX_PARALLEL,
        };

        Ok(Settings {
            default_quality,
            default_video_quality,
            max_parallel,
        })
    }
}

fn quality_hint(download_type: DownloadType) -> &'static str {
    match download_type {
        DownloadType::Mp3 => "best, 192k, 128k, 64k",
        DownloadType::Video => "best, 4K, 2K, 1080p, 720p, 480p, 360p, 144p",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(script: &str) -> Menu<&[u8], Vec<u8>> {
        Menu::new(script.as_bytes(), Vec::new())
    }

    fn printed(menu: Menu<&[u8], Vec<u8>>) -> String {
        let bytes = menu.into_output();
        console::strip_ansi_codes(&String::from_utf8_lossy(&bytes)).to_string()
    }

    #[test]
    fn test_single_video_request() {
        let mut m = menu("2\nhttps://youtu.be/abc\n2\n/tmp/out\n720p\n");
        let action = m.next_action(&Settings::default()).expect("io");

        let request = match action {
            MenuAction::Download(request) => request,
            other => panic!("expected a download, got {:?}", other),
        };
        assert_eq!(request.url, "https://youtu.be/abc");
        assert!(!request.is_playlist);
        assert_eq!(request.download_type, DownloadType::Video);
        assert_eq!(request.quality, "720p");
        assert!(request.output_path.ends_with("out"));
    }

    #[test]
    fn test_playlist_request_uses_defaults() {
        let settings = Settings {
            default_quality: "128k".to_string(),
            ..Settings::default()
        };
        let mut m = menu("1\nhttps://youtube.com/playlist?list=PL1\n1\n\n\n");

        let MenuAction::Download(request) = m.next_action(&settings).expect("io") else {
            panic!("expected a download");
        };
        assert!(request.is_playlist);
        assert_eq!(request.download_type, DownloadType::Mp3);
        assert_eq!(request.quality, "128k");
        assert!(request.output_path.ends_with("downloads"));
        assert!(request.output_path.is_absolute());
    }

    #[test]
    fn test_invalid_choices() {
        let mut m = menu("9\n");
        assert!(matches!(
            m.next_action(&Settings::default()).expect("io"),
            MenuAction::Invalid(_)
        ));
        assert!(printed(m).contains("Invalid choice. Try again."));

        let mut m = menu("2\nhttps://youtu.be/abc\n7\n");
        assert_eq!(
            m.next_action(&Settings::default()).expect("io"),
            MenuAction::Invalid("Invalid choice".to_string())
        );
    }

    #[test]
    fn test_simple_choices() {
        for (input, expected) in [
            ("3\n", MenuAction::ConfigureSettings),
            ("4\n", MenuAction::LaunchGui),
            ("5\n", MenuAction::Exit),
            (" 5 \n", MenuAction::Exit),
        ] {
            assert_eq!(menu(input).next_action(&Settings::default()).expect("io"), expected);
        }
    }

    #[test]
    fn test_end_of_input_exits() {
        assert_eq!(menu("").next_action(&Settings::default()).expect("io"), MenuAction::Exit);
        // EOF in the middle of a request abandons it
        assert_eq!(
            menu("2\nhttps://youtu.be/abc\n").next_action(&Settings::default()).expect("io"),
            MenuAction::Exit
        );
    }

    #[test]
    fn test_read_settings() {
        let mut m = menu("192k\n1080p\n5\n");
        let settings = m.read_settings().expect("io");
        assert_eq!(settings.default_quality, "192k");
        assert_eq!(settings.default_video_quality, "1080p");
        assert_eq!(settings.max_parallel, 5);
    }

    #[test]
    fn test_read_settings_invalid_parallel() {
        let mut m = menu("\n\nlots\n");
        let settings = m.read_settings().expect("io");
        assert_eq!(settings, Settings::default());
        assert!(printed(m).contains("Invalid number. Using default (3)."));

        let settings = menu("\n\n42\n").read_settings().expect("io");
        assert_eq!(settings.max_parallel, DEFAULT_MAX_PARALLEL);
    }
}
