//! Main GUI application

use crate::downloader::{DownloadEvent, DownloadOrchestrator, DownloadSummary, DownloadType};
use crate::gui::clipboard;
use crate::gui::state::{DownloadForm, RunState};
use crate::gui::theme;
use crate::gui::views::{main_view, settings_view};
use crate::utils::config::Settings;
use crate::utils::paths::normalize_output_path;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Application, Command, Element, Length, Subscription, Theme};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Everything the window needs from the launcher
#[derive(Clone)]
pub struct GuiFlags {
    pub orchestrator: DownloadOrchestrator,
    pub settings_path: PathBuf,
}

/// Main application state
pub struct DownloaderApp {
    orchestrator: DownloadOrchestrator,
    settings_path: PathBuf,

    current_view: View,
    form: DownloadForm,
    run: RunState,
    /// Progress from the in-flight run, drained on every tick
    events: Option<mpsc::UnboundedReceiver<DownloadEvent>>,
    last_output_dir: Option<PathBuf>,

    settings_draft: Settings,
    settings_notice: Option<String>,
}

/// Application view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    Settings,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Form
    UrlInputChanged(String),
    PasteFromClipboard,
    ClearUrlInput,
    DownloadTypeSelected(DownloadType),
    OutputPathChanged(String),
    BrowseOutputPath,
    QualitySelected(String),
    PlaylistToggled(bool),

    // Run
    DownloadPressed,
    DownloadFinished(Result<DownloadSummary, String>),
    OpenOutputFolder,

    // Navigation
    SwitchToMain,
    SwitchToSettings,

    // Settings
    DefaultAudioQualityChanged(String),
    DefaultVideoQualityChanged(String),
    MaxParallelChanged(u8),
    SaveSettings,

    // System
    Tick,
    Exit,
}

impl Application for DownloaderApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = GuiFlags;

    fn new(flags: Self::Flags) -> (Self, Command<Message>) {
        let settings = flags.orchestrator.settings().clone();

        let app = Self {
            form: DownloadForm::new(&settings),
            settings_draft: settings,
            orchestrator: flags.orchestrator,
            settings_path: flags.settings_path,
            current_view: View::Main,
            run: RunState::default(),
            events: None,
            last_output_dir: None,
            settings_notice: None,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("YT to MP3 / Video Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlInputChanged(url) => {
                self.form.set_url(url);
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::paste_url() {
                    Ok(content) => self.form.set_url(content),
                    Err(e) => {
                        warn!("{}", e);
                        self.run.status = e;
                    }
                }
                Command::none()
            }

            Message::ClearUrlInput => {
                self.form.set_url(String::new());
                Command::none()
            }

            Message::DownloadTypeSelected(download_type) => {
                self.form.set_download_type(download_type);
                Command::none()
            }

            Message::OutputPathChanged(path) => {
                self.form.output_path = path;
                Command::none()
            }

            Message::BrowseOutputPath => {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    self.form.output_path = path.to_string_lossy().to_string();
                }
                Command::none()
            }

            Message::QualitySelected(quality) => {
                self.form.set_quality(quality);
                Command::none()
            }

            Message::PlaylistToggled(is_playlist) => {
                self.form.is_playlist = is_playlist;
                Command::none()
            }

            Message::DownloadPressed => self.start_download(),

            Message::DownloadFinished(result) => {
                self.drain_events();
                self.events = None;

                match result {
                    Ok(summary) => {
                        let text = DownloadEvent::Finished(summary).status_text();
                        self.run.finish(text, false);
                    }
                    Err(e) => {
                        error!("Download failed: {}", e);
                        self.run.finish(format!("Error: {}", e), true);
                    }
                }
                Command::none()
            }

            Message::OpenOutputFolder => {
                let folder = self.last_output_dir.clone().unwrap_or_else(|| {
                    normalize_output_path(&self.form.output_path, self.form.download_type)
                });
                let opened = std::fs::create_dir_all(&folder)
                    .map_err(|e| e.to_string())
                    .and_then(|_| open::that(&folder).map_err(|e| e.to_string()));
                if let Err(e) = opened {
                    warn!("Failed to open {}: {}", folder.display(), e);
                    self.run.status = format!("Failed to open folder: {}", e);
                }
                Command::none()
            }

            Message::SwitchToMain => {
                self.current_view = View::Main;
                Command::none()
            }

            Message::SwitchToSettings => {
                self.settings_draft = self.orchestrator.settings().clone();
                self.settings_notice = None;
                self.current_view = View::Settings;
                Command::none()
            }

            Message::DefaultAudioQualityChanged(quality) => {
                self.settings_draft.default_quality = quality;
                self.settings_notice = None;
                Command::none()
            }

            Message::DefaultVideoQualityChanged(quality) => {
                self.settings_draft.default_video_quality = quality;
                self.settings_notice = None;
                Command::none()
            }

            Message::MaxParallelChanged(value) => {
                self.settings_draft.max_parallel = value;
                self.settings_notice = None;
                Command::none()
            }

            Message::SaveSettings => {
                self.save_settings();
                Command::none()
            }

            Message::Tick => {
                self.drain_events();
                Command::none()
            }

            Message::Exit => iced::window::close(iced::window::Id::MAIN),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("YT to MP3 / Video Downloader")
                .size(22)
                .style(iced::theme::Text::Color(theme::ACCENT)),
            Space::with_width(Length::Fill),
            tab("Download", View::Main, self.current_view, Message::SwitchToMain),
            tab("Settings", View::Settings, self.current_view, Message::SwitchToSettings),
        ]
        .spacing(8)
        .align_items(Alignment::Center);

        let content = match self.current_view {
            View::Main => main_view(&self.form, &self.run),
            View::Settings => settings_view(
                &self.settings_draft,
                &self.settings_path,
                self.settings_notice.as_deref(),
            ),
        };

        container(column![header, content].spacing(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .style(iced::theme::Container::Custom(Box::new(
                theme::BackgroundContainer,
            )))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.run.running {
            iced::time::every(Duration::from_millis(100)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl DownloaderApp {
    fn start_download(&mut self) -> Command<Message> {
        if self.run.running {
            return Command::none();
        }
        let Some(request) = self.form.to_request() else {
            return Command::none();
        };

        info!("GUI download requested for {}", request.url);
        self.run.start(&request.url);
        self.last_output_dir = Some(request.output_path.clone());

        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(rx);
        let orchestrator = self.orchestrator.clone();

        Command::perform(
            async move {
                orchestrator
                    .download(&request, &tx)
                    .await
                    .map_err(|e| e.to_string())
            },
            Message::DownloadFinished,
        )
    }

    fn drain_events(&mut self) {
        let Some(rx) = self.events.as_mut() else {
            return;
        };
        while let Ok(event) = rx.try_recv() {
            self.run.apply(&event);
        }
    }

    fn save_settings(&mut self) {
        let old = self.orchestrator.settings().clone();
        let new = self.settings_draft.clone();

        match new.save(&self.settings_path) {
            Ok(()) => {
                info!("Settings saved to {}", self.settings_path.display());
                self.settings_notice = Some("Settings saved!".to_string());
            }
            Err(e) => {
                error!("Failed to save settings: {:#}", e);
                self.settings_notice = Some(format!("Failed to save settings: {}", e));
            }
        }

        // The new values apply to this session even if the file could not be written
        self.form.apply_settings(&old, &new);
        self.orchestrator = self.orchestrator.clone().with_settings(new);
    }
}

fn tab(label: &str, target: View, current: View, message: Message) -> Element<'static, Message> {
    let style = if target == current {
        theme::TabButton::Selected
    } else {
        theme::TabButton::Unselected
    };

    button(text(label.to_string()).size(14))
        .on_press(message)
        .padding([6, 14])
        .style(iced::theme::Button::Custom(Box::new(style)))
        .into()
}
