//! Download form and activity log

use crate::downloader::DownloadType;
use crate::gui::app::Message;
use crate::gui::components::{activity_log, url_input};
use crate::gui::state::{DownloadForm, RunState};
use crate::gui::theme;
use iced::widget::{button, checkbox, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

pub fn main_view(form: &DownloadForm, run: &RunState) -> Element<'static, Message> {
    let idle = !run.running;

    let mut output_input = text_input("downloads", &form.output_path)
        .padding(10)
        .width(Length::Fill)
        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle {
            invalid: false,
        })));
    if idle {
        output_input = output_input.on_input(Message::OutputPathChanged);
    }

    let mut playlist = checkbox("Playlist", form.is_playlist);
    if idle {
        playlist = playlist.on_toggle(Message::PlaylistToggled);
    }

    let form_card = container(
        column![
            label("YouTube URL"),
            url_input(&form.url, form.url_error.as_deref(), idle),
            row![
                column![
                    label("Download type"),
                    pick_list(
                        DownloadType::ALL,
                        Some(form.download_type),
                        Message::DownloadTypeSelected
                    )
                    .padding(8)
                    .width(Length::Fixed(140.0)),
                ]
                .spacing(6),
                column![
                    label("Quality"),
                    pick_list(
                        form.quality_options(),
                        Some(form.quality.clone()),
                        Message::QualitySelected
                    )
                    .padding(8)
                    .width(Length::Fixed(140.0)),
                ]
                .spacing(6),
                column![label(" "), container(playlist).padding([8, 0])].spacing(6),
            ]
            .spacing(16),
            label("Output directory"),
            row![
                output_input,
                button(text("Browse").size(14))
                    .on_press_maybe(idle.then_some(Message::BrowseOutputPath))
                    .padding([8, 12])
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
            ]
            .spacing(8)
            .align_items(Alignment::Center),
        ]
        .spacing(12),
    )
    .padding(20)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)));

    let can_download = idle && !form.url.trim().is_empty();
    let actions = row![
        button(text(if run.running { "Downloading..." } else { "Download" }).size(15))
            .on_press_maybe(can_download.then_some(Message::DownloadPressed))
            .padding([10, 24])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
        button(text("Open Folder").size(14))
            .on_press(Message::OpenOutputFolder)
            .padding([10, 16])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        Space::with_width(Length::Fill),
        button(text("Exit").size(14))
            .on_press(Message::Exit)
            .padding([10, 16])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    let status_color = if run.log.last().map(|e| e.is_error).unwrap_or(false) {
        theme::DANGER
    } else {
        theme::TEXT_SECONDARY
    };
    let status_text = if run.status.is_empty() {
        "Ready".to_string()
    } else {
        run.status.clone()
    };
    let status = text(status_text)
        .size(13)
        .style(iced::theme::Text::Color(status_color));

    column![form_card, actions, status, activity_log(run)]
        .spacing(14)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn label(content: &str) -> Element<'static, Message> {
    text(content.to_string())
        .size(13)
        .style(iced::theme::Text::Color(theme::TEXT_SECONDARY))
        .into()
}
