//! Settings view

use crate::downloader::quality::{AUDIO_QUALITY_OPTIONS, VIDEO_QUALITY_OPTIONS};
use crate::gui::app::Message;
use crate::gui::theme;
use crate::utils::config::{Settings, MAX_PARALLEL_RANGE};
use iced::widget::{button, column, container, pick_list, row, slider, text, Space};
use iced::{Element, Length};
use std::path::Path;

pub fn settings_view(
    draft: &Settings,
    settings_path: &Path,
    notice: Option<&str>,
) -> Element<'static, Message> {
    let audio = column![
        heading("Default MP3 quality"),
        pick_list(
            to_owned(&AUDIO_QUALITY_OPTIONS),
            Some(draft.default_quality.clone()),
            Message::DefaultAudioQualityChanged
        )
        .padding(8)
        .width(Length::Fixed(180.0)),
    ]
    .spacing(8);

    let video = column![
        heading("Default video quality"),
        pick_list(
            to_owned(&VIDEO_QUALITY_OPTIONS),
            Some(draft.default_video_quality.clone()),
            Message::DefaultVideoQualityChanged
        )
        .padding(8)
        .width(Length::Fixed(180.0)),
    ]
    .spacing(8);

    let parallel = column![
        row![
            heading("Max parallel downloads"),
            Space::with_width(Length::Fill),
            text(draft.max_parallel.to_string())
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
        ],
        slider(MAX_PARALLEL_RANGE, draft.max_parallel, Message::MaxParallelChanged),
    ]
    .spacing(8);

    let card = container(column![audio, video, parallel].spacing(24))
        .padding(24)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)));

    let mut footer = column![text(format!("Saved to {}", settings_path.display()))
        .size(12)
        .style(iced::theme::Text::Color(theme::TEXT_SECONDARY))]
    .spacing(6);
    if let Some(notice) = notice {
        footer = footer.push(
            text(notice.to_string())
                .size(13)
                .style(iced::theme::Text::Color(theme::SUCCESS)),
        );
    }

    column![
        card,
        footer,
        Space::with_height(Length::Fill),
        button(text("Save Settings").size(15))
            .on_press(Message::SaveSettings)
            .padding([10, 24])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
    ]
    .spacing(16)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn heading(content: &str) -> Element<'static, Message> {
    text(content.to_string())
        .size(14)
        .style(iced::theme::Text::Color(theme::TEXT_SECONDARY))
        .into()
}

fn to_owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|s| s.to_string()).collect()
}
