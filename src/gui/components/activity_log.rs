//! Run progress bar and scrolling activity log

use crate::gui::app::Message;
use crate::gui::state::RunState;
use crate::gui::theme;
use iced::widget::{column, container, progress_bar, row, scrollable, text, Column, Space};
use iced::{Element, Length};

pub fn activity_log(run: &RunState) -> Element<'static, Message> {
    let counter = if run.total > 0 {
        format!("{}/{}", run.finished, run.total)
    } else {
        String::new()
    };

    let bar = progress_bar(0.0..=1.0, run.fraction())
        .height(Length::Fixed(8.0))
        .style(iced::theme::ProgressBar::Custom(Box::new(theme::RunProgress {
            done: !run.running && run.total > 0 && run.finished == run.total,
        })));

    let lines = run.log.iter().fold(Column::new().spacing(2), |col, entry| {
        let color = if entry.is_error {
            theme::LOG_ERROR
        } else {
            theme::LOG_TEXT
        };
        col.push(
            text(entry.text.clone())
                .size(12)
                .font(iced::Font::MONOSPACE)
                .style(iced::theme::Text::Color(color)),
        )
    });

    column![
        row![
            text("Activity")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
            Space::with_width(Length::Fill),
            text(counter)
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        ],
        bar,
        container(
            scrollable(container(lines).width(Length::Fill).padding(10))
                .height(Length::Fill)
                .style(iced::theme::Scrollable::Custom(Box::new(theme::LogScrollable))),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(theme::LogContainer))),
    ]
    .spacing(8)
    .height(Length::Fill)
    .into()
}
