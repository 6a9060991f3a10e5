//! URL field with paste and clear actions

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, row, text, text_input, tooltip};
use iced::{Alignment, Element, Length};

/// URL input row, with the validation error underneath when there is one
pub fn url_input(value: &str, error_message: Option<&str>, enabled: bool) -> Element<'static, Message> {
    let mut input = text_input("https://www.youtube.com/watch?v=...", value)
        .padding(10)
        .width(Length::Fill)
        .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle {
            invalid: error_message.is_some(),
        })));
    // Without a handler the field renders disabled
    if enabled {
        input = input.on_input(Message::UrlInputChanged);
    }

    let input_row = row![
        input,
        tooltip(
            button(text("Paste").size(14))
                .on_press_maybe(enabled.then_some(Message::PasteFromClipboard))
                .padding([8, 12])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        button(text("Clear").size(14))
            .on_press_maybe(enabled.then_some(Message::ClearUrlInput))
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    match error_message {
        Some(error) => column![
            input_row,
            text(error)
                .size(13)
                .style(iced::theme::Text::Color(theme::DANGER)),
        ]
        .spacing(6)
        .into(),
        None => input_row.into(),
    }
}
