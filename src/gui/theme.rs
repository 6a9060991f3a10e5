//! Window styling: a light surface with a red accent

use iced::widget::{button, container, progress_bar, scrollable, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Palette ---

pub const SURFACE: Color = Color::from_rgb(0.965, 0.965, 0.969);
pub const CARD: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const LOG_BACKGROUND: Color = Color::from_rgb(0.118, 0.122, 0.133);

pub const RED_600: Color = Color::from_rgb(0.863, 0.149, 0.149);
pub const RED_500: Color = Color::from_rgb(0.937, 0.267, 0.267);
pub const RED_100: Color = Color::from_rgb(0.996, 0.886, 0.886);

pub const GREEN_500: Color = Color::from_rgb(0.133, 0.773, 0.369);

pub const GRAY_900: Color = Color::from_rgb(0.067, 0.094, 0.153);
pub const GRAY_600: Color = Color::from_rgb(0.294, 0.333, 0.388);
pub const GRAY_400: Color = Color::from_rgb(0.616, 0.639, 0.667);
pub const GRAY_300: Color = Color::from_rgb(0.820, 0.835, 0.859);
pub const GRAY_200: Color = Color::from_rgb(0.898, 0.906, 0.922);
pub const GRAY_100: Color = Color::from_rgb(0.953, 0.957, 0.965);

pub const LOG_TEXT: Color = Color::from_rgb(0.835, 0.855, 0.878);
pub const LOG_ERROR: Color = Color::from_rgb(0.988, 0.647, 0.647);

pub const TEXT_PRIMARY: Color = GRAY_900;
pub const TEXT_SECONDARY: Color = GRAY_600;
pub const ACCENT: Color = RED_600;
pub const DANGER: Color = RED_500;
pub const SUCCESS: Color = GREEN_500;

// --- Containers ---

pub struct BackgroundContainer;

impl container::StyleSheet for BackgroundContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(SURFACE)),
            ..Default::default()
        }
    }
}

pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(CARD)),
            border: Border {
                color: GRAY_200,
                width: 1.0,
                radius: 12.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
        }
    }
}

/// Dark panel behind the activity log
pub struct LogContainer;

impl container::StyleSheet for LogContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(LOG_TEXT),
            background: Some(Background::Color(LOG_BACKGROUND)),
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// --- Buttons ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(RED_600)),
            text_color: CARD,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(RED_500)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GRAY_300)),
            text_color: GRAY_600,
            ..self.active(style)
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(CARD)),
            text_color: GRAY_600,
            border: Border {
                radius: 8.0.into(),
                color: GRAY_300,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GRAY_100)),
            ..self.active(style)
        }
    }
}

/// Header tabs switching between the main and settings views
pub enum TabButton {
    Selected,
    Unselected,
}

impl button::StyleSheet for TabButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color) = match self {
            Self::Selected => (Some(Background::Color(RED_100)), RED_600),
            Self::Unselected => (None, GRAY_600),
        };
        button::Appearance {
            background,
            text_color,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        match self {
            Self::Selected => self.active(style),
            Self::Unselected => button::Appearance {
                background: Some(Background::Color(GRAY_200)),
                text_color: GRAY_900,
                ..self.active(style)
            },
        }
    }
}

// --- Inputs ---

pub struct InputStyle {
    pub invalid: bool,
}

impl text_input::StyleSheet for InputStyle {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(CARD),
            border: Border {
                radius: 8.0.into(),
                width: 1.0,
                color: if self.invalid { RED_500 } else { GRAY_300 },
            },
            icon_color: GRAY_400,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            border: Border {
                color: if self.invalid { RED_500 } else { RED_600 },
                width: 2.0,
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        GRAY_400
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        GRAY_900
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.863, 0.149, 0.149, 0.25)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(GRAY_100),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        GRAY_400
    }
}

// --- Log scrolling and run progress ---

pub struct LogScrollable;

impl scrollable::StyleSheet for LogScrollable {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> scrollable::Appearance {
        scrollable::Appearance {
            container: container::Appearance::default(),
            scrollbar: scrollable::Scrollbar {
                background: None,
                border: Border::default(),
                scroller: scrollable::Scroller {
                    color: Color::from_rgba(1.0, 1.0, 1.0, 0.25),
                    border: Border {
                        radius: 3.0.into(),
                        ..Default::default()
                    },
                },
            },
            gap: None,
        }
    }

    fn hovered(&self, style: &Self::Style, _is_mouse_over_scrollbar: bool) -> scrollable::Appearance {
        self.active(style)
    }
}

pub struct RunProgress {
    pub done: bool,
}

impl progress_bar::StyleSheet for RunProgress {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> progress_bar::Appearance {
        progress_bar::Appearance {
            background: Background::Color(GRAY_200),
            bar: Background::Color(if self.done { GREEN_500 } else { RED_600 }),
            border_radius: 4.0.into(),
        }
    }
}
