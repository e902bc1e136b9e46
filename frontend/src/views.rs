//! Small styled building blocks shared by the filter bars, tables and charts.

use shared::Classification;
use zoon::*;

pub const TEXT_COLOR: &str = "rgb(33, 37, 41)";
pub const MUTED_TEXT_COLOR: &str = "rgb(108, 117, 125)";
pub const ERROR_COLOR: &str = "rgb(220, 53, 69)";
pub const BORDER_COLOR: &str = "rgb(222, 226, 230)";
pub const CARD_BACKGROUND: &str = "rgb(255, 255, 255)";
pub const PAGE_BACKGROUND: &str = "rgb(244, 246, 249)";
const PRIMARY_COLOR: &str = "rgb(60, 80, 224)";
const IDLE_CHIP_BACKGROUND: &str = "rgb(233, 236, 239)";

/// Colours cycled through by chart series.
pub const SERIES_COLORS: [&str; 5] = [
    "rgb(60, 80, 224)",
    "rgb(128, 202, 238)",
    "rgb(16, 185, 129)",
    "rgb(255, 186, 0)",
    "rgb(234, 88, 12)",
];

pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipState {
    Selected,
    Idle,
    Disabled,
}

/// Toggle-like option button; disabled chips ignore presses.
pub fn chip(label: &str, state: ChipState, mut on_press: impl FnMut() + 'static) -> impl Element {
    let (background, color) = match state {
        ChipState::Selected => (PRIMARY_COLOR, CARD_BACKGROUND),
        ChipState::Idle => (IDLE_CHIP_BACKGROUND, TEXT_COLOR),
        ChipState::Disabled => (IDLE_CHIP_BACKGROUND, MUTED_TEXT_COLOR),
    };
    let enabled = state != ChipState::Disabled;
    Button::new()
        .s(Padding::new().x(10).y(4))
        .s(RoundedCorners::all_max())
        .s(Background::new().color(background))
        .s(Font::new().size(13).color(color))
        .s(Cursor::new(if enabled {
            CursorIcon::Pointer
        } else {
            CursorIcon::NotAllowed
        }))
        .label(Text::new(label))
        .on_press(move || {
            if enabled {
                on_press();
            }
        })
}

/// Plain text button, greyed out and inert when disabled.
pub fn text_button(label: &str, enabled: bool, mut on_press: impl FnMut() + 'static) -> impl Element {
    Button::new()
        .s(Padding::new().x(12).y(6))
        .s(RoundedCorners::all(4))
        .s(Borders::all(Border::new().width(1).color(BORDER_COLOR)))
        .s(Font::new().size(13).color(if enabled { TEXT_COLOR } else { MUTED_TEXT_COLOR }))
        .s(Cursor::new(if enabled {
            CursorIcon::Pointer
        } else {
            CursorIcon::NotAllowed
        }))
        .label(Text::new(label))
        .on_press(move || {
            if enabled {
                on_press();
            }
        })
}

pub fn muted_text(text: &str) -> impl Element {
    El::new()
        .s(Font::new().size(13).color(MUTED_TEXT_COLOR))
        .child(Text::new(text))
}

pub fn error_text(text: &str) -> impl Element {
    El::new()
        .s(Font::new().size(13).color(ERROR_COLOR))
        .child(Text::new(text))
}

/// Bordered white card with a heading.
pub fn card(title: &str, content: impl Element) -> impl Element {
    Column::new()
        .s(Width::fill())
        .s(Padding::all(16))
        .s(Gap::new().y(12))
        .s(RoundedCorners::all(8))
        .s(Background::new().color(CARD_BACKGROUND))
        .s(Borders::all(Border::new().width(1).color(BORDER_COLOR)))
        .item(
            El::new()
                .s(Font::new().size(16).weight(FontWeight::SemiBold).color(TEXT_COLOR))
                .child(Text::new(title)),
        )
        .item(content)
}

pub fn classification_badge(text: &str) -> impl Element {
    let (background, color) = match Classification::from(text) {
        Classification::A => ("rgb(220, 252, 231)", "rgb(21, 128, 61)"),
        Classification::B => ("rgb(254, 249, 195)", "rgb(161, 98, 7)"),
        Classification::C => ("rgb(254, 226, 226)", "rgb(185, 28, 28)"),
        Classification::Other => (IDLE_CHIP_BACKGROUND, MUTED_TEXT_COLOR),
    };
    El::new()
        .s(Padding::new().x(8).y(2))
        .s(RoundedCorners::all_max())
        .s(Background::new().color(background))
        .s(Font::new().size(12).weight(FontWeight::Medium).color(color))
        .child(Text::new(text))
}
