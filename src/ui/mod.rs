/// Presentation layer
///
/// Each module projects a piece of state onto iced widgets and maps widget
/// events back to `Message`s. No state lives here.

pub mod forms;
pub mod gallery;
pub mod header;
pub mod lightbox;
pub mod page;

use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Earth red used for accents and the compact header
pub const ACCENT: Color = Color {
    r: 0.55,
    g: 0.22,
    b: 0.10,
    a: 1.0,
};

pub const SAND: Color = Color {
    r: 0.97,
    g: 0.94,
    b: 0.89,
    a: 1.0,
};

pub const ERROR: Color = Color {
    r: 0.78,
    g: 0.12,
    b: 0.12,
    a: 1.0,
};

pub const SUCCESS: Color = Color {
    r: 0.13,
    g: 0.50,
    b: 0.22,
    a: 1.0,
};

/// Dimmed backdrop behind the lightbox and the mobile drawer
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.8,
            ..Color::BLACK
        })),
        ..container::Style::default()
    }
}

/// Light rounded panel floating over a backdrop
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(SAND)),
        border: Border {
            radius: 6.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}
