use iced::alignment::Horizontal;
use iced::widget::{button, column, container, horizontal_space, mouse_area, opaque, row, text};
use iced::widget::{Column, Row};
use iced::{Alignment, Background, Color, Element, Length, Shadow, Theme, Vector};

use crate::state::chrome::{HeaderState, MobileMenu};
use crate::state::data::{NavLink, SiteContent};
use crate::Message;

/// Site header: brand on the left, inline links or the drawer toggle on the right
pub fn view<'a>(
    content: &'a SiteContent,
    header: &HeaderState,
    menu: &MobileMenu,
    window_width: f32,
) -> Element<'a, Message> {
    let scrolled = header.is_scrolled();

    let mut brand = column![text(content.title.as_str()).size(if scrolled { 20 } else { 26 })];
    if !scrolled && !content.tagline.is_empty() {
        brand = brand.push(text(content.tagline.as_str()).size(12));
    }

    let nav: Element<'a, Message> = if menu.is_collapsed(window_width) {
        let icon = if menu.is_open() { "✕" } else { "☰" };
        button(text(icon).size(22))
            .on_press(Message::MenuToggled)
            .style(button::text)
            .into()
    } else {
        Row::with_children(content.nav.iter().map(inline_link))
            .spacing(8)
            .into()
    };

    let vertical: u16 = if scrolled { 8 } else { 18 };
    container(
        row![brand, horizontal_space(), nav]
            .align_y(Alignment::Center)
            .padding([vertical, 24]),
    )
    .width(Length::Fill)
    .style(move |_theme: &Theme| bar_style(scrolled))
    .into()
}

fn inline_link(link: &NavLink) -> Element<'_, Message> {
    button(text(link.label.as_str()))
        .on_press(Message::AnchorClicked(link.href.clone()))
        .style(button::text)
        .into()
}

fn drawer_link(link: &NavLink) -> Element<'_, Message> {
    button(text(link.label.as_str()).size(18))
        .on_press(Message::DrawerLinkClicked(link.href.clone()))
        .style(button::text)
        .width(Length::Fill)
        .into()
}

fn bar_style(scrolled: bool) -> container::Style {
    if scrolled {
        container::Style {
            background: Some(Background::Color(super::ACCENT)),
            text_color: Some(Color::WHITE),
            shadow: Shadow {
                color: Color {
                    a: 0.3,
                    ..Color::BLACK
                },
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            ..container::Style::default()
        }
    } else {
        container::Style {
            background: Some(Background::Color(super::SAND)),
            ..container::Style::default()
        }
    }
}

/// Slide-in navigation drawer over a dimmed page.
///
/// Pressing the dimmed area closes the drawer; presses on the panel itself
/// are swallowed.
pub fn drawer(nav: &[NavLink]) -> Element<'_, Message> {
    let links = Column::with_children(nav.iter().map(drawer_link))
        .spacing(12)
        .padding(24);

    let panel = container(links)
        .width(Length::Fixed(280.0))
        .height(Length::Fill)
        .style(super::panel);

    opaque(
        mouse_area(
            container(row![horizontal_space(), opaque(panel)])
                .width(Length::Fill)
                .height(Length::Fill)
                .style(super::backdrop),
        )
        .on_press(Message::MenuOverlayPressed),
    )
}

/// Bar with the back-to-top button, shown once the page has scrolled
pub fn back_to_top<'a>() -> Element<'a, Message> {
    container(
        button(text("↑ Back to top"))
            .on_press(Message::BackToTop)
            .style(button::secondary),
    )
    .width(Length::Fill)
    .align_x(Horizontal::Right)
    .padding(10)
    .into()
}
