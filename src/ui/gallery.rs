use iced::widget::{button, column, image, text, Row};
use iced::{Background, Border, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use crate::state::data::{FilterButton, GalleryItem, SiteContent};
use crate::state::filter::{Category, Presence};
use crate::state::ViewStateController;
use crate::Message;

const CARD_WIDTH: f32 = 260.0;
const THUMB_HEIGHT: f32 = 180.0;

/// Opacity of a card while it fades out of the grid
const FADED: f32 = 0.35;

/// Filter buttons above a wrapping grid of cards.
///
/// Items no longer in the layout are skipped; items mid-fade are drawn
/// dimmed in their old place.
pub fn view<'a>(content: &'a SiteContent, gallery: &'a ViewStateController) -> Element<'a, Message> {
    if gallery.items().is_empty() {
        return text("No photographs yet.").into();
    }

    let filters = Row::with_children(
        content
            .filters
            .iter()
            .map(|filter| filter_button(filter, gallery)),
    )
    .spacing(8);

    let cards: Vec<Element<'a, Message>> = gallery
        .items()
        .iter()
        .enumerate()
        .filter(|(index, _)| gallery.in_layout(*index))
        .map(|(index, item)| card(content, index, item, gallery.presence(index)))
        .collect();

    column![
        filters,
        Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0),
    ]
    .spacing(20)
    .into()
}

fn filter_button<'a>(filter: &'a FilterButton, gallery: &ViewStateController) -> Element<'a, Message> {
    let category = Category::from_filter(&filter.filter);
    let style: fn(&Theme, button::Status) -> button::Style = if gallery.is_filter_active(&category) {
        button::primary
    } else {
        button::secondary
    };

    button(text(filter.label.as_str()))
        .on_press(Message::FilterSelected(category))
        .style(style)
        .into()
}

fn card<'a>(
    content: &'a SiteContent,
    index: usize,
    item: &'a GalleryItem,
    presence: Option<Presence>,
) -> Element<'a, Message> {
    let fading = matches!(presence, Some(Presence::FadingOut { .. }));
    let opacity = if fading { FADED } else { 1.0 };

    let thumbnail = image(image::Handle::from_path(content.resolve_asset(&item.image.src)))
        .width(Length::Fixed(CARD_WIDTH))
        .height(Length::Fixed(THUMB_HEIGHT))
        .content_fit(ContentFit::Cover)
        .opacity(opacity);

    let title = if item.image.title.is_empty() {
        item.image.alt_text.as_str()
    } else {
        item.image.title.as_str()
    };

    button(
        column![
            thumbnail,
            text(title).size(16),
            text(item.category.as_str()).size(12),
        ]
        .spacing(6)
        .width(Length::Fixed(CARD_WIDTH)),
    )
    .on_press(Message::GalleryItemPressed(index))
    .style(move |theme: &Theme, status| card_style(theme, status, opacity))
    .padding(8)
    .into()
}

fn card_style(theme: &Theme, status: button::Status, opacity: f32) -> button::Style {
    let palette = theme.extended_palette();
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => palette.background.weak.color,
        _ => palette.background.base.color,
    };

    button::Style {
        background: Some(Background::Color(background.scale_alpha(opacity))),
        text_color: palette.background.base.text.scale_alpha(opacity),
        border: Border {
            radius: 6.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}
