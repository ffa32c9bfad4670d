use iced::widget::{button, center, column, container, horizontal_space, image, mouse_area, opaque, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::data::{ImageRef, SiteContent};
use crate::state::lightbox::Direction;
use crate::Message;

/// Full-window overlay showing one enlarged image.
///
/// Presses on the backdrop dismiss the lightbox; the inner `opaque` keeps
/// presses on the panel from reaching the backdrop.
pub fn view<'a>(
    content: &'a SiteContent,
    image_ref: &'a ImageRef,
    index: usize,
    count: usize,
) -> Element<'a, Message> {
    let close = button(text("×").size(28))
        .on_press(Message::LightboxClosed)
        .style(button::text);

    let picture = image(image::Handle::from_path(content.resolve_asset(&image_ref.src)))
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fixed(480.0));

    let mut caption = column![].spacing(4);
    if !image_ref.title.is_empty() {
        caption = caption.push(text(image_ref.title.as_str()).size(20));
    }
    caption = caption.push(text(image_ref.alt_text.as_str()).size(13));
    if !image_ref.description.is_empty() {
        caption = caption.push(text(image_ref.description.as_str()).size(15));
    }

    let controls = row![
        button(text("❮"))
            .on_press(Message::LightboxStep(Direction::Prev))
            .style(button::secondary),
        horizontal_space(),
        text(format!("{} / {}", index + 1, count)),
        horizontal_space(),
        button(text("❯"))
            .on_press(Message::LightboxStep(Direction::Next))
            .style(button::secondary),
    ]
    .align_y(Alignment::Center);

    let panel = container(
        column![row![horizontal_space(), close], picture, caption, controls]
            .spacing(12)
            .padding(20),
    )
    .max_width(900.0)
    .style(super::panel);

    opaque(
        mouse_area(center(opaque(panel)).style(super::backdrop))
            .on_press(Message::LightboxOverlayPressed),
    )
}
