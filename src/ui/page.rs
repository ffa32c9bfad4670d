use iced::widget::{column, container, text};
use iced::{Element, Length};

use crate::state::data::Section;
use crate::Message;

/// One fixed-height page section: heading, body text and optional content
pub fn section<'a>(section: &'a Section, extra: Option<Element<'a, Message>>) -> Element<'a, Message> {
    let mut body = column![text(section.title.as_str()).size(32)]
        .spacing(12)
        .max_width(1000.0);

    if !section.body.is_empty() {
        body = body.push(text(section.body.as_str()).size(16));
    }
    if let Some(extra) = extra {
        body = body.push(extra);
    }

    container(body)
        .center_x(Length::Fill)
        .height(Length::Fixed(section.height))
        .padding([32, 24])
        .clip(true)
        .into()
}
