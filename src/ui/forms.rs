use iced::widget::{button, column, text, text_input, Column, Space};
use iced::{Element, Theme};

use crate::state::forms::{Field, Form, FormKind, SubmitStatus};
use crate::Message;

/// A form's fields with inline messages, the submit button and the outcome
pub fn view(form: &Form) -> Element<'_, Message> {
    let kind = form.kind();
    let fields = Column::with_children(
        form.fields()
            .iter()
            .enumerate()
            .map(|(index, field)| field_view(kind, index, field)),
    )
    .spacing(12);

    let submitting = *form.status() == SubmitStatus::Submitting;
    let label = match (kind, submitting) {
        (_, true) => "Sending…",
        (FormKind::Contact, false) => "Send message",
        (FormKind::Donation, false) => "Donate",
    };
    let submit = button(text(label))
        .on_press_maybe((!submitting).then_some(Message::FormSubmitted(kind)))
        .style(button::primary)
        .padding([8, 20]);

    let outcome: Element<'_, Message> = match form.status() {
        SubmitStatus::Done { success: true, at } => text(format!(
            "Thank you! Received {}.",
            at.format("%d %b %Y %H:%M")
        ))
        .color(super::SUCCESS)
        .into(),
        SubmitStatus::Done { success: false, .. } => {
            text("Sorry, that did not go through. Please try again.")
                .color(super::ERROR)
                .into()
        }
        SubmitStatus::Idle | SubmitStatus::Submitting => Space::with_height(0.0).into(),
    };

    column![fields, submit, outcome]
        .spacing(16)
        .max_width(520.0)
        .into()
}

fn field_view(form: FormKind, index: usize, field: &Field) -> Element<'_, Message> {
    let invalid = field.error().is_some();

    let input = text_input(field.label, field.value())
        .on_input(move |value| Message::FieldEdited(form, index, value))
        .on_submit(Message::FormSubmitted(form))
        .padding(8)
        .style(move |theme: &Theme, status| {
            let mut style = text_input::default(theme, status);
            if invalid {
                style.border.color = super::ERROR;
            }
            style
        });

    let mut group = column![text(field.label).size(14), input].spacing(4);
    if let Some(error) = field.error() {
        group = group.push(text(error.to_string()).size(12).color(super::ERROR));
    }
    group.into()
}
