/// Contact and donation forms: field validation and the submit flow
///
/// Validation runs on submit. A field flagged invalid is re-checked on every
/// edit so its message disappears as soon as the value becomes valid.
/// Submission goes through a mock gateway that only reports success or
/// failure; nothing is sent anywhere.

use chrono::{DateTime, Local};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Donations above this are declined by the mock gateway
const DONATION_LIMIT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    /// A positive amount of money
    Amount,
}

/// Why a field was rejected; the display text is the inline message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid amount")]
    InvalidAmount,
}

/// Local part, "@", then a domain with a dot that has text on both sides.
/// No whitespace (the byte-order mark counts) and no second "@" anywhere.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(|c| c.is_whitespace() || c == '\u{FEFF}') {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn is_valid_amount(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|amount| amount.is_finite() && amount > 0.0)
        .unwrap_or(false)
}

/// Check a single value. Empty optional fields are always valid.
pub fn validate_value(kind: FieldKind, required: bool, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return if required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }

    match kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        FieldKind::Amount if !is_valid_amount(value) => Err(FieldError::InvalidAmount),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    value: String,
    error: Option<FieldError>,
}

impl Field {
    fn new(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            label,
            kind,
            required,
            value: String::new(),
            error: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<FieldError> {
        self.error
    }

    fn validate(&mut self) -> bool {
        self.error = validate_value(self.kind, self.required, &self.value).err();
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Donation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Done { success: bool, at: DateTime<Local> },
}

/// The values handed to the gateway
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub form: FormKind,
    pub values: Vec<(&'static str, String)>,
}

impl Submission {
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    kind: FormKind,
    fields: Vec<Field>,
    status: SubmitStatus,
}

impl Form {
    pub fn contact() -> Self {
        Self::with_fields(
            FormKind::Contact,
            vec![
                Field::new("name", "Name", FieldKind::Text, true),
                Field::new("email", "Email", FieldKind::Email, true),
                Field::new("message", "Message", FieldKind::Text, true),
            ],
        )
    }

    pub fn donation() -> Self {
        Self::with_fields(
            FormKind::Donation,
            vec![
                Field::new("name", "Full name", FieldKind::Text, true),
                Field::new("email", "Email", FieldKind::Email, true),
                Field::new("amount", "Amount (USD)", FieldKind::Amount, true),
            ],
        )
    }

    fn with_fields(kind: FormKind, fields: Vec<Field>) -> Self {
        Self {
            kind,
            fields,
            status: SubmitStatus::Idle,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    /// Update a field; a flagged field is re-validated so a fixed value
    /// clears its message
    pub fn on_input(&mut self, index: usize, value: String) {
        if matches!(self.status, SubmitStatus::Done { .. }) {
            self.status = SubmitStatus::Idle;
        }
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value;
            if field.error.is_some() {
                field.validate();
            }
        }
    }

    /// Flag every field; returns whether the form may be submitted
    pub fn validate(&mut self) -> bool {
        self.fields
            .iter_mut()
            .fold(true, |valid, field| field.validate() && valid)
    }

    /// Validate and move to `Submitting`.
    ///
    /// Returns `None` when the submit is suppressed: a field is invalid or a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.status == SubmitStatus::Submitting {
            return None;
        }
        if !self.validate() {
            info!(form = ?self.kind, "submit blocked by invalid fields");
            return None;
        }

        self.status = SubmitStatus::Submitting;
        Some(Submission {
            form: self.kind,
            values: self
                .fields
                .iter()
                .map(|field| (field.name, field.value.trim().to_string()))
                .collect(),
        })
    }

    /// Record the gateway's answer; a success clears the form
    pub fn finish_submit(&mut self, success: bool) {
        if success {
            for field in &mut self.fields {
                field.value.clear();
                field.error = None;
            }
        }
        self.status = SubmitStatus::Done {
            success,
            at: Local::now(),
        };
    }
}

/// Mock contact/donation gateway.
///
/// Waits `delay` and reports success, except for donations above the limit.
pub async fn send(submission: Submission, delay: Duration) -> bool {
    tokio::time::sleep(delay).await;

    let accepted = match submission.form {
        FormKind::Contact => true,
        FormKind::Donation => submission
            .value("amount")
            .and_then(|amount| amount.parse::<f64>().ok())
            .is_some_and(|amount| amount <= DONATION_LIMIT),
    };

    if accepted {
        info!(form = ?submission.form, "submission accepted");
    } else {
        warn!(form = ?submission.form, "submission declined");
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut Form, values: &[&str]) {
        for (index, value) in values.iter().enumerate() {
            form.on_input(index, value.to_string());
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(is_valid_email("a@b.c.d"));

        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b.co "));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b@c.co"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_rejects_byte_order_mark() {
        assert!(!is_valid_email("a\u{FEFF}b@c.co"));
        assert!(!is_valid_email("a@b.co\u{FEFF}"));
        assert_eq!(
            validate_value(FieldKind::Email, true, "\u{FEFF}a@b.co"),
            Err(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn test_required_and_optional_empty_values() {
        assert_eq!(validate_value(FieldKind::Text, true, ""), Err(FieldError::Required));
        assert_eq!(validate_value(FieldKind::Email, true, "   "), Err(FieldError::Required));
        assert_eq!(validate_value(FieldKind::Email, false, ""), Ok(()));
        assert_eq!(
            validate_value(FieldKind::Email, false, "a@b"),
            Err(FieldError::InvalidEmail)
        );
    }

    #[test]
    fn test_amount_must_be_positive_number() {
        assert_eq!(validate_value(FieldKind::Amount, true, "25"), Ok(()));
        assert_eq!(validate_value(FieldKind::Amount, true, " 12.50 "), Ok(()));
        for bad in ["0", "-5", "ten", "NaN", "inf"] {
            assert_eq!(
                validate_value(FieldKind::Amount, true, bad),
                Err(FieldError::InvalidAmount),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(
            FieldError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_invalid_form_suppresses_submit() {
        let mut form = Form::contact();
        fill(&mut form, &["Ada", "ada@example", "Hello"]);

        assert!(form.begin_submit().is_none());
        assert_eq!(form.status(), &SubmitStatus::Idle);
        assert_eq!(form.fields()[0].error(), None);
        assert_eq!(form.fields()[1].error(), Some(FieldError::InvalidEmail));
    }

    #[test]
    fn test_every_invalid_field_is_flagged() {
        let mut form = Form::donation();
        assert!(!form.validate());
        assert!(form.fields().iter().all(|f| f.error() == Some(FieldError::Required)));
    }

    #[test]
    fn test_error_clears_on_valid_input() {
        let mut form = Form::contact();
        form.validate();
        assert_eq!(form.fields()[1].error(), Some(FieldError::Required));

        form.on_input(1, "ada@".to_string());
        assert_eq!(form.fields()[1].error(), Some(FieldError::InvalidEmail));
        form.on_input(1, "ada@example.org".to_string());
        assert_eq!(form.fields()[1].error(), None);
    }

    #[test]
    fn test_untouched_field_is_not_flagged_while_typing() {
        let mut form = Form::contact();
        form.on_input(1, "a".to_string());
        assert_eq!(form.fields()[1].error(), None);
    }

    #[test]
    fn test_submit_flow() {
        let mut form = Form::donation();
        fill(&mut form, &["Ada Lovelace", "ada@example.org", "50"]);

        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.form, FormKind::Donation);
        assert_eq!(submission.value("amount"), Some("50"));
        assert_eq!(form.status(), &SubmitStatus::Submitting);

        // A second submit while in flight is ignored
        assert!(form.begin_submit().is_none());

        form.finish_submit(true);
        assert!(matches!(form.status(), SubmitStatus::Done { success: true, .. }));
        assert!(form.fields().iter().all(|f| f.value().is_empty()));

        form.on_input(0, "B".to_string());
        assert_eq!(form.status(), &SubmitStatus::Idle);
    }

    #[test]
    fn test_failed_submit_keeps_values() {
        let mut form = Form::contact();
        fill(&mut form, &["Ada", "ada@example.org", "Hi"]);
        form.begin_submit().unwrap();

        form.finish_submit(false);
        assert!(matches!(form.status(), SubmitStatus::Done { success: false, .. }));
        assert_eq!(form.fields()[0].value(), "Ada");
    }

    #[tokio::test]
    async fn test_gateway_declines_oversized_donation() {
        let mut form = Form::donation();
        fill(&mut form, &["Ada", "ada@example.org", "2000000"]);
        let large = form.begin_submit().unwrap();
        assert!(!send(large, Duration::ZERO).await);

        let mut form = Form::contact();
        fill(&mut form, &["Ada", "ada@example.org", "Hi"]);
        let contact = form.begin_submit().unwrap();
        assert!(send(contact, Duration::ZERO).await);
    }
}
