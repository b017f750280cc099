use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ContactConfig;
use crate::error::ContactFormError;
use crate::timers::{FiredTimer, Scheduler, TimerGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Inverse of [`ContactField::name`], for hosts resolving form targets.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Field after this one in tab order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Subject,
            Self::Subject => Self::Message,
            Self::Message => Self::Name,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Your Email",
            Self::Subject => "Subject",
            Self::Message => "Your Message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn validate(&self) -> Result<(), ContactFormError> {
        for field in ContactField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(ContactFormError::MissingField(field.name()));
            }
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactFormError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// `local@domain.tld`, no whitespace, one `@`.
fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || s.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Confirmation shown after a (simulated) submission completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn message_sent() -> Self {
        Self {
            title: "Message Sent Successfully!".into(),
            description: "Thank you for reaching out. I'll get back to you soon.".into(),
        }
    }
}

/// Contact form with a fake asynchronous submit.
///
/// Nothing leaves the process: `submit` arms a one-shot timer standing in for
/// network latency, and when it fires the form is cleared and a [`Toast`] is
/// returned.
#[derive(Debug)]
pub struct ContactForm {
    fields: ContactFields,
    submit_delay_ms: u64,
    scheduler: Scheduler,
    in_flight: Option<TimerGuard>,
    last_error: Option<ContactFormError>,
}

impl ContactForm {
    pub fn new(scheduler: &Scheduler, config: ContactConfig) -> Self {
        Self {
            fields: ContactFields::default(),
            submit_delay_ms: config.submit_delay_ms,
            scheduler: scheduler.clone(),
            in_flight: None,
            last_error: None,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Direct access for hosts that edit text in place.
    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        self.last_error = None;
        self.fields.get_mut(field)
    }

    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
        self.last_error = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&ContactFormError> {
        self.last_error.as_ref()
    }

    pub fn submit(&mut self, now_ms: u64) -> Result<(), ContactFormError> {
        let result = self.try_submit(now_ms);
        self.last_error = result.as_ref().err().cloned();
        result
    }

    fn try_submit(&mut self, now_ms: u64) -> Result<(), ContactFormError> {
        if self.in_flight.is_some() {
            return Err(ContactFormError::AlreadySubmitting);
        }
        self.fields.validate()?;
        info!(subject = %self.fields.subject, "sending contact message");
        self.in_flight = Some(self.scheduler.set_timeout(self.submit_delay_ms, now_ms));
        Ok(())
    }

    pub fn owns(&self, fired: &FiredTimer) -> bool {
        self.in_flight.as_ref().is_some_and(|g| g.id() == fired.id)
    }

    /// Complete the submission if `fired` is its timer.
    pub fn on_timer(&mut self, fired: FiredTimer) -> Option<Toast> {
        if !self.owns(&fired) {
            return None;
        }
        self.in_flight = None;
        self.fields = ContactFields::default();
        info!("contact message sent");
        Some(Toast::message_sent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(form: &mut ContactForm) {
        form.set_field(ContactField::Name, "Ada");
        form.set_field(ContactField::Email, "ada@example.com");
        form.set_field(ContactField::Subject, "Hello");
        form.set_field(ContactField::Message, "Let's build something.");
    }

    #[test]
    fn field_names_resolve_back() {
        for field in ContactField::ALL {
            assert_eq!(ContactField::from_name(field.name()), Some(field));
        }
        assert_eq!(ContactField::from_name("phone"), None);
        assert_eq!(ContactField::Message.next(), ContactField::Name);
    }

    #[test]
    fn every_field_is_required() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::new(&scheduler, ContactConfig::default());
        assert_eq!(
            form.submit(0),
            Err(ContactFormError::MissingField("name"))
        );
        filled(&mut form);
        form.set_field(ContactField::Subject, "   ");
        assert_eq!(
            form.submit(0),
            Err(ContactFormError::MissingField("subject"))
        );
        assert_eq!(form.last_error(), Some(&ContactFormError::MissingField("subject")));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com", "a@b@c.d"] {
            let fields = ContactFields {
                name: "n".into(),
                email: bad.into(),
                subject: "s".into(),
                message: "m".into(),
            };
            assert!(
                matches!(fields.validate(), Err(ContactFormError::InvalidEmail(_))),
                "{bad} accepted"
            );
        }
        assert!(looks_like_email("ada@mail.example.com"));
    }

    #[test]
    fn submission_completes_after_delay() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::new(&scheduler, ContactConfig::default());
        filled(&mut form);
        form.submit(1_000).unwrap();
        assert!(form.is_submitting());
        assert!(scheduler.pop_due(2_999).is_none());

        let fired = scheduler.pop_due(3_000).unwrap();
        let toast = form.on_timer(fired).unwrap();
        assert_eq!(toast.title, "Message Sent Successfully!");
        assert!(!form.is_submitting());
        assert_eq!(form.fields(), &ContactFields::default());
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::new(&scheduler, ContactConfig::default());
        filled(&mut form);
        form.submit(0).unwrap();
        assert_eq!(form.submit(10), Err(ContactFormError::AlreadySubmitting));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn dropping_form_cancels_submission() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::new(&scheduler, ContactConfig::default());
        filled(&mut form);
        form.submit(0).unwrap();
        drop(form);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn editing_clears_last_error() {
        let scheduler = Scheduler::new();
        let mut form = ContactForm::new(&scheduler, ContactConfig::default());
        assert!(form.submit(0).is_err());
        form.field_mut(ContactField::Name).push('A');
        assert_eq!(form.last_error(), None);
        assert_eq!(form.fields().name, "A");
    }
}
