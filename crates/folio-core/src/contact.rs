use std::fmt;
use std::time::Duration;

use tracing::debug;

/// How long the simulated send takes
pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Contact form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Value of the input's `name` attribute
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "Name"),
            Field::Email => write!(f, "Email"),
            Field::Subject => write!(f, "Subject"),
            Field::Message => write!(f, "Message"),
        }
    }
}

/// Why a submit did not start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Required fields left blank
    MissingFields(Vec<Field>),
    /// Email does not look like `local@domain`
    InvalidEmail,
    /// A submit is already in flight
    AlreadySubmitting,
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejected::MissingFields(fields) => {
                let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
                write!(f, "Please fill out: {}", names.join(", "))
            }
            SubmitRejected::InvalidEmail => write!(f, "Please enter a valid email address"),
            SubmitRejected::AlreadySubmitting => write!(f, "Your message is already being sent"),
        }
    }
}

impl std::error::Error for SubmitRejected {}

/// Proof that a submit was started; consumed when it finishes
#[derive(Debug)]
#[must_use = "a started submit has to be finished"]
pub struct SubmitTicket(());

/// Contact form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Fields that are empty or whitespace only
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.into_iter().all(|f| self.get(f).is_empty())
    }

    /// Validate and enter the submitting state
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::AlreadySubmitting);
        }
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(SubmitRejected::MissingFields(missing));
        }
        if !looks_like_email(&self.email) {
            return Err(SubmitRejected::InvalidEmail);
        }

        self.submitting = true;
        debug!("contact form submitting");
        Ok(SubmitTicket(()))
    }

    /// Complete a submit: clear every field and re-enable the form
    pub fn finish_submit(&mut self, _ticket: SubmitTicket) {
        *self = Self::default();
        debug!("contact form reset after submit");
    }
}

/// The shape an `<input type="email">` accepts: something, `@`, something,
/// no whitespace.
fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}
