use anyhow::Result;
use colored::Colorize;
use folio_core::{ContactForm, Field, SubmitRejected, SubmitTicket};
use std::cell::RefCell;
use std::time::Duration;
use tracing::debug;

use crate::prompt::Prompter;

const RETRY_OPTIONS: [&str; 2] = ["Fix and resend", "Cancel"];

/// Outcome of one run of the contact flow
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Sent { name: String },
    Cancelled,
}

/// Fill in the form, then run the simulated send.
///
/// Rejected submits offer to re-enter the fields that caused the rejection.
pub async fn run(prompter: &dyn Prompter, delay: Duration) -> Result<Outcome> {
    let form = RefCell::new(ContactForm::new());
    let mut pending: Vec<Field> = Field::ALL.to_vec();

    loop {
        for field in &pending {
            let value = prompter.input(&field.to_string())?;
            form.borrow_mut().set(*field, value);
        }

        let attempt = form.borrow_mut().begin_submit();
        match attempt {
            Ok(ticket) => {
                println!("{}", "Sending...".dimmed());
                let name = deliver(&form, ticket, delay).await;
                println!(
                    "{}",
                    format!("Message sent! Thanks, {}. I'll get back to you soon.", name).green()
                );
                return Ok(Outcome::Sent { name });
            }
            Err(rejected) => {
                println!("{}", rejected.to_string().red());
                pending = match rejected {
                    SubmitRejected::MissingFields(fields) => fields,
                    SubmitRejected::InvalidEmail => vec![Field::Email],
                    SubmitRejected::AlreadySubmitting => Vec::new(),
                };
                if prompter.select("What would you like to do?", &RETRY_OPTIONS, 0)? != 0 {
                    println!("{}", "Cancelled.".red());
                    return Ok(Outcome::Cancelled);
                }
            }
        }
    }
}

/// Wait out the simulated send, then reset the form and return the sender's
/// name. The form stays locked until the delay has elapsed.
async fn deliver(form: &RefCell<ContactForm>, ticket: SubmitTicket, delay: Duration) -> String {
    let name = form.borrow().name.trim().to_string();
    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    debug!(delay_ms, "simulating send");
    tokio::time::sleep(delay).await;
    form.borrow_mut().finish_submit(ticket);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::TestPrompter;

    #[tokio::test]
    async fn test_complete_form_is_sent() {
        let prompter = TestPrompter::new("", "Ada,ada@example.com,Hi,Hello there");
        let outcome = run(&prompter, Duration::ZERO).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Sent {
                name: "Ada".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_only_missing_fields_are_asked_again() {
        // Message left blank, then supplied on retry
        let prompter = TestPrompter::new("0", "Ada,ada@example.com,Hi,,Later then");
        let outcome = run(&prompter, Duration::ZERO).await.unwrap();
        assert!(matches!(outcome, Outcome::Sent { .. }));
    }

    #[tokio::test]
    async fn test_invalid_email_then_cancel() {
        let prompter = TestPrompter::new("1", "Ada,nope,Hi,Hello");
        let outcome = run(&prompter, Duration::ZERO).await.unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_form_stays_locked_until_delay_elapses() {
        let form = RefCell::new(ContactForm::new());
        {
            let mut f = form.borrow_mut();
            f.set(Field::Name, "Ada");
            f.set(Field::Email, "ada@example.com");
            f.set(Field::Subject, "Hi");
            f.set(Field::Message, "Hello there");
        }
        let ticket = form.borrow_mut().begin_submit().unwrap();
        assert!(form.borrow().is_submitting());
        assert!(!form.borrow().can_submit());

        let delivery = deliver(&form, ticket, Duration::from_secs(2));
        tokio::pin!(delivery);

        let early = tokio::time::timeout(Duration::from_millis(1900), &mut delivery).await;
        assert!(early.is_err());
        assert!(form.borrow().is_submitting());
        assert!(!form.borrow().can_submit());
        assert_eq!(form.borrow().message, "Hello there");

        let name = tokio::time::timeout(Duration::from_millis(200), &mut delivery)
            .await
            .unwrap();
        assert_eq!(name, "Ada");
        let f = form.borrow();
        assert!(!f.is_submitting());
        assert!(f.can_submit());
        assert_eq!(*f, ContactForm::new());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_for_the_full_delay() {
        let prompter = TestPrompter::new("", "Ada,ada@example.com,Hi,Hello there");
        let started = tokio::time::Instant::now();
        let outcome = run(&prompter, Duration::from_secs(2)).await.unwrap();
        assert!(matches!(outcome, Outcome::Sent { .. }));
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_runs_out_of_answers() {
        let prompter = TestPrompter::new("", "Ada");
        assert!(run(&prompter, Duration::ZERO).await.is_err());
    }
}
