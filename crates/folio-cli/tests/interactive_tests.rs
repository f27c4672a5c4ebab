#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn folio(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_CONFIG_DIR", config_dir.path())
        .env_remove("FOLIO_CONTENT")
        .env("FOLIO_TEST_MODE", "1");
    cmd
}

#[test]
fn test_contact_sends_and_thanks() {
    let dir = TempDir::new().unwrap();
    let mut cmd = folio(&dir);
    cmd.env("FOLIO_MOCK_INPUT", "Ada,ada@example.com,Hello,Let's talk")
        .args(["contact", "--delay-ms", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sending..."))
        .stdout(predicate::str::contains("Message sent! Thanks, Ada."));
}

#[test]
fn test_contact_empty_message_then_retry() {
    let dir = TempDir::new().unwrap();
    let mut cmd = folio(&dir);
    cmd.env("FOLIO_MOCK_INPUT", "Ada,ada@example.com,Hello,,Second try")
        .env("FOLIO_MOCK_SELECT", "0") // Select "Fix and resend"
        .args(["contact", "--delay-ms", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Please fill out: Message"))
        .stdout(predicate::str::contains("Message sent!"));
}

#[test]
fn test_contact_invalid_email_cancel() {
    let dir = TempDir::new().unwrap();
    let mut cmd = folio(&dir);
    cmd.env("FOLIO_MOCK_INPUT", "Ada,ada.example.com,Hello,Hi")
        .env("FOLIO_MOCK_SELECT", "1") // Select "Cancel"
        .args(["contact", "--delay-ms", "0"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Please enter a valid email address"))
        .stdout(predicate::str::contains("Cancelled."))
        .stdout(predicate::str::contains("Message sent!").not());
}

#[test]
fn test_contact_fails_when_input_runs_out() {
    let dir = TempDir::new().unwrap();
    let mut cmd = folio(&dir);
    cmd.env("FOLIO_MOCK_INPUT", "Ada")
        .args(["contact", "--delay-ms", "0"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No more mock input responses"));
}
