use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::env;
use std::sync::Mutex;

/// Enables the scripted prompter
pub const TEST_MODE_ENV: &str = "FOLIO_TEST_MODE";
/// Comma-separated menu indices for the scripted prompter
pub const MOCK_SELECT_ENV: &str = "FOLIO_MOCK_SELECT";
/// Comma-separated text answers for the scripted prompter; empty entries are kept
pub const MOCK_INPUT_ENV: &str = "FOLIO_MOCK_INPUT";

pub trait Prompter {
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;
    fn input(&self, prompt: &str) -> Result<String>;
}

/// Prompter for the current run: scripted under test mode, interactive otherwise
pub fn from_env() -> Box<dyn Prompter> {
    if env::var(TEST_MODE_ENV).is_ok_and(|v| v == "1") {
        let select = env::var(MOCK_SELECT_ENV).unwrap_or_default();
        let input = env::var(MOCK_INPUT_ENV).unwrap_or_default();
        Box::new(TestPrompter::new(&select, &input))
    } else {
        Box::new(RealPrompter)
    }
}

pub struct RealPrompter;

impl Prompter for RealPrompter {
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::with_theme(&theme())
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .context("Failed to interact with select prompt")
    }

    fn input(&self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&theme())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")
    }
}

pub struct TestPrompter {
    select_responses: Mutex<Vec<usize>>,
    input_responses: Mutex<Vec<String>>,
}

impl TestPrompter {
    pub fn new(select_csv: &str, input_csv: &str) -> Self {
        let select_responses = select_csv
            .split(',')
            .filter_map(|s| s.trim().parse::<usize>().ok())
            .collect::<Vec<_>>();

        // Blank answers matter here: they are how a test leaves a field empty
        let input_responses = if input_csv.is_empty() {
            Vec::new()
        } else {
            input_csv.split(',').map(|s| s.trim().to_string()).collect()
        };

        Self {
            select_responses: Mutex::new(select_responses),
            input_responses: Mutex::new(input_responses),
        }
    }
}

impl Prompter for TestPrompter {
    fn select(&self, prompt: &str, items: &[&str], _default: usize) -> Result<usize> {
        let mut responses = self
            .select_responses
            .lock()
            .map_err(|_| anyhow::anyhow!("mock select responses poisoned"))?;
        if responses.is_empty() {
            anyhow::bail!("No more mock select responses for prompt: {}", prompt);
        }
        let response = responses.remove(0);
        if response >= items.len() {
            anyhow::bail!(
                "Mock select response {} out of bounds for prompt: {}",
                response,
                prompt
            );
        }
        Ok(response)
    }

    fn input(&self, prompt: &str) -> Result<String> {
        let mut responses = self
            .input_responses
            .lock()
            .map_err(|_| anyhow::anyhow!("mock input responses poisoned"))?;
        if responses.is_empty() {
            anyhow::bail!("No more mock input responses for prompt: {}", prompt);
        }
        Ok(responses.remove(0))
    }
}

fn theme() -> ColorfulTheme {
    ColorfulTheme {
        active_item_style: console::Style::new().bold(),
        active_item_prefix: style("▸ ".to_string()).bold(),
        inactive_item_prefix: style("  ".to_string()),
        ..ColorfulTheme::default()
    }
}
