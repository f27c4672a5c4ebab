mod config;
mod contact;
mod preview;
mod prompt;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use folio_core::{Portfolio, Sections};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `FOLIO_LOG=folio_core=debug`
const LOG_ENV: &str = "FOLIO_LOG";
const CONTENT_ENV: &str = "FOLIO_CONTENT";

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about = "Preview and validate the folio portfolio site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Content file (overrides FOLIO_CONTENT and the config file)
    #[arg(long, global = true)]
    content: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the content and report every problem
    Check,
    /// Sample an animation timeline at a point in time
    Timeline {
        /// Timeline to sample: hero, or the name of a scroll reveal
        #[arg(short, long, default_value = "hero")]
        name: String,
        /// Seconds since the timeline started
        #[arg(long, default_value_t = 0.0)]
        at: f64,
        /// Print the frame as JSON
        #[arg(long)]
        json: bool,
        /// List the timeline names and exit
        #[arg(long)]
        list: bool,
    },
    /// Report the active section for a scroll offset
    Track {
        /// Scroll offset in pixels
        #[arg(long, allow_negative_numbers = true)]
        offset: f64,
        /// Stacked section heights, e.g. hero=900,about=800
        #[arg(long, default_value = preview::DEFAULT_LAYOUT)]
        layout: String,
        /// Viewport height in pixels
        #[arg(long, default_value_t = preview::DEFAULT_VIEWPORT)]
        viewport: f64,
        /// Fixed header height (overrides the config file and the content)
        #[arg(long)]
        header_offset: Option<f64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill in and send the contact form
    Contact {
        /// Simulated send time in milliseconds (defaults to the content setting)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Set a configuration value
    Set {
        /// The key to set (content, header-offset)
        key: String,
        /// The value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// The key to get (content, header-offset)
        key: String,
    },
    /// Show the config file path
    Path,
    /// Clear a configuration value
    Clear {
        /// The key to clear (content, header-offset)
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => handle_config(action),
        Commands::Check => {
            let (portfolio, source) = load_content(cli.content)?;
            check(&portfolio, &source)
        }
        Commands::Timeline {
            name,
            at,
            json,
            list,
        } => {
            let (portfolio, _) = load_content(cli.content)?;
            if list {
                for name in preview::timeline_names(&portfolio) {
                    println!("{}", name);
                }
                return Ok(());
            }
            let frame = preview::sample_timeline(&portfolio, &name, at)?;
            preview::print_frame(&frame, at, json)
        }
        Commands::Track {
            offset,
            layout,
            viewport,
            header_offset,
            json,
        } => {
            let (portfolio, _) = load_content(cli.content)?;
            let config = Config::load()?;
            let header_offset = header_offset
                .or(config.header_offset)
                .unwrap_or(portfolio.motion.header_offset);
            let layout = preview::parse_layout(&layout)?;
            let report = preview::track(
                Sections::portfolio(),
                &layout,
                viewport,
                header_offset,
                portfolio.motion.scroll_threshold,
                offset,
            );
            preview::print_track(&report, json)
        }
        Commands::Contact { delay_ms } => {
            let (portfolio, _) = load_content(cli.content)?;
            let delay = delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| portfolio.motion.submit_delay());
            let prompter = prompt::from_env();
            contact::run(prompter.as_ref(), delay).await?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Diagnostics go to stderr so stdout stays parseable with --json
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn handle_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{}", format!("{} set to: {}", key, value).green());
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key)? {
                Some(value) => println!("{}: {}", key, value),
                None => println!("{}", format!("{}: not set", key).dimmed()),
            }
        }
        ConfigAction::Path => {
            if let Some(path) = Config::path() {
                println!("{}", path.display());
            } else {
                bail!("Could not determine config path");
            }
        }
        ConfigAction::Clear { key } => {
            let mut config = Config::load()?;
            config.clear(&key)?;
            config.save()?;
            println!("{}", format!("{} cleared.", key).green());
        }
    }
    Ok(())
}

/// Where the content came from, for messages
fn describe(path: Option<&PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "built-in content".to_string(),
    }
}

/// Resolve and load content: CLI flag > env var > config file > built-in
fn load_content(cli_path: Option<PathBuf>) -> Result<(Portfolio, String)> {
    let env_path = env::var_os(CONTENT_ENV).map(PathBuf::from);
    let config = Config::load()?;
    let path = determine_content_path(cli_path, env_path, config.content);
    debug!(source = %describe(path.as_ref()), "loading content");

    let portfolio = match &path {
        Some(path) => Portfolio::load(path)?,
        None => Portfolio::builtin()?,
    };
    Ok((portfolio, describe(path.as_ref())))
}

/// Pure logic to determine content path precedence
fn determine_content_path(
    cli_path: Option<PathBuf>,
    env_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Option<PathBuf> {
    cli_path
        .or(env_path.filter(|p| !p.as_os_str().is_empty()))
        .or(config_path)
}

fn check(portfolio: &Portfolio, source: &str) -> Result<()> {
    println!("{}", format!("Checking {}", source).bold());
    println!(
        "{}",
        format!(
            "{} ({}): {} projects, {} skills in {} categories",
            portfolio.profile.name,
            portfolio.profile.role,
            portfolio.projects.len(),
            portfolio.skills.all().count(),
            portfolio.skills.categories.len()
        )
        .dimmed()
    );

    let problems = portfolio.validate();
    if problems.is_empty() {
        println!("{}", "Content is valid.".green());
        return Ok(());
    }

    for problem in &problems {
        eprintln!("  {} {}", "✗".red(), problem);
    }
    bail!("content has {} problem(s)", problems.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_content_path_precedence() {
        let cli = Some(PathBuf::from("cli.toml"));
        let env = Some(PathBuf::from("env.toml"));
        let config = Some(PathBuf::from("config.toml"));

        // CLI > Env > Config
        assert_eq!(
            determine_content_path(cli.clone(), env.clone(), config.clone()),
            cli
        );

        // Env > Config
        assert_eq!(
            determine_content_path(None, env.clone(), config.clone()),
            env
        );

        // Config only
        assert_eq!(determine_content_path(None, None, config.clone()), config);

        // Empty env var should be ignored
        assert_eq!(
            determine_content_path(None, Some(PathBuf::new()), config.clone()),
            config
        );

        // Built-in
        assert_eq!(determine_content_path(None, None, None), None);
    }

    #[test]
    fn test_check_builtin_passes() {
        let portfolio = Portfolio::builtin().unwrap();
        assert!(check(&portfolio, "built-in content").is_ok());
    }

    #[test]
    fn test_check_reports_problem_count() {
        let mut portfolio = Portfolio::builtin().unwrap();
        portfolio.about.paragraphs.clear();
        let err = check(&portfolio, "test").unwrap_err();
        assert_eq!(err.to_string(), "content has 1 problem(s)");
    }
}
