//! Rehearsal CLI: generate a batch of GPSR commands and rephrase them
//! against a chat endpoint.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use colored::Colorize;
use rand::seq::SliceRandom;
use tracing_subscriber::EnvFilter;

use gpsr_application::OperationController;
use gpsr_core::command::{Category, CommandRecord};
use gpsr_core::config::LlmConfig;
use gpsr_core::error::GpsrError;
use gpsr_core::service::CommandGenerator;
use gpsr_core::session::SessionStore;
use gpsr_interaction::Paraphraser;

#[derive(Parser)]
#[command(name = "gpsr")]
#[command(about = "GPSR command rehearsal for robot competitions", long_about = None)]
struct Cli {
    /// Full URL to an OpenAI-compatible chat API
    #[arg(short = 'u', long, conflicts_with_all = ["host", "port"])]
    url: Option<String>,

    /// LLM host
    #[arg(long, default_value = "rhenium")]
    host: String,

    /// LLM port
    #[arg(long, default_value_t = 9091)]
    port: u16,

    /// LLM API key
    #[arg(short = 'a', long = "api-key", default_value = "tiago")]
    api_key: String,

    /// Number of commands to generate (1-5)
    #[arg(short = 'n', long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    count: u8,

    /// Skip the rephrasing pass (no network access needed)
    #[arg(long)]
    no_rephrase: bool,
}

const PEOPLE_COMMANDS: &[&str] = &[
    "Follow Adel from the bookshelf to the office",
    "Tell the gesture of the person at the kitchen table to the person at the bed",
    "Greet the person waving at the entrance and guide them to the sofa",
];

const OBJECT_COMMANDS: &[&str] = &[
    "Please fetch me a coke from the living room table",
    "Tell me what is the smallest food on the sink",
    "Bring the tray from the kitchen counter to the dining table",
];

const GENERIC_COMMANDS: &[&str] = &[
    "Go to the bedroom and report how many pillows are on the bed",
    "Meet Robin at the door and answer their question",
];

/// Stand-in for the grammar engine: canned commands per category, so the
/// rehearsal flow runs without the competition data files.
struct FixtureGenerator;

#[async_trait]
impl CommandGenerator for FixtureGenerator {
    async fn generate(&self, category: Category) -> gpsr_core::Result<String> {
        let pool = match category {
            Category::People => PEOPLE_COMMANDS,
            Category::Objects => OBJECT_COMMANDS,
            Category::Unspecified => GENERIC_COMMANDS,
        };
        let pick = pool
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| GpsrError::generator("empty command pool"))?;
        Ok((*pick).to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli, LlmConfig::try_from_env());

    let store = SessionStore::new();
    let controller = OperationController::new(
        Arc::clone(&store),
        Arc::new(FixtureGenerator),
        Arc::new(Paraphraser::new(&config)),
    );

    println!("{}", format!("Generating {} commands...", cli.count).yellow());
    let report = controller.generate_batch(usize::from(cli.count)).await;
    if !report.is_success() {
        eprintln!("{}", "GENERATOR ERROR".red());
    }
    print_session(&store.snapshot().await);

    if !cli.no_rephrase {
        println!("{}", "Rephrasing commands...".yellow());
        let report = controller.rephrase_all().await;
        if report.is_success() {
            println!("{}", "Done".green());
        } else {
            eprintln!("{}", "LLM ERROR".red());
        }
        print_session(&store.snapshot().await);
    }

    Ok(())
}

/// Endpoint priority: explicit `--url`, then the environment, then the
/// `--host`/`--port` defaults.
fn resolve_config(cli: &Cli, env: Option<LlmConfig>) -> LlmConfig {
    if let Some(url) = &cli.url {
        return LlmConfig::new(url.clone(), cli.api_key.clone());
    }
    if let Some(config) = env {
        return config;
    }
    LlmConfig::for_host(&cli.host, cli.port, cli.api_key.clone())
}

fn print_session(records: &[CommandRecord]) {
    for (i, record) in records.iter().enumerate() {
        println!(
            "{} ({}) {}",
            format!("[{i}]").bold(),
            record.kind,
            record.command.cyan()
        );
        for (n, phrasing) in record.phrasings.iter().enumerate() {
            println!("    {n}: {phrasing}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_outside_one_to_five_is_rejected() {
        assert!(Cli::try_parse_from(["gpsr", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["gpsr", "-n", "6"]).is_err());
        let cli = Cli::try_parse_from(["gpsr", "-n", "5"]).unwrap();
        assert_eq!(cli.count, 5);
    }

    #[test]
    fn count_defaults_to_three() {
        let cli = Cli::try_parse_from(["gpsr"]).unwrap();
        assert_eq!(cli.count, 3);
    }

    #[test]
    fn url_flag_conflicts_with_host_and_port() {
        assert!(Cli::try_parse_from(["gpsr", "-u", "http://x/v1", "--host", "y"]).is_err());
        assert!(Cli::try_parse_from(["gpsr", "-u", "http://x/v1", "--port", "1"]).is_err());
    }

    #[test]
    fn explicit_url_wins_over_environment() {
        let cli = Cli::try_parse_from(["gpsr", "-u", "http://flag:1/v1/chat/completions"]).unwrap();
        let env = Some(LlmConfig::new("http://env:2/v1/chat/completions", "env-key"));
        let config = resolve_config(&cli, env);
        assert_eq!(config.endpoint, "http://flag:1/v1/chat/completions");
        assert_eq!(config.api_key, "tiago");
    }

    #[test]
    fn environment_wins_over_host_defaults() {
        let cli = Cli::try_parse_from(["gpsr"]).unwrap();
        let env = Some(LlmConfig::new("http://env:2/v1/chat/completions", "env-key"));
        let config = resolve_config(&cli, env);
        assert_eq!(config.endpoint, "http://env:2/v1/chat/completions");
        assert_eq!(config.api_key, "env-key");
    }

    #[test]
    fn host_defaults_apply_without_url_or_environment() {
        let cli = Cli::try_parse_from(["gpsr"]).unwrap();
        let config = resolve_config(&cli, None);
        assert_eq!(config.endpoint, "http://rhenium:9091/v1/chat/completions");
        assert_eq!(config.api_key, "tiago");
    }
}
