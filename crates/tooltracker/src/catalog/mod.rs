use crate::api::ApiClient;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use tooltracker_core::dashboard::FetchOutcome;

pub mod show;
pub mod summary;
pub mod tools;

#[derive(Debug, clap::Parser)]
#[command(name = "catalog")]
#[command(about = "Direct catalog queries")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List tools, optionally filtered by category and pricing
    #[clap(name = "tools")]
    Tools(tools::ToolsOptions),

    /// List today's trending tools
    #[clap(name = "trending")]
    Trending(summary::SummaryOptions),

    /// Show aggregate catalog statistics
    #[clap(name = "stats")]
    Stats(summary::SummaryOptions),

    /// List categories with their tool counts
    #[clap(name = "categories")]
    Categories(summary::SummaryOptions),

    /// Show a single tool by ID
    #[clap(name = "show")]
    Show(show::ShowOptions),

    /// Check that the API is reachable and report its version
    #[clap(name = "ping")]
    Ping,
}

pub async fn run(app: App, client: ApiClient, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Tools(options) => tools::run(options, &client, global).await,
        Commands::Trending(options) => summary::run_trending(options, &client, global).await,
        Commands::Stats(options) => summary::run_stats(options, &client, global).await,
        Commands::Categories(options) => summary::run_categories(options, &client, global).await,
        Commands::Show(options) => show::run(options, &client, global).await,
        Commands::Ping => show::run_ping(&client, global).await,
    }
}

/// Unwrap a degraded read, telling the user on stderr when the default was used.
pub(crate) fn report<T>(what: &str, outcome: FetchOutcome<T>) -> T {
    let (value, error) = outcome.into_parts();
    if let Some(error) = error {
        eprintln!(
            "{} {what} unavailable ({error}); showing defaults",
            "warning:".yellow().bold()
        );
    }
    value
}

pub(crate) fn output_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{json}");
    Ok(())
}
