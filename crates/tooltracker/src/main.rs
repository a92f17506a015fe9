use crate::config::FilterMode;
use crate::prelude::{eprintln, *};
use clap::Parser;

mod api;
mod board;
mod catalog;
mod config;
mod dashboard;
mod error;
mod prelude;
mod render;
mod source;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse the AI Tool Tracker catalog from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the AI Tool Tracker API (e.g. http://localhost:8000)
    #[clap(long, env = "TOOLTRACKER_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds. Zero or unset means no timeout.
    #[clap(long, env = "TOOLTRACKER_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Where category and pricing filters are applied
    #[clap(
        long,
        value_enum,
        env = "TOOLTRACKER_FILTER_MODE",
        global = true,
        default_value = "server"
    )]
    pub filter_mode: FilterMode,

    /// Whether to display additional information.
    #[clap(long, env = "TOOLTRACKER_VERBOSE", global = true, default_value = "false")]
    pub verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Dashboard view: overview, trending tools, filters and the tool list
    Dashboard(crate::board::App),

    /// Direct catalog queries
    Catalog(crate::catalog::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    let client = api::connect(&app.global)
        .wrap_err("Invalid API configuration")?;

    if app.global.verbose {
        eprintln!(
            "Using API at {} ({:?} filtering)",
            client.api_root(),
            client.filter_mode()
        );
    }

    match app.command {
        SubCommands::Dashboard(sub_app) => crate::board::run(sub_app, client, app.global).await,
        SubCommands::Catalog(sub_app) => crate::catalog::run(sub_app, client, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
