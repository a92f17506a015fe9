use crate::api::ApiClient;
use crate::prelude::*;

pub mod browse;
pub mod show;

#[derive(Debug, clap::Parser)]
#[command(name = "dashboard")]
#[command(about = "Dashboard view: overview, trending tools, filters and the tool list")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Load the dashboard once, apply the given filters and print it
    #[clap(name = "show")]
    Show(show::ShowOptions),

    /// Load the dashboard and change filters interactively from stdin
    #[clap(name = "browse")]
    Browse,
}

pub async fn run(app: App, client: ApiClient, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Show(options) => show::run(options, client, global).await,
        Commands::Browse => browse::run(client, global).await,
    }
}
