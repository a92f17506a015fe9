use crate::api::ApiClient;
use crate::dashboard::Dashboard;
use crate::prelude::{println, *};
use crate::render::format_overview;
use tooltracker_core::filter::pricing_option_to_selection;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Category to select after the initial load
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Pricing tier to select after the initial load: all, free, freemium, paid
    #[arg(short, long, default_value = "all")]
    pub pricing: String,

    /// Output the dashboard state as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, client: ApiClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Loading dashboard from {}...", client.api_root());
    }

    let mut dashboard = Dashboard::new(client);
    dashboard.mount().await;

    dashboard.set_category(options.category.trim());
    dashboard.set_pricing(pricing_option_to_selection(&options.pricing));
    dashboard.settle().await;

    if options.json {
        let json = serde_json::to_string_pretty(dashboard.state())
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{json}");
    } else {
        println!("{}", format_overview(dashboard.state()));
    }

    Ok(())
}
