use crate::api::ApiClient;
use crate::prelude::{println, *};
use crate::render::{format_health, format_tool_card};

use super::output_json;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Tool ID
    pub id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, client: &ApiClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching tool {}...", options.id);
    }

    let tool = client
        .fetch_tool(options.id)
        .await?
        .ok_or_eyre(format!("Tool {} not found", options.id))?;

    if options.json {
        output_json(&tool)
    } else {
        println!("{}", format_tool_card(&tool));
        Ok(())
    }
}

pub async fn run_ping(client: &ApiClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Pinging {}...", client.api_root());
    }

    let health = client
        .health()
        .await
        .wrap_err_with(|| format!("API at {} is not reachable", client.api_root()))?;

    println!("{}", format_health(&health, client.api_root()));
    Ok(())
}
