use crate::api::ApiClient;
use crate::prelude::{println, *};
use crate::render::{format_tool_card, tools_table};
use crate::source::CatalogSource;
use colored::Colorize;
use tooltracker_core::catalog::Tool;
use tooltracker_core::filter::{pricing_option_to_selection, FilterSelection, ToolQuery};

use super::{output_json, report};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ToolsOptions {
    /// Only tools in this category (exact name, as listed by `catalog categories`)
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Only tools with this pricing tier: all, free, freemium, paid
    #[arg(short, long, default_value = "all")]
    pub pricing: String,

    /// Maximum number of tools to return
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Render each tool as a card instead of a table
    #[arg(long)]
    pub cards: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail instead of falling back to an empty list when the API errors
    #[arg(long)]
    pub strict: bool,
}

impl ToolsOptions {
    pub fn query(&self) -> ToolQuery {
        let selection = FilterSelection::new(
            self.category.trim(),
            pricing_option_to_selection(self.pricing.trim()),
        );
        ToolQuery::from_selection(&selection).with_limit(self.limit)
    }
}

pub async fn run(options: ToolsOptions, client: &ApiClient, global: crate::Global) -> Result<()> {
    let query = options.query();

    if global.verbose {
        println!("Fetching tools ({query:?})...");
    }

    let tools = if options.strict {
        client.fetch_tools(&query).await?
    } else {
        report("tools", client.list_tools(&query).await)
    };

    if options.json {
        output_json(&tools)
    } else {
        println!("{}", format_tools_text(&tools, &options));
        Ok(())
    }
}

fn format_tools_text(tools: &[Tool], options: &ToolsOptions) -> String {
    if tools.is_empty() {
        return format!("{}", "No tools found".yellow());
    }

    let mut result = if options.cards {
        tools.iter().map(format_tool_card).collect::<String>()
    } else {
        tools_table(tools).to_string()
    };

    let noun = if tools.len() == 1 { "tool" } else { "tools" };
    result.push_str(&format!("\n{} {noun}\n", tools.len().to_string().bright_cyan().bold()));
    result
}
