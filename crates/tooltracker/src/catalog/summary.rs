//! `trending`, `stats` and `categories`: the three parameterless reads.

use crate::api::ApiClient;
use crate::prelude::{println, *};
use crate::render::{categories_table, format_stats, format_tool_card};
use crate::source::CatalogSource;
use colored::Colorize;

use super::{output_json, report};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SummaryOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail instead of falling back to defaults when the API errors
    #[arg(long)]
    pub strict: bool,
}

pub async fn run_trending(
    options: SummaryOptions,
    client: &ApiClient,
    global: crate::Global,
) -> Result<()> {
    if global.verbose {
        println!("Fetching trending tools...");
    }

    let tools = if options.strict {
        client.fetch_trending().await?
    } else {
        report("trending tools", client.list_trending_tools().await)
    };

    if options.json {
        return output_json(&tools);
    }

    if tools.is_empty() {
        println!("{}", "No trending tools today.".yellow());
    } else {
        let cards: String = tools.iter().map(format_tool_card).collect();
        println!("{}\n{cards}", "TRENDING TODAY".bright_cyan().bold());
    }

    Ok(())
}

pub async fn run_stats(options: SummaryOptions, client: &ApiClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching stats...");
    }

    let (stats, failed) = if options.strict {
        (client.fetch_stats().await?, false)
    } else {
        let outcome = client.get_stats().await;
        let failed = outcome.is_fallback();
        (report("stats", outcome), failed)
    };

    if options.json {
        output_json(&stats)
    } else {
        println!("{}", format_stats(&stats, failed));
        Ok(())
    }
}

pub async fn run_categories(
    options: SummaryOptions,
    client: &ApiClient,
    global: crate::Global,
) -> Result<()> {
    if global.verbose {
        println!("Fetching categories...");
    }

    let categories = if options.strict {
        client.fetch_categories().await?
    } else {
        report("categories", client.list_categories().await)
    };

    if options.json {
        output_json(&categories)
    } else if categories.is_empty() {
        println!("{}", "No categories found.".yellow());
        Ok(())
    } else {
        categories_table(&categories).printstd();
        Ok(())
    }
}
