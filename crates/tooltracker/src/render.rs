//! Text rendering for the dashboard and catalog commands.
//!
//! Pure functions from state to `String` (or a prettytable `Table`); printing is left to
//! the callers.

use crate::prelude::new_table;
use colored::{ColoredString, Colorize};
use prettytable::{row, Table};
use tooltracker_core::catalog::{ApiHealth, Category, HypeTier, Pricing, Stats, Tool};
use tooltracker_core::dashboard::{Section, ToolListStatus, ViewState};
use tooltracker_core::filter::{FilterSelection, PRICING_OPTIONS};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn section_header(title: &str) -> String {
    format!(
        "\n{}\n{}\n{}\n",
        rule().bright_cyan(),
        title.bright_cyan().bold(),
        rule().bright_cyan()
    )
}

/// Format an integer with thousands separators (`5400` -> `5,400`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn hype_colored(tool: &Tool) -> ColoredString {
    let score = format!("{:.0}", tool.hype_score);
    let colored = match tool.hype_tier() {
        HypeTier::Blazing => score.bright_yellow(),
        HypeTier::Hot | HypeTier::Warm => score.magenta(),
        HypeTier::Cool => score.bright_black(),
    };
    if tool.is_high_hype() {
        colored.bold()
    } else {
        colored
    }
}

fn pricing_colored(tool: &Tool) -> ColoredString {
    let label = tool.pricing_label();
    match &tool.pricing {
        Some(Pricing::Free) => label.green(),
        Some(Pricing::Freemium) => label.magenta(),
        Some(Pricing::Paid) => label.yellow(),
        Some(Pricing::Other(_)) | None => label.white(),
    }
}

pub fn format_stats(stats: &Stats, failed: bool) -> String {
    let mut result = section_header("DASHBOARD OVERVIEW");

    let tiles = [
        ("Total AI Tools", stats.total_tools.to_string()),
        ("New Today", stats.new_today.to_string()),
        ("Avg Hype Score", format!("{:.1}", stats.avg_hype_score)),
        ("Top Category", stats.top_category.clone()),
    ];

    for (label, value) in tiles {
        result.push_str(&format!(
            "  {}: {}\n",
            label.green(),
            value.bright_white().bold()
        ));
    }

    if failed {
        result.push_str(&format!(
            "  {}\n",
            "Statistics could not be loaded; showing defaults.".yellow()
        ));
    }

    result
}

pub fn format_tool_card(tool: &Tool) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} {} {}\n",
        format!("[{}]", tool.id).yellow().bold(),
        tool.name.white().bold(),
        format!("({})", tool.display_category()).bright_magenta()
    ));

    result.push_str(&format!("    {}\n", tool.display_description()));

    if !tool.headline_use_cases().is_empty() {
        let tags: Vec<String> = tool
            .headline_use_cases()
            .iter()
            .map(|use_case| format!("#{use_case}"))
            .collect();
        result.push_str(&format!("    {}\n", tags.join(" ").bright_black()));
    }

    let mut meta = format!(
        "    {}: {} | {}: {}",
        "Hype".green(),
        hype_colored(tool),
        "Pricing".green(),
        pricing_colored(tool)
    );
    if let Some(stars) = tool.github_stars.filter(|s| *s > 0) {
        meta.push_str(&format!(
            " | {}: {}",
            "Stars".green(),
            group_thousands(stars).bright_yellow()
        ));
    }
    result.push_str(&meta);
    result.push('\n');

    if !tool.url.is_empty() {
        result.push_str(&format!(
            "    {}: {}\n",
            "Visit".green(),
            tool.url.cyan().underline()
        ));
    }

    result.push_str(&format!(
        "    {}: {}\n",
        "Source".green(),
        tool.source.bright_white()
    ));

    result
}

/// Trending section. Empty when there is nothing to show and nothing failed.
pub fn format_trending(state: &ViewState) -> String {
    if state.failed(Section::Trending) {
        return format!(
            "{}\n  {}\n",
            section_header("TRENDING TODAY"),
            "Trending tools could not be loaded.".yellow()
        );
    }

    let preview = state.trending_preview();
    if preview.is_empty() {
        return String::new();
    }

    let mut result = section_header("TRENDING TODAY");
    for tool in preview {
        result.push_str(&format_tool_card(tool));
    }
    result
}

pub fn format_filter_bar(categories: &[Category], filters: &FilterSelection) -> String {
    let title = if filters.is_empty() {
        "FILTERS".to_string()
    } else {
        "FILTERS (active)".to_string()
    };
    let mut result = section_header(&title);

    let mut category_options = vec![mark_option(
        "All Categories".to_string(),
        filters.category.is_empty(),
    )];
    for category in categories {
        category_options.push(mark_option(
            format!("{} ({})", category.name, category.count),
            filters.category == category.name,
        ));
    }
    result.push_str(&format!(
        "  {}: {}\n",
        "Category".green(),
        category_options.join("  ")
    ));

    let pricing_options: Vec<String> = PRICING_OPTIONS
        .iter()
        .map(|option| {
            let active = if *option == "all" {
                filters.pricing.is_empty()
            } else {
                filters.pricing.eq_ignore_ascii_case(option)
            };
            mark_option(option.to_string(), active)
        })
        .collect();
    result.push_str(&format!(
        "  {}: {}\n",
        "Pricing".green(),
        pricing_options.join("  ")
    ));

    result
}

fn mark_option(label: String, active: bool) -> String {
    if active {
        format!("[{label}]").bright_cyan().bold().to_string()
    } else {
        label
    }
}

pub fn format_tool_list(state: &ViewState) -> String {
    let mut result = section_header("ALL AI TOOLS");

    match state.tool_list_status() {
        ToolListStatus::Populated(count) => {
            let noun = if count == 1 { "tool" } else { "tools" };
            result.push_str(&format!("{}\n", format!("{count} {noun} found").bright_white()));
            for tool in state.tools() {
                result.push_str(&format_tool_card(tool));
            }
        }
        ToolListStatus::NoMatches => {
            result.push_str(&format!("\n{}\n", "No tools found".yellow()));
            if state.has_active_filters() {
                result.push_str(&format!(
                    "  {}: {}\n",
                    "To clear filters".bright_white().bold(),
                    "clear".cyan()
                ));
            }
        }
        ToolListStatus::Unavailable => {
            result.push_str(&format!(
                "\n{}\n",
                "Tools could not be loaded from the API.".red()
            ));
        }
    }

    result
}

pub fn format_overview(state: &ViewState) -> String {
    if state.loading() {
        return format!("{}\n", "Loading AI tools...".bright_black());
    }

    let mut result = String::new();
    result.push_str(&format!(
        "\n{}\n{}\n",
        "AI TOOL TRACKER".bright_magenta().bold(),
        "Discover trending AI tools daily".bright_black()
    ));
    result.push_str(&format_stats(
        state.stats(),
        state.failed(Section::Stats),
    ));
    result.push_str(&format_trending(state));
    result.push_str(&format_filter_bar(state.categories(), state.filters()));
    if state.failed(Section::Categories) {
        result.push_str(&format!(
            "  {}\n",
            "Categories could not be loaded.".yellow()
        ));
    }
    result.push_str(&format_tool_list(state));
    result.push('\n');
    result
}

pub fn tools_table(tools: &[Tool]) -> Table {
    let mut table = new_table();
    table.add_row(row![
        "ID", "Name", "Category", "Pricing", "Hype", "Stars", "Source"
    ]);

    for tool in tools {
        let stars = tool
            .github_stars
            .filter(|s| *s > 0)
            .map(group_thousands)
            .unwrap_or_default();
        table.add_row(row![
            tool.id,
            &tool.name,
            tool.display_category(),
            tool.pricing_label(),
            format!("{:.0}", tool.hype_score),
            stars,
            &tool.source
        ]);
    }

    table
}

pub fn categories_table(categories: &[Category]) -> Table {
    let mut table = new_table();
    table.add_row(row!["Category", "Tools"]);
    for category in categories {
        table.add_row(row![&category.name, category.count]);
    }
    table
}

/// Render the API's ISO timestamp (with or without offset) in a fixed format.
pub fn format_api_timestamp(raw: &str) -> Option<String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%Y-%m-%d %H:%M:%S %:z").to_string());
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

pub fn format_health(health: &ApiHealth, api_root: &str) -> String {
    let status = if health.is_running() {
        health.status.green().bold()
    } else {
        health.status.red().bold()
    };

    let mut result = format!(
        "{}: {}\n{}: {}\n{}: {}\n",
        "API".green(),
        api_root.cyan(),
        "Status".green(),
        status,
        "Version".green(),
        health.version.bright_white()
    );

    if !health.message.is_empty() {
        result.push_str(&format!("{}: {}\n", "Message".green(), health.message));
    }

    if let Some(timestamp) = &health.timestamp {
        let shown = format_api_timestamp(timestamp).unwrap_or_else(|| timestamp.clone());
        result.push_str(&format!("{}: {}\n", "Server time".green(), shown));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tooltracker_core::dashboard::{FetchOutcome, InitialLoad};

    fn create_test_tool(id: u64, name: &str) -> Tool {
        Tool {
            id,
            name: name.to_string(),
            description: Some("Drafts blog posts".to_string()),
            url: format!("https://example.com/{id}"),
            category: Some("Writing".to_string()),
            hype_score: 84.0,
            github_stars: Some(12345),
            pricing: Some(Pricing::Free),
            use_cases: vec![
                "blogging".to_string(),
                "email".to_string(),
                "seo".to_string(),
                "ads".to_string(),
            ],
            source: "producthunt".to_string(),
        }
    }

    fn create_state(load: InitialLoad) -> ViewState {
        let mut state = ViewState::new();
        let ticket = state.begin_initial().unwrap();
        state.apply_initial(&ticket, load);
        state
    }

    fn create_load() -> InitialLoad {
        InitialLoad {
            tools: FetchOutcome::Fresh(vec![
                create_test_tool(1, "Quill"),
                create_test_tool(2, "Scribe"),
            ]),
            trending: FetchOutcome::Fresh(vec![create_test_tool(2, "Scribe")]),
            stats: FetchOutcome::Fresh(Stats {
                total_tools: 2,
                new_today: 1,
                avg_hype_score: 84.0,
                top_category: "Writing".to_string(),
            }),
            categories: FetchOutcome::Fresh(vec![Category {
                name: "Writing".to_string(),
                count: 2,
            }]),
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(5400), "5,400");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_tool_card_basic() {
        let formatted = format_tool_card(&create_test_tool(42, "Quill"));

        assert!(formatted.contains("[42]"));
        assert!(formatted.contains("Quill"));
        assert!(formatted.contains("(Writing)"));
        assert!(formatted.contains("Drafts blog posts"));
        assert!(formatted.contains("12,345"));
        assert!(formatted.contains("free"));
        assert!(formatted.contains("https://example.com/42"));
        assert!(formatted.contains("producthunt"));
    }

    #[test]
    fn test_format_tool_card_shows_three_use_cases() {
        let formatted = format_tool_card(&create_test_tool(1, "Quill"));

        assert!(formatted.contains("#blogging #email #seo"));
        assert!(!formatted.contains("#ads"));
    }

    #[test]
    fn test_format_tool_card_missing_fields() {
        let tool = Tool {
            id: 5,
            name: "Bare".to_string(),
            description: None,
            url: String::new(),
            category: None,
            hype_score: 0.0,
            github_stars: Some(0),
            pricing: None,
            use_cases: vec![],
            source: "github".to_string(),
        };

        let formatted = format_tool_card(&tool);

        assert!(formatted.contains("(General AI)"));
        assert!(formatted.contains("No description available"));
        assert!(formatted.contains("unknown"));
        assert!(!formatted.contains("Stars"));
        assert!(!formatted.contains("Visit"));
    }

    #[test]
    fn test_format_stats() {
        let formatted = format_stats(&Stats::default(), false);

        assert!(formatted.contains("Total AI Tools"));
        assert!(formatted.contains("New Today"));
        assert!(formatted.contains("0.0"));
        assert!(formatted.contains("N/A"));
        assert!(!formatted.contains("could not be loaded"));

        let formatted = format_stats(&Stats::default(), true);
        assert!(formatted.contains("Statistics could not be loaded"));
    }

    #[test]
    fn test_format_filter_bar_marks_active_options() {
        let categories = vec![Category {
            name: "Writing".to_string(),
            count: 3,
        }];

        let formatted = format_filter_bar(&categories, &FilterSelection::default());
        assert!(formatted.contains("[All Categories]"));
        assert!(formatted.contains("Writing (3)"));
        assert!(formatted.contains("[all]"));
        assert!(!formatted.contains("(active)"));

        let formatted = format_filter_bar(&categories, &FilterSelection::new("Writing", "free"));
        assert!(formatted.contains("[Writing (3)]"));
        assert!(formatted.contains("[free]"));
        assert!(!formatted.contains("[all]"));
        assert!(formatted.contains("FILTERS (active)"));
    }

    #[test]
    fn test_format_overview_while_loading() {
        let formatted = format_overview(&ViewState::new());
        assert!(formatted.contains("Loading AI tools..."));
        assert!(!formatted.contains("ALL AI TOOLS"));
    }

    #[test]
    fn test_format_overview_loaded() {
        let formatted = format_overview(&create_state(create_load()));

        assert!(formatted.contains("AI TOOL TRACKER"));
        assert!(formatted.contains("DASHBOARD OVERVIEW"));
        assert!(formatted.contains("TRENDING TODAY"));
        assert!(formatted.contains("FILTERS"));
        assert!(formatted.contains("2 tools found"));
        assert!(formatted.contains("Quill"));
    }

    #[test]
    fn test_format_overview_hides_empty_trending() {
        let mut load = create_load();
        load.trending = FetchOutcome::Fresh(vec![]);

        let formatted = format_overview(&create_state(load));

        assert!(!formatted.contains("TRENDING TODAY"));
    }

    #[test]
    fn test_format_tool_list_no_matches_vs_failure() {
        let mut state = create_state(create_load());
        let ticket = state.set_category("Images").unwrap();
        state.apply_tools(ticket.seq, FetchOutcome::Fresh(vec![]));

        let formatted = format_tool_list(&state);
        assert!(formatted.contains("No tools found"));
        assert!(formatted.contains("To clear filters"));

        let ticket = state.set_pricing("paid").unwrap();
        state.apply_tools(ticket.seq, FetchOutcome::fallback("HTTP 502"));

        let formatted = format_tool_list(&state);
        assert!(formatted.contains("Tools could not be loaded"));
        assert!(!formatted.contains("No tools found"));
    }

    #[test]
    fn test_tools_table() {
        let table = tools_table(&[create_test_tool(1, "Quill")]);
        let rendered = table.to_string();

        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Quill"));
        assert!(rendered.contains("12,345"));
        assert!(rendered.contains("84"));
    }

    #[test]
    fn test_categories_table() {
        let rendered = categories_table(&[Category {
            name: "NLP".to_string(),
            count: 7,
        }])
        .to_string();

        assert!(rendered.contains("NLP"));
        assert!(rendered.contains('7'));
    }

    #[test]
    fn test_format_api_timestamp() {
        assert_eq!(
            format_api_timestamp("2024-05-01T09:30:00.123456"),
            Some("2024-05-01 09:30:00".to_string())
        );
        assert_eq!(
            format_api_timestamp("2024-05-01T09:30:00+02:00"),
            Some("2024-05-01 09:30:00 +02:00".to_string())
        );
        assert_eq!(format_api_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_health() {
        let health = ApiHealth {
            message: "AI Tool Tracker API".to_string(),
            status: "running".to_string(),
            version: "1.0.0".to_string(),
            timestamp: Some("2024-05-01T09:30:00".to_string()),
        };

        let formatted = format_health(&health, "http://localhost:8000");

        assert!(formatted.contains("http://localhost:8000"));
        assert!(formatted.contains("running"));
        assert!(formatted.contains("1.0.0"));
        assert!(formatted.contains("2024-05-01 09:30:00"));
    }
}
