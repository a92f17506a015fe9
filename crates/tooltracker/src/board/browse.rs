//! Interactive dashboard: reads filter commands from stdin while tool list fetches
//! resolve in the background.

use crate::api::ApiClient;
use crate::dashboard::Dashboard;
use crate::prelude::{eprintln, println, *};
use crate::render::{format_filter_bar, format_overview, format_tool_list};
use crate::source::CatalogSource;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tooltracker_core::dashboard::ToolsApplied;
use tooltracker_core::filter::{pricing_option_to_selection, PRICING_OPTIONS};

const HELP: &str = "\
Commands:
  category [NAME]   select a category (no name selects all)
  pricing [TIER]    select a pricing tier: all, free, freemium, paid
  clear             clear both filters
  show              print the whole dashboard again
  help              print this message
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Category(String),
    Pricing(String),
    Clear,
    Show,
    Help,
    Quit,
}

/// Parse one line of input. Blank lines parse as `Show`.
pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "show" | "s" => Ok(BrowseCommand::Show),
        "category" | "c" => Ok(BrowseCommand::Category(rest.to_string())),
        "pricing" | "p" => {
            if rest.is_empty() {
                return Ok(BrowseCommand::Pricing(String::new()));
            }
            if PRICING_OPTIONS.iter().any(|tier| tier.eq_ignore_ascii_case(rest)) {
                Ok(BrowseCommand::Pricing(pricing_option_to_selection(rest)))
            } else {
                Err(format!(
                    "Unknown pricing tier '{rest}'. Valid tiers: all, free, freemium, paid"
                ))
            }
        }
        "clear" => Ok(BrowseCommand::Clear),
        "help" | "h" | "?" => Ok(BrowseCommand::Help),
        "quit" | "q" | "exit" => Ok(BrowseCommand::Quit),
        other => Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    }
}

pub async fn run(client: ApiClient, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Loading dashboard from {}...", client.api_root());
    }

    let mut dashboard = Dashboard::new(client);
    println!("{}", format_overview(dashboard.state()));
    dashboard.mount().await;
    println!("{}", format_overview(dashboard.state()));
    println!("{}", "Type 'help' for commands.".bright_black());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.wrap_err("Failed to read from stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(BrowseCommand::Quit) => break,
                    Ok(command) => handle(&mut dashboard, command),
                    Err(message) => eprintln!("{}", message.red()),
                }
            }
            applied = dashboard.next_update() => {
                if applied == ToolsApplied::Applied {
                    print_tool_list(&dashboard);
                }
            }
        }
    }

    Ok(())
}

fn handle<S: CatalogSource + 'static>(dashboard: &mut Dashboard<S>, command: BrowseCommand) {
    let changed = match command {
        BrowseCommand::Category(name) => dashboard.set_category(name),
        BrowseCommand::Pricing(tier) => dashboard.set_pricing(tier),
        BrowseCommand::Clear => dashboard.clear_filters(),
        BrowseCommand::Show => {
            println!("{}", format_overview(dashboard.state()));
            return;
        }
        BrowseCommand::Help => {
            println!("{HELP}");
            return;
        }
        BrowseCommand::Quit => return,
    };

    if changed {
        println!("{}", "Loading tools...".bright_black());
    } else {
        println!("{}", "Filters unchanged.".bright_black());
    }
}

fn print_tool_list<S: CatalogSource + 'static>(dashboard: &Dashboard<S>) {
    let state = dashboard.state();
    println!(
        "{}{}",
        format_filter_bar(state.categories(), state.filters()),
        format_tool_list(state)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(
            parse_command("category Writing"),
            Ok(BrowseCommand::Category("Writing".to_string()))
        );
        assert_eq!(
            parse_command("  c   Image Generation  "),
            Ok(BrowseCommand::Category("Image Generation".to_string()))
        );
        assert_eq!(
            parse_command("category"),
            Ok(BrowseCommand::Category(String::new()))
        );
    }

    #[test]
    fn test_parse_pricing() {
        assert_eq!(
            parse_command("pricing Free"),
            Ok(BrowseCommand::Pricing("free".to_string()))
        );
        assert_eq!(
            parse_command("p all"),
            Ok(BrowseCommand::Pricing(String::new()))
        );
        assert_eq!(parse_command("pricing"), Ok(BrowseCommand::Pricing(String::new())));
        assert!(parse_command("pricing enterprise").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command(""), Ok(BrowseCommand::Show));
        assert_eq!(parse_command("show"), Ok(BrowseCommand::Show));
        assert_eq!(parse_command("CLEAR"), Ok(BrowseCommand::Clear));
        assert_eq!(parse_command("help"), Ok(BrowseCommand::Help));
        assert_eq!(parse_command("q"), Ok(BrowseCommand::Quit));
        assert_eq!(parse_command("exit"), Ok(BrowseCommand::Quit));
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = parse_command("sort hype").unwrap_err();
        assert!(err.contains("sort"));
    }
}
