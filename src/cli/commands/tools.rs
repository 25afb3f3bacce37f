//! Tools command - show supported tools and what Shuttle knows about them.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use shuttle_cli::config::Config;
use shuttle_cli::forward::mapper_for;
use shuttle_cli::sessions::SessionLocator;
use shuttle_cli::tools::Tool;

use crate::cli::OutputFormat;

/// Arguments for the tools command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    shuttle tools                  List supported tools\n    \
    shuttle tools --format json    Output as JSON")]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ToolInfo {
    tool: Tool,
    name: &'static str,
    binary: String,
    translates_flags: bool,
    sessions_dir: String,
    sessions_found: bool,
}

/// Executes the tools command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let locator = SessionLocator::from_home_dir()?;

    let infos: Vec<ToolInfo> = Tool::ALL
        .iter()
        .map(|tool| ToolInfo {
            tool: *tool,
            name: tool.display_name(),
            binary: config.binary_for(*tool),
            translates_flags: mapper_for(*tool).is_some(),
            sessions_dir: locator.sessions_dir(*tool).display().to_string(),
            sessions_found: locator.is_available(*tool),
        })
        .collect();

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
        OutputFormat::Text => {
            println!("{}", "Supported tools".bold());
            println!();
            for info in &infos {
                let marker = if info.sessions_found {
                    "✓".green()
                } else {
                    "○".dimmed()
                };
                let flags = if info.translates_flags {
                    "flags translated".normal()
                } else {
                    "flags passed through".dimmed()
                };
                println!(
                    "  {} {:<10} {:<20} {:<16} {}",
                    marker,
                    info.tool.as_str(),
                    info.name,
                    info.binary,
                    flags
                );
            }
            println!();
            println!(
                "{} {}",
                "✓".green(),
                "session store found on this machine".dimmed()
            );
        }
    }

    Ok(())
}
