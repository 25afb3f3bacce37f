//! Translate command - preview how arguments are forwarded to a tool.

use anyhow::Result;
use colored::Colorize;

use shuttle_cli::forward;
use shuttle_cli::resume::quote_arg;
use shuttle_cli::tools::Tool;

use crate::cli::OutputFormat;

/// Arguments for the translate command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    shuttle translate --to gemini -- --add-dir /tmp/workspace\n    \
    shuttle translate --to codex -- --yolo --sandbox read-only\n    \
    shuttle translate --to cursor --format json -- --sandbox")]
pub struct Args {
    /// Tool whose syntax the arguments are translated into
    #[arg(long, value_enum, value_name = "TOOL")]
    pub to: Tool,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Arguments to translate
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Executes the translate command.
pub fn run(args: Args) -> Result<()> {
    let resolution = forward::resolve(args.to, &args.args);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        OutputFormat::Text => {
            println!(
                "{}  {} ({})",
                "Target:".dimmed(),
                args.to.as_str().bold(),
                args.to.display_name()
            );
            println!("{}  {}", "Mapped:".dimmed(), render(&resolution.mapped_args));
            println!(
                "{}  {}",
                "Passthrough:".dimmed(),
                render(&resolution.passthrough_args)
            );
            println!("{}  {}", "Forwarded:".dimmed(), render(&resolution.extra_args));
            for warning in &resolution.warnings {
                println!("{} {}", "warning:".yellow().bold(), warning);
            }
        }
    }
    Ok(())
}

fn render(args: &[String]) -> String {
    if args.is_empty() {
        return "(none)".to_string();
    }
    args.iter()
        .map(|a| quote_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}
