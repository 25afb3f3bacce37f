//! Flags command - print the table of flags Shuttle translates.

use anyhow::Result;
use colored::Colorize;

use shuttle_cli::forward::{FlagArity, FLAG_SPECS};

use crate::cli::OutputFormat;

/// Arguments for the flags command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    shuttle flags                  Show translated flags\n    \
    shuttle flags --format json    Output as JSON")]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the flags command.
pub fn run(args: Args) -> Result<()> {
    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(FLAG_SPECS)?);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                format!("{:<28}  {:<9}  {}", "KEY", "VALUE", "SPELLINGS").bold()
            );
            for spec in FLAG_SPECS {
                let arity = match spec.arity {
                    FlagArity::NoValue => "-",
                    FlagArity::RequiresValue => "required",
                    FlagArity::OptionalValue => "optional",
                };
                println!(
                    "{:<28}  {:<9}  {}",
                    spec.key.as_str(),
                    arity,
                    spec.spellings.join(", ")
                );
                println!("{:<28}  {:<9}  {}", "", "", spec.description.dimmed());
            }
            println!();
            println!(
                "{}",
                "Flags not listed here are passed to the target tool unchanged.".dimmed()
            );
        }
    }
    Ok(())
}
