//! Config command - manage configuration

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use shuttle_cli::config::Config;
use shuttle_cli::tools::Tool;

#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    shuttle config show                               Show all settings\n    \
    shuttle config get countdown_seconds              Read one setting\n    \
    shuttle config set default_target claude          Resume in Claude Code by default\n    \
    shuttle config set binaries.cursor ~/bin/cursor-agent\n\n\
KEYS:\n    \
    default_target       Tool used when --to is omitted\n    \
    countdown_seconds    Pause before launching when flags were translated lossily\n    \
    binaries.<tool>      Executable used for a tool")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(),
        Some(ConfigCommand::Get { key }) => get_config(&key),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value),
    }
}

fn show_config() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load()?;

    println!("{}", "Shuttle Configuration".bold());
    println!();
    println!("  {}  {}", "Config file:".dimmed(), path.display());
    println!(
        "  {}  {}",
        "Default target:".dimmed(),
        config
            .default_target
            .map(|t| t.to_string())
            .unwrap_or_else(|| "(tool that recorded the session)".to_string())
    );
    println!("  {}  {}s", "Countdown:".dimmed(), config.countdown());

    println!();
    println!("{}", "Binaries:".bold());
    for tool in Tool::ALL {
        let binary = config.binary_for(*tool);
        let marker = if config.binaries.contains_key(tool.as_str()) {
            "*".yellow()
        } else {
            " ".normal()
        };
        println!("  {} {:<10} {}", marker, tool.as_str(), binary);
    }

    Ok(())
}

fn get_config(key: &str) -> Result<()> {
    let config = Config::load()?;
    match config.get(key)? {
        Some(value) => println!("{value}"),
        None => println!("{}", format!("Config key '{key}' is not set").yellow()),
    }
    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let path = Config::config_path()?;
    // Edit the file as written, without environment overrides baked in.
    let mut config = Config::load_from(&path)?;
    if let Err(e) = config.set(key, value) {
        bail!("Cannot set {key}: {e}");
    }
    config.save_to(&path)?;

    println!("{} {} = {}", "Set".green(), key, value);
    Ok(())
}
