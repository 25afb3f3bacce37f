//! Sessions command - list sessions recorded by AI coding tools.
//!
//! Reads each tool's session store directly, so only tools that are
//! installed (and have been used) show up.

use anyhow::Result;
use colored::Colorize;

use shuttle_cli::sessions::{SessionLocator, SessionRef};
use shuttle_cli::tools::Tool;

use crate::cli::OutputFormat;

/// Arguments for the sessions command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    shuttle sessions                  List recent sessions across all tools\n    \
    shuttle sessions --tool codex     Only Codex CLI sessions\n    \
    shuttle sessions --limit 50       Show up to 50 sessions\n    \
    shuttle sessions --format json    Output as JSON")]
pub struct Args {
    /// Only list sessions recorded by this tool
    #[arg(short, long, value_enum, value_name = "TOOL")]
    pub tool: Option<Tool>,

    /// Maximum number of sessions to display
    #[arg(short, long, default_value = "20", value_name = "N")]
    pub limit: usize,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the sessions command.
pub fn run(args: Args) -> Result<()> {
    let locator = SessionLocator::from_home_dir()?;
    let sessions = collect(&locator, args.tool, args.limit)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        OutputFormat::Text => {
            if sessions.is_empty() {
                println!("{}", "No sessions found.".dimmed());
                return Ok(());
            }

            const TOOL_WIDTH: usize = 10;
            const ID_WIDTH: usize = 38;
            const MODIFIED_WIDTH: usize = 16;

            println!(
                "{}",
                format!(
                    "{:<TOOL_WIDTH$}  {:<ID_WIDTH$}  {:<MODIFIED_WIDTH$}  {}",
                    "TOOL", "ID", "MODIFIED", "PATH"
                )
                .bold()
            );
            for session in &sessions {
                let modified = session
                    .modified
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string();
                println!(
                    "{:<TOOL_WIDTH$}  {}  {}  {}",
                    session.tool.as_str(),
                    format!("{:<ID_WIDTH$}", session.id).cyan(),
                    modified.dimmed(),
                    session.path.display()
                );
            }
        }
    }

    Ok(())
}

/// Gathers sessions for one tool or all of them, newest first.
fn collect(locator: &SessionLocator, tool: Option<Tool>, limit: usize) -> Result<Vec<SessionRef>> {
    if let Some(tool) = tool {
        return locator.list_sessions(tool, Some(limit));
    }

    let mut sessions = Vec::new();
    for tool in Tool::ALL {
        sessions.extend(locator.list_sessions(*tool, Some(limit))?);
    }
    sessions.sort_by(|a, b| b.modified.cmp(&a.modified));
    sessions.truncate(limit);
    Ok(sessions)
}
