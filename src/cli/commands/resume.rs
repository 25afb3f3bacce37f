//! Resume command - reopen a session in its own tool or hand it off.
//!
//! Locates the session transcript, plans the target command line (with
//! trailing arguments translated for the target tool) and runs it.

use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use shuttle_cli::config::Config;
use shuttle_cli::resume::{self, ResumePlan, ResumeRequest};
use shuttle_cli::sessions::{SessionLocator, SessionRef};
use shuttle_cli::tools::Tool;

use crate::cli::OutputFormat;

/// Arguments for the resume command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    shuttle resume 550e8400                      Resume in the tool that recorded it\n    \
    shuttle resume 550e8400 --to gemini          Hand the session off to Gemini CLI\n    \
    shuttle resume 550e --from claude --to codex -- --yolo\n                                                 \
    Hand off with Codex bypassing approvals\n    \
    shuttle resume 550e8400 --dry-run            Show the command without running it")]
pub struct Args {
    /// Session ID or unique ID prefix
    #[arg(value_name = "SESSION")]
    pub session: String,

    /// Tool that recorded the session
    #[arg(long, value_enum, value_name = "TOOL")]
    #[arg(
        long_help = "Tool that recorded the session. When omitted, every supported\n\
        tool's session store is searched and the ID must match exactly one session."
    )]
    pub from: Option<Tool>,

    /// Tool to resume in
    #[arg(long, value_enum, value_name = "TOOL")]
    #[arg(
        long_help = "Tool to resume the session in. Defaults to default_target from\n\
        the config file, then to the tool that recorded the session. A different\n\
        tool starts a fresh session pointed at the original transcript."
    )]
    pub to: Option<Tool>,

    /// Print the command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for --dry-run: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Extra arguments for the target tool, in any supported tool's syntax
    #[arg(last = true, value_name = "EXTRA")]
    #[arg(
        long_help = "Arguments after '--' are forwarded to the target tool. Known flags\n\
        (model, sandbox, approval and permission modes, directories, tools,\n\
        agents) are translated to the target's spelling; everything else is\n\
        passed through unchanged."
    )]
    pub extra: Vec<String>,
}

#[derive(Serialize)]
struct DryRun<'a> {
    session_id: &'a str,
    source: Tool,
    target: Tool,
    transcript: Option<&'a PathBuf>,
    command: String,
    plan: &'a ResumePlan,
}

/// Executes the resume command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let locator = SessionLocator::from_home_dir()?;

    let (source, session_id, transcript) = match args.from {
        Some(tool) => match locator.find_session(tool, &args.session)? {
            Some(found) => (tool, found.id, Some(found.path)),
            None => {
                tracing::debug!("No {tool} transcript found for {}", args.session);
                (tool, args.session.clone(), None)
            }
        },
        None => {
            let found = locate_unique(&locator, &args.session)?;
            (found.tool, found.id, Some(found.path))
        }
    };

    let target = args.to.or(config.default_target).unwrap_or(source);
    let request = ResumeRequest {
        session_id,
        source,
        target,
        extra_args: args.extra,
        transcript,
    };
    let plan = resume::plan(&request, &config)?;

    if args.dry_run {
        return print_dry_run(&request, &plan, args.format);
    }

    let code = resume::execute(&plan, config.countdown())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn locate_unique(locator: &SessionLocator, id: &str) -> Result<SessionRef> {
    let mut candidates = locator.locate_any(id)?;
    match candidates.len() {
        0 => bail!(
            "No session matching '{id}' found in any tool.\n\
            Use --from <TOOL> to resume a session Shuttle cannot see."
        ),
        1 => Ok(candidates.remove(0)),
        _ => {
            let listing: Vec<String> = candidates
                .iter()
                .map(|s| format!("  {:<10} {}", s.tool.as_str(), s.id))
                .collect();
            bail!(
                "Session ID '{id}' is ambiguous; it matches:\n{}\n\
                Use a longer ID or --from <TOOL>.",
                listing.join("\n")
            )
        }
    }
}

fn print_dry_run(request: &ResumeRequest, plan: &ResumePlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let out = DryRun {
                session_id: &request.session_id,
                source: request.source,
                target: request.target,
                transcript: request.transcript.as_ref(),
                command: plan.preview(),
                plan,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!(
                "{}  {} ({} -> {})",
                "Mode:".dimmed(),
                plan.mode,
                request.source,
                request.target
            );
            println!("{}  {}", "Session:".dimmed(), request.session_id.cyan());
            if let Some(path) = &request.transcript {
                println!("{}  {}", "Transcript:".dimmed(), path.display());
            }
            println!("{}  {}", "Command:".dimmed(), plan.preview());
            for warning in plan.warnings() {
                println!("{} {}", "warning:".yellow().bold(), warning);
            }
        }
    }
    Ok(())
}
