//! Session resume dispatch.
//!
//! Builds the command line that reopens a session, either in the tool that
//! recorded it (native resume) or in a different tool seeded with a prompt
//! pointing at the original transcript (hand-off). Trailing user arguments
//! are forwarded through [`crate::forward::resolve`] for the target tool.

use colored::Colorize;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::forward::{self, ForwardResolution};
use crate::tools::Tool;

/// Errors that can occur while planning or launching a resume.
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    /// A hand-off needs the source transcript to point the target tool at.
    #[error("No transcript found for {from} session {session_id}; cannot hand off to {to}")]
    TranscriptMissing {
        session_id: String,
        from: Tool,
        to: Tool,
    },

    /// The target executable could not be started.
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// What the user asked to resume, and where.
#[derive(Debug, Clone)]
pub struct ResumeRequest {
    pub session_id: String,
    pub source: Tool,
    pub target: Tool,
    /// Raw trailing arguments, in any supported tool's grammar.
    pub extra_args: Vec<String>,
    /// Transcript of the source session, if it was located.
    pub transcript: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeMode {
    Native,
    Handoff,
}

impl std::fmt::Display for ResumeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResumeMode::Native => write!(f, "native"),
            ResumeMode::Handoff => write!(f, "handoff"),
        }
    }
}

/// A fully resolved command line, ready to preview or run.
#[derive(Debug, Clone, Serialize)]
pub struct ResumePlan {
    pub mode: ResumeMode,
    pub program: String,
    /// Invocation arguments followed by forwarded extra arguments.
    pub args: Vec<String>,
    pub resolution: ForwardResolution,
}

impl ResumePlan {
    pub fn warnings(&self) -> &[String] {
        &self.resolution.warnings
    }

    /// Shell-displayable rendering of the command line.
    pub fn preview(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Plans how to resume a session.
///
/// # Errors
///
/// Returns [`ResumeError::TranscriptMissing`] for a hand-off when the source
/// transcript was not found.
pub fn plan(request: &ResumeRequest, config: &Config) -> Result<ResumePlan, ResumeError> {
    let (mode, mut args) = if request.source == request.target {
        (
            ResumeMode::Native,
            request.target.native_resume_args(&request.session_id),
        )
    } else {
        let transcript = request
            .transcript
            .as_ref()
            .ok_or_else(|| ResumeError::TranscriptMissing {
                session_id: request.session_id.clone(),
                from: request.source,
                to: request.target,
            })?;
        let prompt = handoff_prompt(request.source, &request.session_id, transcript);
        (ResumeMode::Handoff, request.target.handoff_args(&prompt))
    };

    let resolution = forward::resolve(request.target, &request.extra_args);
    args.extend(resolution.extra_args.iter().cloned());

    let plan = ResumePlan {
        mode,
        program: config.binary_for(request.target),
        args,
        resolution,
    };
    tracing::debug!(mode = %plan.mode, command = %plan.preview(), "planned resume");
    Ok(plan)
}

/// Prompt that asks the target tool to pick up another tool's session.
pub fn handoff_prompt(source: Tool, session_id: &str, transcript: &std::path::Path) -> String {
    format!(
        "Continue the {} session {} from where it left off. \
         Its full transcript is at {}; read it first to recover the context.",
        source.display_name(),
        session_id,
        transcript.display()
    )
}

/// Quotes a token for display in a POSIX shell.
pub fn quote_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | ':' | '=' | '-'));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Runs the plan and returns the child's exit code.
///
/// When forwarding produced warnings they are printed first, followed by a
/// one-line-per-second countdown so the user can abort with Ctrl-C. A
/// `countdown_seconds` of 0 prints the warnings and launches immediately.
pub fn execute(plan: &ResumePlan, countdown_seconds: u64) -> Result<i32, ResumeError> {
    if !plan.warnings().is_empty() {
        for warning in plan.warnings() {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
        for remaining in (1..=countdown_seconds).rev() {
            eprintln!("{}", format!("Launching in {remaining}...").dimmed());
            thread::sleep(Duration::from_secs(1));
        }
    }

    tracing::debug!(program = %plan.program, "spawning");
    let status = Command::new(&plan.program)
        .args(&plan.args)
        .status()
        .map_err(|source| ResumeError::Spawn {
            program: plan.program.clone(),
            source,
        })?;

    // Killed by a signal: no exit code.
    Ok(status.code().unwrap_or(1))
}
