//! Supported AI coding tools.
//!
//! Each tool has its own executable, its own way of resuming one of its
//! sessions, and its own way of starting a fresh interactive session seeded
//! with a prompt (used when handing a session off from another tool).

use serde::{Deserialize, Serialize};

/// An AI coding-assistant CLI that sessions can be resumed in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    Claude,
    Codex,
    Gemini,
    Copilot,
    Cursor,
    Opencode,
    Droid,
}

impl Tool {
    /// Every supported tool, in display order.
    pub const ALL: &'static [Tool] = &[
        Tool::Claude,
        Tool::Codex,
        Tool::Gemini,
        Tool::Copilot,
        Tool::Cursor,
        Tool::Opencode,
        Tool::Droid,
    ];

    /// The identifier used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Claude => "claude",
            Tool::Codex => "codex",
            Tool::Gemini => "gemini",
            Tool::Copilot => "copilot",
            Tool::Cursor => "cursor",
            Tool::Opencode => "opencode",
            Tool::Droid => "droid",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Claude => "Claude Code",
            Tool::Codex => "Codex CLI",
            Tool::Gemini => "Gemini CLI",
            Tool::Copilot => "GitHub Copilot CLI",
            Tool::Cursor => "Cursor Agent",
            Tool::Opencode => "OpenCode",
            Tool::Droid => "Factory Droid",
        }
    }

    /// Default executable name.
    pub fn binary(&self) -> &'static str {
        match self {
            Tool::Cursor => "cursor-agent",
            other => other.as_str(),
        }
    }

    /// Arguments that resume one of this tool's own sessions.
    pub fn native_resume_args(&self, session_id: &str) -> Vec<String> {
        let id = session_id.to_string();
        match self {
            Tool::Codex => vec!["resume".to_string(), id],
            Tool::Opencode => vec!["--session".to_string(), id],
            Tool::Claude | Tool::Gemini | Tool::Copilot | Tool::Cursor | Tool::Droid => {
                vec!["--resume".to_string(), id]
            }
        }
    }

    /// Arguments that start an interactive session seeded with `prompt`.
    pub fn handoff_args(&self, prompt: &str) -> Vec<String> {
        let prompt = prompt.to_string();
        match self {
            Tool::Gemini | Tool::Copilot => vec!["-i".to_string(), prompt],
            Tool::Opencode => vec!["--prompt".to_string(), prompt],
            Tool::Claude | Tool::Codex | Tool::Cursor | Tool::Droid => vec![prompt],
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Tool::ALL.iter().map(|t| t.as_str()).collect();
                format!("unknown tool '{s}' (expected one of: {})", names.join(", "))
            })
    }
}
