//! Where each tool keeps its session transcripts.
//!
//! Paths are relative to the user's home directory. Every layout is a
//! directory root plus a glob pattern below it, and a rule for recovering
//! the session id from a matched path.

use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::tools::Tool;

/// How to recover a session id from a transcript path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRule {
    /// The file name without its extension.
    FileStem,
    /// The UUID at the end of the file stem (`rollout-<time>-<uuid>`).
    TrailingUuid,
    /// The name of the directory holding the file.
    ParentDir,
    /// A top-level string field of a JSON file, falling back to the stem.
    JsonField(&'static str),
}

/// Transcript location for one tool.
#[derive(Debug, Clone, Copy)]
pub struct SessionLayout {
    pub tool: Tool,
    /// Sessions root, relative to the home directory.
    pub root: &'static str,
    /// Glob pattern relative to `root`.
    pub pattern: &'static str,
    pub id_rule: IdRule,
    /// File stems with this prefix are not sessions (sub-agent logs).
    pub exclude_prefix: Option<&'static str>,
}

/// Returns the transcript layout for a tool.
pub fn layout_for(tool: Tool) -> &'static SessionLayout {
    match tool {
        Tool::Claude => &SessionLayout {
            tool: Tool::Claude,
            root: ".claude/projects",
            pattern: "*/*.jsonl",
            id_rule: IdRule::FileStem,
            exclude_prefix: Some("agent-"),
        },
        Tool::Codex => &SessionLayout {
            tool: Tool::Codex,
            root: ".codex/sessions",
            pattern: "*/*/*/rollout-*.jsonl",
            id_rule: IdRule::TrailingUuid,
            exclude_prefix: None,
        },
        Tool::Gemini => &SessionLayout {
            tool: Tool::Gemini,
            root: ".gemini/tmp",
            pattern: "*/chats/session-*.json",
            id_rule: IdRule::JsonField("sessionId"),
            exclude_prefix: None,
        },
        Tool::Copilot => &SessionLayout {
            tool: Tool::Copilot,
            root: ".copilot/session-state",
            pattern: "*.jsonl",
            id_rule: IdRule::FileStem,
            exclude_prefix: None,
        },
        Tool::Cursor => &SessionLayout {
            tool: Tool::Cursor,
            root: ".cursor/chats",
            pattern: "*/*/store.db",
            id_rule: IdRule::ParentDir,
            exclude_prefix: None,
        },
        Tool::Opencode => &SessionLayout {
            tool: Tool::Opencode,
            root: ".local/share/opencode/storage/session",
            pattern: "*/*.json",
            id_rule: IdRule::FileStem,
            exclude_prefix: None,
        },
        Tool::Droid => &SessionLayout {
            tool: Tool::Droid,
            root: ".factory/sessions",
            pattern: "*/*.jsonl",
            id_rule: IdRule::FileStem,
            exclude_prefix: None,
        },
    }
}

impl SessionLayout {
    /// Extracts the session id from a matched transcript path.
    pub fn session_id(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        if let Some(prefix) = self.exclude_prefix {
            if stem.starts_with(prefix) {
                return None;
            }
        }

        match self.id_rule {
            IdRule::FileStem => Some(stem.to_string()),
            IdRule::TrailingUuid => Some(trailing_uuid(stem).unwrap_or(stem).to_string()),
            IdRule::ParentDir => path
                .parent()?
                .file_name()?
                .to_str()
                .map(str::to_string),
            IdRule::JsonField(field) => {
                Some(read_json_field(path, field).unwrap_or_else(|| stem.to_string()))
            }
        }
    }
}

/// The last 36 characters of `stem` when they parse as a hyphenated UUID.
fn trailing_uuid(stem: &str) -> Option<&str> {
    const UUID_LEN: usize = 36;
    let start = stem.len().checked_sub(UUID_LEN)?;
    stem.get(start..)
        .filter(|candidate| Uuid::parse_str(candidate).is_ok())
}

fn read_json_field(path: &Path, field: &str) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let json: serde_json::Value = serde_json::from_str(&content).ok()?;
    json.get(field)?.as_str().map(str::to_string)
}
