//! Session discovery across AI coding tools.
//!
//! Finds session transcripts on disk so a session can be resumed in its
//! own tool or handed off to another one. Only file locations are read
//! here; transcript contents belong to the tools themselves.
//!
//! Missing directories are normal (not every tool is installed) and yield
//! empty results rather than errors.

pub mod layouts;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::tools::Tool;

pub use layouts::{layout_for, IdRule, SessionLayout};

/// A session transcript found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRef {
    pub tool: Tool,
    pub id: String,
    pub path: PathBuf,
    /// Last modification time of the transcript.
    pub modified: DateTime<Utc>,
}

/// Looks up session transcripts below a home directory.
#[derive(Debug, Clone)]
pub struct SessionLocator {
    home: PathBuf,
}

impl SessionLocator {
    /// Creates a locator rooted at an explicit home directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Creates a locator rooted at the current user's home directory.
    pub fn from_home_dir() -> Result<Self> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(Self::new(home))
    }

    /// The directory a tool keeps its sessions in.
    pub fn sessions_dir(&self, tool: Tool) -> PathBuf {
        self.home.join(layout_for(tool).root)
    }

    /// Whether the tool's session directory exists.
    pub fn is_available(&self, tool: Tool) -> bool {
        self.sessions_dir(tool).is_dir()
    }

    /// Lists a tool's sessions, most recently modified first.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory path cannot be turned into
    /// a glob pattern (non-UTF-8 home directory).
    pub fn list_sessions(&self, tool: Tool, limit: Option<usize>) -> Result<Vec<SessionRef>> {
        let layout = layout_for(tool);
        let root = self.sessions_dir(tool);
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let root_str = root
            .to_str()
            .with_context(|| format!("Session directory is not valid UTF-8: {}", root.display()))?;
        let pattern = format!("{}/{}", glob::Pattern::escape(root_str), layout.pattern);

        let mut sessions = Vec::new();
        for entry in glob::glob(&pattern).context("Invalid session glob pattern")? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Skipping unreadable path under {}: {}", root.display(), e);
                    continue;
                }
            };
            if let Some(session) = session_ref(layout, &path) {
                sessions.push(session);
            }
        }

        sessions.sort_by(|a, b| b.modified.cmp(&a.modified));
        if let Some(limit) = limit {
            sessions.truncate(limit);
        }

        tracing::debug!(tool = %tool, found = sessions.len(), "listed sessions");
        Ok(sessions)
    }

    /// Finds a tool's sessions by id.
    ///
    /// An exact id match wins; otherwise every session whose id starts with
    /// `id` is returned, newest first.
    pub fn find_sessions(&self, tool: Tool, id: &str) -> Result<Vec<SessionRef>> {
        if id.is_empty() {
            return Ok(Vec::new());
        }

        let sessions = self.list_sessions(tool, None)?;
        let exact: Vec<SessionRef> = sessions.iter().filter(|s| s.id == id).cloned().collect();
        if !exact.is_empty() {
            return Ok(exact);
        }

        Ok(sessions
            .into_iter()
            .filter(|s| s.id.starts_with(id))
            .collect())
    }

    /// The most recently modified session of `tool` matching `id`.
    pub fn find_session(&self, tool: Tool, id: &str) -> Result<Option<SessionRef>> {
        Ok(self.find_sessions(tool, id)?.into_iter().next())
    }

    /// Finds sessions matching `id` across every supported tool.
    pub fn locate_any(&self, id: &str) -> Result<Vec<SessionRef>> {
        let mut found = Vec::new();
        for tool in Tool::ALL {
            found.extend(self.find_sessions(*tool, id)?);
        }
        Ok(found)
    }
}

fn session_ref(layout: &SessionLayout, path: &Path) -> Option<SessionRef> {
    let id = layout.session_id(path)?;
    let modified = match path.metadata().and_then(|m| m.modified()) {
        Ok(time) => DateTime::<Utc>::from(time),
        Err(e) => {
            tracing::debug!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };

    Some(SessionRef {
        tool: layout.tool,
        id,
        path: path.to_path_buf(),
        modified,
    })
}
