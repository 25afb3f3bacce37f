//! CLI commands for Shuttle.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Shell completion scripts.
pub mod completions;

/// Configuration viewing and management.
pub mod config;

/// Print the canonical flag table.
pub mod flags;

/// Resume a session natively or hand it off to another tool.
pub mod resume;

/// List sessions found in each tool's session store.
pub mod sessions;

/// Show supported tools.
pub mod tools;

/// Preview flag translation for a target tool.
pub mod translate;
