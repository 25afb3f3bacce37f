//! Command-line interface for Shuttle.
//!
//! Provides the CLI commands for resuming sessions, inspecting the session
//! stores of installed tools, and previewing flag translation.

/// Individual CLI command implementations.
pub mod commands;

/// Output format shared by all commands.
pub mod format;

pub use format::OutputFormat;
