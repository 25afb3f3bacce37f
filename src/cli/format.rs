//! The `--format` switch shared by `resume --dry-run`, `translate`,
//! `sessions`, `tools` and `flags`.

use clap::ValueEnum;

/// How a command prints its result. JSON output is the serde form of the
/// library types (`ForwardResolution`, `SessionRef`, `FlagSpec`, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored tables and labels.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}
