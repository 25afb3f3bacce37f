//! Completions command - print a completion script for `shuttle`.
//!
//! Tool names for `--from`, `--to` and `--tool` complete from the `Tool`
//! enum, so scripts need regenerating when a tool is added.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Arguments for the completions command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    shuttle completions bash > ~/.local/share/bash-completion/completions/shuttle\n    \
    shuttle completions zsh > ~/.zfunc/_shuttle\n    \
    shuttle completions fish > ~/.config/fish/completions/shuttle.fish")]
pub struct Args {
    /// Target shell: bash, zsh, fish, powershell or elvish
    #[arg(value_name = "SHELL", value_enum)]
    pub shell: Shell,
}

/// Prints the completion script for the `shuttle` command tree.
pub fn generate_completions(cmd: &mut Command, shell: Shell) {
    generate(shell, cmd, "shuttle", &mut io::stdout());
}
