use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "shuttle")]
#[command(version)]
#[command(about = "Resume AI coding sessions in any tool")]
#[command(long_about = "Shuttle reopens a recorded AI coding-assistant session, either in\n\
    the tool that recorded it or in a different one.\n\n\
    Arguments after '--' are translated into the target tool's flag syntax:\n\
    a --yolo typed for Gemini CLI becomes the matching bypass flag for Codex,\n\
    Claude Code or Cursor. Flags Shuttle does not know are passed through.")]
#[command(after_help = "EXAMPLES:\n    \
    shuttle sessions                        List recent sessions\n    \
    shuttle resume 550e8400                 Resume in the recording tool\n    \
    shuttle resume 550e8400 --to codex      Hand off to Codex CLI\n    \
    shuttle translate --to gemini -- --add-dir /tmp/w\n                                            \
    Preview flag translation\n    \
    shuttle tools                           Show supported tools\n\n\
    For more information about a command, run 'shuttle <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Resume a session in its own tool or hand it off to another
    #[command(long_about = "Finds the session transcript, builds the target tool's command\n\
        line and runs it. Resuming in the recording tool uses that tool's own\n\
        resume option; any other tool starts a new session pointed at the\n\
        original transcript.\n\
        \n\
        When translating trailing flags loses information, warnings are\n\
        printed and launch is delayed by countdown_seconds.")]
    Resume(commands::resume::Args),

    /// Show how arguments would be translated for a tool
    #[command(long_about = "Runs only the argument translation and prints the mapped flags,\n\
        the flags passed through unchanged, and any warnings.")]
    Translate(commands::translate::Args),

    /// List sessions recorded by AI coding tools
    #[command(long_about = "Lists session transcripts found in each tool's session store,\n\
        most recently modified first.")]
    Sessions(commands::sessions::Args),

    /// Show supported tools, their binaries and session stores
    Tools(commands::tools::Args),

    /// Show the flags that are translated between tools
    Flags(commands::flags::Args),

    /// View and manage configuration settings
    #[command(long_about = "Provides subcommands to show, get, and set configuration values.\n\
        Configuration is stored in ~/.shuttle/config.yaml.")]
    Config(commands::config::Args),

    /// Generate shell completion scripts
    Completions(commands::completions::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "shuttle=debug,shuttle_cli=debug"
    } else {
        "shuttle=info,shuttle_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Resume(args) => commands::resume::run(args),
        Commands::Translate(args) => commands::translate::run(args),
        Commands::Sessions(args) => commands::sessions::run(args),
        Commands::Tools(args) => commands::tools::run(args),
        Commands::Flags(args) => commands::flags::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Completions(args) => {
            commands::completions::generate_completions(&mut Cli::command(), args.shell);
            Ok(())
        }
    }
}
