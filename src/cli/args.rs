//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report hardcoded user-facing strings
//! - `fix`: Move hardcoded strings into the ARB file and rewrite them
//! - `baseline`: Add disable comments to suppress existing findings
//! - `init`: Initialize arblift configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Fix(cmd)) => cmd.args.common.verbose,
            Some(Command::Baseline(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// ARB file new entries are written to (overrides config file)
    #[arg(long)]
    pub arb_file: Option<String>,

    /// Worker threads (overrides config file, 0 = all cores)
    #[arg(short, long, env = "ARBLIFT_JOBS")]
    pub jobs: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Parser)]
pub struct FixArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    #[command(flatten)]
    pub args: FixArgs,
}

#[derive(Debug, Parser)]
pub struct BaselineArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually insert comments (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct BaselineCommand {
    #[command(flatten)]
    pub args: BaselineArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report hardcoded user-facing strings
    Check(CheckCommand),
    /// Extract hardcoded strings into the ARB file and rewrite them as localization lookups
    Fix(FixCommand),
    /// Insert arblift-disable-next-line comments to suppress existing findings
    Baseline(BaselineCommand),
    /// Initialize a new .arbliftrc.json configuration file
    Init,
}
