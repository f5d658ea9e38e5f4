use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{baseline::baseline, check::check, fix::fix, init::init},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(ExitStatus)` describing what the command found
/// - `Err` if the command fails (e.g., invalid config, missing scan root)
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Fix(cmd)) => fix(cmd),
        Some(Command::Baseline(cmd)) => baseline(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
