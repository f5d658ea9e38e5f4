use anyhow::Result;

use super::super::args::CheckCommand;
use crate::{
    cli::{exit_status::ExitStatus, report},
    core::ScanContext,
};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = ScanContext::new(&cmd.args.common)?;
    let issues = ctx.issues();

    if issues.is_empty() {
        report::print_success(ctx.files.len());
    } else {
        report::report(&issues);
    }

    Ok(ExitStatus::from_issues(&issues))
}
