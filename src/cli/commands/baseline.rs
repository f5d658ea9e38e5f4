//! Baseline command - Insert arblift-disable-next-line comments above
//! every current finding so only new hardcoded text is reported.
//!
//! Use `--apply` to actually insert comments (default is dry-run mode).

use anyhow::Result;
use colored::Colorize;

use super::{super::args::BaselineCommand, helper::Findings};
use crate::{
    cli::{
        actions::{Action, InsertDisableComment, execute_operations},
        exit_status::ExitStatus,
        report,
    },
    core::ScanContext,
};

pub fn baseline(cmd: BaselineCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = ScanContext::new(&args.common)?;
    let apply = args.apply;

    let findings = Findings::split(ctx.issues());
    let total = findings.total();

    if total == 0 {
        report::print_success(ctx.files.len());
    } else if apply {
        let mut ops = InsertDisableComment::to_operations(&findings.hardcoded);
        ops.extend(InsertDisableComment::to_operations(&findings.unrewritable));
        let stats = execute_operations(&ctx.root_dir, &ops)?;

        println!(
            "{} {} comment(s) in {} file(s) (processed {} issue(s)):",
            "Inserted".green().bold(),
            stats.changes_applied,
            stats.files_modified,
            total
        );
        print_breakdown(&findings);
    } else {
        InsertDisableComment::preview(&findings.hardcoded);
        InsertDisableComment::preview(&findings.unrewritable);

        println!(
            "{} {} comment(s) in {} file(s):",
            "Would insert".yellow().bold(),
            findings.unique_lines(),
            findings.file_count()
        );
        print_breakdown(&findings);
        println!("Run with {} to insert these comments.", "--apply".cyan());
    }

    report::print_parse_warning(findings.parse_error_count);

    // Dry run with findings still has comments to insert
    Ok(ExitStatus::for_run(
        findings.parse_error_count > 0,
        total > 0 && !apply,
    ))
}

fn print_breakdown(findings: &Findings) {
    if !findings.hardcoded.is_empty() {
        println!("  - hardcoded: {} issue(s)", findings.hardcoded.len());
    }
    if !findings.unrewritable.is_empty() {
        println!("  - unrewritable: {} issue(s)", findings.unrewritable.len());
    }
}
