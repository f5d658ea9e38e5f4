//! Fix command - Move hardcoded strings into the ARB file and replace them
//! with localization lookups.
//!
//! Literals in positions that must stay constant, or in `part of` files,
//! cannot be rewritten; they are reported and left alone.
//!
//! Use `--apply` to actually write files (default is dry-run mode).

use anyhow::Result;
use colored::Colorize;

use super::{super::args::FixCommand, helper::Findings};
use crate::{
    cli::{exit_status::ExitStatus, report},
    core::{RewritePlan, ScanContext, rewrite::PlannedRewrite},
    issues::Issue,
};

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = ScanContext::new(&args.common)?;
    let apply = args.apply;

    let findings = Findings::split(ctx.issues());
    let plan = ctx.plan();
    let rewrite_count = plan.rewrite_count();

    if rewrite_count == 0 && findings.unrewritable.is_empty() {
        report::print_success(ctx.files.len());
        report::print_parse_warning(findings.parse_error_count);
        return Ok(ExitStatus::for_run(findings.parse_error_count > 0, false));
    }

    if !findings.unrewritable.is_empty() {
        let blocked: Vec<Issue> = findings
            .unrewritable
            .iter()
            .cloned()
            .map(Issue::Unrewritable)
            .collect();
        report::report(&blocked);
        println!();
    }

    let resource = ctx.display_path(&ctx.resource_path().to_string_lossy());

    let status = if apply {
        let outcome = ctx.apply(&plan);
        if !outcome.issues.is_empty() {
            report::report(&outcome.issues);
            println!();
        }

        println!(
            "{} {} literal(s) in {} file(s), added {} key(s) to {}.",
            "Rewrote".green().bold(),
            outcome.rewrites_applied,
            outcome.files_written,
            outcome.entries_added,
            resource
        );
        if let Some(backup) = &outcome.backup {
            println!(
                "  - malformed resource file backed up to {}",
                backup.display()
            );
        }

        ExitStatus::for_run(
            findings.parse_error_count > 0 || !outcome.issues.is_empty(),
            false,
        )
    } else {
        let rewrites = planned(&plan);
        report::print_rewrites(&rewrites);

        println!(
            "{} {} literal(s) in {} file(s), {} new key(s) for {}.",
            "Would rewrite".yellow().bold(),
            rewrite_count,
            plan.files.len(),
            plan.entries.len(),
            resource
        );
        if rewrite_count > 0 {
            println!("Run with {} to apply these rewrites.", "--apply".cyan());
        }

        ExitStatus::for_run(findings.parse_error_count > 0, true)
    };

    report::print_parse_warning(findings.parse_error_count);
    Ok(status)
}

fn planned<'a>(plan: &'a RewritePlan) -> Vec<&'a PlannedRewrite> {
    plan.files
        .iter()
        .flat_map(|(_, file_plan)| file_plan.rewrites.iter())
        .collect()
}
