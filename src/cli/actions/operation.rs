use std::{
    collections::BTreeMap,
    fs,
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::traits::ActionStats;
use crate::core::{
    data::SourceContext,
    parsers::LineIndex,
    rewrite::{EditSet, TextEdit},
};

/// A low-level change to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert `comment` on its own line above `context`, matching its indent.
    InsertComment {
        context: SourceContext,
        comment: String,
    },
}

impl Operation {
    pub fn context(&self) -> &SourceContext {
        match self {
            Operation::InsertComment { context, .. } => context,
        }
    }

    /// Build the edit against the file's current content.
    fn to_edit(&self, index: &LineIndex) -> TextEdit {
        match self {
            Operation::InsertComment { context, comment } => TextEdit::insert(
                index.line_start(context.line()),
                format!("{}{}\n", context.indent(), comment),
            ),
        }
    }

    /// Print what this operation would do.
    pub fn preview(&self) {
        match self {
            Operation::InsertComment { context, comment } => {
                let line = context.line();
                let col = context.col();
                let source_line = &context.source_line;

                println!(
                    "  {} {}:{}:{}",
                    "-->".blue(),
                    context.file_path(),
                    line,
                    col
                );
                println!("     {}", "|".blue());
                println!(
                    " {:>3} {} {}",
                    line.to_string().blue(),
                    "|".blue(),
                    source_line
                );

                let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
                let caret_padding = UnicodeWidthStr::width(prefix.as_str());
                println!(
                    "     {} {:>padding$}{}",
                    "|".blue(),
                    "",
                    "^".green(),
                    padding = caret_padding
                );
                println!(
                    "     {} {}{}",
                    "+".green(),
                    context.indent(),
                    comment.green()
                );
                println!();
            }
        }
    }
}

/// Apply operations grouped per file. Paths are resolved against `root`.
///
/// Every file is read once and all of its edits are applied together, so
/// line numbers from the analysis stay valid.
pub(super) fn apply_operations(root: &Path, ops: &[Operation]) -> Result<ActionStats> {
    let mut by_file: BTreeMap<&str, Vec<&Operation>> = BTreeMap::new();
    for op in ops {
        by_file.entry(op.context().file_path()).or_default().push(op);
    }

    let mut stats = ActionStats {
        processed: ops.len(),
        ..ActionStats::default()
    };

    for (file_path, file_ops) in by_file {
        let path = root.join(file_path);
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let index = LineIndex::new(&source);

        let mut edits = EditSet::new();
        for op in file_ops {
            if !edits.push(op.to_edit(&index)) {
                stats.skipped += 1;
            }
        }
        if edits.is_empty() {
            continue;
        }

        fs::write(&path, edits.apply(&source))
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        stats.changes_applied += edits.len();
        stats.files_modified += 1;
    }

    Ok(stats)
}
