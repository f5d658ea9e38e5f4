use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{Context as _, Result, bail};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        classify::{ClassifierConfig, ContextWindow, classify},
        data::{KnownKeys, LiteralOccurrence, ResourceEntry, SourceContext, SourceLocation, Verdict},
        extract::{Suppressions, harvest},
        file_scanner::{ScanOptions, resolve_scan_roots, scan_files},
        keys::{KeyRegistry, PersistOutcome, persist_resource},
        parsers::{
            LineIndex, ParseError, parse_dart,
            arb::{ResourceFile, load_resource_file, scan_arb_files},
        },
        rewrite::{FilePlan, Rewritability, finish, plan_file, prepare},
    },
    issues::{
        HardcodedTextIssue, Issue, ParseErrorIssue, UnrewritableIssue, WriteErrorIssue,
    },
};

/// One harvested literal with everything later stages need.
#[derive(Debug, Clone)]
pub struct AnalyzedLiteral {
    pub occurrence: LiteralOccurrence,
    pub verdict: Verdict,
    pub context: SourceContext,
    /// Set for kept literals only.
    pub rewrite: Option<Rewritability>,
}

#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    /// Path as scanned, used for reading and writing.
    pub path: String,
    /// Path relative to the project root, used in reports.
    pub display_path: String,
    pub source: String,
    pub literals: Vec<AnalyzedLiteral>,
}

impl AnalyzedFile {
    pub fn kept(&self) -> impl Iterator<Item = &AnalyzedLiteral> {
        self.literals.iter().filter(|l| l.verdict.is_keep())
    }
}

#[derive(Debug, Clone)]
pub enum FileAnalysis {
    Analyzed(AnalyzedFile),
    Failed(ParseErrorIssue),
}

/// Keys allocated and edits planned for the whole batch.
pub struct RewritePlan<'a> {
    pub files: Vec<(&'a AnalyzedFile, FilePlan)>,
    pub entries: Vec<ResourceEntry>,
}

impl RewritePlan<'_> {
    pub fn rewrite_count(&self) -> usize {
        self.files.iter().map(|(_, plan)| plan.rewrites.len()).sum()
    }
}

/// Result of writing a plan to disk.
#[derive(Debug, Default)]
pub struct ApplyOutcome {
    pub files_written: usize,
    pub rewrites_applied: usize,
    pub entries_added: usize,
    pub backup: Option<PathBuf>,
    pub issues: Vec<Issue>,
}

/// Analysis context for one run.
///
/// Holds the merged configuration, the scanned file list, the known-key
/// snapshot and the worker pool. Per-file analysis runs lazily on first
/// access and is shared by every command.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--arb-file`)
/// 2. `.arbliftrc.json` config file
/// 3. Built-in defaults
pub struct ScanContext {
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Dart files to analyze, sorted.
    pub files: Vec<String>,

    classifier: ClassifierConfig,

    /// Keys and values of every ARB file in the project, read-only.
    known: KnownKeys,

    /// The resource file new entries are written to.
    resource: ResourceFile,

    pool: rayon::ThreadPool,

    /// Shared with pool workers through `&self`.
    analyses: OnceLock<Vec<FileAnalysis>>,
}

impl ScanContext {
    /// Load configuration, scan files and snapshot the ARB catalog.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - A literal scan root does not exist
    /// - The resource file cannot be read
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            debug!("no .arbliftrc.json found, using default configuration");
        }

        let mut config = config_result.config;
        if let Some(ref arb_file) = common_args.arb_file {
            config.arb_file = arb_file.clone();
        }
        if let Some(jobs) = common_args.jobs {
            config.jobs = jobs;
        }

        let classifier = ClassifierConfig::from_config(&config)?;

        let scan_base = root_dir.join(&config.source_root);
        let base = scan_base
            .to_str()
            .with_context(|| format!("Invalid path: {:?}", scan_base))?;

        let (_, missing) = resolve_scan_roots(base, &config.scan_roots);
        if !missing.is_empty() {
            bail!("Scan root does not exist: {}", missing.join(", "));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.jobs)
            .build()
            .context("Failed to build worker pool")?;

        let options = ScanOptions {
            scan_roots: &config.scan_roots,
            exclude_dirs: &config.exclude_dirs,
            ignores: &config.ignores,
            ignore_test_files: config.ignore_test_files,
        };
        let (scan_result, catalog) = pool.install(|| {
            rayon::join(
                || scan_files(base, &options),
                || scan_arb_files(&root_dir, &config.exclude_dirs),
            )
        });

        if scan_result.skipped_count > 0 {
            warn!(
                "{} path(s) skipped due to access errors",
                scan_result.skipped_count
            );
        }
        debug!(
            "{} dart file(s), {} known key(s) from {} arb file(s)",
            scan_result.files.len(),
            catalog.known.len(),
            catalog.files.len()
        );

        let resource = load_resource_file(&root_dir.join(&config.arb_file))?;

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            classifier,
            known: catalog.known,
            resource,
            pool,
            analyses: OnceLock::new(),
        })
    }

    /// Parse, harvest, classify and prepare every file (lazy, parallel).
    ///
    /// Results are in file order.
    pub fn analyses(&self) -> &[FileAnalysis] {
        self.analyses.get_or_init(|| {
            self.pool.install(|| {
                self.files
                    .par_iter()
                    .map(|file_path| self.analyze_file(file_path))
                    .collect()
            })
        })
    }

    fn analyze_file(&self, file_path: &str) -> FileAnalysis {
        let display_path = self.display_path(file_path);
        debug!("analyzing {}", display_path);

        let source = match fs::read_to_string(file_path) {
            Ok(source) => source,
            Err(e) => {
                warn!("{}: {}", display_path, e);
                return FileAnalysis::Failed(ParseErrorIssue {
                    file_path: display_path,
                    error: format!("Failed to read file: {}", e),
                });
            }
        };

        let parsed = match parse_dart(&source) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("{}: {}", display_path, e);
                return FileAnalysis::Failed(ParseErrorIssue {
                    error: describe_parse_error(&source, &e),
                    file_path: display_path,
                });
            }
        };

        let index = LineIndex::new(&source);
        let suppressions = Suppressions::collect(&source, &parsed.comments, &index);

        let literals = harvest(&parsed.tree, &source, &index)
            .into_iter()
            .map(|occurrence| {
                let window = ContextWindow::build(
                    &source,
                    &index,
                    occurrence.line,
                    self.classifier.context_before,
                    self.classifier.context_after,
                    self.classifier.blanked(&parsed.comments),
                )
                .with_suppressed(suppressions.is_suppressed(occurrence.line));

                let verdict = classify(
                    &occurrence,
                    &window,
                    &display_path,
                    &self.known,
                    &self.classifier,
                );
                let rewrite = verdict.is_keep().then(|| {
                    prepare(
                        &parsed.tree,
                        &source,
                        &index,
                        &occurrence,
                        &self.config.rewrite,
                    )
                });
                let context = SourceContext::new(
                    SourceLocation::new(&display_path, occurrence.line, occurrence.col),
                    index.line_text(&source, occurrence.line),
                );

                AnalyzedLiteral {
                    occurrence,
                    verdict,
                    context,
                    rewrite,
                }
            })
            .collect();

        FileAnalysis::Analyzed(AnalyzedFile {
            path: file_path.to_string(),
            display_path,
            source,
            literals,
        })
    }

    /// Findings and parse errors, sorted by file, line and column.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        for analysis in self.analyses() {
            match analysis {
                FileAnalysis::Failed(issue) => issues.push(Issue::ParseError(issue.clone())),
                FileAnalysis::Analyzed(file) => {
                    issues.extend(file.kept().filter_map(to_issue));
                }
            }
        }
        issues.sort();
        issues
    }

    /// Allocate keys and plan edits, single-threaded in file order.
    pub fn plan(&self) -> RewritePlan<'_> {
        let mut registry =
            KeyRegistry::new(&self.resource.entries, self.config.max_key_length);
        let mut files = Vec::new();

        for analysis in self.analyses() {
            let FileAnalysis::Analyzed(file) = analysis else {
                continue;
            };
            let rewritable = file.kept().filter_map(|literal| match &literal.rewrite {
                Some(Rewritability::Rewritable {
                    shape,
                    ancestor_edits,
                }) => Some((&literal.occurrence, shape, ancestor_edits.as_slice())),
                _ => None,
            });

            let plan = plan_file(
                &file.display_path,
                &file.source,
                rewritable,
                &mut registry,
                &self.config.rewrite,
            );
            if !plan.is_empty() {
                files.push((file, plan));
            }
        }

        RewritePlan {
            files,
            entries: registry.into_new_entries(),
        }
    }

    /// Write the resource file, then every planned source file.
    ///
    /// Source files are left alone when the resource file cannot be
    /// written, since their replacements would reference missing keys.
    pub fn apply(&self, plan: &RewritePlan) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();

        match persist_resource(&self.resource, &plan.entries, &self.config.locale) {
            Ok(PersistOutcome::Unchanged) => {}
            Ok(PersistOutcome::Written { added, backup }) => {
                outcome.entries_added = added;
                outcome.backup = backup;
            }
            Err(e) => {
                warn!("{:#}", e);
                outcome.issues.push(Issue::WriteError(WriteErrorIssue {
                    file_path: self.display_path(&self.resource.path.to_string_lossy()),
                    error: format!("{:#}", e),
                }));
                return outcome;
            }
        }

        let import_uri = &self.config.rewrite.import_uri;
        let results: Vec<Result<usize, Issue>> = self.pool.install(|| {
            plan.files
                .par_iter()
                .map(|(file, file_plan)| write_file(file, file_plan, import_uri))
                .collect()
        });

        for result in results {
            match result {
                Ok(rewrites) => {
                    outcome.files_written += 1;
                    outcome.rewrites_applied += rewrites;
                }
                Err(issue) => outcome.issues.push(issue),
            }
        }
        outcome.issues.sort();
        outcome
    }

    /// Path relative to the project root, for reports.
    pub fn display_path(&self, file_path: &str) -> String {
        Path::new(file_path)
            .strip_prefix(&self.root_dir)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| file_path.to_string())
    }

    pub fn resource_path(&self) -> &Path {
        &self.resource.path
    }
}

fn to_issue(literal: &AnalyzedLiteral) -> Option<Issue> {
    let Verdict::Keep(reason) = &literal.verdict else {
        return None;
    };
    let issue = match &literal.rewrite {
        Some(Rewritability::Blocked(block)) => Issue::Unrewritable(UnrewritableIssue {
            context: literal.context.clone(),
            text: literal.occurrence.content.clone(),
            reason: *block,
        }),
        _ => Issue::HardcodedText(HardcodedTextIssue {
            context: literal.context.clone(),
            text: literal.occurrence.content.clone(),
            reason: reason.clone(),
        }),
    };
    Some(issue)
}

fn write_file(file: &AnalyzedFile, plan: &FilePlan, import_uri: &str) -> Result<usize, Issue> {
    let rewritten = finish(&file.source, plan, import_uri).map_err(|e| {
        warn!("{}: rewrite discarded: {}", file.display_path, e);
        Issue::ParseError(ParseErrorIssue {
            file_path: file.display_path.clone(),
            error: format!("rewrite discarded, output would not parse: {}", e),
        })
    })?;

    fs::write(&file.path, rewritten).map_err(|e| {
        warn!("{}: {}", file.display_path, e);
        Issue::WriteError(WriteErrorIssue {
            file_path: file.display_path.clone(),
            error: format!("Failed to write file: {}", e),
        })
    })?;

    debug!("rewrote {} literal(s) in {}", plan.rewrites.len(), file.display_path);
    Ok(plan.rewrites.len())
}

fn describe_parse_error(source: &str, error: &ParseError) -> String {
    let (line, col) = LineIndex::new(source).line_col(source, error.offset());
    format!("{}:{}: {}", line, col, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CONFIG_FILE_NAME, core::data::KeepReason};
    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        for (path, content) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        dir
    }

    fn context(dir: &TempDir) -> ScanContext {
        ScanContext::new(&CommonArgs {
            source_root: Some(dir.path().to_path_buf()),
            arb_file: None,
            jobs: Some(2),
            verbose: false,
        })
        .unwrap()
    }

    const HOME: &str = "import 'package:flutter/material.dart';\n\nclass Home extends StatelessWidget {\n  @override\n  Widget build(BuildContext context) {\n    logger.error('Connection failed');\n    return Text('Hello World');\n  }\n}\n";

    #[test]
    fn test_issues_report_kept_literals() {
        let dir = project(&[("lib/home.dart", HOME)]);
        let ctx = context(&dir);
        let issues = ctx.issues();

        assert_eq!(issues.len(), 1);
        let Issue::HardcodedText(issue) = &issues[0] else {
            panic!("expected hardcoded text, got {:?}", issues[0]);
        };
        assert_eq!(issue.text, "Hello World");
        assert_eq!(issue.context.file_path(), "lib/home.dart");
        assert_eq!(issue.context.line(), 7);
        assert_eq!(issue.reason, KeepReason::UserFacingCallee("Text".into()));
    }

    #[test]
    fn test_parse_errors_do_not_abort_the_batch() {
        let dir = project(&[
            ("lib/broken.dart", "void f() { Text('x'); "),
            ("lib/home.dart", HOME),
        ]);
        let issues = context(&dir).issues();
        assert_eq!(issues.len(), 2);
        assert!(matches!(&issues[0], Issue::ParseError(e) if e.file_path == "lib/broken.dart"));
        assert!(matches!(&issues[1], Issue::HardcodedText(_)));
    }

    #[test]
    fn test_missing_scan_root_is_fatal() {
        let dir = project(&[(CONFIG_FILE_NAME, r#"{ "scanRoots": ["app"] }"#)]);
        let result = ScanContext::new(&CommonArgs {
            source_root: Some(dir.path().to_path_buf()),
            arb_file: None,
            jobs: None,
            verbose: false,
        });
        let err = result.err().unwrap();
        assert!(err.to_string().contains("Scan root does not exist"));
    }

    #[test]
    fn test_plan_and_apply_are_idempotent() {
        let dir = project(&[("lib/home.dart", HOME)]);
        let ctx = context(&dir);
        let plan = ctx.plan();
        assert_eq!(plan.rewrite_count(), 1);
        assert_eq!(plan.entries[0].key, "helloWorld");

        let outcome = ctx.apply(&plan);
        assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);
        assert_eq!(outcome.files_written, 1);
        assert_eq!(outcome.entries_added, 1);

        let rewritten = fs::read_to_string(dir.path().join("lib/home.dart")).unwrap();
        assert!(rewritten.contains("return Text(AppLocalizations.of(context)!.helloWorld);"));
        assert!(rewritten.contains("logger.error('Connection failed');"));

        let arb = fs::read_to_string(dir.path().join("lib/l10n/app_en.arb")).unwrap();
        assert!(arb.contains("\"helloWorld\": \"Hello World\""));

        let second = context(&dir);
        assert!(second.issues().is_empty());
        let plan = second.plan();
        assert_eq!(plan.rewrite_count(), 0);
        assert!(plan.entries.is_empty());
    }

    #[test]
    fn test_content_dedup_across_files() {
        let widget = "Widget b(BuildContext context) => Text('Sign in');\n";
        let dir = project(&[("lib/a.dart", widget), ("lib/b.dart", widget)]);
        let ctx = context(&dir);
        let plan = ctx.plan();
        assert_eq!(plan.rewrite_count(), 2);
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].provenance.file_path, "lib/a.dart");
    }

    #[test]
    fn test_existing_resource_entries_are_reused() {
        let dir = project(&[
            ("lib/l10n/app_en.arb", "{\n  \"greeting\": \"Hello World\"\n}\n"),
            ("lib/home.dart", HOME),
        ]);
        let ctx = context(&dir);
        let plan = ctx.plan();
        assert!(plan.entries.is_empty());
        assert_eq!(plan.files[0].1.rewrites[0].key, "greeting");
        assert!(plan.files[0].1.rewrites[0].reused);
    }

    const BATCH: &[(&str, &str)] = &[
        (
            "lib/a.dart",
            "Widget a(BuildContext context) => Column(children: [Text('Save'), Text('Save!')]);\n",
        ),
        (
            "lib/b.dart",
            "Widget b(BuildContext context, String name) => Column(children: [Text('Save?'), Text('Hi $name')]);\n",
        ),
        (
            "lib/c/d.dart",
            "Widget d(BuildContext context) => const Text('Save');\n",
        ),
    ];

    /// Run a full fix on a fresh copy of `BATCH`, returning the ARB file and
    /// every source file.
    fn fix_batch(jobs: usize) -> (String, Vec<String>) {
        let dir = project(BATCH);
        let ctx = ScanContext::new(&CommonArgs {
            source_root: Some(dir.path().to_path_buf()),
            arb_file: None,
            jobs: Some(jobs),
            verbose: false,
        })
        .unwrap();
        let plan = ctx.plan();
        let outcome = ctx.apply(&plan);
        assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);

        let arb = fs::read_to_string(dir.path().join("lib/l10n/app_en.arb")).unwrap();
        let sources = BATCH
            .iter()
            .map(|(path, _)| fs::read_to_string(dir.path().join(path)).unwrap())
            .collect();
        (arb, sources)
    }

    #[test]
    fn test_output_is_identical_across_pool_sizes() {
        let serial = fix_batch(1);
        let parallel = fix_batch(4);
        assert_eq!(serial, parallel);
        assert_eq!(fix_batch(4), parallel);

        let (arb, sources) = serial;
        assert!(arb.contains("\"save\": \"Save\""));
        assert!(arb.contains("\"save2\": \"Save!\""));
        assert!(arb.contains("\"save3\": \"Save?\""));
        assert!(sources[1].contains("AppLocalizations.of(context)!.hi(name)"));
        assert!(sources[2].contains("=> Text(AppLocalizations.of(context)!.save);"));
    }

    #[test]
    fn test_literal_braces_are_reported_not_rewritten() {
        let dir = project(&[(
            "lib/hint.dart",
            "Widget hint(BuildContext context) => Text('Use {name} here');\n",
        )]);
        let ctx = context(&dir);
        let issues = ctx.issues();
        assert!(matches!(&issues[..], [Issue::Unrewritable(i)] if i.text == "Use {name} here"));

        let plan = ctx.plan();
        assert_eq!(plan.rewrite_count(), 0);
        assert!(plan.entries.is_empty());
    }

    #[test]
    fn test_context_is_shareable_across_threads() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<ScanContext>();
    }

    #[test]
    fn test_arb_file_override() {
        let dir = project(&[("lib/home.dart", HOME)]);
        let ctx = ScanContext::new(&CommonArgs {
            source_root: Some(dir.path().to_path_buf()),
            arb_file: Some("l10n/intl_en.arb".to_string()),
            jobs: None,
            verbose: false,
        })
        .unwrap();
        assert_eq!(ctx.resource_path(), dir.path().join("l10n/intl_en.arb"));
    }
}
