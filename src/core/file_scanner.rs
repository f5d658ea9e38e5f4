use std::{
    collections::{BTreeSet, HashSet},
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::config::TEST_FILE_PATTERNS;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Dart files, sorted.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Options for [`scan_files`], borrowed from the configuration.
pub struct ScanOptions<'a> {
    pub scan_roots: &'a [String],
    pub exclude_dirs: &'a [String],
    pub ignores: &'a [String],
    pub ignore_test_files: bool,
}

/// Resolve scan roots against `base_dir`.
///
/// Literal roots that do not exist are returned in the error list so the
/// caller can refuse to run.
pub fn resolve_scan_roots(base_dir: &str, scan_roots: &[String]) -> (Vec<PathBuf>, Vec<String>) {
    let mut paths = Vec::new();
    let mut missing = Vec::new();

    for root in scan_roots {
        if is_glob_pattern(root) {
            let full_pattern = Path::new(base_dir).join(root);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|p| p.is_dir())),
                Err(e) => warn!("invalid scan root pattern '{}': {}", root, e),
            }
        } else {
            let path = Path::new(base_dir).join(root);
            if path.is_dir() {
                paths.push(path);
            } else {
                missing.push(path.to_string_lossy().into_owned());
            }
        }
    }

    (paths, missing)
}

pub fn scan_files(base_dir: &str, options: &ScanOptions) -> ScanResult {
    let mut files: BTreeSet<String> = BTreeSet::new();
    let mut skipped_count = 0;

    let excluded: HashSet<&str> = options.exclude_dirs.iter().map(String::as_str).collect();

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!("invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }
    if options.ignore_test_files {
        glob_patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
    }

    let (roots, _) = resolve_scan_roots(base_dir, options.scan_roots);
    for root in roots {
        let walker = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry, &excluded));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_dart_file(path) {
                files.insert(path_str.into_owned());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn is_excluded_dir(entry: &DirEntry, excluded: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excluded.contains(name))
}

fn is_dart_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("dart")
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn options<'a>(
        roots: &'a [String],
        excludes: &'a [String],
        ignores: &'a [String],
        ignore_tests: bool,
    ) -> ScanOptions<'a> {
        ScanOptions {
            scan_roots: roots,
            exclude_dirs: excludes,
            ignores,
            ignore_test_files: ignore_tests,
        }
    }

    #[test]
    fn test_scan_dart_files_sorted() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir_all(lib.join("widgets")).unwrap();
        File::create(lib.join("main.dart")).unwrap();
        File::create(lib.join("widgets").join("button.dart")).unwrap();
        File::create(lib.join("README.md")).unwrap();

        let roots = vec!["lib".to_string()];
        let result = scan_files(
            dir.path().to_str().unwrap(),
            &options(&roots, &[], &[], false),
        );

        assert_eq!(result.files.len(), 2);
        assert!(result.files[0].ends_with("main.dart"));
        assert!(result.files[1].ends_with("widgets/button.dart"));
    }

    #[test]
    fn test_scan_honors_exclude_dirs_and_ignores() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir_all(lib.join("generated")).unwrap();
        File::create(lib.join("generated").join("intl.dart")).unwrap();
        File::create(lib.join("user.g.dart")).unwrap();
        File::create(lib.join("home.dart")).unwrap();

        let roots = vec!["lib".to_string()];
        let excludes = vec!["generated".to_string()];
        let ignores = vec!["**/*.g.dart".to_string()];
        let result = scan_files(
            dir.path().to_str().unwrap(),
            &options(&roots, &excludes, &ignores, false),
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("home.dart"));
    }

    #[test]
    fn test_scan_ignores_test_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::create_dir_all(dir.path().join("test")).unwrap();
        File::create(dir.path().join("lib").join("app.dart")).unwrap();
        File::create(dir.path().join("lib").join("app_test.dart")).unwrap();
        File::create(dir.path().join("test").join("widget_test.dart")).unwrap();

        let roots = vec!["lib".to_string(), "test".to_string()];
        let result = scan_files(
            dir.path().to_str().unwrap(),
            &options(&roots, &[], &[], true),
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("app.dart"));
    }

    #[test]
    fn test_resolve_reports_missing_roots() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();

        let roots = vec!["lib".to_string(), "missing".to_string()];
        let (found, missing) = resolve_scan_roots(dir.path().to_str().unwrap(), &roots);
        assert_eq!(found.len(), 1);
        assert_eq!(missing.len(), 1);
        assert!(missing[0].ends_with("missing"));
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("lib/*"));
        assert!(is_glob_pattern("packages/*/lib"));
        assert!(!is_glob_pattern("lib"));
    }
}
