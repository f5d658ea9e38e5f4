//! ARB resource files: loading the target file and scanning the project
//! catalog of already-localized keys.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::data::KnownKeys;

/// What was found at the resource file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    Missing,
    /// Parsed successfully; `raw` is kept so new entries can be spliced in
    /// without reformatting existing ones.
    WellFormed { raw: String },
    /// Unparseable or not a JSON object. Treated as empty and backed up
    /// before being replaced.
    Malformed,
}

#[derive(Debug, Clone)]
pub struct ResourceFile {
    pub path: PathBuf,
    pub state: ResourceState,
    /// Message entries (`@`-prefixed metadata excluded) in file order.
    pub entries: Vec<(String, String)>,
}

impl ResourceFile {
    pub fn exists(&self) -> bool {
        self.state != ResourceState::Missing
    }
}

pub fn load_resource_file(path: &Path) -> Result<ResourceFile> {
    if !path.exists() {
        debug!("resource file {:?} does not exist yet", path);
        return Ok(ResourceFile {
            path: path.to_path_buf(),
            state: ResourceState::Missing,
            entries: Vec::new(),
        });
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read resource file: {:?}", path))?;

    let (state, entries) = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => (ResourceState::WellFormed { raw }, message_entries(&map)),
        Ok(_) => {
            warn!("resource file {:?} is not a JSON object; it will be replaced", path);
            (ResourceState::Malformed, Vec::new())
        }
        Err(e) => {
            warn!("resource file {:?} is malformed ({}); it will be replaced", path, e);
            (ResourceState::Malformed, Vec::new())
        }
    };

    Ok(ResourceFile {
        path: path.to_path_buf(),
        state,
        entries,
    })
}

fn message_entries(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .filter(|(key, _)| !key.starts_with('@'))
        .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
        .collect()
}

/// A warning from scanning the ARB catalog.
#[derive(Debug, Clone)]
pub struct ArbScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanArbResult {
    pub known: KnownKeys,
    pub files: Vec<String>,
    pub warnings: Vec<ArbScanWarning>,
}

/// Collect keys and values from every `*.arb` file under `root`.
pub fn scan_arb_files(root: &Path, exclude_dirs: &[String]) -> ScanArbResult {
    let excluded: HashSet<&str> = exclude_dirs.iter().map(String::as_str).collect();
    let mut result = ScanArbResult::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| excluded.contains(name)))
        });

    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("arb")
        {
            continue;
        }
        let file_path = path.to_string_lossy().into_owned();

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str::<Value>(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(Value::Object(map)) => {
                for (key, value) in message_entries(&map) {
                    result.known.insert(key, value);
                }
                result.files.push(file_path);
            }
            Ok(_) => {
                warn!("skipping {}: not a JSON object", file_path);
                result.warnings.push(ArbScanWarning {
                    file_path,
                    error: "not a JSON object".to_string(),
                });
            }
            Err(error) => {
                warn!("skipping {}: {}", file_path, error);
                result.warnings.push(ArbScanWarning { file_path, error });
            }
        }
    }

    result
}
