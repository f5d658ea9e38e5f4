//! Persisting new entries into the ARB resource file.
//!
//! An existing well-formed file keeps its bytes; new entries are spliced in
//! before the closing brace using the file's own indentation. A missing file
//! is written from scratch with `@@locale` first. A malformed file is copied
//! to `<name>.bak` and replaced.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value, json, ser::PrettyFormatter};
use tracing::warn;

use crate::core::{
    data::ResourceEntry,
    parsers::arb::{ResourceFile, ResourceState},
};

const DEFAULT_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Nothing to add; the file was not touched.
    Unchanged,
    Written {
        added: usize,
        backup: Option<PathBuf>,
    },
}

/// Render the resource file content with `entries` added.
///
/// Returns `None` when there is nothing to add.
pub fn render_resource(
    resource: &ResourceFile,
    entries: &[ResourceEntry],
    locale: &str,
) -> Result<Option<String>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let content = match &resource.state {
        ResourceState::WellFormed { raw } => splice(raw, entries)?,
        ResourceState::Missing | ResourceState::Malformed => fresh(entries, locale)?,
    };
    Ok(Some(content))
}

pub fn persist_resource(
    resource: &ResourceFile,
    entries: &[ResourceEntry],
    locale: &str,
) -> Result<PersistOutcome> {
    let Some(content) = render_resource(resource, entries, locale)? else {
        return Ok(PersistOutcome::Unchanged);
    };

    let path = &resource.path;
    let backup = match resource.state {
        ResourceState::Malformed => Some(backup(path)?),
        _ => None,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(PersistOutcome::Written {
        added: entries.len(),
        backup,
    })
}

fn backup(path: &Path) -> Result<PathBuf> {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    let backup = path.with_file_name(name);
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to back up {} to {}", path.display(), backup.display()))?;
    warn!("malformed resource file backed up to {}", backup.display());
    Ok(backup)
}

fn metadata(entry: &ResourceEntry) -> Value {
    let mut meta = Map::new();
    meta.insert(
        "description".to_string(),
        Value::String(format!("Extracted from {}", entry.provenance)),
    );
    if !entry.placeholders.is_empty() {
        let placeholders: Map<String, Value> = entry
            .placeholders
            .iter()
            .map(|p| {
                (
                    p.name.clone(),
                    json!({ "type": "Object", "example": p.example }),
                )
            })
            .collect();
        meta.insert("placeholders".to_string(), Value::Object(placeholders));
    }
    Value::Object(meta)
}

fn fresh(entries: &[ResourceEntry], locale: &str) -> Result<String> {
    let mut sorted: Vec<&ResourceEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    let mut root = Map::new();
    root.insert("@@locale".to_string(), Value::String(locale.to_string()));
    for entry in sorted {
        root.insert(entry.key.clone(), Value::String(entry.value.clone()));
        root.insert(format!("@{}", entry.key), metadata(entry));
    }

    let content = serde_json::to_string_pretty(&Value::Object(root))
        .context("Failed to serialize resource file")?;
    Ok(format!("{}\n", content))
}

fn splice(raw: &str, entries: &[ResourceEntry]) -> Result<String> {
    let close = raw
        .rfind('}')
        .context("Resource file has no closing brace")?;
    let head = raw[..close].trim_end();
    let tail = &raw[close..];
    let indent = detect_indent(raw);
    let mut needs_comma = !head.ends_with('{');

    let mut out = head.to_string();
    for entry in entries {
        if needs_comma {
            out.push(',');
        }
        out.push('\n');
        write_entry(&mut out, entry, indent)?;
        needs_comma = true;
    }
    out.push('\n');
    out.push_str(tail);
    Ok(out)
}

fn write_entry(out: &mut String, entry: &ResourceEntry, indent: &str) -> Result<()> {
    let key = serde_json::to_string(&entry.key)?;
    let value = serde_json::to_string(&entry.value)?;
    let meta_key = serde_json::to_string(&format!("@{}", entry.key))?;
    let meta = pretty(&metadata(entry), indent)?;

    out.push_str(&format!("{indent}{key}: {value},\n"));
    out.push_str(&format!("{indent}{meta_key}: "));
    for (i, line) in meta.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(indent);
        }
        out.push_str(line);
    }
    Ok(())
}

fn pretty(value: &Value, indent: &str) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value
        .serialize(&mut serializer)
        .context("Failed to serialize resource metadata")?;
    String::from_utf8(buf).context("Resource metadata is not valid UTF-8")
}

/// Indentation of the first member line, or two spaces.
fn detect_indent(raw: &str) -> &str {
    raw.lines()
        .skip(1)
        .find_map(|line| {
            let trimmed = line.trim_start();
            (trimmed.starts_with('"') && trimmed.len() < line.len())
                .then(|| &line[..line.len() - trimmed.len()])
        })
        .unwrap_or(DEFAULT_INDENT)
}
