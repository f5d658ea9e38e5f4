//! Classification engine: decides whether a harvested literal is
//! user-facing text that still needs localizing.
//!
//! Rules run in a fixed order and the first one that matches decides:
//!
//! 0. suppression directive or `ignoreTexts` entry (skip)
//! 1. user-facing parameter or widget argument (keep)
//! 2. logger / exception / diagnostics call (skip)
//! 3. non-UI architectural layer (skip)
//! 4. technical content such as URLs or identifiers (skip)
//! 5. UI evidence in the surrounding lines (keep)
//! 6. already localized, or matches a known resource (skip)
//! 7. otherwise skip
//!
//! `classify` is a pure function; every table it consults is immutable.

pub mod patterns;
pub mod window;

use std::collections::HashSet;

use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;

use crate::{
    config::Config,
    core::{
        data::{
            ArgumentRole, KeepReason, KnownKeys, LiteralOccurrence, SkipReason, TechnicalKind,
            UiCategory, Verdict,
        },
        parsers::Span,
    },
    utils::{contains_alphabetic, strip_placeholders},
};

use patterns::{
    CUSTOM_PRIORITY, DATE_FORMAT, DATE_FORMAT_FIELD, ERROR_TYPE, LOCALIZED_ACCESSOR,
    LOGGER_RECEIVER, NON_UI_CALLEE, TECHNICAL, UI_EVIDENCE,
};
pub use window::ContextWindow;

/// Configuration compiled once per run and shared by every worker.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    ignore_texts: HashSet<String>,
    user_facing_params: HashSet<String>,
    user_facing_callees: HashSet<String>,
    ui_callee_suffixes: Vec<String>,
    non_ui_paths: Vec<Pattern>,
    custom_ui_patterns: Vec<Regex>,
    accessor_prefixes: Vec<String>,
    pub context_before: usize,
    pub context_after: usize,
    pub include_comments: bool,
}

impl ClassifierConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let non_ui_paths = config
            .non_ui_paths
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'nonUiPaths': \"{}\"", p))
            })
            .collect::<Result<Vec<_>>>()?;
        let custom_ui_patterns = config
            .custom_ui_patterns
            .iter()
            .map(|p| {
                Regex::new(p)
                    .with_context(|| format!("Invalid regex in 'customUiPatterns': \"{}\"", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ignore_texts: config.ignore_texts.iter().cloned().collect(),
            user_facing_params: config.user_facing_params.iter().cloned().collect(),
            user_facing_callees: config.user_facing_callees.iter().cloned().collect(),
            ui_callee_suffixes: config.ui_callee_suffixes.clone(),
            non_ui_paths,
            custom_ui_patterns,
            accessor_prefixes: config.rewrite.accessor_prefixes(),
            context_before: config.context_before,
            context_after: config.context_after,
            include_comments: config.include_comments,
        })
    }

    /// Comment spans the context window should hide.
    pub fn blanked<'c>(&self, comments: &'c [Span]) -> &'c [Span] {
        if self.include_comments { &[] } else { comments }
    }
}

/// Classify one literal.
///
/// `file_path` is relative to the project root and is only used for the
/// architectural-layer rule.
pub fn classify(
    occurrence: &LiteralOccurrence,
    window: &ContextWindow,
    file_path: &str,
    known: &KnownKeys,
    config: &ClassifierConfig,
) -> Verdict {
    suppression(occurrence, window, config)
        .or_else(|| semantic_override(occurrence, config))
        .or_else(|| negative_override(occurrence))
        .or_else(|| non_ui_layer(file_path, config))
        .or_else(|| technical_content(&occurrence.content).map(|k| Verdict::Skip(SkipReason::Technical(k))))
        .or_else(|| ui_evidence(window, config))
        .or_else(|| already_localized(occurrence, window, known, config))
        .unwrap_or(Verdict::Skip(SkipReason::NoUiEvidence))
}

fn suppression(
    occurrence: &LiteralOccurrence,
    window: &ContextWindow,
    config: &ClassifierConfig,
) -> Option<Verdict> {
    if window.suppressed {
        return Some(Verdict::Skip(SkipReason::Suppressed));
    }
    if config.ignore_texts.contains(occurrence.content.trim()) {
        return Some(Verdict::Skip(SkipReason::IgnoredText));
    }
    None
}

fn semantic_override(occurrence: &LiteralOccurrence, config: &ClassifierConfig) -> Option<Verdict> {
    if !contains_alphabetic(&strip_placeholders(&occurrence.content)) {
        return None;
    }

    match &occurrence.role {
        ArgumentRole::Named(label) if config.user_facing_params.contains(label) => {
            Some(Verdict::Keep(KeepReason::UserFacingParam(label.clone())))
        }
        ArgumentRole::Positional(0) => {
            let name = occurrence.callee_name()?;
            let user_facing = config.user_facing_callees.contains(name)
                || config
                    .ui_callee_suffixes
                    .iter()
                    .any(|suffix| name.ends_with(suffix.as_str()));
            user_facing.then(|| Verdict::Keep(KeepReason::UserFacingCallee(name.to_string())))
        }
        _ => None,
    }
}

fn negative_override(occurrence: &LiteralOccurrence) -> Option<Verdict> {
    let callee = occurrence.callee.as_deref()?;
    let segments: Vec<&str> = callee
        .split('.')
        .map(|segment| segment.trim_end_matches("()"))
        .collect();
    let (name, receivers) = segments.split_last()?;

    let non_ui = NON_UI_CALLEE.is_match(name)
        || segments.iter().any(|s| ERROR_TYPE.is_match(s))
        || receivers.iter().any(|s| LOGGER_RECEIVER.is_match(s));

    non_ui.then(|| Verdict::Skip(SkipReason::NonUiCall(callee.to_string())))
}

fn non_ui_layer(file_path: &str, config: &ClassifierConfig) -> Option<Verdict> {
    config
        .non_ui_paths
        .iter()
        .any(|pattern| pattern.matches(file_path))
        .then_some(Verdict::Skip(SkipReason::NonUiPath))
}

/// The technical shape of `content`, if it has one.
pub fn technical_content(content: &str) -> Option<TechnicalKind> {
    let trimmed = content.trim();
    if !contains_alphabetic(&strip_placeholders(trimmed)) {
        return Some(TechnicalKind::NoLetters);
    }
    if trimmed.chars().count() == 1 {
        return Some(TechnicalKind::SingleChar);
    }
    if let Some((kind, _)) = TECHNICAL.iter().find(|(_, pattern)| pattern.is_match(trimmed)) {
        return Some(*kind);
    }

    let has_separator = trimmed.contains([':', '-', '/', '.', ',', ' ']);
    if DATE_FORMAT.is_match(trimmed)
        && DATE_FORMAT_FIELD.is_match(trimmed)
        && (has_separator || trimmed.contains("yyyy"))
    {
        return Some(TechnicalKind::DateFormat);
    }
    None
}

fn ui_evidence(window: &ContextWindow, config: &ClassifierConfig) -> Option<Verdict> {
    let mut best: Option<(UiCategory, u8)> = None;
    let mut consider = |category: UiCategory, priority: u8| {
        if best.is_none_or(|(_, current)| priority > current) {
            best = Some((category, priority));
        }
    };

    for line in window.lines.iter().filter(|l| !l.is_empty()) {
        for (category, pattern, priority) in UI_EVIDENCE.iter() {
            if pattern.is_match(line) {
                consider(*category, *priority);
            }
        }
        for pattern in &config.custom_ui_patterns {
            if pattern.is_match(line) {
                consider(UiCategory::Custom, CUSTOM_PRIORITY);
            }
        }
    }

    best.map(|(category, _)| Verdict::Keep(KeepReason::UiEvidence(category)))
}

fn already_localized(
    occurrence: &LiteralOccurrence,
    window: &ContextWindow,
    known: &KnownKeys,
    config: &ClassifierConfig,
) -> Option<Verdict> {
    if LOCALIZED_ACCESSOR.is_match(window.own_line)
        || config
            .accessor_prefixes
            .iter()
            .any(|prefix| window.own_line.contains(prefix.as_str()))
    {
        return Some(Verdict::Skip(SkipReason::AlreadyLocalized));
    }
    if known.contains(occurrence.content.trim()) {
        return Some(Verdict::Skip(SkipReason::KnownResource));
    }
    None
}
