use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".arbliftrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*_test.dart",
    "**/test/**",
    "**/test_driver/**",
    "**/integration_test/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_scan_roots")]
    pub scan_roots: Vec<String>,
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_true")]
    pub ignore_test_files: bool,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default)]
    pub include_comments: bool,
    #[serde(default)]
    pub custom_ui_patterns: Vec<String>,
    #[serde(default = "default_user_facing_params")]
    pub user_facing_params: Vec<String>,
    #[serde(default = "default_user_facing_callees")]
    pub user_facing_callees: Vec<String>,
    #[serde(default = "default_ui_callee_suffixes")]
    pub ui_callee_suffixes: Vec<String>,
    #[serde(default = "default_non_ui_paths")]
    pub non_ui_paths: Vec<String>,
    #[serde(default = "default_arb_file")]
    pub arb_file: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_context_before")]
    pub context_before: usize,
    #[serde(default = "default_context_after")]
    pub context_after: usize,
    #[serde(default = "default_max_key_length")]
    pub max_key_length: usize,
    /// Worker threads; 0 uses the available parallelism.
    #[serde(default)]
    pub jobs: usize,
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

/// Templates used when rewriting literals into localization calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriteConfig {
    /// Accessor used when a `BuildContext` is in scope. `{context}` is the
    /// discovered parameter name.
    pub ambient_accessor: String,
    /// Accessor used elsewhere. `{handle}` is replaced by `static_handle`.
    pub static_accessor: String,
    pub static_handle: String,
    pub import_uri: String,
    /// How far back the context scan looks for an enclosing build scope.
    pub scan_lines: usize,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            ambient_accessor: "AppLocalizations.of({context})!".to_string(),
            static_accessor: "lookupAppLocalizations({handle})".to_string(),
            static_handle: "locale".to_string(),
            import_uri: "package:flutter_gen/gen_l10n/app_localizations.dart".to_string(),
            scan_lines: 150,
        }
    }
}

impl RewriteConfig {
    pub fn ambient(&self, context: &str) -> String {
        self.ambient_accessor.replace("{context}", context)
    }

    pub fn fixed(&self) -> String {
        self.static_accessor.replace("{handle}", &self.static_handle)
    }

    /// Call prefixes that mark text as already going through a localization
    /// accessor, derived from the two templates (`AppLocalizations.of(`).
    pub fn accessor_prefixes(&self) -> Vec<String> {
        [&self.ambient_accessor, &self.static_accessor]
            .iter()
            .filter_map(|template| {
                template
                    .find('(')
                    .map(|open| template[..=open].to_string())
            })
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_scan_roots() -> Vec<String> {
    strings(&["lib"])
}

fn default_exclude_dirs() -> Vec<String> {
    strings(&[
        "build",
        ".dart_tool",
        ".git",
        ".idea",
        ".fvm",
        "generated",
    ])
}

fn default_ignores() -> Vec<String> {
    strings(&[
        "**/*.g.dart",
        "**/*.freezed.dart",
        "**/*.gr.dart",
        "**/*.mocks.dart",
        "**/l10n/app_localizations*.dart",
    ])
}

fn default_true() -> bool {
    true
}

fn default_user_facing_params() -> Vec<String> {
    strings(&[
        "label",
        "labelText",
        "hintText",
        "helperText",
        "errorText",
        "counterText",
        "prefixText",
        "suffixText",
        "title",
        "subtitle",
        "tooltip",
        "semanticLabel",
        "semanticsLabel",
        "message",
        "content",
        "text",
        "placeholder",
        "description",
        "buttonText",
        "confirmText",
        "cancelText",
        "helpText",
        "fieldLabelText",
        "fieldHintText",
        "barrierLabel",
    ])
}

fn default_user_facing_callees() -> Vec<String> {
    strings(&[
        "Text",
        "SelectableText",
        "TextSpan",
        "Tooltip",
        "SnackBar",
        "Tab",
        "AlertDialog",
        "SimpleDialog",
        "ListTile",
        "Chip",
        "InputDecoration",
        "BottomNavigationBarItem",
        "NavigationDestination",
        "PopupMenuItem",
        "DropdownMenuItem",
        "Semantics",
    ])
}

fn default_ui_callee_suffixes() -> Vec<String> {
    strings(&[
        "Button", "Text", "Label", "Title", "Dialog", "Tooltip", "Banner", "Chip", "Tab",
    ])
}

fn default_non_ui_paths() -> Vec<String> {
    strings(&[
        "**/data/**",
        "**/domain/**",
        "**/services/**",
        "**/service/**",
        "**/repositories/**",
        "**/repository/**",
        "**/models/**",
        "**/model/**",
        "**/*_repository.dart",
        "**/*_service.dart",
        "**/*_model.dart",
    ])
}

fn default_arb_file() -> String {
    "lib/l10n/app_en.arb".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_context_before() -> usize {
    2
}

fn default_context_after() -> usize {
    1
}

fn default_max_key_length() -> usize {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            scan_roots: default_scan_roots(),
            exclude_dirs: default_exclude_dirs(),
            ignores: default_ignores(),
            ignore_test_files: true,
            ignore_texts: Vec::new(),
            include_comments: false,
            custom_ui_patterns: Vec::new(),
            user_facing_params: default_user_facing_params(),
            user_facing_callees: default_user_facing_callees(),
            ui_callee_suffixes: default_ui_callee_suffixes(),
            non_ui_paths: default_non_ui_paths(),
            arb_file: default_arb_file(),
            locale: default_locale(),
            context_before: default_context_before(),
            context_after: default_context_after(),
            max_key_length: default_max_key_length(),
            jobs: 0,
            rewrite: RewriteConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for malformed glob patterns, malformed custom UI
    /// regexes and unusable rewrite templates.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.non_ui_paths {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'nonUiPaths': \"{}\"", pattern)
            })?;
        }

        for pattern in &self.scan_roots {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'scanRoots': \"{}\"", pattern)
                })?;
            }
        }

        for pattern in &self.custom_ui_patterns {
            Regex::new(pattern).with_context(|| {
                format!("Invalid regex in 'customUiPatterns': \"{}\"", pattern)
            })?;
        }

        if !self.rewrite.ambient_accessor.contains("{context}") {
            bail!(
                "'rewrite.ambientAccessor' must contain {{context}}: \"{}\"",
                self.rewrite.ambient_accessor
            );
        }

        if self.max_key_length == 0 {
            bail!("'maxKeyLength' must be greater than 0");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
