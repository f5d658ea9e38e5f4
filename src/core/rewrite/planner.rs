//! Turning kept literals into edits.
//!
//! `prepare` runs per literal on the worker pool and only looks at the
//! file's own tree. `plan_file` runs single-threaded because it allocates
//! keys from the shared registry. `finish` applies a plan to the original
//! buffer and checks the result still parses.

use std::fmt;

use crate::{
    config::RewriteConfig,
    core::{
        data::{LiteralOccurrence, SourceLocation},
        keys::KeyRegistry,
        parsers::{DeclKeyword, LineIndex, NodeId, NodeKind, ParseError, SyntaxTree, parse_dart},
    },
    utils::has_literal_braces,
};

use super::{
    edit::{EditSet, TextEdit},
    scope::{CallShape, call_shape},
};

/// Why a kept literal cannot be rewritten in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    DefaultValue,
    Annotation,
    CasePattern,
    EnumValue,
    /// Imports belong to the owning library, not to a `part of` file.
    PartOfFile,
    /// `{` or `}` in the text would be read as ARB placeholder syntax.
    LiteralBraces,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BlockReason::DefaultValue => "default parameter value",
            BlockReason::Annotation => "annotation argument",
            BlockReason::CasePattern => "case pattern",
            BlockReason::EnumValue => "enum value",
            BlockReason::PartOfFile => "`part of` file",
            BlockReason::LiteralBraces => "literal braces",
        };
        f.write_str(text)
    }
}

impl BlockReason {
    pub fn hint(&self) -> &'static str {
        match self {
            BlockReason::PartOfFile => "rewrite it in the owning library file by hand",
            BlockReason::LiteralBraces => "ARB messages treat braces as placeholders; localize it by hand",
            _ => "must stay constant; localize it by hand",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewritability {
    Rewritable {
        shape: CallShape,
        /// `const` removals and `const` to `final` swaps on ancestors.
        ancestor_edits: Vec<TextEdit>,
    },
    Blocked(BlockReason),
}

pub fn prepare(
    tree: &SyntaxTree,
    source: &str,
    index: &LineIndex,
    occurrence: &LiteralOccurrence,
    rewrite: &RewriteConfig,
) -> Rewritability {
    if let Some(reason) = const_required(tree, occurrence) {
        return Rewritability::Blocked(reason);
    }
    if is_part_of(tree) {
        return Rewritability::Blocked(BlockReason::PartOfFile);
    }
    if has_literal_braces(&occurrence.content, occurrence.variables.len()) {
        return Rewritability::Blocked(BlockReason::LiteralBraces);
    }

    Rewritability::Rewritable {
        shape: call_shape(source, index, occurrence.offset(), rewrite.scan_lines),
        ancestor_edits: ancestor_edits(tree, source, occurrence),
    }
}

fn const_required(tree: &SyntaxTree, occurrence: &LiteralOccurrence) -> Option<BlockReason> {
    let mut inside_function = false;
    for ancestor in tree.ancestors(occurrence.node) {
        match tree.kind(ancestor) {
            NodeKind::Params if !inside_function => return Some(params_reason(tree, ancestor)),
            NodeKind::Annotation { .. } => return Some(BlockReason::Annotation),
            NodeKind::Case => return Some(BlockReason::CasePattern),
            NodeKind::Function { .. } => inside_function = true,
            NodeKind::ClassLike { keyword, .. } if keyword == "enum" && !inside_function => {
                return Some(BlockReason::EnumValue);
            }
            _ => {}
        }
    }
    None
}

fn is_part_of(tree: &SyntaxTree) -> bool {
    tree.node(tree.root()).children.iter().any(|&child| {
        matches!(tree.kind(child), NodeKind::Directive { keyword, .. } if keyword == "part of")
    })
}

/// `happy('Glad');` in an enum body parses like a constructor declaration.
/// Anything named other than the enum itself is a value.
fn params_reason(tree: &SyntaxTree, params: NodeId) -> BlockReason {
    let Some(function) = tree.parent(params) else {
        return BlockReason::DefaultValue;
    };
    let NodeKind::Function { name } = tree.kind(function) else {
        return BlockReason::DefaultValue;
    };
    let enclosing = tree
        .ancestors(function)
        .find(|&id| tree.kind(id).is_boundary())
        .map(|id| tree.kind(id));

    match enclosing {
        Some(NodeKind::ClassLike {
            keyword,
            name: enum_name,
        }) if keyword == "enum" => {
            let constructor = name
                .as_deref()
                .and_then(|n| n.split('.').next())
                .is_some_and(|n| enum_name.as_deref() == Some(n));
            if constructor {
                BlockReason::DefaultValue
            } else {
                BlockReason::EnumValue
            }
        }
        _ => BlockReason::DefaultValue,
    }
}

fn ancestor_edits(tree: &SyntaxTree, source: &str, occurrence: &LiteralOccurrence) -> Vec<TextEdit> {
    let mut edits = Vec::new();
    for ancestor in tree.ancestors(occurrence.node) {
        let kind = tree.kind(ancestor);
        if kind.is_boundary() {
            break;
        }
        if let Some(span) = kind.const_modifier() {
            let trailing = source
                .get(span.end..)
                .map(|rest| rest.len() - rest.trim_start().len())
                .unwrap_or(0);
            edits.push(TextEdit::delete(span.start, span.len() + trailing));
        }
        if let NodeKind::VarDecl {
            keyword: DeclKeyword::Const,
            keyword_span,
        } = kind
        {
            edits.push(TextEdit::replace(
                keyword_span.start,
                keyword_span.len(),
                "final",
            ));
        }
    }
    edits
}

/// One literal replacement, kept for previews and summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRewrite {
    pub location: SourceLocation,
    pub original: String,
    pub replacement: String,
    pub key: String,
    pub reused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FilePlan {
    pub file_path: String,
    pub edits: EditSet,
    pub rewrites: Vec<PlannedRewrite>,
}

impl FilePlan {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Allocate keys and build the edit set for one file.
///
/// `literals` must be kept, rewritable literals in offset order.
pub fn plan_file<'a>(
    file_path: &str,
    source: &str,
    literals: impl IntoIterator<Item = (&'a LiteralOccurrence, &'a CallShape, &'a [TextEdit])>,
    registry: &mut KeyRegistry,
    rewrite: &RewriteConfig,
) -> FilePlan {
    let mut plan = FilePlan {
        file_path: file_path.to_string(),
        ..Default::default()
    };

    for (occurrence, shape, ancestor_edits) in literals {
        let location = SourceLocation::new(file_path, occurrence.line, occurrence.col);
        let resolution = registry.resolve(occurrence, location.clone());
        let replacement = replacement(&resolution.key, &occurrence.variables, shape, rewrite);

        if !plan.edits.push(TextEdit::replace(
            occurrence.offset(),
            occurrence.length(),
            replacement.clone(),
        )) {
            continue;
        }
        for edit in ancestor_edits {
            plan.edits.push(edit.clone());
        }

        plan.rewrites.push(PlannedRewrite {
            location,
            original: source
                .get(occurrence.offset()..occurrence.offset() + occurrence.length())
                .unwrap_or_default()
                .to_string(),
            replacement,
            key: resolution.key,
            reused: resolution.reused,
        });
    }

    plan
}

/// `<accessor>.<key>` or `<accessor>.<key>(<vars>)`.
pub fn replacement(
    key: &str,
    variables: &[String],
    shape: &CallShape,
    rewrite: &RewriteConfig,
) -> String {
    let accessor = match shape {
        CallShape::Ambient { context } => rewrite.ambient(context),
        CallShape::Static => rewrite.fixed(),
    };
    if variables.is_empty() {
        format!("{}.{}", accessor, key)
    } else {
        format!("{}.{}({})", accessor, key, variables.join(", "))
    }
}

/// Apply a plan to the original buffer, re-parse, then add the import.
pub fn finish(source: &str, plan: &FilePlan, import_uri: &str) -> Result<String, ParseError> {
    let rewritten = plan.edits.apply(source);
    parse_dart(&rewritten)?;
    if plan.rewrites.is_empty() {
        return Ok(rewritten);
    }
    ensure_import(&rewritten, import_uri)
}

/// Add `import '<uri>';` unless already present.
///
/// Goes after the last `library`/`import`/`export` directive, otherwise
/// before the first `part`, otherwise at the top. `part of` files are
/// returned unchanged.
pub fn ensure_import(source: &str, uri: &str) -> Result<String, ParseError> {
    let parsed = parse_dart(source)?;
    let tree = &parsed.tree;

    let mut header_end = None;
    let mut first_part = None;
    for &child in &tree.node(tree.root()).children {
        let NodeKind::Directive { keyword, uri: found } = tree.kind(child) else {
            continue;
        };
        match keyword.as_str() {
            "part of" => return Ok(source.to_string()),
            "import" if found.as_deref() == Some(uri) => return Ok(source.to_string()),
            "part" => {
                first_part.get_or_insert(tree.node(child).span.start);
            }
            _ => header_end = Some(tree.node(child).span.end),
        }
    }

    let statement = format!("import '{}';", uri);
    let mut out = source.to_string();
    match (header_end, first_part) {
        (Some(end), _) => out.insert_str(end, &format!("\n{}", statement)),
        (None, Some(start)) => out.insert_str(start, &format!("{}\n\n", statement)),
        (None, None) => out.insert_str(0, &format!("{}\n\n", statement)),
    }
    Ok(out)
}
