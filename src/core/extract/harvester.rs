use crate::{
    core::{
        data::{ArgumentRole, LiteralOccurrence},
        parsers::{LineIndex, NodeId, NodeKind, StringLiteral, SyntaxTree, token::StrPart},
    },
    utils::placeholder_name,
};

/// Collect every harvestable string literal of a parsed file, in source order.
///
/// Interpolated expressions become `{paramN}` placeholders. Literals with no
/// literal text (`''`, `'$a$b'`) and literals inside directives are dropped.
pub fn harvest(tree: &SyntaxTree, source: &str, index: &LineIndex) -> Vec<LiteralOccurrence> {
    tree.strings()
        .filter(|(id, _)| !inside_directive(tree, *id))
        .filter_map(|(id, literal)| occurrence(tree, source, index, id, literal))
        .collect()
}

fn occurrence(
    tree: &SyntaxTree,
    source: &str,
    index: &LineIndex,
    id: NodeId,
    literal: &StringLiteral,
) -> Option<LiteralOccurrence> {
    let (content, text, variables) = normalize(literal);
    if text.trim().is_empty() {
        return None;
    }

    let span = tree.node(id).span;
    let (line, col) = index.line_col(source, span.start);
    let (callee, role) = call_site(tree, id);

    Some(LiteralOccurrence {
        node: id,
        content,
        span,
        line,
        col,
        callee,
        role,
        variables,
    })
}

/// Returns (content with placeholders, literal text only, variables).
fn normalize(literal: &StringLiteral) -> (String, String, Vec<String>) {
    let mut content = String::new();
    let mut text = String::new();
    let mut variables = Vec::new();

    for part in &literal.parts {
        match part {
            StrPart::Text(t) => {
                content.push_str(t);
                text.push_str(t);
            }
            StrPart::Interpolation { source, .. } => {
                content.push('{');
                content.push_str(&placeholder_name(variables.len()));
                content.push('}');
                variables.push(source.clone());
            }
        }
    }

    (content, text, variables)
}

fn inside_directive(tree: &SyntaxTree, id: NodeId) -> bool {
    tree.ancestors(id)
        .any(|a| matches!(tree.kind(a), NodeKind::Directive { .. }))
}

/// Nearest enclosing call (or annotation) and the literal's role in it.
fn call_site(tree: &SyntaxTree, id: NodeId) -> (Option<String>, ArgumentRole) {
    let mut role = ArgumentRole::None;

    for ancestor in tree.ancestors(id) {
        match tree.kind(ancestor) {
            NodeKind::NamedArg { label } if role == ArgumentRole::None => {
                role = ArgumentRole::Named(label.clone());
            }
            NodeKind::PositionalArg { index } if role == ArgumentRole::None => {
                role = ArgumentRole::Positional(*index);
            }
            NodeKind::Call { callee, .. } => return (Some(callee.clone()), role),
            NodeKind::Annotation { name } => return (Some(format!("@{}", name)), role),
            kind if kind.is_boundary() => break,
            _ => {}
        }
    }

    (None, ArgumentRole::None)
}
