use crate::core::parsers::{NodeId, Span};

/// How a literal is passed to its enclosing call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArgumentRole {
    Named(String),
    Positional(usize),
    #[default]
    None,
}

impl ArgumentRole {
    pub fn label(&self) -> Option<&str> {
        match self {
            ArgumentRole::Named(label) => Some(label),
            _ => None,
        }
    }

    pub fn is_first_positional(&self) -> bool {
        matches!(self, ArgumentRole::Positional(0))
    }
}

/// One string literal found in a file, with the context the classifier needs.
///
/// `content` is the literal text with every interpolated expression replaced
/// by `{paramN}`; `variables[N]` holds that expression's source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOccurrence {
    pub node: NodeId,
    pub content: String,
    pub span: Span,
    pub line: usize,
    pub col: usize,
    /// Dotted callee path of the nearest enclosing call or annotation.
    pub callee: Option<String>,
    pub role: ArgumentRole,
    pub variables: Vec<String>,
}

impl LiteralOccurrence {
    pub fn offset(&self) -> usize {
        self.span.start
    }

    pub fn length(&self) -> usize {
        self.span.len()
    }

    /// Last segment of the callee path (`Text` for `material.Text`).
    pub fn callee_name(&self) -> Option<&str> {
        self.callee
            .as_deref()
            .and_then(|c| c.rsplit('.').next())
            .map(|name| name.trim_end_matches("()"))
    }
}
