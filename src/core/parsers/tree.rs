//! Arena syntax tree produced by the Dart parser.
//!
//! The tree is deliberately shallow: it records the structure the analyzer
//! needs (calls, arguments, collections, declarations, string literals) and
//! ignores everything else. Nodes live in a flat vector and point at their
//! parent by index, so walking upward from a literal is a loop over ids.

use super::token::StrPart;

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Const,
    New,
}

/// A `const` or `new` keyword in front of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub span: Span,
}

impl Modifier {
    pub fn is_const(&self) -> bool {
        self.kind == ModifierKind::Const
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKeyword {
    Const,
    Final,
    Var,
}

/// A string literal, possibly built from several adjacent literals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringLiteral {
    pub parts: Vec<StrPart>,
    /// Number of adjacent literal tokens merged into this one.
    pub pieces: usize,
}

impl StringLiteral {
    pub fn push_parts(&mut self, parts: Vec<StrPart>) {
        for part in parts {
            match (self.parts.last_mut(), part) {
                (Some(StrPart::Text(prev)), StrPart::Text(next)) => prev.push_str(&next),
                (_, part) => self.parts.push(part),
            }
        }
        self.pieces += 1;
    }

    pub fn is_interpolated(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, StrPart::Interpolation { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Unit,
    Directive {
        keyword: String,
        uri: Option<String>,
    },
    ClassLike {
        keyword: String,
        name: Option<String>,
    },
    /// Named declaration or closure. Children: `Params`, then the body.
    Function {
        name: Option<String>,
    },
    Params,
    Block,
    /// Invocation or construction. `callee` is the dotted path, with `()`
    /// marking intermediate call results (`Navigator.of().push`).
    Call {
        callee: String,
        modifier: Option<Modifier>,
    },
    Arguments,
    NamedArg {
        label: String,
    },
    PositionalArg {
        index: usize,
    },
    List {
        modifier: Option<Modifier>,
    },
    /// Set or map literal.
    Collection {
        modifier: Option<Modifier>,
    },
    VarDecl {
        keyword: DeclKeyword,
        keyword_span: Span,
    },
    Annotation {
        name: String,
    },
    Case,
    Str(StringLiteral),
    Group,
}

impl NodeKind {
    /// The `const` keyword attached to this node, if any.
    pub fn const_modifier(&self) -> Option<Span> {
        match self {
            NodeKind::Call { modifier, .. }
            | NodeKind::List { modifier }
            | NodeKind::Collection { modifier } => {
                modifier.filter(Modifier::is_const).map(|m| m.span)
            }
            _ => None,
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            NodeKind::Function { .. } | NodeKind::Block | NodeKind::ClassLike { .. } | NodeKind::Unit
        )
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Unit,
                span: Span::new(0, len),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn add(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn set_end(&mut self, id: NodeId, end: usize) {
        self.nodes[id.index()].span.end = end;
    }

    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// All string literal nodes in source order.
    pub fn strings(&self) -> impl Iterator<Item = (NodeId, &StringLiteral)> {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match &node.kind {
            NodeKind::Str(lit) => Some((NodeId(i as u32), lit)),
            _ => None,
        })
    }
}

pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
