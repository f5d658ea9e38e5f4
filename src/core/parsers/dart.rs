//! Structural Dart parser.
//!
//! This is not a full Dart grammar. It is a bracket-aware recursive descent
//! over the token stream that recognizes the constructs string literals can
//! hang off: calls and constructions, argument lists, collection literals,
//! declarations with their modifiers, annotations and `case` patterns.
//! Anything it does not recognize is skipped token by token, so unusual code
//! degrades to a flatter tree instead of an error. Only lexical failures and
//! unbalanced brackets are reported.

use super::error::ParseError;
use super::token::{Lexeme, Token, lex};
use super::tree::{
    DeclKeyword, Modifier, ModifierKind, NodeId, NodeKind, Span, StringLiteral, SyntaxTree,
};

/// A parsed Dart file: the syntax tree plus comment spans.
#[derive(Debug)]
pub struct ParsedFile {
    pub tree: SyntaxTree,
    pub comments: Vec<Span>,
}

pub fn parse_dart(source: &str) -> Result<ParsedFile, ParseError> {
    let lexed = lex(source)?;
    let mut parser = Parser {
        source,
        tokens: &lexed.tokens,
        pos: 0,
        tree: SyntaxTree::new(source.len()),
    };
    let root = parser.tree.root();
    parser.parse_items(root, Stop::default(), &Ctx::unit())?;

    Ok(ParsedFile {
        tree: parser.tree,
        comments: lexed.comments,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    Paren,
    Brace,
    Bracket,
}

impl Delim {
    fn of_closer(token: &Token) -> Option<Delim> {
        match token {
            Token::RParen => Some(Delim::Paren),
            Token::RBrace => Some(Delim::Brace),
            Token::RBracket => Some(Delim::Bracket),
            _ => None,
        }
    }

    fn open_char(self) -> char {
        match self {
            Delim::Paren => '(',
            Delim::Brace => '{',
            Delim::Bracket => '[',
        }
    }
}

/// Where a run of items ends.
#[derive(Debug, Clone, Copy, Default)]
struct Stop {
    /// The bracket this run is enclosed in. A different closer is an error.
    closer: Option<Delim>,
    /// A sub-expression run: any closer ends it and the owner handles it.
    nested: bool,
    comma: bool,
    semi: bool,
    colon: bool,
}

impl Stop {
    fn closed(delim: Delim) -> Self {
        Self {
            closer: Some(delim),
            ..Self::default()
        }
    }

    fn argument() -> Self {
        Self {
            nested: true,
            comma: true,
            ..Self::default()
        }
    }

    fn arrow_body() -> Self {
        Self {
            nested: true,
            comma: true,
            semi: true,
            ..Self::default()
        }
    }

    fn statement() -> Self {
        Self {
            nested: true,
            semi: true,
            ..Self::default()
        }
    }

    fn pattern() -> Self {
        Self {
            nested: true,
            colon: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Ctx {
    unit: bool,
    class_body: bool,
    class_name: Option<String>,
}

impl Ctx {
    fn unit() -> Self {
        Self {
            unit: true,
            ..Self::default()
        }
    }

    fn expr() -> Self {
        Self::default()
    }

    fn class(name: Option<String>) -> Self {
        Self {
            unit: false,
            class_body: true,
            class_name: name,
        }
    }
}

const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "switch", "catch"];
const EXPRESSION_KEYWORDS: &[&str] = &[
    "return", "await", "yield", "throw", "new", "const", "else", "in", "is", "as", "case",
];

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Lexeme],
    pos: usize,
    tree: SyntaxTree,
}

impl<'a> Parser<'a> {
    fn tok(&self, index: usize) -> Option<&'a Token> {
        self.tokens.get(index).map(|l| &l.token)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tok(self.pos)
    }

    fn span_at(&self, index: usize) -> Span {
        self.tokens
            .get(index)
            .map(|l| l.span)
            .unwrap_or_else(|| Span::new(self.source.len(), self.source.len()))
    }

    fn text(&self, index: usize) -> &'a str {
        let span = self.span_at(index);
        &self.source[span.start..span.end]
    }

    fn is_word(&self, index: usize, word: &str) -> bool {
        matches!(self.tok(index), Some(Token::Ident)) && self.text(index) == word
    }

    fn end_of_prev(&self) -> usize {
        self.pos
            .checked_sub(1)
            .map(|i| self.span_at(i).end)
            .unwrap_or(0)
    }

    fn parse_items(&mut self, parent: NodeId, stop: Stop, ctx: &Ctx) -> Result<(), ParseError> {
        while let Some(token) = self.peek() {
            match token {
                t if t.is_closer() => {
                    if stop.closer.is_some() && stop.closer == Delim::of_closer(t) {
                        return Ok(());
                    }
                    if stop.nested {
                        return Ok(());
                    }
                    return Err(ParseError::Unbalanced {
                        found: t.as_char(),
                        offset: self.span_at(self.pos).start,
                    });
                }
                Token::Comma if stop.comma => return Ok(()),
                Token::Semi if stop.semi => return Ok(()),
                Token::Colon if stop.colon => return Ok(()),
                _ => self.parse_item(parent, ctx)?,
            }
        }
        Ok(())
    }

    fn parse_item(&mut self, parent: NodeId, ctx: &Ctx) -> Result<(), ParseError> {
        match self.peek() {
            Some(Token::Str(_)) => {
                self.parse_string(parent);
                Ok(())
            }
            Some(Token::At) => self.parse_annotation(parent),
            Some(Token::Ident) => self.parse_word(parent, ctx),
            Some(Token::LParen) => self.parse_paren(parent),
            Some(Token::LBrace) => self.parse_brace(parent),
            Some(Token::LBracket) => {
                let span = self.span_at(self.pos);
                let list = self.tree.add(parent, NodeKind::List { modifier: None }, span);
                self.parse_delimited(list, Delim::Bracket, &Ctx::expr())
            }
            Some(_) => {
                self.pos += 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Consume the opener at `pos`, the items inside and the matching closer.
    fn parse_delimited(&mut self, node: NodeId, delim: Delim, ctx: &Ctx) -> Result<(), ParseError> {
        let open = self.span_at(self.pos);
        self.pos += 1;
        self.parse_items(node, Stop::closed(delim), ctx)?;
        self.expect_close(node, delim, open.start)
    }

    fn expect_close(&mut self, node: NodeId, delim: Delim, open: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if Delim::of_closer(t) == Some(delim) => {
                let end = self.span_at(self.pos).end;
                self.pos += 1;
                self.tree.set_end(node, end);
                Ok(())
            }
            Some(t) if t.is_closer() => Err(ParseError::Unbalanced {
                found: t.as_char(),
                offset: self.span_at(self.pos).start,
            }),
            _ => Err(ParseError::Unclosed {
                open: delim.open_char(),
                offset: open,
            }),
        }
    }

    fn parse_string(&mut self, parent: NodeId) {
        let start = self.span_at(self.pos).start;
        let mut end = start;
        let mut literal = StringLiteral::default();
        while let Some(Lexeme {
            token: Token::Str(s),
            span,
        }) = self.tokens.get(self.pos)
        {
            literal.push_parts(s.parts.clone());
            end = span.end;
            self.pos += 1;
        }
        self.tree
            .add(parent, NodeKind::Str(literal), Span::new(start, end));
    }

    fn parse_annotation(&mut self, parent: NodeId) -> Result<(), ParseError> {
        let start = self.span_at(self.pos).start;
        self.pos += 1;
        let name = self.read_path();
        if name.is_empty() {
            return Ok(());
        }
        let annotation = self.tree.add(
            parent,
            NodeKind::Annotation { name },
            Span::new(start, self.end_of_prev()),
        );
        if matches!(self.peek(), Some(Token::LParen)) {
            self.parse_arguments(annotation)?;
            let end = self.end_of_prev();
            self.tree.set_end(annotation, end);
        }
        Ok(())
    }

    fn parse_word(&mut self, parent: NodeId, ctx: &Ctx) -> Result<(), ParseError> {
        let word = self.text(self.pos);
        match word {
            "import" | "export" | "library" | "part" if ctx.unit => {
                self.parse_directive(parent);
                Ok(())
            }
            "class" | "mixin" | "extension" | "enum" if ctx.unit => self.parse_class(parent),
            "final" | "var" if ctx.unit && self.is_word(self.pos + 1, "class") => {
                self.pos += 1;
                Ok(())
            }
            "const" => self.parse_const(parent, ctx),
            "final" => self.parse_var_decl(parent, DeclKeyword::Final),
            "var" => self.parse_var_decl(parent, DeclKeyword::Var),
            "new" if matches!(self.tok(self.pos + 1), Some(Token::Ident)) => {
                let modifier = Modifier {
                    kind: ModifierKind::New,
                    span: self.span_at(self.pos),
                };
                self.pos += 1;
                self.parse_path_expr(parent, ctx, Some(modifier))
            }
            "get"
                if matches!(self.tok(self.pos + 1), Some(Token::Ident))
                    && matches!(
                        self.tok(self.pos + 2),
                        Some(Token::FatArrow | Token::LBrace)
                    ) =>
            {
                let start = self.span_at(self.pos).start;
                let name = self.text(self.pos + 1).to_string();
                self.pos += 2;
                let function = self.tree.add(
                    parent,
                    NodeKind::Function { name: Some(name) },
                    Span::new(start, start),
                );
                self.parse_function_body(function)?;
                let end = self.end_of_prev();
                self.tree.set_end(function, end);
                Ok(())
            }
            w if CONTROL_KEYWORDS.contains(&w)
                && matches!(self.tok(self.pos + 1), Some(Token::LParen)) =>
            {
                self.pos += 1;
                let span = self.span_at(self.pos);
                let group = self.tree.add(parent, NodeKind::Group, span);
                self.parse_delimited(group, Delim::Paren, &Ctx::expr())
            }
            "case" => {
                let span = self.span_at(self.pos);
                self.pos += 1;
                let case = self.tree.add(parent, NodeKind::Case, span);
                self.parse_items(case, Stop::pattern(), &Ctx::expr())?;
                let end = self.end_of_prev();
                self.tree.set_end(case, end);
                Ok(())
            }
            _ => self.parse_path_expr(parent, ctx, None),
        }
    }

    fn parse_directive(&mut self, parent: NodeId) {
        let start = self.span_at(self.pos).start;
        let mut keyword = self.text(self.pos).to_string();
        self.pos += 1;
        if keyword == "part" && self.is_word(self.pos, "of") {
            keyword = "part of".to_string();
            self.pos += 1;
        }

        let mut uri = None;
        while let Some(token) = self.peek() {
            self.pos += 1;
            match token {
                Token::Semi => break,
                Token::Str(s) if uri.is_none() => {
                    uri = Some(
                        s.parts
                            .iter()
                            .filter_map(|p| match p {
                                super::token::StrPart::Text(t) => Some(t.as_str()),
                                _ => None,
                            })
                            .collect::<String>(),
                    );
                }
                _ => {}
            }
        }

        let end = self.end_of_prev();
        self.tree.add(
            parent,
            NodeKind::Directive { keyword, uri },
            Span::new(start, end),
        );
    }

    fn parse_class(&mut self, parent: NodeId) -> Result<(), ParseError> {
        let start = self.span_at(self.pos).start;
        let keyword = self.text(self.pos).to_string();
        self.pos += 1;

        while self.is_word(self.pos, "class") || self.is_word(self.pos, "type") {
            self.pos += 1;
        }
        let name = if matches!(self.peek(), Some(Token::Ident)) && !self.is_word(self.pos, "on") {
            Some(self.text(self.pos).to_string())
        } else {
            None
        };

        let class = self.tree.add(
            parent,
            NodeKind::ClassLike {
                keyword,
                name: name.clone(),
            },
            Span::new(start, start),
        );

        // Header: type parameters, extends/with/implements/on clauses.
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token {
                Token::LBrace if depth == 0 => {
                    return self.parse_delimited(class, Delim::Brace, &Ctx::class(name));
                }
                Token::Semi if depth == 0 => {
                    self.pos += 1;
                    let end = self.end_of_prev();
                    self.tree.set_end(class, end);
                    return Ok(());
                }
                Token::LParen => depth += 1,
                Token::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.pos += 1;
        }
        Ok(())
    }

    fn parse_const(&mut self, parent: NodeId, ctx: &Ctx) -> Result<(), ParseError> {
        let modifier = Modifier {
            kind: ModifierKind::Const,
            span: self.span_at(self.pos),
        };

        let mut next = self.pos + 1;
        if matches!(self.tok(next), Some(Token::Lt)) {
            if let Some(after) = self.skip_type_args(next) {
                next = after;
            }
        }

        match self.tok(next) {
            Some(Token::LBracket) => {
                self.pos = next;
                let list = self.tree.add(
                    parent,
                    NodeKind::List {
                        modifier: Some(modifier),
                    },
                    modifier.span,
                );
                self.parse_delimited(list, Delim::Bracket, &Ctx::expr())
            }
            Some(Token::LBrace) => {
                self.pos = next;
                let collection = self.tree.add(
                    parent,
                    NodeKind::Collection {
                        modifier: Some(modifier),
                    },
                    modifier.span,
                );
                self.parse_delimited(collection, Delim::Brace, &Ctx::expr())
            }
            Some(Token::Ident) => {
                // `const Foo(...)` inside class Foo declares a constructor.
                if ctx.class_body && ctx.class_name.as_deref() == Some(self.text(next)) {
                    self.pos += 1;
                    return Ok(());
                }
                let after = self.scan_path(next);
                if matches!(self.tok(after), Some(Token::LParen)) {
                    self.pos = next;
                    return self.parse_path_expr(parent, ctx, Some(modifier));
                }
                self.parse_var_decl(parent, DeclKeyword::Const)
            }
            _ => {
                self.pos += 1;
                Ok(())
            }
        }
    }

    fn parse_var_decl(&mut self, parent: NodeId, keyword: DeclKeyword) -> Result<(), ParseError> {
        let keyword_span = self.span_at(self.pos);
        self.pos += 1;
        let decl = self.tree.add(
            parent,
            NodeKind::VarDecl {
                keyword,
                keyword_span,
            },
            keyword_span,
        );
        self.parse_items(decl, Stop::statement(), &Ctx::expr())?;
        let end = self.end_of_prev();
        self.tree.set_end(decl, end);
        Ok(())
    }

    /// An identifier path, optionally invoked.
    fn parse_path_expr(
        &mut self,
        parent: NodeId,
        ctx: &Ctx,
        modifier: Option<Modifier>,
    ) -> Result<(), ParseError> {
        let path_index = self.pos;
        let start = modifier
            .map(|m| m.span.start)
            .unwrap_or_else(|| self.span_at(path_index).start);

        let path = self.read_path();
        if path.is_empty() {
            self.pos += 1;
            return Ok(());
        }
        if matches!(self.peek(), Some(Token::Lt)) {
            if let Some(after) = self.skip_type_args(self.pos) {
                if matches!(self.tok(after), Some(Token::LParen)) {
                    self.pos = after;
                }
            }
        }
        if !matches!(self.peek(), Some(Token::LParen)) {
            return Ok(());
        }

        if modifier.is_none() && self.is_declaration(path_index, &path, ctx) {
            let name = path.rsplit('.').next().map(str::to_string);
            return self.parse_function(parent, name, start);
        }
        self.parse_call_chain(parent, path, modifier, start)
    }

    /// Whether `path(` at `path_index` declares a function, method or
    /// constructor rather than invoking one.
    fn is_declaration(&self, path_index: usize, path: &str, ctx: &Ctx) -> bool {
        let own_constructor = ctx.class_body
            && ctx
                .class_name
                .as_deref()
                .is_some_and(|name| path.split('.').next() == Some(name));

        let declaration_position = own_constructor
            || match path_index.checked_sub(1) {
                None => true,
                Some(i) => match self.tok(i) {
                    Some(Token::Ident) => !EXPRESSION_KEYWORDS.contains(&self.text(i)),
                    Some(Token::Gt | Token::Semi | Token::LBrace | Token::RBrace) => true,
                    Some(Token::Operator) => self.text(i) == "?",
                    _ => false,
                },
            };
        if !declaration_position {
            return false;
        }

        let Some(close) = self.matching(self.pos) else {
            return false;
        };
        let after = self.skip_async(close + 1);
        matches!(self.tok(after), Some(Token::LBrace | Token::FatArrow))
            || ctx.class_body && matches!(self.tok(close + 1), Some(Token::Colon | Token::Semi))
    }

    fn parse_function(
        &mut self,
        parent: NodeId,
        name: Option<String>,
        start: usize,
    ) -> Result<(), ParseError> {
        let function = self.tree.add(
            parent,
            NodeKind::Function { name },
            Span::new(start, start),
        );
        let params_span = self.span_at(self.pos);
        let params = self.tree.add(function, NodeKind::Params, params_span);
        self.parse_delimited(params, Delim::Paren, &Ctx::expr())?;
        self.parse_function_body(function)?;
        let end = self.end_of_prev();
        self.tree.set_end(function, end);
        Ok(())
    }

    fn parse_function_body(&mut self, function: NodeId) -> Result<(), ParseError> {
        let after = self.skip_async(self.pos);
        match self.tok(after) {
            Some(Token::LBrace) => {
                self.pos = after;
                let block = self
                    .tree
                    .add(function, NodeKind::Block, self.span_at(self.pos));
                self.parse_delimited(block, Delim::Brace, &Ctx::expr())
            }
            Some(Token::FatArrow) => {
                self.pos = after + 1;
                self.parse_items(function, Stop::arrow_body(), &Ctx::expr())
            }
            _ => Ok(()),
        }
    }

    fn parse_call_chain(
        &mut self,
        parent: NodeId,
        path: String,
        modifier: Option<Modifier>,
        start: usize,
    ) -> Result<(), ParseError> {
        let mut callee = path;
        let mut modifier = modifier;
        let mut start = start;

        loop {
            let call = self.tree.add(
                parent,
                NodeKind::Call {
                    callee: callee.clone(),
                    modifier,
                },
                Span::new(start, start),
            );
            self.parse_arguments(call)?;
            let end = self.end_of_prev();
            self.tree.set_end(call, end);

            // `foo().bar(...)`, `foo()!.bar(...)`, `foo()?.bar(...)`
            let mut i = self.pos;
            if matches!(self.tok(i), Some(Token::Operator)) && self.text(i) == "!" {
                i += 1;
            }
            if !matches!(self.tok(i), Some(Token::Dot | Token::QuestionDot))
                || !matches!(self.tok(i + 1), Some(Token::Ident))
            {
                return Ok(());
            }
            let dot = self.span_at(i).start;
            self.pos = i + 1;
            let segment = self.read_path();
            if matches!(self.peek(), Some(Token::Lt)) {
                if let Some(after) = self.skip_type_args(self.pos) {
                    if matches!(self.tok(after), Some(Token::LParen)) {
                        self.pos = after;
                    }
                }
            }
            if !matches!(self.peek(), Some(Token::LParen)) {
                return Ok(());
            }
            callee = format!("{}().{}", callee, segment);
            modifier = None;
            start = dot;
        }
    }

    fn parse_arguments(&mut self, owner: NodeId) -> Result<(), ParseError> {
        let open = self.span_at(self.pos);
        let args = self.tree.add(owner, NodeKind::Arguments, open);
        self.pos += 1;

        let mut index = 0;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::Unclosed {
                        open: '(',
                        offset: open.start,
                    });
                }
                Some(Token::RParen) => break,
                Some(Token::Comma) => {
                    self.pos += 1;
                    continue;
                }
                Some(t) if t.is_closer() => {
                    return Err(ParseError::Unbalanced {
                        found: t.as_char(),
                        offset: self.span_at(self.pos).start,
                    });
                }
                Some(_) => {}
            }

            let start = self.span_at(self.pos).start;
            let is_named = matches!(self.peek(), Some(Token::Ident))
                && matches!(self.tok(self.pos + 1), Some(Token::Colon));
            let arg = if is_named {
                let label = self.text(self.pos).to_string();
                self.pos += 2;
                self.tree
                    .add(args, NodeKind::NamedArg { label }, Span::new(start, start))
            } else {
                let arg = self
                    .tree
                    .add(args, NodeKind::PositionalArg { index }, Span::new(start, start));
                index += 1;
                arg
            };
            self.parse_items(arg, Stop::argument(), &Ctx::expr())?;
            let end = self.end_of_prev().max(start);
            self.tree.set_end(arg, end);
        }

        self.expect_close(args, Delim::Paren, open.start)
    }

    /// A bare parenthesis: closure parameters or a grouped expression.
    fn parse_paren(&mut self, parent: NodeId) -> Result<(), ParseError> {
        if let Some(close) = self.matching(self.pos) {
            let after = self.skip_async(close + 1);
            if matches!(self.tok(after), Some(Token::LBrace | Token::FatArrow)) {
                let start = self.span_at(self.pos).start;
                return self.parse_function(parent, None, start);
            }
        }
        let group = self
            .tree
            .add(parent, NodeKind::Group, self.span_at(self.pos));
        self.parse_delimited(group, Delim::Paren, &Ctx::expr())
    }

    fn parse_brace(&mut self, parent: NodeId) -> Result<(), ParseError> {
        let starts_expression = match self.pos.checked_sub(1) {
            None => false,
            Some(i) => match self.tok(i) {
                Some(
                    Token::Eq
                    | Token::LParen
                    | Token::Comma
                    | Token::Colon
                    | Token::LBracket
                    | Token::FatArrow
                    | Token::Gt
                    | Token::Operator,
                ) => true,
                Some(Token::Ident) => matches!(self.text(i), "return" | "yield" | "await"),
                _ => false,
            },
        };

        let kind = if starts_expression {
            NodeKind::Collection { modifier: None }
        } else {
            NodeKind::Block
        };
        let node = self.tree.add(parent, kind, self.span_at(self.pos));
        self.parse_delimited(node, Delim::Brace, &Ctx::expr())
    }

    /// Read `a.b?.c` and return it as `a.b.c`.
    fn read_path(&mut self) -> String {
        let mut path = String::new();
        while matches!(self.peek(), Some(Token::Ident)) {
            path.push_str(self.text(self.pos));
            self.pos += 1;
            if matches!(self.peek(), Some(Token::Dot | Token::QuestionDot))
                && matches!(self.tok(self.pos + 1), Some(Token::Ident))
            {
                path.push('.');
                self.pos += 1;
            } else {
                break;
            }
        }
        path
    }

    /// Index just past an identifier path and its type arguments.
    fn scan_path(&self, mut index: usize) -> usize {
        while matches!(self.tok(index), Some(Token::Ident)) {
            index += 1;
            if matches!(self.tok(index), Some(Token::Dot | Token::QuestionDot))
                && matches!(self.tok(index + 1), Some(Token::Ident))
            {
                index += 1;
            } else {
                break;
            }
        }
        if matches!(self.tok(index), Some(Token::Lt)) {
            if let Some(after) = self.skip_type_args(index) {
                index = after;
            }
        }
        index
    }

    /// Index just past `<...>` starting at `index`, if it is a type argument list.
    fn skip_type_args(&self, index: usize) -> Option<usize> {
        let mut depth = 0i32;
        let mut i = index;
        while let Some(token) = self.tok(i) {
            match token {
                Token::Lt => depth += 1,
                Token::Gt => depth -= 1,
                Token::Operator => match self.text(i) {
                    ">>" => depth -= 2,
                    ">>>" => depth -= 3,
                    "?" => {}
                    _ => return None,
                },
                Token::Ident | Token::Comma | Token::Dot => {}
                _ => return None,
            }
            i += 1;
            if depth == 0 {
                return Some(i);
            }
            if depth < 0 {
                return None;
            }
        }
        None
    }

    /// Skip `async`, `async*` and `sync*` markers.
    fn skip_async(&self, mut index: usize) -> usize {
        if self.is_word(index, "async") || self.is_word(index, "sync") {
            index += 1;
            if matches!(self.tok(index), Some(Token::Operator)) && self.text(index) == "*" {
                index += 1;
            }
        }
        index
    }

    /// Index of the closer matching the opener at `open`.
    fn matching(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, lexeme) in self.tokens.iter().enumerate().skip(open) {
            if lexeme.token.is_opener() {
                depth += 1;
            } else if lexeme.token.is_closer() {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsers::token::StrPart;

    fn parse(source: &str) -> SyntaxTree {
        parse_dart(source).unwrap().tree
    }

    fn first_string(tree: &SyntaxTree) -> NodeId {
        tree.strings().next().map(|(id, _)| id).unwrap()
    }

    fn ancestor_kinds(tree: &SyntaxTree, id: NodeId) -> Vec<NodeKind> {
        tree.ancestors(id).map(|a| tree.kind(a).clone()).collect()
    }

    #[test]
    fn test_build_method_const_text() {
        let source = r#"
class Home extends StatelessWidget {
  const Home({super.key});

  @override
  Widget build(BuildContext context) {
    return const Text('Hello');
  }
}
"#;
        let tree = parse(source);
        let lit = first_string(&tree);
        let kinds = ancestor_kinds(&tree, lit);

        assert_eq!(kinds[0], NodeKind::PositionalArg { index: 0 });
        assert_eq!(kinds[1], NodeKind::Arguments);
        match &kinds[2] {
            NodeKind::Call { callee, modifier } => {
                assert_eq!(callee, "Text");
                let modifier = modifier.unwrap();
                assert!(modifier.is_const());
                assert_eq!(&source[modifier.span.start..modifier.span.end], "const");
            }
            other => panic!("expected call, got {:?}", other),
        }
        assert_eq!(kinds[3], NodeKind::Block);
        assert_eq!(
            kinds[4],
            NodeKind::Function {
                name: Some("build".into())
            }
        );
        assert!(matches!(kinds[5], NodeKind::ClassLike { .. }));
        assert_eq!(kinds[6], NodeKind::Unit);
    }

    #[test]
    fn test_named_argument_label() {
        let tree = parse("final w = TextField(decoration: InputDecoration(hintText: 'Email'));");
        let lit = first_string(&tree);
        let kinds = ancestor_kinds(&tree, lit);
        assert_eq!(
            kinds[0],
            NodeKind::NamedArg {
                label: "hintText".into()
            }
        );
        assert!(matches!(&kinds[2], NodeKind::Call { callee, .. } if callee == "InputDecoration"));
        assert!(matches!(
            kinds.iter().find(|k| matches!(k, NodeKind::VarDecl { .. })),
            Some(NodeKind::VarDecl {
                keyword: DeclKeyword::Final,
                ..
            })
        ));
    }

    #[test]
    fn test_directives_do_not_produce_strings() {
        let tree = parse(
            "import 'package:flutter/material.dart';\nexport 'src/a.dart' show A;\nvoid main() {}",
        );
        assert_eq!(tree.strings().count(), 0);
        let uris: Vec<_> = tree
            .node(tree.root())
            .children
            .iter()
            .filter_map(|c| match tree.kind(*c) {
                NodeKind::Directive { uri, .. } => uri.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(uris, vec!["package:flutter/material.dart", "src/a.dart"]);
    }

    #[test]
    fn test_part_of_directive_keyword() {
        let tree = parse("part of 'home.dart';\npart 'home.g.dart';\n");
        let keywords: Vec<_> = tree
            .node(tree.root())
            .children
            .iter()
            .filter_map(|c| match tree.kind(*c) {
                NodeKind::Directive { keyword, .. } => Some(keyword.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(keywords, vec!["part of", "part"]);
    }

    #[test]
    fn test_adjacent_strings_merge() {
        let tree = parse("final s = 'Hello ' 'World';");
        let literals: Vec<_> = tree.strings().collect();
        assert_eq!(literals.len(), 1);
        assert_eq!(
            literals[0].1.parts,
            vec![StrPart::Text("Hello World".into())]
        );
        assert_eq!(literals[0].1.pieces, 2);
    }

    #[test]
    fn test_call_chain_callee_path() {
        let tree = parse("void f() { Logger().e('Boom'); logger?.error('Down'); }");
        let callees: Vec<String> = tree
            .strings()
            .map(|(id, _)| {
                tree.ancestors(id)
                    .find_map(|a| match tree.kind(a) {
                        NodeKind::Call { callee, .. } => Some(callee.clone()),
                        _ => None,
                    })
                    .unwrap()
            })
            .collect();
        assert_eq!(callees, vec!["Logger().e", "logger.error"]);
    }

    #[test]
    fn test_generic_call_with_closure_builder() {
        let tree = parse(
            "Widget b() => BlocBuilder<CartBloc, CartState>(builder: (context, state) => Text('Cart'));",
        );
        let lit = first_string(&tree);
        let kinds = ancestor_kinds(&tree, lit);
        assert!(matches!(&kinds[2], NodeKind::Call { callee, .. } if callee == "Text"));
        assert_eq!(kinds[3], NodeKind::Function { name: None });
        assert_eq!(
            kinds[4],
            NodeKind::NamedArg {
                label: "builder".into()
            }
        );
        assert!(matches!(&kinds[6], NodeKind::Call { callee, .. } if callee == "BlocBuilder"));
    }

    #[test]
    fn test_default_parameter_value_is_under_params() {
        let tree = parse("void greet({String title = 'Hi'}) {}");
        let lit = first_string(&tree);
        assert!(
            tree.ancestors(lit)
                .any(|a| matches!(tree.kind(a), NodeKind::Params))
        );
    }

    #[test]
    fn test_const_list_and_const_declaration() {
        let source = "const labels = <String>['One'];\nfinal x = const ['Two'];";
        let tree = parse(source);
        let literals: Vec<NodeId> = tree.strings().map(|(id, _)| id).collect();

        let first = ancestor_kinds(&tree, literals[0]);
        assert_eq!(first[0], NodeKind::List { modifier: None });
        assert!(matches!(
            first[1],
            NodeKind::VarDecl {
                keyword: DeclKeyword::Const,
                ..
            }
        ));

        let second = ancestor_kinds(&tree, literals[1]);
        assert!(second[0].const_modifier().is_some());
    }

    #[test]
    fn test_enum_values_and_annotations() {
        let source = "@Deprecated('old')\nenum Color { red('Red'), green('Green') }";
        let tree = parse(source);
        let literals: Vec<NodeId> = tree.strings().map(|(id, _)| id).collect();
        assert_eq!(literals.len(), 3);
        assert!(matches!(
            tree.kind(tree.ancestors(literals[0]).nth(2).unwrap()),
            NodeKind::Annotation { name } if name == "Deprecated"
        ));
        assert!(
            tree.ancestors(literals[1])
                .any(|a| matches!(tree.kind(a), NodeKind::ClassLike { keyword, .. } if keyword == "enum"))
        );
    }

    #[test]
    fn test_case_pattern() {
        let tree = parse("void f(String s) { switch (s) { case 'a': print('A'); } }");
        let literals: Vec<NodeId> = tree.strings().map(|(id, _)| id).collect();
        assert!(matches!(tree.kind(tree.parent(literals[0]).unwrap()), NodeKind::Case));
        assert!(
            !tree.ancestors(literals[1])
                .any(|a| matches!(tree.kind(a), NodeKind::Case))
        );
    }

    #[test]
    fn test_map_literal_is_collection() {
        let tree = parse("final m = {'title': 'Home'};");
        let lit = first_string(&tree);
        assert_eq!(
            *tree.kind(tree.parent(lit).unwrap()),
            NodeKind::Collection { modifier: None }
        );
    }

    #[test]
    fn test_unbalanced_bracket() {
        let err = parse_dart("void f() { foo(]; }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unbalanced {
                found: ']',
                offset: 15
            }
        );
    }

    #[test]
    fn test_unclosed_bracket() {
        let err = parse_dart("void f() { foo(").unwrap_err();
        assert!(matches!(err, ParseError::Unclosed { open: '(', .. }));
    }

    #[test]
    fn test_stray_closer_at_top_level() {
        let err = parse_dart("}").unwrap_err();
        assert_eq!(err, ParseError::Unbalanced { found: '}', offset: 0 });
    }

    #[test]
    fn test_getter_and_spans() {
        let source = "class A { String get title => 'Title'; }";
        let tree = parse(source);
        let lit = first_string(&tree);
        let span = tree.node(lit).span;
        assert_eq!(&source[span.start..span.end], "'Title'");
        assert_eq!(
            *tree.kind(tree.parent(lit).unwrap()),
            NodeKind::Function {
                name: Some("title".into())
            }
        );
    }
}
