//! Tokenizer and recursive-descent parser for type expressions.
//!
//! Container kind names match exactly before their opening delimiter is
//! accepted, so `set` never matches inside `frozenset` and an unknown
//! wrapper is malformed instead of silently producing a bogus token.

use crate::errors::SchemaError;

/// Maximum container nesting depth accepted by the parser.
///
/// Exceeding the bound is a diagnosable error, never a stack overflow.
pub const MAX_TYPE_DEPTH: usize = 32;

/// Container kinds recognized in type expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// `list[T]`
    List,
    /// `tuple[T]` / `tuple(T)`
    Tuple,
    /// `set[T]` / `set{T}` / `set(T)`
    Set,
    /// `frozenset[T]` / `frozenset(T)` / `frozenset({T})`
    FrozenSet,
    /// `dict[K, V]` / `dict{K, V}`
    Dict,
}

impl ContainerKind {
    /// Canonical spelling of the wrapper.
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::List => "list",
            ContainerKind::Tuple => "tuple",
            ContainerKind::Set => "set",
            ContainerKind::FrozenSet => "frozenset",
            ContainerKind::Dict => "dict",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<ContainerKind> {
        match name {
            "list" => Some(ContainerKind::List),
            "tuple" => Some(ContainerKind::Tuple),
            "set" => Some(ContainerKind::Set),
            "frozenset" => Some(ContainerKind::FrozenSet),
            "dict" => Some(ContainerKind::Dict),
            _ => None,
        }
    }

    pub(crate) fn accepts(&self, open: char) -> bool {
        match self {
            ContainerKind::List => open == '[',
            ContainerKind::Tuple => open == '[' || open == '(',
            ContainerKind::Set => open == '[' || open == '{' || open == '(',
            ContainerKind::FrozenSet => open == '[' || open == '(',
            ContainerKind::Dict => open == '[' || open == '{',
        }
    }
}

pub(crate) fn closing_delim(open: char) -> char {
    match open {
        '[' => ']',
        '(' => ')',
        _ => '}',
    }
}

/// Parsed form of a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare primitive token.
    Primitive(String),
    /// A container wrapper with child expressions.
    Container {
        /// Wrapper kind.
        kind: ContainerKind,
        /// Inner expressions, in written order.
        children: Vec<TypeExpr>,
    },
    /// A `schema:<name>` reference.
    SchemaRef(String),
}

struct Parser<'a> {
    expr: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(expr: &'a str) -> Self {
        Parser {
            expr,
            chars: expr.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> SchemaError {
        SchemaError::MalformedExpression {
            expr: self.expr.to_string(),
            position: self.pos,
            reason: reason.into(),
        }
    }

    fn read_token(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '[' | ']' | '(' | ')' | '{' | '}' | ',') {
                break;
            }
            self.pos += 1;
        }
        let token: String = self.chars[start..self.pos].iter().collect();
        token.trim().to_string()
    }

    fn parse_expr(&mut self, depth: usize) -> Result<TypeExpr, SchemaError> {
        if depth > MAX_TYPE_DEPTH {
            return Err(SchemaError::DepthExceeded {
                expr: self.expr.to_string(),
                max: MAX_TYPE_DEPTH,
            });
        }
        self.skip_ws();
        let token = self.read_token();
        if token.is_empty() {
            return Err(self.malformed("expected a type token"));
        }
        if let Some(name) = token.strip_prefix("schema:") {
            return Ok(TypeExpr::SchemaRef(name.trim().to_string()));
        }
        match self.peek() {
            Some(open @ ('[' | '(' | '{')) => {
                let kind = ContainerKind::from_name(&token)
                    .ok_or_else(|| self.malformed(format!("unknown container kind '{}'", token)))?;
                if !kind.accepts(open) {
                    return Err(
                        self.malformed(format!("'{}' does not accept '{}' delimiters", token, open))
                    );
                }
                self.bump();
                // frozenset({ ... }) spelling carries an extra brace pair
                let braced = kind == ContainerKind::FrozenSet && open == '(' && {
                    self.skip_ws();
                    if self.peek() == Some('{') {
                        self.bump();
                        true
                    } else {
                        false
                    }
                };
                let children = self.parse_children(depth + 1)?;
                if braced {
                    self.expect_close('}')?;
                }
                self.expect_close(closing_delim(open))?;
                Ok(TypeExpr::Container { kind, children })
            }
            _ => Ok(TypeExpr::Primitive(token)),
        }
    }

    fn parse_children(&mut self, depth: usize) -> Result<Vec<TypeExpr>, SchemaError> {
        let mut children = Vec::new();
        loop {
            self.skip_ws();
            if self.peek().is_none() || matches!(self.peek(), Some(']' | ')' | '}')) {
                break;
            }
            children.push(self.parse_expr(depth)?);
            self.skip_ws();
            if self.peek() == Some(',') {
                self.bump();
                continue;
            }
            break;
        }
        if children.is_empty() {
            return Err(self.malformed("empty container expression"));
        }
        Ok(children)
    }

    fn expect_close(&mut self, expected: char) -> Result<(), SchemaError> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.malformed(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.malformed(format!("expected '{}', found end of input", expected))),
        }
    }
}

/// Parses a complete type expression into its AST.
///
/// Unbalanced delimiters, empty container expressions, unknown
/// wrappers, and trailing input are all rejected with a positioned
/// reason.
pub fn parse_type_expr(expr: &str) -> Result<TypeExpr, SchemaError> {
    let mut parser = Parser::new(expr);
    let parsed = parser.parse_expr(0)?;
    parser.skip_ws();
    if parser.peek().is_some() {
        return Err(parser.malformed("trailing input after expression"));
    }
    Ok(parsed)
}
