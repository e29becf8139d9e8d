//! Expression AST nodes.
//!
//! Expressions are constructs that evaluate to a value: literals, names,
//! member access, indexing, calls, object creation, and operator application.
//!
//! # Indexing vs. Calls
//!
//! VBScript writes array indexing and procedure application with the same
//! parentheses. The parser decides which node to build; the tree keeps
//! single-index [`IndexExpr`] and multi-index [`IndexListExpr`] apart even
//! though both print as `X(i[, j...])`.

use serde::{Deserialize, Serialize};

use super::{tail_end, ExprNode, Node};
use crate::token::{Pos, Token};

node_enum! {
    /// Any expression.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub enum Expr: ExprNode {
        /// Literal: `42`, `"text"`, `#1/1/2000#`
        BasicLit(BasicLit),
        /// Name: `x`, `MsgBox`
        Ident(Ident),
        /// `X(index)`
        Index(IndexExpr),
        /// `X(i, j, k)`
        IndexList(IndexListExpr),
        /// `New X`
        New(NewExpr),
        /// `Func(args)`
        Call(CallExpr),
        /// `X.Sel`
        Selector(SelectorExpr),
        /// `X op Y`
        Binary(BinaryExpr),
    }
}

/// A literal of basic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicLit {
    /// One of the literal kinds, see [`Token::is_literal_kind`].
    pub kind: Token,
    /// Literal text. String literals hold their content without quotes.
    pub value: String,
    #[serde(default)]
    pub value_pos: Pos,
}

impl BasicLit {
    /// Creates a literal without position information.
    pub fn new(kind: Token, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            value_pos: Pos::NONE,
        }
    }

    /// Creates a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Token::String, value)
    }

    /// Creates an integer literal.
    pub fn integer(value: impl ToString) -> Self {
        Self::new(Token::Integer, value.to_string())
    }
}

impl Node for BasicLit {
    fn pos(&self) -> Pos {
        self.value_pos
    }

    fn end(&self) -> Pos {
        let quotes = if self.kind == Token::String { 2 } else { 0 };
        self.value_pos.advance(self.value.len() + quotes)
    }
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    #[serde(default)]
    pub name_pos: Pos,
    pub name: String,
}

impl Ident {
    /// Creates an identifier without position information.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name_pos: Pos::NONE,
            name: name.into(),
        }
    }
}

impl Node for Ident {
    fn pos(&self) -> Pos {
        self.name_pos
    }

    fn end(&self) -> Pos {
        self.name_pos.advance(self.name.len())
    }
}

/// An expression followed by a single index: `Names(9)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpr {
    pub x: Expr,
    #[serde(default)]
    pub lparen: Pos,
    pub index: Expr,
    #[serde(default)]
    pub rparen: Pos,
}

impl IndexExpr {
    pub fn new(x: impl Into<Expr>, index: impl Into<Expr>) -> Self {
        Self {
            x: x.into(),
            lparen: Pos::NONE,
            index: index.into(),
            rparen: Pos::NONE,
        }
    }
}

impl Node for IndexExpr {
    fn pos(&self) -> Pos {
        self.x.pos()
    }

    fn end(&self) -> Pos {
        if self.rparen.is_valid() {
            self.rparen.advance(1)
        } else {
            self.index.end()
        }
    }
}

/// An expression followed by several indices: `Grid(10, 10, 10)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexListExpr {
    pub x: Expr,
    #[serde(default)]
    pub lparen: Pos,
    pub indices: Vec<Expr>,
    #[serde(default)]
    pub rparen: Pos,
}

impl IndexListExpr {
    pub fn new(x: impl Into<Expr>, indices: Vec<Expr>) -> Self {
        Self {
            x: x.into(),
            lparen: Pos::NONE,
            indices,
            rparen: Pos::NONE,
        }
    }
}

impl Node for IndexListExpr {
    fn pos(&self) -> Pos {
        self.x.pos()
    }

    fn end(&self) -> Pos {
        if self.rparen.is_valid() {
            self.rparen.advance(1)
        } else {
            tail_end(&self.indices, "IndexListExpr")
        }
    }
}

/// Object instantiation: `New Scripting.Dictionary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpr {
    #[serde(default)]
    pub new_pos: Pos,
    pub x: Expr,
}

impl NewExpr {
    pub fn new(x: impl Into<Expr>) -> Self {
        Self {
            new_pos: Pos::NONE,
            x: x.into(),
        }
    }
}

impl Node for NewExpr {
    fn pos(&self) -> Pos {
        self.new_pos
    }

    fn end(&self) -> Pos {
        self.x.end()
    }
}

/// An expression followed by an argument list: `CreateObject("x")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub func: Expr,
    #[serde(default)]
    pub lparen: Pos,
    #[serde(default)]
    pub args: Vec<Expr>,
    #[serde(default)]
    pub rparen: Pos,
}

impl CallExpr {
    pub fn new(func: impl Into<Expr>, args: Vec<Expr>) -> Self {
        Self {
            func: func.into(),
            lparen: Pos::NONE,
            args,
            rparen: Pos::NONE,
        }
    }
}

impl Node for CallExpr {
    fn pos(&self) -> Pos {
        self.func.pos()
    }

    fn end(&self) -> Pos {
        if self.rparen.is_valid() {
            return self.rparen.advance(1);
        }
        match self.args.last() {
            Some(arg) => arg.end(),
            None => self.func.end(),
        }
    }
}

/// Member access: `Err.Number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorExpr {
    pub x: Expr,
    pub sel: Ident,
}

impl SelectorExpr {
    pub fn new(x: impl Into<Expr>, sel: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            sel: Ident::new(sel),
        }
    }
}

impl Node for SelectorExpr {
    fn pos(&self) -> Pos {
        self.x.pos()
    }

    fn end(&self) -> Pos {
        self.sel.end()
    }
}

/// Operator application: `a < 10`, `"Error # " & n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub x: Expr,
    #[serde(default)]
    pub op_pos: Pos,
    /// An operator token, see [`Token::is_operator`].
    pub op: Token,
    pub y: Expr,
}

impl BinaryExpr {
    pub fn new(x: impl Into<Expr>, op: Token, y: impl Into<Expr>) -> Self {
        Self {
            x: x.into(),
            op_pos: Pos::NONE,
            op,
            y: y.into(),
        }
    }
}

impl Node for BinaryExpr {
    fn pos(&self) -> Pos {
        self.x.pos()
    }

    fn end(&self) -> Pos {
        self.y.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident_at(name: &str, offset: usize) -> Ident {
        Ident {
            name_pos: Pos::new(offset),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_ident_span() {
        let id = ident_at("Names", 4);
        assert_eq!(id.pos(), Pos::new(4));
        assert_eq!(id.end(), Pos::new(9));
    }

    #[test]
    fn test_string_literal_span_includes_quotes() {
        let mut lit = BasicLit::string("abc");
        lit.value_pos = Pos::new(0);
        assert_eq!(lit.end(), Pos::new(5));

        let mut num = BasicLit::integer(42);
        num.value_pos = Pos::new(0);
        assert_eq!(num.end(), Pos::new(2));
    }

    #[test]
    fn test_call_end_fallbacks() {
        // MsgBox(x) with the closing paren at offset 9
        let mut call = CallExpr::new(ident_at("MsgBox", 0), vec![ident_at("x", 7).into()]);
        call.rparen = Pos::new(8);
        assert_eq!(call.end(), Pos::new(9));

        call.rparen = Pos::NONE;
        assert_eq!(call.end(), Pos::new(8));

        let bare = CallExpr::new(ident_at("Now", 0), vec![]);
        assert_eq!(bare.end(), Pos::new(3));
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let expr = BinaryExpr::new(ident_at("a", 0), Token::Less, ident_at("b", 4));
        assert_eq!(expr.pos(), Pos::new(0));
        assert_eq!(expr.end(), Pos::new(5));
        assert!(expr.end() >= expr.pos());
    }

    #[test]
    fn test_expr_enum_delegates() {
        let expr: Expr = SelectorExpr {
            x: ident_at("Err", 0).into(),
            sel: ident_at("Raise", 4),
        }
        .into();
        assert!(matches!(expr, Expr::Selector(_)));
        assert_eq!(expr.pos(), Pos::new(0));
        assert_eq!(expr.end(), Pos::new(9));
    }

    #[test]
    #[should_panic(expected = "IndexListExpr")]
    fn test_index_list_without_indices_panics() {
        IndexListExpr::new(Ident::new("X"), vec![]).end();
    }
}
