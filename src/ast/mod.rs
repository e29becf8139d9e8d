//! Abstract Syntax Tree (AST) definitions for VBScript.
//!
//! The AST represents the hierarchical structure of a script after parsing.
//! Each node in the tree corresponds to a syntactic construct in the source code.
//!
//! # Structure
//!
//! ```text
//! File
//! ├── Vec<Decl>
//! │   ├── Sub / Func / Property { name, params, body: BlockStmt }
//! │   ├── Class { name, decls: Vec<Decl>, stmts: Vec<Stmt> }
//! │   └── Dim / ReDim { list: Vec<Expr> }
//! └── Vec<Stmt>
//!     ├── If { cond: Expr, body, else_ifs: Vec<IfStmt>, else_body }
//!     ├── Select { var: Expr, cases: Vec<CaseStmt>, else_case }
//!     ├── Assign { lhs: Expr, rhs: Expr }
//!     └── ...
//! ```
//!
//! # Design Decisions
//!
//! - **Closed sum types**: [`Decl`], [`Stmt`] and [`Expr`] are enums over
//!   boxed per-variant structs. Every consumer matches exhaustively, so a new
//!   node kind cannot be silently skipped by the walker or the printer.
//! - **Positions, not spans**: nodes store the positions of their keywords and
//!   derive `pos()`/`end()` from them and from their children through the
//!   [`Node`] trait.
//! - **Owned nodes**: children are owned, no node refers back to its parent.
//!   The parser builds a tree once and everything after it only reads.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

use crate::token::{Pos, Token};

/// Generates a closed node enum over boxed variant structs, its [`Node`]
/// delegation, its category marker, and `From` conversions for every variant.
macro_rules! node_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $marker:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ident), )+
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant(Box<$ty>), )+
        }

        impl $crate::ast::Node for $name {
            fn pos(&self) -> $crate::token::Pos {
                match self {
                    $( $name::$variant(n) => n.pos(), )+
                }
            }

            fn end(&self) -> $crate::token::Pos {
                match self {
                    $( $name::$variant(n) => n.end(), )+
                }
            }
        }

        impl $marker for $name {}

        $(
            impl $marker for $ty {}

            impl From<$ty> for $name {
                fn from(node: $ty) -> Self {
                    $name::$variant(Box::new(node))
                }
            }
        )+
    };
}

mod decl;
mod expr;
mod stmt;
mod validate;
mod walk;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use validate::{validate, MalformedNode};
pub use walk::*;

/// Every syntax tree node reports where it starts and where it ends.
pub trait Node {
    /// Position of the first character belonging to the node.
    fn pos(&self) -> Pos;
    /// Position immediately after the node.
    fn end(&self) -> Pos;
}

/// Marker for declaration nodes.
pub trait DeclNode: Node {}

/// Marker for statement nodes.
pub trait StmtNode: Node {}

/// Marker for expression nodes.
pub trait ExprNode: Node {}

/// Returns the end of the last node in a list the node model requires to be
/// non-empty.
///
/// # Panics
///
/// Panics if `list` is empty. Only well-formed trees may reach this point.
pub(crate) fn tail_end<N: Node>(list: &[N], owner: &str) -> Pos {
    match list.last() {
        Some(node) => node.end(),
        None => panic!("{owner}: end() requires a non-empty list"),
    }
}

/// Visibility modifier attached to declarations and class members.
///
/// A small bitset over `Public` and `Private`. [`Modifier::is_all`] tests for
/// exact equality with `PUBLIC | PRIVATE`.
///
/// # Example
///
/// ```
/// use vbsast::ast::Modifier;
///
/// let m = Modifier::PUBLIC | Modifier::PRIVATE;
/// assert!(m.is_all());
/// assert!(m.has_public());
/// assert!(Modifier::NONE.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifier(u8);

impl Modifier {
    pub const NONE: Modifier = Modifier(0);
    pub const PUBLIC: Modifier = Modifier(1 << 0);
    pub const PRIVATE: Modifier = Modifier(1 << 1);
    pub const ALL: Modifier = Modifier(Self::PUBLIC.0 | Self::PRIVATE.0);

    pub fn is_none(self) -> bool {
        self == Modifier::NONE
    }

    pub fn has_public(self) -> bool {
        self.0 & Modifier::PUBLIC.0 != 0
    }

    pub fn has_private(self) -> bool {
        self.0 & Modifier::PRIVATE.0 != 0
    }

    pub fn is_all(self) -> bool {
        self == Modifier::ALL
    }

    /// Returns true when the modifier contributes a leading keyword, which
    /// moves the owning node's start to the modifier position.
    pub(crate) fn is_visible(self) -> bool {
        self.has_public() || self.has_private()
    }
}

impl BitOr for Modifier {
    type Output = Modifier;

    fn bitor(self, rhs: Modifier) -> Modifier {
        Modifier(self.0 | rhs.0)
    }
}

/// A single `'` or `Rem` comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub tok_pos: Pos,
    /// [`Token::Apostrophe`] or [`Token::Rem`].
    pub tok: Token,
    /// Comment text without the marker.
    pub text: String,
}

impl Comment {
    /// Creates an apostrophe comment without position information.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            tok_pos: Pos::NONE,
            tok: Token::Apostrophe,
            text: text.into(),
        }
    }
}

impl Node for Comment {
    fn pos(&self) -> Pos {
        self.tok_pos
    }

    fn end(&self) -> Pos {
        self.tok_pos.advance(self.text.len())
    }
}

/// A run of comments attached to a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl Node for CommentGroup {
    fn pos(&self) -> Pos {
        match self.list.first() {
            Some(c) => c.pos(),
            None => panic!("CommentGroup: pos() requires a non-empty list"),
        }
    }

    fn end(&self) -> Pos {
        tail_end(&self.list, "CommentGroup")
    }
}

/// A procedure parameter: `[ByVal|ByRef] name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub tok_pos: Pos,
    /// [`Token::ByVal`] or [`Token::ByRef`] when written explicitly.
    #[serde(default)]
    pub tok: Option<Token>,
    pub name: Ident,
}

impl Field {
    /// Creates a parameter without an explicit passing mode.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            tok_pos: Pos::NONE,
            tok: None,
            name: Ident::new(name),
        }
    }

    /// Creates a parameter with an explicit `ByVal` or `ByRef` marker.
    pub fn with_mode(mode: Token, name: impl Into<String>) -> Self {
        Self {
            tok_pos: Pos::NONE,
            tok: Some(mode),
            name: Ident::new(name),
        }
    }
}

impl Node for Field {
    fn pos(&self) -> Pos {
        if self.tok.is_some() && self.tok_pos.is_valid() {
            self.tok_pos
        } else {
            self.name.pos()
        }
    }

    fn end(&self) -> Pos {
        self.name.end()
    }
}

/// The root of a parsed script.
///
/// Top-level declarations and statements are kept in two independent lists.
/// The printer emits declarations first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct File {
    #[serde(default)]
    pub doc: Option<CommentGroup>,
    #[serde(default)]
    pub decls: Vec<Decl>,
    #[serde(default)]
    pub stmts: Vec<Stmt>,
}

impl File {
    /// Creates a file from its top-level declarations and statements.
    pub fn new(decls: Vec<Decl>, stmts: Vec<Stmt>) -> Self {
        Self {
            doc: None,
            decls,
            stmts,
        }
    }
}

impl Node for File {
    fn pos(&self) -> Pos {
        Pos::NONE
    }

    fn end(&self) -> Pos {
        Pos::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits() {
        assert!(Modifier::NONE.is_none());
        assert!(Modifier::PUBLIC.has_public());
        assert!(!Modifier::PUBLIC.has_private());
        assert!(Modifier::PRIVATE.has_private());
        assert!(!Modifier::PUBLIC.is_all());
        assert_eq!(Modifier::PUBLIC | Modifier::PRIVATE, Modifier::ALL);
        assert!(Modifier::ALL.is_all());
    }

    #[test]
    fn test_comment_span() {
        let c = Comment {
            tok_pos: Pos::new(10),
            tok: Token::Apostrophe,
            text: "note".to_string(),
        };
        assert_eq!(c.pos(), Pos::new(10));
        assert_eq!(c.end(), Pos::new(14));
    }

    #[test]
    fn test_comment_group_span() {
        let group = CommentGroup {
            list: vec![
                Comment {
                    tok_pos: Pos::new(0),
                    tok: Token::Apostrophe,
                    text: "a".to_string(),
                },
                Comment {
                    tok_pos: Pos::new(5),
                    tok: Token::Rem,
                    text: "bcd".to_string(),
                },
            ],
        };
        assert_eq!(group.pos(), Pos::new(0));
        assert_eq!(group.end(), Pos::new(8));
    }

    #[test]
    #[should_panic(expected = "CommentGroup")]
    fn test_empty_comment_group_panics() {
        CommentGroup::default().end();
    }

    #[test]
    fn test_field_pos_prefers_mode() {
        let mut field = Field::with_mode(Token::ByRef, "val");
        field.tok_pos = Pos::new(4);
        field.name.name_pos = Pos::new(10);
        assert_eq!(field.pos(), Pos::new(4));
        assert_eq!(field.end(), Pos::new(13));

        let mut plain = Field::new("val");
        plain.name.name_pos = Pos::new(10);
        assert_eq!(plain.pos(), Pos::new(10));
    }

    #[test]
    fn test_file_has_no_position() {
        let file = File::default();
        assert_eq!(file.pos(), Pos::NONE);
        assert_eq!(file.end(), Pos::NONE);
    }
}
