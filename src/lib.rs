//! # vbsast
//!
//! Syntax tree, traversal, and source printer for VBScript.
//!
//! ## Architecture
//!
//! The crate sits behind a parser: it takes a tree that something else
//! built and turns it back into source text.
//!
//! ```text
//! Parser / tool → AST → walk (Visitor) → Printer → VBScript source
//! ```
//!
//! - [`token`] - Source positions and the token vocabulary nodes refer to
//! - [`ast`] - Node types and the generic traversal engine
//! - [`printer`] - Renders any node back to indented source
//!
//! ## Example
//!
//! ```
//! use vbsast::prelude::*;
//!
//! let body = BlockStmt::new(vec![AssignStmt::new(Ident::new("n"), BasicLit::integer(0)).into()]);
//! let sub = SubDecl::new("Reset", vec![], body);
//! let file = File::new(vec![sub.into()], vec![]);
//!
//! assert_eq!(render(&file), "Sub Reset\n  n = 0\nEnd Sub\n");
//! ```

pub mod ast;
pub mod printer;
pub mod token;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::ast::{
        walk, AssignStmt, BasicLit, BlockStmt, CallExpr, ClassDecl, Decl, DimDecl, Expr, ExprStmt,
        File, FuncDecl, Ident, IfStmt, Node, NodeRef, Stmt, SubDecl, VisitResult, Visitor,
    };
    pub use crate::printer::{print, print_to, render, PrintError, Printer};
    pub use crate::token::{Pos, Token};
}
