//! Declaration AST nodes.
//!
//! Declarations introduce names: procedures (`Sub`, `Function`, `Property`),
//! classes, and variables (`Dim`, `ReDim`). Procedures and classes may carry a
//! visibility [`Modifier`]; when they do, the node starts at the modifier.

use serde::{Deserialize, Serialize};

use super::{tail_end, AssignStmt, BlockStmt, DeclNode, Expr, Field, Ident, Modifier, Node, Stmt};
use crate::token::{Pos, Token};

node_enum! {
    /// Any declaration.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub enum Decl: DeclNode {
        /// `Sub Name(params) ... End Sub`
        Sub(SubDecl),
        /// `Function Name(params) ... End Function`
        Func(FuncDecl),
        /// `Property Get|Let|Set Name(params) ... End Property`
        Property(PropertyDecl),
        /// `Class Name ... End Class`
        Class(ClassDecl),
        /// `Dim a, b(3)`
        Dim(DimDecl),
        /// `ReDim [Preserve] a(10)`
        ReDim(ReDimDecl),
    }
}

/// Start of a declaration that may be preceded by a visibility modifier.
fn decl_start(modifier: Modifier, mod_pos: Pos, keyword_pos: Pos) -> Pos {
    if modifier.is_visible() {
        mod_pos
    } else {
        keyword_pos
    }
}

/// `[Public|Private] Sub Name[(params)] ... End Sub`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDecl {
    #[serde(default)]
    pub modifier: Modifier,
    #[serde(default)]
    pub mod_pos: Pos,
    #[serde(default)]
    pub sub_pos: Pos,
    pub name: Ident,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub end_sub_pos: Pos,
}

impl SubDecl {
    pub fn new(name: impl Into<String>, params: Vec<Field>, body: BlockStmt) -> Self {
        Self {
            modifier: Modifier::NONE,
            mod_pos: Pos::NONE,
            sub_pos: Pos::NONE,
            name: Ident::new(name),
            params,
            body,
            end_sub_pos: Pos::NONE,
        }
    }
}

impl Node for SubDecl {
    fn pos(&self) -> Pos {
        decl_start(self.modifier, self.mod_pos, self.sub_pos)
    }

    fn end(&self) -> Pos {
        self.end_sub_pos.advance("End Sub".len())
    }
}

/// `[Public|Private] Function Name(params) ... End Function`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    #[serde(default)]
    pub modifier: Modifier,
    #[serde(default)]
    pub mod_pos: Pos,
    #[serde(default)]
    pub function_pos: Pos,
    pub name: Ident,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub end_function_pos: Pos,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, params: Vec<Field>, body: BlockStmt) -> Self {
        Self {
            modifier: Modifier::NONE,
            mod_pos: Pos::NONE,
            function_pos: Pos::NONE,
            name: Ident::new(name),
            params,
            body,
            end_function_pos: Pos::NONE,
        }
    }
}

impl Node for FuncDecl {
    fn pos(&self) -> Pos {
        decl_start(self.modifier, self.mod_pos, self.function_pos)
    }

    fn end(&self) -> Pos {
        self.end_function_pos.advance("End Function".len())
    }
}

/// `[Public|Private] Property Get|Let|Set Name(params) ... End Property`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDecl {
    #[serde(default)]
    pub modifier: Modifier,
    #[serde(default)]
    pub mod_pos: Pos,
    #[serde(default)]
    pub property_pos: Pos,
    /// [`Token::Get`], [`Token::Let`] or [`Token::Set`].
    pub tok: Token,
    #[serde(default)]
    pub tok_pos: Pos,
    pub name: Ident,
    #[serde(default)]
    pub params: Vec<Field>,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub end_property_pos: Pos,
}

impl PropertyDecl {
    pub fn new(tok: Token, name: impl Into<String>, params: Vec<Field>, body: BlockStmt) -> Self {
        Self {
            modifier: Modifier::NONE,
            mod_pos: Pos::NONE,
            property_pos: Pos::NONE,
            tok,
            tok_pos: Pos::NONE,
            name: Ident::new(name),
            params,
            body,
            end_property_pos: Pos::NONE,
        }
    }
}

impl Node for PropertyDecl {
    fn pos(&self) -> Pos {
        decl_start(self.modifier, self.mod_pos, self.property_pos)
    }

    fn end(&self) -> Pos {
        self.end_property_pos.advance("End Property".len())
    }
}

/// `[Public|Private] Class Name ... End Class`
///
/// Nested declarations and member statements live in two separate lists.
/// Both the walker and the printer visit `decls` before `stmts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    #[serde(default)]
    pub modifier: Modifier,
    #[serde(default)]
    pub mod_pos: Pos,
    #[serde(default)]
    pub class_pos: Pos,
    pub name: Ident,
    /// Members, assignments and other class-level statements.
    #[serde(default)]
    pub stmts: Vec<Stmt>,
    /// Procedures, properties and variable declarations.
    #[serde(default)]
    pub decls: Vec<Decl>,
    #[serde(default)]
    pub end_class_pos: Pos,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>, decls: Vec<Decl>, stmts: Vec<Stmt>) -> Self {
        Self {
            modifier: Modifier::NONE,
            mod_pos: Pos::NONE,
            class_pos: Pos::NONE,
            name: Ident::new(name),
            stmts,
            decls,
            end_class_pos: Pos::NONE,
        }
    }
}

impl Node for ClassDecl {
    fn pos(&self) -> Pos {
        decl_start(self.modifier, self.mod_pos, self.class_pos)
    }

    fn end(&self) -> Pos {
        self.end_class_pos.advance("End Class".len())
    }
}

/// `Dim a, b(3)[: Set a = rhs]`
///
/// The inline `Set` is the `Dim x: Set x = CreateObject(...)` idiom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimDecl {
    #[serde(default)]
    pub dim_pos: Pos,
    pub list: Vec<Expr>,
    #[serde(default)]
    pub colon_pos: Pos,
    #[serde(default)]
    pub set: Option<AssignStmt>,
}

impl DimDecl {
    pub fn new(list: Vec<Expr>) -> Self {
        Self {
            dim_pos: Pos::NONE,
            list,
            colon_pos: Pos::NONE,
            set: None,
        }
    }
}

impl Node for DimDecl {
    fn pos(&self) -> Pos {
        self.dim_pos
    }

    /// # Panics
    ///
    /// Panics if `list` is empty.
    fn end(&self) -> Pos {
        if let Some(set) = &self.set {
            return set.end();
        }
        tail_end(&self.list, "DimDecl")
    }
}

/// `ReDim [Preserve] a(10)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReDimDecl {
    #[serde(default)]
    pub redim_pos: Pos,
    /// Valid when `Preserve` is present; [`Pos::SYNTHETIC`] marks a
    /// tool-inserted `Preserve`.
    #[serde(default)]
    pub preserve_pos: Pos,
    pub list: Vec<Expr>,
}

impl ReDimDecl {
    pub fn new(preserve: bool, list: Vec<Expr>) -> Self {
        Self {
            redim_pos: Pos::NONE,
            preserve_pos: if preserve { Pos::SYNTHETIC } else { Pos::NONE },
            list,
        }
    }

    pub fn has_preserve(&self) -> bool {
        self.preserve_pos.is_valid()
    }
}

impl Node for ReDimDecl {
    fn pos(&self) -> Pos {
        self.redim_pos
    }

    /// # Panics
    ///
    /// Panics if `list` is empty.
    fn end(&self) -> Pos {
        tail_end(&self.list, "ReDimDecl")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decl_pos_follows_modifier() {
        let mut sub = SubDecl::new("Init", vec![], BlockStmt::default());
        sub.sub_pos = Pos::new(7);
        sub.mod_pos = Pos::new(0);
        assert_eq!(sub.pos(), Pos::new(7));

        sub.modifier = Modifier::PUBLIC;
        assert_eq!(sub.pos(), Pos::new(0));

        sub.modifier = Modifier::PRIVATE;
        assert_eq!(sub.pos(), Pos::new(0));
    }

    #[test]
    fn test_class_end_covers_footer() {
        let mut class = ClassDecl::new("RGB", vec![], vec![]);
        class.class_pos = Pos::new(0);
        class.end_class_pos = Pos::new(20);
        assert_eq!(class.end(), Pos::new(29));
        assert!(class.end() >= class.pos());
    }

    #[test]
    fn test_dim_end_is_last_variable() {
        let a = Ident {
            name_pos: Pos::new(4),
            name: "a".to_string(),
        };
        let bc = Ident {
            name_pos: Pos::new(7),
            name: "bc".to_string(),
        };
        let dim = DimDecl::new(vec![a.into(), bc.into()]);
        assert_eq!(dim.end(), Pos::new(9));
    }

    #[test]
    #[should_panic(expected = "DimDecl")]
    fn test_empty_dim_end_panics() {
        DimDecl::new(vec![]).end();
    }

    #[test]
    #[should_panic(expected = "ReDimDecl")]
    fn test_empty_redim_end_panics() {
        ReDimDecl::new(false, vec![]).end();
    }

    #[test]
    fn test_redim_preserve_flag() {
        assert!(ReDimDecl::new(true, vec![]).has_preserve());
        assert!(!ReDimDecl::new(false, vec![]).has_preserve());
    }

    #[test]
    fn test_decl_enum_conversion() {
        let decl: Decl = FuncDecl::new("color", vec![], BlockStmt::default()).into();
        assert!(matches!(decl, Decl::Func(_)));
    }
}
