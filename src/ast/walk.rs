//! Generic depth-first traversal.
//!
//! [`walk`] calls [`Visitor::visit`] on a node and, unless the visitor
//! answers [`VisitResult::SkipChildren`], walks every child in field order.
//!
//! # Traversal Order
//!
//! - **Pre-order**: a parent is visited before its children
//! - Children are visited in the order their fields are declared
//! - `ClassDecl` and `File` visit `decls` before `stmts`, the same order the
//!   printer uses
//!
//! # Example
//!
//! ```
//! use vbsast::ast::{walk, AssignStmt, CallExpr, Ident, IdentCollector};
//!
//! let stmt = AssignStmt::new(
//!     Ident::new("A"),
//!     CallExpr::new(Ident::new("Array"), vec![Ident::new("B").into()]),
//! );
//!
//! let mut names = IdentCollector::default();
//! walk(&mut names, &stmt);
//! assert_eq!(names.names, ["A", "Array", "B"]);
//! ```

use super::*;
use crate::token::Pos;

/// What [`walk`] should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitResult {
    /// Walk the node's children.
    Continue,
    /// Do not descend into this node.
    SkipChildren,
}

/// Invoked once per node reached by [`walk`].
pub trait Visitor {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult;
}

/// A borrowed reference to any node in a tree.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    File(&'a File),
    Comment(&'a Comment),
    CommentGroup(&'a CommentGroup),
    Field(&'a Field),

    SubDecl(&'a SubDecl),
    FuncDecl(&'a FuncDecl),
    PropertyDecl(&'a PropertyDecl),
    ClassDecl(&'a ClassDecl),
    DimDecl(&'a DimDecl),
    ReDimDecl(&'a ReDimDecl),

    OptionStmt(&'a OptionStmt),
    RandomizeStmt(&'a RandomizeStmt),
    WithStmt(&'a WithStmt),
    AssignStmt(&'a AssignStmt),
    StopStmt(&'a StopStmt),
    SelectStmt(&'a SelectStmt),
    CaseStmt(&'a CaseStmt),
    IfStmt(&'a IfStmt),
    BlockStmt(&'a BlockStmt),
    CallStmt(&'a CallStmt),
    ExitStmt(&'a ExitStmt),
    ForNextStmt(&'a ForNextStmt),
    ForEachStmt(&'a ForEachStmt),
    WhileWendStmt(&'a WhileWendStmt),
    DoLoopStmt(&'a DoLoopStmt),
    OnErrorStmt(&'a OnErrorStmt),
    MemberStmt(&'a MemberStmt),
    ExprStmt(&'a ExprStmt),

    BasicLit(&'a BasicLit),
    Ident(&'a Ident),
    IndexExpr(&'a IndexExpr),
    IndexListExpr(&'a IndexListExpr),
    NewExpr(&'a NewExpr),
    CallExpr(&'a CallExpr),
    SelectorExpr(&'a SelectorExpr),
    BinaryExpr(&'a BinaryExpr),
}

macro_rules! node_ref_from {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    NodeRef::$ty(node)
                }
            }
        )+

        impl NodeRef<'_> {
            /// Name of the referenced node type, e.g. `"IfStmt"`.
            pub fn kind(&self) -> &'static str {
                match self {
                    $( NodeRef::$ty(_) => stringify!($ty), )+
                }
            }
        }

        impl Node for NodeRef<'_> {
            fn pos(&self) -> Pos {
                match self {
                    $( NodeRef::$ty(n) => n.pos(), )+
                }
            }

            fn end(&self) -> Pos {
                match self {
                    $( NodeRef::$ty(n) => n.end(), )+
                }
            }
        }
    };
}

node_ref_from!(
    File,
    Comment,
    CommentGroup,
    Field,
    SubDecl,
    FuncDecl,
    PropertyDecl,
    ClassDecl,
    DimDecl,
    ReDimDecl,
    OptionStmt,
    RandomizeStmt,
    WithStmt,
    AssignStmt,
    StopStmt,
    SelectStmt,
    CaseStmt,
    IfStmt,
    BlockStmt,
    CallStmt,
    ExitStmt,
    ForNextStmt,
    ForEachStmt,
    WhileWendStmt,
    DoLoopStmt,
    OnErrorStmt,
    MemberStmt,
    ExprStmt,
    BasicLit,
    Ident,
    IndexExpr,
    IndexListExpr,
    NewExpr,
    CallExpr,
    SelectorExpr,
    BinaryExpr,
);

impl<'a> From<&'a Decl> for NodeRef<'a> {
    fn from(decl: &'a Decl) -> Self {
        match decl {
            Decl::Sub(d) => NodeRef::SubDecl(d),
            Decl::Func(d) => NodeRef::FuncDecl(d),
            Decl::Property(d) => NodeRef::PropertyDecl(d),
            Decl::Class(d) => NodeRef::ClassDecl(d),
            Decl::Dim(d) => NodeRef::DimDecl(d),
            Decl::ReDim(d) => NodeRef::ReDimDecl(d),
        }
    }
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Option(s) => NodeRef::OptionStmt(s),
            Stmt::Randomize(s) => NodeRef::RandomizeStmt(s),
            Stmt::With(s) => NodeRef::WithStmt(s),
            Stmt::Assign(s) => NodeRef::AssignStmt(s),
            Stmt::Stop(s) => NodeRef::StopStmt(s),
            Stmt::Select(s) => NodeRef::SelectStmt(s),
            Stmt::Case(s) => NodeRef::CaseStmt(s),
            Stmt::If(s) => NodeRef::IfStmt(s),
            Stmt::Block(s) => NodeRef::BlockStmt(s),
            Stmt::Call(s) => NodeRef::CallStmt(s),
            Stmt::Exit(s) => NodeRef::ExitStmt(s),
            Stmt::ForNext(s) => NodeRef::ForNextStmt(s),
            Stmt::ForEach(s) => NodeRef::ForEachStmt(s),
            Stmt::WhileWend(s) => NodeRef::WhileWendStmt(s),
            Stmt::DoLoop(s) => NodeRef::DoLoopStmt(s),
            Stmt::OnError(s) => NodeRef::OnErrorStmt(s),
            Stmt::Member(s) => NodeRef::MemberStmt(s),
            Stmt::Expr(s) => NodeRef::ExprStmt(s),
        }
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::BasicLit(e) => NodeRef::BasicLit(e),
            Expr::Ident(e) => NodeRef::Ident(e),
            Expr::Index(e) => NodeRef::IndexExpr(e),
            Expr::IndexList(e) => NodeRef::IndexListExpr(e),
            Expr::New(e) => NodeRef::NewExpr(e),
            Expr::Call(e) => NodeRef::CallExpr(e),
            Expr::Selector(e) => NodeRef::SelectorExpr(e),
            Expr::Binary(e) => NodeRef::BinaryExpr(e),
        }
    }
}

/// Walks `node` and everything reachable from it, depth first.
///
/// The tree is acyclic by construction, so every node is visited once.
pub fn walk<'a, V>(visitor: &mut V, node: impl Into<NodeRef<'a>>)
where
    V: Visitor + ?Sized,
{
    walk_ref(visitor, node.into());
}

fn walk_ref<V: Visitor + ?Sized>(v: &mut V, node: NodeRef<'_>) {
    if v.visit(node) == VisitResult::SkipChildren {
        return;
    }
    log::trace!("walking children of {}", node.kind());

    match node {
        NodeRef::File(n) => {
            if let Some(doc) = &n.doc {
                walk_ref(v, doc.into());
            }
            walk_list(v, &n.decls);
            walk_list(v, &n.stmts);
        }
        NodeRef::CommentGroup(n) => walk_list(v, &n.list),
        NodeRef::Field(n) => walk_ref(v, (&n.name).into()),

        // Declarations
        NodeRef::SubDecl(n) => walk_procedure(v, &n.name, &n.params, &n.body),
        NodeRef::FuncDecl(n) => walk_procedure(v, &n.name, &n.params, &n.body),
        NodeRef::PropertyDecl(n) => walk_procedure(v, &n.name, &n.params, &n.body),
        NodeRef::ClassDecl(n) => {
            walk_ref(v, (&n.name).into());
            walk_list(v, &n.decls);
            walk_list(v, &n.stmts);
        }
        NodeRef::DimDecl(n) => {
            walk_list(v, &n.list);
            if let Some(set) = &n.set {
                walk_ref(v, set.into());
            }
        }
        NodeRef::ReDimDecl(n) => walk_list(v, &n.list),

        // Statements
        NodeRef::WithStmt(n) => {
            walk_ref(v, (&n.cond).into());
            walk_ref(v, (&n.body).into());
        }
        NodeRef::AssignStmt(n) => {
            walk_ref(v, (&n.lhs).into());
            walk_ref(v, (&n.rhs).into());
        }
        NodeRef::SelectStmt(n) => {
            walk_ref(v, (&n.var).into());
            walk_list(v, &n.cases);
            if let Some(else_case) = &n.else_case {
                walk_ref(v, else_case.into());
            }
        }
        NodeRef::CaseStmt(n) => {
            if let Some(cond) = &n.cond {
                walk_ref(v, cond.into());
            }
            walk_ref(v, (&n.body).into());
        }
        NodeRef::IfStmt(n) => {
            walk_ref(v, (&n.cond).into());
            walk_ref(v, (&n.body).into());
            walk_list(v, &n.else_ifs);
            if let Some(else_body) = &n.else_body {
                walk_ref(v, else_body.into());
            }
        }
        NodeRef::BlockStmt(n) => walk_list(v, &n.list),
        NodeRef::CallStmt(n) => {
            walk_ref(v, (&n.name).into());
            walk_list(v, &n.args);
        }
        NodeRef::ForNextStmt(n) => {
            walk_ref(v, (&n.start).into());
            walk_ref(v, (&n.limit).into());
            if let Some(step) = &n.step {
                walk_ref(v, step.into());
            }
            walk_ref(v, (&n.body).into());
        }
        NodeRef::ForEachStmt(n) => {
            walk_ref(v, (&n.elem).into());
            walk_ref(v, (&n.group).into());
            walk_ref(v, (&n.body).into());
            if let Some(stmt) = &n.stmt {
                walk_ref(v, stmt.into());
            }
        }
        NodeRef::WhileWendStmt(n) => {
            walk_ref(v, (&n.cond).into());
            walk_ref(v, (&n.body).into());
        }
        NodeRef::DoLoopStmt(n) => {
            if let Some(cond) = &n.cond {
                walk_ref(v, cond.into());
            }
            walk_ref(v, (&n.body).into());
        }
        NodeRef::MemberStmt(n) => walk_ref(v, (&n.name).into()),
        NodeRef::ExprStmt(n) => {
            if let Some(doc) = &n.doc {
                walk_ref(v, doc.into());
            }
            walk_ref(v, (&n.x).into());
        }

        // Expressions
        NodeRef::IndexExpr(n) => {
            walk_ref(v, (&n.x).into());
            walk_ref(v, (&n.index).into());
        }
        NodeRef::IndexListExpr(n) => {
            walk_ref(v, (&n.x).into());
            walk_list(v, &n.indices);
        }
        NodeRef::NewExpr(n) => walk_ref(v, (&n.x).into()),
        NodeRef::CallExpr(n) => {
            walk_ref(v, (&n.func).into());
            walk_list(v, &n.args);
        }
        NodeRef::SelectorExpr(n) => {
            walk_ref(v, (&n.x).into());
            walk_ref(v, (&n.sel).into());
        }
        NodeRef::BinaryExpr(n) => {
            walk_ref(v, (&n.x).into());
            walk_ref(v, (&n.y).into());
        }

        // Leaves
        NodeRef::Comment(_)
        | NodeRef::OptionStmt(_)
        | NodeRef::RandomizeStmt(_)
        | NodeRef::StopStmt(_)
        | NodeRef::ExitStmt(_)
        | NodeRef::OnErrorStmt(_)
        | NodeRef::BasicLit(_)
        | NodeRef::Ident(_) => {}
    }
}

fn walk_list<'a, V, N>(v: &mut V, list: &'a [N])
where
    V: Visitor + ?Sized,
    &'a N: Into<NodeRef<'a>>,
{
    for node in list {
        walk_ref(v, node.into());
    }
}

fn walk_procedure<V: Visitor + ?Sized>(v: &mut V, name: &Ident, params: &[Field], body: &BlockStmt) {
    walk_ref(v, name.into());
    walk_list(v, params);
    walk_ref(v, body.into());
}

/// Collects every identifier name in traversal order.
///
/// Declaration names, parameter names, member names and selector names are
/// all included.
#[derive(Debug, Default)]
pub struct IdentCollector {
    pub names: Vec<String>,
}

impl Visitor for IdentCollector {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        if let NodeRef::Ident(ident) = node {
            self.names.push(ident.name.clone());
        }
        VisitResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    /// Records a short tag for every node it sees.
    #[derive(Default)]
    struct Trace {
        seen: Vec<&'static str>,
        skip_blocks: bool,
    }

    impl Visitor for Trace {
        fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
            let tag = match node {
                NodeRef::File(_) => "file",
                NodeRef::ClassDecl(_) => "class",
                NodeRef::DimDecl(_) => "dim",
                NodeRef::MemberStmt(_) => "member",
                NodeRef::IfStmt(_) => "if",
                NodeRef::BlockStmt(_) => "block",
                NodeRef::ExprStmt(_) => "expr",
                NodeRef::Ident(_) => "ident",
                NodeRef::BinaryExpr(_) => "binary",
                NodeRef::BasicLit(_) => "lit",
                _ => "other",
            };
            self.seen.push(tag);
            if self.skip_blocks && matches!(node, NodeRef::BlockStmt(_)) {
                VisitResult::SkipChildren
            } else {
                VisitResult::Continue
            }
        }
    }

    fn sample_if() -> IfStmt {
        IfStmt::new(
            BinaryExpr::new(Ident::new("x"), Token::Equal, BasicLit::integer(1)),
            BlockStmt::new(vec![ExprStmt::new(Ident::new("Go")).into()]),
        )
    }

    #[test]
    fn test_walk_pre_order() {
        let mut trace = Trace::default();
        walk(&mut trace, &sample_if());
        assert_eq!(
            trace.seen,
            ["if", "binary", "ident", "lit", "block", "expr", "ident"]
        );
    }

    #[test]
    fn test_skip_children() {
        let mut trace = Trace {
            skip_blocks: true,
            ..Trace::default()
        };
        walk(&mut trace, &sample_if());
        assert_eq!(trace.seen, ["if", "binary", "ident", "lit", "block"]);
    }

    #[test]
    fn test_class_visits_decls_before_stmts() {
        let class = ClassDecl::new(
            "RGB",
            vec![DimDecl::new(vec![Ident::new("a").into()]).into()],
            vec![MemberStmt {
                modifier: Modifier::PRIVATE,
                mod_pos: Pos::NONE,
                name: Ident::new("m"),
            }
            .into()],
        );
        let file = File::new(vec![class.into()], vec![]);

        let mut trace = Trace::default();
        walk(&mut trace, &file);
        assert_eq!(
            trace.seen,
            ["file", "class", "ident", "dim", "ident", "member", "ident"]
        );
    }

    #[test]
    fn test_ident_collector_reaches_every_name() {
        let func = FuncDecl::new(
            "Area",
            vec![Field::with_mode(Token::ByVal, "w"), Field::new("h")],
            BlockStmt::new(vec![AssignStmt::new(
                Ident::new("Area"),
                BinaryExpr::new(Ident::new("w"), Token::Star, Ident::new("h")),
            )
            .into()]),
        );
        let select = SelectStmt {
            select_pos: Pos::NONE,
            var: SelectorExpr::new(Ident::new("Err"), "Number").into(),
            cases: vec![CaseStmt::new(
                BasicLit::integer(6),
                BlockStmt::new(vec![CallStmt {
                    call_pos: Pos::NONE,
                    name: Ident::new("Report"),
                    args: vec![NewExpr::new(Ident::new("Logger")).into()],
                }
                .into()]),
            )],
            else_case: None,
            end_select_pos: Pos::NONE,
        };
        let file = File::new(vec![func.into()], vec![select.into()]);

        let mut names = IdentCollector::default();
        walk(&mut names, &file);
        assert_eq!(
            names.names,
            ["Area", "w", "h", "Area", "w", "h", "Err", "Number", "Report", "Logger"]
        );
    }

    #[test]
    fn test_node_ref_positions() {
        let ident = Ident {
            name_pos: Pos::new(3),
            name: "abc".to_string(),
        };
        let node = NodeRef::from(&ident);
        assert_eq!(node.pos(), Pos::new(3));
        assert_eq!(node.end(), Pos::new(6));
        assert_eq!(node.kind(), "Ident");

        let stmt: Stmt = StopStmt::default().into();
        assert_eq!(NodeRef::from(&stmt).kind(), "StopStmt");
    }
}
