//! Source printer for VBScript syntax trees.
//!
//! The printer is a [`Visitor`]: [`walk`] hands it the root node, and it
//! renders that node completely, recursing into bodies itself, before telling
//! the walker to skip the children.
//!
//! # Entry Points
//!
//! - [`render`] returns the text as a `String`
//! - [`print`] writes to standard output
//! - [`print_to`] writes incrementally to any `io::Write`
//! - [`Printer`] can be driven directly over any `fmt::Write` sink
//!
//! # Layout
//!
//! Every statement ends with its own newline. Each block body is indented by
//! one two-space unit relative to its owner; `Case` clauses sit one unit
//! inside `Select Case` with their bodies one unit further. Top-level
//! declarations are printed before top-level statements.
//!
//! # Example
//!
//! ```
//! use vbsast::ast::{AssignStmt, CallExpr, DimDecl, File, Ident};
//! use vbsast::printer::render;
//!
//! let file = File::new(
//!     vec![DimDecl::new(vec![Ident::new("A").into()]).into()],
//!     vec![AssignStmt::new(
//!         Ident::new("A"),
//!         CallExpr::new(Ident::new("Array"), vec![Ident::new("10").into()]),
//!     )
//!     .into()],
//! );
//!
//! assert_eq!(render(&file), "Dim A\nA = Array(10)\n");
//! ```

mod error;
mod expr;

pub use error::PrintError;
pub use expr::{expr_list_str, expr_str};

use std::fmt;
use std::io;

use crate::ast::*;
use crate::token::Token;

use self::expr::{
    binary_str, call_str, index_list_str, index_str, lit_str, new_str, params_str, selector_str,
};

/// One level of indentation.
const INDENT: &str = "  ";

/// Renders a node to a string.
pub fn render<'a>(node: impl Into<NodeRef<'a>>) -> String {
    let node = node.into();
    let mut printer = Printer::new(String::new());
    walk(&mut printer, node);
    // Writing into a String cannot fail.
    let out = printer.out;
    log::debug!("rendered {} ({} bytes)", node.kind(), out.len());
    out
}

/// Renders a node to standard output.
pub fn print<'a>(node: impl Into<NodeRef<'a>>) -> Result<(), PrintError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    print_to(node, &mut lock)
}

/// Renders a node into `out` as the tree is traversed.
///
/// Stops writing at the first failed write and reports that error.
pub fn print_to<'a, W>(node: impl Into<NodeRef<'a>>, out: &mut W) -> Result<(), PrintError>
where
    W: io::Write + ?Sized,
{
    let node = node.into();
    let mut printer = Printer::new(IoSink { inner: &mut *out, error: None });
    walk(&mut printer, node);

    let Printer { out: sink, failed, .. } = printer;
    if let Some(err) = sink.error {
        return Err(PrintError::Io(err));
    }
    if failed {
        return Err(PrintError::Fmt(fmt::Error));
    }
    out.flush()?;
    log::debug!("printed {}", node.kind());
    Ok(())
}

/// Adapts an `io::Write` into the `fmt::Write` the printer writes to,
/// keeping the underlying I/O error.
struct IoSink<'w, W: io::Write + ?Sized> {
    inner: &'w mut W,
    error: Option<io::Error>,
}

impl<W: io::Write + ?Sized> fmt::Write for IoSink<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

/// Renders syntax tree nodes as source text into a `fmt::Write` sink.
///
/// Indentation is a depth counter. Every nested body is rendered inside
/// [`Printer::nested`], which restores the caller's depth on return.
///
/// # Panics
///
/// Rendering panics on malformed trees, the same trees
/// [`validate`](crate::ast::validate) rejects: an empty `Dim`/`ReDim` list,
/// a `Case` clause inside `cases` without a condition, an `ElseIf` clause
/// with branches of its own, or a multi-line statement after `For Each ...
/// Next`.
pub struct Printer<W> {
    out: W,
    depth: usize,
    failed: bool,
}

impl<W: fmt::Write> Printer<W> {
    /// Creates a printer writing to `out` at indentation depth zero.
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            failed: false,
        }
    }

    /// Returns the sink, or the error if any write failed.
    pub fn finish(self) -> Result<W, PrintError> {
        if self.failed {
            Err(PrintError::Fmt(fmt::Error))
        } else {
            Ok(self.out)
        }
    }

    /// Renders a node and everything below it.
    pub fn node(&mut self, node: NodeRef<'_>) {
        match node {
            NodeRef::File(n) => self.emit_file(n),
            NodeRef::Comment(n) => self.line(format_args!("{}", comment_str(n))),
            NodeRef::CommentGroup(n) => self.emit_comments(n),
            NodeRef::Field(n) => self.inline(params_str(std::slice::from_ref(n))),

            NodeRef::SubDecl(n) => self.emit_sub(n),
            NodeRef::FuncDecl(n) => self.emit_function(n),
            NodeRef::PropertyDecl(n) => self.emit_property(n),
            NodeRef::ClassDecl(n) => self.emit_class(n),
            NodeRef::DimDecl(n) => self.emit_dim(n),
            NodeRef::ReDimDecl(n) => self.emit_redim(n),

            NodeRef::OptionStmt(_) => self.line(format_args!("Option Explicit")),
            NodeRef::RandomizeStmt(_) => self.line(format_args!("Randomize")),
            NodeRef::StopStmt(_) => self.line(format_args!("Stop")),
            NodeRef::WithStmt(n) => {
                self.line(format_args!("With {}", expr_str(&n.cond)));
                self.body(&n.body);
                self.line(format_args!("End With"));
            }
            NodeRef::AssignStmt(n) => self.emit_assign(n),
            NodeRef::SelectStmt(n) => self.emit_select(n),
            NodeRef::CaseStmt(n) => match n.cond {
                Some(_) => self.emit_case(n),
                None => self.emit_case_else(n),
            },
            NodeRef::IfStmt(n) => self.emit_if(n),
            NodeRef::BlockStmt(n) => self.stmts(&n.list),
            NodeRef::CallStmt(n) => {
                if n.args.is_empty() {
                    self.line(format_args!("Call {}", n.name.name));
                } else {
                    self.line(format_args!("Call {} {}", n.name.name, expr_list_str(&n.args)));
                }
            }
            NodeRef::ExitStmt(n) => match n.x {
                Some(target) => self.line(format_args!("Exit {target}")),
                None => self.line(format_args!("Exit")),
            },
            NodeRef::ForNextStmt(n) => self.emit_for_next(n),
            NodeRef::ForEachStmt(n) => self.emit_for_each(n),
            NodeRef::WhileWendStmt(n) => {
                self.line(format_args!("While {}", expr_str(&n.cond)));
                self.body(&n.body);
                self.line(format_args!("Wend"));
            }
            NodeRef::DoLoopStmt(n) => self.emit_do_loop(n),
            NodeRef::OnErrorStmt(n) => {
                if n.goto.is_some() {
                    self.line(format_args!("On Error GoTo 0"));
                }
                if n.resume.is_some() {
                    self.line(format_args!("On Error Resume Next"));
                }
            }
            NodeRef::MemberStmt(n) => {
                self.line(format_args!("{}{}", visibility(n.modifier), n.name.name));
            }
            NodeRef::ExprStmt(n) => self.emit_expr_stmt(n),

            NodeRef::BasicLit(e) => self.inline(lit_str(e)),
            NodeRef::Ident(e) => self.inline(e.name.clone()),
            NodeRef::IndexExpr(e) => self.inline(index_str(e)),
            NodeRef::IndexListExpr(e) => self.inline(index_list_str(e)),
            NodeRef::NewExpr(e) => self.inline(new_str(e)),
            NodeRef::CallExpr(e) => self.inline(call_str(e)),
            NodeRef::SelectorExpr(e) => self.inline(selector_str(e)),
            NodeRef::BinaryExpr(e) => self.inline(binary_str(e)),
        }
    }

    // ==================== Output primitives ====================

    fn write(&mut self, args: fmt::Arguments<'_>) {
        if !self.failed && self.out.write_fmt(args).is_err() {
            self.failed = true;
        }
    }

    /// Writes text with no indentation or newline.
    fn inline(&mut self, text: String) {
        self.write(format_args!("{text}"));
    }

    /// Writes one indented line.
    fn line(&mut self, args: fmt::Arguments<'_>) {
        let indent = INDENT.repeat(self.depth);
        self.write(format_args!("{indent}{args}\n"));
    }

    /// Runs `f` `levels` indentation units deeper, then restores the depth.
    fn nested(&mut self, levels: usize, f: impl FnOnce(&mut Self)) {
        let saved = self.depth;
        self.depth += levels;
        f(self);
        self.depth = saved;
    }

    fn body(&mut self, block: &BlockStmt) {
        self.nested(1, |p| p.stmts(&block.list));
    }

    fn stmts(&mut self, list: &[Stmt]) {
        for stmt in list {
            self.node(stmt.into());
        }
    }

    fn decls(&mut self, list: &[Decl]) {
        for decl in list {
            self.node(decl.into());
        }
    }

    // ==================== Files and comments ====================

    fn emit_file(&mut self, file: &File) {
        if let Some(doc) = &file.doc {
            self.emit_comments(doc);
        }
        self.decls(&file.decls);
        self.stmts(&file.stmts);
    }

    fn emit_comments(&mut self, group: &CommentGroup) {
        for comment in &group.list {
            self.line(format_args!("{}", comment_str(comment)));
        }
    }

    // ==================== Declarations ====================

    fn emit_dim(&mut self, dim: &DimDecl) {
        assert!(!dim.list.is_empty(), "DimDecl: cannot render an empty variable list");
        let list = expr_list_str(&dim.list);
        match &dim.set {
            Some(set) => self.line(format_args!(
                "Dim {list}: Set {} = {}",
                expr_str(&set.lhs),
                expr_str(&set.rhs)
            )),
            None => self.line(format_args!("Dim {list}")),
        }
    }

    fn emit_redim(&mut self, redim: &ReDimDecl) {
        assert!(!redim.list.is_empty(), "ReDimDecl: cannot render an empty variable list");
        let preserve = if redim.has_preserve() { "Preserve " } else { "" };
        self.line(format_args!("ReDim {preserve}{}", expr_list_str(&redim.list)));
    }

    fn emit_class(&mut self, class: &ClassDecl) {
        self.line(format_args!("{}Class {}", visibility(class.modifier), class.name.name));
        self.nested(1, |p| {
            p.decls(&class.decls);
            p.stmts(&class.stmts);
        });
        self.line(format_args!("End Class"));
    }

    fn emit_sub(&mut self, sub: &SubDecl) {
        let vis = visibility(sub.modifier);
        if sub.params.is_empty() {
            self.line(format_args!("{vis}Sub {}", sub.name.name));
        } else {
            self.line(format_args!("{vis}Sub {}({})", sub.name.name, params_str(&sub.params)));
        }
        self.body(&sub.body);
        self.line(format_args!("End Sub"));
    }

    fn emit_function(&mut self, func: &FuncDecl) {
        self.line(format_args!(
            "{}Function {}({})",
            visibility(func.modifier),
            func.name.name,
            params_str(&func.params)
        ));
        self.body(&func.body);
        self.line(format_args!("End Function"));
    }

    fn emit_property(&mut self, prop: &PropertyDecl) {
        self.line(format_args!(
            "{}Property {} {}({})",
            visibility(prop.modifier),
            prop.tok,
            prop.name.name,
            params_str(&prop.params)
        ));
        self.body(&prop.body);
        self.line(format_args!("End Property"));
    }

    // ==================== Statements ====================

    fn emit_assign(&mut self, assign: &AssignStmt) {
        let keyword = match assign.tok {
            Some(Token::Set) => "Set ",
            Some(Token::Const) => "Const ",
            _ => "",
        };
        self.line(format_args!(
            "{keyword}{} = {}",
            expr_str(&assign.lhs),
            expr_str(&assign.rhs)
        ));
    }

    fn emit_if(&mut self, stmt: &IfStmt) {
        self.line(format_args!("If {} Then", expr_str(&stmt.cond)));
        self.body(&stmt.body);

        for else_if in &stmt.else_ifs {
            assert!(
                else_if.else_ifs.is_empty() && else_if.else_body.is_none(),
                "IfStmt: an ElseIf clause cannot carry its own ElseIf or Else branches"
            );
            self.line(format_args!("ElseIf {} Then", expr_str(&else_if.cond)));
            self.body(&else_if.body);
        }

        if let Some(else_body) = &stmt.else_body {
            self.line(format_args!("Else"));
            self.body(else_body);
        }

        self.line(format_args!("End If"));
    }

    fn emit_select(&mut self, select: &SelectStmt) {
        self.line(format_args!("Select Case {}", expr_str(&select.var)));
        self.nested(1, |p| {
            for case in &select.cases {
                p.emit_case(case);
            }
            if let Some(else_case) = &select.else_case {
                p.emit_case_else(else_case);
            }
        });
        self.line(format_args!("End Select"));
    }

    fn emit_case(&mut self, case: &CaseStmt) {
        let cond = match &case.cond {
            Some(cond) => expr_str(cond),
            None => panic!("CaseStmt: a Case clause requires a condition"),
        };
        self.line(format_args!("Case {cond}"));
        self.body(&case.body);
    }

    fn emit_case_else(&mut self, case: &CaseStmt) {
        self.line(format_args!("Case Else"));
        self.body(&case.body);
    }

    fn emit_for_next(&mut self, stmt: &ForNextStmt) {
        let step = match &stmt.step {
            Some(step) => format!(" Step {}", expr_str(step)),
            None => String::new(),
        };
        self.line(format_args!(
            "For {} To {}{step}",
            expr_str(&stmt.start),
            expr_str(&stmt.limit)
        ));
        self.body(&stmt.body);
        self.line(format_args!("Next"));
    }

    fn emit_for_each(&mut self, stmt: &ForEachStmt) {
        self.line(format_args!(
            "For Each {} In {}",
            expr_str(&stmt.elem),
            expr_str(&stmt.group)
        ));
        self.body(&stmt.body);

        match &stmt.stmt {
            Some(trailing) => {
                assert!(
                    trailing.is_single_line(),
                    "ForEachStmt: the statement after Next must render on one line"
                );
                let indent = INDENT.repeat(self.depth);
                self.write(format_args!("{indent}Next "));
                // The trailing statement shares the `Next` line.
                let saved = self.depth;
                self.depth = 0;
                self.node(trailing.into());
                self.depth = saved;
            }
            None => self.line(format_args!("Next")),
        }
    }

    fn emit_do_loop(&mut self, stmt: &DoLoopStmt) {
        let cond = stmt
            .cond
            .as_ref()
            .map(|cond| format!(" {} {}", stmt.tok, expr_str(cond)));

        match (stmt.pre, cond) {
            (true, Some(cond)) => {
                self.line(format_args!("Do{cond}"));
                self.body(&stmt.body);
                self.line(format_args!("Loop"));
            }
            (false, Some(cond)) => {
                self.line(format_args!("Do"));
                self.body(&stmt.body);
                self.line(format_args!("Loop{cond}"));
            }
            (_, None) => {
                self.line(format_args!("Do"));
                self.body(&stmt.body);
                self.line(format_args!("Loop"));
            }
        }
    }

    fn emit_expr_stmt(&mut self, stmt: &ExprStmt) {
        let text = expr_str(&stmt.x);
        let comments = stmt.doc.as_ref().map_or(&[][..], |doc| &doc.list[..]);

        match comments.split_first() {
            Some((first, rest)) => {
                let sep = if first.tok == Token::Rem { " : " } else { " " };
                self.line(format_args!("{text}{sep}{}", comment_str(first)));
                for comment in rest {
                    self.line(format_args!("{}", comment_str(comment)));
                }
            }
            None => self.line(format_args!("{text}")),
        }
    }
}

impl<W: fmt::Write> Visitor for Printer<W> {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        self.node(node);
        VisitResult::SkipChildren
    }
}

/// The leading visibility keyword of a declaration or member, if any.
fn visibility(modifier: Modifier) -> &'static str {
    if modifier.has_public() {
        "Public "
    } else if modifier.has_private() {
        "Private "
    } else {
        ""
    }
}

fn comment_str(comment: &Comment) -> String {
    match comment.tok {
        Token::Rem => format!("Rem {}", comment.text),
        _ => format!("' {}", comment.text),
    }
}
