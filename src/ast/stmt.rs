//! Statement AST nodes.
//!
//! Statements are constructs that perform actions but don't produce values.
//!
//! # Statement Categories
//!
//! - **Directives**: Option Explicit, Randomize, Stop
//! - **Assignment**: `x = 1`, `Set x = obj`, `Const x = 1`
//! - **Control flow**: If/ElseIf/Else, Select Case, Exit
//! - **Loops**: For/Next, For Each/Next, While/Wend, Do/Loop
//! - **Error handling**: On Error Resume Next, On Error GoTo 0
//! - **Calls**: `Call Name args`, bare expression statements
//! - **Blocks**: With, and the plain statement list every body is made of

use serde::{Deserialize, Serialize};

use super::{CommentGroup, Expr, Ident, Modifier, Node, StmtNode};
use crate::token::{Pos, Token};

node_enum! {
    /// Any statement.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub enum Stmt: StmtNode {
        /// `Option Explicit`
        Option(OptionStmt),
        /// `Randomize`
        Randomize(RandomizeStmt),
        /// `With expr ... End With`
        With(WithStmt),
        /// `[Set|Const] lhs = rhs`
        Assign(AssignStmt),
        /// `Stop`
        Stop(StopStmt),
        /// `Select Case expr ... End Select`
        Select(SelectStmt),
        /// A single `Case` clause.
        Case(CaseStmt),
        /// `If cond Then ... End If`
        If(IfStmt),
        /// A plain statement list.
        Block(BlockStmt),
        /// `Call Name args`
        Call(CallStmt),
        /// `Exit [Do|For|Function|Property|Sub]`
        Exit(ExitStmt),
        /// `For start To limit [Step step] ... Next`
        ForNext(ForNextStmt),
        /// `For Each elem In group ... Next`
        ForEach(ForEachStmt),
        /// `While cond ... Wend`
        WhileWend(WhileWendStmt),
        /// `Do [While|Until cond] ... Loop [While|Until cond]`
        DoLoop(DoLoopStmt),
        /// `On Error Resume Next` / `On Error GoTo 0`
        OnError(OnErrorStmt),
        /// `[Public|Private] name` inside a class.
        Member(MemberStmt),
        /// An expression used as a statement.
        Expr(ExprStmt),
    }
}

impl Stmt {
    /// Returns true when the statement prints as exactly one line, which is
    /// what may follow `Next` in a `For Each` loop.
    pub fn is_single_line(&self) -> bool {
        match self {
            Stmt::Option(_)
            | Stmt::Randomize(_)
            | Stmt::Assign(_)
            | Stmt::Stop(_)
            | Stmt::Call(_)
            | Stmt::Exit(_)
            | Stmt::Member(_) => true,
            Stmt::Expr(s) => s.doc.as_ref().map_or(true, |doc| doc.list.len() <= 1),
            Stmt::OnError(s) => s.goto.is_some() != s.resume.is_some(),
            Stmt::With(_)
            | Stmt::Select(_)
            | Stmt::Case(_)
            | Stmt::If(_)
            | Stmt::Block(_)
            | Stmt::ForNext(_)
            | Stmt::ForEach(_)
            | Stmt::WhileWend(_)
            | Stmt::DoLoop(_) => false,
        }
    }
}

/// Length of a fixed keyword as written in source.
fn kw_len(tok: Token) -> usize {
    tok.as_str().len()
}

/// `Option Explicit`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionStmt {
    #[serde(default)]
    pub option_pos: Pos,
    #[serde(default)]
    pub explicit_pos: Pos,
}

impl Node for OptionStmt {
    fn pos(&self) -> Pos {
        self.option_pos
    }

    fn end(&self) -> Pos {
        self.explicit_pos.advance(kw_len(Token::Explicit))
    }
}

/// `Randomize`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RandomizeStmt {
    #[serde(default)]
    pub randomize_pos: Pos,
}

impl Node for RandomizeStmt {
    fn pos(&self) -> Pos {
        self.randomize_pos
    }

    fn end(&self) -> Pos {
        self.randomize_pos.advance(kw_len(Token::Randomize))
    }
}

/// `With expr ... End With`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithStmt {
    #[serde(default)]
    pub with_pos: Pos,
    pub cond: Expr,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub end_with_pos: Pos,
}

impl Node for WithStmt {
    fn pos(&self) -> Pos {
        self.with_pos
    }

    fn end(&self) -> Pos {
        self.end_with_pos.advance("End With".len())
    }
}

/// An assignment.
///
/// `tok` distinguishes `x = 1` (None), `Set x = obj` ([`Token::Set`]) and
/// `Const x = 1` ([`Token::Const`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    #[serde(default)]
    pub tok: Option<Token>,
    #[serde(default)]
    pub tok_pos: Pos,
    pub lhs: Expr,
    #[serde(default)]
    pub assign_pos: Pos,
    pub rhs: Expr,
}

impl AssignStmt {
    /// Creates a plain `lhs = rhs` assignment.
    pub fn new(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            tok: None,
            tok_pos: Pos::NONE,
            lhs: lhs.into(),
            assign_pos: Pos::NONE,
            rhs: rhs.into(),
        }
    }

    /// Creates a `Set lhs = rhs` object assignment.
    pub fn set(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            tok: Some(Token::Set),
            ..Self::new(lhs, rhs)
        }
    }

    /// Creates a `Const lhs = rhs` declaration.
    pub fn constant(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            tok: Some(Token::Const),
            ..Self::new(lhs, rhs)
        }
    }
}

impl Node for AssignStmt {
    fn pos(&self) -> Pos {
        if self.tok_pos.is_valid() {
            self.tok_pos
        } else {
            self.lhs.pos()
        }
    }

    fn end(&self) -> Pos {
        self.rhs.end()
    }
}

/// `Stop`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StopStmt {
    #[serde(default)]
    pub stop_pos: Pos,
}

impl Node for StopStmt {
    fn pos(&self) -> Pos {
        self.stop_pos
    }

    fn end(&self) -> Pos {
        self.stop_pos.advance(kw_len(Token::Stop))
    }
}

/// `Select Case var ... End Select`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    #[serde(default)]
    pub select_pos: Pos,
    pub var: Expr,
    #[serde(default)]
    pub cases: Vec<CaseStmt>,
    /// The `Case Else` clause; its `cond` is ignored.
    #[serde(default)]
    pub else_case: Option<CaseStmt>,
    #[serde(default)]
    pub end_select_pos: Pos,
}

impl Node for SelectStmt {
    fn pos(&self) -> Pos {
        self.select_pos
    }

    fn end(&self) -> Pos {
        self.end_select_pos.advance("End Select".len())
    }
}

/// One `Case cond` clause with its body.
///
/// `cond` is required for every clause in [`SelectStmt::cases`] and absent
/// for the `Case Else` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStmt {
    #[serde(default)]
    pub case_pos: Pos,
    #[serde(default)]
    pub cond: Option<Expr>,
    #[serde(default)]
    pub body: BlockStmt,
}

impl CaseStmt {
    /// Creates a `Case cond` clause.
    pub fn new(cond: impl Into<Expr>, body: BlockStmt) -> Self {
        Self {
            case_pos: Pos::NONE,
            cond: Some(cond.into()),
            body,
        }
    }

    /// Creates a `Case Else` clause.
    pub fn default_case(body: BlockStmt) -> Self {
        Self {
            case_pos: Pos::NONE,
            cond: None,
            body,
        }
    }
}

impl Node for CaseStmt {
    fn pos(&self) -> Pos {
        self.case_pos
    }

    fn end(&self) -> Pos {
        let body_end = self.body.end();
        if body_end.is_valid() {
            return body_end;
        }
        match &self.cond {
            Some(cond) => cond.end(),
            None => self.case_pos.advance(kw_len(Token::Case)),
        }
    }
}

/// `If cond Then ... [ElseIf cond Then ...]* [Else ...] End If`
///
/// `ElseIf` clauses reuse this type; only their `if_pos`, `cond`, `then_pos`
/// and `body` are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    #[serde(default)]
    pub if_pos: Pos,
    pub cond: Expr,
    #[serde(default)]
    pub then_pos: Pos,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub else_ifs: Vec<IfStmt>,
    #[serde(default)]
    pub else_body: Option<BlockStmt>,
    #[serde(default)]
    pub end_if_pos: Pos,
}

impl IfStmt {
    /// Creates an `If` with a body and no other branches.
    pub fn new(cond: impl Into<Expr>, body: BlockStmt) -> Self {
        Self {
            if_pos: Pos::NONE,
            cond: cond.into(),
            then_pos: Pos::NONE,
            body,
            else_ifs: Vec::new(),
            else_body: None,
            end_if_pos: Pos::NONE,
        }
    }
}

impl Node for IfStmt {
    fn pos(&self) -> Pos {
        self.if_pos
    }

    fn end(&self) -> Pos {
        self.end_if_pos.advance("End If".len())
    }
}

/// An ordered statement list.
///
/// An empty block is a valid node whose position is [`Pos::NONE`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockStmt {
    #[serde(default)]
    pub list: Vec<Stmt>,
}

impl BlockStmt {
    pub fn new(list: Vec<Stmt>) -> Self {
        Self { list }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Node for BlockStmt {
    fn pos(&self) -> Pos {
        self.list.first().map_or(Pos::NONE, Node::pos)
    }

    fn end(&self) -> Pos {
        self.list.last().map_or(Pos::NONE, Node::end)
    }
}

/// `Call Name arg1, arg2`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallStmt {
    #[serde(default)]
    pub call_pos: Pos,
    pub name: Ident,
    #[serde(default)]
    pub args: Vec<Expr>,
}

impl Node for CallStmt {
    fn pos(&self) -> Pos {
        self.call_pos
    }

    fn end(&self) -> Pos {
        match self.args.last() {
            Some(arg) => arg.end(),
            None => self.name.end(),
        }
    }
}

/// `Exit` or `Exit <construct>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExitStmt {
    #[serde(default)]
    pub exit_pos: Pos,
    /// [`Token::Do`], [`Token::For`], [`Token::Function`],
    /// [`Token::Property`] or [`Token::Sub`].
    #[serde(default)]
    pub x: Option<Token>,
}

impl Node for ExitStmt {
    fn pos(&self) -> Pos {
        self.exit_pos
    }

    fn end(&self) -> Pos {
        let target = self.x.map_or(0, |tok| kw_len(tok) + 1);
        self.exit_pos.advance(kw_len(Token::Exit) + target)
    }
}

/// `For start To limit [Step step] ... Next`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForNextStmt {
    #[serde(default)]
    pub for_pos: Pos,
    /// Usually the `i = 1` part, written as a binary `=` expression.
    pub start: Expr,
    #[serde(default)]
    pub to_pos: Pos,
    pub limit: Expr,
    #[serde(default)]
    pub step_pos: Pos,
    #[serde(default)]
    pub step: Option<Expr>,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub next_pos: Pos,
}

impl Node for ForNextStmt {
    fn pos(&self) -> Pos {
        self.for_pos
    }

    fn end(&self) -> Pos {
        self.next_pos.advance(kw_len(Token::Next))
    }
}

/// `For Each elem In group ... Next`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEachStmt {
    #[serde(default)]
    pub for_pos: Pos,
    #[serde(default)]
    pub each_pos: Pos,
    pub elem: Expr,
    #[serde(default)]
    pub in_pos: Pos,
    pub group: Expr,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub next_pos: Pos,
    /// A statement written on the same line after `Next`.
    #[serde(default)]
    pub stmt: Option<Stmt>,
}

impl Node for ForEachStmt {
    fn pos(&self) -> Pos {
        self.for_pos
    }

    fn end(&self) -> Pos {
        match &self.stmt {
            Some(stmt) => stmt.end(),
            None => self.next_pos.advance(kw_len(Token::Next)),
        }
    }
}

/// `While cond ... Wend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileWendStmt {
    #[serde(default)]
    pub while_pos: Pos,
    pub cond: Expr,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub wend_pos: Pos,
}

impl Node for WhileWendStmt {
    fn pos(&self) -> Pos {
        self.while_pos
    }

    fn end(&self) -> Pos {
        self.wend_pos.advance(kw_len(Token::Wend))
    }
}

/// `Do ... Loop` in its pre-test or post-test form.
///
/// With `pre` set the condition follows `Do`, otherwise it follows `Loop`.
/// A loop without `cond` runs until an `Exit Do`; `tok` is ignored then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoLoopStmt {
    #[serde(default)]
    pub do_pos: Pos,
    pub pre: bool,
    /// [`Token::While`] or [`Token::Until`].
    pub tok: Token,
    #[serde(default)]
    pub tok_pos: Pos,
    #[serde(default)]
    pub cond: Option<Expr>,
    #[serde(default)]
    pub body: BlockStmt,
    #[serde(default)]
    pub loop_pos: Pos,
}

impl Node for DoLoopStmt {
    fn pos(&self) -> Pos {
        self.do_pos
    }

    fn end(&self) -> Pos {
        match &self.cond {
            Some(cond) if !self.pre => cond.end(),
            _ => self.loop_pos.advance(kw_len(Token::Loop)),
        }
    }
}

/// `On Error ...`
///
/// The resume and goto clauses are independent attachments; each present
/// clause prints its own line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnErrorStmt {
    #[serde(default)]
    pub on_pos: Pos,
    #[serde(default)]
    pub error_pos: Pos,
    #[serde(default)]
    pub resume: Option<OnErrorResume>,
    #[serde(default)]
    pub goto: Option<OnErrorGoto>,
}

/// The `Resume Next` clause of an `On Error` statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnErrorResume {
    #[serde(default)]
    pub resume_pos: Pos,
    #[serde(default)]
    pub next_pos: Pos,
}

/// The `GoTo 0` clause of an `On Error` statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnErrorGoto {
    #[serde(default)]
    pub goto_pos: Pos,
    #[serde(default)]
    pub zero_pos: Pos,
}

impl Node for OnErrorStmt {
    fn pos(&self) -> Pos {
        if self.on_pos.is_valid() {
            self.on_pos
        } else {
            self.error_pos
        }
    }

    fn end(&self) -> Pos {
        if let Some(goto) = &self.goto {
            return goto.zero_pos.advance(1);
        }
        if let Some(resume) = &self.resume {
            return resume.next_pos.advance(kw_len(Token::Next));
        }
        Pos::NONE
    }
}

/// A bare class field: `Private m_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStmt {
    #[serde(default)]
    pub modifier: Modifier,
    #[serde(default)]
    pub mod_pos: Pos,
    pub name: Ident,
}

impl Node for MemberStmt {
    fn pos(&self) -> Pos {
        if self.modifier.is_none() {
            self.name.pos()
        } else {
            self.mod_pos
        }
    }

    fn end(&self) -> Pos {
        self.name.end()
    }
}

/// A stand-alone expression in a statement list, with optional comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    #[serde(default)]
    pub doc: Option<CommentGroup>,
    pub x: Expr,
}

impl ExprStmt {
    pub fn new(x: impl Into<Expr>) -> Self {
        Self {
            doc: None,
            x: x.into(),
        }
    }
}

impl Node for ExprStmt {
    fn pos(&self) -> Pos {
        self.x.pos()
    }

    fn end(&self) -> Pos {
        self.x.end()
    }
}
