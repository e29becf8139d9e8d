//! Structural checks for trees built outside this crate.
//!
//! The printer and `Node::end` panic on trees that cannot be rendered. Trees
//! decoded from user input should pass through [`validate`] first, which
//! reports the same conditions as an error.

use thiserror::Error;

use super::*;

/// A node the printer cannot render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{node}: {reason}")]
pub struct MalformedNode {
    /// Kind of the offending node, e.g. `"DimDecl"`.
    pub node: &'static str,
    pub reason: &'static str,
}

/// Checks every node reachable from `node` and returns the first problem in
/// traversal order.
///
/// # Example
///
/// ```
/// use vbsast::ast::{validate, DimDecl};
///
/// let err = validate(&DimDecl::new(vec![])).unwrap_err();
/// assert_eq!(err.node, "DimDecl");
/// ```
pub fn validate<'a>(node: impl Into<NodeRef<'a>>) -> Result<(), MalformedNode> {
    let mut validator = Validator::default();
    walk(&mut validator, node);
    match validator.problem {
        Some(problem) => Err(problem),
        None => Ok(()),
    }
}

#[derive(Default)]
struct Validator {
    problem: Option<MalformedNode>,
}

impl Validator {
    fn check(&self, node: NodeRef<'_>) -> Option<&'static str> {
        match node {
            NodeRef::DimDecl(n) if n.list.is_empty() => Some("variable list is empty"),
            NodeRef::ReDimDecl(n) if n.list.is_empty() => Some("variable list is empty"),
            NodeRef::CommentGroup(n) if n.list.is_empty() => Some("comment group is empty"),
            NodeRef::SelectStmt(n) if n.cases.iter().any(|c| c.cond.is_none()) => {
                Some("a Case clause has no condition")
            }
            NodeRef::IfStmt(n)
                if n
                    .else_ifs
                    .iter()
                    .any(|e| !e.else_ifs.is_empty() || e.else_body.is_some()) =>
            {
                Some("an ElseIf clause has its own ElseIf or Else branches")
            }
            NodeRef::ForEachStmt(n) if n.stmt.as_ref().is_some_and(|s| !s.is_single_line()) => {
                Some("the statement after Next does not fit on one line")
            }
            _ => None,
        }
    }
}

impl Visitor for Validator {
    fn visit(&mut self, node: NodeRef<'_>) -> VisitResult {
        if self.problem.is_some() {
            return VisitResult::SkipChildren;
        }
        if let Some(reason) = self.check(node) {
            log::debug!("rejecting {}: {}", node.kind(), reason);
            self.problem = Some(MalformedNode {
                node: node.kind(),
                reason,
            });
            return VisitResult::SkipChildren;
        }
        VisitResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msgbox() -> Stmt {
        ExprStmt::new(CallExpr::new(Ident::new("MsgBox"), vec![])).into()
    }

    #[test]
    fn test_well_formed_tree_passes() {
        let mut dim = DimDecl::new(vec![Ident::new("a").into()]);
        dim.set = Some(AssignStmt::set(Ident::new("a"), Ident::new("b")));
        let file = File::new(vec![dim.into()], vec![msgbox()]);
        assert_eq!(validate(&file), Ok(()));
    }

    #[test]
    fn test_empty_lists_rejected() {
        let err = validate(&ReDimDecl::new(true, vec![])).unwrap_err();
        assert_eq!(err.node, "ReDimDecl");

        let mut stmt = ExprStmt::new(Ident::new("x"));
        stmt.doc = Some(CommentGroup::default());
        let file = File::new(vec![], vec![stmt.into()]);
        let err = validate(&file).unwrap_err();
        assert_eq!(err.node, "CommentGroup");
    }

    #[test]
    fn test_case_without_condition_rejected() {
        let select = SelectStmt {
            select_pos: Pos::NONE,
            var: Ident::new("x").into(),
            cases: vec![CaseStmt::default_case(BlockStmt::default())],
            else_case: Some(CaseStmt::default_case(BlockStmt::default())),
            end_select_pos: Pos::NONE,
        };
        let err = validate(&select).unwrap_err();
        assert_eq!(err.node, "SelectStmt");
        assert!(err.to_string().contains("no condition"));
    }

    #[test]
    fn test_nested_else_if_rejected() {
        let mut else_if = IfStmt::new(Ident::new("b"), BlockStmt::default());
        else_if.else_body = Some(BlockStmt::default());
        let mut stmt = IfStmt::new(Ident::new("a"), BlockStmt::default());
        stmt.else_ifs.push(else_if);

        let err = validate(&stmt).unwrap_err();
        assert_eq!(err.node, "IfStmt");
    }

    #[test]
    fn test_multi_line_next_statement_rejected() {
        let each = ForEachStmt {
            for_pos: Pos::NONE,
            each_pos: Pos::NONE,
            elem: Ident::new("item").into(),
            in_pos: Pos::NONE,
            group: Ident::new("items").into(),
            body: BlockStmt::default(),
            next_pos: Pos::NONE,
            stmt: Some(OnErrorStmt::default().into()),
        };
        let err = validate(&each).unwrap_err();
        assert_eq!(err.node, "ForEachStmt");
    }

    #[test]
    fn test_first_problem_wins() {
        let file = File::new(
            vec![
                DimDecl::new(vec![]).into(),
                ReDimDecl::new(false, vec![]).into(),
            ],
            vec![],
        );
        assert_eq!(validate(&file).unwrap_err().node, "DimDecl");
    }
}
