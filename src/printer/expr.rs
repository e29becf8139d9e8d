//! Expression rendering.
//!
//! Expressions render independently of indentation, so these are plain
//! recursive functions over the closed [`Expr`] set rather than printer
//! methods.

use crate::ast::{
    BasicLit, BinaryExpr, CallExpr, Expr, Field, IndexExpr, IndexListExpr, NewExpr, SelectorExpr,
};
use crate::token::Token;

/// Renders an expression as source text.
///
/// # Example
///
/// ```
/// use vbsast::ast::{BasicLit, CallExpr, Ident};
/// use vbsast::printer::expr_str;
///
/// let call = CallExpr::new(Ident::new("MsgBox"), vec![BasicLit::string("hi").into()]);
/// assert_eq!(expr_str(&call.into()), r#"MsgBox("hi")"#);
/// ```
pub fn expr_str(expr: &Expr) -> String {
    match expr {
        Expr::Ident(e) => e.name.clone(),
        Expr::BasicLit(e) => lit_str(e),
        Expr::Selector(e) => selector_str(e),
        Expr::Binary(e) => binary_str(e),
        Expr::Call(e) => call_str(e),
        Expr::Index(e) => index_str(e),
        Expr::IndexList(e) => index_list_str(e),
        Expr::New(e) => new_str(e),
    }
}

pub(super) fn selector_str(e: &SelectorExpr) -> String {
    format!("{}.{}", expr_str(&e.x), e.sel.name)
}

pub(super) fn binary_str(e: &BinaryExpr) -> String {
    format!("{} {} {}", expr_str(&e.x), e.op, expr_str(&e.y))
}

pub(super) fn call_str(e: &CallExpr) -> String {
    format!("{}({})", expr_str(&e.func), expr_list_str(&e.args))
}

pub(super) fn index_str(e: &IndexExpr) -> String {
    format!("{}({})", expr_str(&e.x), expr_str(&e.index))
}

pub(super) fn index_list_str(e: &IndexListExpr) -> String {
    format!("{}({})", expr_str(&e.x), expr_list_str(&e.indices))
}

pub(super) fn new_str(e: &NewExpr) -> String {
    format!("New {}", expr_str(&e.x))
}

/// Renders a comma-separated expression list: `a, b, c`.
pub fn expr_list_str(list: &[Expr]) -> String {
    list.iter().map(expr_str).collect::<Vec<_>>().join(", ")
}

/// Renders a literal. String literals are quoted, with embedded quotes
/// doubled; every other kind is written as its raw text.
pub(super) fn lit_str(lit: &BasicLit) -> String {
    if lit.kind == Token::String {
        format!("\"{}\"", lit.value.replace('"', "\"\""))
    } else {
        lit.value.clone()
    }
}

/// Renders a parameter list without the surrounding parentheses.
pub(super) fn params_str(params: &[Field]) -> String {
    params
        .iter()
        .map(|field| match field.tok {
            Some(mode) => format!("{} {}", mode, field.name.name),
            None => field.name.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ident;

    fn num(n: i64) -> Expr {
        BasicLit::integer(n).into()
    }

    #[test]
    fn test_ident_and_literals() {
        assert_eq!(expr_str(&Ident::new("MyVar").into()), "MyVar");
        assert_eq!(expr_str(&num(42)), "42");
        assert_eq!(expr_str(&BasicLit::new(Token::Boolean, "True").into()), "True");
        assert_eq!(expr_str(&BasicLit::string("Color").into()), "\"Color\"");
        assert_eq!(expr_str(&BasicLit::string("").into()), "\"\"");
    }

    #[test]
    fn test_string_literal_doubles_quotes() {
        let lit = BasicLit::string(r#"say "hi""#);
        assert_eq!(expr_str(&lit.into()), r#""say ""hi""""#);
    }

    #[test]
    fn test_selector_and_new() {
        let sel = SelectorExpr::new(Ident::new("Err"), "Description");
        assert_eq!(expr_str(&sel.into()), "Err.Description");

        let new = NewExpr::new(SelectorExpr::new(Ident::new("Scripting"), "Dictionary"));
        assert_eq!(expr_str(&new.into()), "New Scripting.Dictionary");
    }

    #[test]
    fn test_nested_binary() {
        // "Error # " & CStr(Err.Number) & " " & Err.Description
        let expr = BinaryExpr::new(
            BasicLit::string("Error # "),
            Token::Ampersand,
            BinaryExpr::new(
                CallExpr::new(
                    Ident::new("CStr"),
                    vec![SelectorExpr::new(Ident::new("Err"), "Number").into()],
                ),
                Token::Ampersand,
                BinaryExpr::new(
                    BasicLit::string(" "),
                    Token::Ampersand,
                    SelectorExpr::new(Ident::new("Err"), "Description"),
                ),
            ),
        );
        assert_eq!(
            expr_str(&expr.into()),
            r#""Error # " & CStr(Err.Number) & " " & Err.Description"#
        );
    }

    #[test]
    fn test_word_operators_keep_spelling() {
        let expr = BinaryExpr::new(Ident::new("a"), Token::Mod, num(3));
        assert_eq!(expr_str(&expr.into()), "a Mod 3");
    }

    #[test]
    fn test_index_forms_share_shape() {
        let single = IndexExpr::new(Ident::new("Names"), num(9));
        assert_eq!(expr_str(&single.into()), "Names(9)");

        let multi = IndexListExpr::new(Ident::new("Names"), vec![num(10), num(10), num(10)]);
        assert_eq!(expr_str(&multi.into()), "Names(10, 10, 10)");

        let ordered = IndexListExpr::new(Ident::new("X"), vec![num(1), num(2), num(3)]);
        assert_eq!(expr_str(&ordered.into()), "X(1, 2, 3)");
    }

    #[test]
    fn test_call_without_args() {
        let call = CallExpr::new(Ident::new("color"), vec![]);
        assert_eq!(expr_str(&call.into()), "color()");
    }

    #[test]
    fn test_params() {
        let params = vec![
            Field::with_mode(Token::ByVal, "a"),
            Field::new("b"),
            Field::with_mode(Token::ByRef, "c"),
        ];
        assert_eq!(params_str(&params), "ByVal a, b, ByRef c");
        assert_eq!(params_str(&[]), "");
    }
}
