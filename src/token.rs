//! Source positions and lexical tokens shared with the (external) lexer and parser.
//!
//! Neither type carries any behavior beyond what the syntax tree and the
//! printer need:
//!
//! - [`Pos`] locates a point in source text, with two reserved values for
//!   "no position" and "fabricated by a tool".
//! - [`Token`] is the closed set of lexical symbols that appear inside tree
//!   nodes as discriminants (which operator, which literal kind, which
//!   assignment keyword) and that the printer spells verbatim.
//!
//! ## Design Notes
//!
//! VBScript keywords are case-insensitive, but the printer always emits the
//! canonical mixed-case spelling returned by [`Token::as_str`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text.
///
/// Real positions are one-based byte offsets, so the zero value is free to act
/// as [`Pos::NONE`]. Positions are totally ordered; `NONE` sorts below every
/// real position and [`Pos::SYNTHETIC`] sorts below `NONE`.
///
/// # Example
///
/// ```
/// use vbsast::token::Pos;
///
/// let p = Pos::new(0);
/// assert!(p.is_valid());
/// assert!(Pos::NONE < p);
/// assert_eq!(p.advance(3).offset(), Some(3));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pos(i64);

impl Pos {
    /// No position information.
    pub const NONE: Pos = Pos(0);

    /// Marks a node or clause fabricated by a tool rather than parsed from
    /// source. It is valid (so it signals that an optional clause is present)
    /// but carries no location.
    pub const SYNTHETIC: Pos = Pos(-1);

    /// Creates a position from a zero-based byte offset.
    pub fn new(offset: usize) -> Self {
        Pos(offset as i64 + 1)
    }

    /// Reports whether the position is anything other than [`Pos::NONE`].
    pub fn is_valid(self) -> bool {
        self != Pos::NONE
    }

    /// Reports whether the position points into real source text.
    pub fn is_real(self) -> bool {
        self.0 > 0
    }

    /// Returns the zero-based byte offset for a real position.
    pub fn offset(self) -> Option<usize> {
        if self.is_real() {
            Some((self.0 - 1) as usize)
        } else {
            None
        }
    }

    /// Moves a real position forward by `len` bytes.
    ///
    /// `NONE` and `SYNTHETIC` are returned unchanged: a node without a
    /// location has an empty span.
    pub fn advance(self, len: usize) -> Pos {
        if self.is_real() {
            Pos(self.0 + len as i64)
        } else {
            self
        }
    }
}

/// A lexical symbol of the language.
///
/// Tokens are grouped into categories:
/// - Operators (arithmetic, concatenation, comparison, logical)
/// - Comment markers
/// - Constant keywords and literal kinds
/// - Modifier and construct keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    // ==================== Operators ====================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `\` - integer division
    Backslash,
    /// `Mod`
    Mod,
    /// `^`
    Caret,
    /// `Is` - object identity
    Is,
    /// `&` - string concatenation
    Ampersand,
    /// `Not`
    Not,
    /// `And`
    And,
    /// `Or`
    Or,
    /// `Xor`
    Xor,
    /// `Eqv`
    Eqv,
    /// `Imp`
    Imp,
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `:` - statement separator
    Colon,
    /// `,`
    Comma,

    // ==================== Comments ====================
    /// `'`
    Apostrophe,
    /// `Rem`
    Rem,

    // ==================== Constants ====================
    True,
    False,
    Nothing,

    // ==================== Parameter passing ====================
    ByVal,
    ByRef,

    // ==================== Property / assignment kinds ====================
    Get,
    Let,
    Set,
    Const,

    // ==================== Literal kinds ====================
    Empty,
    Null,
    Boolean,
    Byte,
    Integer,
    Currency,
    Long,
    Single,
    Double,
    Date,
    String,
    Object,
    Error,

    // ==================== Keywords ====================
    Dim,
    ReDim,
    Preserve,
    For,
    Each,
    In,
    To,
    Step,
    Next,
    Exit,
    Select,
    Case,
    If,
    Then,
    ElseIf,
    Else,
    With,
    While,
    Wend,
    Do,
    Loop,
    Until,
    End,
    Sub,
    Function,
    Property,
    Class,
    Public,
    Private,
    Call,
    New,
    On,
    GoTo,
    Resume,
    Stop,
    Randomize,
    Option,
    Explicit,
}

impl Token {
    /// Returns the canonical source spelling of the token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Backslash => "\\",
            Token::Mod => "Mod",
            Token::Caret => "^",
            Token::Is => "Is",
            Token::Ampersand => "&",
            Token::Not => "Not",
            Token::And => "And",
            Token::Or => "Or",
            Token::Xor => "Xor",
            Token::Eqv => "Eqv",
            Token::Imp => "Imp",
            Token::Equal => "=",
            Token::NotEqual => "<>",
            Token::Less => "<",
            Token::Greater => ">",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::Colon => ":",
            Token::Comma => ",",
            Token::Apostrophe => "'",
            Token::Rem => "Rem",
            Token::True => "True",
            Token::False => "False",
            Token::Nothing => "Nothing",
            Token::ByVal => "ByVal",
            Token::ByRef => "ByRef",
            Token::Get => "Get",
            Token::Let => "Let",
            Token::Set => "Set",
            Token::Const => "Const",
            Token::Empty => "Empty",
            Token::Null => "Null",
            Token::Boolean => "Boolean",
            Token::Byte => "Byte",
            Token::Integer => "Integer",
            Token::Currency => "Currency",
            Token::Long => "Long",
            Token::Single => "Single",
            Token::Double => "Double",
            Token::Date => "Date",
            Token::String => "String",
            Token::Object => "Object",
            Token::Error => "Error",
            Token::Dim => "Dim",
            Token::ReDim => "ReDim",
            Token::Preserve => "Preserve",
            Token::For => "For",
            Token::Each => "Each",
            Token::In => "In",
            Token::To => "To",
            Token::Step => "Step",
            Token::Next => "Next",
            Token::Exit => "Exit",
            Token::Select => "Select",
            Token::Case => "Case",
            Token::If => "If",
            Token::Then => "Then",
            Token::ElseIf => "ElseIf",
            Token::Else => "Else",
            Token::With => "With",
            Token::While => "While",
            Token::Wend => "Wend",
            Token::Do => "Do",
            Token::Loop => "Loop",
            Token::Until => "Until",
            Token::End => "End",
            Token::Sub => "Sub",
            Token::Function => "Function",
            Token::Property => "Property",
            Token::Class => "Class",
            Token::Public => "Public",
            Token::Private => "Private",
            Token::Call => "Call",
            Token::New => "New",
            Token::On => "On",
            Token::GoTo => "GoTo",
            Token::Resume => "Resume",
            Token::Stop => "Stop",
            Token::Randomize => "Randomize",
            Token::Option => "Option",
            Token::Explicit => "Explicit",
        }
    }

    /// Returns true for tokens that may appear as the operator of a binary
    /// expression.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Plus
                | Token::Minus
                | Token::Star
                | Token::Slash
                | Token::Backslash
                | Token::Mod
                | Token::Caret
                | Token::Is
                | Token::Ampersand
                | Token::Not
                | Token::And
                | Token::Or
                | Token::Xor
                | Token::Eqv
                | Token::Imp
                | Token::Equal
                | Token::NotEqual
                | Token::Less
                | Token::Greater
                | Token::LessEqual
                | Token::GreaterEqual
        )
    }

    /// Returns true for the variant subtypes a literal can carry.
    pub fn is_literal_kind(&self) -> bool {
        matches!(
            self,
            Token::Empty
                | Token::Null
                | Token::Boolean
                | Token::Byte
                | Token::Integer
                | Token::Currency
                | Token::Long
                | Token::Single
                | Token::Double
                | Token::Date
                | Token::String
                | Token::Object
                | Token::Error
        )
    }

    /// Returns true for alphabetic reserved words.
    ///
    /// Word operators such as `And` and `Mod` count as keywords too.
    pub fn is_keyword(&self) -> bool {
        self.as_str()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_ordering() {
        assert!(Pos::SYNTHETIC < Pos::NONE);
        assert!(Pos::NONE < Pos::new(0));
        assert!(Pos::new(3) < Pos::new(4));
    }

    #[test]
    fn test_pos_validity() {
        assert!(!Pos::NONE.is_valid());
        assert!(Pos::SYNTHETIC.is_valid());
        assert!(!Pos::SYNTHETIC.is_real());
        assert!(Pos::new(10).is_real());
        assert_eq!(Pos::default(), Pos::NONE);
    }

    #[test]
    fn test_pos_advance() {
        assert_eq!(Pos::new(5).advance(3), Pos::new(8));
        assert_eq!(Pos::NONE.advance(3), Pos::NONE);
        assert_eq!(Pos::SYNTHETIC.advance(3), Pos::SYNTHETIC);
        assert_eq!(Pos::new(2).offset(), Some(2));
        assert_eq!(Pos::NONE.offset(), None);
    }

    #[test]
    fn test_token_spelling() {
        assert_eq!(Token::Ampersand.as_str(), "&");
        assert_eq!(Token::LessEqual.to_string(), "<=");
        assert_eq!(Token::ElseIf.as_str(), "ElseIf");
        assert_eq!(Token::Backslash.as_str(), "\\");
    }

    #[test]
    fn test_token_categories() {
        assert!(Token::Mod.is_operator());
        assert!(Token::Mod.is_keyword());
        assert!(!Token::Plus.is_keyword());
        assert!(Token::String.is_literal_kind());
        assert!(!Token::Set.is_literal_kind());
        assert!(!Token::Dim.is_operator());
    }
}
