//! Operator identifiers and their textual names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operator identifiers.
///
/// `Minus` is both binary subtraction and unary negation; `Concat` is both
/// a binary and a variadic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Concat,
    Like,
    NotLike,
    Match,
    NotMatch,
    Typecast,
    Abs,
    Ceil,
    Floor,
    Round,
    Sign,
    Typeof,
    Not,
    Coalesce,
    Greatest,
    Least,
}

impl Operator {
    /// Every operator.
    pub const ALL: [Operator; 29] = [
        Operator::Plus,
        Operator::Minus,
        Operator::Mult,
        Operator::Div,
        Operator::Mod,
        Operator::And,
        Operator::Or,
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
        Operator::Concat,
        Operator::Like,
        Operator::NotLike,
        Operator::Match,
        Operator::NotMatch,
        Operator::Typecast,
        Operator::Abs,
        Operator::Ceil,
        Operator::Floor,
        Operator::Round,
        Operator::Sign,
        Operator::Typeof,
        Operator::Not,
        Operator::Coalesce,
        Operator::Greatest,
        Operator::Least,
    ];

    /// Returns the lowercase operator name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Mult => "mult",
            Operator::Div => "div",
            Operator::Mod => "mod",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Concat => "concat",
            Operator::Like => "like",
            Operator::NotLike => "notlike",
            Operator::Match => "match",
            Operator::NotMatch => "notmatch",
            Operator::Typecast => "typecast",
            Operator::Abs => "abs",
            Operator::Ceil => "ceil",
            Operator::Floor => "floor",
            Operator::Round => "round",
            Operator::Sign => "sign",
            Operator::Typeof => "typeof",
            Operator::Not => "not",
            Operator::Coalesce => "coalesce",
            Operator::Greatest => "greatest",
            Operator::Least => "least",
        }
    }

    /// Looks an operator up by name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Operator::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }

    /// `+ - * / %`
    #[must_use]
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Plus | Operator::Minus | Operator::Mult | Operator::Div | Operator::Mod
        )
    }

    /// `= <> < <= > >=`
    #[must_use]
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Ne | Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
