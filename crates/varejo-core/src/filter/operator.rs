//! # Operator Vocabulary
//!
//! Comparison operators accepted in `filter-<attr>` parameters and the
//! attribute value kinds that decide which of them are legal.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────┐
//! │  ValueKind           │  Vocabulary                          │
//! ├──────────────────────┼──────────────────────────────────────┤
//! │  Text                │  eq  ne  like  ilike                 │
//! │  Int / Float / Date  │  eq  ne  lt  gt  le  ge              │
//! └──────────────────────┴──────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Operator
// =============================================================================

/// A comparison operator as written in the query string (`gt`, `ilike`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Like,
    #[serde(rename = "ilike")]
    ILike,
}

/// Operators legal for text attributes.
pub const TEXT_OPERATORS: &[Operator] = &[Operator::Eq, Operator::Ne, Operator::Like, Operator::ILike];

/// Operators legal for numeric and date attributes.
pub const ORDERED_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Gt,
    Operator::Le,
    Operator::Ge,
];

impl Operator {
    /// Parses the query-string tag. Tags are case-sensitive, as sent by the
    /// frontend.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "eq" => Some(Operator::Eq),
            "ne" => Some(Operator::Ne),
            "lt" => Some(Operator::Lt),
            "gt" => Some(Operator::Gt),
            "le" => Some(Operator::Le),
            "ge" => Some(Operator::Ge),
            "like" => Some(Operator::Like),
            "ilike" => Some(Operator::ILike),
            _ => None,
        }
    }

    /// Returns the query-string tag.
    pub const fn tag(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Gt => "gt",
            Operator::Le => "le",
            Operator::Ge => "ge",
            Operator::Like => "like",
            Operator::ILike => "ilike",
        }
    }

    /// Returns the SQL token emitted by the compiler.
    pub const fn sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Like => "LIKE",
            Operator::ILike => "ILIKE",
        }
    }

    /// Substring operators wrap the bound value in `'%' || $n || '%'`.
    #[inline]
    pub const fn is_substring(&self) -> bool {
        matches!(self, Operator::Like | Operator::ILike)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Value Kind
// =============================================================================

/// Declared type of a filterable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Int,
    Float,
    Date,
}

impl ValueKind {
    /// Returns the operator vocabulary for this kind.
    pub const fn vocabulary(&self) -> &'static [Operator] {
        match self {
            ValueKind::Text => TEXT_OPERATORS,
            ValueKind::Int | ValueKind::Float | ValueKind::Date => ORDERED_OPERATORS,
        }
    }

    /// Checks whether `op` is legal for this kind.
    pub fn accepts(&self, op: Operator) -> bool {
        self.vocabulary().contains(&op)
    }
}
