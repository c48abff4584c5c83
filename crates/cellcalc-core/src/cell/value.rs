//! Cell error catalog

use std::fmt;

/// Error classifications a formula evaluation can produce
///
/// A cell keeps the classification of its last evaluation next to its value.
/// The evaluator only ever reports one of these, either one it produced
/// itself or one propagated verbatim from a referenced cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #EMPTY! - The formula has no tokens
    EmptyFormula,
    /// #ERR - Structurally malformed formula
    InvalidFormula,
    /// #REF! - A referenced cell has no formula
    InvalidCell,
    /// #PAREN! - An opening parenthesis is never closed
    MissingParentheses,
    /// #DIV/0! - Division by zero
    DivideByZero,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::EmptyFormula => "#EMPTY!",
            CellError::InvalidFormula => "#ERR",
            CellError::InvalidCell => "#REF!",
            CellError::MissingParentheses => "#PAREN!",
            CellError::DivideByZero => "#DIV/0!",
        }
    }

    /// Parse an error string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#EMPTY!" => Some(CellError::EmptyFormula),
            "#ERR" => Some(CellError::InvalidFormula),
            "#REF!" => Some(CellError::InvalidCell),
            "#PAREN!" => Some(CellError::MissingParentheses),
            "#DIV/0!" => Some(CellError::DivideByZero),
            _ => None,
        }
    }

    /// Message form of an optional error: the empty string means success
    pub fn message(error: Option<CellError>) -> &'static str {
        error.map_or("", |e| e.as_str())
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
