//! Formula error types

use cellcalc_core::CellError;
use thiserror::Error;

/// Result type for expression evaluation
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Structurally malformed expression
    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    /// An opening parenthesis is not closed where expected
    #[error("Missing closing parenthesis")]
    MissingParentheses,
}

impl FormulaError {
    /// The catalog classification reported for this failure
    pub fn cell_error(&self) -> CellError {
        match self {
            FormulaError::InvalidFormula(_) => CellError::InvalidFormula,
            FormulaError::MissingParentheses => CellError::MissingParentheses,
        }
    }
}

impl From<FormulaError> for CellError {
    fn from(err: FormulaError) -> Self {
        err.cell_error()
    }
}
