//! # cellcalc-formula
//!
//! Formula evaluation for cellcalc.
//!
//! This crate provides:
//! - A tagged [`Token`] model for pre-split formulas
//! - Arithmetic expression evaluation (`+ - * /` and parentheses)
//! - Cell-reference substitution through a [`CellResolver`]
//! - Error reconciliation into an [`EvaluationOutcome`]
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_core::{CellError, CellStore};
//! use cellcalc_formula::evaluate;
//!
//! let mut store = CellStore::new();
//! store.set_formula("A1", ["10"]).unwrap();
//! store.record("A1", 10.0, None).unwrap();
//!
//! let outcome = evaluate(&["A1", "+", "5"], &store);
//! assert_eq!(outcome.result, 15.0);
//! assert_eq!(outcome.error, None);
//!
//! let outcome = evaluate(&["8", "/", "0"], &store);
//! assert_eq!(outcome.error, Some(CellError::DivideByZero));
//! ```

pub mod error;
pub mod evaluator;
pub mod expression;
pub mod resolver;
pub mod token;

pub use error::{FormulaError, FormulaResult};
pub use evaluator::{
    evaluate, evaluate_cell, is_cell_reference, EvaluationOutcome, FormulaEvaluator,
};
pub use expression::{evaluate_expression, BinaryOperator, Operand, MAX_NESTING};
pub use resolver::{resolve_cell, CellResolver, NoCells, Resolved};
pub use token::{is_number, Token};
