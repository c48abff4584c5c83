//! Formula evaluator
//!
//! Substitutes cell references, repairs a dangling tail, evaluates the
//! arithmetic and reconciles everything into one [`EvaluationOutcome`].
//!
//! Errors are reported by last write: a cell reference's error is replaced by
//! the next reference's (even a clean one), a trimmed tail replaces that, a
//! grammar failure replaces that, and a divide-by-zero result wins over all.

use crate::expression::evaluate_expression;
use crate::resolver::CellResolver;
use crate::token::{is_number, parse_number, Token};
use cellcalc_core::{is_valid_label, CellError, CellStore};
use tracing::{debug, trace};

/// Result of evaluating one formula
///
/// `result` is always set, even when `error` is: it is then best effort
/// (0 when the expression could not be evaluated at all).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationOutcome {
    pub result: f64,
    pub error: Option<CellError>,
}

impl EvaluationOutcome {
    /// Error message, or the empty string on success
    pub fn error_message(&self) -> &'static str {
        CellError::message(self.error)
    }

    /// Check if evaluation produced no error
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl Default for EvaluationOutcome {
    fn default() -> Self {
        Self {
            result: 0.0,
            error: None,
        }
    }
}

/// Check whether `token` is a cell reference by label syntax alone
pub fn is_cell_reference(token: &str) -> bool {
    is_valid_label(token)
}

/// Evaluate a formula against `resolver`
///
/// # Example
/// ```rust
/// use cellcalc_core::CellError;
/// use cellcalc_formula::{evaluate, NoCells};
///
/// let outcome = evaluate(&["3", "+", "4", "*", "2"], &NoCells);
/// assert_eq!(outcome.result, 11.0);
/// assert!(outcome.is_ok());
///
/// let outcome = evaluate(&["1", "+", "2", "*"], &NoCells);
/// assert_eq!(outcome.result, 3.0);
/// assert_eq!(outcome.error, Some(CellError::InvalidFormula));
/// ```
pub fn evaluate<S, R>(formula: &[S], resolver: &R) -> EvaluationOutcome
where
    S: AsRef<str>,
    R: CellResolver + ?Sized,
{
    if formula.is_empty() {
        return EvaluationOutcome {
            result: 0.0,
            error: Some(CellError::EmptyFormula),
        };
    }

    let mut error = None;
    let mut tokens = substitute(formula, resolver, &mut error);

    if trim_dangling_tail(&mut tokens) {
        error = Some(CellError::InvalidFormula);
    }

    let mut result = 0.0;
    match evaluate_expression(&tokens) {
        Ok(value) => result = value.to_f64(),
        Err(e) => {
            debug!("formula evaluation failed: {e}");
            error = Some(e.cell_error());
        }
    }

    if result == f64::INFINITY {
        debug!("infinite result reported as division by zero");
        error = Some(CellError::DivideByZero);
    }

    EvaluationOutcome { result, error }
}

/// Replace numbers and cell references with their values
///
/// Each cell reference overwrites `error` with its own resolution error.
fn substitute<S, R>(formula: &[S], resolver: &R, error: &mut Option<CellError>) -> Vec<Token>
where
    S: AsRef<str>,
    R: CellResolver + ?Sized,
{
    formula
        .iter()
        .map(|token| {
            let token = token.as_ref();
            if let Some(n) = parse_number(token) {
                Token::Number(n)
            } else if resolver.is_cell_reference(token) {
                let resolved = resolver.resolve(token);
                trace!(
                    "{token} resolved to {} ({})",
                    resolved.value,
                    CellError::message(resolved.error)
                );
                *error = resolved.error;
                Token::Number(resolved.value)
            } else {
                Token::symbol(token)
            }
        })
        .collect()
}

/// Pop trailing `+ - * / (` tokens, returning whether any were removed
fn trim_dangling_tail(tokens: &mut Vec<Token>) -> bool {
    let len = tokens.len();
    while tokens.last().is_some_and(Token::is_dangling) {
        tokens.pop();
    }

    let trimmed = len - tokens.len();
    if trimmed > 0 {
        debug!("trimmed {trimmed} dangling token(s) from formula tail");
    }
    trimmed > 0
}

/// Evaluate the stored formula of the cell at `label` and record the outcome
///
/// Only this one cell is updated; cells that reference it keep their old
/// values until they are evaluated again.
pub fn evaluate_cell(store: &mut CellStore, label: &str) -> cellcalc_core::Result<EvaluationOutcome> {
    let formula = store
        .get(label)
        .map(|cell| cell.formula.clone())
        .unwrap_or_default();

    let outcome = evaluate(formula.as_slice(), &*store);
    store.record(label, outcome.result, outcome.error)?;
    Ok(outcome)
}

/// Evaluator that keeps the outcome of its last call
///
/// Each call to [`evaluate`](Self::evaluate) replaces the previous outcome.
#[derive(Debug)]
pub struct FormulaEvaluator<R> {
    resolver: R,
    last: EvaluationOutcome,
}

impl<R: CellResolver> FormulaEvaluator<R> {
    /// Create an evaluator reading cells from `resolver`
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            last: EvaluationOutcome::default(),
        }
    }

    /// Evaluate `formula`, replacing the last outcome
    pub fn evaluate<S: AsRef<str>>(&mut self, formula: &[S]) -> EvaluationOutcome {
        self.last = evaluate(formula, &self.resolver);
        self.last
    }

    /// Result of the last evaluation
    pub fn result(&self) -> f64 {
        self.last.result
    }

    /// Error message of the last evaluation (empty on success)
    pub fn error(&self) -> &'static str {
        self.last.error_message()
    }

    /// Outcome of the last evaluation
    pub fn outcome(&self) -> EvaluationOutcome {
        self.last
    }

    /// Check whether `token` is a numeric literal
    pub fn is_number(&self, token: &str) -> bool {
        is_number(token)
    }

    /// Check whether `token` is a cell reference for this evaluator's resolver
    pub fn is_cell_reference(&self, token: &str) -> bool {
        self.resolver.is_cell_reference(token)
    }

    /// Get the underlying resolver
    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}
