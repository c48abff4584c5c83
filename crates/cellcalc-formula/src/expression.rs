//! Arithmetic expression evaluator
//!
//! A recursive descent evaluator over a flat, already-substituted token
//! sequence. It knows nothing about cells.
//!
//! ```text
//! expression := term ( ('+' | '-') term )*
//! term       := factor ( ('*' | '/') factor )*
//! factor     := NUMBER | '(' expression ')'
//! ```
//!
//! Operators are left-associative and `*`/`/` bind tighter than `+`/`-`.

use crate::error::{FormulaError, FormulaResult};
use crate::token::{parse_float_prefix, Token};

/// Deepest parenthesis nesting accepted before a formula is rejected
pub const MAX_NESTING: usize = 256;

/// A value produced while evaluating an expression
///
/// Division by zero does not fail. It produces [`Operand::DivideByZero`],
/// which absorbs the remaining factors of its term and otherwise combines
/// with other operands exactly like positive infinity would. Any arithmetic
/// that lands on positive infinity becomes the sentinel again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// A regular number (may be NaN or negative infinity)
    Value(f64),
    /// A division by zero happened somewhere below
    DivideByZero,
}

impl Operand {
    /// Classify a raw float
    pub fn from_f64(n: f64) -> Self {
        if n == f64::INFINITY {
            Operand::DivideByZero
        } else {
            Operand::Value(n)
        }
    }

    /// The float this operand behaves as
    pub fn to_f64(self) -> f64 {
        match self {
            Operand::Value(n) => n,
            Operand::DivideByZero => f64::INFINITY,
        }
    }

    /// Check if this is the divide-by-zero sentinel
    pub fn is_divide_by_zero(self) -> bool {
        matches!(self, Operand::DivideByZero)
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// `+` or `-`
    fn additive(token: Option<&Token>) -> Option<Self> {
        match token?.as_symbol()? {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            _ => None,
        }
    }

    /// `*` or `/`
    fn multiplicative(token: Option<&Token>) -> Option<Self> {
        match token?.as_symbol()? {
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    /// Combine two operands
    pub fn apply(self, left: Operand, right: Operand) -> Operand {
        let (l, r) = (left.to_f64(), right.to_f64());
        match self {
            BinaryOperator::Add => Operand::from_f64(l + r),
            BinaryOperator::Subtract => Operand::from_f64(l - r),
            BinaryOperator::Multiply => Operand::from_f64(l * r),
            BinaryOperator::Divide if r == 0.0 => Operand::DivideByZero,
            BinaryOperator::Divide => Operand::from_f64(l / r),
        }
    }
}

/// Evaluate a substituted token sequence
///
/// # Errors
/// - [`FormulaError::InvalidFormula`] when a factor is neither a number nor `(`,
///   or when tokens remain after a complete expression
/// - [`FormulaError::MissingParentheses`] when `(` is not closed
///
/// # Example
/// ```rust
/// use cellcalc_formula::{evaluate_expression, Operand, Token};
///
/// let tokens = [Token::Number(3.0), "+".into(), Token::Number(4.0), "*".into(), Token::Number(2.0)];
/// assert_eq!(evaluate_expression(&tokens).unwrap(), Operand::Value(11.0));
/// ```
pub fn evaluate_expression(tokens: &[Token]) -> FormulaResult<Operand> {
    let mut parser = ExpressionParser::new(tokens);
    let value = parser.parse_expression()?;

    // Make sure we consumed all input
    if parser.pos < tokens.len() {
        return Err(FormulaError::InvalidFormula(format!(
            "unexpected token '{}' after expression",
            tokens[parser.pos]
        )));
    }

    Ok(value)
}

/// Single forward cursor over the tokens
struct ExpressionParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // === Cursor ===

    /// Read the token under the cursor and advance, even past the end
    fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    /// Un-read the last token so the caller's level can see it
    fn step_back(&mut self) {
        self.pos -= 1;
    }

    // === Grammar ===

    fn parse_expression(&mut self) -> FormulaResult<Operand> {
        let mut left = self.parse_term()?;

        while let Some(op) = BinaryOperator::additive(self.next_token()) {
            let right = self.parse_term()?;
            left = op.apply(left, right);
        }
        self.step_back();

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<Operand> {
        let mut left = self.parse_factor()?;

        while let Some(op) = BinaryOperator::multiplicative(self.next_token()) {
            let right = self.parse_factor()?;
            // A zero divisor poisons the rest of the term
            if !left.is_divide_by_zero() {
                left = op.apply(left, right);
            }
        }
        self.step_back();

        Ok(left)
    }

    fn parse_factor(&mut self) -> FormulaResult<Operand> {
        match self.next_token() {
            Some(Token::Symbol(s)) if s == "(" => {
                if self.depth >= MAX_NESTING {
                    return Err(FormulaError::InvalidFormula(format!(
                        "parentheses nested deeper than {MAX_NESTING}"
                    )));
                }
                self.depth += 1;
                let value = self.parse_expression();
                self.depth -= 1;
                let value = value?;
                match self.next_token() {
                    Some(token) if token.is_symbol(")") => Ok(value),
                    _ => Err(FormulaError::MissingParentheses),
                }
            }
            Some(Token::Number(n)) => Ok(self.parse_literal(*n, None)),
            Some(Token::Symbol(s)) if s.starts_with(|c: char| c.is_ascii_digit()) => {
                Ok(self.parse_literal(parse_float_prefix(s), Some(s.clone())))
            }
            Some(token) => Err(FormulaError::InvalidFormula(format!(
                "expected a number or '(', got '{}'",
                token
            ))),
            None => Err(FormulaError::InvalidFormula(
                "unexpected end of formula".into(),
            )),
        }
    }

    /// Finish a numeric literal whose first token is already consumed
    ///
    /// Numeric-looking tokens directly after the literal are glued onto its
    /// text and the result is re-parsed as a single number.
    fn parse_literal(&mut self, value: f64, text: Option<String>) -> Operand {
        let mut glued: Option<String> = None;

        while let Some(next) = self.tokens.get(self.pos) {
            if !next.looks_numeric() {
                break;
            }
            let buf = glued.get_or_insert_with(|| match &text {
                Some(s) => s.clone(),
                None => Token::Number(value).text().into_owned(),
            });
            buf.push_str(&next.text());
            self.pos += 1;
        }

        match glued {
            Some(buf) => Operand::from_f64(parse_float_prefix(&buf)),
            None => Operand::from_f64(value),
        }
    }
}
