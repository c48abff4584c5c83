//! Formula tokens
//!
//! Formulas arrive already split into string tokens. During substitution each
//! one is decided once: a [`Token::Number`] when it is a numeric literal or a
//! resolved cell reference, a [`Token::Symbol`] otherwise.

use std::borrow::Cow;
use std::fmt;

/// One atomic unit of a substituted formula
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric value (literal or resolved cell reference)
    Number(f64),
    /// An operator, a parenthesis, or an unrecognized fragment
    Symbol(String),
}

impl Token {
    /// Create a symbol token
    pub fn symbol<S: Into<String>>(s: S) -> Self {
        Token::Symbol(s.into())
    }

    /// Get the symbol text, if this is a symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Token::Symbol(s) => Some(s),
            Token::Number(_) => None,
        }
    }

    /// Check if this is exactly the symbol `s`
    pub fn is_symbol(&self, s: &str) -> bool {
        self.as_symbol() == Some(s)
    }

    /// Textual form of the token
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Token::Number(n) => Cow::Owned(n.to_string()),
            Token::Symbol(s) => Cow::Borrowed(s),
        }
    }

    /// Check if the textual form contains a digit or a decimal point
    pub(crate) fn looks_numeric(&self) -> bool {
        self.text().bytes().any(|b| b.is_ascii_digit() || b == b'.')
    }

    /// Check if this token can never end an expression (`+ - * / (`)
    pub(crate) fn is_dangling(&self) -> bool {
        matches!(self.as_symbol(), Some("+" | "-" | "*" | "/" | "("))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<f64> for Token {
    fn from(n: f64) -> Self {
        Token::Number(n)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Symbol(s.to_string())
    }
}

/// Parse a token as a finite real number
pub(crate) fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Check whether a token's textual form parses as a finite real number
///
/// # Example
/// ```rust
/// use cellcalc_formula::is_number;
///
/// assert!(is_number("42"));
/// assert!(is_number("3.5"));
/// assert!(is_number(".5"));
/// assert!(!is_number("A1"));
/// assert!(!is_number("+"));
/// assert!(!is_number("inf"));
/// ```
pub fn is_number(token: &str) -> bool {
    parse_number(token).is_some()
}

/// Parse the longest leading float literal of `s`
///
/// Accepts an optional sign, digits with at most one decimal point, and an
/// optional exponent. Returns NaN when no digits lead the string.
pub(crate) fn parse_float_prefix(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
        pos = end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_start {
            pos = end;
        }
    }

    s[..pos].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_number() {
        assert!(is_number("0"));
        assert!(is_number("12.75"));
        assert!(is_number("1e3"));
        assert!(is_number(" 7 "));
        assert!(is_number("-4"));

        assert!(!is_number(""));
        assert!(!is_number("   "));
        assert!(!is_number("("));
        assert!(!is_number("1.2.3"));
        assert!(!is_number("0x10"));
        assert!(!is_number("NaN"));
        assert!(!is_number("infinity"));
        assert!(!is_number("B7"));
    }

    #[test]
    fn test_text() {
        assert_eq!(Token::Number(11.0).text(), "11");
        assert_eq!(Token::Number(0.25).text(), "0.25");
        assert_eq!(Token::symbol("+").text(), "+");
        assert_eq!(Token::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_looks_numeric() {
        assert!(Token::Number(3.0).looks_numeric());
        assert!(Token::symbol(".").looks_numeric());
        assert!(Token::symbol("4x").looks_numeric());
        assert!(!Token::symbol("*").looks_numeric());
        assert!(!Token::Number(f64::NAN).looks_numeric());
    }

    #[test]
    fn test_dangling() {
        for s in ["+", "-", "*", "/", "("] {
            assert!(Token::symbol(s).is_dangling());
        }
        assert!(!Token::symbol(")").is_dangling());
        assert!(!Token::symbol("++").is_dangling());
        assert!(!Token::Number(1.0).is_dangling());
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("12"), 12.0);
        assert_eq!(parse_float_prefix("1.5"), 1.5);
        assert_eq!(parse_float_prefix("1.52.5"), 1.52);
        assert_eq!(parse_float_prefix("3abc"), 3.0);
        assert_eq!(parse_float_prefix("-53"), -53.0);
        assert_eq!(parse_float_prefix("2e3x"), 2000.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert_eq!(parse_float_prefix("5."), 5.0);
        assert!(parse_float_prefix("abc").is_nan());
        assert!(parse_float_prefix(".").is_nan());
    }
}
