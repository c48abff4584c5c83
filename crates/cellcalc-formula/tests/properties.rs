//! Property tests for the evaluation pipeline

use cellcalc_core::{CellError, CellStore};
use cellcalc_formula::{evaluate, NoCells};
use proptest::prelude::*;

/// A term: a leading integer followed by `*`/`/` factors (`true` = multiply)
type Term = (u32, Vec<(bool, u32)>);

fn term() -> impl Strategy<Value = Term> {
    (0u32..20, prop::collection::vec((any::<bool>(), 1u32..20), 0..3))
}

/// Push a term's tokens and return its value, multiplying and dividing left to right
fn emit_term(tokens: &mut Vec<String>, (head, factors): Term) -> f64 {
    tokens.push(head.to_string());
    let mut value = head as f64;
    for (multiply, n) in factors {
        tokens.push(if multiply { "*" } else { "/" }.to_string());
        tokens.push(n.to_string());
        if multiply {
            value *= n as f64;
        } else {
            value /= n as f64;
        }
    }
    value
}

/// A literal-only expression without division by zero, as `(tokens, expected value)`
fn arithmetic() -> impl Strategy<Value = (Vec<String>, f64)> {
    (
        term(),
        prop::collection::vec((any::<bool>(), term()), 0..4),
        any::<bool>(),
    )
        .prop_map(|(first, rest, wrap)| {
            let mut tokens = Vec::new();
            if wrap {
                tokens.push("(".to_string());
            }

            let mut total = emit_term(&mut tokens, first);
            for (add, term) in rest {
                tokens.push(if add { "+" } else { "-" }.to_string());
                let value = emit_term(&mut tokens, term);
                if add {
                    total += value;
                } else {
                    total -= value;
                }
            }

            if wrap {
                tokens.push(")".to_string());
            }
            (tokens, total)
        })
}

/// A term with `/ 0` spliced in after a random factor, then `+` terms
///
/// Factors of the poisoned term may themselves be zero.
fn zero_divisor_formula() -> impl Strategy<Value = Vec<String>> {
    (
        (0u32..20, prop::collection::vec((any::<bool>(), 0u32..20), 0..4)),
        any::<prop::sample::Index>(),
        prop::collection::vec(term(), 0..3),
    )
        .prop_map(|(poisoned, at, rest)| {
            let mut tokens = Vec::new();
            emit_term(&mut tokens, poisoned);

            let factors = (tokens.len() + 1) / 2;
            let cut = 1 + 2 * at.index(factors);
            tokens.splice(cut..cut, ["/".to_string(), "0".to_string()]);

            for term in rest {
                tokens.push("+".to_string());
                emit_term(&mut tokens, term);
            }
            tokens
        })
}

fn dangling_tail() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(vec!["+", "-", "*", "/", "("]), 1..4)
}

fn token_soup() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "0", "1", "2.5", "7", "+", "-", "*", "/", "(", ")", "A1", "B1", "C1", "x", ".",
        ]),
        0..12,
    )
}

fn sample_store() -> CellStore {
    let mut store = CellStore::new();
    store.set_formula("A1", ["3"]).unwrap();
    store.record("A1", 3.0, None).unwrap();
    store.set_formula("B1", ["(", "1"]).unwrap();
    store
        .record("B1", 0.0, Some(CellError::MissingParentheses))
        .unwrap();
    store
}

proptest! {
    #[test]
    fn literal_expressions_evaluate_exactly((tokens, expected) in arithmetic()) {
        let outcome = evaluate(&tokens, &NoCells);
        prop_assert_eq!(outcome.error, None);
        prop_assert_eq!(outcome.result, expected);
    }

    #[test]
    fn dangling_tail_is_trimmed_and_reported(
        (tokens, expected) in arithmetic(),
        tail in dangling_tail(),
    ) {
        let mut formula: Vec<&str> = tokens.iter().map(String::as_str).collect();
        formula.extend(tail);

        let outcome = evaluate(&formula, &NoCells);
        prop_assert_eq!(outcome.error, Some(CellError::InvalidFormula));
        prop_assert_eq!(outcome.result, expected);
    }

    #[test]
    fn zero_divisor_in_term_is_divide_by_zero(formula in zero_divisor_formula()) {
        let outcome = evaluate(&formula, &NoCells);
        prop_assert_eq!(outcome.error, Some(CellError::DivideByZero));
        prop_assert_eq!(outcome.result, f64::INFINITY);
    }

    #[test]
    fn evaluation_is_deterministic(formula in token_soup()) {
        let store = sample_store();
        let first = evaluate(&formula, &store);
        let second = evaluate(&formula, &store);

        prop_assert_eq!(first.result.to_bits(), second.result.to_bits());
        prop_assert_eq!(first.error, second.error);
    }

    #[test]
    fn infinite_result_is_divide_by_zero(formula in token_soup()) {
        let outcome = evaluate(&formula, &sample_store());
        if outcome.result == f64::INFINITY {
            prop_assert_eq!(outcome.error, Some(CellError::DivideByZero));
        }
    }
}
