//! Cell reference resolution

use cellcalc_core::{is_valid_label, Cell, CellError, CellStore};

/// The value a cell reference contributes, and the error it carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub value: f64,
    pub error: Option<CellError>,
}

impl Resolved {
    /// A clean value
    pub fn value(value: f64) -> Self {
        Self { value, error: None }
    }

    /// A zero value carrying `error`
    pub fn error(error: CellError) -> Self {
        Self {
            value: 0.0,
            error: Some(error),
        }
    }
}

/// Source of cell values for formula substitution
///
/// The evaluator only reads through this trait, so any backing store can be
/// plugged in as long as it applies the resolution policy of
/// [`resolve_cell`].
pub trait CellResolver {
    /// Resolve the cell named by `label`
    fn resolve(&self, label: &str) -> Resolved;

    /// Check whether `token` names a cell
    fn is_cell_reference(&self, token: &str) -> bool {
        is_valid_label(token)
    }
}

impl<R: CellResolver + ?Sized> CellResolver for &R {
    fn resolve(&self, label: &str) -> Resolved {
        (**self).resolve(label)
    }

    fn is_cell_reference(&self, token: &str) -> bool {
        (**self).is_cell_reference(token)
    }
}

/// Apply the resolution policy to a stored cell
///
/// - a cell holding an error other than [`CellError::EmptyFormula`] yields
///   `0` with that error
/// - a cell without a formula (or a missing cell) yields `0` with
///   [`CellError::InvalidCell`]
/// - otherwise the cell's current value with no error
pub fn resolve_cell(cell: Option<&Cell>) -> Resolved {
    let Some(cell) = cell else {
        return Resolved::error(CellError::InvalidCell);
    };

    match cell.error {
        Some(error) if error != CellError::EmptyFormula => Resolved::error(error),
        _ if cell.is_empty() => Resolved::error(CellError::InvalidCell),
        _ => Resolved::value(cell.value),
    }
}

impl CellResolver for CellStore {
    fn resolve(&self, label: &str) -> Resolved {
        resolve_cell(self.get(label))
    }
}

/// A resolver with no cells: every reference resolves as an empty cell
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCells;

impl CellResolver for NoCells {
    fn resolve(&self, _label: &str) -> Resolved {
        resolve_cell(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_error_propagates() {
        let mut cell = Cell::with_formula(["1", "/", "0"]);
        cell.value = f64::INFINITY;
        cell.error = Some(CellError::DivideByZero);

        assert_eq!(
            resolve_cell(Some(&cell)),
            Resolved::error(CellError::DivideByZero)
        );
    }

    #[test]
    fn test_empty_formula_is_invalid_cell() {
        let mut cell = Cell::default();
        assert_eq!(
            resolve_cell(Some(&cell)),
            Resolved::error(CellError::InvalidCell)
        );

        // An empty-formula error is not propagated as-is
        cell.error = Some(CellError::EmptyFormula);
        assert_eq!(
            resolve_cell(Some(&cell)),
            Resolved::error(CellError::InvalidCell)
        );

        assert_eq!(resolve_cell(None), Resolved::error(CellError::InvalidCell));
    }

    #[test]
    fn test_value() {
        let mut cell = Cell::with_formula(["4", "*", "2"]);
        cell.value = 8.0;
        assert_eq!(resolve_cell(Some(&cell)), Resolved::value(8.0));
    }

    #[test]
    fn test_store_resolver() {
        let mut store = CellStore::new();
        store.set_formula("C3", ["9"]).unwrap();
        store.record("C3", 9.0, None).unwrap();

        assert_eq!(store.resolve("C3"), Resolved::value(9.0));
        assert_eq!(store.resolve("D4"), Resolved::error(CellError::InvalidCell));
        assert!(store.is_cell_reference("D4"));
        assert!(!store.is_cell_reference("d4"));
        assert!(!NoCells.is_cell_reference("42"));
    }
}
