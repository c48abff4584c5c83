//! Cell storage implementation
//!
//! This module provides sparse storage for cell formulas and their last
//! evaluation outcome. Only cells that were written are stored; every other
//! label reads as an empty cell.

use std::collections::BTreeMap;

use super::{CellAddress, CellError};
use crate::error::Result;

/// Complete data for a single cell
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// The cell's formula as an ordered token sequence
    pub formula: Vec<String>,
    /// Value computed by the last evaluation (0 until one is recorded)
    pub value: f64,
    /// Error classification of the last evaluation, if any
    pub error: Option<CellError>,
}

impl Cell {
    /// Create a cell holding `formula` with no computed value yet
    pub fn with_formula<I, S>(formula: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formula: formula.into_iter().map(Into::into).collect(),
            value: 0.0,
            error: None,
        }
    }

    /// Check if the cell has no formula
    pub fn is_empty(&self) -> bool {
        self.formula.is_empty()
    }
}

/// Sparse storage for cells, keyed by address
///
/// Structure: `BTreeMap<CellAddress, Cell>`, iterated in row-major order.
#[derive(Debug, Default, Clone)]
pub struct CellStore {
    cells: BTreeMap<CellAddress, Cell>,
}

impl CellStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cell at `label`, if one was ever written
    ///
    /// Returns `None` both for unwritten cells and for malformed labels.
    pub fn get(&self, label: &str) -> Option<&Cell> {
        let addr = CellAddress::parse(label).ok()?;
        self.cells.get(&addr)
    }

    /// Replace the formula of the cell at `label`
    ///
    /// The cell's value and error are reset until an outcome is recorded.
    pub fn set_formula<I, S>(&mut self, label: &str, formula: I) -> Result<CellAddress>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addr = CellAddress::parse(label)?;
        self.cells.insert(addr, Cell::with_formula(formula));
        Ok(addr)
    }

    /// Store an evaluation outcome on the cell at `label`
    ///
    /// Creates the cell (with an empty formula) if it does not exist.
    pub fn record(&mut self, label: &str, value: f64, error: Option<CellError>) -> Result<()> {
        let addr = CellAddress::parse(label)?;
        let cell = self.cells.entry(addr).or_default();
        cell.value = value;
        cell.error = error;
        Ok(())
    }

    /// Remove the cell at `label`, returning it
    pub fn remove(&mut self, label: &str) -> Result<Option<Cell>> {
        let addr = CellAddress::parse(label)?;
        Ok(self.cells.remove(&addr))
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell has been stored
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &Cell)> {
        self.cells.iter().map(|(addr, cell)| (*addr, cell))
    }
}
