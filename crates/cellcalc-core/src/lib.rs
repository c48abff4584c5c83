//! # cellcalc-core
//!
//! Core data structures for the cellcalc formula engine.
//!
//! This crate provides the types shared by the evaluator and its callers:
//! - [`CellError`] - The catalog of error classifications a cell can carry
//! - [`CellAddress`] - A cell label such as `A1`, and [`is_valid_label`]
//! - [`CellStore`] and [`Cell`] - A small in-memory store of cell formulas and outcomes
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_core::{CellError, CellStore};
//!
//! let mut store = CellStore::new();
//! store.set_formula("A1", ["1", "+", "2"]).unwrap();
//! store.record("A1", 3.0, None).unwrap();
//!
//! let cell = store.get("A1").unwrap();
//! assert_eq!(cell.value, 3.0);
//! assert_eq!(CellError::DivideByZero.as_str(), "#DIV/0!");
//! ```

pub mod cell;
pub mod error;

// Re-exports for convenience
pub use cell::{is_valid_label, Cell, CellAddress, CellError, CellStore};
pub use error::{Error, Result};

/// Maximum number of rows addressable by a label
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns addressable by a label
pub const MAX_COLS: u16 = 16_384;
