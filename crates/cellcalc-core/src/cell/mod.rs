//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellError`] - The error classification stored alongside a cell's value
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellStore`] - Sparse storage of cell formulas and their last outcomes

mod address;
mod storage;
mod value;

pub use address::{is_valid_label, CellAddress};
pub use storage::{Cell, CellStore};
pub use value::CellError;
