//! Storage primitives the array algebra consumes.
//!
//! Columns are Arrow arrays held in a [`ColumnCatalog`]. Everything here is
//! shape-agnostic: the kernels see one flat column and a list of positions.

pub mod catalog;
pub mod cell_ids;
pub mod kernels;

pub use catalog::ColumnCatalog;
pub use cell_ids::{intersect_sorted, normalize_ids, outer_join_ids, subjoin};
pub use kernels::{pad_to_length, project, select_range};
