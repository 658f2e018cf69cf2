//! Identifier aliases shared across the workspace.

/// Flat position of a cell in an array's storage order, dimension 0 varying
/// fastest.
pub type CellId = u64;

/// Handle of a column registered in a column catalog.
pub type ColumnId = u32;
