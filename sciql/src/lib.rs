//! SciQL: array algebra over Arrow columns
//!
//! This crate is the entrypoint of the workspace. It re-exports the array
//! descriptors, the column catalog and the operator facade from the
//! underlying `sciql-*` crates.
//!
//! # Quick Start
//!
//! Describe a 3 x 4 array, select a slab of it and list the selected cells:
//!
//! ```rust
//! use arrow::array::AsArray;
//! use arrow::datatypes::{DataType, UInt64Type};
//! use sciql::{ArrayDescriptor, ArrayDimension, ArrayOperators, ColumnCatalog};
//!
//! let array = ArrayDescriptor::new(vec![
//!     ArrayDimension::new("x", DataType::Int32, 0, 1, 3).unwrap(),
//!     ArrayDimension::new("y", DataType::Int32, 0, 1, 4).unwrap(),
//! ])
//! .unwrap();
//! let catalog = ColumnCatalog::new();
//! let ops = ArrayOperators::new(&catalog);
//!
//! let y = array.analytic(1).unwrap();
//! let slab = ops.dimension_theta_select(None, &array, &y, 2, ">=").unwrap();
//! let ids = catalog.get(ops.materialise(&slab, &array).unwrap()).unwrap();
//! assert_eq!(ids.as_primitive::<UInt64Type>().values(), &[6, 7, 8, 9, 10, 11]);
//! ```
//!
//! # Architecture
//!
//! - **Types** (`sciql-types`): dimensions, array and candidate descriptors,
//!   predicates.
//! - **Storage** (`sciql-storage`): column catalog and single-column kernels.
//! - **Algebra** (`sciql-algebra`): selection, flattening, projection,
//!   bounding ranges, join alignment and QR.

pub use sciql_algebra::{AlgebraOptions, ArrayOperators, QrDecomposition};
pub use sciql_storage::ColumnCatalog;
pub use sciql_types::{
    AnalyticDimension, ArrayDescriptor, ArrayDimension, CandidateDescriptor, Candidates, CellId,
    ColumnId, Dimension, Literal, RangePredicate, ThetaOp,
};

/// The individual engines, for callers working without a catalog.
pub mod algebra {
    pub use sciql_algebra::{dense, flatten, join, mbr, projection, selection};
}

// Re-export result types for error handling
pub use sciql_result::{Error, Result};
