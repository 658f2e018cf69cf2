//! Array algebra over dense N-dimensional arrays.
//!
//! Arrays are described by an [`ArrayDescriptor`](sciql_types::ArrayDescriptor)
//! and stored as flat columns with dimension 0 varying fastest. The engines in
//! this crate narrow candidate cell sets dimension by dimension, turn them
//! into flat cell identifiers, regenerate coordinate columns, align
//! dimensions for joins and factor two-dimensional arrays.

pub mod dense;
pub mod flatten;
pub mod join;
pub mod mbr;
pub mod operators;
pub mod options;
pub mod projection;
pub mod selection;

pub use dense::{QrDecomposition, qr, qr_decompose};
pub use flatten::{flatten, materialise};
pub use join::{align_dimensions, subjoin_dimensions};
pub use mbr::{bounding_range, bounding_range_of};
pub use operators::ArrayOperators;
pub use options::AlgebraOptions;
pub use projection::{pad_to_shape, project_values, project_whole_dimension, regenerate_dimension};
pub use selection::{select_dimension, select_values, theta_select_dimension};
