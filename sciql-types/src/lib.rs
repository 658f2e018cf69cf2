//! Types describing dense arrays, their candidate cell sets and the
//! predicates evaluated against them.
//!
//! Operators in `sciql-algebra` consume these descriptors; this crate holds
//! no kernels beyond the per-dimension index arithmetic.

pub mod array;
pub mod dimension;
pub mod domain;
pub mod ids;
pub mod literal;
pub mod native;
pub mod predicate;

pub use array::{AnalyticDimension, ArrayDescriptor, ArrayDimension, CandidateDescriptor, Candidates};
pub use dimension::{Dimension, DimensionIndex, DimensionIter, IndexList, IndexRange};
pub use domain::{DimensionDomain, ValueDomain};
pub use ids::{CellId, ColumnId};
pub use literal::{FromLiteral, Literal, LiteralCastError};
pub use native::{DimensionNative, is_dimension_type};
pub use predicate::{RangePredicate, ThetaOp};
