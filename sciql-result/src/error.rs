use std::fmt;

use arrow::datatypes::DataType;
use thiserror::Error;

/// Unified error type for all array algebra operations.
///
/// Every operator in the workspace returns [`crate::Result`], so failures can be
/// propagated with `?` up to the query-execution layer and matched there.
///
/// An empty selection is *not* an error: narrowing a candidate set down to zero
/// cells is reported as an ordinary empty result. [`Error::EmptyOrInvalid`] is
/// reserved for predicates that carry no usable bound information.
#[derive(Error, Debug)]
pub enum Error {
    /// Arrow library error raised by a columnar kernel (take, filter, cast, ...).
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A materialised result would exceed the configured cell budget, or the
    /// product of dimension counts does not fit the identifier space.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// A column or descriptor handle does not resolve.
    ///
    /// Raised by the column catalog when a handle was never registered or has
    /// already been released.
    #[error("missing object: {0}")]
    MissingObject(String),

    /// Theta-select received an operator token it does not understand.
    #[error("unsupported operator: {0:?}")]
    UnsupportedOperator(String),

    /// A type-dispatched kernel was invoked on a scalar type it does not handle.
    #[error("unsupported type {data_type} for {context}")]
    UnsupportedType {
        data_type: DataType,
        context: &'static str,
    },

    /// QR decomposition over an empty or rank-deficient matrix.
    #[error("degenerate matrix: {0}")]
    DegenerateMatrix(String),

    /// A predicate carries no bound information (both bounds unbounded on a
    /// non-point selection).
    #[error("empty or invalid predicate: {0}")]
    EmptyOrInvalid(String),

    /// Invalid argument passed to an operator.
    ///
    /// Covers mismatched dimensionality between descriptors, identifiers outside
    /// the array's cell space, literals that cannot be cast to the dimension's
    /// scalar type and non-positive dimension steps.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// Internal error indicating a bug or unexpected state.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Build an [`Error::UnsupportedType`] for the given kernel.
    #[inline]
    pub fn unsupported_type(data_type: &DataType, context: &'static str) -> Self {
        Error::UnsupportedType {
            data_type: data_type.clone(),
            context,
        }
    }

    /// Build an [`Error::AllocationFailure`] from any displayable reason.
    #[inline]
    pub fn allocation<E: fmt::Display>(reason: E) -> Self {
        Error::AllocationFailure(reason.to_string())
    }

    /// Returns `true` when the error is one of the "bad input" kinds that a
    /// caller can fix by changing its arguments.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedOperator(_)
                | Error::UnsupportedType { .. }
                | Error::EmptyOrInvalid(_)
                | Error::InvalidArgumentError(_)
        )
    }
}
