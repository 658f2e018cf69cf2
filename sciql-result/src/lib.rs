//! Error types and result definitions for the sciql array algebra.
//!
//! All crates in the workspace share a single error enum ([`Error`]) and the
//! [`Result<T>`] alias so failures cross crate boundaries with `?` and can be
//! matched structurally at the query-execution layer.
//!
//! # Error Categories
//!
//! - **Resource errors** ([`Error::AllocationFailure`]): output would exceed the cell budget
//! - **Lookup failures** ([`Error::MissingObject`]): unresolved column handles
//! - **Dispatch errors** ([`Error::UnsupportedOperator`], [`Error::UnsupportedType`])
//! - **Numeric errors** ([`Error::DegenerateMatrix`]): QR on empty or rank-deficient input
//! - **Predicate errors** ([`Error::EmptyOrInvalid`]): predicates without bound information
//! - **User input errors** ([`Error::InvalidArgumentError`])
//! - **Internal errors** ([`Error::Internal`]): bugs or unexpected states

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
