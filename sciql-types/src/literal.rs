//! Untyped literal values plus helpers for converting them into native types.
//!
//! Predicates reach the algebra before the dimension's concrete scalar type is
//! consulted. Conversion into the native type is deferred until the operator
//! has dispatched on the dimension's Arrow `DataType`.

use std::fmt;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type, UInt8Type,
    UInt16Type, UInt32Type, UInt64Type,
};
use sciql_result::{Error, Result as SciqlResult};

/// A literal value that has not yet been coerced into a specific native type.
///
/// [`Literal::Null`] is the null sentinel: used as a predicate bound it means
/// "unbounded on that side".
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Int128(i128),
    Float64(f64),
}

macro_rules! impl_from_for_literal {
    ($variant:ident, $($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(v: $t) -> Self {
                    Literal::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for_literal!(Int128, i8, i16, i32, i64, i128, u8, u16, u32, u64);
impl_from_for_literal!(Float64, f32, f64);

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

impl Literal {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Int128(_) => "integer",
            Literal::Float64(_) => "float",
        }
    }

    pub fn to_native<T>(&self) -> Result<T, LiteralCastError>
    where
        T: FromLiteral,
    {
        T::from_literal(self)
    }

    /// Like [`Literal::to_native`] but maps a cast failure onto the crate error,
    /// naming the operand for diagnostics.
    pub fn to_native_for<T>(&self, operand: &str) -> SciqlResult<T>
    where
        T: FromLiteral,
    {
        T::from_literal(self).map_err(|err| {
            Error::InvalidArgumentError(format!("{operand} literal cast failed: {err}"))
        })
    }

    /// Read the value stored at `index` of a numeric Arrow array.
    pub fn from_array_ref(array: &ArrayRef, index: usize) -> SciqlResult<Literal> {
        if index >= array.len() {
            return Err(Error::InvalidArgumentError(format!(
                "literal index {index} out of bounds for array of length {}",
                array.len()
            )));
        }
        if array.is_null(index) {
            return Ok(Literal::Null);
        }

        let literal = match array.data_type() {
            DataType::Int8 => Literal::from(array.as_primitive::<Int8Type>().value(index)),
            DataType::Int16 => Literal::from(array.as_primitive::<Int16Type>().value(index)),
            DataType::Int32 => Literal::from(array.as_primitive::<Int32Type>().value(index)),
            DataType::Int64 => Literal::from(array.as_primitive::<Int64Type>().value(index)),
            DataType::UInt8 => Literal::from(array.as_primitive::<UInt8Type>().value(index)),
            DataType::UInt16 => Literal::from(array.as_primitive::<UInt16Type>().value(index)),
            DataType::UInt32 => Literal::from(array.as_primitive::<UInt32Type>().value(index)),
            DataType::UInt64 => Literal::from(array.as_primitive::<UInt64Type>().value(index)),
            DataType::Float32 => Literal::from(array.as_primitive::<Float32Type>().value(index)),
            DataType::Float64 => Literal::from(array.as_primitive::<Float64Type>().value(index)),
            other => {
                return Err(Error::unsupported_type(other, "literal conversion"));
            }
        };
        Ok(literal)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Int128(i) => write!(f, "{i}"),
            Literal::Float64(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralCastError {
    /// Tried to coerce a literal into an incompatible native type.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// Integer value does not fit in the destination type.
    OutOfRange { target: &'static str, value: i128 },
    /// Float value does not fit in the destination type.
    FloatOutOfRange { target: &'static str, value: f64 },
}

impl fmt::Display for LiteralCastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralCastError::TypeMismatch { expected, got } => {
                write!(f, "expected {}, got {}", expected, got)
            }
            LiteralCastError::OutOfRange { target, value } => {
                write!(f, "value {} out of range for {}", value, target)
            }
            LiteralCastError::FloatOutOfRange { target, value } => {
                write!(f, "value {} out of range for {}", value, target)
            }
        }
    }
}

impl std::error::Error for LiteralCastError {}

/// Helper trait implemented for primitive types that can be produced from a `Literal`.
pub trait FromLiteral: Sized {
    fn from_literal(lit: &Literal) -> Result<Self, LiteralCastError>;
}

macro_rules! impl_from_literal_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromLiteral for $ty {
                fn from_literal(lit: &Literal) -> Result<Self, LiteralCastError> {
                    match lit {
                        Literal::Int128(i) => <$ty>::try_from(*i).map_err(|_| {
                            LiteralCastError::OutOfRange {
                                target: std::any::type_name::<$ty>(),
                                value: *i,
                            }
                        }),
                        Literal::Float64(_) => Err(LiteralCastError::TypeMismatch {
                            expected: "integer",
                            got: "float",
                        }),
                        Literal::Null => Err(LiteralCastError::TypeMismatch {
                            expected: "integer",
                            got: "null",
                        }),
                    }
                }
            }
        )*
    };
}

impl_from_literal_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromLiteral for f32 {
    fn from_literal(lit: &Literal) -> Result<Self, LiteralCastError> {
        let value = match lit {
            Literal::Float64(f) => *f,
            Literal::Int128(i) => *i as f64,
            Literal::Null => {
                return Err(LiteralCastError::TypeMismatch {
                    expected: "float",
                    got: "null",
                });
            }
        };

        let casted = value as f32;
        if casted.is_finite() || !value.is_finite() {
            Ok(casted)
        } else {
            Err(LiteralCastError::FloatOutOfRange {
                target: "f32",
                value,
            })
        }
    }
}

impl FromLiteral for f64 {
    fn from_literal(lit: &Literal) -> Result<Self, LiteralCastError> {
        match lit {
            Literal::Float64(f) => Ok(*f),
            Literal::Int128(i) => Ok(*i as f64),
            Literal::Null => Err(LiteralCastError::TypeMismatch {
                expected: "float",
                got: "null",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int16Array, StringArray};
    use std::sync::Arc;

    #[test]
    fn integer_literal_respects_target_range() {
        assert_eq!(Literal::from(120_i32).to_native::<i8>().unwrap(), 120);
        let err = Literal::from(300_i32).to_native::<i8>().unwrap_err();
        assert!(matches!(err, LiteralCastError::OutOfRange { value: 300, .. }));
    }

    #[test]
    fn null_is_not_a_native_value() {
        let err = Literal::Null.to_native::<f64>().unwrap_err();
        assert!(matches!(
            err,
            LiteralCastError::TypeMismatch {
                expected: "float",
                got: "null"
            }
        ));
        assert!(Literal::from(None::<i32>).is_null());
    }

    #[test]
    fn float_literal_rejected_for_integers() {
        let err = Literal::from(2.5_f64).to_native_for::<i32>("low").unwrap_err();
        assert!(matches!(err, Error::InvalidArgumentError(msg) if msg.contains("low")));
    }

    #[test]
    fn reads_literals_from_arrays() {
        let array: ArrayRef = Arc::new(Int16Array::from(vec![Some(4), None]));
        assert_eq!(Literal::from_array_ref(&array, 0).unwrap(), Literal::Int128(4));
        assert_eq!(Literal::from_array_ref(&array, 1).unwrap(), Literal::Null);
        assert!(Literal::from_array_ref(&array, 2).is_err());

        let strings: ArrayRef = Arc::new(StringArray::from(vec!["a"]));
        let err = Literal::from_array_ref(&strings, 0).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
    }
}
