//! Scalar arithmetic needed by the dimension kernels.
//!
//! Every dimension kernel is written once against [`DimensionNative`] and
//! instantiated per concrete Arrow primitive type by
//! [`with_dimension_arrow_type!`](crate::with_dimension_arrow_type) once the
//! dimension's declared `DataType` is known.

use std::fmt::Debug;

use crate::literal::FromLiteral;

/// Native value type of an array dimension.
///
/// Value arithmetic stays inside the declared type. Integer implementations use
/// wrapping arithmetic so that intermediate products such as `index * step`
/// never trap when the final coordinate is representable.
pub trait DimensionNative: Copy + PartialOrd + Debug + Send + Sync + FromLiteral + 'static {
    const ZERO: Self;

    /// Value of the coordinate at `index`: `start + index * step`.
    fn value_at(start: Self, step: Self, index: u64) -> Self;

    /// Like [`value_at`](Self::value_at) but `None` when the coordinate is not
    /// representable in the type.
    fn checked_value_at(start: Self, step: Self, index: u64) -> Option<Self>;

    /// Number of whole steps from `start` to `value`, rounded towards negative
    /// infinity, and whether `value` lies exactly on the step grid.
    ///
    /// `step` must be positive. Ratios beyond the `i128` range saturate and are
    /// never reported as exact.
    fn steps_from(value: Self, start: Self, step: Self) -> (i128, bool);

    fn is_positive(self) -> bool;

    /// Returns `true` for values that compare unordered against everything.
    fn is_nan(self) -> bool;

    /// Greatest common divisor of two positive steps.
    fn gcd(a: Self, b: Self) -> Self;

    /// Returns `true` when `a - b` is an exact multiple of `divisor`.
    fn difference_divisible(a: Self, b: Self, divisor: Self) -> bool;
}

macro_rules! impl_dimension_native_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl DimensionNative for $ty {
                const ZERO: Self = 0;

                #[inline]
                fn value_at(start: Self, step: Self, index: u64) -> Self {
                    start.wrapping_add((index as $ty).wrapping_mul(step))
                }

                #[inline]
                fn checked_value_at(start: Self, step: Self, index: u64) -> Option<Self> {
                    let offset = i128::from(index).checked_mul(step as i128)?;
                    let value = (start as i128).checked_add(offset)?;
                    <$ty>::try_from(value).ok()
                }

                #[inline]
                fn steps_from(value: Self, start: Self, step: Self) -> (i128, bool) {
                    let delta = value as i128 - start as i128;
                    let step = step as i128;
                    (delta.div_euclid(step), delta.rem_euclid(step) == 0)
                }

                #[inline]
                fn is_positive(self) -> bool {
                    self > 0
                }

                #[inline]
                fn is_nan(self) -> bool {
                    false
                }

                fn gcd(a: Self, b: Self) -> Self {
                    let (mut a, mut b) = (a, b);
                    while b != 0 {
                        let r = a % b;
                        a = b;
                        b = r;
                    }
                    a
                }

                #[inline]
                fn difference_divisible(a: Self, b: Self, divisor: Self) -> bool {
                    (a as i128 - b as i128).rem_euclid(divisor as i128) == 0
                }
            }
        )+
    };
}

macro_rules! impl_dimension_native_float {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl DimensionNative for $ty {
                const ZERO: Self = 0.0;

                #[inline]
                fn value_at(start: Self, step: Self, index: u64) -> Self {
                    start + (index as $ty) * step
                }

                #[inline]
                fn checked_value_at(start: Self, step: Self, index: u64) -> Option<Self> {
                    let value = Self::value_at(start, step, index);
                    value.is_finite().then_some(value)
                }

                #[inline]
                fn steps_from(value: Self, start: Self, step: Self) -> (i128, bool) {
                    let ratio = (value - start) / step;
                    let floor = ratio.floor();
                    // `as` saturates, and infinities map to the i128 bounds.
                    let exact = floor == ratio && floor.abs() < i128::MAX as $ty;
                    (floor as i128, exact)
                }

                #[inline]
                fn is_positive(self) -> bool {
                    self > 0.0
                }

                #[inline]
                fn is_nan(self) -> bool {
                    <$ty>::is_nan(self)
                }

                fn gcd(a: Self, b: Self) -> Self {
                    // Euclid over fmod; exact for steps representable as binary fractions.
                    let (mut a, mut b) = (a.abs(), b.abs());
                    while b > <$ty>::EPSILON * a {
                        let r = a % b;
                        a = b;
                        b = r;
                    }
                    a
                }

                #[inline]
                fn difference_divisible(a: Self, b: Self, divisor: Self) -> bool {
                    (a - b) % divisor == 0.0
                }
            }
        )+
    };
}

impl_dimension_native_int!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_dimension_native_float!(f32, f64);

/// Expands to `$body` with `$ty` bound to the Arrow primitive type matching the
/// supplied `DataType`. The supported dimension scalar types are the signed and
/// unsigned integers plus `Float32`/`Float64`; any other type evaluates
/// `$unsupported`.
///
/// ```
/// use arrow::datatypes::{ArrowPrimitiveType, DataType};
/// use sciql_types::with_dimension_arrow_type;
///
/// let width = with_dimension_arrow_type!(&DataType::Int16, |T| {
///     std::mem::size_of::<<T as ArrowPrimitiveType>::Native>()
/// }, 0);
/// assert_eq!(width, 2);
/// ```
#[macro_export]
macro_rules! with_dimension_arrow_type {
    ($dtype:expr, |$ty:ident| $body:expr, $unsupported:expr $(,)?) => {{
        let dtype_ref: &arrow::datatypes::DataType = $dtype;
        match dtype_ref {
            arrow::datatypes::DataType::Int8 => {
                type $ty = arrow::datatypes::Int8Type;
                $body
            }
            arrow::datatypes::DataType::Int16 => {
                type $ty = arrow::datatypes::Int16Type;
                $body
            }
            arrow::datatypes::DataType::Int32 => {
                type $ty = arrow::datatypes::Int32Type;
                $body
            }
            arrow::datatypes::DataType::Int64 => {
                type $ty = arrow::datatypes::Int64Type;
                $body
            }
            arrow::datatypes::DataType::UInt8 => {
                type $ty = arrow::datatypes::UInt8Type;
                $body
            }
            arrow::datatypes::DataType::UInt16 => {
                type $ty = arrow::datatypes::UInt16Type;
                $body
            }
            arrow::datatypes::DataType::UInt32 => {
                type $ty = arrow::datatypes::UInt32Type;
                $body
            }
            arrow::datatypes::DataType::UInt64 => {
                type $ty = arrow::datatypes::UInt64Type;
                $body
            }
            arrow::datatypes::DataType::Float32 => {
                type $ty = arrow::datatypes::Float32Type;
                $body
            }
            arrow::datatypes::DataType::Float64 => {
                type $ty = arrow::datatypes::Float64Type;
                $body
            }
            _ => $unsupported,
        }
    }};
}

/// Returns `true` when `data_type` can be used as a dimension scalar type.
pub fn is_dimension_type(data_type: &arrow::datatypes::DataType) -> bool {
    with_dimension_arrow_type!(data_type, |_T| true, false)
}
