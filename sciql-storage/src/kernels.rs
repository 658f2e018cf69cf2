//! Single-column primitives: gather, range select and padding.
//!
//! These operate on one flat Arrow column at a time and know nothing about
//! array shape; cell identifiers are plain positions into the column.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, PrimitiveArray, Scalar, UInt64Array, new_null_array,
};
use arrow::compute::kernels::boolean::{and, not};
use arrow::compute::kernels::cmp::{eq, gt, gt_eq, lt, lt_eq};
use arrow::compute::{concat, filter, is_not_null, prep_null_mask_filter, take};
use arrow::datatypes::{ArrowPrimitiveType, UInt64Type};
use sciql_result::{Error, Result};
use sciql_types::{FromLiteral, Literal, RangePredicate, with_dimension_arrow_type};

/// Gather `column[ids[i]]` for every identifier, preserving order.
///
/// An empty identifier column produces an empty column of the source type.
pub fn project(ids: &UInt64Array, column: &ArrayRef) -> Result<ArrayRef> {
    check_ids(ids, column.len() as u64)?;
    tracing::trace!(ids = ids.len(), source_len = column.len(), "project");
    Ok(take(column.as_ref(), ids, None)?)
}

/// Identifiers of the cells of `column` whose value satisfies `predicate`.
///
/// With `candidates` only the listed positions are tested and the result
/// keeps their order; otherwise every position is tested in ascending order.
/// Null values never qualify, negated or not. Two null bounds select every
/// non-null value.
pub fn select_range(
    column: &ArrayRef,
    candidates: Option<&UInt64Array>,
    predicate: &RangePredicate,
) -> Result<UInt64Array> {
    let (values, ids) = match candidates {
        Some(ids) => (project(ids, column)?, ids.clone()),
        None => (
            Arc::clone(column),
            UInt64Array::from_iter_values(0..column.len() as u64),
        ),
    };

    let mask = with_dimension_arrow_type!(
        column.data_type(),
        |T| range_mask::<T>(&values, predicate)?,
        return Err(Error::unsupported_type(column.data_type(), "range select"))
    );
    let mask = and(&mask, &is_not_null(values.as_ref())?)?;
    let mask = prep_null_mask_filter(&mask);

    let selected = filter(&ids, &mask)?;
    tracing::debug!(
        tested = ids.len(),
        selected = selected.len(),
        %predicate,
        "range select"
    );
    Ok(selected.as_primitive::<UInt64Type>().clone())
}

fn range_mask<T>(values: &ArrayRef, predicate: &RangePredicate) -> Result<BooleanArray>
where
    T: ArrowPrimitiveType,
    T::Native: FromLiteral,
{
    let low = bound_scalar::<T>(&predicate.low, "low")?;
    let high = bound_scalar::<T>(&predicate.high, "high")?;

    let mask = match (low, high) {
        (None, None) => is_not_null(values.as_ref())?,
        (Some(point), Some(_)) if predicate.is_point() => eq(values, &point)?,
        (Some(low), None) => lower_mask(values, &low, predicate.include_low)?,
        (None, Some(high)) => upper_mask(values, &high, predicate.include_high)?,
        (Some(low), Some(high)) => and(
            &lower_mask(values, &low, predicate.include_low)?,
            &upper_mask(values, &high, predicate.include_high)?,
        )?,
    };
    if predicate.anti {
        Ok(not(&mask)?)
    } else {
        Ok(mask)
    }
}

fn bound_scalar<T>(literal: &Literal, operand: &str) -> Result<Option<Scalar<PrimitiveArray<T>>>>
where
    T: ArrowPrimitiveType,
    T::Native: FromLiteral,
{
    if literal.is_null() {
        return Ok(None);
    }
    let value = literal.to_native_for::<T::Native>(operand)?;
    Ok(Some(PrimitiveArray::<T>::new_scalar(value)))
}

fn lower_mask<T: ArrowPrimitiveType>(
    values: &ArrayRef,
    low: &Scalar<PrimitiveArray<T>>,
    inclusive: bool,
) -> Result<BooleanArray> {
    Ok(if inclusive {
        gt_eq(values, low)?
    } else {
        gt(values, low)?
    })
}

fn upper_mask<T: ArrowPrimitiveType>(
    values: &ArrayRef,
    high: &Scalar<PrimitiveArray<T>>,
    inclusive: bool,
) -> Result<BooleanArray> {
    Ok(if inclusive {
        lt_eq(values, high)?
    } else {
        lt(values, high)?
    })
}

/// Extend `column` with nulls up to `len` rows.
pub fn pad_to_length(column: &ArrayRef, len: u64) -> Result<ArrayRef> {
    let current = column.len() as u64;
    if current > len {
        return Err(Error::InvalidArgumentError(format!(
            "column of length {current} does not fit a shape of {len} cells"
        )));
    }
    if current == len {
        return Ok(Arc::clone(column));
    }
    let missing = usize::try_from(len - current).map_err(Error::allocation)?;
    tracing::trace!(current, missing, "padding column with nulls");
    let nulls = new_null_array(column.data_type(), missing);
    Ok(concat(&[column.as_ref(), nulls.as_ref()])?)
}

fn check_ids(ids: &UInt64Array, len: u64) -> Result<()> {
    if ids.null_count() > 0 {
        return Err(Error::InvalidArgumentError(
            "cell identifier column contains nulls".into(),
        ));
    }
    if let Some(&bad) = ids.values().iter().find(|&&id| id >= len) {
        return Err(Error::InvalidArgumentError(format!(
            "cell identifier {bad} out of range for column of length {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int32Array, StringArray};
    use sciql_types::ThetaOp;

    fn ids(values: &[u64]) -> UInt64Array {
        UInt64Array::from(values.to_vec())
    }

    #[test]
    fn project_gathers_in_order() {
        let column: ArrayRef = Arc::new(Int32Array::from(vec![10, 20, 30]));
        let out = project(&ids(&[2, 0, 2]), &column).unwrap();
        assert_eq!(out.as_primitive::<arrow::datatypes::Int32Type>().values(), &[30, 10, 30]);

        let empty = project(&ids(&[]), &column).unwrap();
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.data_type(), column.data_type());

        assert!(matches!(
            project(&ids(&[3]), &column),
            Err(Error::InvalidArgumentError(_))
        ));
    }

    #[test]
    fn select_skips_nulls_in_both_polarities() {
        let column: ArrayRef = Arc::new(Int32Array::from(vec![Some(1), None, Some(5), Some(9)]));
        let hit = select_range(&column, None, &RangePredicate::between(1, 5)).unwrap();
        assert_eq!(hit.values(), &[0, 2]);

        let miss = select_range(&column, None, &RangePredicate::between(1, 5).negated()).unwrap();
        assert_eq!(miss.values(), &[3]);
    }

    #[test]
    fn select_respects_candidates_and_theta() {
        let column: ArrayRef = Arc::new(Float64Array::from(vec![0.5, 1.5, 2.5, 3.5]));
        let pred = RangePredicate::theta(ThetaOp::Gt, 1);
        let all = select_range(&column, None, &pred).unwrap();
        assert_eq!(all.values(), &[1, 2, 3]);
        let some = select_range(&column, Some(&ids(&[3, 0, 1])), &pred).unwrap();
        assert_eq!(some.values(), &[3, 1]);

        let ne = RangePredicate::theta(ThetaOp::NotEq, 2.5);
        assert_eq!(select_range(&column, None, &ne).unwrap().values(), &[0, 1, 3]);
    }

    #[test]
    fn select_rejects_non_numeric_columns() {
        let column: ArrayRef = Arc::new(StringArray::from(vec!["a"]));
        let err = select_range(&column, None, &RangePredicate::equals(1)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
    }

    #[test]
    fn pad_appends_nulls() {
        let column: ArrayRef = Arc::new(Int32Array::from(vec![1, 2]));
        let padded = pad_to_length(&column, 4).unwrap();
        assert_eq!(padded.len(), 4);
        assert_eq!(padded.null_count(), 2);
        assert!(padded.is_null(3));
        assert!(pad_to_length(&column, 1).is_err());
        assert_eq!(pad_to_length(&column, 2).unwrap().null_count(), 0);
    }
}
