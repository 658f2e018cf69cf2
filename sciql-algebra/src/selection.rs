//! Predicate application to one dimension of a candidate set.
//!
//! A value-space predicate is first translated into an inclusive index
//! interval over the dimension's value domain, then applied to the current
//! candidate state of that dimension. Selections chain: the output of one
//! call is the `prior` of the next, and once a chain reaches
//! [`Candidates::Empty`] every later step returns immediately.

use arrow::array::{ArrayRef, UInt64Array};
use sciql_result::{Error, Result};
use sciql_types::{
    AnalyticDimension, ArrayDescriptor, Candidates, Dimension, DimensionNative, Literal,
    RangePredicate, ThetaOp, ValueDomain, with_dimension_arrow_type,
};

/// Narrow one dimension of `prior` (the whole array when `None`).
pub fn select_dimension(
    prior: Option<Candidates>,
    array: &ArrayDescriptor,
    dimension: &AnalyticDimension,
    predicate: &RangePredicate,
) -> Result<Candidates> {
    let mut candidates = match prior {
        None => array.full_candidates(),
        Some(Candidates::Empty) => {
            tracing::trace!(dim = dimension.dim_num(), "selection on empty candidates skipped");
            return Ok(Candidates::Empty);
        }
        Some(Candidates::Cells(candidates)) => candidates,
    };
    array.check_candidates(&candidates)?;
    check_analytic(array, dimension)?;

    let dim_num = dimension.dim_num();
    let current = candidates.dimension(dim_num)?;
    let narrowed = with_dimension_arrow_type!(
        dimension.data_type(),
        |T| {
            let domain = dimension.typed::<<T as arrow::datatypes::ArrowPrimitiveType>::Native>()?;
            narrow(current, &domain, predicate)?
        },
        return Err(Error::unsupported_type(dimension.data_type(), "dimension select"))
    );

    tracing::debug!(
        dim = dim_num,
        %predicate,
        before = current.count(),
        after = narrowed.count(),
        "dimension select"
    );
    if narrowed.is_empty() {
        return Ok(Candidates::Empty);
    }
    candidates.replace(dim_num, narrowed)?;
    Ok(Candidates::from(candidates))
}

/// Theta-select: `dimension <op> value` where `op` is an operator token.
pub fn theta_select_dimension(
    prior: Option<Candidates>,
    array: &ArrayDescriptor,
    dimension: &AnalyticDimension,
    value: impl Into<Literal>,
    op: &str,
) -> Result<Candidates> {
    let op: ThetaOp = op.parse()?;
    select_dimension(prior, array, dimension, &RangePredicate::theta(op, value))
}

/// Range select over a non-dimensional value column.
///
/// Returns the qualifying cell identifiers together with the candidate state
/// of the dimensions, which a value predicate leaves untouched.
pub fn select_values(
    column: &ArrayRef,
    candidate_ids: Option<&UInt64Array>,
    candidates: Option<Candidates>,
    predicate: &RangePredicate,
) -> Result<(UInt64Array, Option<Candidates>)> {
    let ids = sciql_storage::select_range(column, candidate_ids, predicate)?;
    Ok((ids, candidates))
}

fn check_analytic(array: &ArrayDescriptor, dimension: &AnalyticDimension) -> Result<()> {
    let own = array.dimension(dimension.dim_num())?;
    if own.domain() != dimension.domain() {
        return Err(Error::InvalidArgumentError(format!(
            "dimension handle '{}' does not belong to this array",
            dimension.domain().name()
        )));
    }
    Ok(())
}

/// Apply `predicate` to the candidate state `current` of a dimension with the
/// given value domain.
pub(crate) fn narrow<N: DimensionNative>(
    current: &Dimension,
    domain: &ValueDomain<N>,
    predicate: &RangePredicate,
) -> Result<Dimension> {
    if predicate.is_unbounded() {
        return Err(Error::EmptyOrInvalid(format!(
            "predicate {predicate} has no bounds"
        )));
    }
    let low = bound::<N>(&predicate.low, predicate, "low")?;
    let high = bound::<N>(&predicate.high, predicate, "high")?;

    if predicate.is_point()
        && let Some(value) = low
    {
        return Ok(match domain.equal_index(value) {
            Some(index) if predicate.anti => current.exclude(index, index),
            Some(index) => current.restrict(index, index),
            None => untouched_or_empty(current, predicate.anti),
        });
    }

    let Some(last) = domain.count.checked_sub(1).map(i128::from) else {
        return Ok(untouched_or_empty(current, predicate.anti));
    };
    let lo = low.map_or(0, |low| domain.lower_index(low, predicate.include_low).max(0));
    let hi = high.map_or(last, |high| {
        domain.upper_index(high, predicate.include_high).min(last)
    });
    tracing::trace!(lo, hi, "qualifying index interval");
    if lo > hi {
        return Ok(untouched_or_empty(current, predicate.anti));
    }

    // 0 <= lo <= hi <= last < u64::MAX
    let (lo, hi) = (lo as u64, hi as u64);
    Ok(if predicate.anti {
        current.exclude(lo, hi)
    } else {
        current.restrict(lo, hi)
    })
}

/// Native value of one predicate bound, `None` when the bound is open.
fn bound<N: DimensionNative>(
    literal: &Literal,
    predicate: &RangePredicate,
    which: &str,
) -> Result<Option<N>> {
    if literal.is_null() {
        return Ok(None);
    }
    let value = literal.to_native_for::<N>(which)?;
    if value.is_nan() {
        return Err(Error::EmptyOrInvalid(format!(
            "predicate {predicate} has a NaN {which} bound"
        )));
    }
    Ok(Some(value))
}

fn untouched_or_empty(current: &Dimension, anti: bool) -> Dimension {
    if anti {
        current.clone()
    } else {
        Dimension::empty()
    }
}
