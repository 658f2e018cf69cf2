//! Alignment of two dimensions for coordinate-equality joins.
//!
//! Two axes `a0 + i * sa` and `b0 + j * sb` share coordinates only if
//! `gcd(sa, sb)` divides `a0 - b0`. The shared coordinates are then spaced
//! `lcm(sa, sb)` apart, which is `sb / gcd` steps of the left axis and
//! `sa / gcd` steps of the right one. Alignment finds the first and last
//! shared coordinate and expresses both sides as strided index ranges.

use arrow::datatypes::ArrowPrimitiveType;
use sciql_result::{Error, Result};
use sciql_types::{
    AnalyticDimension, ArrayDescriptor, CandidateDescriptor, Candidates, Dimension,
    DimensionNative, ValueDomain, with_dimension_arrow_type,
};

/// Index ranges of the coordinates `left` and `right` have in common.
///
/// Both results are range form and either both are empty or neither is.
pub fn align_dimensions(
    left: &AnalyticDimension,
    right: &AnalyticDimension,
) -> Result<(Dimension, Dimension)> {
    if left.data_type() != right.data_type() {
        return Err(Error::InvalidArgumentError(format!(
            "cannot join dimension of type {} with dimension of type {}",
            left.data_type(),
            right.data_type()
        )));
    }
    let (l, r) = with_dimension_arrow_type!(
        left.data_type(),
        |T| align::<<T as ArrowPrimitiveType>::Native>(&left.typed()?, &right.typed()?)?,
        return Err(Error::unsupported_type(left.data_type(), "dimension join"))
    );
    tracing::debug!(
        left_dim = left.dim_num(),
        right_dim = right.dim_num(),
        left = %l,
        right = %r,
        "aligned dimensions"
    );
    Ok((l, r))
}

/// Align two dimensions and install the aligned ranges into both candidate
/// sets, replacing the previous state of those dimensions.
///
/// `None` stands for the whole array. If either side is empty, or the axes
/// share no coordinate, both results are empty.
pub fn subjoin_dimensions(
    left_candidates: Option<Candidates>,
    left_array: &ArrayDescriptor,
    left: &AnalyticDimension,
    right_candidates: Option<Candidates>,
    right_array: &ArrayDescriptor,
    right: &AnalyticDimension,
) -> Result<(Candidates, Candidates)> {
    let left_candidates = resolve(left_candidates, left_array)?;
    let right_candidates = resolve(right_candidates, right_array)?;
    let (Some(mut lc), Some(mut rc)) = (left_candidates, right_candidates) else {
        return Ok((Candidates::Empty, Candidates::Empty));
    };

    let (l, r) = align_dimensions(left, right)?;
    if l.is_empty() || r.is_empty() {
        return Ok((Candidates::Empty, Candidates::Empty));
    }
    lc.replace(left.dim_num(), l)?;
    rc.replace(right.dim_num(), r)?;
    Ok((Candidates::from(lc), Candidates::from(rc)))
}

fn resolve(
    candidates: Option<Candidates>,
    array: &ArrayDescriptor,
) -> Result<Option<CandidateDescriptor>> {
    match candidates {
        None => Ok(Some(array.full_candidates())),
        Some(Candidates::Empty) => Ok(None),
        Some(Candidates::Cells(desc)) => {
            array.check_candidates(&desc)?;
            Ok(Some(desc))
        }
    }
}

pub(crate) fn align<N: DimensionNative>(
    left: &ValueDomain<N>,
    right: &ValueDomain<N>,
) -> Result<(Dimension, Dimension)> {
    let empty = || Ok((Dimension::empty(), Dimension::empty()));
    if left.count == 0 || right.count == 0 {
        return empty();
    }
    let gcd = N::gcd(left.step, right.step);
    if !N::difference_divisible(left.start, right.start, gcd) {
        tracing::trace!(?gcd, "no common coordinate");
        return empty();
    }

    let Some((l_lo, r_lo)) = first_common(left, right) else {
        return empty();
    };
    let Some((l_hi, r_hi)) = last_common(left, right) else {
        return empty();
    };
    let l_step = whole_steps(right.step, gcd)?;
    let r_step = whole_steps(left.step, gcd)?;
    Ok((
        Dimension::range(l_lo, l_hi, l_step),
        Dimension::range(r_lo, r_hi, r_step),
    ))
}

/// `value / divisor` for a `divisor` that must divide `value` a positive
/// whole number of times.
fn whole_steps<N: DimensionNative>(value: N, divisor: N) -> Result<u64> {
    let (steps, exact) = N::steps_from(value, N::ZERO, divisor);
    match u64::try_from(steps) {
        Ok(steps) if exact && steps > 0 => Ok(steps),
        _ => Err(Error::Internal(format!(
            "step {value:?} is not a whole multiple of {divisor:?}"
        ))),
    }
}

/// Smallest pair of indices with equal coordinates, stepping whichever side
/// is behind up to the other's coordinate.
fn first_common<N: DimensionNative>(left: &ValueDomain<N>, right: &ValueDomain<N>) -> Option<(u64, u64)> {
    let (mut i, mut j) = (0u64, 0u64);
    while i < left.count && j < right.count {
        let (lv, rv) = (left.value_at(i), right.value_at(j));
        if lv == rv {
            return Some((i, j));
        }
        if lv < rv {
            i = next_index(left.lower_index(rv, true), i)?;
        } else {
            j = next_index(right.lower_index(lv, true), j)?;
        }
    }
    None
}

/// Largest pair of indices with equal coordinates, stepping down from the
/// last element of each side.
fn last_common<N: DimensionNative>(left: &ValueDomain<N>, right: &ValueDomain<N>) -> Option<(u64, u64)> {
    let (mut i, mut j) = (left.count - 1, right.count - 1);
    loop {
        let (lv, rv) = (left.value_at(i), right.value_at(j));
        if lv == rv {
            return Some((i, j));
        }
        if lv > rv {
            i = prev_index(left.upper_index(rv, true), i)?;
        } else {
            j = prev_index(right.upper_index(lv, true), j)?;
        }
    }
}

// Each step moves strictly forward (or backward), which bounds both loops by
// the element counts.
fn next_index(candidate: i128, current: u64) -> Option<u64> {
    let next = u64::try_from(candidate).ok()?;
    Some(next.max(current + 1))
}

fn prev_index(candidate: i128, current: u64) -> Option<u64> {
    let prev = u64::try_from(candidate).ok()?;
    let floor = current.checked_sub(1)?;
    Some(prev.min(floor))
}
