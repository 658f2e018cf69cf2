//! Materialisation of dimension and non-dimension columns.
//!
//! Dimension values are regenerated from the candidate indices in the same
//! nesting order [`flatten`](crate::flatten::flatten) uses, so a regenerated
//! dimension column lines up row for row with a column gathered through the
//! flattened identifiers.

use std::sync::Arc;

use arrow::array::{ArrayRef, PrimitiveArray, UInt64Array, new_empty_array};
use arrow::datatypes::ArrowPrimitiveType;
use sciql_result::{Error, Result};
use sciql_types::{
    ArrayDescriptor, CandidateDescriptor, Candidates, DimensionNative, with_dimension_arrow_type,
};

use crate::options::AlgebraOptions;

/// Coordinate values of dimension `dim_num` for every selected cell.
pub fn regenerate_dimension(
    candidates: &Candidates,
    array: &ArrayDescriptor,
    dim_num: usize,
    options: &AlgebraOptions,
) -> Result<ArrayRef> {
    let dimension = array.dimension(dim_num)?;
    let data_type = dimension.data_type();
    let Some(candidates) = candidates.as_descriptor() else {
        return Ok(new_empty_array(data_type));
    };
    array.check_candidates(candidates)?;

    with_dimension_arrow_type!(
        data_type,
        |T| Ok(Arc::new(regenerate_typed::<T>(candidates, array, dim_num, options)?) as ArrayRef),
        Err(Error::unsupported_type(data_type, "dimension projection"))
    )
}

/// Coordinate values of dimension `dim_num` over the whole array.
pub fn project_whole_dimension(
    array: &ArrayDescriptor,
    dim_num: usize,
    options: &AlgebraOptions,
) -> Result<ArrayRef> {
    let candidates = Candidates::from(array.full_candidates());
    regenerate_dimension(&candidates, array, dim_num, options)
}

fn regenerate_typed<T>(
    candidates: &CandidateDescriptor,
    array: &ArrayDescriptor,
    dim_num: usize,
    options: &AlgebraOptions,
) -> Result<PrimitiveArray<T>>
where
    T: ArrowPrimitiveType,
    T::Native: DimensionNative,
{
    let domain = array.dimension(dim_num)?.domain().typed::<T::Native>()?;
    let target = candidates.dimension(dim_num)?;
    let counts: Vec<u64> = candidates.dimensions().map(|d| d.count()).collect();
    let before: u64 = counts[..dim_num].iter().product();
    let after: u64 = counts[dim_num + 1..].iter().product();
    let total = options.check_result_cells(candidates.cell_count(), "dimension projection")?;
    let before = before as usize;

    tracing::trace!(dim = dim_num, before, after, "regenerating dimension values");
    let mut values = Vec::with_capacity(total);
    for _ in 0..after {
        for index in target.iter() {
            values.extend(std::iter::repeat_n(domain.value_at(index), before));
        }
    }
    Ok(PrimitiveArray::<T>::from_iter_values(values))
}

/// Gather the values of a non-dimensional column at the given cells.
pub fn project_values(ids: &UInt64Array, column: &ArrayRef) -> Result<ArrayRef> {
    sciql_storage::project(ids, column)
}

/// Extend a non-dimensional column with nulls up to the array's cell count.
pub fn pad_to_shape(
    column: &ArrayRef,
    array: &ArrayDescriptor,
    options: &AlgebraOptions,
) -> Result<ArrayRef> {
    options.check_result_cells(array.cell_count(), "padding")?;
    sciql_storage::pad_to_length(column, array.cell_count())
}
