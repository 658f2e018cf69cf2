//! Candidate sets to flat cell identifiers.

use arrow::array::UInt64Array;
use sciql_result::Result;
use sciql_types::{ArrayDescriptor, CandidateDescriptor, Candidates, CellId, Dimension};

use crate::options::AlgebraOptions;

/// Flat identifiers of every cell selected by `candidates`, ascending, with
/// dimension 0 varying fastest.
///
/// Strides come from `array`, so the identifiers address the array's backing
/// column regardless of how far the candidates were narrowed.
pub fn flatten(
    candidates: &CandidateDescriptor,
    array: &ArrayDescriptor,
    options: &AlgebraOptions,
) -> Result<Vec<CellId>> {
    array.check_candidates(candidates)?;
    let total = options.check_result_cells(candidates.cell_count(), "flatten")?;
    let dims: Vec<&Dimension> = candidates.dimensions().collect();
    let strides: Vec<u64> = (0..array.ndims()).map(|d| array.jump_size(d)).collect();

    let ids = flatten_dims(&dims, &strides, total);
    tracing::debug!(cells = ids.len(), ndims = dims.len(), "flatten");
    Ok(ids)
}

/// Identifiers over `dims[..]`: flatten all but the last dimension once, then
/// lay out one offset copy of that partial sequence per index of the last.
fn flatten_dims(dims: &[&Dimension], strides: &[u64], capacity: usize) -> Vec<CellId> {
    let Some((last, lower)) = dims.split_last() else {
        return vec![0];
    };
    let jump = strides[lower.len()];
    let partial_len = lower.iter().map(|d| d.count() as usize).product();
    let partial = flatten_dims(lower, strides, partial_len);

    let mut out = Vec::with_capacity(capacity);
    for index in last.iter() {
        let offset = index * jump;
        out.extend(partial.iter().map(|&id| id + offset));
    }
    out
}

/// Flatten into an identifier column; `Candidates::Empty` yields an empty
/// column.
pub fn materialise(
    candidates: &Candidates,
    array: &ArrayDescriptor,
    options: &AlgebraOptions,
) -> Result<UInt64Array> {
    match candidates {
        Candidates::Empty => Ok(UInt64Array::from(Vec::<u64>::new())),
        Candidates::Cells(desc) => Ok(UInt64Array::from(flatten(desc, array, options)?)),
    }
}
