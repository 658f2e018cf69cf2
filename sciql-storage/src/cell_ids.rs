//! Set operations over flat cell-identifier columns.

use arrow::array::{Array, UInt64Array};
use rustc_hash::FxHashSet;
use sciql_result::{Error, Result};

/// Sort and deduplicate a set of cell ids.
pub fn normalize_ids(mut ids: Vec<u64>) -> Vec<u64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

pub fn intersect_sorted(left: &[u64], right: &[u64]) -> Vec<u64> {
    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut i = 0;
    let mut j = 0;
    while i < left.len() && j < right.len() {
        let lv = left[i];
        let rv = right[j];
        if lv == rv {
            result.push(lv);
            i += 1;
            j += 1;
        } else if lv < rv {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

/// Identifiers present in both columns, ascending and without duplicates.
pub fn subjoin(left: &UInt64Array, right: &UInt64Array) -> Result<UInt64Array> {
    let left = sorted_values(left)?;
    let right = sorted_values(right)?;
    let joined = intersect_sorted(&left, &right);
    tracing::trace!(
        left = left.len(),
        right = right.len(),
        joined = joined.len(),
        "subjoin"
    );
    Ok(UInt64Array::from(joined))
}

/// For every identifier of `left`, the identifier itself when `right` also
/// contains it and null otherwise. The output has the length of `left`.
pub fn outer_join_ids(left: &UInt64Array, right: &UInt64Array) -> Result<UInt64Array> {
    reject_nulls(left)?;
    reject_nulls(right)?;
    let present: FxHashSet<u64> = right.values().iter().copied().collect();
    let out: UInt64Array = left
        .values()
        .iter()
        .map(|id| present.contains(id).then_some(*id))
        .collect();
    tracing::trace!(
        left = left.len(),
        matched = out.len() - out.null_count(),
        "outer join of cell ids"
    );
    Ok(out)
}

fn sorted_values(ids: &UInt64Array) -> Result<Vec<u64>> {
    reject_nulls(ids)?;
    let values = ids.values();
    if values.windows(2).all(|w| w[0] < w[1]) {
        Ok(values.to_vec())
    } else {
        Ok(normalize_ids(values.to_vec()))
    }
}

fn reject_nulls(ids: &UInt64Array) -> Result<()> {
    if ids.null_count() > 0 {
        return Err(Error::InvalidArgumentError(
            "cell identifier column contains nulls".into(),
        ));
    }
    Ok(())
}
