//! Minimal bounding ranges of cell sets.

use arrow::array::{Array, UInt64Array};
use sciql_result::{Error, Result};
use sciql_types::{ArrayDescriptor, CandidateDescriptor, Candidates, Dimension};

/// Tightest per-dimension unit-step ranges containing every identified cell.
///
/// An empty identifier column yields [`Candidates::Empty`].
pub fn bounding_range(ids: &UInt64Array, array: &ArrayDescriptor) -> Result<Candidates> {
    if ids.null_count() > 0 {
        return Err(Error::InvalidArgumentError(
            "cell identifier column contains nulls".into(),
        ));
    }
    if ids.is_empty() {
        return Ok(Candidates::Empty);
    }

    let cell_count = array.cell_count();
    let shape: Vec<(u64, u64)> = array
        .dimensions()
        .iter()
        .enumerate()
        .map(|(d, dim)| (array.jump_size(d), dim.count()))
        .collect();
    let mut bounds = vec![(u64::MAX, 0u64); shape.len()];

    for &id in ids.values().iter() {
        if id >= cell_count {
            return Err(Error::InvalidArgumentError(format!(
                "cell identifier {id} out of range for array of {cell_count} cells"
            )));
        }
        for (&(stride, count), (lo, hi)) in shape.iter().zip(bounds.iter_mut()) {
            let index = (id / stride) % count;
            *lo = (*lo).min(index);
            *hi = (*hi).max(index);
        }
    }

    let dims = bounds
        .into_iter()
        .map(|(lo, hi)| Dimension::range(lo, hi, 1))
        .collect();
    let candidates = CandidateDescriptor::new(dims);
    tracing::debug!(ids = ids.len(), bounding = %candidates, "bounding range");
    Ok(Candidates::Cells(candidates))
}

/// Bounding range with precedence: the candidates when given, otherwise the
/// bounding range of `ids`, otherwise the whole array.
pub fn bounding_range_of(
    ids: Option<&UInt64Array>,
    candidates: Option<&Candidates>,
    array: &ArrayDescriptor,
) -> Result<Candidates> {
    match (candidates, ids) {
        (Some(candidates), _) => Ok(candidates.clone()),
        (None, Some(ids)) => bounding_range(ids, array),
        (None, None) => Ok(Candidates::from(array.full_candidates())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sciql_test_utils::unit_array;

    #[test]
    fn recovers_box_from_scattered_cells() {
        let array = unit_array(&[4, 3]);
        // (1,0) and (2,2)
        let ids = UInt64Array::from(vec![1, 10]);
        let mbr = bounding_range(&ids, &array).unwrap();
        let expected = CandidateDescriptor::new(vec![Dimension::range(1, 2, 1), Dimension::range(0, 2, 1)]);
        assert_eq!(mbr, Candidates::Cells(expected));
    }

    #[test]
    fn empty_ids_have_no_bounding_range() {
        let array = unit_array(&[4, 3]);
        let ids = UInt64Array::from(Vec::<u64>::new());
        assert_eq!(bounding_range(&ids, &array).unwrap(), Candidates::Empty);
    }

    #[test]
    fn rejects_ids_outside_array() {
        let array = unit_array(&[2, 2]);
        let ids = UInt64Array::from(vec![4]);
        assert!(matches!(
            bounding_range(&ids, &array),
            Err(Error::InvalidArgumentError(_))
        ));
    }

    #[test]
    fn precedence_prefers_candidates() {
        let array = unit_array(&[4, 3]);
        let cand = Candidates::from(CandidateDescriptor::new(vec![
            Dimension::explicit(vec![0, 3]),
            Dimension::full(3),
        ]));
        let ids = UInt64Array::from(vec![5]);
        assert_eq!(bounding_range_of(Some(&ids), Some(&cand), &array).unwrap(), cand);
        assert_eq!(
            bounding_range_of(None, None, &array).unwrap().cell_count(),
            array.cell_count()
        );
        assert_eq!(bounding_range_of(Some(&ids), None, &array).unwrap().cell_count(), 1);
    }
}
