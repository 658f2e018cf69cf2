//! Single-axis candidate sets in index space.
//!
//! A [`Dimension`] is either a strided [`IndexRange`] or an explicit, sorted
//! [`IndexList`]. Narrowing keeps the range form whenever the result is still a
//! regular stride and only falls back to the explicit form when it must.

use std::fmt;

/// Position along one axis of an array (element-index space, not value space).
pub type DimensionIndex = u64;

/// Strided, inclusive index range `min, min + step, ..., max`.
///
/// `count == 0` encodes an empty range; `min`/`max` carry no meaning then.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    min: DimensionIndex,
    max: DimensionIndex,
    step: DimensionIndex,
    count: u64,
}

impl IndexRange {
    /// Build the range of grid points in `[min, max]` starting at `min`.
    ///
    /// `max` is snapped down onto the grid. A `step` of zero is treated as one.
    pub fn new(min: DimensionIndex, max: DimensionIndex, step: DimensionIndex) -> Self {
        let step = step.max(1);
        if min > max {
            return Self::empty();
        }
        let count = (max - min) / step + 1;
        Self {
            min,
            max: min + (count - 1) * step,
            step,
            count,
        }
    }

    /// The full extent `0..count` with unit step.
    pub fn full(count: u64) -> Self {
        if count == 0 {
            Self::empty()
        } else {
            Self::new(0, count - 1, 1)
        }
    }

    pub fn empty() -> Self {
        Self {
            min: 0,
            max: 0,
            step: 1,
            count: 0,
        }
    }

    #[inline]
    pub fn min(&self) -> DimensionIndex {
        self.min
    }

    #[inline]
    pub fn max(&self) -> DimensionIndex {
        self.max
    }

    #[inline]
    pub fn step(&self) -> DimensionIndex {
        self.step
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, index: DimensionIndex) -> bool {
        !self.is_empty()
            && index >= self.min
            && index <= self.max
            && (index - self.min) % self.step == 0
    }

    /// Intersect with `[lo, hi]`, keeping this range's stride phase.
    pub fn restrict(&self, lo: DimensionIndex, hi: DimensionIndex) -> Self {
        if self.is_empty() || lo > hi || hi < self.min || lo > self.max {
            return Self::empty();
        }
        let first = if lo <= self.min {
            self.min
        } else {
            let offset = lo - self.min;
            self.min + offset.div_ceil(self.step) * self.step
        };
        let last = hi.min(self.max);
        if first > last {
            return Self::empty();
        }
        Self::new(first, last, self.step)
    }

    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: self.min,
            step: self.step,
            remaining: self.count,
        }
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[]")
        } else {
            write!(f, "[{}:{}:{}]", self.min, self.step, self.max)
        }
    }
}

/// Iterator over the positions of an [`IndexRange`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    next: DimensionIndex,
    step: DimensionIndex,
    remaining: u64,
}

impl Iterator for RangeIter {
    type Item = DimensionIndex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next += self.step;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeIter {}

/// Explicit, strictly increasing list of selected positions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexList {
    indices: Vec<DimensionIndex>,
}

impl IndexList {
    /// Build a list from arbitrary positions; they are sorted and deduplicated.
    pub fn new(mut indices: Vec<DimensionIndex>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    #[inline]
    pub fn indices(&self) -> &[DimensionIndex] {
        &self.indices
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.indices.len() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: DimensionIndex) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn restrict(&self, lo: DimensionIndex, hi: DimensionIndex) -> Self {
        if lo > hi {
            return Self::default();
        }
        let start = self.indices.partition_point(|&idx| idx < lo);
        let end = self.indices.partition_point(|&idx| idx <= hi);
        Self {
            indices: self.indices[start..end.max(start)].to_vec(),
        }
    }

    /// Keep the positions outside `[lo, hi]`, comparing index values.
    pub fn exclude(&self, lo: DimensionIndex, hi: DimensionIndex) -> Self {
        Self {
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&idx| idx < lo || idx > hi)
                .collect(),
        }
    }
}

/// One axis of a candidate set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Range(IndexRange),
    Explicit(IndexList),
}

impl Dimension {
    /// Full, unnarrowed extent of an axis with `count` elements.
    pub fn full(count: u64) -> Self {
        Dimension::Range(IndexRange::full(count))
    }

    pub fn empty() -> Self {
        Dimension::Range(IndexRange::empty())
    }

    pub fn range(min: DimensionIndex, max: DimensionIndex, step: DimensionIndex) -> Self {
        Dimension::Range(IndexRange::new(min, max, step))
    }

    pub fn explicit(indices: Vec<DimensionIndex>) -> Self {
        Dimension::Explicit(IndexList::new(indices))
    }

    /// Number of selected positions.
    #[inline]
    pub fn count(&self) -> u64 {
        match self {
            Dimension::Range(range) => range.count(),
            Dimension::Explicit(list) => list.count(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[inline]
    pub fn is_explicit(&self) -> bool {
        matches!(self, Dimension::Explicit(_))
    }

    pub fn contains(&self, index: DimensionIndex) -> bool {
        match self {
            Dimension::Range(range) => range.contains(index),
            Dimension::Explicit(list) => list.contains(index),
        }
    }

    /// Smallest and largest selected position, `None` when empty.
    pub fn bounds(&self) -> Option<(DimensionIndex, DimensionIndex)> {
        match self {
            Dimension::Range(range) if !range.is_empty() => Some((range.min(), range.max())),
            Dimension::Range(_) => None,
            Dimension::Explicit(list) => {
                let indices = list.indices();
                Some((*indices.first()?, *indices.last()?))
            }
        }
    }

    pub fn iter(&self) -> DimensionIter<'_> {
        match self {
            Dimension::Range(range) => DimensionIter::Range(range.iter()),
            Dimension::Explicit(list) => DimensionIter::Explicit(list.indices().iter()),
        }
    }

    /// Keep only the positions inside `[lo, hi]`.
    pub fn restrict(&self, lo: DimensionIndex, hi: DimensionIndex) -> Dimension {
        match self {
            Dimension::Range(range) => Dimension::Range(range.restrict(lo, hi)),
            Dimension::Explicit(list) => Dimension::Explicit(list.restrict(lo, hi)),
        }
    }

    /// Keep only the positions outside `[lo, hi]`.
    ///
    /// A range stays a range when the excluded interval touches at most one of
    /// its ends; excluding an interior interval produces the explicit form.
    pub fn exclude(&self, lo: DimensionIndex, hi: DimensionIndex) -> Dimension {
        match self {
            Dimension::Explicit(list) => Dimension::Explicit(list.exclude(lo, hi)),
            Dimension::Range(range) => {
                if range.is_empty() || lo > hi || hi < range.min() || lo > range.max() {
                    return self.clone();
                }
                let covers_low_end = lo <= range.min();
                let covers_high_end = hi >= range.max();
                match (covers_low_end, covers_high_end) {
                    (true, true) => Dimension::empty(),
                    (true, false) => Dimension::Range(range.restrict(hi + 1, range.max())),
                    (false, true) => Dimension::Range(range.restrict(range.min(), lo - 1)),
                    (false, false) => Dimension::Explicit(IndexList {
                        indices: range.iter().filter(|&idx| idx < lo || idx > hi).collect(),
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Range(range) => write!(f, "{range}"),
            Dimension::Explicit(list) => write!(f, "{:?}", list.indices()),
        }
    }
}

/// Iterator over the selected positions of a [`Dimension`], in increasing order.
#[derive(Clone, Debug)]
pub enum DimensionIter<'a> {
    Range(RangeIter),
    Explicit(std::slice::Iter<'a, DimensionIndex>),
}

impl Iterator for DimensionIter<'_> {
    type Item = DimensionIndex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            DimensionIter::Range(iter) => iter.next(),
            DimensionIter::Explicit(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            DimensionIter::Range(iter) => iter.size_hint(),
            DimensionIter::Explicit(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for DimensionIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(dim: &Dimension) -> Vec<u64> {
        dim.iter().collect()
    }

    #[test]
    fn range_snaps_max_onto_grid() {
        let range = IndexRange::new(1, 10, 3);
        assert_eq!(range.max(), 10);
        assert_eq!(range.count(), 4);
        let range = IndexRange::new(1, 9, 3);
        assert_eq!(range.max(), 7);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![1, 4, 7]);
    }

    #[test]
    fn restrict_keeps_stride_phase() {
        let dim = Dimension::range(1, 13, 3);
        assert_eq!(collect(&dim.restrict(2, 11)), vec![4, 7, 10]);
        assert!(dim.restrict(14, 20).is_empty());
        assert!(dim.restrict(5, 6).is_empty());
    }

    #[test]
    fn restrict_explicit_filters_values() {
        let dim = Dimension::explicit(vec![9, 1, 4, 4]);
        assert_eq!(collect(&dim), vec![1, 4, 9]);
        assert_eq!(collect(&dim.restrict(2, 9)), vec![4, 9]);
        assert!(dim.restrict(5, 3).is_empty());
    }

    #[test]
    fn excluding_an_end_point_stays_a_range() {
        let dim = Dimension::full(5);
        let trimmed = dim.exclude(0, 0);
        assert!(!trimmed.is_explicit());
        assert_eq!(collect(&trimmed), vec![1, 2, 3, 4]);
        let trimmed = dim.exclude(4, 4);
        assert!(!trimmed.is_explicit());
        assert_eq!(collect(&trimmed), vec![0, 1, 2, 3]);
    }

    #[test]
    fn excluding_interior_point_goes_explicit() {
        let dim = Dimension::full(5).exclude(2, 2);
        assert!(dim.is_explicit());
        assert_eq!(dim.count(), 4);
        assert_eq!(collect(&dim), vec![0, 1, 3, 4]);
    }

    #[test]
    fn excluding_everything_empties() {
        let dim = Dimension::range(0, 0, 1).exclude(0, 0);
        assert!(dim.is_empty());
        assert_eq!(dim.bounds(), None);
    }

    #[test]
    fn excluding_outside_point_is_a_no_op() {
        let dim = Dimension::range(2, 6, 2);
        assert_eq!(dim.exclude(3, 3), dim);
        assert_eq!(dim.exclude(9, 9), dim);
    }

    #[test]
    fn explicit_exclude_compares_values_not_positions() {
        // Position 1 holds index 5; excluding index 1 must not drop it.
        let dim = Dimension::explicit(vec![0, 5, 7]);
        assert_eq!(collect(&dim.exclude(1, 1)), vec![0, 5, 7]);
        assert_eq!(collect(&dim.exclude(5, 5)), vec![0, 7]);
    }
}
