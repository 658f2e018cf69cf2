//! Array and candidate descriptors.
//!
//! An [`ArrayDescriptor`] is the catalog-level description of a dense array:
//! its ordered dimensions, each with a value domain and a full index domain.
//! A [`CandidateDescriptor`] has one [`Dimension`] per array dimension and
//! selects the cross product of those index sets.
//!
//! Candidate dimensions are reference counted. A fresh candidate descriptor
//! aliases the array's own index domains and a narrowing operator replaces
//! only the dimension it touched, so untouched axes are never copied.

use std::fmt;
use std::sync::Arc;

use arrow::datatypes::DataType;
use sciql_result::{Error, Result as SciqlResult};

use crate::dimension::Dimension;
use crate::domain::{DimensionDomain, ValueDomain};
use crate::literal::Literal;
use crate::native::DimensionNative;

/// One axis of an array.
#[derive(Clone, Debug)]
pub struct ArrayDimension {
    domain: DimensionDomain,
    index: Arc<Dimension>,
}

impl ArrayDimension {
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        start: impl Into<Literal>,
        step: impl Into<Literal>,
        count: u64,
    ) -> SciqlResult<Self> {
        Ok(Self::from_domain(DimensionDomain::new(
            name, data_type, start, step, count,
        )?))
    }

    /// Axis covering the inclusive value interval `[min, max]`.
    pub fn from_bounds(
        name: impl Into<String>,
        data_type: DataType,
        min: impl Into<Literal>,
        step: impl Into<Literal>,
        max: impl Into<Literal>,
    ) -> SciqlResult<Self> {
        Ok(Self::from_domain(DimensionDomain::from_bounds(
            name, data_type, min, step, max,
        )?))
    }

    pub fn from_domain(domain: DimensionDomain) -> Self {
        let index = Arc::new(Dimension::full(domain.count()));
        Self { domain, index }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.domain.name()
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        self.domain.data_type()
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.domain.count()
    }

    #[inline]
    pub fn domain(&self) -> &DimensionDomain {
        &self.domain
    }

    /// The full index domain `[0 : 1 : count - 1]`.
    #[inline]
    pub fn index(&self) -> &Arc<Dimension> {
        &self.index
    }
}

/// Shape and value domains of a dense array.
#[derive(Clone, Debug)]
pub struct ArrayDescriptor {
    dims: Vec<ArrayDimension>,
    cell_count: u64,
}

impl ArrayDescriptor {
    /// Build a descriptor; fails when the total cell count overflows `u64`.
    pub fn new(dims: Vec<ArrayDimension>) -> SciqlResult<Self> {
        if dims.is_empty() {
            return Err(Error::InvalidArgumentError(
                "an array needs at least one dimension".into(),
            ));
        }
        let cell_count = dims.iter().try_fold(1u64, |acc, dim| {
            acc.checked_mul(dim.count()).ok_or_else(|| {
                Error::allocation(format!(
                    "cell count of array overflows at dimension '{}'",
                    dim.name()
                ))
            })
        })?;
        Ok(Self { dims, cell_count })
    }

    #[inline]
    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dimensions(&self) -> &[ArrayDimension] {
        &self.dims
    }

    pub fn dimension(&self, dim_num: usize) -> SciqlResult<&ArrayDimension> {
        self.dims.get(dim_num).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "dimension {dim_num} out of range for a {}-dimensional array",
                self.dims.len()
            ))
        })
    }

    /// Product of the counts of all dimensions.
    #[inline]
    pub fn cell_count(&self) -> u64 {
        self.cell_count
    }

    /// Distance in flat cell ids between consecutive indices of `dim_num`:
    /// the product of the counts of all lower dimensions.
    pub fn jump_size(&self, dim_num: usize) -> u64 {
        self.dims[..dim_num.min(self.dims.len())]
            .iter()
            .map(ArrayDimension::count)
            .product()
    }

    /// Handle describing one dimension for predicate evaluation.
    pub fn analytic(&self, dim_num: usize) -> SciqlResult<AnalyticDimension> {
        let dim = self.dimension(dim_num)?;
        Ok(AnalyticDimension {
            dim_num,
            domain: dim.domain.clone(),
        })
    }

    /// Candidates covering every cell. The dimensions alias the array's own
    /// index domains.
    pub fn full_candidates(&self) -> CandidateDescriptor {
        CandidateDescriptor {
            dims: self.dims.iter().map(|d| Arc::clone(&d.index)).collect(),
        }
    }

    /// Check that a candidate descriptor addresses only cells of this array.
    pub fn check_candidates(&self, candidates: &CandidateDescriptor) -> SciqlResult<()> {
        if candidates.ndims() != self.ndims() {
            return Err(Error::InvalidArgumentError(format!(
                "candidate descriptor has {} dimensions, array has {}",
                candidates.ndims(),
                self.ndims()
            )));
        }
        for (d, (cand, dim)) in candidates.dims.iter().zip(&self.dims).enumerate() {
            if let Some((_, max)) = cand.bounds()
                && max >= dim.count()
            {
                return Err(Error::InvalidArgumentError(format!(
                    "candidate index {max} out of range for dimension {d} of size {}",
                    dim.count()
                )));
            }
        }
        Ok(())
    }
}

/// Reference to one dimension of an array, carrying its value domain.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticDimension {
    dim_num: usize,
    domain: DimensionDomain,
}

impl AnalyticDimension {
    #[inline]
    pub fn dim_num(&self) -> usize {
        self.dim_num
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        self.domain.data_type()
    }

    #[inline]
    pub fn domain(&self) -> &DimensionDomain {
        &self.domain
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.domain.count()
    }

    pub fn typed<N: DimensionNative>(&self) -> SciqlResult<ValueDomain<N>> {
        self.domain.typed()
    }
}

/// Cross product of per-dimension index sets.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateDescriptor {
    dims: Vec<Arc<Dimension>>,
}

impl CandidateDescriptor {
    pub fn new(dims: Vec<Dimension>) -> Self {
        Self {
            dims: dims.into_iter().map(Arc::new).collect(),
        }
    }

    #[inline]
    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    pub fn dimension(&self, dim_num: usize) -> SciqlResult<&Dimension> {
        self.dims.get(dim_num).map(Arc::as_ref).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "dimension {dim_num} out of range for a {}-dimensional candidate set",
                self.dims.len()
            ))
        })
    }

    pub fn dimensions(&self) -> impl ExactSizeIterator<Item = &Dimension> + '_ {
        self.dims.iter().map(Arc::as_ref)
    }

    /// Number of selected cells. Bounded by the array's cell count, which is
    /// checked at construction.
    pub fn cell_count(&self) -> u64 {
        self.dims
            .iter()
            .fold(1u64, |acc, d| acc.saturating_mul(d.count()))
    }

    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|d| d.is_empty())
    }

    /// Replace dimension `dim_num`, leaving the others shared.
    pub fn replace(&mut self, dim_num: usize, dimension: Dimension) -> SciqlResult<()> {
        let ndims = self.dims.len();
        let slot = self.dims.get_mut(dim_num).ok_or_else(|| {
            Error::InvalidArgumentError(format!(
                "dimension {dim_num} out of range for a {ndims}-dimensional candidate set"
            ))
        })?;
        *slot = Arc::new(dimension);
        Ok(())
    }

    /// Returns `true` when dimension `dim_num` still aliases the array's own
    /// index domain.
    pub fn shares_index_with(&self, array: &ArrayDescriptor, dim_num: usize) -> bool {
        match (self.dims.get(dim_num), array.dims.get(dim_num)) {
            (Some(cand), Some(dim)) => Arc::ptr_eq(cand, &dim.index),
            _ => false,
        }
    }
}

impl fmt::Display for CandidateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(" x ")?;
            }
            write!(f, "{dim}")?;
        }
        Ok(())
    }
}

/// Result of a narrowing operator.
///
/// An empty selection is reported as [`Candidates::Empty`]; the descriptor
/// that produced it has been dropped by then.
#[derive(Clone, Debug, PartialEq)]
pub enum Candidates {
    Empty,
    Cells(CandidateDescriptor),
}

impl Candidates {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Candidates::Empty)
    }

    pub fn cell_count(&self) -> u64 {
        match self {
            Candidates::Empty => 0,
            Candidates::Cells(desc) => desc.cell_count(),
        }
    }

    pub fn as_descriptor(&self) -> Option<&CandidateDescriptor> {
        match self {
            Candidates::Empty => None,
            Candidates::Cells(desc) => Some(desc),
        }
    }

    pub fn into_descriptor(self) -> Option<CandidateDescriptor> {
        match self {
            Candidates::Empty => None,
            Candidates::Cells(desc) => Some(desc),
        }
    }
}

impl From<CandidateDescriptor> for Candidates {
    /// Collapses a descriptor with any empty dimension to `Empty`.
    fn from(desc: CandidateDescriptor) -> Self {
        if desc.is_empty() {
            Candidates::Empty
        } else {
            Candidates::Cells(desc)
        }
    }
}
