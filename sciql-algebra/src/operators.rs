//! Handle-based entry points for the query-execution layer.
//!
//! [`ArrayOperators`] resolves column handles through a [`ColumnCatalog`],
//! runs the corresponding engine and registers every produced column under a
//! fresh handle. Descriptors are passed by reference; candidate sets are
//! passed by value so that a chain of selections can hand its state along.

use std::sync::Arc;

use arrow::array::{ArrayRef, AsArray, UInt64Array};
use arrow::datatypes::{DataType, UInt64Type};
use sciql_result::{Error, Result};
use sciql_storage::ColumnCatalog;
use sciql_types::{
    AnalyticDimension, ArrayDescriptor, Candidates, ColumnId, Literal, RangePredicate, ThetaOp,
};

use crate::options::AlgebraOptions;
use crate::{dense, flatten, join, mbr, projection, selection};

pub struct ArrayOperators<'a> {
    catalog: &'a ColumnCatalog,
    options: AlgebraOptions,
}

impl<'a> ArrayOperators<'a> {
    pub fn new(catalog: &'a ColumnCatalog) -> Self {
        Self::with_options(catalog, AlgebraOptions::default())
    }

    pub fn with_options(catalog: &'a ColumnCatalog, options: AlgebraOptions) -> Self {
        Self { catalog, options }
    }

    pub fn options(&self) -> &AlgebraOptions {
        &self.options
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        self.catalog
    }

    pub fn cell_count(&self, array: &ArrayDescriptor) -> u64 {
        array.cell_count()
    }

    pub fn dimension_select(
        &self,
        prior: Option<Candidates>,
        array: &ArrayDescriptor,
        dimension: &AnalyticDimension,
        predicate: &RangePredicate,
    ) -> Result<Candidates> {
        selection::select_dimension(prior, array, dimension, predicate)
    }

    pub fn dimension_theta_select(
        &self,
        prior: Option<Candidates>,
        array: &ArrayDescriptor,
        dimension: &AnalyticDimension,
        value: impl Into<Literal>,
        op: &str,
    ) -> Result<Candidates> {
        selection::theta_select_dimension(prior, array, dimension, value, op)
    }

    /// Range select over a value column, optionally restricted to the cells
    /// listed in `candidate_ids`. `candidates` is handed back unchanged.
    pub fn non_dimension_select(
        &self,
        values: ColumnId,
        candidate_ids: Option<ColumnId>,
        candidates: Option<Candidates>,
        predicate: &RangePredicate,
    ) -> Result<(ColumnId, Option<Candidates>)> {
        let column = self.catalog.get(values)?;
        let ids = candidate_ids.map(|id| self.id_column(id)).transpose()?;
        let (selected, candidates) =
            selection::select_values(&column, ids.as_ref(), candidates, predicate)?;
        Ok((self.catalog.register(Arc::new(selected))?, candidates))
    }

    pub fn non_dimension_theta_select(
        &self,
        values: ColumnId,
        candidate_ids: Option<ColumnId>,
        candidates: Option<Candidates>,
        value: impl Into<Literal>,
        op: &str,
    ) -> Result<(ColumnId, Option<Candidates>)> {
        let op: ThetaOp = op.parse()?;
        self.non_dimension_select(
            values,
            candidate_ids,
            candidates,
            &RangePredicate::theta(op, value),
        )
    }

    /// Flat identifiers of the selected cells.
    pub fn materialise(&self, candidates: &Candidates, array: &ArrayDescriptor) -> Result<ColumnId> {
        let ids = flatten::materialise(candidates, array, &self.options)?;
        self.catalog.register(Arc::new(ids))
    }

    /// Coordinate values of dimension `dim_num` over `candidates`, or over the
    /// whole array when `None`.
    pub fn project_dimension(
        &self,
        candidates: Option<&Candidates>,
        array: &ArrayDescriptor,
        dim_num: usize,
    ) -> Result<ColumnId> {
        let column = match candidates {
            Some(candidates) => {
                projection::regenerate_dimension(candidates, array, dim_num, &self.options)?
            }
            None => projection::project_whole_dimension(array, dim_num, &self.options)?,
        };
        self.catalog.register(column)
    }

    /// Gather a value column at the cells listed in `ids`.
    pub fn project_non_dimension(&self, ids: ColumnId, values: ColumnId) -> Result<ColumnId> {
        let ids = self.id_column(ids)?;
        let column = self.catalog.get(values)?;
        let projected = projection::project_values(&ids, &column)?;
        self.catalog.register(projected)
    }

    /// The whole value column under a new handle.
    pub fn pass_non_dimension(&self, values: ColumnId) -> Result<ColumnId> {
        let column = self.catalog.get(values)?;
        self.catalog.register(column)
    }

    /// A value column extended with nulls to cover every cell of `array`.
    pub fn pad_non_dimension(&self, values: ColumnId, array: &ArrayDescriptor) -> Result<ColumnId> {
        let column = self.catalog.get(values)?;
        let padded = projection::pad_to_shape(&column, array, &self.options)?;
        self.catalog.register(padded)
    }

    pub fn bounding_range(
        &self,
        ids: Option<ColumnId>,
        candidates: Option<&Candidates>,
        array: &ArrayDescriptor,
    ) -> Result<Candidates> {
        let ids = match candidates {
            Some(_) => None,
            None => ids.map(|id| self.id_column(id)).transpose()?,
        };
        mbr::bounding_range_of(ids.as_ref(), candidates, array)
    }

    pub fn outer_join(&self, left: ColumnId, right: ColumnId) -> Result<ColumnId> {
        let joined = sciql_storage::outer_join_ids(&self.id_column(left)?, &self.id_column(right)?)?;
        self.catalog.register(Arc::new(joined))
    }

    pub fn subjoin_ids(&self, left: ColumnId, right: ColumnId) -> Result<ColumnId> {
        let joined = sciql_storage::subjoin(&self.id_column(left)?, &self.id_column(right)?)?;
        self.catalog.register(Arc::new(joined))
    }

    pub fn dimension_subjoin(
        &self,
        left_candidates: Option<Candidates>,
        left_array: &ArrayDescriptor,
        left: &AnalyticDimension,
        right_candidates: Option<Candidates>,
        right_array: &ArrayDescriptor,
        right: &AnalyticDimension,
    ) -> Result<(Candidates, Candidates)> {
        join::subjoin_dimensions(
            left_candidates,
            left_array,
            left,
            right_candidates,
            right_array,
            right,
        )
    }

    /// Orthonormal factor of a two-dimensional array's values.
    pub fn qr(&self, values: ColumnId, array: &ArrayDescriptor) -> Result<ColumnId> {
        let column = self.catalog.get(values)?;
        let q = dense::qr(&column, array, &self.options)?;
        self.catalog.register(q)
    }

    fn id_column(&self, id: ColumnId) -> Result<UInt64Array> {
        let column: ArrayRef = self.catalog.get(id)?;
        if column.data_type() != &DataType::UInt64 {
            return Err(Error::InvalidArgumentError(format!(
                "column {id} holds {} values, expected cell identifiers",
                column.data_type()
            )));
        }
        Ok(column.as_primitive::<UInt64Type>().clone())
    }
}
