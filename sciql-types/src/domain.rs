//! Value-domain metadata of an array dimension.
//!
//! The index-domain state of an axis lives in [`Dimension`](crate::Dimension);
//! the coordinates those indices stand for are described here by an origin, a
//! positive step and the scalar type they are stored in.

use arrow::datatypes::DataType;
use sciql_result::{Error, Result as SciqlResult};

use crate::literal::Literal;
use crate::native::{DimensionNative, is_dimension_type};
use crate::with_dimension_arrow_type;

/// Untyped value-domain description of one axis: `start + i * step` for
/// `i in 0..count`.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionDomain {
    name: String,
    data_type: DataType,
    start: Literal,
    step: Literal,
    count: u64,
}

impl DimensionDomain {
    /// Describe an axis of `count` coordinates starting at `start`.
    ///
    /// Fails when `data_type` is not a dimension scalar type, when either
    /// literal does not fit it, or when `step` is not positive.
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        start: impl Into<Literal>,
        step: impl Into<Literal>,
        count: u64,
    ) -> SciqlResult<Self> {
        let domain = Self {
            name: name.into(),
            data_type,
            start: start.into(),
            step: step.into(),
            count,
        };
        domain.validate()?;
        Ok(domain)
    }

    /// Describe an axis by its inclusive value bounds `[min, max]`.
    ///
    /// `max` does not need to lie on the step grid; the last coordinate is the
    /// largest grid point not above it. `max < min` yields an empty axis.
    pub fn from_bounds(
        name: impl Into<String>,
        data_type: DataType,
        min: impl Into<Literal>,
        step: impl Into<Literal>,
        max: impl Into<Literal>,
    ) -> SciqlResult<Self> {
        let (min, step, max) = (min.into(), step.into(), max.into());
        let count = with_dimension_arrow_type!(
            &data_type,
            |T| count_between::<<T as arrow::datatypes::ArrowPrimitiveType>::Native>(
                &min, &step, &max
            )?,
            return Err(Error::unsupported_type(&data_type, "dimension domain"))
        );
        Self::new(name, data_type, min, step, count)
    }

    fn validate(&self) -> SciqlResult<()> {
        if !is_dimension_type(&self.data_type) {
            return Err(Error::unsupported_type(&self.data_type, "dimension domain"));
        }
        with_dimension_arrow_type!(
            &self.data_type,
            |T| {
                self.typed::<<T as arrow::datatypes::ArrowPrimitiveType>::Native>()?;
            },
            ()
        );
        Ok(())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    #[inline]
    pub fn start(&self) -> &Literal {
        &self.start
    }

    #[inline]
    pub fn step(&self) -> &Literal {
        &self.step
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Instantiate the domain in its native scalar type.
    pub fn typed<N: DimensionNative>(&self) -> SciqlResult<ValueDomain<N>> {
        let start = self
            .start
            .to_native_for::<N>(&format!("dimension '{}' start", self.name))?;
        let step = self
            .step
            .to_native_for::<N>(&format!("dimension '{}' step", self.name))?;
        if !step.is_positive() {
            return Err(Error::InvalidArgumentError(format!(
                "dimension '{}' step must be positive, got {}",
                self.name, self.step
            )));
        }
        if start.is_nan() {
            return Err(Error::InvalidArgumentError(format!(
                "dimension '{}' start must be a number",
                self.name
            )));
        }
        if let Some(last) = self.count.checked_sub(1)
            && N::checked_value_at(start, step, last).is_none()
        {
            return Err(Error::InvalidArgumentError(format!(
                "dimension '{}' coordinates {} + {} * {} overflow {:?}",
                self.name, self.start, last, self.step, self.data_type
            )));
        }
        Ok(ValueDomain {
            start,
            step,
            count: self.count,
        })
    }
}

fn count_between<N: DimensionNative>(min: &Literal, step: &Literal, max: &Literal) -> SciqlResult<u64> {
    let min = min.to_native_for::<N>("dimension min")?;
    let step = step.to_native_for::<N>("dimension step")?;
    let max = max.to_native_for::<N>("dimension max")?;
    if !step.is_positive() {
        return Err(Error::InvalidArgumentError(
            "dimension step must be positive".into(),
        ));
    }
    if min.is_nan() || max.is_nan() {
        return Err(Error::InvalidArgumentError(
            "dimension bounds must be numbers".into(),
        ));
    }
    let (steps, _) = N::steps_from(max, min, step);
    if steps < 0 {
        return Ok(0);
    }
    steps
        .checked_add(1)
        .and_then(|count| u64::try_from(count).ok())
        .ok_or_else(|| Error::allocation(format!("dimension with {steps} + 1 coordinates")))
}

/// Typed value domain of one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueDomain<N> {
    pub start: N,
    pub step: N,
    pub count: u64,
}

impl<N: DimensionNative> ValueDomain<N> {
    #[inline]
    pub fn value_at(&self, index: u64) -> N {
        N::value_at(self.start, self.step, index)
    }

    /// Last coordinate of the axis, `None` when the axis is empty.
    pub fn last_value(&self) -> Option<N> {
        self.count.checked_sub(1).map(|last| self.value_at(last))
    }

    /// Index of the coordinate equal to `value`, if the value lies on the grid
    /// inside the axis.
    pub fn equal_index(&self, value: N) -> Option<u64> {
        let (steps, exact) = N::steps_from(value, self.start, self.step);
        if !exact || steps < 0 {
            return None;
        }
        let index = u64::try_from(steps).ok()?;
        (index < self.count).then_some(index)
    }

    /// First index whose coordinate is `>= value` (`> value` when not
    /// inclusive). May fall outside `0..count`.
    pub fn lower_index(&self, value: N, inclusive: bool) -> i128 {
        let (steps, exact) = N::steps_from(value, self.start, self.step);
        if exact && inclusive {
            steps
        } else {
            steps.saturating_add(1)
        }
    }

    /// Last index whose coordinate is `<= value` (`< value` when not
    /// inclusive). May fall outside `0..count`.
    pub fn upper_index(&self, value: N, inclusive: bool) -> i128 {
        let (steps, exact) = N::steps_from(value, self.start, self.step);
        if exact && !inclusive {
            steps.saturating_sub(1)
        } else {
            steps
        }
    }
}
