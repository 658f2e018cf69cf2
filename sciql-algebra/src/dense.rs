//! QR decomposition of two-dimensional arrays.
//!
//! A `rows x cols` array is stored with dimension 0 (the row index) varying
//! fastest, so cell `(r, c)` lives at flat position `r + c * rows` and every
//! matrix column is a contiguous slice of the backing column.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use sciql_result::{Error, Result};
use sciql_types::ArrayDescriptor;

use crate::options::AlgebraOptions;

/// `Q` and `R` factors of a `rows x cols` matrix.
///
/// `q` is stored like the input (column after column). `r` is `cols x cols`,
/// upper triangular, also column after column: `R[j][k]` is at `j + k * cols`.
#[derive(Clone, Debug, PartialEq)]
pub struct QrDecomposition {
    pub rows: usize,
    pub cols: usize,
    pub q: Vec<f64>,
    pub r: Vec<f64>,
}

impl QrDecomposition {
    #[inline]
    pub fn q_at(&self, row: usize, col: usize) -> f64 {
        self.q[row + col * self.rows]
    }

    #[inline]
    pub fn r_at(&self, row: usize, col: usize) -> f64 {
        self.r[row + col * self.cols]
    }
}

/// Gram-Schmidt QR of a matrix laid out column after column.
///
/// Column `j` is normalised into `Q[:, j]` and then projected out of every
/// later column. A residual norm at or below `tolerance` means the columns are
/// linearly dependent and fails with `DegenerateMatrix`.
pub fn qr_decompose(
    values: &[f64],
    rows: usize,
    cols: usize,
    tolerance: f64,
) -> Result<QrDecomposition> {
    if rows == 0 || cols == 0 {
        return Err(Error::DegenerateMatrix(format!(
            "cannot factor a {rows}x{cols} matrix"
        )));
    }
    if values.len() != rows * cols {
        return Err(Error::InvalidArgumentError(format!(
            "{} values do not form a {rows}x{cols} matrix",
            values.len()
        )));
    }

    let mut q = values.to_vec();
    let mut r = vec![0.0; cols * cols];
    for j in 0..cols {
        let norm = q[j * rows..(j + 1) * rows]
            .iter()
            .map(|v| v * v)
            .sum::<f64>()
            .sqrt();
        if norm <= tolerance {
            tracing::warn!(column = j, norm, "zero-norm column in QR input");
            return Err(Error::DegenerateMatrix(format!(
                "column {j} is linearly dependent on the previous columns"
            )));
        }
        r[j + j * cols] = norm;
        for v in &mut q[j * rows..(j + 1) * rows] {
            *v /= norm;
        }

        let (done, rest) = q.split_at_mut((j + 1) * rows);
        let qj = &done[j * rows..];
        for (offset, column) in rest.chunks_exact_mut(rows).enumerate() {
            let k = j + 1 + offset;
            let dot: f64 = qj.iter().zip(column.iter()).map(|(a, b)| a * b).sum();
            r[j + k * cols] = dot;
            for (v, &basis) in column.iter_mut().zip(qj) {
                *v -= dot * basis;
            }
        }
    }
    Ok(QrDecomposition { rows, cols, q, r })
}

/// Orthonormal factor `Q` of a two-dimensional array's values, in the same
/// storage order as the input.
pub fn qr(column: &ArrayRef, array: &ArrayDescriptor, options: &AlgebraOptions) -> Result<ArrayRef> {
    if array.ndims() != 2 {
        return Err(Error::InvalidArgumentError(format!(
            "QR needs a two-dimensional array, got {} dimensions",
            array.ndims()
        )));
    }
    let rows = options.check_result_cells(array.dimensions()[0].count(), "QR rows")?;
    let cols = options.check_result_cells(array.dimensions()[1].count(), "QR columns")?;
    options.check_result_cells(array.cell_count(), "QR")?;

    let values = match column.data_type() {
        DataType::Float64 => Arc::clone(column),
        DataType::Float32 => cast(column.as_ref(), &DataType::Float64)?,
        other => return Err(Error::unsupported_type(other, "QR decomposition")),
    };
    if values.null_count() > 0 {
        return Err(Error::InvalidArgumentError(
            "QR input contains nulls".into(),
        ));
    }
    let values = values.as_primitive::<Float64Type>();

    tracing::debug!(rows, cols, "QR decomposition");
    let decomposition = qr_decompose(values.values(), rows, cols, options.qr_tolerance)?;
    Ok(Arc::new(Float64Array::from(decomposition.q)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // 3x2, columns (1, 2, 2) and (0, 3, 4)
    const MATRIX: [f64; 6] = [1.0, 2.0, 2.0, 0.0, 3.0, 4.0];

    #[test]
    fn first_column_normalised() {
        let qr = qr_decompose(&MATRIX, 3, 2, 1e-12).unwrap();
        assert_abs_diff_eq!(qr.r_at(0, 0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(qr.q_at(0, 0), 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(qr.q_at(1, 0), 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(qr.r_at(0, 1), 14.0 / 3.0, epsilon = 1e-12);
        assert_eq!(qr.r_at(1, 0), 0.0);
    }

    #[test]
    fn zero_column_is_degenerate() {
        let values = [1.0, 2.0, 3.0, 0.0, 0.0, 0.0];
        let err = qr_decompose(&values, 3, 2, 1e-12).unwrap_err();
        assert!(matches!(err, Error::DegenerateMatrix(_)));
    }

    #[test]
    fn dependent_columns_are_degenerate() {
        let values = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0];
        assert!(matches!(
            qr_decompose(&values, 3, 2, 1e-9),
            Err(Error::DegenerateMatrix(_))
        ));
    }

    #[test]
    fn empty_matrix_is_degenerate() {
        assert!(matches!(
            qr_decompose(&[], 0, 2, 1e-12),
            Err(Error::DegenerateMatrix(_))
        ));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        assert!(matches!(
            qr_decompose(&MATRIX, 2, 2, 1e-12),
            Err(Error::InvalidArgumentError(_))
        ));
    }
}
