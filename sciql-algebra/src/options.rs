/// Limits applied by the array operators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlgebraOptions {
    /// Largest number of cells any operator may materialise in one output
    /// column. Larger requests fail with `AllocationFailure`.
    pub max_result_cells: u64,
    /// Residual norm at or below which a QR column counts as zero.
    pub qr_tolerance: f64,
}

impl Default for AlgebraOptions {
    fn default() -> Self {
        Self {
            max_result_cells: 1 << 32,
            qr_tolerance: 1e-12,
        }
    }
}

impl AlgebraOptions {
    pub fn with_max_result_cells(mut self, max_result_cells: u64) -> Self {
        self.max_result_cells = max_result_cells;
        self
    }

    pub fn with_qr_tolerance(mut self, qr_tolerance: f64) -> Self {
        self.qr_tolerance = qr_tolerance;
        self
    }

    /// Fail with `AllocationFailure` when `cells` exceeds the configured limit;
    /// otherwise return it as a buffer length.
    pub(crate) fn check_result_cells(&self, cells: u64, what: &str) -> sciql_result::Result<usize> {
        if cells > self.max_result_cells {
            return Err(sciql_result::Error::AllocationFailure(format!(
                "{what} needs {cells} cells, limit is {}",
                self.max_result_cells
            )));
        }
        usize::try_from(cells).map_err(sciql_result::Error::allocation)
    }
}
