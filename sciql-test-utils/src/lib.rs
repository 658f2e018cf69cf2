use std::sync::Once;

use arrow::datatypes::DataType;
use sciql_types::{ArrayDescriptor, ArrayDimension};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let env = std::env::var("RUST_LOG").ok();
        let filter = match env {
            Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            None => EnvFilter::new("info"),
        };
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

/// `Int64` array whose dimension `d` has coordinates `start + i * step` for
/// `i in 0..count`, taken from `shape[d] = (start, step, count)`. Dimensions
/// are named `d0`, `d1`, ...
///
/// Panics on an invalid shape; meant for fixtures only.
pub fn int_array(shape: &[(i64, i64, u64)]) -> ArrayDescriptor {
    let dims = shape
        .iter()
        .enumerate()
        .map(|(d, &(start, step, count))| {
            ArrayDimension::new(format!("d{d}"), DataType::Int64, start, step, count)
                .expect("fixture dimension")
        })
        .collect();
    ArrayDescriptor::new(dims).expect("fixture array")
}

/// Zero-origin, unit-step `Int64` array with the given per-dimension counts.
pub fn unit_array(counts: &[u64]) -> ArrayDescriptor {
    let shape: Vec<_> = counts.iter().map(|&count| (0, 1, count)).collect();
    int_array(&shape)
}
