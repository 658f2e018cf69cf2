//! End-to-end use of the public surface.

use std::sync::Arc;

use arrow::array::{Array, AsArray, Int64Array};
use arrow::datatypes::{DataType, Int64Type, UInt64Type};
use sciql::{
    ArrayDescriptor, ArrayDimension, ArrayOperators, Candidates, ColumnCatalog, Error,
    RangePredicate,
};
use sciql_test_utils::init_tracing_for_tests;

#[test]
fn slice_of_a_cube() {
    init_tracing_for_tests();
    let array = ArrayDescriptor::new(vec![
        ArrayDimension::from_bounds("x", DataType::Int64, 0, 1, 3).unwrap(),
        ArrayDimension::from_bounds("y", DataType::Int64, 0, 1, 3).unwrap(),
        ArrayDimension::from_bounds("z", DataType::Int64, 0, 1, 3).unwrap(),
    ])
    .unwrap();
    assert_eq!(array.cell_count(), 64);

    let catalog = ColumnCatalog::new();
    let ops = ArrayOperators::new(&catalog);
    let payload = catalog
        .register(Arc::new(Int64Array::from_iter_values(0..64)))
        .unwrap();

    let z = array.analytic(2).unwrap();
    let x = array.analytic(0).unwrap();
    let cand = ops.dimension_theta_select(None, &array, &z, 1, "=").unwrap();
    let cand = ops
        .dimension_select(Some(cand), &array, &x, &RangePredicate::between(1, 2).negated())
        .unwrap();
    assert_eq!(cand.cell_count(), 8);

    let ids = ops.materialise(&cand, &array).unwrap();
    let values = catalog.get(ops.project_non_dimension(ids, payload).unwrap()).unwrap();
    let zs = catalog.get(ops.project_dimension(Some(&cand), &array, 2).unwrap()).unwrap();
    let xs = catalog.get(ops.project_dimension(Some(&cand), &array, 0).unwrap()).unwrap();

    let values = values.as_primitive::<Int64Type>();
    let zs = zs.as_primitive::<Int64Type>();
    let xs = xs.as_primitive::<Int64Type>();
    for row in 0..values.len() {
        assert_eq!(zs.value(row), 1);
        assert!(xs.value(row) == 0 || xs.value(row) == 3);
        assert_eq!(values.value(row) % 4, xs.value(row));
        assert_eq!(values.value(row) / 16, 1);
    }

    let id_values = catalog.get(ids).unwrap();
    assert!(id_values.as_primitive::<UInt64Type>().values().is_sorted());
}

#[test]
fn chain_stops_at_empty() {
    init_tracing_for_tests();
    let array = ArrayDescriptor::new(vec![
        ArrayDimension::new("x", DataType::Int64, 0, 1, 4).unwrap(),
    ])
    .unwrap();
    let catalog = ColumnCatalog::new();
    let ops = ArrayOperators::new(&catalog);
    let x = array.analytic(0).unwrap();

    let cand = ops.dimension_theta_select(None, &array, &x, 10, ">").unwrap();
    assert_eq!(cand, Candidates::Empty);
    let ids = catalog.get(ops.materialise(&cand, &array).unwrap()).unwrap();
    assert_eq!(ids.len(), 0);

    assert!(matches!(
        ops.dimension_theta_select(Some(cand), &array, &x, 1, "like"),
        Err(Error::UnsupportedOperator(_))
    ));
}
