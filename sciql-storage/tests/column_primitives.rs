use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Int64Array, UInt64Array};
use arrow::datatypes::Int64Type;
use sciql_result::Error;
use sciql_storage::{ColumnCatalog, outer_join_ids, pad_to_length, project, select_range, subjoin};
use sciql_test_utils::init_tracing_for_tests;
use sciql_types::{RangePredicate, ThetaOp};

#[test]
fn select_then_project_through_catalog() {
    init_tracing_for_tests();
    let catalog = ColumnCatalog::new();
    let values: ArrayRef = Arc::new(Int64Array::from(vec![7, -2, 11, 4, 7, 0]));
    let handle = catalog.register(values).unwrap();

    let column = catalog.get(handle).unwrap();
    let ids = select_range(&column, None, &RangePredicate::theta(ThetaOp::Eq, 7)).unwrap();
    assert_eq!(ids.values(), &[0, 4]);

    let gathered = project(&ids, &column).unwrap();
    assert_eq!(gathered.as_primitive::<Int64Type>().values(), &[7, 7]);

    let out = catalog.register(gathered).unwrap();
    assert_eq!(catalog.get(out).unwrap().len(), 2);
    assert!(matches!(catalog.get(out + 100), Err(Error::MissingObject(_))));
}

#[test]
fn dimensional_and_value_candidates_intersect() {
    init_tracing_for_tests();
    let column: ArrayRef = Arc::new(Int64Array::from_iter_values(0..12));
    let by_value = select_range(&column, None, &RangePredicate::theta(ThetaOp::GtEq, 5)).unwrap();
    let by_dimension = UInt64Array::from(vec![1, 4, 7, 10]);

    assert_eq!(subjoin(&by_dimension, &by_value).unwrap().values(), &[7, 10]);

    let outer = outer_join_ids(&by_dimension, &by_value).unwrap();
    assert_eq!(outer.len(), by_dimension.len());
    assert_eq!(outer.null_count(), 2);
}

#[test]
fn padding_fills_new_cells_with_nulls() {
    init_tracing_for_tests();
    let column: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
    let padded = pad_to_length(&column, 6).unwrap();
    assert_eq!(padded.len(), 6);
    assert!((3..6).all(|i| padded.is_null(i)));
    assert!((0..3).all(|i| padded.is_valid(i)));
}
