use std::sync::Arc;

use arrow::datatypes::DataType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sciql_result::Error;
use sciql_types::{
    ArrayDescriptor, ArrayDimension, Candidates, Dimension, DimensionDomain, Literal,
};

#[test]
fn analytic_handles_carry_value_domain() {
    let array = ArrayDescriptor::new(vec![
        ArrayDimension::from_bounds("lat", DataType::Float32, -90.0, 0.5, 90.0).unwrap(),
        ArrayDimension::new("t", DataType::UInt16, 1000u16, 7u16, 12).unwrap(),
    ])
    .unwrap();
    assert_eq!(array.dimensions()[0].count(), 361);

    let t = array.analytic(1).unwrap();
    assert_eq!(t.dim_num(), 1);
    assert_eq!(t.data_type(), &DataType::UInt16);
    let domain = t.typed::<u16>().unwrap();
    assert_eq!(domain.value_at(11), 1077);
    assert_eq!(domain.equal_index(1014), Some(2));

    assert!(matches!(
        array.analytic(2),
        Err(Error::InvalidArgumentError(_))
    ));
}

#[test]
fn literal_outside_type_is_rejected() {
    let err = DimensionDomain::new("x", DataType::Int8, 0, 200, 3).unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(_)));
    let err = DimensionDomain::new("x", DataType::UInt32, Literal::Null, 1, 3).unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(_)));
}

#[test]
fn narrowing_copies_only_the_touched_dimension() {
    let array = ArrayDescriptor::new(vec![
        ArrayDimension::new("a", DataType::Int64, 0, 1, 5).unwrap(),
        ArrayDimension::new("b", DataType::Int64, 0, 1, 5).unwrap(),
        ArrayDimension::new("c", DataType::Int64, 0, 1, 5).unwrap(),
    ])
    .unwrap();
    let mut cand = array.full_candidates();
    let narrowed = cand.dimension(1).unwrap().exclude(2, 2);
    cand.replace(1, narrowed).unwrap();

    assert!(cand.shares_index_with(&array, 0));
    assert!(!cand.shares_index_with(&array, 1));
    assert!(cand.shares_index_with(&array, 2));
    assert_eq!(Arc::strong_count(array.dimensions()[1].index()), 1);
    assert_eq!(cand.cell_count(), 100);

    drop(cand);
    assert!(
        array
            .dimensions()
            .iter()
            .all(|d| Arc::strong_count(d.index()) == 1)
    );
}

#[test]
fn restrict_and_exclude_partition_a_dimension() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..300 {
        let count = rng.gen_range(1..40u64);
        let dim = if rng.gen_bool(0.5) {
            Dimension::range(rng.gen_range(0..count), count - 1, rng.gen_range(1..5))
        } else {
            Dimension::explicit((0..count).filter(|_| rng.gen_bool(0.5)).collect())
        };
        let lo = rng.gen_range(0..count);
        let hi = rng.gen_range(lo..count);

        let inside = dim.restrict(lo, hi);
        let outside = dim.exclude(lo, hi);
        assert_eq!(inside.count() + outside.count(), dim.count());
        assert!(inside.iter().all(|i| (lo..=hi).contains(&i) && dim.contains(i)));
        assert!(outside.iter().all(|i| !(lo..=hi).contains(&i) && dim.contains(i)));
    }
}

#[test]
fn candidates_collapse_when_any_dimension_is_empty() {
    let array = ArrayDescriptor::new(vec![
        ArrayDimension::new("a", DataType::Int32, 0, 1, 3).unwrap(),
        ArrayDimension::new("b", DataType::Int32, 0, 1, 3).unwrap(),
    ])
    .unwrap();
    let mut cand = array.full_candidates();
    cand.replace(0, Dimension::explicit(Vec::new())).unwrap();
    let collapsed = Candidates::from(cand);
    assert!(collapsed.is_empty());
    assert_eq!(collapsed.cell_count(), 0);
    assert!(collapsed.into_descriptor().is_none());
}
