mod common;

use std::collections::BTreeSet;

use common::{dataset, num, text};
use csv_reconcile::{
    Comparator, ComparisonResult, ReconcileError, analyze, data::Value, dataset::Cell,
};
use proptest::prelude::*;

fn set(values: &[&str]) -> BTreeSet<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

#[test]
fn field_result_values_are_split_three_ways() {
    let left = dataset(
        &["city"],
        vec![vec![text("Oslo")], vec![text("Rome")], vec![None]],
    );
    let right = dataset(
        &["City"],
        vec![vec![text("Rome")], vec![text("Lima")], vec![text("Rome")]],
    );
    let result = Comparator::default().compare(&left, &right, None).unwrap();
    let analysis = analyze(&result, "city").unwrap();

    assert_eq!(analysis.common_values, set(&["Rome"]));
    assert_eq!(analysis.unique_to_a, set(&["Oslo"]));
    assert_eq!(analysis.unique_to_b, set(&["Lima"]));
    assert_eq!(analysis.total_common(), 1);
}

#[test]
fn keyed_result_analyses_only_common_rows() {
    let left = dataset(
        &["id", "status"],
        vec![
            vec![num(1.0), text("open")],
            vec![num(2.0), text("closed")],
            vec![num(3.0), text("stale")],
        ],
    );
    let right = dataset(
        &["id", "status"],
        vec![vec![num(1.0), text("open")], vec![num(2.0), text("reopened")]],
    );
    let result = Comparator::default()
        .compare(&left, &right, Some(("id", "id")))
        .unwrap();
    let analysis = analyze(&result, "status").unwrap();

    assert_eq!(analysis.common_values, set(&["open"]));
    assert_eq!(analysis.unique_to_a, set(&["closed"]));
    assert_eq!(analysis.unique_to_b, set(&["reopened"]));
}

#[test]
fn numbers_and_missing_cells() {
    let left = dataset(&["qty"], vec![vec![num(1.0)], vec![num(2.0)], vec![None]]);
    let right = dataset(&["qty"], vec![vec![num(2.0)], vec![None]]);
    let result = Comparator::default().compare(&left, &right, None).unwrap();
    let analysis = analyze(&result, "qty").unwrap();
    assert_eq!(
        analysis.common_values,
        BTreeSet::from([Value::Number(2.0)])
    );
    assert_eq!(analysis.unique_to_a, BTreeSet::from([Value::Number(1.0)]));
    assert!(analysis.unique_to_b.is_empty());
}

#[test]
fn unknown_field_is_an_error() {
    let left = dataset(&["id"], vec![vec![num(1.0)]]);
    let result = Comparator::default().compare(&left, &left, None).unwrap();
    assert_eq!(
        analyze(&result, "nope").unwrap_err(),
        ReconcileError::FieldNotFound {
            field: "nope".into()
        }
    );
}

#[test]
fn empty_field_result_has_no_fields_to_analyse() {
    let left = dataset(&["alpha"], vec![vec![num(1.0)]]);
    let right = dataset(&["zzz"], vec![vec![num(1.0)]]);
    let result = Comparator::default().compare(&left, &right, None).unwrap();
    assert!(matches!(result, ComparisonResult::Fields(ref f) if f.common_fields.is_empty()));
    assert!(analyze(&result, "alpha").is_err());
}

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(None),
        (0i64..6).prop_map(|n| Some(Value::from(n))),
        "[a-c]".prop_map(|s| Some(Value::Text(s))),
    ]
}

proptest! {
    #[test]
    fn analysis_partitions_the_union(
        left_cells in proptest::collection::vec(cell_strategy(), 0..12),
        right_cells in proptest::collection::vec(cell_strategy(), 0..12),
    ) {
        let left = dataset(&["v"], left_cells.iter().cloned().map(|c| vec![c]).collect());
        let right = dataset(&["v"], right_cells.iter().cloned().map(|c| vec![c]).collect());
        let result = Comparator::default().compare(&left, &right, None).unwrap();
        let analysis = analyze(&result, "v").unwrap();

        let union: BTreeSet<Value> = left_cells.iter().chain(&right_cells).flatten().cloned().collect();
        let mut rebuilt = BTreeSet::new();
        for part in [&analysis.common_values, &analysis.unique_to_a, &analysis.unique_to_b] {
            for value in part {
                prop_assert!(rebuilt.insert(value.clone()), "{value} appears in two sets");
            }
        }
        prop_assert_eq!(rebuilt, union);
    }
}
