//! Property tests for row store, split collection and column frame operations

use proptest::prelude::*;
use tabular_core::{row, Batch, ColumnFrame, Row, RowStore, SplitCollection, Value};

fn store_from(values: &[i64]) -> RowStore {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| row! { "pos" => i, "n" => *v })
        .collect()
}

fn n(row: &Row) -> i64 {
    row.get("n").and_then(Value::as_i64).unwrap()
}

fn pos(row: &Row) -> i64 {
    row.get("pos").and_then(Value::as_i64).unwrap()
}

proptest! {
    #[test]
    fn filter_is_sound_and_order_preserving(values in prop::collection::vec(-50i64..50, 0..64), threshold in -50i64..50) {
        let store = store_from(&values);
        let filtered = store.filter(|row| n(row) > threshold);

        prop_assert!(filtered.len() <= store.len());
        prop_assert!(filtered.iter().all(|row| n(row) > threshold));

        let positions: Vec<i64> = filtered.iter().map(pos).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(positions.len(), values.iter().filter(|&&v| v > threshold).count());
    }

    #[test]
    fn row_wise_map_keeps_length(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let values: Vec<i64> = values.into_iter().map(i64::from).collect();
        let store = store_from(&values);
        let mapped = store.map(|row: &Row| row! { "n" => n(row) / 2 }, &["pos"]);

        prop_assert_eq!(mapped.len(), store.len());
    }

    #[test]
    fn identity_batch_rebuilds_rows(values in prop::collection::vec(-1000i64..1000, 1..64)) {
        let store = store_from(&values);
        let mapped = store.map_batched(|batch: Batch| batch, &[]).unwrap();

        prop_assert_eq!(mapped, store);
    }

    #[test]
    fn split_names_survive_filter_and_map(
        train in prop::collection::vec(-20i64..20, 0..16),
        validation in prop::collection::vec(-20i64..20, 0..16),
        threshold in -20i64..20,
    ) {
        let splits = SplitCollection::from_iter([
            ("train", store_from(&train)),
            ("validation", store_from(&validation)),
        ]);
        let names: Vec<&str> = splits.keys().collect();

        let filtered = splits.filter(|row| n(row) < threshold);
        prop_assert_eq!(filtered.keys().collect::<Vec<_>>(), names.clone());

        let mapped = splits.map(|row: &Row| row.clone(), &["n"]);
        prop_assert_eq!(mapped.keys().collect::<Vec<_>>(), names);
    }

    #[test]
    fn sort_values_is_stable(keys in prop::collection::vec(0i64..5, 0..48), ascending in any::<bool>()) {
        let records: Vec<Vec<Value>> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| vec![Value::Int(*k), Value::from(i)])
            .collect();
        let frame = ColumnFrame::from_records_named(records, &["k", "pos"]).unwrap();
        let sorted = frame.sort_values("k", ascending).unwrap();

        prop_assert_eq!(sorted.len(), frame.len());
        for pair in sorted.records().windows(2) {
            let (k0, k1) = (pair[0][0].as_i64().unwrap(), pair[1][0].as_i64().unwrap());
            if ascending {
                prop_assert!(k0 <= k1);
            } else {
                prop_assert!(k0 >= k1);
            }
            if k0 == k1 {
                prop_assert!(pair[0][1].as_i64().unwrap() < pair[1][1].as_i64().unwrap());
            }
        }
    }

    #[test]
    fn head_is_clamped(len in 0usize..32, n in 0usize..64) {
        let frame = ColumnFrame::from_columns([("x", (0..len).collect::<Vec<_>>())]).unwrap();
        let head = frame.head(n);

        prop_assert_eq!(head.len(), n.min(len));
        prop_assert_eq!(head.records(), &frame.records()[..n.min(len)]);
    }
}

#[test]
fn batched_map_doubles_values() {
    let store = RowStore::new(vec![row! { "a" => 1 }, row! { "a" => 2 }, row! { "a" => 3 }]);
    let doubled = store
        .map_batched(
            |mut batch: Batch| {
                for value in batch.get_mut("a").unwrap() {
                    *value = Value::Int(value.as_i64().unwrap() * 2);
                }
                batch
            },
            &[],
        )
        .unwrap();

    assert_eq!(doubled.len(), 3);
    assert_eq!(doubled.rows(), [row! { "a" => 2 }, row! { "a" => 4 }, row! { "a" => 6 }]);
}

#[test]
fn removing_absent_columns_is_a_no_op() {
    let store = RowStore::new(vec![row! { "a" => 1 }, row! { "a" => 2 }]);
    let mapped = store.map(|row: &Row| row.clone(), &["missing"]);
    assert_eq!(mapped, store);
}

#[test]
fn projection_round_trip() {
    let frame = ColumnFrame::from_columns([("x", vec![1, 2, 3]), ("y", vec![4, 5, 6])]).unwrap();
    let expected = [Value::Int(1), Value::Int(2), Value::Int(3)];

    assert_eq!(frame.select_one("x").unwrap().values(), expected);

    let swapped = frame.select(&["y", "x"]).unwrap();
    assert_eq!(swapped.columns(), ["y", "x"]);
    assert_eq!(swapped.select_one("x").unwrap().values(), expected);
}

#[test]
fn sort_keeps_ties_in_original_order() {
    let frame = ColumnFrame::from_records_named(
        vec![
            vec![Value::Int(3), Value::from("a")],
            vec![Value::Int(1), Value::from("b")],
            vec![Value::Int(3), Value::from("c")],
        ],
        &["k", "v"],
    )
    .unwrap();

    let sorted = frame.sort_values("k", true).unwrap();
    assert_eq!(
        sorted.records(),
        [
            vec![Value::Int(1), Value::from("b")],
            vec![Value::Int(3), Value::from("a")],
            vec![Value::Int(3), Value::from("c")],
        ]
    );
}

#[test]
fn head_boundaries() {
    let frame = ColumnFrame::from_columns([("x", vec![1, 2, 3])]).unwrap();
    assert!(frame.head(0).is_empty());
    assert_eq!(frame.head(0).columns(), ["x"]);
    assert_eq!(frame.head(3), frame);
    assert_eq!(frame.head(10), frame);
}
