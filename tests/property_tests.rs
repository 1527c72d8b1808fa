//! Property-based tests for measurement lists
//!
//! - Test data integrity across open/closed transitions
//! - Test interning identity
//! - Run with ProptestConfig::with_cases(100)

use measurement_lists::{DoubleList, FloatList, MeasurementList, SchemaPool};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// A put or a close, applied to a list in order
#[derive(Debug, Clone)]
enum Op {
    Put(String, f64),
    Close,
    Remove(String),
}

/// Names from a small alphabet so that overwrites and removals collide often
fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Area", "Perimeter", "Mean", "Max", "Min", "Solidity"])
        .prop_map(str::to_string)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (arb_name(), -1.0e6f64..1.0e6).prop_map(|(n, v)| Op::Put(n, v)),
        2 => Just(Op::Close),
        1 => arb_name().prop_map(Op::Remove),
    ]
}

/// Apply ops to a list and to a reference model (insertion-ordered pairs)
fn apply(list: &dyn MeasurementList, ops: &[Op]) -> Vec<(String, f64)> {
    let mut model: Vec<(String, f64)> = Vec::new();
    for op in ops {
        match op {
            Op::Put(name, value) => {
                list.put(name, *value);
                if let Some(entry) = model.iter_mut().find(|(n, _)| n == name) {
                    entry.1 = *value;
                } else {
                    model.push((name.clone(), *value));
                }
            }
            Op::Close => list.close(),
            Op::Remove(name) => {
                list.remove_measurements(&[name.as_str()]);
                model.retain(|(n, _)| n != name);
            }
        }
    }
    model
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the list matches an insertion-ordered model after any ops
    #[test]
    fn prop_double_list_matches_model(ops in prop::collection::vec(arb_op(), 0..40)) {
        let list = DoubleList::new(Arc::new(SchemaPool::new()));
        let model = apply(&list, &ops);

        let names: Vec<String> = list.measurement_names().iter().map(|n| n.to_string()).collect();
        let expected: Vec<String> = model.iter().map(|(n, _)| n.clone()).collect();
        prop_assert_eq!(names, expected);

        for (name, value) in &model {
            prop_assert_eq!(list.get(name).to_bits(), value.to_bits());
        }
    }

    /// Property: float lists return the f32-narrowed value of the last put
    #[test]
    fn prop_float_list_narrows(ops in prop::collection::vec(arb_op(), 0..40)) {
        let list = FloatList::new(Arc::new(SchemaPool::new()));
        let model = apply(&list, &ops);

        prop_assert_eq!(list.len(), model.len());
        for (name, value) in &model {
            #[allow(clippy::cast_possible_truncation)]
            let narrowed = f64::from(*value as f32);
            prop_assert_eq!(list.get(name).to_bits(), narrowed.to_bits());
        }
    }

    /// Property: put with unique names round-trips across close
    #[test]
    fn prop_round_trip_unique_names(
        values in prop::collection::hash_map("[a-z]{1,8}", -1.0e9f64..1.0e9, 0..30)
    ) {
        let list = DoubleList::new(Arc::new(SchemaPool::new()));
        for (name, value) in &values {
            list.put(name, *value);
        }
        list.close();

        prop_assert_eq!(list.len(), values.len());
        for (name, value) in &values {
            prop_assert!(list.contains_key(name));
            prop_assert_eq!(list.get(name).to_bits(), value.to_bits());
        }
    }

    /// Property: closed lists with equal name sequences share one name list
    #[test]
    fn prop_equal_sequences_share_schema(
        names in prop::collection::hash_set("[A-Z][a-z]{0,6}", 1..12),
        count in 2usize..10
    ) {
        let pool = Arc::new(SchemaPool::new());
        let names: Vec<String> = names.into_iter().collect();
        let lists: Vec<DoubleList> = (0..count)
            .map(|_| {
                let list = DoubleList::new(Arc::clone(&pool));
                for name in &names {
                    list.put(name, 1.0);
                }
                list.close();
                list
            })
            .collect();

        let first = lists[0].measurement_names();
        for list in &lists {
            prop_assert!(Arc::ptr_eq(&first, &list.measurement_names()));
        }
        prop_assert_eq!(pool.live_count(), 1);
    }

    /// Property: lookups on absent names always give NaN, never a stored value
    #[test]
    fn prop_absent_is_nan(
        stored in prop::collection::hash_map("[a-m]{1,4}", -10.0f64..10.0, 0..10),
        probe in "[n-z]{1,4}"
    ) {
        let list = DoubleList::new(Arc::new(SchemaPool::new()));
        let pairs: HashMap<String, f64> = stored;
        for (name, value) in &pairs {
            list.put(name, *value);
        }
        prop_assert!(list.get(&probe).is_nan());
        list.close();
        prop_assert!(list.get(&probe).is_nan());
        prop_assert!(!list.contains_key(&probe));
    }
}
