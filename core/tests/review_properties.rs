use annotate_core::dataset::model::{Category, RowKey, SourceRecord};
use annotate_core::dataset::store::{ensure_validation_columns, set_validated, Dataset};
use annotate_core::review::cursor::advance;
use annotate_core::review::queue::compute;
use annotate_core::review::recorder::record;
use proptest::prelude::*;

fn build(n: usize) -> Dataset {
    Dataset::from_records(
        (0..n)
            .map(|i| SourceRecord {
                sentence: format!("s{}", i),
                original_content_label: "oc".to_string(),
                original_determinant_label: "od".to_string(),
                auto_content_label: "ac".to_string(),
                auto_determinant_label: "ad".to_string(),
            })
            .collect(),
    )
}

/// Dataset with the given rows pre-validated per category.
fn with_flags(flags: &[(bool, bool)]) -> Dataset {
    let mut ds = build(flags.len());
    ensure_validation_columns(&mut ds);
    for (i, (c, d)) in flags.iter().enumerate() {
        if *c {
            set_validated(&mut ds, RowKey::new(i), Category::Content, "c").unwrap();
        }
        if *d {
            set_validated(&mut ds, RowKey::new(i), Category::Determinant, "d").unwrap();
        }
    }
    ds
}

fn category() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::Content), Just(Category::Determinant)]
}

proptest! {
    #[test]
    fn prop_queue_is_exactly_the_unvalidated_keys(
        flags in proptest::collection::vec(any::<(bool, bool)>(), 0..40),
        cat in category(),
    ) {
        let ds = with_flags(&flags);
        let queue = compute(&ds, cat);
        let expected: Vec<RowKey> = flags
            .iter()
            .enumerate()
            .filter(|(_, (c, d))| match cat {
                Category::Content => !*c,
                Category::Determinant => !*d,
            })
            .map(|(i, _)| RowKey::new(i))
            .collect();
        prop_assert_eq!(queue.keys(), expected.as_slice());
    }

    #[test]
    fn prop_ensure_validation_columns_is_idempotent(
        flags in proptest::collection::vec(any::<(bool, bool)>(), 0..20),
    ) {
        let mut ds = with_flags(&flags);
        let once = ds.clone();
        ensure_validation_columns(&mut ds);
        prop_assert_eq!(ds, once);
    }

    #[test]
    fn prop_categories_validate_independently(
        n in 1..20usize,
        idx in 0..20usize,
        content_first in any::<bool>(),
    ) {
        let idx = idx % n;
        let key = RowKey::new(idx);
        let mut ds = build(n);
        let order = if content_first {
            [Category::Content, Category::Determinant]
        } else {
            [Category::Determinant, Category::Content]
        };

        let untouched = ds.rows()[idx].validation(order[1]).clone();
        set_validated(&mut ds, key, order[0], "first").unwrap();
        prop_assert_eq!(ds.rows()[idx].validation(order[1]), &untouched);

        let settled = ds.rows()[idx].validation(order[0]).clone();
        set_validated(&mut ds, key, order[1], "second").unwrap();
        prop_assert_eq!(ds.rows()[idx].validation(order[0]), &settled);
    }

    #[test]
    fn prop_record_removes_only_the_recorded_key(
        flags in proptest::collection::vec(any::<(bool, bool)>(), 1..30),
        cat in category(),
        cursor in 0..30usize,
    ) {
        let mut ds = with_flags(&flags);
        let before = compute(&ds, cat);
        prop_assume!(!before.is_empty());
        let cursor = cursor % before.len();

        let key = record(&mut ds, &before, cursor, "X").unwrap().unwrap();
        let after = compute(&ds, cat);
        let expected: Vec<RowKey> = before.keys().iter().copied().filter(|k| *k != key).collect();
        prop_assert_eq!(after.keys(), expected.as_slice());
        prop_assert_eq!(compute(&ds, cat.other()), compute(&with_flags(&flags), cat.other()));
    }

    #[test]
    fn prop_empty_label_never_mutates(
        flags in proptest::collection::vec(any::<(bool, bool)>(), 0..20),
        cat in category(),
        cursor in 0..40usize,
    ) {
        let mut ds = with_flags(&flags);
        let snapshot = ds.clone();
        let queue = compute(&ds, cat);
        prop_assert_eq!(record(&mut ds, &queue, cursor, "").unwrap(), None);
        prop_assert_eq!(ds, snapshot);
    }

    #[test]
    fn prop_advance_stays_in_bounds(
        cursor in any::<usize>(),
        delta in any::<i64>(),
        n in 1..10_000usize,
    ) {
        let c = advance(cursor, delta, n).unwrap();
        prop_assert!(c < n);
    }
}
