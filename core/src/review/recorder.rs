use super::queue::ReviewQueue;
use crate::dataset::model::{RowKey, NOT_AVAILABLE};
use crate::dataset::store::{set_validated, Dataset};
use crate::error::{CoreError, CoreResult};

/// Records `override_label` for the row at `queue[cursor]` in the queue's
/// category and marks it validated.
///
/// An empty or whitespace-only label records nothing and returns `Ok(None)`.
/// The `NA` sentinel is rejected with `CoreError::InvalidInput`, since the
/// export could not tell it apart from a missing label. A cursor outside the
/// queue (an empty queue included) is `CoreError::CursorOutOfRange`.
/// `queue` must be computed from the current state of `dataset`.
pub fn record(
    dataset: &mut Dataset,
    queue: &ReviewQueue,
    cursor: usize,
    override_label: &str,
) -> CoreResult<Option<RowKey>> {
    let trimmed = override_label.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed == NOT_AVAILABLE {
        return Err(CoreError::InvalidInput(format!(
            "'{}' is reserved for rows without a validated label",
            NOT_AVAILABLE
        )));
    }
    let key = queue.key_at(cursor).ok_or(CoreError::CursorOutOfRange {
        cursor,
        len: queue.len(),
    })?;
    set_validated(dataset, key, queue.category(), override_label)?;
    tracing::info!(
        row = %key,
        category = %queue.category(),
        label = override_label,
        "annotation recorded"
    );
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::model::{Category, SourceRecord};
    use crate::dataset::store::get_row;
    use crate::review::queue::compute;

    fn dataset(n: usize) -> Dataset {
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

    #[test]
    fn records_at_queue_position() {
        let mut ds = dataset(3);
        let q = compute(&ds, Category::Content);
        let key = record(&mut ds, &q, 1, "X").unwrap();
        assert_eq!(key, Some(RowKey::new(1)));
        let row = get_row(&ds, RowKey::new(1)).unwrap();
        assert!(row.is_validated(Category::Content));
        assert_eq!(row.validation(Category::Content).label.as_deref(), Some("X"));
    }

    #[test]
    fn empty_label_is_a_no_op() {
        let mut ds = dataset(2);
        let before = ds.clone();
        let q = compute(&ds, Category::Determinant);
        assert_eq!(record(&mut ds, &q, 0, "").unwrap(), None);
        assert_eq!(record(&mut ds, &q, 0, "  \t").unwrap(), None);
        assert_eq!(ds, before);
    }

    #[test]
    fn sentinel_label_is_rejected() {
        let mut ds = dataset(1);
        let before = ds.clone();
        let q = compute(&ds, Category::Content);
        let err = record(&mut ds, &q, 0, " NA ").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(err.is_recoverable());
        assert_eq!(ds, before);
        // Only the exact sentinel is reserved.
        assert_eq!(record(&mut ds, &q, 0, "NAB").unwrap(), Some(RowKey::new(0)));
    }

    #[test]
    fn out_of_range_cursor_is_recoverable() {
        let mut ds = dataset(1);
        let q = compute(&ds, Category::Content);
        let err = record(&mut ds, &q, 3, "X").unwrap_err();
        assert!(matches!(err, CoreError::CursorOutOfRange { cursor: 3, len: 1 }));
        assert!(err.is_recoverable());
    }
}
