use super::cursor::{advance, clamp};
use super::queue::{compute, ReviewQueue};
use super::recorder::record;
use crate::dataset::model::{Category, RowKey};
use crate::dataset::store::{get_row, Dataset};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Annotator position. The cursor is an offset into whatever queue the
/// active category currently has; it is not bound to a row and is kept
/// as is when the category changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub category: Category,
    pub cursor: usize,
}

impl SessionState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            cursor: 0,
        }
    }

    pub fn queue(&self, dataset: &Dataset) -> ReviewQueue {
        compute(dataset, self.category)
    }
}

/// What the annotator sees for the current row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RowView {
    pub key: RowKey,
    pub category: Category,
    pub position: usize,
    pub queue_len: usize,
    pub sentence: String,
    pub original_label: String,
    pub auto_label: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NavigateOutcome {
    Moved { cursor: usize, key: RowKey },
    NothingToAnnotate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmitOutcome {
    Recorded(RowKey),
    /// Empty label; nothing was written.
    Skipped,
    NothingToAnnotate,
}

pub fn current_view(dataset: &Dataset, state: &SessionState) -> CoreResult<Option<RowView>> {
    let queue = state.queue(dataset);
    let position = match clamp(state.cursor, queue.len()) {
        Some(p) => p,
        None => return Ok(None),
    };
    let key = queue.key_at(position).ok_or(CoreError::CursorOutOfRange {
        cursor: position,
        len: queue.len(),
    })?;
    let row = get_row(dataset, key)?;
    Ok(Some(RowView {
        key,
        category: state.category,
        position,
        queue_len: queue.len(),
        sentence: row.sentence().to_string(),
        original_label: row.original_label(state.category).to_string(),
        auto_label: row.auto_label(state.category).to_string(),
    }))
}

pub fn navigate(dataset: &Dataset, state: &mut SessionState, delta: i64) -> NavigateOutcome {
    let queue = state.queue(dataset);
    match advance(state.cursor, delta, queue.len()).and_then(|c| queue.key_at(c).map(|k| (c, k))) {
        Some((cursor, key)) => {
            state.cursor = cursor;
            tracing::debug!(cursor, row = %key, "cursor moved");
            NavigateOutcome::Moved { cursor, key }
        }
        None => NavigateOutcome::NothingToAnnotate,
    }
}

pub fn switch_category(state: &mut SessionState, category: Category) {
    if state.category != category {
        tracing::debug!(from = %state.category, to = %category, cursor = state.cursor, "category switched");
    }
    state.category = category;
}

/// Records `label` for the current row of the active category. The queue
/// is recomputed before the cursor is resolved, and the cursor is clamped
/// to the shrunken queue afterwards so it keeps its offset.
pub fn submit(dataset: &mut Dataset, state: &mut SessionState, label: &str) -> CoreResult<SubmitOutcome> {
    if label.trim().is_empty() {
        return Ok(SubmitOutcome::Skipped);
    }
    let queue = state.queue(dataset);
    let position = match clamp(state.cursor, queue.len()) {
        Some(p) => p,
        None => return Ok(SubmitOutcome::NothingToAnnotate),
    };
    state.cursor = position;

    let outcome = match record(dataset, &queue, position, label)? {
        Some(key) => SubmitOutcome::Recorded(key),
        None => SubmitOutcome::Skipped,
    };

    let remaining = state.queue(dataset).len();
    state.cursor = clamp(state.cursor, remaining).unwrap_or(0);
    Ok(outcome)
}

/// Confirms the automatic label of the current row as the validated one.
pub fn accept_auto_label(dataset: &mut Dataset, state: &mut SessionState) -> CoreResult<SubmitOutcome> {
    let label = match current_view(dataset, state)? {
        Some(view) => view.auto_label,
        None => return Ok(SubmitOutcome::NothingToAnnotate),
    };
    submit(dataset, state, &label)
}
