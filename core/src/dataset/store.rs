use super::model::{Category, Column, Row, RowKey, SourceRecord};
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Rows in load order together with the column layout used for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<Column>,
    extra_headers: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub total_rows: usize,
    pub pending_content: usize,
    pub pending_determinant: usize,
    /// Rows with at least one category still pending.
    pub pending_any: usize,
}

impl Progress {
    pub fn pending(&self, category: Category) -> usize {
        match category {
            Category::Content => self.pending_content,
            Category::Determinant => self.pending_determinant,
        }
    }
}

impl Dataset {
    /// Builds a dataset from source fields only, with every row pending in
    /// both categories. The layout carries the validation columns from the
    /// start so recorded annotations always reach the export.
    pub fn from_records(records: Vec<SourceRecord>) -> Self {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, source)| Row::new(RowKey::new(i), source))
            .collect();
        let mut dataset = Self {
            columns: Column::REQUIRED.to_vec(),
            extra_headers: Vec::new(),
            rows,
        };
        ensure_validation_columns(&mut dataset);
        dataset
    }

    pub(crate) fn from_parts(columns: Vec<Column>, extra_headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            extra_headers,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn extra_headers(&self) -> &[String] {
        &self.extra_headers
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.header(&self.extra_headers))
            .collect()
    }

    pub fn has_validation_columns(&self) -> bool {
        Column::VALIDATION.iter().all(|c| self.columns.contains(c))
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress {
            total_rows: self.rows.len(),
            pending_content: 0,
            pending_determinant: 0,
            pending_any: 0,
        };
        for row in &self.rows {
            let content = !row.is_validated(Category::Content);
            let determinant = !row.is_validated(Category::Determinant);
            progress.pending_content += usize::from(content);
            progress.pending_determinant += usize::from(determinant);
            progress.pending_any += usize::from(content || determinant);
        }
        progress
    }

    fn row_mut(&mut self, key: RowKey) -> CoreResult<&mut Row> {
        self.rows
            .get_mut(key.index())
            .filter(|r| r.key() == key)
            .ok_or(CoreError::UnknownRow(key))
    }
}

/// Appends whichever validation columns the layout lacks. Row values are
/// never touched, so repeated calls cannot reset validated rows.
/// Returns the number of columns added.
pub fn ensure_validation_columns(dataset: &mut Dataset) -> usize {
    let mut added = 0;
    for column in Column::VALIDATION {
        if !dataset.columns.contains(&column) {
            dataset.columns.push(column);
            added += 1;
        }
    }
    if added > 0 {
        tracing::debug!(added, "validation columns added to dataset layout");
    }
    added
}

pub fn get_row(dataset: &Dataset, key: RowKey) -> CoreResult<&Row> {
    dataset
        .rows
        .get(key.index())
        .filter(|r| r.key() == key)
        .ok_or(CoreError::UnknownRow(key))
}

/// Marks `category` of the row at `key` as validated with `label`.
/// The other category of the row is left as is.
pub fn set_validated(
    dataset: &mut Dataset,
    key: RowKey,
    category: Category,
    label: impl Into<String>,
) -> CoreResult<()> {
    let row = dataset.row_mut(key)?;
    let validation = row.validation_mut(category);
    validation.label = Some(label.into());
    validation.validated = true;
    Ok(())
}
