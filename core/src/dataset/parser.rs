use super::model::{Category, Column, Row, RowKey, SourceRecord, Validation, NOT_AVAILABLE};
use super::store::{ensure_validation_columns, Dataset};
use crate::error::{CoreError, CoreResult};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_dataset_csv(path: impl AsRef<Path>) -> CoreResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = parse_dataset_csv(file)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parses a headed CSV table into a dataset. Required columns must all be
/// present; validation columns are optional and appended when absent;
/// any other column is carried through in place.
pub fn parse_dataset_csv<R: Read>(reader: R) -> CoreResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut seen = BTreeSet::new();
    for h in &headers {
        if !seen.insert(h.as_str()) {
            return Err(CoreError::Schema(format!("duplicate column '{}'", h)));
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    let mut extra_headers = Vec::new();
    let mut positions: HashMap<Column, usize> = HashMap::new();
    for (idx, h) in headers.iter().enumerate() {
        let column = match Column::from_header(h) {
            Some(c) => c,
            None => {
                extra_headers.push(h.clone());
                Column::Extra(extra_headers.len() - 1)
            }
        };
        positions.insert(column, idx);
        columns.push(column);
    }

    let missing: Vec<&str> = Column::REQUIRED
        .iter()
        .filter(|c| !positions.contains_key(*c))
        .map(|c| c.header(&extra_headers))
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::Schema(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }

    let extra_positions: Vec<usize> = (0..extra_headers.len())
        .map(|i| positions[&Column::Extra(i)])
        .collect();

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |column: Column| positions.get(&column).and_then(|&idx| record.get(idx));
        let required = |column: Column| field(column).unwrap_or("").to_string();

        let source = SourceRecord {
            sentence: required(Column::Sentence),
            original_content_label: required(Column::OriginalLabel(Category::Content)),
            original_determinant_label: required(Column::OriginalLabel(Category::Determinant)),
            auto_content_label: required(Column::AutoLabel(Category::Content)),
            auto_determinant_label: required(Column::AutoLabel(Category::Determinant)),
        };

        let validation = |category: Category| -> CoreResult<Validation> {
            let validated = match field(Column::Validated(category)) {
                Some(raw) => parse_flag(raw, i, category.validated_column())?,
                None => false,
            };
            let mut label = field(Column::ValidatedLabel(category)).and_then(parse_label);
            if !validated && label.is_some() {
                tracing::debug!(
                    row = i,
                    column = category.validated_label_column(),
                    "dropping label of unvalidated row"
                );
                label = None;
            }
            Ok(Validation { validated, label })
        };
        let content = validation(Category::Content)?;
        let determinant = validation(Category::Determinant)?;

        let extras = extra_positions
            .iter()
            .map(|&idx| record.get(idx).unwrap_or("").to_string())
            .collect();

        rows.push(Row::with_state(
            RowKey::new(i),
            source,
            content,
            determinant,
            extras,
        ));
    }

    let mut dataset = Dataset::from_parts(columns, extra_headers, rows);
    ensure_validation_columns(&mut dataset);
    Ok(dataset)
}

fn parse_flag(raw: &str, row: usize, column: &str) -> CoreResult<bool> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "YES" | "TRUE" | "1" => Ok(true),
        "NO" | "FALSE" | "0" | "" => Ok(false),
        _ => Err(CoreError::Schema(format!(
            "row {}: column '{}' has unrecognised flag value '{}'",
            row, column, raw
        ))),
    }
}

fn parse_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(raw.to_string())
    }
}
