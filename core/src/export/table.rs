use crate::dataset::store::Dataset;
use crate::error::CoreResult;

/// Encodes the dataset as CSV: one header line in layout order, then one
/// line per row. The output loads back through `parse_dataset_csv`.
pub fn serialize(dataset: &Dataset) -> CoreResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    wtr.write_record(dataset.headers())?;
    for row in dataset.rows() {
        wtr.write_record(dataset.columns().iter().map(|c| c.value(row)))?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}
