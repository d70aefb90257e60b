use super::table::serialize;
use crate::dataset::store::Dataset;
use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: String,
    pub rows: usize,
    pub bytes: u64,
    pub sha256: String,
    pub exported_at: String,
}

/// Serializes the dataset and writes it to `path`, creating parent
/// directories as needed.
pub fn write_export(dataset: &Dataset, path: impl AsRef<Path>) -> CoreResult<ExportReceipt> {
    let path = path.as_ref();
    let bytes = serialize(dataset)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &bytes)?;

    let receipt = ExportReceipt {
        path: path.to_string_lossy().to_string(),
        rows: dataset.len(),
        bytes: bytes.len() as u64,
        sha256: sha256_hex(&bytes),
        exported_at: now_rfc3339_utc(),
    };
    tracing::info!(
        path = %receipt.path,
        rows = receipt.rows,
        sha256 = %receipt.sha256,
        "dataset exported"
    );
    Ok(receipt)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}
