use crate::dataset::model::{Category, RowKey};
use crate::dataset::store::Dataset;
use serde::{Deserialize, Serialize};

/// Row keys of `category` still pending validation, in dataset order.
/// A snapshot: recompute after any validation or category change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewQueue {
    category: Category,
    keys: Vec<RowKey>,
}

impl ReviewQueue {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn keys(&self) -> &[RowKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key_at(&self, cursor: usize) -> Option<RowKey> {
        self.keys.get(cursor).copied()
    }

    pub fn position_of(&self, key: RowKey) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }
}

pub fn compute(dataset: &Dataset, category: Category) -> ReviewQueue {
    let keys = dataset
        .rows()
        .iter()
        .filter(|row| !row.is_validated(category))
        .map(|row| row.key())
        .collect();
    ReviewQueue { category, keys }
}
