use crate::config::GuidelineKeys;
use crate::dataset::model::Category;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuidelineEntry {
    pub label: String,
    pub explanation: String,
}

/// Per-category label explanations, kept in the order they were given.
/// Read-only once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuidelineSet {
    content: Vec<GuidelineEntry>,
    determinant: Vec<GuidelineEntry>,
}

impl GuidelineSet {
    /// Loads using the default top-level keys (`conts`, `dets`).
    pub fn load(raw: &Value) -> CoreResult<Self> {
        Self::load_with_keys(raw, &GuidelineKeys::default())
    }

    pub fn load_with_keys(raw: &Value, keys: &GuidelineKeys) -> CoreResult<Self> {
        let top = raw.as_object().ok_or_else(|| {
            CoreError::Schema("guidelines must be a JSON object".to_string())
        })?;

        for name in top.keys() {
            if name != &keys.content && name != &keys.determinant {
                tracing::warn!(key = %name, "ignoring unknown guideline category");
            }
        }

        let content = category_entries(raw, &keys.content)?;
        let determinant = category_entries(raw, &keys.determinant)?;
        tracing::debug!(
            content_labels = content.len(),
            determinant_labels = determinant.len(),
            "guidelines loaded"
        );
        Ok(Self {
            content,
            determinant,
        })
    }

    pub fn entries(&self, category: Category) -> &[GuidelineEntry] {
        match category {
            Category::Content => &self.content,
            Category::Determinant => &self.determinant,
        }
    }

    pub fn labels(&self, category: Category) -> Vec<&str> {
        self.entries(category)
            .iter()
            .map(|e| e.label.as_str())
            .collect()
    }
}

fn category_entries(raw: &Value, key: &str) -> CoreResult<Vec<GuidelineEntry>> {
    let mapping = raw
        .get(key)
        .ok_or_else(|| CoreError::Schema(format!("guidelines missing category '{}'", key)))?
        .as_object()
        .ok_or_else(|| {
            CoreError::Schema(format!("guideline category '{}' must be an object", key))
        })?;

    let mut entries = Vec::with_capacity(mapping.len());
    for (label, explanation) in mapping {
        let explanation = explanation.as_str().ok_or_else(|| {
            CoreError::Schema(format!(
                "guideline '{}' in category '{}' must be a string",
                label, key
            ))
        })?;
        entries.push(GuidelineEntry {
            label: label.clone(),
            explanation: explanation.to_string(),
        });
    }
    Ok(entries)
}

/// Renders every label of `category` as `"{label}: {explanation}\n\n"`.
pub fn explain(guidelines: &GuidelineSet, category: Category) -> String {
    guidelines
        .entries(category)
        .iter()
        .map(|e| format!("{}: {}\n\n", e.label, e.explanation))
        .collect()
}

pub fn parse_guidelines_json(json_str: &str, keys: &GuidelineKeys) -> CoreResult<GuidelineSet> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| CoreError::Schema(format!("failed to parse guidelines: {}", e)))?;
    GuidelineSet::load_with_keys(&raw, keys)
}

pub fn load_guidelines_json(path: impl AsRef<Path>, keys: &GuidelineKeys) -> CoreResult<GuidelineSet> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let set = parse_guidelines_json(&text, keys)?;
    tracing::info!(path = %path.display(), "guidelines loaded");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explanation_keeps_mapping_order() {
        let set = GuidelineSet::load(&json!({
            "conts": {"zeta": "last letter", "alpha": "first letter"},
            "dets": {}
        }))
        .unwrap();
        assert_eq!(
            explain(&set, Category::Content),
            "zeta: last letter\n\nalpha: first letter\n\n"
        );
        assert_eq!(explain(&set, Category::Determinant), "");
    }

    #[test]
    fn missing_category_is_a_schema_error() {
        let err = GuidelineSet::load(&json!({"conts": {"a": "b"}})).unwrap_err();
        assert!(matches!(err, CoreError::Schema(_)));
        assert!(err.to_string().contains("dets"));
    }

    #[test]
    fn non_string_explanation_is_rejected() {
        let err = GuidelineSet::load(&json!({"conts": {"a": 3}, "dets": {}})).unwrap_err();
        assert!(matches!(err, CoreError::Schema(_)));
    }

    #[test]
    fn custom_keys_are_honoured() {
        let keys = GuidelineKeys {
            content: "content".to_string(),
            determinant: "determinant".to_string(),
        };
        let set = parse_guidelines_json(
            r#"{"content": {"A": "a"}, "determinant": {"B": "b"}, "notes": "x"}"#,
            &keys,
        )
        .unwrap();
        assert_eq!(set.labels(Category::Determinant), vec!["B"]);
    }

    #[test]
    fn invalid_json_is_reported_as_schema_error() {
        let err = parse_guidelines_json("{ not json", &GuidelineKeys::default()).unwrap_err();
        assert!(matches!(err, CoreError::Schema(_)));
    }
}
