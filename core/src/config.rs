use crate::dataset::model::Category;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "validated.csv";

/// Top-level keys of the guideline JSON, one per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GuidelineKeys {
    pub content: String,
    pub determinant: String,
}

impl Default for GuidelineKeys {
    fn default() -> Self {
        Self {
            content: "conts".to_string(),
            determinant: "dets".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub start_category: Category,
    pub export_file_name: String,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub guideline_keys: GuidelineKeys,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_category: Category::Content,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            log_level: "info".to_string(),
            guideline_keys: GuidelineKeys::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let cfg: SessionConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "session config loaded");
        Ok(cfg)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.export_file_name.trim().is_empty() {
            return Err(CoreError::Config(
                "export_file_name cannot be empty".to_string(),
            ));
        }
        if self.guideline_keys.content.trim().is_empty()
            || self.guideline_keys.determinant.trim().is_empty()
        {
            return Err(CoreError::Config(
                "guideline_keys entries cannot be empty".to_string(),
            ));
        }
        if self.guideline_keys.content == self.guideline_keys.determinant {
            return Err(CoreError::Config(
                "guideline_keys must differ between categories".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let cfg = SessionConfig::from_toml_str(
            r#"
start_category = "determinant"

[guideline_keys]
content = "content_labels"
"#,
        )
        .unwrap();
        assert_eq!(cfg.start_category, Category::Determinant);
        assert_eq!(cfg.guideline_keys.content, "content_labels");
        assert_eq!(cfg.guideline_keys.determinant, "dets");
        assert_eq!(cfg.export_file_name, "validated.csv");
    }

    #[test]
    fn identical_guideline_keys_are_rejected() {
        let err = SessionConfig::from_toml_str(
            "[guideline_keys]\ncontent = \"x\"\ndeterminant = \"x\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(SessionConfig::from_toml_str("cursor = 3").is_err());
    }
}
