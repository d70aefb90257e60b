use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SENTENCE_COLUMN: &str = "sent";
pub const ORIGINAL_CONTENT_COLUMN: &str = "original_cont_label";
pub const ORIGINAL_DETERMINANT_COLUMN: &str = "original_det_label";
pub const AUTO_CONTENT_COLUMN: &str = "annotated_cont_labels";
pub const AUTO_DETERMINANT_COLUMN: &str = "annotated_det_labels";

pub const VALIDATED_CONTENT_COLUMN: &str = "Validated Content";
pub const VALIDATED_CONTENT_LABEL_COLUMN: &str = "Validated Content Label";
pub const VALIDATED_DETERMINANT_COLUMN: &str = "Validated Determinant";
pub const VALIDATED_DETERMINANT_LABEL_COLUMN: &str = "Validated Determinant Label";

pub const FLAG_YES: &str = "YES";
pub const FLAG_NO: &str = "NO";
/// Sentinel written for a label that has not been validated.
pub const NOT_AVAILABLE: &str = "NA";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "cont", alias = "contents")]
    Content,
    #[serde(alias = "det", alias = "determinants")]
    Determinant,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Content, Category::Determinant];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Content => "Contents",
            Category::Determinant => "Determinants",
        }
    }

    pub fn validated_column(self) -> &'static str {
        match self {
            Category::Content => VALIDATED_CONTENT_COLUMN,
            Category::Determinant => VALIDATED_DETERMINANT_COLUMN,
        }
    }

    pub fn validated_label_column(self) -> &'static str {
        match self {
            Category::Content => VALIDATED_CONTENT_LABEL_COLUMN,
            Category::Determinant => VALIDATED_DETERMINANT_LABEL_COLUMN,
        }
    }

    pub fn other(self) -> Category {
        match self {
            Category::Content => Category::Determinant,
            Category::Determinant => Category::Content,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" | "contents" | "cont" | "conts" => Ok(Category::Content),
            "determinant" | "determinants" | "det" | "dets" => Ok(Category::Determinant),
            other => Err(CoreError::InvalidInput(format!(
                "unknown category '{}' (expected content or determinant)",
                other
            ))),
        }
    }
}

/// Original positional index of a row. Assigned once at load.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct RowKey(usize);

impl RowKey {
    pub fn new(index: usize) -> Self {
        RowKey(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation state of one category on one row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Validation {
    pub validated: bool,
    /// `None` stands for the "NA" sentinel.
    pub label: Option<String>,
}

impl Validation {
    pub fn flag_value(&self) -> &'static str {
        if self.validated {
            FLAG_YES
        } else {
            FLAG_NO
        }
    }

    pub fn label_value(&self) -> &str {
        self.label.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// The immutable source fields of a sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRecord {
    pub sentence: String,
    pub original_content_label: String,
    pub original_determinant_label: String,
    pub auto_content_label: String,
    pub auto_determinant_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: RowKey,
    source: SourceRecord,
    content: Validation,
    determinant: Validation,
    extras: Vec<String>,
}

impl Row {
    pub(crate) fn new(key: RowKey, source: SourceRecord) -> Self {
        Self {
            key,
            source,
            content: Validation::default(),
            determinant: Validation::default(),
            extras: Vec::new(),
        }
    }

    pub(crate) fn with_state(
        key: RowKey,
        source: SourceRecord,
        content: Validation,
        determinant: Validation,
        extras: Vec<String>,
    ) -> Self {
        Self {
            key,
            source,
            content,
            determinant,
            extras,
        }
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn source(&self) -> &SourceRecord {
        &self.source
    }

    pub fn sentence(&self) -> &str {
        &self.source.sentence
    }

    pub fn original_label(&self, category: Category) -> &str {
        match category {
            Category::Content => &self.source.original_content_label,
            Category::Determinant => &self.source.original_determinant_label,
        }
    }

    pub fn auto_label(&self, category: Category) -> &str {
        match category {
            Category::Content => &self.source.auto_content_label,
            Category::Determinant => &self.source.auto_determinant_label,
        }
    }

    pub fn validation(&self, category: Category) -> &Validation {
        match category {
            Category::Content => &self.content,
            Category::Determinant => &self.determinant,
        }
    }

    pub(crate) fn validation_mut(&mut self, category: Category) -> &mut Validation {
        match category {
            Category::Content => &mut self.content,
            Category::Determinant => &mut self.determinant,
        }
    }

    pub fn is_validated(&self, category: Category) -> bool {
        self.validation(category).validated
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }
}

/// One column of the tabular layout, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Sentence,
    OriginalLabel(Category),
    AutoLabel(Category),
    Validated(Category),
    ValidatedLabel(Category),
    /// Column outside the schema, carried through untouched.
    Extra(usize),
}

impl Column {
    pub const REQUIRED: [Column; 5] = [
        Column::Sentence,
        Column::OriginalLabel(Category::Content),
        Column::OriginalLabel(Category::Determinant),
        Column::AutoLabel(Category::Content),
        Column::AutoLabel(Category::Determinant),
    ];

    pub const VALIDATION: [Column; 4] = [
        Column::Validated(Category::Content),
        Column::ValidatedLabel(Category::Content),
        Column::Validated(Category::Determinant),
        Column::ValidatedLabel(Category::Determinant),
    ];

    pub fn from_header(header: &str) -> Option<Column> {
        let column = match header {
            SENTENCE_COLUMN => Column::Sentence,
            ORIGINAL_CONTENT_COLUMN => Column::OriginalLabel(Category::Content),
            ORIGINAL_DETERMINANT_COLUMN => Column::OriginalLabel(Category::Determinant),
            AUTO_CONTENT_COLUMN => Column::AutoLabel(Category::Content),
            AUTO_DETERMINANT_COLUMN => Column::AutoLabel(Category::Determinant),
            VALIDATED_CONTENT_COLUMN => Column::Validated(Category::Content),
            VALIDATED_CONTENT_LABEL_COLUMN => Column::ValidatedLabel(Category::Content),
            VALIDATED_DETERMINANT_COLUMN => Column::Validated(Category::Determinant),
            VALIDATED_DETERMINANT_LABEL_COLUMN => Column::ValidatedLabel(Category::Determinant),
            _ => return None,
        };
        Some(column)
    }

    /// Header name; extra columns resolve through `extra_headers`.
    pub fn header<'a>(&self, extra_headers: &'a [String]) -> &'a str {
        match self {
            Column::Sentence => SENTENCE_COLUMN,
            Column::OriginalLabel(Category::Content) => ORIGINAL_CONTENT_COLUMN,
            Column::OriginalLabel(Category::Determinant) => ORIGINAL_DETERMINANT_COLUMN,
            Column::AutoLabel(Category::Content) => AUTO_CONTENT_COLUMN,
            Column::AutoLabel(Category::Determinant) => AUTO_DETERMINANT_COLUMN,
            Column::Validated(c) => c.validated_column(),
            Column::ValidatedLabel(c) => c.validated_label_column(),
            Column::Extra(i) => extra_headers.get(*i).map(String::as_str).unwrap_or(""),
        }
    }

    /// Cell value of this column for `row`.
    pub fn value<'a>(&self, row: &'a Row) -> &'a str {
        match self {
            Column::Sentence => row.sentence(),
            Column::OriginalLabel(c) => row.original_label(*c),
            Column::AutoLabel(c) => row.auto_label(*c),
            Column::Validated(c) => row.validation(*c).flag_value(),
            Column::ValidatedLabel(c) => row.validation(*c).label_value(),
            Column::Extra(i) => row.extras.get(*i).map(String::as_str).unwrap_or(""),
        }
    }
}
