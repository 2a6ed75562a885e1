use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Value of an optional text field that was present in the source JSON.
///
/// Non-string values are carried through untouched so that one odd record
/// never stops a whole file from loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    Null,
    Text(String),
    Other(Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for `null` and `""`. Non-string values count as filled.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Other(_) => false,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s),
            other => Self::Other(other),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(field: FieldValue) -> Self {
        match field {
            FieldValue::Null => Value::Null,
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Other(v) => v,
        }
    }
}

// Keeps an explicit `null` distinct from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// One vocabulary entry.
///
/// Keys this crate does not know about are kept in `extra` and written back
/// unchanged. Optional fields keep their shape: a missing key stays missing
/// and an explicit `null` is written back as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabRecord {
    /// Headword, not unique across the dataset
    #[serde(default)]
    pub phrase: String,
    /// Native-language gloss
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub mean: Option<FieldValue>,
    /// Source-language example sentence containing `phrase`
    #[serde(
        default,
        rename = "onePhrase",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub one_phrase: Option<FieldValue>,
    /// Translated `one_phrase`
    #[serde(
        default,
        rename = "onePhraseJa",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub one_phrase_ja: Option<FieldValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabRecord {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            ..Self::default()
        }
    }

    pub fn with_mean(mut self, mean: impl Into<String>) -> Self {
        self.set_mean(mean);
        self
    }

    pub fn with_one_phrase(mut self, sentence: impl Into<String>) -> Self {
        self.set_one_phrase(sentence);
        self
    }

    pub fn with_one_phrase_ja(mut self, sentence: impl Into<String>) -> Self {
        self.set_one_phrase_ja(sentence);
        self
    }

    pub fn mean(&self) -> Option<&str> {
        self.mean.as_ref().and_then(FieldValue::as_str)
    }

    pub fn one_phrase(&self) -> Option<&str> {
        self.one_phrase.as_ref().and_then(FieldValue::as_str)
    }

    pub fn one_phrase_ja(&self) -> Option<&str> {
        self.one_phrase_ja.as_ref().and_then(FieldValue::as_str)
    }

    /// `mean` as a string slice, empty when absent or not a string
    pub fn mean_str(&self) -> &str {
        self.mean().unwrap_or_default()
    }

    pub fn one_phrase_str(&self) -> &str {
        self.one_phrase().unwrap_or_default()
    }

    pub fn one_phrase_ja_str(&self) -> &str {
        self.one_phrase_ja().unwrap_or_default()
    }

    /// `mean` is missing, `null` or `""`
    pub fn mean_is_blank(&self) -> bool {
        self.mean.as_ref().is_none_or(FieldValue::is_blank)
    }

    pub fn one_phrase_ja_is_blank(&self) -> bool {
        self.one_phrase_ja.as_ref().is_none_or(FieldValue::is_blank)
    }

    pub fn set_mean(&mut self, mean: impl Into<String>) {
        self.mean = Some(FieldValue::Text(mean.into()));
    }

    pub fn set_one_phrase(&mut self, sentence: impl Into<String>) {
        self.one_phrase = Some(FieldValue::Text(sentence.into()));
    }

    pub fn set_one_phrase_ja(&mut self, sentence: impl Into<String>) {
        self.one_phrase_ja = Some(FieldValue::Text(sentence.into()));
    }

    /// Writes an explicit `null`, marking the translation as stale.
    pub fn clear_one_phrase_ja(&mut self) {
        self.one_phrase_ja = Some(FieldValue::Null);
    }
}

/// Flat per-year file: `<year>.unigram.json`
pub type YearFile = Vec<VocabRecord>;

/// Group name -> ordered records
pub type Groups = IndexMap<String, Vec<VocabRecord>>;

/// Aggregate file: year -> group name -> ordered records
pub type Aggregate = IndexMap<String, Groups>;
