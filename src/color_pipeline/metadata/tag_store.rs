use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::color_pipeline::common::error::{ProcessingError, Result};
use crate::color_pipeline::metadata::tag_value::{parse_tag_text, TagValue};

/// A tag as found in the metadata dump, with its parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    /// Text of the tag before parsing
    pub raw: String,
    pub value: TagValue,
}

/// Mapping from tag name to parsed tag.
#[derive(Debug, Clone, Default)]
pub struct TagStore {
    tags: HashMap<String, TagEntry>,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON object of `name -> value` pairs.
    ///
    /// String values are parsed with [`parse_tag_text`]; numbers and arrays
    /// are taken as they are.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let object: HashMap<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| ProcessingError::TagParseError(e.to_string()))?;

        let tags = object
            .into_iter()
            .map(|(name, value)| {
                let raw = match &value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                let entry = TagEntry {
                    raw,
                    value: TagValue::from_json_value(&value),
                };
                (name, entry)
            })
            .collect::<HashMap<_, _>>();

        debug!("Parsed {} metadata tags", tags.len());
        Ok(Self { tags })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ProcessingError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Inserts a tag from its textual form.
    pub fn insert(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        let raw = raw.into();
        let value = parse_tag_text(&raw);
        self.tags.insert(name.into(), TagEntry { raw, value });
    }

    pub fn get(&self, name: &str) -> Option<&TagEntry> {
        self.tags.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name).map(|entry| &entry.value)
    }

    /// Like [`TagStore::get`], but a missing tag is an error.
    pub fn require(&self, name: &str) -> Result<&TagEntry> {
        self.get(name)
            .ok_or_else(|| ProcessingError::MissingTag(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
