//! Typed metadata tag values

use serde::Deserialize;

/// A parsed metadata tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
    Text(String),
}

impl TagValue {
    /// Converts an already-decoded JSON value. Strings go through
    /// [`parse_tag_text`], everything else is matched structurally.
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => parse_tag_text(text),
            other => serde_json::from_value(other.clone())
                .unwrap_or_else(|_| TagValue::Text(other.to_string())),
        }
    }

    /// All numeric elements in row-major order, or `None` for text.
    pub fn as_numbers(&self) -> Option<Vec<f64>> {
        match self {
            TagValue::Scalar(v) => Some(vec![*v]),
            TagValue::Vector(values) => Some(values.clone()),
            TagValue::Matrix(rows) => Some(rows.iter().flatten().copied().collect()),
            TagValue::Text(_) => None,
        }
    }

    /// The value as a single number; one-element vectors count.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            TagValue::Scalar(v) => Some(*v),
            TagValue::Vector(values) if values.len() == 1 => Some(values[0]),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Parses the textual form of a tag.
///
/// Structured JSON literals (numbers, arrays, nested arrays, strings) are
/// tried first. A quoted literal becomes text. Anything else yields the
/// decimal numbers found in it, or the trimmed text when there are none.
pub fn parse_tag_text(text: &str) -> TagValue {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<TagValue>(trimmed) {
        return value;
    }

    if let Some(inner) = strip_quotes(trimmed) {
        return TagValue::Text(inner.to_string());
    }

    let numbers = extract_numbers(trimmed);
    if numbers.is_empty() {
        TagValue::Text(trimmed.to_string())
    } else {
        TagValue::Vector(numbers)
    }
}

fn strip_quotes(text: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        text.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

/// Every match of `-?\d+\.?\d*` in `text`, in order.
fn extract_numbers(text: &str) -> Vec<f64> {
    let bytes = text.as_bytes();
    let mut numbers = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        if bytes[i] == b'-' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if !bytes[i].is_ascii_digit() {
            i = start + 1;
            continue;
        }

        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }

        if let Ok(value) = text[start..i].parse::<f64>() {
            numbers.push(value);
        }
    }

    numbers
}
