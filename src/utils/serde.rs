use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A table cell that should hold a name but may not.
///
/// Upstream tables mix plain strings, single-element lists, nulls and numeric
/// not-a-number markers in the same column. Anything that is not text reads
/// as the empty string.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawName {
    #[default]
    Missing,
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl RawName {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(items) if items.iter().all(Value::is_string) => Self::List(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            other => Self::Other(other.clone()),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Missing | Self::Other(_) => "",
            Self::Text(value) => value.as_str(),
            Self::List(values) => values.first().map(String::as_str).unwrap_or_default(),
        }
    }

    pub fn is_present(&self) -> bool {
        !self.as_text().is_empty()
    }
}

impl From<&str> for RawName {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawName {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for RawName {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl<T: Into<RawName>> From<Option<T>> for RawName {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<Vec<String>> for RawName {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<f64> for RawName {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(|n| Self::Other(Value::Number(n)))
            .unwrap_or(Self::Missing)
    }
}

impl From<&Value> for RawName {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
