//! Structured key-value fields.

use std::fmt;

use serde_json::Value;

/// A key-value pair attached to a record or to a logger.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A field whose value is the `Display` rendering of `value`.
    pub fn display(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn into_pair(self) -> (String, Value) {
        (self.key, self.value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_values() {
        assert_eq!(Field::new("port", 8080).value(), &json!(8080));
        assert_eq!(Field::new("ok", true).value(), &json!(true));
        assert_eq!(Field::display("addr", "127.0.0.1:80").value(), &json!("127.0.0.1:80"));
        assert_eq!(Field::from(("key", "value")).key(), "key");
    }
}
