//! Value shapes that can travel through the translator.
//!
//! The translator receives one flat JSON object and answers with the same
//! keys. Each translatable field knows how to put itself into that object and
//! how to read a translated value back out, rejecting values of the wrong
//! shape instead of guessing.

use serde_json::{Map, Value};

/// Flat key -> value object exchanged with the translator.
pub type TranslationPayload = Map<String, Value>;

pub trait TranslatableValue: Sized {
    fn to_value(&self) -> Value;

    /// `None` when the value is not of this field's shape.
    fn from_value(value: &Value) -> Option<Self>;

    /// Reads `key` from a translator response. Absent or mistyped keys yield
    /// `None` so the caller keeps its pre-translation value.
    fn pick(response: &TranslationPayload, key: &str) -> Option<Self> {
        response.get(key).and_then(Self::from_value)
    }
}

impl TranslatableValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl TranslatableValue for Vec<String> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().cloned().map(Value::String).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_string_is_a_valid_translation() {
        assert_eq!(String::from_value(&json!("")), Some(String::new()));
    }

    #[test]
    fn test_mixed_array_is_rejected() {
        assert_eq!(Vec::<String>::from_value(&json!(["a", 1])), None);
        assert_eq!(
            Vec::<String>::from_value(&json!(["a", "b"])),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_pick_ignores_wrong_shape() {
        let mut response = TranslationPayload::new();
        response.insert("title".to_string(), json!(["not", "a", "string"]));
        assert_eq!(String::pick(&response, "title"), None);
        assert_eq!(String::pick(&response, "missing"), None);
    }
}
