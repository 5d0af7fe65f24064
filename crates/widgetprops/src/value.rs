//! Property value holder.
//!
//! A property value is either a plain string (the editor's text form, such as
//! `(10,10,10,10)` for a margin) or a structured JSON value, depending on the
//! kind of property. The two are independent: both may be absent, either may
//! be set, or both may be set at once. Nothing here picks one over the other
//! when both are present; that is left to whoever consumes the value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

impl PropertyValue {
    /// An empty value, with neither representation set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Self {
            string: Some(value.into()),
            json: None,
        }
    }

    pub fn from_json(value: Value) -> Self {
        Self {
            string: None,
            json: Some(value),
        }
    }

    pub fn with_string(mut self, value: impl Into<String>) -> Self {
        self.string = Some(value.into());
        self
    }

    pub fn with_json(mut self, value: Value) -> Self {
        self.json = Some(value);
        self
    }

    /// Set the string form. The structured form, if any, is left alone.
    pub fn set_string(&mut self, value: impl Into<String>) {
        self.string = Some(value.into());
    }

    /// Set the structured form. The string form, if any, is left alone.
    pub fn set_json(&mut self, value: Value) {
        self.json = Some(value);
    }

    pub fn has_string(&self) -> bool {
        self.string.is_some()
    }

    pub fn has_json(&self) -> bool {
        self.json.is_some()
    }

    pub fn has_value(&self) -> bool {
        self.has_string() || self.has_json()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.string.as_deref()
    }

    pub fn as_json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    pub fn as_json_mut(&mut self) -> Option<&mut Value> {
        self.json.as_mut()
    }

    pub fn clear(&mut self) {
        self.string = None;
        self.json = None;
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_value_has_nothing() {
        let value = PropertyValue::new();
        assert!(!value.has_string());
        assert!(!value.has_json());
        assert!(!value.has_value());
    }

    #[test]
    fn string_only() {
        let value = PropertyValue::from_string("Visible");
        assert!(value.has_string());
        assert!(!value.has_json());
        assert!(value.has_value());
        assert_eq!(value.as_str(), Some("Visible"));
    }

    #[test]
    fn json_only() {
        let value = PropertyValue::from_json(json!({ "Left": 4 }));
        assert!(!value.has_string());
        assert!(value.has_json());
        assert!(value.has_value());
        assert_eq!(value.as_json(), Some(&json!({ "Left": 4 })));
    }

    #[test]
    fn setting_one_does_not_clear_the_other() {
        let mut value = PropertyValue::from_string("(1,2,3,4)");
        value.set_json(json!([1, 2, 3, 4]));
        assert!(value.has_string());
        assert!(value.has_json());

        value.set_string("(5,6,7,8)");
        assert_eq!(value.as_str(), Some("(5,6,7,8)"));
        assert_eq!(value.as_json(), Some(&json!([1, 2, 3, 4])));
    }

    #[test]
    fn both_set_round_trips_through_json() {
        let value = PropertyValue::new()
            .with_string("Red")
            .with_json(json!({ "R": 1.0, "G": 0.0, "B": 0.0 }));

        let text = serde_json::to_string(&value).unwrap();
        let back: PropertyValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
        assert!(back.has_string() && back.has_json());
    }

    #[test]
    fn absent_fields_are_omitted_and_default_on_read() {
        let text = serde_json::to_string(&PropertyValue::from_string("x")).unwrap();
        assert_eq!(text, r#"{"string":"x"}"#);

        let back: PropertyValue = serde_json::from_str("{}").unwrap();
        assert!(!back.has_value());
    }

    #[test]
    fn json_null_counts_as_set() {
        let value = PropertyValue::from_json(Value::Null);
        assert!(value.has_json());
    }

    #[test]
    fn clear_removes_both() {
        let mut value = PropertyValue::from_string("a").with_json(json!(1));
        value.clear();
        assert!(!value.has_value());
    }
}
