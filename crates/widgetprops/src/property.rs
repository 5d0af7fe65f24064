//! Property metadata and update records.
//!
//! [`PropertyInfo`] is the flat description of one widget property as the
//! editor shows it: name, type tag, category, and stringified default and
//! current values. [`PropertyDescriptor`] adds the optional constraints
//! (numeric bounds and allowed enumeration values) used to validate edits.
//! [`PropertyUpdate`] is a single edit request addressed to a widget by name.
//!
//! Type names are plain string tags (`"float"`, `"FMargin"`, `"ESlateVisibility"`),
//! not a type system; nothing here interprets them beyond echoing them back.

use crate::error::{PropsError, Result};
use crate::path::PropertyPath;
use crate::request::PropertySetRequest;
use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub current_value: String,
    #[serde(default = "default_editable")]
    pub editable: bool,
    #[serde(default)]
    pub blueprint_visible: bool,
}

fn default_editable() -> bool {
    true
}

impl PropertyInfo {
    /// Create an editable property with empty category and values.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            category: String::new(),
            default_value: String::new(),
            current_value: String::new(),
            editable: true,
            blueprint_visible: false,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the default value. The current value starts out equal to it.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self.current_value = self.default_value.clone();
        self
    }

    pub fn current_value(mut self, value: impl Into<String>) -> Self {
        self.current_value = value.into();
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn blueprint_visible(mut self) -> Self {
        self.blueprint_visible = true;
        self
    }

    pub fn is_default(&self) -> bool {
        self.current_value == self.default_value
    }
}

/// A property plus the constraints its values must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub info: PropertyInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<String>,

    /// Allowed values, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertyDescriptor {
    pub fn new(info: PropertyInfo) -> Self {
        Self {
            info,
            min_value: None,
            max_value: None,
            enum_values: None,
        }
    }

    pub fn with_min(mut self, min: impl Into<String>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max_value = Some(max.into());
        self
    }

    pub fn with_range(self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.with_min(min).with_max(max)
    }

    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn has_constraints(&self) -> bool {
        self.min_value.is_some() || self.max_value.is_some() || self.enum_values.is_some()
    }

    /// Constraint object as reported in [`crate::PropertyGetResult::constraints`].
    ///
    /// Keys appear only when the matching constraint is set:
    /// `{"min": "0", "max": "1", "enum_values": ["A", "B"]}`.
    pub fn constraints_json(&self) -> Option<Value> {
        if !self.has_constraints() {
            return None;
        }
        let mut map = Map::new();
        if let Some(min) = &self.min_value {
            map.insert("min".to_string(), Value::String(min.clone()));
        }
        if let Some(max) = &self.max_value {
            map.insert("max".to_string(), Value::String(max.clone()));
        }
        if let Some(values) = &self.enum_values {
            map.insert("enum_values".to_string(), json!(values));
        }
        Some(Value::Object(map))
    }

    /// Schema object describing the shape of the property's value.
    pub fn schema_json(&self) -> Value {
        let mut schema = json!({
            "type": self.info.type_name,
            "default": self.info.default_value,
        });
        if let Some(values) = &self.enum_values {
            schema["enum"] = json!(values);
        }
        schema
    }

    /// Validate a string value against the bounds and allowed values.
    ///
    /// Bounds apply to values that parse as numbers; a bounded property
    /// rejects non-numeric input. A bound that itself does not parse is
    /// ignored.
    pub fn check(&self, value: &str) -> Result<()> {
        if let Some(allowed) = &self.enum_values {
            if !allowed.iter().any(|v| v == value) {
                return Err(PropsError::NotAllowed {
                    path: self.info.name.clone(),
                    value: value.to_string(),
                });
            }
        }

        if self.min_value.is_none() && self.max_value.is_none() {
            return Ok(());
        }

        let number: f64 = value
            .trim()
            .parse()
            .ok()
            .filter(|n: &f64| n.is_finite())
            .ok_or_else(|| self.type_mismatch("number"))?;

        if let Some(min) = self.min_value.as_deref().and_then(|m| parse_bound(&self.info.name, m)) {
            if number < min {
                return Err(self.out_of_range(value, format!("min {}", min)));
            }
        }
        if let Some(max) = self.max_value.as_deref().and_then(|m| parse_bound(&self.info.name, m)) {
            if number > max {
                return Err(self.out_of_range(value, format!("max {}", max)));
            }
        }
        Ok(())
    }

    /// Validate a structured value.
    ///
    /// Scalars go through [`check`](Self::check) in their text form. A
    /// constrained property only accepts scalars; an unconstrained one
    /// accepts anything.
    pub fn check_json(&self, value: &Value) -> Result<()> {
        if !self.has_constraints() {
            return Ok(());
        }
        match value {
            Value::String(text) => self.check(text),
            Value::Number(number) => self.check(&number.to_string()),
            Value::Bool(flag) => self.check(if *flag { "true" } else { "false" }),
            _ => Err(self.type_mismatch("a scalar value")),
        }
    }

    /// Validate both halves of a property value.
    pub fn check_value(&self, value: &PropertyValue) -> Result<()> {
        if let Some(text) = value.as_str() {
            self.check(text)?;
        }
        if let Some(json) = value.as_json() {
            self.check_json(json)?;
        }
        Ok(())
    }

    fn type_mismatch(&self, expected: &str) -> PropsError {
        PropsError::TypeMismatch {
            path: self.info.name.clone(),
            expected: expected.to_string(),
        }
    }

    fn out_of_range(&self, value: &str, bound: String) -> PropsError {
        PropsError::OutOfRange {
            path: self.info.name.clone(),
            value: value.to_string(),
            bound,
        }
    }
}

fn parse_bound(property: &str, bound: &str) -> Option<f64> {
    match bound.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(property, bound, "ignoring non-numeric bound");
            None
        }
    }
}

impl From<PropertyInfo> for PropertyDescriptor {
    fn from(info: PropertyInfo) -> Self {
        Self::new(info)
    }
}

/// A string edit addressed to a widget by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub widget_name: String,
    /// Dot path, e.g. `Slot.Padding`.
    pub property_path: String,
    pub new_value: String,
    /// Type hint for interpreting `new_value`.
    #[serde(default)]
    pub value_type: String,
}

impl PropertyUpdate {
    pub fn new(
        widget_name: impl Into<String>,
        property_path: impl Into<String>,
        new_value: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        Self {
            widget_name: widget_name.into(),
            property_path: property_path.into(),
            new_value: new_value.into(),
            value_type: value_type.into(),
        }
    }

    pub fn path(&self) -> Result<PropertyPath> {
        PropertyPath::parse(&self.property_path)
    }

    /// The equivalent set request, carrying `new_value` as a string.
    pub fn to_set_request(&self) -> PropertySetRequest {
        PropertySetRequest::new(
            self.property_path.clone(),
            PropertyValue::from_string(self.new_value.clone()),
        )
    }
}
