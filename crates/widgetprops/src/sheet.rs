//! # Property Sheet
//!
//! A [`PropertySheet`] is the property table of a single widget: descriptors
//! keyed by path, each with its current [`PropertyValue`], plus the class of
//! the slot the widget sits in and its position among its siblings.
//!
//! It answers the two requests the editor sends:
//! - [`PropertySheet::get`] returns an `Outcome<PropertyGetResult>`
//! - [`PropertySheet::set`] returns an `Outcome<PropertySetResult>`
//!
//! Failures never escape as `Err`; they come back as `Outcome::Failure` with
//! the [`PropsError`] message, ready to be shown to the user.
//!
//! ## Paths
//!
//! Entries are looked up by the canonical text of their [`PropertyPath`].
//! A path whose last segment carries an index (`Items[2]`) that is not
//! itself an entry addresses one element of the array-valued entry `Items`.
//!
//! The reserved path [`CHILD_ORDER_PATH`] reads and writes the widget's
//! position among its siblings.
//!
//! ## Collection Operations
//!
//! Array-valued entries store their elements in the structured half of the
//! value. `insert`, `remove`, `append` and `clear` change the element count and
//! are reported as structural changes; `set` replaces one element in place.
//! The inserted element is the request's structured value if present, else
//! its string.

use crate::config::PropsConfig;
use crate::error::{PropsError, Result};
use crate::outcome::Outcome;
use crate::path::PropertyPath;
use crate::property::{PropertyDescriptor, PropertyInfo, PropertyUpdate};
use crate::request::{
    ChildPosition, CollectionOpKind, CollectionOperation, PropertyGetResult, PropertySetRequest,
    PropertySetResult,
};
use crate::value::PropertyValue;
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved path addressing the widget's position among its siblings.
pub const CHILD_ORDER_PATH: &str = "ChildOrder";

const CHILD_ORDER_TYPE: &str = "int32";

#[derive(Debug, Clone)]
struct Entry {
    descriptor: PropertyDescriptor,
    value: PropertyValue,
}

#[derive(Debug, Clone)]
pub struct PropertySheet {
    widget_name: String,
    slot_class: String,
    child_position: Option<ChildPosition>,
    entries: BTreeMap<String, Entry>,
    config: PropsConfig,
}

impl PropertySheet {
    pub fn new(widget_name: impl Into<String>) -> Self {
        Self::with_config(widget_name, PropsConfig::default())
    }

    pub fn with_config(widget_name: impl Into<String>, config: PropsConfig) -> Self {
        Self {
            widget_name: widget_name.into(),
            slot_class: String::new(),
            child_position: None,
            entries: BTreeMap::new(),
            config,
        }
    }

    /// Place the widget in a parent slot.
    pub fn in_slot(
        mut self,
        slot_class: impl Into<String>,
        position: ChildPosition,
    ) -> Result<Self> {
        if position.index >= position.count {
            return Err(PropsError::ChildOrder(format!(
                "index {} out of range for {} children",
                position.index, position.count
            )));
        }
        self.slot_class = slot_class.into();
        self.child_position = Some(position);
        Ok(self)
    }

    pub fn widget_name(&self) -> &str {
        &self.widget_name
    }

    pub fn slot_class(&self) -> &str {
        &self.slot_class
    }

    pub fn child_position(&self) -> Option<ChildPosition> {
        self.child_position
    }

    pub fn config(&self) -> &PropsConfig {
        &self.config
    }

    /// Register a string-valued property. Its value starts at the descriptor's current value.
    ///
    /// Fails if `path` is already defined.
    pub fn define(&mut self, path: &str, descriptor: PropertyDescriptor) -> Result<()> {
        let value = PropertyValue::from_string(descriptor.info.current_value.clone());
        self.insert_entry(path, descriptor, value)
    }

    /// Register a property holding a structured value, such as an array.
    ///
    /// Fails if `path` is already defined.
    pub fn define_json(
        &mut self,
        path: &str,
        descriptor: PropertyDescriptor,
        value: Value,
    ) -> Result<()> {
        self.insert_entry(path, descriptor, PropertyValue::from_json(value))
    }

    fn insert_entry(
        &mut self,
        path: &str,
        descriptor: PropertyDescriptor,
        value: PropertyValue,
    ) -> Result<()> {
        let key = self.parse_path(path)?.to_string();
        if key == CHILD_ORDER_PATH {
            return Err(PropsError::invalid_path(key, "path is reserved"));
        }
        if self.entries.contains_key(&key) {
            return Err(PropsError::DuplicateProperty(key));
        }
        self.entries.insert(key, Entry { descriptor, value });
        Ok(())
    }

    pub fn descriptor(&self, path: &str) -> Option<&PropertyDescriptor> {
        self.entries.get(path).map(|e| &e.descriptor)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata of every property, in path order.
    pub fn infos(&self) -> Vec<PropertyInfo> {
        self.entries
            .values()
            .map(|e| e.descriptor.info.clone())
            .collect()
    }

    pub fn get(&self, path: &str) -> Outcome<PropertyGetResult> {
        self.try_get(path).into()
    }

    pub fn set(&mut self, request: &PropertySetRequest) -> Outcome<PropertySetResult> {
        match self.try_set(request) {
            Ok(result) => {
                tracing::debug!(
                    widget = %self.widget_name,
                    path = %result.property_path,
                    structural = result.structural_change,
                    "property set"
                );
                Outcome::success(result)
            }
            Err(err) => {
                tracing::warn!(
                    widget = %self.widget_name,
                    path = %request.property_path,
                    error = %err,
                    "property set rejected"
                );
                Outcome::failure(err.to_string())
            }
        }
    }

    /// Apply an update addressed to this widget by name.
    pub fn apply_update(&mut self, update: &PropertyUpdate) -> Outcome<PropertySetResult> {
        if update.widget_name != self.widget_name {
            return Outcome::failure(
                PropsError::WrongWidget {
                    target: update.widget_name.clone(),
                    widget: self.widget_name.clone(),
                }
                .to_string(),
            );
        }
        self.set(&update.to_set_request())
    }

    fn parse_path(&self, path: &str) -> Result<PropertyPath> {
        PropertyPath::parse_with(path, &self.config)
    }

    fn try_get(&self, path: &str) -> Result<PropertyGetResult> {
        let path = self.parse_path(path)?;
        let key = path.to_string();

        if key == CHILD_ORDER_PATH {
            let position = self.child_position.ok_or_else(|| {
                PropsError::ChildOrder(format!("{} has no parent slot", self.widget_name))
            })?;
            return Ok(PropertyGetResult::new(
                key,
                PropertyValue::from_json(Value::from(position.index)),
                CHILD_ORDER_TYPE,
            )
            .with_slot_class(self.slot_class.clone())
            .with_child_position(position));
        }

        if let Some(entry) = self.entries.get(&key) {
            return Ok(self.describe(key, entry, entry.value.clone()));
        }

        let (owner, index) = self.element_target(&path)?;
        let entry = &self.entries[&owner];
        let element = array_of(&owner, &entry.value)?
            .get(index)
            .cloned()
            .ok_or_else(|| PropsError::collection("get", format!("index {} out of bounds", index)))?;
        Ok(self.describe(key, entry, PropertyValue::from_json(element)))
    }

    fn describe(&self, key: String, entry: &Entry, value: PropertyValue) -> PropertyGetResult {
        let descriptor = &entry.descriptor;
        let mut result = PropertyGetResult::new(key, value, descriptor.info.type_name.clone())
            .with_schema(descriptor.schema_json())
            .editable(descriptor.info.editable)
            .with_slot_class(self.slot_class.clone());
        if let Some(constraints) = descriptor.constraints_json() {
            result = result.with_constraints(constraints);
        }
        result
    }

    /// Resolve `Owner[i]` to the array entry `Owner` and the element index.
    fn element_target(&self, path: &PropertyPath) -> Result<(String, usize)> {
        let unknown = || PropsError::UnknownProperty(path.to_string());
        let index = path.leaf().index.ok_or_else(unknown)?;
        let owner = path.without_leaf_index().to_string();
        if !self.entries.contains_key(&owner) {
            return Err(unknown());
        }
        Ok((owner, index))
    }

    fn try_set(&mut self, request: &PropertySetRequest) -> Result<PropertySetResult> {
        let path = self.parse_path(&request.property_path)?;
        let key = path.to_string();

        if key == CHILD_ORDER_PATH {
            return self.reorder(request);
        }

        if self.entries.contains_key(&key) {
            return match &request.collection_operation {
                Some(operation) => {
                    let index = operation.index;
                    self.apply_collection(&key, operation, index, &request.value)
                }
                None => self.assign(&key, &request.value),
            };
        }

        // Owner[i] with no explicit operation replaces element i.
        let (owner, index) = self.element_target(&path)?;
        let operation = request
            .collection_operation
            .clone()
            .unwrap_or_else(|| CollectionOperation::at(CollectionOpKind::Set.as_str(), index));
        let index = operation.index.or(Some(index));
        let mut result = self.apply_collection(&owner, &operation, index, &request.value)?;
        result.property_path = key;
        Ok(result)
    }

    fn editable_entry(&mut self, key: &str) -> Result<&mut Entry> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| PropsError::UnknownProperty(key.to_string()))?;
        if !entry.descriptor.info.editable {
            return Err(PropsError::NotEditable(key.to_string()));
        }
        Ok(entry)
    }

    fn assign(&mut self, key: &str, value: &PropertyValue) -> Result<PropertySetResult> {
        if !value.has_value() {
            return Err(PropsError::TypeMismatch {
                path: key.to_string(),
                expected: "a string or structured value".to_string(),
            });
        }

        let entry = self.editable_entry(key)?;
        entry.descriptor.check_value(value)?;

        let unchanged = entry.value == *value;
        entry.value = value.clone();
        entry.descriptor.info.current_value = text_form(value);

        let mut result = PropertySetResult::new(key, value.clone());
        if unchanged {
            result = result.with_note("value unchanged");
        }
        Ok(result)
    }

    fn apply_collection(
        &mut self,
        key: &str,
        operation: &CollectionOperation,
        index: Option<usize>,
        value: &PropertyValue,
    ) -> Result<PropertySetResult> {
        let kind = operation.kind()?;
        let entry = self.editable_entry(key)?;

        let mut elements = match entry.value.as_json() {
            Some(_) => array_of(key, &entry.value)?.clone(),
            None => Vec::new(),
        };
        let len = elements.len();
        let out_of_bounds = |i: usize| {
            PropsError::collection(
                kind.as_str(),
                format!("index {} out of bounds ({} elements)", i, len),
            )
        };

        let index = if kind.requires_index() {
            let Some(i) = index else {
                return Err(PropsError::collection(kind.as_str(), "an index is required"));
            };
            i
        } else {
            len
        };

        match kind {
            CollectionOpKind::Insert => {
                if index > len {
                    return Err(out_of_bounds(index));
                }
                elements.insert(index, element_of(&entry.descriptor, key, value)?);
            }
            CollectionOpKind::Remove => {
                if index >= len {
                    return Err(out_of_bounds(index));
                }
                elements.remove(index);
            }
            CollectionOpKind::Set => {
                if index >= len {
                    return Err(out_of_bounds(index));
                }
                elements[index] = element_of(&entry.descriptor, key, value)?;
            }
            CollectionOpKind::Append => elements.push(element_of(&entry.descriptor, key, value)?),
            CollectionOpKind::Clear => elements.clear(),
        }

        let count = elements.len();
        let applied = Value::Array(elements);
        entry.descriptor.info.current_value = applied.to_string();
        entry.value.set_json(applied.clone());

        Ok(PropertySetResult::new(key, PropertyValue::from_json(applied))
            .with_collection_operation(kind.as_str())
            .structural(kind.is_structural())
            .with_note(format!("{} element(s)", count)))
    }

    fn reorder(&mut self, request: &PropertySetRequest) -> Result<PropertySetResult> {
        let position = self.child_position.ok_or_else(|| {
            PropsError::ChildOrder(format!("{} has no parent slot", self.widget_name))
        })?;
        let requested = requested_index(&request.value)?;

        let last = position.count - 1;
        let (index, note) = if requested <= last {
            (requested, String::new())
        } else if self.config.clamp_child_order {
            (last, format!("index {} clamped to {}", requested, last))
        } else {
            return Err(PropsError::ChildOrder(format!(
                "index {} out of range for {} children",
                requested, position.count
            )));
        };

        self.child_position = Some(ChildPosition { index, ..position });
        Ok(
            PropertySetResult::new(CHILD_ORDER_PATH, PropertyValue::from_json(Value::from(index)))
                .with_child_order(index)
                .with_note(note),
        )
    }
}

fn array_of<'a>(key: &str, value: &'a PropertyValue) -> Result<&'a Vec<Value>> {
    match value.as_json() {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(PropsError::TypeMismatch {
            path: key.to_string(),
            expected: "array".to_string(),
        }),
    }
}

/// The element carried by a collection request: structured value first, then string.
///
/// The descriptor's constraints apply to each element.
fn element_of(descriptor: &PropertyDescriptor, key: &str, value: &PropertyValue) -> Result<Value> {
    let element = match (value.as_json(), value.as_str()) {
        (Some(json), _) => json.clone(),
        (None, Some(text)) => Value::String(text.to_string()),
        (None, None) => {
            return Err(PropsError::TypeMismatch {
                path: key.to_string(),
                expected: "an element value".to_string(),
            })
        }
    };
    descriptor.check_json(&element)?;
    Ok(element)
}

/// Text shown as a property's current value: the string half if set, else
/// the structured half (bare for JSON strings).
fn text_form(value: &PropertyValue) -> String {
    match (value.as_str(), value.as_json()) {
        (Some(text), _) => text.to_string(),
        (None, Some(Value::String(text))) => text.clone(),
        (None, Some(json)) => json.to_string(),
        (None, None) => String::new(),
    }
}

fn requested_index(value: &PropertyValue) -> Result<usize> {
    let invalid = || PropsError::ChildOrder("child order must be a non-negative integer".to_string());
    if let Some(json) = value.as_json() {
        return json
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(invalid);
    }
    value
        .as_str()
        .ok_or_else(invalid)?
        .trim()
        .parse()
        .map_err(|_| invalid())
}
