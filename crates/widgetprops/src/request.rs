//! Get/set request and result records.
//!
//! ## Child Order
//!
//! A widget's position among its siblings is reported through a flag and an
//! index. When the flag is off, the index is [`INDEX_NONE`] (`-1`), which is
//! distinct from a valid index of zero. Both result types keep the pair
//! private and expose it through accessors, so the two can never disagree;
//! deserialization rejects payloads where they do.

use crate::error::PropsError;
use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Child-order index meaning "not applicable".
pub const INDEX_NONE: i32 = -1;

/// Wire form of a child-order index. Indexes past `i32::MAX` saturate to
/// `i32::MAX`; sibling counts never get near it.
fn index_to_wire(index: Option<usize>) -> i32 {
    index.map_or(INDEX_NONE, |i| i32::try_from(i).unwrap_or(i32::MAX))
}

/// Known collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOpKind {
    /// Insert the value at `index`.
    Insert,
    /// Remove the element at `index`.
    Remove,
    /// Push the value at the end.
    Append,
    /// Remove every element.
    Clear,
    /// Replace the element at `index`.
    Set,
}

impl CollectionOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionOpKind::Insert => "insert",
            CollectionOpKind::Remove => "remove",
            CollectionOpKind::Append => "append",
            CollectionOpKind::Clear => "clear",
            CollectionOpKind::Set => "set",
        }
    }

    /// Whether the operation changes the number of elements.
    pub fn is_structural(&self) -> bool {
        !matches!(self, CollectionOpKind::Set)
    }

    pub fn requires_index(&self) -> bool {
        matches!(
            self,
            CollectionOpKind::Insert | CollectionOpKind::Remove | CollectionOpKind::Set
        )
    }
}

impl fmt::Display for CollectionOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionOpKind {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insert" => Ok(CollectionOpKind::Insert),
            "remove" => Ok(CollectionOpKind::Remove),
            "append" | "add" => Ok(CollectionOpKind::Append),
            "clear" => Ok(CollectionOpKind::Clear),
            "set" => Ok(CollectionOpKind::Set),
            _ => Err(PropsError::collection(s, "unknown operation")),
        }
    }
}

/// An edit on an array-like property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOperation {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl CollectionOperation {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            index: None,
        }
    }

    pub fn at(operation: impl Into<String>, index: usize) -> Self {
        Self {
            operation: operation.into(),
            index: Some(index),
        }
    }

    pub fn kind(&self) -> Result<CollectionOpKind, PropsError> {
        self.operation.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySetRequest {
    pub property_path: String,
    pub value: PropertyValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_operation: Option<CollectionOperation>,
}

impl PropertySetRequest {
    pub fn new(property_path: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            property_path: property_path.into(),
            value,
            collection_operation: None,
        }
    }

    pub fn with_collection_operation(mut self, operation: CollectionOperation) -> Self {
        self.collection_operation = Some(operation);
        self
    }
}

/// What a set actually did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SetResultWire", into = "SetResultWire")]
pub struct PropertySetResult {
    pub property_path: String,
    pub applied_value: PropertyValue,
    pub note: String,
    /// Name of the collection operation performed, empty when there was none.
    pub collection_operation: String,
    pub structural_change: bool,
    child_order: Option<usize>,
}

impl PropertySetResult {
    pub fn new(property_path: impl Into<String>, applied_value: PropertyValue) -> Self {
        Self {
            property_path: property_path.into(),
            applied_value,
            note: String::new(),
            collection_operation: String::new(),
            structural_change: false,
            child_order: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_collection_operation(mut self, operation: impl Into<String>) -> Self {
        self.collection_operation = operation.into();
        self
    }

    pub fn structural(mut self, structural: bool) -> Self {
        self.structural_change = structural;
        self
    }

    /// Record that the children were reordered and this widget now sits at `index`.
    pub fn with_child_order(mut self, index: usize) -> Self {
        self.child_order = Some(index);
        self
    }

    pub fn child_order_updated(&self) -> bool {
        self.child_order.is_some()
    }

    /// New position among siblings, or [`INDEX_NONE`].
    /// The wire index: [`INDEX_NONE`] unless the order changed, saturating at `i32::MAX`.
    pub fn child_order_index(&self) -> i32 {
        index_to_wire(self.child_order)
    }

    pub fn child_order(&self) -> Option<usize> {
        self.child_order
    }
}

#[derive(Serialize, Deserialize)]
struct SetResultWire {
    property_path: String,
    #[serde(default)]
    applied_value: PropertyValue,
    #[serde(default)]
    note: String,
    #[serde(default)]
    collection_operation: String,
    #[serde(default)]
    structural_change: bool,
    #[serde(default)]
    child_order_updated: bool,
    #[serde(default = "index_none")]
    child_order_index: i32,
}

fn index_none() -> i32 {
    INDEX_NONE
}

impl From<PropertySetResult> for SetResultWire {
    fn from(result: PropertySetResult) -> Self {
        Self {
            child_order_updated: result.child_order.is_some(),
            child_order_index: index_to_wire(result.child_order),
            property_path: result.property_path,
            applied_value: result.applied_value,
            note: result.note,
            collection_operation: result.collection_operation,
            structural_change: result.structural_change,
        }
    }
}

impl TryFrom<SetResultWire> for PropertySetResult {
    type Error = PropsError;

    fn try_from(wire: SetResultWire) -> Result<Self, Self::Error> {
        let child_order = child_order_from_wire(wire.child_order_updated, wire.child_order_index)?;
        Ok(Self {
            property_path: wire.property_path,
            applied_value: wire.applied_value,
            note: wire.note,
            collection_operation: wire.collection_operation,
            structural_change: wire.structural_change,
            child_order,
        })
    }
}

fn child_order_from_wire(flag: bool, index: i32) -> Result<Option<usize>, PropsError> {
    match (flag, index) {
        (false, INDEX_NONE) => Ok(None),
        (false, other) => Err(PropsError::ChildOrder(format!(
            "index {} present without the child order flag",
            other
        ))),
        (true, index) => usize::try_from(index)
            .map(Some)
            .map_err(|_| PropsError::ChildOrder(format!("invalid child order index {}", index))),
    }
}

/// A widget's slot among its parent's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildPosition {
    pub index: usize,
    pub count: usize,
}

/// The current state of one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GetResultWire", into = "GetResultWire")]
pub struct PropertyGetResult {
    pub property_path: String,
    pub value: PropertyValue,
    pub type_name: String,
    /// Legal values, e.g. `{"min": "0", "max": "1"}`.
    pub constraints: Option<Value>,
    /// Shape of the value, e.g. `{"type": "float", "default": "1.0"}`.
    pub schema: Option<Value>,
    pub editable: bool,
    /// Class of the slot that owns the widget, empty when unparented.
    pub slot_class: String,
    child_position: Option<ChildPosition>,
}

impl PropertyGetResult {
    pub fn new(
        property_path: impl Into<String>,
        value: PropertyValue,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            property_path: property_path.into(),
            value,
            type_name: type_name.into(),
            constraints: None,
            schema: None,
            editable: true,
            slot_class: String::new(),
            child_position: None,
        }
    }

    pub fn with_constraints(mut self, constraints: Value) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_slot_class(mut self, slot_class: impl Into<String>) -> Self {
        self.slot_class = slot_class.into();
        self
    }

    /// Mark this result as describing the widget's child order.
    pub fn with_child_position(mut self, position: ChildPosition) -> Self {
        self.child_position = Some(position);
        self
    }

    pub fn is_child_order(&self) -> bool {
        self.child_position.is_some()
    }

    /// Position among siblings, or [`INDEX_NONE`].
    pub fn child_order_index(&self) -> i32 {
        index_to_wire(self.child_position.map(|p| p.index))
    }

    /// Number of siblings including this widget, zero when not a child-order result.
    pub fn child_count(&self) -> usize {
        self.child_position.map_or(0, |p| p.count)
    }

    pub fn child_position(&self) -> Option<ChildPosition> {
        self.child_position
    }
}

#[derive(Serialize, Deserialize)]
struct GetResultWire {
    property_path: String,
    #[serde(default)]
    value: PropertyValue,
    #[serde(default)]
    type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    constraints: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<Value>,
    #[serde(default)]
    editable: bool,
    #[serde(default)]
    slot_class: String,
    #[serde(default)]
    is_child_order: bool,
    #[serde(default = "index_none")]
    child_order_index: i32,
    #[serde(default)]
    child_count: usize,
}

impl From<PropertyGetResult> for GetResultWire {
    fn from(result: PropertyGetResult) -> Self {
        Self {
            is_child_order: result.is_child_order(),
            child_order_index: result.child_order_index(),
            child_count: result.child_count(),
            property_path: result.property_path,
            value: result.value,
            type_name: result.type_name,
            constraints: result.constraints,
            schema: result.schema,
            editable: result.editable,
            slot_class: result.slot_class,
        }
    }
}

impl TryFrom<GetResultWire> for PropertyGetResult {
    type Error = PropsError;

    fn try_from(wire: GetResultWire) -> Result<Self, Self::Error> {
        let child_position = child_order_from_wire(wire.is_child_order, wire.child_order_index)?
            .map(|index| ChildPosition {
                index,
                count: wire.child_count,
            });
        if let Some(position) = child_position {
            if position.index >= position.count {
                return Err(PropsError::ChildOrder(format!(
                    "index {} out of range for {} children",
                    position.index, position.count
                )));
            }
        }
        Ok(Self {
            property_path: wire.property_path,
            value: wire.value,
            type_name: wire.type_name,
            constraints: wire.constraints,
            schema: wire.schema,
            editable: wire.editable,
            slot_class: wire.slot_class,
            child_position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn padding_request_echoes_into_result() {
        let request =
            PropertySetRequest::new("Slot.Padding", PropertyValue::from_string("(10,10,10,10)"));
        assert!(request.collection_operation.is_none());

        let result = PropertySetResult::new(request.property_path.clone(), request.value.clone())
            .structural(false);

        assert_eq!(result.property_path, "Slot.Padding");
        assert_eq!(result.applied_value.as_str(), Some("(10,10,10,10)"));
        assert!(result.collection_operation.is_empty());
        assert!(!result.structural_change);
        assert!(!result.child_order_updated());
        assert_eq!(result.child_order_index(), INDEX_NONE);
    }

    #[test]
    fn wire_index_saturates() {
        assert_eq!(index_to_wire(None), INDEX_NONE);
        assert_eq!(index_to_wire(Some(7)), 7);
        assert_eq!(index_to_wire(Some(i32::MAX as usize)), i32::MAX);
        assert_eq!(index_to_wire(Some(usize::MAX)), i32::MAX);

        let result = PropertySetResult::new("ChildOrder", PropertyValue::new())
            .with_child_order(usize::MAX);
        assert_eq!(result.child_order_index(), i32::MAX);
        assert_eq!(result.child_order(), Some(usize::MAX));
    }

    #[test]
    fn child_order_index_tracks_flag() {
        let result = PropertySetResult::new("ChildOrder", PropertyValue::new());
        assert!(!result.child_order_updated());
        assert_eq!(result.child_order_index(), INDEX_NONE);

        let result = result.with_child_order(0);
        assert!(result.child_order_updated());
        assert_eq!(result.child_order_index(), 0);
        assert_eq!(result.child_order(), Some(0));
    }

    #[test]
    fn set_result_wire_keeps_sentinel() {
        let result = PropertySetResult::new("Text", PropertyValue::from_string("Hi"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["child_order_updated"], json!(false));
        assert_eq!(value["child_order_index"], json!(-1));
        assert_eq!(value["collection_operation"], json!(""));

        let back: PropertySetResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn set_result_wire_round_trips_child_order() {
        let result = PropertySetResult::new("ChildOrder", PropertyValue::from_json(json!(2)))
            .with_child_order(2)
            .structural(true)
            .with_note("moved");
        let text = serde_json::to_string(&result).unwrap();
        let back: PropertySetResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.child_order_index(), 2);
    }

    #[test]
    fn set_result_wire_rejects_inconsistent_child_order() {
        let flagless = json!({
            "property_path": "X",
            "child_order_updated": false,
            "child_order_index": 3,
        });
        assert!(serde_json::from_value::<PropertySetResult>(flagless).is_err());

        let sentinel_with_flag = json!({
            "property_path": "X",
            "child_order_updated": true,
            "child_order_index": -1,
        });
        assert!(serde_json::from_value::<PropertySetResult>(sentinel_with_flag).is_err());
    }

    #[test]
    fn set_result_wire_defaults_missing_child_order_to_sentinel() {
        let minimal = json!({ "property_path": "X" });
        let result: PropertySetResult = serde_json::from_value(minimal).unwrap();
        assert_eq!(result.child_order_index(), INDEX_NONE);
    }

    #[test]
    fn get_result_without_child_order() {
        let result = PropertyGetResult::new("Text", PropertyValue::from_string("Hi"), "FText")
            .with_slot_class("CanvasPanelSlot");
        assert!(!result.is_child_order());
        assert_eq!(result.child_order_index(), INDEX_NONE);
        assert_eq!(result.child_count(), 0);
        assert!(result.constraints.is_none());
        assert!(result.schema.is_none());
    }

    #[test]
    fn get_result_with_child_order() {
        let result = PropertyGetResult::new("ChildOrder", PropertyValue::from_json(json!(1)), "int32")
            .with_child_position(ChildPosition { index: 1, count: 3 });
        assert!(result.is_child_order());
        assert_eq!(result.child_order_index(), 1);
        assert_eq!(result.child_count(), 3);

        let back: PropertyGetResult =
            serde_json::from_value(serde_json::to_value(&result).unwrap()).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn get_result_wire_rejects_index_past_count() {
        let bad = json!({
            "property_path": "ChildOrder",
            "is_child_order": true,
            "child_order_index": 3,
            "child_count": 3,
        });
        assert!(serde_json::from_value::<PropertyGetResult>(bad).is_err());
    }

    #[test]
    fn get_result_wire_omits_absent_metadata() {
        let result = PropertyGetResult::new("Text", PropertyValue::new(), "FText");
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("constraints").is_none());
        assert!(value.get("schema").is_none());
    }

    #[test]
    fn collection_kind_parsing() {
        assert_eq!(
            CollectionOperation::at("Insert", 0).kind().unwrap(),
            CollectionOpKind::Insert
        );
        assert_eq!(
            CollectionOperation::new("add").kind().unwrap(),
            CollectionOpKind::Append
        );
        assert!(CollectionOperation::new("shuffle").kind().is_err());
    }

    #[test]
    fn collection_kind_properties() {
        assert!(CollectionOpKind::Insert.is_structural());
        assert!(CollectionOpKind::Clear.is_structural());
        assert!(!CollectionOpKind::Set.is_structural());
        assert!(CollectionOpKind::Remove.requires_index());
        assert!(!CollectionOpKind::Append.requires_index());
        assert_eq!(CollectionOpKind::Clear.to_string(), "clear");
    }

    #[test]
    fn set_request_serde_omits_missing_operation() {
        let request = PropertySetRequest::new("Items", PropertyValue::from_json(json!("a")))
            .with_collection_operation(CollectionOperation::at("insert", 1));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["collection_operation"], json!({ "operation": "insert", "index": 1 }));

        let plain = PropertySetRequest::new("Items", PropertyValue::new());
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("collection_operation").is_none());
    }
}
