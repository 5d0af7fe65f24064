use serde_json::json;
use widgetprops::{
    ChildPosition, Outcome, PropertyDescriptor, PropertyGetResult, PropertyInfo,
    PropertySetRequest, PropertySetResult, PropertySheet, PropsConfig, CHILD_ORDER_PATH,
    INDEX_NONE,
};

fn button_sheet(config: PropsConfig) -> PropertySheet {
    let mut sheet = PropertySheet::with_config("PlayButton", config)
        .in_slot("CanvasPanelSlot", ChildPosition { index: 0, count: 4 })
        .unwrap();
    sheet
        .define(
            "IsEnabled",
            PropertyDescriptor::new(PropertyInfo::new("IsEnabled", "bool").default_value("true"))
                .with_enum_values(["true", "false"]),
        )
        .unwrap();
    sheet
        .define(
            "Slot.Padding",
            PropertyInfo::new("Padding", "FMargin")
                .default_value("(0,0,0,0)")
                .into(),
        )
        .unwrap();
    sheet
        .define_json(
            "Style.States",
            PropertyInfo::new("States", "TArray<FButtonState>").into(),
            json!([]),
        )
        .unwrap();
    sheet
}

#[test]
fn requests_from_json_produce_json_outcomes() {
    let mut sheet = button_sheet(PropsConfig::default());

    let request: PropertySetRequest = serde_json::from_value(json!({
        "property_path": "Slot.Padding",
        "value": { "string": "(10,10,10,10)" }
    }))
    .unwrap();
    let outcome = sheet.set(&request);

    let wire = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        wire,
        json!({
            "success": {
                "property_path": "Slot.Padding",
                "applied_value": { "string": "(10,10,10,10)" },
                "note": "",
                "collection_operation": "",
                "structural_change": false,
                "child_order_updated": false,
                "child_order_index": -1
            }
        })
    );

    let back: Outcome<PropertySetResult> = serde_json::from_value(wire).unwrap();
    assert_eq!(back, outcome);
}

#[test]
fn collection_edits_over_json() {
    let mut sheet = button_sheet(PropsConfig::default());

    for (i, state) in ["Normal", "Hovered", "Pressed"].iter().enumerate() {
        let request: PropertySetRequest = serde_json::from_value(json!({
            "property_path": "Style.States",
            "value": { "json": { "name": state } },
            "collection_operation": { "operation": "insert", "index": i }
        }))
        .unwrap();
        let result = sheet.set(&request).into_value();
        assert!(result.structural_change);
        assert_eq!(result.collection_operation, "insert");
    }

    let element = sheet.get("Style.States[2]").into_value();
    assert_eq!(element.value.as_json(), Some(&json!({ "name": "Pressed" })));

    let request: PropertySetRequest = serde_json::from_value(json!({
        "property_path": "Style.States",
        "value": {},
        "collection_operation": { "operation": "remove", "index": 1 }
    }))
    .unwrap();
    let result = sheet.set(&request).into_value();
    assert_eq!(
        result.applied_value.as_json(),
        Some(&json!([{ "name": "Normal" }, { "name": "Pressed" }]))
    );
}

#[test]
fn failures_carry_messages_on_the_wire() {
    let mut sheet = button_sheet(PropsConfig::default());
    let request: PropertySetRequest = serde_json::from_value(json!({
        "property_path": "IsEnabled",
        "value": { "string": "maybe" }
    }))
    .unwrap();

    let wire = serde_json::to_value(sheet.set(&request)).unwrap();
    assert_eq!(
        wire,
        json!({ "failure": "Value 'maybe' is not one of the allowed values of IsEnabled" })
    );
}

#[test]
fn child_order_round_trip() {
    let mut sheet = button_sheet(PropsConfig::default());

    let before: PropertyGetResult = sheet.get(CHILD_ORDER_PATH).into_value();
    assert_eq!(before.child_order_index(), 0);
    assert_eq!(before.child_count(), 4);

    let request: PropertySetRequest = serde_json::from_value(json!({
        "property_path": CHILD_ORDER_PATH,
        "value": { "json": 3 }
    }))
    .unwrap();
    let result = sheet.set(&request).into_value();
    assert!(result.child_order_updated());
    assert_eq!(result.child_order_index(), 3);

    let wire = serde_json::to_value(&sheet.get(CHILD_ORDER_PATH)).unwrap();
    assert_eq!(wire["success"]["is_child_order"], json!(true));
    assert_eq!(wire["success"]["child_order_index"], json!(3));
    assert_eq!(wire["success"]["child_count"], json!(4));

    let padding = sheet.get("Slot.Padding").into_value();
    assert_eq!(padding.child_order_index(), INDEX_NONE);
}

#[test]
fn config_file_limits_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widgetprops.toml");
    std::fs::write(
        &path,
        "max_path_depth = 1\nallow_indexed_segments = false\n",
    )
    .unwrap();
    let config = PropsConfig::load_file(&path).unwrap();
    assert_eq!(config.max_path_depth, 1);

    let mut sheet = PropertySheet::with_config("Label", config);
    assert!(sheet
        .define("Slot.Padding", PropertyInfo::new("Padding", "FMargin").into())
        .is_err());
    sheet
        .define("Text", PropertyInfo::new("Text", "FText").into())
        .unwrap();
    assert!(sheet.get("Text").is_success());
    assert!(sheet.get("Text[0]").is_failure());
}
