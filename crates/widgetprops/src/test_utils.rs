use crate::property::{PropertyDescriptor, PropertyInfo};
use crate::request::ChildPosition;
use crate::sheet::PropertySheet;
use serde_json::json;

/// A text block sitting second of three in a vertical box.
pub fn sample_sheet() -> PropertySheet {
    let mut sheet = PropertySheet::new("TitleText")
        .in_slot("VerticalBoxSlot", ChildPosition { index: 1, count: 3 })
        .expect("valid slot position");

    sheet
        .define(
            "RenderOpacity",
            PropertyDescriptor::new(
                PropertyInfo::new("RenderOpacity", "float")
                    .category("Rendering")
                    .default_value("1.0")
                    .blueprint_visible(),
            )
            .with_range("0.0", "1.0"),
        )
        .expect("define RenderOpacity");
    sheet
        .define(
            "Visibility",
            PropertyDescriptor::new(
                PropertyInfo::new("Visibility", "ESlateVisibility")
                    .category("Behavior")
                    .default_value("Visible"),
            )
            .with_enum_values(["Visible", "Collapsed", "Hidden"]),
        )
        .expect("define Visibility");
    sheet
        .define(
            "ToolTipText",
            PropertyInfo::new("ToolTipText", "FText")
                .category("Behavior")
                .into(),
        )
        .expect("define ToolTipText");
    sheet
        .define(
            "Slot",
            PropertyInfo::new("Slot", "UVerticalBoxSlot")
                .category("Layout")
                .read_only()
                .into(),
        )
        .expect("define Slot");
    sheet
        .define(
            "Slot.Padding",
            PropertyInfo::new("Padding", "FMargin")
                .category("Layout")
                .default_value("(0,0,0,0)")
                .into(),
        )
        .expect("define Slot.Padding");
    sheet
        .define_json(
            "Tags",
            PropertyInfo::new("Tags", "TArray<FName>").into(),
            json!(["ui", "header"]),
        )
        .expect("define Tags");

    sheet
}
