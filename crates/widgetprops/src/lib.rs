//! # widgetprops
//!
//! Typed records for a widget-editing tool: the outcome of an operation and
//! the metadata, requests and results that describe widget properties.
//!
//! ## Layers
//!
//! - [`outcome`]: [`Outcome<T>`], success with a payload or failure with a message
//! - [`value`]: [`PropertyValue`], a string and/or structured JSON value
//! - [`path`]: [`PropertyPath`], dot paths such as `Slot.Padding`
//! - [`property`]: [`PropertyInfo`], [`PropertyDescriptor`], [`PropertyUpdate`]
//! - [`request`]: set/get requests and results, collection operations, child order
//! - [`sheet`]: [`PropertySheet`], one widget's property table answering get/set
//!
//! Supporting modules: [`error`] for the crate's own fallible operations,
//! [`config`] for layered settings, and [`logging`] for subscriber setup.
//!
//! ## Usage
//!
//! ```
//! use widgetprops::{PropertyDescriptor, PropertyInfo, PropertySetRequest, PropertySheet, PropertyValue};
//!
//! let mut sheet = PropertySheet::new("TitleText");
//! sheet
//!     .define("Slot.Padding", PropertyDescriptor::new(PropertyInfo::new("Padding", "FMargin")))
//!     .unwrap();
//!
//! let request = PropertySetRequest::new("Slot.Padding", PropertyValue::from_string("(10,10,10,10)"));
//! let outcome = sheet.set(&request);
//! assert!(outcome.is_success());
//! assert_eq!(outcome.value().property_path, "Slot.Padding");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod outcome;
pub mod path;
pub mod property;
pub mod request;
pub mod sheet;
pub mod value;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::PropsConfig;
pub use error::{PropsError, Result};
pub use outcome::Outcome;
pub use path::{PathSegment, PropertyPath};
pub use property::{PropertyDescriptor, PropertyInfo, PropertyUpdate};
pub use request::{
    ChildPosition, CollectionOpKind, CollectionOperation, PropertyGetResult, PropertySetRequest,
    PropertySetResult, INDEX_NONE,
};
pub use sheet::{PropertySheet, CHILD_ORDER_PATH};
pub use value::PropertyValue;
