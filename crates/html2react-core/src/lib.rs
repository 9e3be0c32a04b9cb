//! Transform HTML fragments into React-style element trees.
//!
//! This crate provides the core transformation: HTML attribute names are mapped to
//! their React property spelling, every node gets a positional key, and tags found
//! in a [`ComponentMap`] are built as components instead of generic elements.

pub mod attributes;
pub mod element;
pub mod emit;
pub mod registry;
pub mod traits;
pub mod transform;

pub use attributes::{map_attribute, map_attributes, Props};
pub use element::{
    resolve_type, Descriptor, Element, ElementType, FactoryError, StrictVirtualDom, VirtualDom,
};
pub use emit::{to_json, to_json_string, to_jsx};
pub use registry::{ComponentMap, ConfigError};
pub use traits::ElementFactory;
pub use transform::{
    to_element_tree, to_react_element, Key, Rendered, TransformError, Transformer, KEY_PROP,
};

pub use html2react_parser::{parse, Attributes, Node, ParseError};
