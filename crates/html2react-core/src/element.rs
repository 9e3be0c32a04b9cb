//! Element descriptors and the built-in element model.

use std::convert::Infallible;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::attributes::Props;
use crate::registry::ComponentMap;
use crate::traits::ElementFactory;
use crate::transform::KEY_PROP;

/// What an element is built as.
///
/// Serializes as `{"type": tag}` or `{"component": name}` so the two stay
/// distinguishable when a component shares a name with a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ElementType<C> {
    /// Generic element named by its tag (e.g., "div")
    #[serde(rename = "type")]
    Tag(String),
    /// Registered component constructor
    #[serde(rename = "component")]
    Component(C),
}

impl<C> ElementType<C> {
    /// Check if this resolves to a registered component.
    pub fn is_component(&self) -> bool {
        matches!(self, ElementType::Component(_))
    }
}

/// Resolve a tag against the component lookup.
///
/// Tags present in the lookup become [`ElementType::Component`], all others
/// stay generic tags.
pub fn resolve_type<C: Clone>(tag: &str, components: &ComponentMap<C>) -> ElementType<C> {
    match components.get(tag) {
        Some(component) => ElementType::Component(component.clone()),
        None => ElementType::Tag(tag.to_string()),
    }
}

/// Output of transforming one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Descriptor<E> {
    /// Whitespace-only text, carries no rendering meaning
    Null,
    /// Text passed through verbatim
    Text(String),
    /// Element built by the factory
    Element(E),
}

impl<E> Descriptor<E> {
    pub fn is_null(&self) -> bool {
        matches!(self, Descriptor::Null)
    }

    /// Get the text if this is a text descriptor.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Descriptor::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the element if this is an element descriptor.
    pub fn as_element(&self) -> Option<&E> {
        match self {
            Descriptor::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Element built by [`VirtualDom`] and [`StrictVirtualDom`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Tag name or component name
    #[serde(flatten)]
    pub element_type: ElementType<String>,

    /// Props including `key`
    pub props: Props,

    /// Text and element children. Never contains `Null`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Descriptor<Element>>,
}

impl Element {
    /// Tag or component name.
    pub fn type_name(&self) -> &str {
        match &self.element_type {
            ElementType::Tag(name) | ElementType::Component(name) => name,
        }
    }

    pub fn is_component(&self) -> bool {
        self.element_type.is_component()
    }

    /// Positional key assigned by the transformer.
    pub fn key(&self) -> Option<&str> {
        self.props.get(KEY_PROP)
    }

    /// Iterate over element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Descriptor::as_element)
    }
}

fn build(
    element_type: ElementType<String>,
    props: Props,
    children: Vec<Descriptor<Element>>,
) -> Element {
    Element {
        element_type,
        props,
        children: children.into_iter().filter(|c| !c.is_null()).collect(),
    }
}

/// Default element factory. Components are identified by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualDom;

impl ElementFactory for VirtualDom {
    type Component = String;
    type Element = Element;
    type Error = Infallible;

    fn create_element(
        &self,
        element_type: ElementType<String>,
        props: Props,
        children: Vec<Descriptor<Element>>,
    ) -> Result<Element, Infallible> {
        Ok(build(element_type, props, children))
    }
}

/// Errors raised by [`StrictVirtualDom`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("Invalid component name: {0:?} is not a JavaScript identifier")]
    InvalidComponent(String),

    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),
}

static COMPONENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: Widget, ui.Button, $el, My_Widget2
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("Invalid component name regex")
});

static TAG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: div, my-element, svg:rect, h1
    Regex::new(r"^[A-Za-z][A-Za-z0-9:._-]*$").expect("Invalid tag name regex")
});

/// Element factory that rejects types a renderer could not construct.
///
/// Component names must be JavaScript identifiers (optionally dotted) and tag
/// names must be valid element names.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictVirtualDom;

impl ElementFactory for StrictVirtualDom {
    type Component = String;
    type Element = Element;
    type Error = FactoryError;

    fn create_element(
        &self,
        element_type: ElementType<String>,
        props: Props,
        children: Vec<Descriptor<Element>>,
    ) -> Result<Element, FactoryError> {
        match &element_type {
            ElementType::Component(name) if !COMPONENT_NAME_RE.is_match(name) => {
                return Err(FactoryError::InvalidComponent(name.clone()));
            }
            ElementType::Tag(tag) if !TAG_NAME_RE.is_match(tag) => {
                return Err(FactoryError::InvalidTag(tag.clone()));
            }
            _ => {}
        }

        Ok(build(element_type, props, children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn components() -> ComponentMap<String> {
        [("Foo".to_string(), "ComponentFoo".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn resolves_registered_tag_to_component() {
        assert_eq!(
            resolve_type("Foo", &components()),
            ElementType::Component("ComponentFoo".to_string())
        );
    }

    #[test]
    fn resolves_unregistered_tag_to_itself() {
        assert_eq!(
            resolve_type("div", &components()),
            ElementType::Tag("div".to_string())
        );
        // Lookup is case-sensitive
        assert_eq!(
            resolve_type("foo", &components()),
            ElementType::Tag("foo".to_string())
        );
    }

    #[test]
    fn virtual_dom_drops_null_children() {
        let element = VirtualDom
            .create_element(
                ElementType::Tag("p".to_string()),
                Props::new(),
                vec![
                    Descriptor::Null,
                    Descriptor::Text("a".to_string()),
                    Descriptor::Null,
                ],
            )
            .unwrap();

        assert_eq!(element.children, vec![Descriptor::Text("a".to_string())]);
    }

    #[test]
    fn strict_dom_rejects_invalid_component_names() {
        let result = StrictVirtualDom.create_element(
            ElementType::Component("my widget".to_string()),
            Props::new(),
            vec![],
        );

        assert_eq!(
            result,
            Err(FactoryError::InvalidComponent("my widget".to_string()))
        );
    }

    #[test]
    fn strict_dom_accepts_dotted_component_names() {
        let element = StrictVirtualDom
            .create_element(
                ElementType::Component("ui.Button".to_string()),
                Props::new(),
                vec![],
            )
            .unwrap();

        assert!(element.is_component());
        assert_eq!(element.type_name(), "ui.Button");
    }

    #[test]
    fn strict_dom_rejects_invalid_tags() {
        let result = StrictVirtualDom.create_element(
            ElementType::Tag("div\"".to_string()),
            Props::new(),
            vec![],
        );

        assert_eq!(result, Err(FactoryError::InvalidTag("div\"".to_string())));
    }

    #[test]
    fn serializes_element_shape() {
        let mut props = Props::new();
        props.insert("className", "x");
        props.insert("key", "0");
        let element = build(
            ElementType::Tag("div".to_string()),
            props,
            vec![Descriptor::Text("Hi".to_string())],
        );

        let json = serde_json::to_string(&element).unwrap();

        assert_eq!(
            json,
            r#"{"type":"div","props":{"className":"x","key":"0"},"children":["Hi"]}"#
        );
    }

    #[test]
    fn serializes_components_apart_from_tags() {
        let mut props = Props::new();
        props.insert("key", "0");
        let component = build(ElementType::Component("Card".to_string()), props.clone(), vec![]);
        let tag = build(ElementType::Tag("Card".to_string()), props, vec![]);

        assert_eq!(
            serde_json::to_string(&component).unwrap(),
            r#"{"component":"Card","props":{"key":"0"}}"#
        );
        assert_eq!(
            serde_json::to_string(&tag).unwrap(),
            r#"{"type":"Card","props":{"key":"0"}}"#
        );
    }
}
