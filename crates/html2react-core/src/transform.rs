//! Recursive HTML AST to element tree transform.

use std::convert::Infallible;
use std::fmt;

use html2react_parser::{parse, Node, ParseError};
use serde::Serialize;

use crate::attributes::map_attributes;
use crate::element::{resolve_type, Descriptor, Element, VirtualDom};
use crate::registry::ComponentMap;
use crate::traits::ElementFactory;

/// Property carrying the positional key.
pub const KEY_PROP: &str = "key";

/// Positional key of a node in the parsed tree.
///
/// Top-level nodes are keyed by their index (`"0"`, `"1"`), children append
/// their index to the parent key (`"0.1"`). Keys are unique across the whole
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    /// Key of a top-level node.
    pub fn root(index: usize) -> Self {
        Key(index.to_string())
    }

    /// Key of the child at `index`.
    pub fn child(&self, index: usize) -> Self {
        Key(format!("{}.{}", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of transforming a whole fragment.
///
/// The shape depends only on the number of top-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered<E> {
    /// The fragment had no top-level nodes
    Empty,
    /// Exactly one top-level node, not wrapped
    Single(Descriptor<E>),
    /// Several top-level nodes in source order, whitespace entries kept as `Null`
    Many(Vec<Descriptor<E>>),
}

impl<E> Rendered<E> {
    /// Pick the result shape for a list of top-level descriptors.
    pub fn from_vec(mut descriptors: Vec<Descriptor<E>>) -> Self {
        match descriptors.len() {
            0 => Rendered::Empty,
            1 => descriptors.pop().map_or(Rendered::Empty, Rendered::Single),
            _ => Rendered::Many(descriptors),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Rendered::Empty => 0,
            Rendered::Single(_) => 1,
            Rendered::Many(descriptors) => descriptors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty)
    }

    /// Iterate over the top-level descriptors.
    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor<E>> {
        match self {
            Rendered::Empty => std::slice::Iter::default(),
            Rendered::Single(descriptor) => std::slice::from_ref(descriptor).iter(),
            Rendered::Many(descriptors) => descriptors.iter(),
        }
    }

    /// Flatten into a list of top-level descriptors.
    pub fn into_vec(self) -> Vec<Descriptor<E>> {
        match self {
            Rendered::Empty => Vec::new(),
            Rendered::Single(descriptor) => vec![descriptor],
            Rendered::Many(descriptors) => descriptors,
        }
    }
}

/// Errors that can occur when converting HTML.
#[derive(Debug, thiserror::Error)]
pub enum TransformError<E> {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Element construction failed: {0}")]
    Factory(#[source] E),
}

/// Walks parsed nodes and builds elements with a factory.
pub struct Transformer<'a, F: ElementFactory> {
    factory: &'a F,
    components: &'a ComponentMap<F::Component>,
}

impl<'a, F: ElementFactory> Transformer<'a, F> {
    /// Create a transformer over a factory and a tag lookup.
    pub fn new(factory: &'a F, components: &'a ComponentMap<F::Component>) -> Self {
        Self {
            factory,
            components,
        }
    }

    /// Transform one node and its subtree.
    ///
    /// Children are fully resolved before their parent is constructed. The
    /// `key` prop is always set to `key`, replacing any source attribute of
    /// that name.
    pub fn transform_node(
        &self,
        node: &Node,
        key: Key,
    ) -> Result<Descriptor<F::Element>, F::Error> {
        let (tag, attrs, content) = match node {
            Node::Text(_) if node.is_whitespace() => return Ok(Descriptor::Null),
            Node::Text(text) => return Ok(Descriptor::Text(text.clone())),
            Node::Element {
                tag,
                attrs,
                content,
            } => (tag, attrs, content),
        };

        let mut props = map_attributes(attrs);
        props.insert(KEY_PROP, key.as_str());

        let children = content
            .iter()
            .enumerate()
            .map(|(index, child)| self.transform_node(child, key.child(index)))
            .collect::<Result<Vec<_>, _>>()?;

        let element_type = resolve_type(tag, self.components);
        if element_type.is_component() {
            tracing::trace!(tag = %tag, key = %key, "building registered component");
        }

        self.factory
            .create_element(element_type, props, children)
            .map(Descriptor::Element)
    }

    /// Transform a list of top-level nodes, keyed by their index.
    pub fn transform_nodes(&self, nodes: &[Node]) -> Result<Rendered<F::Element>, F::Error> {
        let descriptors = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| self.transform_node(node, Key::root(index)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Rendered::from_vec(descriptors))
    }
}

/// Convert an HTML fragment into elements built by `factory`.
///
/// Tags registered in `components` are built as components; every other tag
/// becomes a generic element. Parser and factory errors are returned as-is.
pub fn to_react_element<F: ElementFactory>(
    html: &str,
    components: &ComponentMap<F::Component>,
    factory: &F,
) -> Result<Rendered<F::Element>, TransformError<F::Error>> {
    let nodes = parse(html)?;

    tracing::debug!(
        nodes = nodes.len(),
        components = components.len(),
        "transforming html fragment"
    );

    Transformer::new(factory, components)
        .transform_nodes(&nodes)
        .map_err(TransformError::Factory)
}

/// Convert an HTML fragment into the built-in [`Element`] model.
pub fn to_element_tree(
    html: &str,
    components: &ComponentMap<String>,
) -> Result<Rendered<Element>, ParseError> {
    to_react_element(html, components, &VirtualDom).map_err(ParseError::from)
}

/// Infallible factories never produce [`TransformError::Factory`].
impl From<TransformError<Infallible>> for ParseError {
    fn from(err: TransformError<Infallible>) -> Self {
        match err {
            TransformError::Parse(err) => err,
            TransformError::Factory(never) => match never {},
        }
    }
}
