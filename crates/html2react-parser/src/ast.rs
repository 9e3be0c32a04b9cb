//! AST node types produced by the parser.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A parsed HTML node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Node {
    /// A raw text run, including comments and directives
    Text(String),

    /// A structured element
    Element {
        /// Tag name, case preserved
        tag: String,

        /// Attributes in source order
        #[serde(skip_serializing_if = "Attributes::is_empty")]
        attrs: Attributes,

        /// Child nodes in source order
        #[serde(skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Create an element node.
    pub fn element(tag: impl Into<String>, attrs: Attributes, content: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            attrs,
            content,
        }
    }

    /// Get the text if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element { .. } => None,
        }
    }

    /// Check if this is a text node made only of whitespace.
    ///
    /// Whitespace follows the JavaScript `String.prototype.trim` set, which
    /// includes the byte order mark and excludes U+0085.
    pub fn is_whitespace(&self) -> bool {
        self.as_text().is_some_and(|t| t.chars().all(is_js_whitespace))
    }
}

fn is_js_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Ordered attribute mapping. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, replacing the value of an existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Insert an attribute only if no attribute with that name exists yet.
    ///
    /// Returns `false` when the name was already present.
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, value.into()));
        true
    }

    /// Look up an attribute value by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if an attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterate over `(name, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
