//! Tag to component lookup.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// Maps tag names to component constructors.
///
/// Read-only while transforming. Lookups are exact: `Widget` and `widget`
/// are different tags.
#[derive(Debug, Clone)]
pub struct ComponentMap<C> {
    components: HashMap<String, C>,
}

impl<C> Default for ComponentMap<C> {
    fn default() -> Self {
        Self {
            components: HashMap::new(),
        }
    }
}

impl<C> ComponentMap<C> {
    /// Create a new empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component for a tag, returning the one it replaced.
    pub fn insert(&mut self, tag: impl Into<String>, component: C) -> Option<C> {
        self.components.insert(tag.into(), component)
    }

    /// Look up the component registered for a tag.
    pub fn get(&self, tag: &str) -> Option<&C> {
        self.components.get(tag)
    }

    /// Check if a tag has a registered component.
    pub fn contains(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over `(tag, component)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &C)> {
        self.components.iter().map(|(tag, c)| (tag.as_str(), c))
    }
}

impl<C> FromIterator<(String, C)> for ComponentMap<C> {
    fn from_iter<I: IntoIterator<Item = (String, C)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

/// The part of a config file this crate reads. Other tables are ignored.
#[derive(Debug, Deserialize, Default)]
struct ComponentsFile {
    #[serde(default)]
    components: BTreeMap<String, String>,
}

impl ComponentMap<String> {
    /// Load a name-based lookup from the `[components]` table of a TOML document.
    ///
    /// ```toml
    /// [components]
    /// Widget = "MyWidget"
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ComponentsFile = toml::from_str(source)?;
        Ok(file.components.into_iter().collect())
    }
}

/// Errors that can occur when loading a component lookup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid component config: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_and_looks_up_components() {
        let mut components = ComponentMap::new();
        assert!(components.insert("Widget", 1).is_none());
        assert_eq!(components.insert("Widget", 2), Some(1));

        assert_eq!(components.get("Widget"), Some(&2));
        assert!(components.contains("Widget"));
        assert!(!components.contains("widget"));
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn default_is_empty() {
        let components: ComponentMap<fn()> = ComponentMap::default();

        assert!(components.is_empty());
        assert_eq!(components.iter().count(), 0);
    }

    #[test]
    fn loads_components_from_toml() {
        let source = r#"
[components]
Widget = "MyWidget"
Card = "ui.Card"

[output]
format = "jsx"
        "#;

        let components = ComponentMap::<String>::from_toml_str(source).unwrap();

        assert_eq!(components.len(), 2);
        assert_eq!(components.get("Widget").map(String::as_str), Some("MyWidget"));
        assert_eq!(components.get("Card").map(String::as_str), Some("ui.Card"));
    }

    #[test]
    fn missing_components_table_is_empty() {
        let components = ComponentMap::<String>::from_toml_str("").unwrap();

        assert!(components.is_empty());
    }

    #[test]
    fn errors_on_invalid_toml() {
        let result = ComponentMap::<String>::from_toml_str("[components\nWidget = ");

        assert!(matches!(result, Err(ConfigError::InvalidToml(_))));
    }

    #[test]
    fn errors_on_non_string_component() {
        let result = ComponentMap::<String>::from_toml_str("[components]\nWidget = 3\n");

        assert!(matches!(result, Err(ConfigError::InvalidToml(_))));
    }
}
