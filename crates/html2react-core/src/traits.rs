//! Trait definitions for element factories.

use crate::attributes::Props;
use crate::element::{Descriptor, ElementType};

/// Builds framework elements from a resolved type, props and children.
///
/// The transformer never inspects the elements a factory returns; it only
/// hands them back to the factory as children of their parent.
pub trait ElementFactory {
    /// Component constructor stored in the tag lookup
    type Component: Clone;

    /// Element produced for each structured node
    type Element;

    /// Error raised when an element cannot be constructed
    type Error;

    /// Construct one element.
    ///
    /// # Arguments
    /// * `element_type` - Generic tag name or looked-up component
    /// * `props` - Mapped attributes, always including `key`
    /// * `children` - Resolved children in source order, whitespace entries as `Null`
    fn create_element(
        &self,
        element_type: ElementType<Self::Component>,
        props: Props,
        children: Vec<Descriptor<Self::Element>>,
    ) -> Result<Self::Element, Self::Error>;
}
