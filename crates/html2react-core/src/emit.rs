//! JSON and JSX output for element trees.

use std::sync::LazyLock;

use regex::Regex;

use crate::element::{Descriptor, Element, ElementType};
use crate::transform::Rendered;

/// Serialize an element tree to a JSON value.
///
/// `Empty` becomes `null`, a single descriptor is emitted as-is and several
/// descriptors become an array.
pub fn to_json(rendered: &Rendered<Element>) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(rendered)
}

/// Serialize an element tree to a JSON string.
pub fn to_json_string(
    rendered: &Rendered<Element>,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(rendered)
    } else {
        serde_json::to_string(rendered)
    }
}

/// Function used for elements JSX tag syntax cannot name.
const CREATE_ELEMENT: &str = "React.createElement";

/// Render an element tree as JSX source.
///
/// Several top-level descriptors are wrapped in a fragment. Text and prop
/// values that JSX would reinterpret are emitted as string expressions.
/// Generic tags JSX would read as components, and components JSX would read
/// as tags, are emitted as `React.createElement` calls.
pub fn to_jsx(rendered: &Rendered<Element>) -> String {
    let mut out = String::new();

    match rendered {
        Rendered::Empty | Rendered::Single(Descriptor::Null) => out.push_str("null"),
        Rendered::Single(Descriptor::Text(text)) => out.push_str(&js_string(text)),
        Rendered::Single(Descriptor::Element(element)) => write_expression(&mut out, element),
        Rendered::Many(descriptors) => {
            out.push_str("<>");
            write_children(&mut out, descriptors);
            out.push_str("</>");
        }
    }

    out
}

static PROP_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: className, data-id, xlink:href
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$-]*(?::[A-Za-z_$][A-Za-z0-9_$-]*)?$")
        .expect("Invalid prop name regex")
});

static JSX_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: div, my-element, svg:rect
    Regex::new(r"^[a-z][A-Za-z0-9-]*(?::[A-Za-z][A-Za-z0-9-]*)?$").expect("Invalid tag regex")
});

static JSX_COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: Widget, ui.Button, $el, _Card
    Regex::new(
        r"^(?:[A-Z_$][A-Za-z0-9_$]*|[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)+)$",
    )
    .expect("Invalid component regex")
});

/// Check whether JSX tag syntax resolves the element to the same type.
///
/// JSX treats a lowercase name as a tag string and anything else as an
/// identifier.
fn has_jsx_name(element: &Element) -> bool {
    match &element.element_type {
        ElementType::Tag(tag) => JSX_TAG_RE.is_match(tag),
        ElementType::Component(name) => JSX_COMPONENT_RE.is_match(name),
    }
}

/// Write an element as a JavaScript expression.
fn write_expression(out: &mut String, element: &Element) {
    if has_jsx_name(element) {
        write_jsx_element(out, element);
    } else {
        write_create_element(out, element);
    }
}

fn write_jsx_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.type_name());

    for (name, value) in element.props.iter() {
        if !PROP_NAME_RE.is_match(name) {
            // Not expressible as a JSX attribute
            out.push_str(&format!(" {{...{{{}: {}}}}}", js_string(name), js_string(value)));
        } else if needs_attribute_expression(value) {
            out.push_str(&format!(" {}={{{}}}", name, js_string(value)));
        } else {
            out.push_str(&format!(r#" {}="{}""#, name, value));
        }
    }

    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    write_children(out, &element.children);
    out.push_str("</");
    out.push_str(element.type_name());
    out.push('>');
}

/// Write `React.createElement(type, props, ...children)`.
fn write_create_element(out: &mut String, element: &Element) {
    out.push_str(CREATE_ELEMENT);
    out.push('(');
    match &element.element_type {
        ElementType::Tag(tag) => out.push_str(&js_string(tag)),
        // Component names are emitted as identifiers; the strict factory rejects others
        ElementType::Component(name) => out.push_str(name),
    }

    let props: Vec<String> = element
        .props
        .iter()
        .map(|(name, value)| format!("{}: {}", js_string(name), js_string(value)))
        .collect();
    out.push_str(&format!(", {{{}}}", props.join(", ")));

    for child in &element.children {
        match child {
            Descriptor::Null => {}
            Descriptor::Text(text) => {
                out.push_str(", ");
                out.push_str(&js_string(text));
            }
            Descriptor::Element(child) => {
                out.push_str(", ");
                write_expression(out, child);
            }
        }
    }

    out.push(')');
}

fn write_children(out: &mut String, children: &[Descriptor<Element>]) {
    for child in children {
        match child {
            Descriptor::Null => {}
            Descriptor::Text(text) if needs_text_expression(text) => {
                out.push('{');
                out.push_str(&js_string(text));
                out.push('}');
            }
            Descriptor::Text(text) => out.push_str(text),
            Descriptor::Element(element) if has_jsx_name(element) => {
                write_jsx_element(out, element);
            }
            Descriptor::Element(element) => {
                out.push('{');
                write_create_element(out, element);
                out.push('}');
            }
        }
    }
}

/// JSX collapses line breaks, decodes entities and treats braces and angle
/// brackets as syntax.
fn needs_text_expression(text: &str) -> bool {
    text.contains(['{', '}', '<', '>', '&', '\n', '\r'])
}

/// JSX decodes entities in attribute strings and has no escape for `"`.
fn needs_attribute_expression(value: &str) -> bool {
    value.contains(['"', '&', '\n', '\r'])
}

/// Quote a string as a JavaScript literal.
fn js_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Escape a string for JavaScript output.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
