//! HTML attribute name to React property name mapping.

use std::collections::HashMap;
use std::sync::LazyLock;

use html2react_parser::Attributes;

/// Property mapping handed to an element factory.
///
/// Shares the ordered, unique-name map of the parser; inserting an existing
/// name replaces its value in place.
pub type Props = Attributes;

/// HTML and SVG attributes whose React spelling differs from the source spelling.
static ATTRIBUTE_NAMES: &[(&str, &str)] = &[
    // Reserved words
    ("class", "className"),
    ("for", "htmlFor"),
    // HTML
    ("accept-charset", "acceptCharset"),
    ("accesskey", "accessKey"),
    ("allowfullscreen", "allowFullScreen"),
    ("allowtransparency", "allowTransparency"),
    ("autocapitalize", "autoCapitalize"),
    ("autocomplete", "autoComplete"),
    ("autocorrect", "autoCorrect"),
    ("autofocus", "autoFocus"),
    ("autoplay", "autoPlay"),
    ("autosave", "autoSave"),
    ("cellpadding", "cellPadding"),
    ("cellspacing", "cellSpacing"),
    ("charset", "charSet"),
    ("classid", "classID"),
    ("colspan", "colSpan"),
    ("contenteditable", "contentEditable"),
    ("contextmenu", "contextMenu"),
    ("controlslist", "controlsList"),
    ("crossorigin", "crossOrigin"),
    ("datetime", "dateTime"),
    ("defaultchecked", "defaultChecked"),
    ("defaultvalue", "defaultValue"),
    ("enctype", "encType"),
    ("enterkeyhint", "enterKeyHint"),
    ("fetchpriority", "fetchPriority"),
    ("formaction", "formAction"),
    ("formenctype", "formEncType"),
    ("formmethod", "formMethod"),
    ("formnovalidate", "formNoValidate"),
    ("formtarget", "formTarget"),
    ("frameborder", "frameBorder"),
    ("hreflang", "hrefLang"),
    ("http-equiv", "httpEquiv"),
    ("imagesizes", "imageSizes"),
    ("imagesrcset", "imageSrcSet"),
    ("inputmode", "inputMode"),
    ("itemid", "itemID"),
    ("itemprop", "itemProp"),
    ("itemref", "itemRef"),
    ("itemscope", "itemScope"),
    ("itemtype", "itemType"),
    ("keyparams", "keyParams"),
    ("keytype", "keyType"),
    ("marginheight", "marginHeight"),
    ("marginwidth", "marginWidth"),
    ("maxlength", "maxLength"),
    ("mediagroup", "mediaGroup"),
    ("minlength", "minLength"),
    ("nomodule", "noModule"),
    ("novalidate", "noValidate"),
    ("playsinline", "playsInline"),
    ("popovertarget", "popoverTarget"),
    ("popovertargetaction", "popoverTargetAction"),
    ("radiogroup", "radioGroup"),
    ("readonly", "readOnly"),
    ("referrerpolicy", "referrerPolicy"),
    ("rowspan", "rowSpan"),
    ("spellcheck", "spellCheck"),
    ("srcdoc", "srcDoc"),
    ("srclang", "srcLang"),
    ("srcset", "srcSet"),
    ("tabindex", "tabIndex"),
    ("usemap", "useMap"),
    // SVG presentation attributes
    ("accent-height", "accentHeight"),
    ("alignment-baseline", "alignmentBaseline"),
    ("arabic-form", "arabicForm"),
    ("baseline-shift", "baselineShift"),
    ("cap-height", "capHeight"),
    ("clip-path", "clipPath"),
    ("clip-rule", "clipRule"),
    ("color-interpolation", "colorInterpolation"),
    ("color-interpolation-filters", "colorInterpolationFilters"),
    ("color-profile", "colorProfile"),
    ("color-rendering", "colorRendering"),
    ("dominant-baseline", "dominantBaseline"),
    ("enable-background", "enableBackground"),
    ("fill-opacity", "fillOpacity"),
    ("fill-rule", "fillRule"),
    ("flood-color", "floodColor"),
    ("flood-opacity", "floodOpacity"),
    ("font-family", "fontFamily"),
    ("font-size", "fontSize"),
    ("font-size-adjust", "fontSizeAdjust"),
    ("font-stretch", "fontStretch"),
    ("font-style", "fontStyle"),
    ("font-variant", "fontVariant"),
    ("font-weight", "fontWeight"),
    ("glyph-name", "glyphName"),
    ("glyph-orientation-horizontal", "glyphOrientationHorizontal"),
    ("glyph-orientation-vertical", "glyphOrientationVertical"),
    ("horiz-adv-x", "horizAdvX"),
    ("horiz-origin-x", "horizOriginX"),
    ("image-rendering", "imageRendering"),
    ("letter-spacing", "letterSpacing"),
    ("lighting-color", "lightingColor"),
    ("marker-end", "markerEnd"),
    ("marker-mid", "markerMid"),
    ("marker-start", "markerStart"),
    ("overline-position", "overlinePosition"),
    ("overline-thickness", "overlineThickness"),
    ("paint-order", "paintOrder"),
    ("panose-1", "panose1"),
    ("pointer-events", "pointerEvents"),
    ("rendering-intent", "renderingIntent"),
    ("shape-rendering", "shapeRendering"),
    ("stop-color", "stopColor"),
    ("stop-opacity", "stopOpacity"),
    ("strikethrough-position", "strikethroughPosition"),
    ("strikethrough-thickness", "strikethroughThickness"),
    ("stroke-dasharray", "strokeDasharray"),
    ("stroke-dashoffset", "strokeDashoffset"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("stroke-miterlimit", "strokeMiterlimit"),
    ("stroke-opacity", "strokeOpacity"),
    ("stroke-width", "strokeWidth"),
    ("text-anchor", "textAnchor"),
    ("text-decoration", "textDecoration"),
    ("text-rendering", "textRendering"),
    ("underline-position", "underlinePosition"),
    ("underline-thickness", "underlineThickness"),
    ("unicode-bidi", "unicodeBidi"),
    ("unicode-range", "unicodeRange"),
    ("units-per-em", "unitsPerEm"),
    ("v-alphabetic", "vAlphabetic"),
    ("v-hanging", "vHanging"),
    ("v-ideographic", "vIdeographic"),
    ("v-mathematical", "vMathematical"),
    ("vector-effect", "vectorEffect"),
    ("vert-adv-y", "vertAdvY"),
    ("vert-origin-x", "vertOriginX"),
    ("vert-origin-y", "vertOriginY"),
    ("word-spacing", "wordSpacing"),
    ("writing-mode", "writingMode"),
    ("x-height", "xHeight"),
    // SVG namespaced attributes
    ("xlink:actuate", "xlinkActuate"),
    ("xlink:arcrole", "xlinkArcrole"),
    ("xlink:href", "xlinkHref"),
    ("xlink:role", "xlinkRole"),
    ("xlink:show", "xlinkShow"),
    ("xlink:title", "xlinkTitle"),
    ("xlink:type", "xlinkType"),
    ("xml:base", "xmlBase"),
    ("xml:lang", "xmlLang"),
    ("xml:space", "xmlSpace"),
    ("xmlns:xlink", "xmlnsXlink"),
    // SVG camelCase attributes written in lowercase
    ("attributename", "attributeName"),
    ("basefrequency", "baseFrequency"),
    ("clippathunits", "clipPathUnits"),
    ("gradienttransform", "gradientTransform"),
    ("gradientunits", "gradientUnits"),
    ("markerheight", "markerHeight"),
    ("markerunits", "markerUnits"),
    ("markerwidth", "markerWidth"),
    ("maskcontentunits", "maskContentUnits"),
    ("maskunits", "maskUnits"),
    ("patterncontentunits", "patternContentUnits"),
    ("patterntransform", "patternTransform"),
    ("patternunits", "patternUnits"),
    ("preserveaspectratio", "preserveAspectRatio"),
    ("refx", "refX"),
    ("refy", "refY"),
    ("repeatcount", "repeatCount"),
    ("stddeviation", "stdDeviation"),
    ("textlength", "textLength"),
    ("viewbox", "viewBox"),
];

static ATTRIBUTE_LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ATTRIBUTE_NAMES.iter().copied().collect());

/// Map one HTML attribute name to its React property name.
///
/// Names missing from the table are returned unchanged, so `data-*`, `aria-*`
/// and already camel-cased names pass through.
pub fn map_attribute(name: &str) -> &str {
    ATTRIBUTE_LOOKUP.get(name).copied().unwrap_or(name)
}

/// Check if an attribute name has a distinct React spelling.
pub fn is_mapped(name: &str) -> bool {
    ATTRIBUTE_LOOKUP.contains_key(name)
}

/// Iterate over every `(html name, React name)` pair in the table.
pub fn mapped_names() -> impl Iterator<Item = (&'static str, &'static str)> {
    ATTRIBUTE_NAMES.iter().copied()
}

/// Map every attribute name, keeping values and source order.
///
/// Returns a new mapping. When two source names map to the same property the
/// later one wins.
pub fn map_attributes(attrs: &Attributes) -> Props {
    let mut props = Props::new();
    for (name, value) in attrs.iter() {
        props.insert(map_attribute(name), value);
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn maps_reserved_words() {
        assert_eq!(map_attribute("class"), "className");
        assert_eq!(map_attribute("for"), "htmlFor");
    }

    #[test]
    fn maps_casing_and_hyphenated_names() {
        assert_eq!(map_attribute("tabindex"), "tabIndex");
        assert_eq!(map_attribute("readonly"), "readOnly");
        assert_eq!(map_attribute("http-equiv"), "httpEquiv");
        assert_eq!(map_attribute("stroke-width"), "strokeWidth");
        assert_eq!(map_attribute("xlink:href"), "xlinkHref");
        assert_eq!(map_attribute("viewbox"), "viewBox");
    }

    #[test]
    fn passes_unknown_names_through() {
        for name in ["id", "href", "data-id", "aria-label", "viewBox", "onClick", "", "Class"] {
            assert_eq!(map_attribute(name), name);
            assert!(!is_mapped(name));
        }
    }

    #[test]
    fn table_has_unique_non_identity_entries() {
        let mut seen = HashSet::new();
        for (html, react) in mapped_names() {
            assert_ne!(html, react);
            assert!(seen.insert(html), "duplicate entry for {html}");
        }
        assert_eq!(seen.len(), ATTRIBUTE_LOOKUP.len());
    }

    #[test]
    fn maps_attribute_collections() {
        let attrs: Attributes = [
            ("class", "btn primary"),
            ("data-id", "7"),
            ("tabindex", "-1"),
        ]
        .into_iter()
        .collect();

        let props = map_attributes(&attrs);

        assert_eq!(
            props.iter().collect::<Vec<_>>(),
            vec![
                ("className", "btn primary"),
                ("data-id", "7"),
                ("tabIndex", "-1")
            ]
        );
        // Source mapping is untouched
        assert_eq!(attrs.get("class"), Some("btn primary"));
    }

    #[test]
    fn later_attribute_wins_on_collision() {
        let attrs: Attributes = [("className", "a"), ("class", "b")].into_iter().collect();

        let props = map_attributes(&attrs);

        assert_eq!(props.len(), 1);
        assert_eq!(props.get("className"), Some("b"));
    }
}
