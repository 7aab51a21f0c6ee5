//! Property-name normalization and unit rules.

use std::borrow::Cow;

/// Properties whose numeric values are written without a `px` unit.
const UNITLESS_PROPERTIES: &[&str] = &[
    "animation-iteration-count",
    "aspect-ratio",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "column-count",
    "columns",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-negative",
    "flex-order",
    "flex-positive",
    "flex-shrink",
    "flood-opacity",
    "font-weight",
    "grid-area",
    "grid-column",
    "grid-column-end",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-start",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "scale",
    "stop-opacity",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
];

/// Converts an author-facing property name to its CSS spelling.
///
/// Custom properties (`--foo`) and names that are already lowercase pass
/// through untouched. Unrecognized names are never rejected.
///
/// # Example
///
/// ```rust
/// use standout_cascade::css_property_name;
///
/// assert_eq!(css_property_name("backgroundColor"), "background-color");
/// assert_eq!(css_property_name("WebkitTransition"), "-webkit-transition");
/// assert_eq!(css_property_name("msFlex"), "-ms-flex");
/// assert_eq!(css_property_name("--Brand"), "--Brand");
/// ```
pub fn css_property_name(name: &str) -> Cow<'_, str> {
    let name = name.trim();
    if name.starts_with("--") || !name.chars().any(|c| c.is_ascii_uppercase()) {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    Cow::Owned(out)
}

/// Returns true if numbers for this CSS property are written without a unit.
pub fn is_unitless(css_name: &str) -> bool {
    css_name.starts_with("--") || UNITLESS_PROPERTIES.binary_search(&css_name).is_ok()
}

/// Lowercases a key and joins its words with dashes.
///
/// Used to derive custom property names from author keys:
/// `"accentColor"`, `"accent_color"` and `"accent color"` all become
/// `"accent-color"`.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.trim().chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '_' || c.is_whitespace() || c == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        } else {
            out.push(c);
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
