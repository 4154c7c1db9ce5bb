//! Escaping helpers shared by the default renderer and custom render hooks
//!
//! Hrefs go through markdown-it's own HTML escaping so wikilinks are
//! escaped exactly like every other link in the rendered document.

use std::borrow::Cow;

/// Escape a link target for use inside a double-quoted `href`
pub fn escape_href(href: &str) -> Cow<'_, str> {
    markdown_it::common::utils::escape_html(href)
}

/// Encode an arbitrary value for use inside a double-quoted attribute
pub fn encode_attr_value(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}
