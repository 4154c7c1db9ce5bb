//! Turning a matched wikilink into a link target and markup
//!
//! Resolution runs the configured hooks over the captured text, decides
//! between `base_url` and `relative_base_url`, and prepares the escaped
//! attribute list. Rendering is a separate step so a custom render hook can
//! reuse everything resolution computed.

use tracing::trace;

use crate::config::WikilinkConfig;
use crate::escape::{encode_attr_value, escape_href};
use crate::matcher::{LinkSyntax, Match};

/// A wikilink after all hooks ran, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Post-processed page name, leading slashes removed for absolute links
    pub page_name: String,
    /// Post-processed label, emitted unescaped by the default renderer
    pub label: String,
    /// Page name before post-processing
    pub original_page_name: String,
    /// Label before post-processing
    pub original_label: String,
    /// Link target, not yet escaped
    pub href: String,
    /// `name="value"` pairs, escaped, starting with `href`
    pub html_attrs: Vec<String>,
}

impl ResolvedLink {
    /// Attributes joined for direct use inside a start tag
    pub fn attrs_string(&self) -> String {
        self.html_attrs.join(" ")
    }
}

/// Resolve a match into a link, `None` when it does not form a valid link
///
/// An empty label or page name after post-processing rejects the match;
/// the caller then keeps the original text.
pub fn resolve(candidate: &Match<'_>, config: &WikilinkConfig) -> Option<ResolvedLink> {
    let (original_label, original_page_name) = match candidate.syntax()? {
        LinkSyntax::Piped { page, label } => (label.to_string(), page.to_string()),
        LinkSyntax::LabelOnly { label } => (
            label.to_string(),
            (config.generate_page_name_from_label)(label),
        ),
    };

    let label = (config.post_process_label)(&original_label);
    let page_name = (config.post_process_page_name)(&original_page_name);
    if label.is_empty() || page_name.is_empty() {
        trace!(
            offset = candidate.start(),
            "Wikilink candidate rejected: empty label or page name"
        );
        return None;
    }

    let options = &config.options;
    let (page_name, href) = if options.make_all_links_absolute || page_name.starts_with('/') {
        let page_name = page_name.trim_start_matches('/').to_string();
        let href = format!("{}{}{}", options.base_url, page_name, options.uri_suffix);
        (page_name, href)
    } else {
        let href = format!(
            "{}{}{}",
            options.relative_base_url, page_name, options.uri_suffix
        );
        (page_name, href)
    };

    let mut html_attrs = Vec::with_capacity(1 + options.html_attributes.len());
    html_attrs.push(format!("href=\"{}\"", escape_href(&href)));
    for (name, value) in &options.html_attributes {
        html_attrs.push(format!("{}=\"{}\"", name, encode_attr_value(value)));
    }

    Some(ResolvedLink {
        page_name,
        label,
        original_page_name,
        original_label,
        href,
        html_attrs,
    })
}

/// Render a resolved link through the configured render hook
pub fn render(link: &ResolvedLink, config: &WikilinkConfig) -> String {
    (config.render)(link, config)
}

/// Default renderer: `<a {attrs}>{label}</a>`
pub fn render_anchor(link: &ResolvedLink) -> String {
    format!("<a {}>{}</a>", link.attrs_string(), link.label)
}
