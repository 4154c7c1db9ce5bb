//! Wikilink plugin for markdown-it
//!
//! Registers an inline rule that recognizes `[[Page]]` and `[[Page|label]]`
//! and replaces them with the markup produced by the configured render
//! hook. Rejected candidates are left to the other inline rules, so they
//! end up as ordinary text.

use markdown_it::parser::extset::{InlineRootExt, MarkdownItExt};
use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use std::fmt;
use tracing::{debug, trace};

use crate::config::WikilinkConfig;
use crate::matcher::SuppressionWindow;
use crate::resolver::{render, resolve, ResolvedLink};

impl MarkdownItExt for WikilinkConfig {}

// Scoped to one inline root, so offsets always refer to the same source
impl InlineRootExt for SuppressionWindow {}

/// Custom AST node for a resolved wikilink
#[derive(Debug, Clone)]
pub struct WikilinkNode {
    pub link: ResolvedLink,
    /// Output of the render hook
    pub markup: String,
    pub offset: usize,
}

impl NodeValue for WikilinkNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.text_raw(&self.markup);
    }
}

impl fmt::Display for WikilinkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wikilink({})", self.link.page_name)
    }
}

/// Scanner for wikilink syntax
pub struct WikilinkScanner;

impl WikilinkScanner {
    fn scan(state: &InlineState) -> Option<(ResolvedLink, usize)> {
        let config = state.md.ext.get::<WikilinkConfig>()?;

        let suppressed = state
            .inline_ext
            .get::<SuppressionWindow>()
            .is_some_and(|window| window.contains(state.pos));
        if suppressed {
            trace!(
                offset = state.pos,
                "Wikilink candidate suppressed inside previous match"
            );
            return None;
        }

        let candidate = config
            .matcher()
            .match_at(&state.src[..state.pos_max], state.pos)?;
        if candidate.is_empty() {
            return None;
        }

        let link = resolve(&candidate, config)?;
        Some((link, candidate.len()))
    }
}

impl InlineRule for WikilinkScanner {
    const MARKER: char = '[';

    // Lookahead from other rules (link labels) must not move the window
    // or render
    fn check(state: &mut InlineState) -> Option<usize> {
        Self::scan(state).map(|(_, len)| len)
    }

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let (link, len) = Self::scan(state)?;
        let config = state.md.ext.get::<WikilinkConfig>()?;
        let wikilink = WikilinkNode {
            markup: render(&link, config),
            link,
            offset: state.pos,
        };
        state
            .inline_ext
            .insert(SuppressionWindow::covering(state.pos, len));

        // Return node and length consumed (including brackets)
        Some((Node::new(wikilink), len))
    }
}

/// Add wikilink plugin with the default configuration
pub fn add_wikilink_plugin(md: &mut MarkdownIt) {
    add_wikilink_plugin_with_config(md, WikilinkConfig::default());
}

/// Add wikilink plugin with a custom configuration
///
/// Calling it again replaces the configuration of this parser only; other
/// `MarkdownIt` instances keep their own.
pub fn add_wikilink_plugin_with_config(md: &mut MarkdownIt, config: WikilinkConfig) {
    debug!(
        pattern = config.pattern().as_str(),
        "Registering wikilink plugin"
    );
    md.ext.insert(config);
    if !md.inline.has_rule::<WikilinkScanner>() {
        md.inline.add_rule::<WikilinkScanner>();
    }
}
