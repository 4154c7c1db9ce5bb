//! Crucible Wikilinks
//!
//! Wikilink support for markdown-it. `[[Page]]` and `[[Page|label]]` are
//! recognized inside inline content and rendered as links:
//!
//! - configurable link pattern, base URLs and URI suffix
//! - hooks for page name derivation, page name and label post-processing
//! - overridable rendering, extra HTML attributes
//! - malformed or rejected wikilinks stay literal text
//!
//! ```rust,no_run
//! use crucible_wikilinks::{add_wikilink_plugin_with_config, WikilinkConfig};
//!
//! let mut md = markdown_it::MarkdownIt::new();
//! markdown_it::plugins::cmark::add(&mut md);
//!
//! let config = WikilinkConfig::default().with_html_attribute("class", "wikilink");
//! add_wikilink_plugin_with_config(&mut md, config);
//!
//! let html = md.parse("Click [[Wiki Links|here]].").render();
//! assert!(html.contains(r#"<a href="./Wiki_Links.html" class="wikilink">here</a>"#));
//! ```

pub mod collect;
pub mod config;
pub mod error;
pub mod escape;
pub mod matcher;
pub mod normalize;
pub mod pass;
pub mod plugin;
pub mod resolver;

// Re-export main types for convenience
pub use collect::collect_wikilinks;
pub use config::{RenderHook, TextHook, WikilinkConfig, WikilinkOptions, DEFAULT_LINK_PATTERN};
pub use error::{WikilinkError, WikilinkResult};
pub use matcher::{LinkSyntax, Match, PatternMatcher, SuppressionWindow};
pub use pass::RenderPass;
pub use plugin::{
    add_wikilink_plugin, add_wikilink_plugin_with_config, WikilinkNode, WikilinkScanner,
};
pub use resolver::{render, render_anchor, resolve, ResolvedLink};
