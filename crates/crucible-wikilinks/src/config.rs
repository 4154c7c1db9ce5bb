//! Wikilink configuration
//!
//! [`WikilinkOptions`] holds the plain data settings and can be loaded from
//! TOML. [`WikilinkConfig`] combines them with the compiled link pattern
//! and the transformation hooks. Unset options keep their defaults.
//!
//! ```toml
//! base_url = "/wiki/"
//! uri_suffix = ".php"
//!
//! [html_attributes]
//! class = "wikilink"
//! rel = "nofollow"
//! ```

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::debug;

use crate::error::{WikilinkError, WikilinkResult};
use crate::matcher::PatternMatcher;
use crate::normalize;
use crate::resolver::{render_anchor, ResolvedLink};

/// Default pattern: anything but control characters or `|` as the target,
/// optionally followed by `|label`
pub const DEFAULT_LINK_PATTERN: &str = r"\[\[([^\x00-\x1f|]+?)(\|([\s\S]+?))?\]\]";

static DEFAULT_MATCHER: LazyLock<PatternMatcher> = LazyLock::new(|| {
    let pattern = Regex::new(DEFAULT_LINK_PATTERN).expect("default wikilink regex");
    PatternMatcher::new(pattern).expect("anchored default wikilink regex")
});

/// String transformation hook (label or page name)
pub type TextHook = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Markup rendering hook
pub type RenderHook = Arc<dyn Fn(&ResolvedLink, &WikilinkConfig) -> String + Send + Sync>;

/// Data settings for wikilink rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WikilinkOptions {
    /// Replacement for the default link pattern (1 to 3 capture groups)
    pub link_pattern: Option<String>,

    /// Prefix for absolute page names
    pub base_url: String,

    /// Prefix for relative page names
    pub relative_base_url: String,

    /// Treat every page name as absolute
    pub make_all_links_absolute: bool,

    /// Appended to every page name
    pub uri_suffix: String,

    /// Extra attributes for the rendered element, in output order
    pub html_attributes: IndexMap<String, String>,
}

impl Default for WikilinkOptions {
    fn default() -> Self {
        Self {
            link_pattern: None,
            base_url: "/".to_string(),
            relative_base_url: "./".to_string(),
            make_all_links_absolute: false,
            uri_suffix: ".html".to_string(),
            html_attributes: IndexMap::new(),
        }
    }
}

impl WikilinkOptions {
    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> WikilinkResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> WikilinkResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml_str(&content)?;
        debug!("Loaded wikilink options from {}", path.display());
        Ok(options)
    }
}

/// Complete wikilink configuration: options, compiled pattern and hooks
///
/// Registered once with a parser and treated as frozen afterwards. Cloning
/// is cheap; hooks are shared.
#[derive(Clone)]
pub struct WikilinkConfig {
    pub(crate) matcher: PatternMatcher,
    pub(crate) options: WikilinkOptions,
    pub(crate) generate_page_name_from_label: TextHook,
    pub(crate) post_process_page_name: TextHook,
    pub(crate) post_process_label: TextHook,
    pub(crate) render: RenderHook,
}

impl WikilinkConfig {
    /// Build a configuration from options, compiling the link pattern
    pub fn new(options: WikilinkOptions) -> WikilinkResult<Self> {
        let matcher = match &options.link_pattern {
            Some(source) => PatternMatcher::new(compile_pattern(source)?)?,
            None => DEFAULT_MATCHER.clone(),
        };
        Ok(Self::with_matcher(matcher, options))
    }

    /// Build a configuration around an already compiled pattern
    pub fn with_pattern(pattern: Regex, options: WikilinkOptions) -> WikilinkResult<Self> {
        check_capture_groups(&pattern)?;
        let mut options = options;
        options.link_pattern = Some(pattern.as_str().to_string());
        Ok(Self::with_matcher(PatternMatcher::new(pattern)?, options))
    }

    fn with_matcher(matcher: PatternMatcher, options: WikilinkOptions) -> Self {
        Self {
            matcher,
            options,
            generate_page_name_from_label: Arc::new(normalize::page_name_from_label),
            post_process_page_name: Arc::new(normalize::post_process_page_name),
            post_process_label: Arc::new(normalize::post_process_label),
            render: Arc::new(default_render),
        }
    }

    /// Replace the label to page name derivation used by `[[label]]` links
    pub fn with_page_name_generator<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.generate_page_name_from_label = Arc::new(hook);
        self
    }

    /// Replace the page name post-processing hook
    pub fn with_page_name_post_processor<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.post_process_page_name = Arc::new(hook);
        self
    }

    /// Replace the label post-processing hook
    pub fn with_label_post_processor<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.post_process_label = Arc::new(hook);
        self
    }

    /// Replace the default `<a>` renderer
    pub fn with_renderer<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ResolvedLink, &WikilinkConfig) -> String + Send + Sync + 'static,
    {
        self.render = Arc::new(hook);
        self
    }

    /// Append an extra attribute to the rendered element
    pub fn with_html_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.options.html_attributes.insert(name.into(), value.into());
        self
    }

    pub fn pattern(&self) -> &Regex {
        self.matcher.pattern()
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    pub fn options(&self) -> &WikilinkOptions {
        &self.options
    }
}

impl Default for WikilinkConfig {
    fn default() -> Self {
        Self::with_matcher(DEFAULT_MATCHER.clone(), WikilinkOptions::default())
    }
}

impl fmt::Debug for WikilinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikilinkConfig")
            .field("pattern", &self.pattern().as_str())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn default_render(link: &ResolvedLink, _config: &WikilinkConfig) -> String {
    render_anchor(link)
}

fn compile_pattern(source: &str) -> WikilinkResult<Regex> {
    let pattern = Regex::new(source)?;
    check_capture_groups(&pattern)?;
    Ok(pattern)
}

fn check_capture_groups(pattern: &Regex) -> WikilinkResult<()> {
    // captures_len counts the implicit whole-match group
    let found = pattern.captures_len() - 1;
    if (1..=3).contains(&found) {
        Ok(())
    } else {
        Err(WikilinkError::CaptureGroups { found })
    }
}
