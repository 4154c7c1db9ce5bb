//! Standalone render pass over plain text
//!
//! `RenderPass` drives the matcher and resolver the same way the markdown-it
//! rule does, for hosts that only have raw text. Each pass owns its
//! suppression window, so passes never influence each other.

use tracing::trace;

use crate::config::WikilinkConfig;
use crate::matcher::{Match, SuppressionWindow};
use crate::resolver::{render, resolve};

/// One render pass over a single document
#[derive(Debug)]
pub struct RenderPass<'c> {
    config: &'c WikilinkConfig,
    window: SuppressionWindow,
}

impl<'c> RenderPass<'c> {
    pub fn new(config: &'c WikilinkConfig) -> Self {
        Self {
            config,
            window: SuppressionWindow::new(),
        }
    }

    /// Next candidate at or after `from`
    pub fn next_candidate<'t>(&self, text: &'t str, from: usize) -> Option<Match<'t>> {
        self.config.matcher().find_next(text, from)
    }

    /// Whether `offset` falls inside the latest accepted match
    pub fn is_inside_suppressed(&self, offset: usize) -> bool {
        self.window.contains(offset)
    }

    /// Mark a match as accepted, moving the suppression window onto it
    pub fn accept(&mut self, accepted: &Match<'_>) {
        self.window.record(accepted);
    }

    pub fn window(&self) -> &SuppressionWindow {
        &self.window
    }

    /// Markup for a candidate, or `None` when it stays literal text
    ///
    /// Suppressed candidates and candidates that fail resolution are left
    /// alone; accepted ones move the suppression window.
    pub fn replace(&mut self, candidate: &Match<'_>) -> Option<String> {
        if self.is_inside_suppressed(candidate.start()) {
            trace!(
                offset = candidate.start(),
                "Wikilink candidate suppressed inside previous match"
            );
            return None;
        }
        let link = resolve(candidate, self.config)?;
        let markup = render(&link, self.config);
        self.accept(candidate);
        Some(markup)
    }

    /// Replace every wikilink in `text`, keeping everything else verbatim
    pub fn rewrite(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;

        while let Some(candidate) = self.next_candidate(text, cursor) {
            output.push_str(&text[cursor..candidate.start()]);

            if candidate.is_empty() {
                // Zero-width custom patterns: step over one character
                match text[candidate.start()..].chars().next() {
                    Some(ch) => {
                        output.push(ch);
                        cursor = candidate.start() + ch.len_utf8();
                        continue;
                    }
                    None => {
                        cursor = candidate.start();
                        break;
                    }
                }
            }

            match self.replace(&candidate) {
                Some(markup) => output.push_str(&markup),
                None => output.push_str(candidate.full_text()),
            }
            cursor = candidate.end();
        }

        output.push_str(&text[cursor..]);
        output
    }
}

impl WikilinkConfig {
    /// Start a fresh render pass with an empty suppression window
    pub fn render_pass(&self) -> RenderPass<'_> {
        RenderPass::new(self)
    }

    /// Replace every wikilink in `text` using a fresh render pass
    pub fn rewrite(&self, text: &str) -> String {
        self.render_pass().rewrite(text)
    }
}
