//! Link pattern matching and nested-match suppression

use regex::Regex;
use std::ops::Range;

use crate::error::WikilinkResult;

/// One occurrence of the link pattern in a piece of text
///
/// Offsets are byte offsets into the text that was searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    full_text: &'t str,
    groups: Vec<Option<&'t str>>,
    start: usize,
}

/// The two wikilink forms, decided by the optional pipe group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSyntax<'t> {
    /// `[[page|label]]`
    Piped { page: &'t str, label: &'t str },
    /// `[[label]]`, page name derived from the label
    LabelOnly { label: &'t str },
}

impl<'t> Match<'t> {
    fn from_captures(captures: &regex::Captures<'t>, base: usize) -> Option<Self> {
        let whole = captures.get(0)?;
        Some(Self {
            full_text: whole.as_str(),
            groups: captures
                .iter()
                .skip(1)
                .map(|group| group.map(|g| g.as_str()))
                .collect(),
            start: base + whole.start(),
        })
    }

    pub fn full_text(&self) -> &'t str {
        self.full_text
    }

    /// Capture group by 1-based index, `None` when it did not participate
    pub fn group(&self, index: usize) -> Option<&'t str> {
        index
            .checked_sub(1)
            .and_then(|i| self.groups.get(i).copied().flatten())
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.full_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    pub fn end(&self) -> usize {
        self.start + self.len()
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Classify the match; `None` when the primary group is missing
    ///
    /// A present but empty pipe group counts as label-only.
    pub fn syntax(&self) -> Option<LinkSyntax<'t>> {
        let primary = self.group(1)?;
        match self.group(2) {
            Some(pipe) if !pipe.is_empty() => Some(LinkSyntax::Piped {
                page: primary,
                label: self.group(3).unwrap_or_default(),
            }),
            _ => Some(LinkSyntax::LabelOnly { label: primary }),
        }
    }
}

/// Finds link pattern occurrences in text
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Regex,
    anchored: Regex,
}

impl PatternMatcher {
    pub fn new(pattern: Regex) -> WikilinkResult<Self> {
        let anchored = Regex::new(&format!(r"\A(?:{})", pattern.as_str()))?;
        Ok(Self { pattern, anchored })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// First match starting at or after `from`
    ///
    /// A `from` inside a multi-byte character moves on to the next boundary.
    pub fn find_next<'t>(&self, text: &'t str, mut from: usize) -> Option<Match<'t>> {
        if from > text.len() {
            return None;
        }
        while !text.is_char_boundary(from) {
            from += 1;
        }
        self.pattern
            .captures_at(text, from)
            .and_then(|captures| Match::from_captures(&captures, 0))
    }

    /// Match that starts exactly at `offset`, as an inline rule needs
    pub fn match_at<'t>(&self, text: &'t str, offset: usize) -> Option<Match<'t>> {
        let rest = text.get(offset..)?;
        self.anchored
            .captures(rest)
            .and_then(|captures| Match::from_captures(&captures, offset))
    }
}

/// Span of the latest accepted match in a render pass
///
/// Only the latest match is remembered, so disjoint matches never suppress
/// each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionWindow {
    span: Option<Range<usize>>,
}

impl SuppressionWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn covering(start: usize, len: usize) -> Self {
        Self {
            span: Some(start..start + len),
        }
    }

    pub fn record(&mut self, accepted: &Match<'_>) {
        self.span = Some(accepted.span());
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.span.as_ref().is_some_and(|span| span.contains(&offset))
    }

    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }

    pub fn reset(&mut self) {
        self.span = None;
    }
}
