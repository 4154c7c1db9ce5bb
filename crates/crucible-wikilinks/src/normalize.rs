//! Default label and page name hooks
//!
//! Page names are turned into file-system friendly paths: each `/`
//! separated segment is sanitized as a file name and whitespace runs become
//! underscores. Labels are only trimmed.

use regex::Regex;
use sanitize_filename::{sanitize_with_options, Options};
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Default label to page name derivation: the label itself
pub fn page_name_from_label(label: &str) -> String {
    label.to_string()
}

/// Default page name post-processing
///
/// Trims, sanitizes every path segment and replaces whitespace runs with `_`.
/// Slashes survive so `[[super/sub]]` links to `super/sub`.
pub fn post_process_page_name(page_name: &str) -> String {
    let joined = page_name
        .trim()
        .split('/')
        .map(sanitize_segment)
        .collect::<Vec<_>>()
        .join("/");
    WHITESPACE_RUN.replace_all(&joined, "_").into_owned()
}

/// Default label post-processing
pub fn post_process_label(label: &str) -> String {
    label.trim().to_string()
}

/// Strip everything that cannot appear in a portable file name
///
/// Windows rules (device names, trailing dots and spaces) apply on every
/// platform.
pub fn sanitize_segment(segment: &str) -> String {
    sanitize_with_options(
        segment,
        Options {
            windows: true,
            truncate: true,
            replacement: "",
        },
    )
}
