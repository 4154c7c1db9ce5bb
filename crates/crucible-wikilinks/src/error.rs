//! Wikilink configuration error types
//!
//! Rendering never fails: malformed wikilink syntax degrades to literal
//! text. Errors only surface while a configuration is being set up.

use std::io;
use thiserror::Error;

/// Errors raised while building or loading a wikilink configuration
#[derive(Debug, Error)]
pub enum WikilinkError {
    /// The link pattern is not a valid regular expression
    #[error("invalid link pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The link pattern has an unsupported number of capture groups
    #[error("link pattern must have 1 to 3 capture groups, found {found}")]
    CaptureGroups {
        /// Number of explicit capture groups in the pattern
        found: usize,
    },

    /// I/O error reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is not valid TOML or has unknown keys
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type for wikilink configuration operations
pub type WikilinkResult<T> = Result<T, WikilinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_group_message() {
        let err = WikilinkError::CaptureGroups { found: 4 };
        assert_eq!(
            err.to_string(),
            "link pattern must have 1 to 3 capture groups, found 4"
        );
    }

    #[test]
    fn test_regex_error_converts() {
        let regex_err = regex::Regex::new("[[").unwrap_err();
        let err: WikilinkError = regex_err.into();
        assert!(matches!(err, WikilinkError::InvalidPattern(_)));
        assert!(err.to_string().starts_with("invalid link pattern"));
    }
}
