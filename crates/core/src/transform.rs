use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Returned by hash mode when the text holds no `#word` markers.
pub const HASH_SENTINEL: &str = "no hash-marked content found";

/// Returned by space mode when the text holds nothing but whitespace.
pub const SPACE_SENTINEL: &str = "no processable text content found";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Unsupported mode: {0}")]
    UnsupportedMode(String),
}

/// Extraction mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pick `Hash` when the text contains a `#`, `Space` otherwise
    #[default]
    Auto,
    /// Collect every `#word` marker
    Hash,
    /// One whitespace-separated token per line
    Space,
}

/// Extraction rule actually applied once `Mode::Auto` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Hash,
    Space,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Hash => "hash",
            Mode::Space => "space",
        }
    }

    /// Pick the rule for `text`. Only `Auto` looks at the content.
    pub fn resolve(self, text: &str) -> Rule {
        match self {
            Mode::Auto if text.contains('#') => Rule::Hash,
            Mode::Auto => Rule::Space,
            Mode::Hash => Rule::Hash,
            Mode::Space => Rule::Space,
        }
    }
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Hash => "hash",
            Rule::Space => "space",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Mode::Auto),
            "hash" => Ok(Mode::Hash),
            "space" => Ok(Mode::Space),
            other => Err(TransformError::UnsupportedMode(other.to_string())),
        }
    }
}

/// Transform `text` using the mode named by `mode`.
///
/// Fails only when `mode` is not one of `auto`, `hash` or `space`.
pub fn transform(text: &str, mode: &str) -> Result<String, TransformError> {
    let mode = mode.parse::<Mode>()?;
    Ok(transform_with(text, mode))
}

/// Transform `text` with an already parsed mode.
pub fn transform_with(text: &str, mode: Mode) -> String {
    match mode.resolve(text) {
        Rule::Hash => extract_hash_markers(text),
        Rule::Space => split_whitespace(text),
    }
}

/// Unicode whitespace plus the byte order mark, which JavaScript's `\s` and
/// `trim` also treat as a separator.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Collect the word after every `#` marker, one per line.
pub fn extract_hash_markers(text: &str) -> String {
    static RE_MARKER: OnceLock<Regex> = OnceLock::new();
    let re_marker = RE_MARKER.get_or_init(|| Regex::new(r"#([^#\s\x{FEFF}]+)").unwrap());

    let markers: Vec<&str> = re_marker
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if markers.is_empty() {
        return HASH_SENTINEL.to_string();
    }

    markers.join("\n")
}

/// Put every whitespace-separated token on its own line.
pub fn split_whitespace(text: &str) -> String {
    let words: Vec<&str> = text
        .trim_matches(is_separator)
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        return SPACE_SENTINEL.to_string();
    }

    words.join("\n")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Without a `#`, auto mode behaves exactly like space mode
        #[test]
        fn test_auto_without_hash_matches_space(text in "[^#]{0,64}") {
            prop_assert_eq!(transform(&text, "auto"), transform(&text, "space"));
        }

        /// Property: With a `#`, auto mode behaves exactly like hash mode
        #[test]
        fn test_auto_with_hash_matches_hash(
            prefix in "\\PC{0,32}",
            suffix in "\\PC{0,32}",
        ) {
            let text = format!("{prefix}#{suffix}");
            prop_assert_eq!(transform(&text, "auto"), transform(&text, "hash"));
        }

        /// Property: Repeated calls give the same output
        #[test]
        fn test_transform_is_deterministic(
            text in "\\PC{0,64}",
            mode in prop::sample::select(vec!["auto", "hash", "space"]),
        ) {
            prop_assert_eq!(transform(&text, mode), transform(&text, mode));
        }
    }
}
