//! Glob-style wildcard matching
//!
//! Supports two metacharacters: `*` matches any run of characters (including
//! none) and `?` matches exactly one character. Everything else is literal.
//! Matching is a two-pointer scan that remembers the most recent `*` and
//! backtracks to it on a mismatch, so it runs without recursion or allocation
//! beyond the character buffers.

use std::fmt;

/// Metacharacter matching any run of characters
pub const ANY_RUN: char = '*';

/// Metacharacter matching exactly one character
pub const ANY_ONE: char = '?';

/// Check whether `text` matches the wildcard `pattern`
///
/// When `case_insensitive` is set both sides are lower-cased before the
/// comparison. Lowering is plain Unicode lowercasing and never depends on the
/// process locale.
///
/// ```
/// use toolbelt_core::wildcard::matches;
///
/// assert!(matches("Abc", "a*", true));
/// assert!(!matches("Abc", "a*", false));
/// assert!(matches("report-07.csv", "report-??.csv", false));
/// ```
pub fn matches(text: &str, pattern: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        let text: Vec<char> = text.to_lowercase().chars().collect();
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
        match_chars(&text, &pattern)
    } else {
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        match_chars(&text, &pattern)
    }
}

/// Check whether a string contains any wildcard metacharacter
pub fn contains_wildcard(s: &str) -> bool {
    s.contains(ANY_RUN) || s.contains(ANY_ONE)
}

fn match_chars(text: &[char], pattern: &[char]) -> bool {
    // Literal prefix up to the first star
    let mut it = 0;
    while it < text.len() && pattern.get(it) != Some(&ANY_RUN) {
        match pattern.get(it) {
            Some(&p) if p == text[it] || p == ANY_ONE => it += 1,
            _ => return false,
        }
    }

    let mut ip = it;
    // Pattern index just past the last star, and the text index to resume from
    let mut mp = 0;
    let mut cp = 0;

    while it < text.len() {
        match pattern.get(ip) {
            Some(&ANY_RUN) => {
                ip += 1;
                if ip == pattern.len() {
                    return true;
                }
                mp = ip;
                cp = it + 1;
            }
            Some(&p) if p == text[it] || p == ANY_ONE => {
                ip += 1;
                it += 1;
            }
            _ => {
                ip = mp;
                it = cp;
                cp += 1;
            }
        }
    }

    while pattern.get(ip) == Some(&ANY_RUN) {
        ip += 1;
    }

    ip == pattern.len()
}

/// A wildcard pattern prepared for repeated matching
///
/// The pattern is split into characters (and lower-cased when matching is
/// case-insensitive) once, so matching many names only pays for the text side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardPattern {
    source: String,
    chars: Vec<char>,
    case_insensitive: bool,
}

impl WildcardPattern {
    /// Prepare a pattern
    pub fn new(pattern: &str, case_insensitive: bool) -> Self {
        let chars = if case_insensitive {
            pattern.to_lowercase().chars().collect()
        } else {
            pattern.chars().collect()
        };

        Self {
            source: pattern.to_string(),
            chars,
            case_insensitive,
        }
    }

    /// Check whether `text` matches this pattern
    pub fn is_match(&self, text: &str) -> bool {
        let text: Vec<char> = if self.case_insensitive {
            text.to_lowercase().chars().collect()
        } else {
            text.chars().collect()
        };

        match_chars(&text, &self.chars)
    }

    /// True when the pattern contains `*` or `?`
    pub fn has_wildcards(&self) -> bool {
        contains_wildcard(&self.source)
    }

    /// True when the pattern is nothing but stars, which matches every input
    pub fn matches_everything(&self) -> bool {
        !self.chars.is_empty() && self.chars.iter().all(|&c| c == ANY_RUN)
    }

    /// The pattern as it was given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether matching ignores case
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
