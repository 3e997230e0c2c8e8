//! Extension filters turned into file name patterns

use crate::wildcard::WildcardPattern;

/// Extension filter used when a search names none
pub const DEFAULT_EXTENSION: &str = ".*";

/// Name pattern that matches every file, dotted or not
const ALL_FILES: &str = "*.*";

/// A file name filter built from an extension such as `.txt`
///
/// - a filter starting with `.` matches names ending in it: `.txt` becomes `*.txt`
/// - any other filter is a whole-name wildcard pattern: `report-??.csv`, `Makefile`
/// - `*.*` (and so `.*`) matches every name, including names without a dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    extension: String,
    matcher: WildcardPattern,
    match_all: bool,
}

impl NamePattern {
    /// Build a pattern from an extension filter
    pub fn from_extension(extension: &str, case_insensitive: bool) -> Self {
        let glob = if extension.starts_with('.') {
            format!("*{extension}")
        } else {
            extension.to_string()
        };

        let matcher = WildcardPattern::new(&glob, case_insensitive);
        let match_all = glob == ALL_FILES || matcher.matches_everything();

        Self {
            extension: extension.to_string(),
            matcher,
            match_all,
        }
    }

    /// Check a file name against the pattern
    pub fn is_match(&self, file_name: &str) -> bool {
        self.match_all || self.matcher.is_match(file_name)
    }

    /// The extension filter this pattern was built from
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The wildcard pattern applied to file names
    pub fn glob(&self) -> &str {
        self.matcher.as_str()
    }
}
