//! File finding with a fluent search builder
//!
//! [`FileFinder`] collects search criteria (root directory, name patterns,
//! size bounds, a result cap and traversal options) and runs the search when
//! one of its `find` methods is called. Each name pattern is enumerated on its
//! own rayon task; the per-pattern results are concatenated in the order the
//! patterns were added.
//!
//! ```no_run
//! use toolbelt_core::file_finder::{FileFinder, SortKey, SortOrder};
//!
//! # fn example() -> toolbelt_core::Result<()> {
//! let largest_logs = FileFinder::new()
//!     .with_root_path("/var/log")?
//!     .with_extensions([".log", ".txt"])?
//!     .with_minimum_size(1024)?
//!     .with_maximum_results(10)?
//!     .with_recursion(true)
//!     .find_sorted(SortKey::Size, SortOrder::Descending)?;
//!
//! for file in largest_logs {
//!     println!("{} {}", file.human_readable_size(), file.path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod finder;
mod pattern;
mod walker;

pub use finder::FileFinder;
pub use pattern::{DEFAULT_EXTENSION, NamePattern};

use crate::human_readable;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// A file produced by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Full path to the file
    pub path: PathBuf,
    /// File name without its directory
    pub name: String,
    /// Size of the file in bytes
    pub size_bytes: u64,
    /// Last modification time, when the platform reports one
    pub last_modified: Option<DateTime<Local>>,
}

impl FileEntry {
    /// The file extension without the leading dot
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }

    /// The file size formatted for people, e.g. `1.5 MB`
    pub fn human_readable_size(&self) -> String {
        human_readable::format_bytes(i64::try_from(self.size_bytes).unwrap_or(i64::MAX))
    }
}

/// Direction of a sorted search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Build from an "is ascending" flag
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    pub(crate) fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Commonly used sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Path,
    Size,
    Modified,
}

crate::impl_cyclic!(SortKey: Name, Path, Size, Modified);

impl SortKey {
    pub(crate) fn compare(self, a: &FileEntry, b: &FileEntry) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Path => a.path.cmp(&b.path),
            Self::Size => a.size_bytes.cmp(&b.size_bytes),
            Self::Modified => a.last_modified.cmp(&b.last_modified),
        }
    }
}

/// Persistent defaults for file searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Compare name patterns ignoring case
    pub case_insensitive: bool,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Drop paths already produced by an earlier pattern
    pub distinct: bool,
    /// Cap on returned entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_results: Option<usize>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            case_insensitive: true,
            follow_links: false,
            distinct: false,
            maximum_results: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn entry(name: &str, size: u64) -> FileEntry {
        FileEntry {
            path: Path::new("/data").join(name),
            name: name.to_string(),
            size_bytes: size,
            last_modified: None,
        }
    }

    #[test]
    fn test_entry_extension() {
        assert_eq!(entry("notes.txt", 1).extension(), Some("txt"));
        assert_eq!(entry("archive.tar.gz", 1).extension(), Some("gz"));
        assert_eq!(entry("Makefile", 1).extension(), None);
    }

    #[test]
    fn test_entry_human_readable_size() {
        assert_eq!(entry("a", 512).human_readable_size(), "512 bytes");
        assert_eq!(entry("a", 1536).human_readable_size(), "1.5 KB");
        assert_eq!(entry("a", u64::MAX).human_readable_size(), "8 EB");
    }

    #[test]
    fn test_sort_key_compare() {
        let small = entry("b.txt", 10);
        let large = entry("a.txt", 20);

        assert_eq!(SortKey::Size.compare(&small, &large), Ordering::Less);
        assert_eq!(SortKey::Name.compare(&small, &large), Ordering::Greater);
        assert_eq!(SortKey::Path.compare(&small, &large), Ordering::Greater);
        assert_eq!(SortKey::Modified.compare(&small, &large), Ordering::Equal);
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::from_ascending(true), SortOrder::Ascending);
        assert_eq!(SortOrder::from_ascending(false), SortOrder::Descending);
        assert_eq!(SortOrder::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Ascending.apply(Ordering::Less), Ordering::Less);
    }

    #[test]
    fn test_finder_config_defaults() {
        let config = FinderConfig::default();
        assert!(!config.recursive);
        assert!(config.case_insensitive);
        assert!(!config.follow_links);
        assert!(!config.distinct);
        assert_eq!(config.maximum_results, None);
    }

    #[test]
    fn test_finder_config_partial_deserialize() {
        let config: FinderConfig =
            serde_json::from_str(r#"{"recursive": true, "maximum_results": 5}"#).unwrap();

        assert!(config.recursive);
        assert!(config.case_insensitive);
        assert_eq!(config.maximum_results, Some(5));
    }
}
