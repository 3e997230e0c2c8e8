//! Toolbelt Core Library
//!
//! Wildcard matching and a fluent file finder, plus small helpers for byte
//! sizes, human readable output, dates, enums, strings and download file names.

pub mod byte_size;
pub mod dates;
pub mod enums;
pub mod error;
pub mod file_finder;
pub mod human_readable;
pub mod strings;
pub mod url;
pub mod wildcard;

// Re-export main types
pub use byte_size::{ByteUnit, parse_size};
pub use dates::Calendar;
pub use enums::Cyclic;
pub use error::{Error, Result};
pub use file_finder::{FileEntry, FileFinder, FinderConfig, SortKey, SortOrder};
pub use strings::{StrExt, TimeDeltaExt};
pub use url::UrlService;
pub use wildcard::{WildcardPattern, matches};
