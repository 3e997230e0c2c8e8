//! The fluent file search builder

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::pattern::{DEFAULT_EXTENSION, NamePattern};
use super::walker::{self, SizeRange, WalkOptions};
use super::{FileEntry, FinderConfig, SortKey, SortOrder};
use crate::error::{IoError, ValidationError};
use crate::{Error, Result};

/// Search criteria collected through chained `with_*` calls
///
/// Setters consume the builder and hand it back, so a chain reads top to
/// bottom and the finished search is run by one of the `find` methods.
/// Setters that can reject their argument return `Result<Self>`.
///
/// Defaults: every file (`.*`), no size bounds, no result cap, top level only,
/// case-insensitive name matching, symlinks not followed, duplicates kept.
#[derive(Debug, Clone)]
pub struct FileFinder {
    root_path: Option<PathBuf>,
    extensions: Vec<String>,
    minimum_size_bytes: u64,
    maximum_size_bytes: Option<u64>,
    maximum_results: Option<usize>,
    recursive: bool,
    case_insensitive: bool,
    follow_links: bool,
    distinct: bool,
}

impl Default for FileFinder {
    fn default() -> Self {
        Self::from_defaults(&FinderConfig::default())
    }
}

/// Everything a search needs once the builder has been checked
struct SearchPlan {
    root: PathBuf,
    patterns: Vec<NamePattern>,
    options: WalkOptions,
    maximum_results: Option<usize>,
    distinct: bool,
}

impl FileFinder {
    /// Create a finder with default criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder seeded from persistent defaults
    pub fn from_config(config: &FinderConfig) -> Result<Self> {
        let finder = Self::from_defaults(config);
        match config.maximum_results {
            Some(limit) => finder.with_maximum_results(limit),
            None => Ok(finder),
        }
    }

    fn from_defaults(config: &FinderConfig) -> Self {
        Self {
            root_path: None,
            extensions: Vec::new(),
            minimum_size_bytes: 0,
            maximum_size_bytes: None,
            maximum_results: None,
            recursive: config.recursive,
            case_insensitive: config.case_insensitive,
            follow_links: config.follow_links,
            distinct: config.distinct,
        }
    }

    /// Set the directory to search
    ///
    /// Fails with a not-found error when the path is not an existing directory.
    pub fn with_root_path(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(IoError::directory_not_found(path).into());
        }
        self.root_path = Some(path.to_path_buf());
        Ok(self)
    }

    /// Add one extension filter such as `.txt` or a whole-name pattern
    pub fn with_extension(self, extension: &str) -> Result<Self> {
        self.with_extensions([extension])
    }

    /// Add several extension filters
    ///
    /// The collection must not be empty and no item may be empty. Nothing is
    /// added when any item is rejected. Repeated calls accumulate.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();

        if extensions.is_empty() {
            return Err(ValidationError::invalid_argument(
                "extensions",
                "at least one extension is required",
            )
            .into());
        }
        if extensions.iter().any(|ext| ext.is_empty()) {
            return Err(ValidationError::invalid_argument(
                "extensions",
                "extensions must not be empty",
            )
            .into());
        }

        self.extensions.extend(extensions);
        Ok(self)
    }

    /// Skip files smaller than `bytes`
    pub fn with_minimum_size(mut self, bytes: u64) -> Result<Self> {
        if bytes == 0 {
            return Err(ValidationError::invalid_argument(
                "minimum_size",
                "must be greater than zero",
            )
            .into());
        }
        self.minimum_size_bytes = bytes;
        Ok(self)
    }

    /// Skip files larger than `bytes`
    pub fn with_maximum_size(mut self, bytes: u64) -> Result<Self> {
        if bytes == 0 {
            return Err(ValidationError::invalid_argument(
                "maximum_size",
                "must be greater than zero",
            )
            .into());
        }
        self.maximum_size_bytes = Some(bytes);
        Ok(self)
    }

    /// Return at most `count` files
    pub fn with_maximum_results(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(ValidationError::invalid_argument(
                "maximum_results",
                "must be greater than zero",
            )
            .into());
        }
        self.maximum_results = Some(count);
        Ok(self)
    }

    /// Descend into subdirectories
    pub fn with_recursion(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Compare name patterns ignoring case
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Follow symbolic links to directories while walking
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Drop files already produced by an earlier pattern
    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn minimum_size(&self) -> u64 {
        self.minimum_size_bytes
    }

    pub fn maximum_size(&self) -> Option<u64> {
        self.maximum_size_bytes
    }

    pub fn maximum_results(&self) -> Option<usize> {
        self.maximum_results
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Run the search
    ///
    /// Results are grouped by pattern in the order the patterns were added.
    /// Within a pattern files appear in directory walk order. A file matching
    /// several patterns appears once per pattern unless distinct is set.
    pub fn find(self) -> Result<Vec<FileEntry>> {
        let mut plan = self.into_plan()?;
        // Truncating the concatenation never needs more than the cap from any
        // single pattern
        plan.options.limit = plan.maximum_results;

        let mut files = enumerate(&plan)?;
        truncate(&mut files, plan.maximum_results);
        Ok(files)
    }

    /// Run the search and order the whole result set by a key before capping it
    ///
    /// The sort is stable: files with equal keys keep their discovery order.
    pub fn find_sorted_by<K, F>(self, key: F, order: SortOrder) -> Result<Vec<FileEntry>>
    where
        K: Ord,
        F: Fn(&FileEntry) -> K,
    {
        let plan = self.into_plan()?;

        let mut files = enumerate(&plan)?;
        files.sort_by(|a, b| order.apply(key(a).cmp(&key(b))));
        truncate(&mut files, plan.maximum_results);
        Ok(files)
    }

    /// Run the search ordered by one of the common keys
    pub fn find_sorted(self, key: SortKey, order: SortOrder) -> Result<Vec<FileEntry>> {
        let plan = self.into_plan()?;

        let mut files = enumerate(&plan)?;
        files.sort_by(|a, b| order.apply(key.compare(a, b)));
        truncate(&mut files, plan.maximum_results);
        Ok(files)
    }

    fn into_plan(self) -> Result<SearchPlan> {
        let root = match self.root_path {
            Some(root) if root.is_dir() => root,
            Some(root) => return Err(IoError::directory_not_found(&root).into()),
            None => return Err(Error::Io(IoError::not_found())),
        };

        if let Some(maximum) = self.maximum_size_bytes
            && self.minimum_size_bytes > maximum
        {
            return Err(ValidationError::invalid_argument(
                "minimum_size",
                &format!(
                    "minimum size {} exceeds maximum size {maximum}",
                    self.minimum_size_bytes
                ),
            )
            .into());
        }

        let extensions = if self.extensions.is_empty() {
            vec![DEFAULT_EXTENSION.to_string()]
        } else {
            self.extensions
        };

        let patterns = extensions
            .iter()
            .map(|ext| NamePattern::from_extension(ext, self.case_insensitive))
            .collect();

        Ok(SearchPlan {
            root,
            patterns,
            options: WalkOptions {
                recursive: self.recursive,
                follow_links: self.follow_links,
                sizes: SizeRange {
                    minimum: self.minimum_size_bytes,
                    maximum: self.maximum_size_bytes,
                },
                limit: None,
            },
            maximum_results: self.maximum_results,
            distinct: self.distinct,
        })
    }
}

/// Walk the root once per pattern in parallel and concatenate in pattern order
fn enumerate(plan: &SearchPlan) -> Result<Vec<FileEntry>> {
    log::debug!(
        "Searching {} for {} pattern(s), recursive: {}",
        plan.root.display(),
        plan.patterns.len(),
        plan.options.recursive
    );

    let per_pattern: Vec<Vec<FileEntry>> = plan
        .patterns
        .par_iter()
        .map(|pattern| walker::collect_matching(&plan.root, pattern, &plan.options))
        .collect::<Result<_>>()?;

    let mut files: Vec<FileEntry> = per_pattern.into_iter().flatten().collect();

    if plan.distinct {
        let mut seen = HashSet::new();
        files.retain(|file| seen.insert(file.path.clone()));
    }

    log::debug!(
        "Found {} file(s) under {}",
        files.len(),
        plan.root.display()
    );

    Ok(files)
}

fn truncate(files: &mut Vec<FileEntry>, maximum_results: Option<usize>) {
    if let Some(limit) = maximum_results {
        files.truncate(limit);
    }
}
