//! Directory walking for a single name pattern

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, NamePattern};
use crate::Result;

/// Inclusive size bounds; an absent maximum means no upper bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SizeRange {
    pub minimum: u64,
    pub maximum: Option<u64>,
}

impl SizeRange {
    pub fn contains(&self, size: u64) -> bool {
        size >= self.minimum && self.maximum.is_none_or(|maximum| size <= maximum)
    }
}

/// Options shared by every pattern walk of one search
#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Follow symbolic links
    pub follow_links: bool,
    /// Size filter applied to matching files
    pub sizes: SizeRange,
    /// Stop after this many matches
    pub limit: Option<usize>,
}

/// Collect the files under `root` whose name matches `pattern`
///
/// Entries come back in walk order. Any walk or metadata error aborts the walk
/// and is returned with the offending path attached.
pub(crate) fn collect_matching(
    root: &Path,
    pattern: &NamePattern,
    options: &WalkOptions,
) -> Result<Vec<FileEntry>> {
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(options.follow_links);

    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut found = Vec::new();

    for entry in walker {
        let entry = entry?;

        if !is_file(&entry) {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !pattern.is_match(&name) {
            continue;
        }

        let file = to_file_entry(&entry)?;
        if !options.sizes.contains(file.size_bytes) {
            continue;
        }

        found.push(file);

        if options.limit.is_some_and(|limit| found.len() >= limit) {
            log::debug!(
                "Pattern '{}' reached its limit of {} entries",
                pattern.extension(),
                found.len()
            );
            break;
        }
    }

    log::debug!(
        "Pattern '{}' matched {} file(s) under {}",
        pattern.extension(),
        found.len(),
        root.display()
    );

    Ok(found)
}

/// Regular files, plus symlinks that resolve to regular files
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn to_file_entry(entry: &DirEntry) -> Result<FileEntry> {
    let metadata = if entry.path_is_symlink() && !entry.file_type().is_file() {
        // Symlink seen without follow_links: report the target's size
        std::fs::metadata(entry.path()).map_err(|e| {
            crate::error::IoError::from_std(e).with_path(entry.path())
        })?
    } else {
        entry.metadata()?
    };

    Ok(FileEntry {
        path: entry.path().to_path_buf(),
        name: entry.file_name().to_string_lossy().into_owned(),
        size_bytes: metadata.len(),
        last_modified: metadata.modified().ok().map(Into::into),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("small.txt"), vec![b'a'; 10]).unwrap();
        fs::write(base.join("large.txt"), vec![b'a'; 1000]).unwrap();
        fs::write(base.join("image.png"), vec![b'a'; 500]).unwrap();

        let subdir = base.join("nested");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("deep.txt"), vec![b'a'; 100]).unwrap();

        dir
    }

    fn options(recursive: bool) -> WalkOptions {
        WalkOptions {
            recursive,
            follow_links: false,
            sizes: SizeRange {
                minimum: 0,
                maximum: None,
            },
            limit: None,
        }
    }

    fn names(files: &[FileEntry]) -> Vec<String> {
        let mut names: Vec<_> = files.iter().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_size_range() {
        let bounded = SizeRange {
            minimum: 200,
            maximum: Some(1000),
        };
        assert!(!bounded.contains(100));
        assert!(bounded.contains(200));
        assert!(bounded.contains(1000));
        assert!(!bounded.contains(1001));

        let open = SizeRange {
            minimum: 0,
            maximum: None,
        };
        assert!(open.contains(0));
        assert!(open.contains(u64::MAX));
    }

    #[test]
    fn test_top_level_only() {
        let dir = create_test_directory();
        let pattern = NamePattern::from_extension(".txt", false);

        let files = collect_matching(dir.path(), &pattern, &options(false)).unwrap();

        assert_eq!(names(&files), vec!["large.txt", "small.txt"]);
    }

    #[test]
    fn test_recursive_walk() {
        let dir = create_test_directory();
        let pattern = NamePattern::from_extension(".txt", false);

        let files = collect_matching(dir.path(), &pattern, &options(true)).unwrap();

        assert_eq!(names(&files), vec!["deep.txt", "large.txt", "small.txt"]);
    }

    #[test]
    fn test_directories_are_not_reported() {
        let dir = create_test_directory();
        let pattern = NamePattern::from_extension("*", false);

        let files = collect_matching(dir.path(), &pattern, &options(false)).unwrap();

        assert!(files.iter().all(|f| f.name != "nested"));
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_size_filter_and_metadata() {
        let dir = create_test_directory();
        let pattern = NamePattern::from_extension(".*", false);
        let mut opts = options(true);
        opts.sizes = SizeRange {
            minimum: 100,
            maximum: Some(500),
        };

        let files = collect_matching(dir.path(), &pattern, &opts).unwrap();

        assert_eq!(names(&files), vec!["deep.txt", "image.png"]);
        for file in &files {
            assert!(file.path.starts_with(dir.path()));
            assert!(file.last_modified.is_some());
        }
    }

    #[test]
    fn test_limit_stops_walk() {
        let dir = create_test_directory();
        let pattern = NamePattern::from_extension(".*", false);
        let mut opts = options(true);
        opts.limit = Some(2);

        let files = collect_matching(dir.path(), &pattern, &opts).unwrap();

        assert_eq!(files.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_reported_with_target_size() {
        let dir = create_test_directory();
        std::os::unix::fs::symlink(dir.path().join("large.txt"), dir.path().join("link.txt"))
            .unwrap();
        let pattern = NamePattern::from_extension("link.txt", false);

        let files = collect_matching(dir.path(), &pattern, &options(false)).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size_bytes, 1000);
    }
}
