//! Temporary directory trees with files of known sizes

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

#[derive(Debug, Clone)]
struct PlannedFile {
    relative: PathBuf,
    size: usize,
    age: Option<Duration>,
}

/// Builder for a temporary directory tree
///
/// ```
/// use toolbelt_test_utils::TestTreeBuilder;
///
/// let tree = TestTreeBuilder::new()
///     .with_file("a.txt", 100)
///     .with_file("nested/b.log", 2048)
///     .with_dir("empty")
///     .build()
///     .unwrap();
///
/// assert!(tree.join("nested/b.log").is_file());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestTreeBuilder {
    files: Vec<PlannedFile>,
    dirs: Vec<PathBuf>,
}

impl TestTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file of `size` bytes, creating parent directories as needed
    pub fn with_file(mut self, relative: impl AsRef<Path>, size: usize) -> Self {
        self.files.push(PlannedFile {
            relative: relative.as_ref().to_path_buf(),
            size,
            age: None,
        });
        self
    }

    /// Add a file whose modification time lies `age` in the past
    pub fn with_aged_file(mut self, relative: impl AsRef<Path>, size: usize, age: Duration) -> Self {
        self.files.push(PlannedFile {
            relative: relative.as_ref().to_path_buf(),
            size,
            age: Some(age),
        });
        self
    }

    /// Add an empty directory
    pub fn with_dir(mut self, relative: impl AsRef<Path>) -> Self {
        self.dirs.push(relative.as_ref().to_path_buf());
        self
    }

    /// Create the tree in a fresh temporary directory
    pub fn build(self) -> io::Result<TestTree> {
        let dir = TempDir::new()?;

        for relative in &self.dirs {
            fs::create_dir_all(dir.path().join(relative))?;
        }

        for (seed, planned) in self.files.iter().enumerate() {
            let path = dir.path().join(&planned.relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, deterministic_content(planned.size, seed as u64))?;

            if let Some(age) = planned.age {
                let modified = SystemTime::now() - age;
                File::options().write(true).open(&path)?.set_modified(modified)?;
            }
        }

        Ok(TestTree { dir })
    }
}

/// Repeatable pseudo-random bytes so files with equal sizes still differ
fn deterministic_content(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1);
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

/// A temporary directory tree, removed when dropped
#[derive(Debug)]
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Root of the tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of an entry inside the tree
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }
}
