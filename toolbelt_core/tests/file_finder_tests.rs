//! Integration tests for the file finder

use std::time::Duration;
use toolbelt_core::{FileFinder, SortKey, SortOrder};
use toolbelt_test_utils::{TestTree, TestTreeBuilder};

fn sized_tree() -> TestTree {
    TestTreeBuilder::new()
        .with_file("small.dat", 100)
        .with_file("medium.dat", 500)
        .with_file("large.dat", 1000)
        .build()
        .unwrap()
}

fn mixed_tree() -> TestTree {
    TestTreeBuilder::new()
        .with_file("readme.md", 10)
        .with_file("notes.txt", 20)
        .with_file("TODO.TXT", 30)
        .with_file("Makefile", 40)
        .with_file("src/main.rs", 50)
        .with_file("src/lib.rs", 60)
        .with_file("src/deep/mod.rs", 70)
        .with_dir("empty")
        .build()
        .unwrap()
}

fn sorted_names(files: &[toolbelt_core::FileEntry]) -> Vec<&str> {
    let mut names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    names.sort_unstable();
    names
}

#[test]
fn test_size_bounds_are_inclusive() {
    let tree = sized_tree();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_minimum_size(200)
        .unwrap()
        .with_maximum_size(1000)
        .unwrap()
        .find()
        .unwrap();

    assert_eq!(sorted_names(&files), vec!["large.dat", "medium.dat"]);
}

#[test]
fn test_maximum_results_caps_output() {
    let tree = sized_tree();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_maximum_results(1)
        .unwrap()
        .find()
        .unwrap();

    assert_eq!(files.len(), 1);
}

#[test]
fn test_sorted_ascending_returns_smallest_first() {
    let tree = sized_tree();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_maximum_results(1)
        .unwrap()
        .find_sorted_by(|f| f.size_bytes, SortOrder::Ascending)
        .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "small.dat");
    assert_eq!(files[0].size_bytes, 100);
}

#[test]
fn test_missing_root_fails_before_enumeration() {
    let tree = sized_tree();
    let missing = tree.join("does-not-exist");

    let err = FileFinder::new().with_root_path(&missing).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn test_file_as_root_is_not_found() {
    let tree = sized_tree();

    let err = FileFinder::new()
        .with_root_path(tree.join("small.dat"))
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_empty_extension_list_is_invalid() {
    let err = FileFinder::new()
        .with_extensions(Vec::<String>::new())
        .unwrap_err();

    assert!(err.is_invalid_argument());
}

#[test]
fn test_recursive_search_reaches_nested_files() {
    let tree = mixed_tree();

    let top = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_extension(".rs")
        .unwrap()
        .find()
        .unwrap();
    assert!(top.is_empty());

    let all = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_extension(".rs")
        .unwrap()
        .with_recursion(true)
        .find()
        .unwrap();
    assert_eq!(sorted_names(&all), vec!["lib.rs", "main.rs", "mod.rs"]);
}

#[test]
fn test_default_extension_includes_names_without_dot() {
    let tree = mixed_tree();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .find()
        .unwrap();

    assert_eq!(
        sorted_names(&files),
        vec!["Makefile", "TODO.TXT", "notes.txt", "readme.md"]
    );
}

#[test]
fn test_whole_name_pattern() {
    let tree = mixed_tree();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_extension("Make*")
        .unwrap()
        .find()
        .unwrap();

    assert_eq!(sorted_names(&files), vec!["Makefile"]);
}

#[test]
fn test_overlapping_patterns_keep_duplicates_unless_distinct() {
    let tree = mixed_tree();
    let finder = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_extensions([".txt", "notes.*"])
        .unwrap();

    let duplicated = finder.clone().find().unwrap();
    assert_eq!(duplicated.len(), 3);

    let distinct = finder.with_distinct(true).find().unwrap();
    assert_eq!(sorted_names(&distinct), vec!["TODO.TXT", "notes.txt"]);
}

#[test]
fn test_sorted_by_path_descending() {
    let tree = mixed_tree();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_extension(".rs")
        .unwrap()
        .with_recursion(true)
        .find_sorted(SortKey::Path, SortOrder::Descending)
        .unwrap();

    let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
    let mut expected = paths.clone();
    expected.sort();
    expected.reverse();
    assert_eq!(paths, expected);
    assert_eq!(files.len(), 3);
}

#[test]
fn test_sorted_by_modified_time() {
    let tree = TestTreeBuilder::new()
        .with_aged_file("oldest.log", 1, Duration::from_secs(3 * 3600))
        .with_aged_file("middle.log", 1, Duration::from_secs(2 * 3600))
        .with_file("newest.log", 1)
        .build()
        .unwrap();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .find_sorted(SortKey::Modified, SortOrder::Ascending)
        .unwrap();

    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["oldest.log", "middle.log", "newest.log"]);
}

#[test]
fn test_entries_carry_metadata() {
    let tree = sized_tree();

    let files = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_extension("large.dat")
        .unwrap()
        .find()
        .unwrap();

    assert_eq!(files.len(), 1);
    let entry = &files[0];
    assert_eq!(entry.path, tree.join("large.dat"));
    assert_eq!(entry.extension(), Some("dat"));
    assert_eq!(entry.human_readable_size(), "1000 bytes");
    assert!(entry.last_modified.is_some());
}

#[test]
fn test_empty_directory_yields_nothing() {
    let tree = TestTreeBuilder::new().with_dir("only").build().unwrap();

    let files = FileFinder::new()
        .with_root_path(tree.join("only"))
        .unwrap()
        .with_recursion(true)
        .find()
        .unwrap();

    assert!(files.is_empty());
}

#[test]
fn test_root_removed_after_configuration_is_not_found() {
    let tree = TestTreeBuilder::new().with_dir("root").build().unwrap();
    let root = tree.join("root");

    let finder = FileFinder::new().with_root_path(&root).unwrap();
    std::fs::remove_dir(&root).unwrap();

    let err = finder.find().unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("root"));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_walked_only_when_following_links() {
    let tree = TestTreeBuilder::new()
        .with_file("real/inner.txt", 10)
        .with_file("top.txt", 20)
        .build()
        .unwrap();
    std::os::unix::fs::symlink(tree.join("real"), tree.join("linked")).unwrap();

    let find = |follow_links: bool| {
        FileFinder::new()
            .with_root_path(tree.path())
            .unwrap()
            .with_extension(".txt")
            .unwrap()
            .with_recursion(true)
            .with_follow_links(follow_links)
            .find()
            .unwrap()
    };

    let plain = find(false);
    assert_eq!(sorted_names(&plain), vec!["inner.txt", "top.txt"]);
    assert!(plain.iter().all(|f| !f.path.starts_with(tree.join("linked"))));

    let followed = find(true);
    assert_eq!(sorted_names(&followed), vec!["inner.txt", "inner.txt", "top.txt"]);
    assert!(
        followed
            .iter()
            .any(|f| f.path == tree.join("linked").join("inner.txt"))
    );
}

#[cfg(unix)]
#[test]
fn test_walk_error_reaches_caller_with_path() {
    let tree = TestTreeBuilder::new()
        .with_file("a/file.txt", 10)
        .build()
        .unwrap();
    let link = tree.join("a").join("loop");
    std::os::unix::fs::symlink(tree.join("a"), &link).unwrap();

    let err = FileFinder::new()
        .with_root_path(tree.path())
        .unwrap()
        .with_recursion(true)
        .with_follow_links(true)
        .find()
        .unwrap_err();

    assert!(!err.is_not_found());
    assert!(err.to_string().contains(&link.display().to_string()));
}
