//! Test utilities for toolbelt
//!
//! Builders for throwaway directory trees used by file finder and CLI tests.

mod tree;

pub use tree::{TestTree, TestTreeBuilder};
