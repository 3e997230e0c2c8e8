//! Toolbelt command line support
//!
//! Configuration, error reporting and output formatting shared by the
//! `toolbelt` binary.

pub mod config;
pub mod error;
pub mod output;
pub mod paths;
pub mod terminal;
