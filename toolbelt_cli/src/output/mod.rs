mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, JsonLinesFormatter, TextFormatter};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use toolbelt_core::FileEntry;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonLines,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-lines" | "jsonl" => Ok(Self::JsonLines),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::JsonLines => "json-lines",
            Self::Csv => "csv",
        })
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a single entry
    fn format_single(&self, entry: &FileEntry) -> Result<String>;

    /// Format a batch of entries
    fn format_batch(&self, entries: &[FileEntry]) -> Result<String> {
        let formatted: Result<Vec<String>> =
            entries.iter().map(|e| self.format_single(e)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::JsonLines => Box::new(JsonLinesFormatter::new()),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
