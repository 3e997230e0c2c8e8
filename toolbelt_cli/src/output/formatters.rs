use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use serde_json::{Value, json};
use toolbelt_core::FileEntry;
use toolbelt_core::human_readable::format_since_now;

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, entry: &FileEntry) -> Result<String> {
        let size = format!("{:>10}", entry.human_readable_size());
        let age = match entry.last_modified {
            Some(modified) => format_since_now(modified),
            None => "-".to_string(),
        };

        Ok(format!(
            "{}  {:<18}  {}",
            self.colorize(&size, |s| s.yellow()),
            age,
            self.colorize(&entry.path.display().to_string(), |s| s.cyan())
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_value(entry: &FileEntry) -> Value {
        json!({
            "path": entry.path.to_string_lossy(),
            "name": entry.name,
            "size_bytes": entry.size_bytes,
            "size": entry.human_readable_size(),
            "last_modified": entry.last_modified.map(|m| m.to_rfc3339()),
        })
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, entry: &FileEntry) -> Result<String> {
        self.render(&Self::to_value(entry))
    }

    fn format_batch(&self, entries: &[FileEntry]) -> Result<String> {
        let values: Vec<Value> = entries.iter().map(Self::to_value).collect();
        self.render(&Value::Array(values))
    }
}

/// JSON Lines formatter, one compact object per line
pub struct JsonLinesFormatter;

impl Default for JsonLinesFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonLinesFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonLinesFormatter {
    fn format_single(&self, entry: &FileEntry) -> Result<String> {
        JsonFormatter::new(false).format_single(entry)
    }
}

/// CSV formatter for tabular output
pub struct CsvFormatter;

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    const HEADERS: [&'static str; 4] = ["path", "name", "size_bytes", "last_modified"];

    fn entry_to_record(entry: &FileEntry) -> [String; 4] {
        [
            entry.path.to_string_lossy().to_string(),
            entry.name.clone(),
            entry.size_bytes.to_string(),
            entry
                .last_modified
                .map(|m| m.to_rfc3339())
                .unwrap_or_default(),
        ]
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_single(&self, entry: &FileEntry) -> Result<String> {
        self.format_batch(std::slice::from_ref(entry))
    }

    fn format_batch(&self, entries: &[FileEntry]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(Self::HEADERS)?;

        for entry in entries {
            wtr.write_record(Self::entry_to_record(entry))?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}
