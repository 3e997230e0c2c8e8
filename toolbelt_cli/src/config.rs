use crate::output::OutputFormat;
use crate::paths;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use toolbelt_core::FinderConfig;
use toolbelt_core::dates::DEFAULT_WEEKEND_LENGTH_DAYS;
use toolbelt_core::url::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};

/// Prefix for environment overrides, e.g. `TOOLBELT_NETWORK__MAX_REDIRECTS=3`
const ENV_PREFIX: &str = "TOOLBELT_";

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub finder: FinderConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NetworkConfig {
    pub max_redirects: usize,
    pub timeout_seconds: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: OutputFormat,
    pub color_enabled: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CalendarConfig {
    pub weekend_length_days: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            color_enabled: true,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            weekend_length_days: DEFAULT_WEEKEND_LENGTH_DAYS,
        }
    }
}

/// Every key accepted by `config get` and `config set`
pub const KNOWN_KEYS: &[&str] = &[
    "finder.recursive",
    "finder.case_insensitive",
    "finder.follow_links",
    "finder.distinct",
    "finder.maximum_results",
    "network.max_redirects",
    "network.timeout_seconds",
    "output.default_format",
    "output.color_enabled",
    "calendar.weekend_length_days",
];

/// Configuration manager that handles platform paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager using the platform configuration path
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["config_path"])
                .split("__"),
        );

        figment.extract().with_context(|| {
            format!(
                "Failed to load configuration from {}",
                self.config_path.display()
            )
        })
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' is not set", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Float(f) => Ok(f.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation)
    ///
    /// Only the touched key is written; other values already in the file are kept.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed_value = parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content).with_context(|| {
                format!("Failed to parse {}", self.config_path.display())
            })?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let Some((section, field)) = key.split_once('.') else {
            anyhow::bail!("Invalid key path: {}", key);
        };

        let toml::Value::Table(root) = &mut config else {
            anyhow::bail!("Configuration file is not a table");
        };
        if !root.contains_key(section) {
            root.insert(section.to_string(), toml::Value::Table(toml::map::Map::new()));
        }
        let Some(toml::Value::Table(table)) = root.get_mut(section) else {
            anyhow::bail!("Invalid key path: expected table at '{}'", section);
        };
        table.insert(field.to_string(), parsed_value);

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;
        log::debug!("Wrote {} to {}", key, self.config_path.display());

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Float(f) => items.push((prefix, f.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }
}

/// Check whether `key` names a configuration value
pub fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

/// Validate a value and convert it to the TOML type stored for its key
fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
    match key {
        "finder.recursive"
        | "finder.case_insensitive"
        | "finder.follow_links"
        | "finder.distinct"
        | "output.color_enabled" => {
            let flag: bool = value.parse().context("Value must be 'true' or 'false'")?;
            Ok(toml::Value::Boolean(flag))
        }
        "finder.maximum_results" | "network.timeout_seconds" => {
            let number: u32 = value
                .parse()
                .with_context(|| format!("{key} must be a positive integer"))?;
            if number == 0 {
                anyhow::bail!("{} must be greater than 0", key);
            }
            Ok(toml::Value::Integer(i64::from(number)))
        }
        "network.max_redirects" => {
            let number: u32 = value
                .parse()
                .context("max_redirects must be a non-negative integer")?;
            Ok(toml::Value::Integer(i64::from(number)))
        }
        "calendar.weekend_length_days" => {
            let days: u32 = value
                .parse()
                .context("weekend_length_days must be an integer")?;
            if days > 6 {
                anyhow::bail!("weekend_length_days must be between 0 and 6");
            }
            Ok(toml::Value::Integer(i64::from(days)))
        }
        "output.default_format" => {
            let format = OutputFormat::from_string(value)?;
            Ok(toml::Value::String(format.to_string()))
        }
        _ => anyhow::bail!("Unknown configuration key: {}", key),
    }
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}
