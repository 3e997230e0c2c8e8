use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use toolbelt_cli::config::{self, AppConfig, ConfigManager};
use toolbelt_cli::error::{CliError, CliResult, ErrorContext, ExitCode};
use toolbelt_cli::output::{self, OutputFormat};
use toolbelt_cli::terminal;
use toolbelt_core::byte_size::{ByteUnit, parse_size};
use toolbelt_core::dates::{self, Calendar};
use toolbelt_core::human_readable::{format_bytes, format_since_now};
use toolbelt_core::url::{UrlService, filename_from_url};
use toolbelt_core::{FileFinder, SortKey, SortOrder};

#[derive(Parser)]
#[command(name = "toolbelt")]
#[command(author, version, about = "Toolbelt - wildcard matching, file finding and friendly formatting", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find files under a directory
    Find(FindArgs),

    /// Test text against a wildcard pattern (exit 0 on match, 1 otherwise)
    Match {
        /// Text to test
        text: String,

        /// Pattern where `*` matches any run and `?` one character
        pattern: String,

        /// Compare letters exactly
        #[arg(long)]
        case_sensitive: bool,
    },

    /// Format a byte count for people
    Bytes {
        /// Byte count, optionally with a unit (e.g. 1536, 1.5GB, 10 MiB)
        #[arg(value_parser = parse_size_arg)]
        size: u64,

        /// Express the size in a fixed unit
        #[arg(long, value_enum)]
        to: Option<UnitArg>,
    },

    /// Describe how long ago a moment was
    Since {
        /// RFC 3339 timestamp or YYYY-MM-DD date (midnight UTC)
        #[arg(value_parser = parse_moment)]
        moment: DateTime<FixedOffset>,
    },

    /// Check whether a day is a working day and find the next one
    Workday {
        /// Day to check (YYYY-MM-DD, defaults to today)
        #[arg(value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Days at the end of the week that are not worked (0-6)
        #[arg(long, value_name = "N")]
        weekend_days: Option<u32>,
    },

    /// Count full years since a date
    Age {
        /// Birth date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        birth: NaiveDate,

        /// Day to measure on (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        on: Option<NaiveDate>,
    },

    /// Work out the file name a download URL points at
    Filename {
        /// URL to resolve
        url: String,

        /// Only look at the URL itself, never connect
        #[arg(long)]
        offline: bool,

        /// Redirects to follow before giving up
        #[arg(long, value_name = "N")]
        max_redirects: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct FindArgs {
    /// Directory to search
    path: PathBuf,

    /// Extension (".log") or whole-name pattern ("report-*.csv"), repeatable
    #[arg(short = 'e', long = "extension", value_name = "PATTERN")]
    extensions: Vec<String>,

    /// Smallest file size to include (e.g. 10KB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size_arg)]
    min_size: Option<u64>,

    /// Largest file size to include (e.g. 2GB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size_arg)]
    max_size: Option<u64>,

    /// Stop after this many files
    #[arg(short = 'n', long, value_name = "N")]
    max_results: Option<usize>,

    /// Search subdirectories too
    #[arg(short, long, overrides_with = "no_recursive")]
    recursive: bool,

    /// Stay in the top directory even when finder.recursive is set
    #[arg(long)]
    no_recursive: bool,

    /// Sort the results before the cap is applied
    #[arg(short, long, value_enum)]
    sort: Option<SortKeyArg>,

    /// Sort largest, latest or last first
    #[arg(long, requires = "sort")]
    descending: bool,

    /// Report each file once even when several patterns match it
    #[arg(long, overrides_with = "no_distinct")]
    distinct: bool,

    /// Keep duplicates even when finder.distinct is set
    #[arg(long)]
    no_distinct: bool,

    /// Compare patterns with exact letter case
    #[arg(long, overrides_with = "ignore_case")]
    case_sensitive: bool,

    /// Compare patterns ignoring letter case
    #[arg(long)]
    ignore_case: bool,

    /// Follow symbolic links
    #[arg(long, overrides_with = "no_follow_links")]
    follow_links: bool,

    /// Leave symbolic links alone even when finder.follow_links is set
    #[arg(long)]
    no_follow_links: bool,

    /// Output format (defaults to output.default_format)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., network.max_redirects)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., finder.recursive)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SortKeyArg {
    Name,
    Path,
    Size,
    Modified,
}

impl From<SortKeyArg> for SortKey {
    fn from(arg: SortKeyArg) -> Self {
        match arg {
            SortKeyArg::Name => SortKey::Name,
            SortKeyArg::Path => SortKey::Path,
            SortKeyArg::Size => SortKey::Size,
            SortKeyArg::Modified => SortKey::Modified,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum UnitArg {
    Kb,
    Mb,
    Gb,
    Tb,
}

impl From<UnitArg> for ByteUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Kb => ByteUnit::Kilobyte,
            UnitArg::Mb => ByteUnit::Megabyte,
            UnitArg::Gb => ByteUnit::Gigabyte,
            UnitArg::Tb => ByteUnit::Terabyte,
        }
    }
}

fn parse_size_arg(value: &str) -> Result<u64, String> {
    parse_size(value).map_err(|e| e.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{e} (expected YYYY-MM-DD)"))
}

fn parse_moment(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value).or_else(|rfc_error| {
        parse_date(value)
            .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
            .map_err(|_| format!("{rfc_error} (expected an RFC 3339 timestamp or YYYY-MM-DD)"))
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Warn)
            .filter_module("toolbelt_core", log::LevelFilter::Debug)
            .filter_module("toolbelt_cli", log::LevelFilter::Debug)
            .filter_module("toolbelt", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if !terminal::should_colorize(true) {
        colored::control::set_override(false);
    }

    let code = match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            eprint!("{}", error.format_for_user(debug));
            error.exit_code()
        }
    };

    let code = exit_code_after_flush(code, std::io::stdout().flush(), debug);
    std::process::exit(code as i32);
}

/// Report a failed final flush; an earlier failure keeps its own exit code
fn exit_code_after_flush(code: ExitCode, flushed: std::io::Result<()>, debug: bool) -> ExitCode {
    let Err(e) = flushed else {
        return code;
    };

    let error = CliError::filesystem(&format!("Failed to flush output: {e}"));
    eprint!("{}", error.format_for_user(debug));
    if code == ExitCode::Success {
        error.exit_code()
    } else {
        code
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Find(args) => {
            let config = load_config()?;
            find_command(&config, args).await
        }
        Commands::Match {
            text,
            pattern,
            case_sensitive,
        } => Ok(match_command(&text, &pattern, case_sensitive)),
        Commands::Bytes { size, to } => Ok(bytes_command(size, to)),
        Commands::Since { moment } => {
            println!("{}", format_since_now(moment));
            Ok(ExitCode::Success)
        }
        Commands::Workday { date, weekend_days } => {
            let config = load_config()?;
            workday_command(&config, date, weekend_days)
        }
        Commands::Age { birth, on } => {
            let years = match on {
                Some(day) => dates::age_in_years(birth, day),
                None => dates::age_in_years_today(birth),
            };
            println!("{years}");
            Ok(ExitCode::Success)
        }
        Commands::Filename {
            url,
            offline,
            max_redirects,
        } => {
            let config = load_config()?;
            filename_command(&config, &url, offline, max_redirects).await
        }
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::Success)
        }
    }
}

fn load_config() -> CliResult<AppConfig> {
    let manager = ConfigManager::new();
    let config = manager.load().map_err(|e| {
        CliError::from(e)
            .with_context("config", &manager.get_config_path().display().to_string())
            .with_suggestion("Fix the file or inspect it with 'toolbelt config list'")
    })?;

    if !terminal::should_colorize(config.output.color_enabled) {
        colored::control::set_override(false);
    }

    Ok(config)
}

/// Resolve an on/off flag pair; `None` keeps the configured value
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

async fn find_command(config: &AppConfig, args: FindArgs) -> CliResult<ExitCode> {
    let mut finder = FileFinder::from_config(&config.finder)?.with_root_path(&args.path)?;

    if !args.extensions.is_empty() {
        finder = finder.with_extensions(args.extensions)?;
    }
    if let Some(bytes) = args.min_size {
        finder = finder.with_minimum_size(bytes)?;
    }
    if let Some(bytes) = args.max_size {
        finder = finder.with_maximum_size(bytes)?;
    }
    if let Some(count) = args.max_results {
        finder = finder.with_maximum_results(count)?;
    }
    if let Some(recursive) = flag(args.recursive, args.no_recursive) {
        finder = finder.with_recursion(recursive);
    }
    if let Some(distinct) = flag(args.distinct, args.no_distinct) {
        finder = finder.with_distinct(distinct);
    }
    if let Some(sensitive) = flag(args.case_sensitive, args.ignore_case) {
        finder = finder.with_case_insensitive(!sensitive);
    }
    if let Some(follow) = flag(args.follow_links, args.no_follow_links) {
        finder = finder.with_follow_links(follow);
    }

    let sort = args
        .sort
        .map(|key| (SortKey::from(key), SortOrder::from_ascending(!args.descending)));

    // The walk blocks on the filesystem and rayon
    let files = tokio::task::spawn_blocking(move || match sort {
        Some((key, order)) => finder.find_sorted(key, order),
        None => finder.find(),
    })
    .await
    .context("File search task failed")??;

    let format = args.format.unwrap_or(config.output.default_format);
    if files.is_empty() && format == OutputFormat::Text {
        eprintln!("{}", "No matching files found".yellow());
        return Ok(ExitCode::Success);
    }

    let formatter = output::create_formatter(format, terminal::should_colorize(config.output.color_enabled));
    let rendered = formatter.format_batch(&files)?;
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else if !rendered.is_empty() {
        println!("{rendered}");
    }

    if format == OutputFormat::Text {
        let total: u64 = files.iter().map(|f| f.size_bytes).sum();
        eprintln!(
            "{} file(s), {} total",
            files.len(),
            format_bytes(i64::try_from(total).unwrap_or(i64::MAX))
        );
    }

    Ok(ExitCode::Success)
}

fn match_command(text: &str, pattern: &str, case_sensitive: bool) -> ExitCode {
    let matched = toolbelt_core::matches(text, pattern, !case_sensitive);
    log::debug!("'{text}' against '{pattern}': {matched}");

    if matched {
        println!("{}", "match".green());
        ExitCode::Success
    } else {
        println!("{}", "no match".red());
        ExitCode::GeneralError
    }
}

fn bytes_command(size: u64, to: Option<UnitArg>) -> ExitCode {
    match to {
        Some(unit) => {
            let unit = ByteUnit::from(unit);
            let value = (unit.from_bytes(size) * 100.0).round() / 100.0;
            println!("{value} {unit}");
        }
        None => println!("{}", format_bytes(i64::try_from(size).unwrap_or(i64::MAX))),
    }
    ExitCode::Success
}

fn workday_command(
    config: &AppConfig,
    date: Option<NaiveDate>,
    weekend_days: Option<u32>,
) -> CliResult<ExitCode> {
    let calendar = Calendar::new(weekend_days.unwrap_or(config.calendar.weekend_length_days))?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let kind = if calendar.is_working_day(date) {
        "working day".green()
    } else {
        "weekend".yellow()
    };
    println!("{}: {}", date.format("%Y-%m-%d %A"), kind);

    let next = calendar
        .next_workday(date)
        .ok_or_else(|| CliError::general(&format!("No working day follows {date}")))?;
    println!("Next working day: {}", next.format("%Y-%m-%d %A"));

    Ok(ExitCode::Success)
}

async fn filename_command(
    config: &AppConfig,
    url: &str,
    offline: bool,
    max_redirects: Option<usize>,
) -> CliResult<ExitCode> {
    let name = if offline {
        filename_from_url(url)
    } else {
        let service = UrlService::new(
            max_redirects.unwrap_or(config.network.max_redirects),
            Duration::from_secs(config.network.timeout_seconds),
        )?;
        service.resolve_filename(url).await?
    };

    match name {
        Some(name) => {
            println!("{name}");
            Ok(ExitCode::Success)
        }
        None => {
            let error = CliError::general(&format!("No file name found for {url}"));
            Err(if offline {
                error.with_suggestion("Drop --offline to ask the server")
            } else {
                error
            })
        }
    }
}

fn config_command(command: ConfigCommand) -> CliResult<ExitCode> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            if !config::is_known_key(&key) {
                return Err(CliError::unknown_config_key(&key, config::KNOWN_KEYS));
            }
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            if !config::is_known_key(&key) {
                return Err(CliError::unknown_config_key(&key, config::KNOWN_KEYS));
            }
            manager
                .set(&key, &value)
                .map_err(|e| CliError::misuse(&format!("{e:#}")).with_context("key", &key))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("Config file: {}", manager.get_config_path().display());

            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, field) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((field.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
            }
        }
    }

    Ok(ExitCode::Success)
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
