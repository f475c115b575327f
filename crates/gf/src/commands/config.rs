//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/gf/config.toml.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use grid_filter_rs::columns::{DateColumn, MemoizedFormat, TemplateColumn, DEFAULT_DATE_FORMAT};
use grid_filter_rs::{Column, MatchStrategy};
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# gf - grid filter configuration

# Config schema version (do not modify)
version = 1

# How multi-word keywords match: "default", "fuzzy" or "tokens"
# match_strategy = "default"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)
# max_width = 40            # Truncate cells wider than this

# Per-column behavior, keyed by column name.
#
# [columns.due]
# kind = "date"             # "plain", "date" or "template"
# format = "%Y-%m-%d"
#
# [columns.name]
# kind = "template"
# template = "<b>{value}</b> ({row.city})"
# memoize = true
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Match strategy used when `--strategy` is not given.
    #[serde(default)]
    pub match_strategy: MatchStrategy,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Column behaviors by column name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub columns: BTreeMap<String, ColumnConfig>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            match_strategy: MatchStrategy::default(),
            output: OutputConfig::default(),
            columns: BTreeMap::new(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Maximum displayed cell width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<usize>,
}

/// Behavior of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnConfig {
    /// Raw text, default comparisons.
    Plain,
    /// Dates compared chronologically.
    Date {
        #[serde(default = "default_date_format")]
        format: String,
    },
    /// Text matched against a rendered template.
    Template {
        template: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        memoize: bool,
    },
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl ColumnConfig {
    /// Builds the grid column for `id`.
    pub fn to_column(&self, id: &str) -> Column {
        match self {
            Self::Plain => Column::new(id),
            Self::Date { format } => Column::with_behavior(id, DateColumn::new(format.as_str())),
            Self::Template {
                template,
                memoize: true,
            } => Column::with_behavior(
                id,
                MemoizedFormat::new(TemplateColumn::new(template.as_str())),
            ),
            Self::Template { template, .. } => {
                Column::with_behavior(id, TemplateColumn::new(template.as_str()))
            }
        }
    }

    /// Short description for `config show`.
    fn describe(&self) -> String {
        match self {
            Self::Plain => "plain".to_string(),
            Self::Date { format } => format!("date ({format})"),
            Self::Template { template, memoize } => {
                let suffix = if *memoize { ", memoized" } else { "" };
                format!("template \"{template}\"{suffix}")
            }
        }
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/gf/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("GF_CONFIG") {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("gf"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("gf"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("GF_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    parse_config(&content)
}

/// Parses config file contents.
fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }

    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            println!("  match_strategy: {}", config.match_strategy);

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
            if let Some(width) = config.output.max_width {
                println!("  max_width: {}", width);
            }

            if !config.columns.is_empty() {
                println!("\n[columns]");
                for (name, column) in &config.columns {
                    println!("  {}: {}", name, column.describe());
                }
            }
        } else {
            println!("(No config file exists. Run 'gf config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path()?;

    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created config at {}", path.display());
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.match_strategy, MatchStrategy::Default);
        assert!(config.columns.is_empty());
    }

    #[test]
    fn test_parse_columns_and_strategy() {
        let config = parse_config(
            r#"
version = 1
match_strategy = "tokens"

[columns.due]
kind = "date"

[columns.name]
kind = "template"
template = "<b>{value}</b>"
memoize = true

[columns.notes]
kind = "plain"
"#,
        )
        .unwrap();

        assert_eq!(config.match_strategy, MatchStrategy::Tokens);
        assert_eq!(
            config.columns["due"],
            ColumnConfig::Date {
                format: DEFAULT_DATE_FORMAT.to_string()
            }
        );
        assert_eq!(
            config.columns["name"],
            ColumnConfig::Template {
                template: "<b>{value}</b>".to_string(),
                memoize: true,
            }
        );
        assert_eq!(config.columns["notes"], ColumnConfig::Plain);
    }

    #[test]
    fn test_missing_version_defaults_to_current() {
        let config = parse_config("match_strategy = \"fuzzy\"").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.match_strategy, MatchStrategy::Fuzzy);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = parse_config("version = 99").unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_unknown_column_kind_rejected() {
        let err = parse_config("[columns.x]\nkind = \"sparkline\"").unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    fn test_column_config_builds_named_column() {
        let column = ColumnConfig::Date {
            format: "%d/%m/%Y".to_string(),
        }
        .to_column("due");
        assert_eq!(column.id(), "due");
    }

    #[test]
    fn test_describe() {
        assert_eq!(ColumnConfig::Plain.describe(), "plain");
        assert_eq!(
            ColumnConfig::Template {
                template: "{value}".to_string(),
                memoize: true
            }
            .describe(),
            "template \"{value}\", memoized"
        );
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        env::set_var("GF_CONFIG", &path);

        assert_eq!(get_config_path().unwrap(), path);
        assert_eq!(get_config_dir().unwrap(), dir.path());

        env::remove_var("GF_CONFIG");
    }

    #[test]
    #[serial]
    fn test_load_config_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        env::set_var("GF_CONFIG", dir.path().join("absent.toml"));

        let config = load_config().unwrap();
        assert_eq!(config.match_strategy, MatchStrategy::Default);

        env::remove_var("GF_CONFIG");
    }

    #[test]
    #[serial]
    fn test_init_writes_default_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        env::set_var("GF_CONFIG", &path);

        let ctx = CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
        };
        execute_init(&ctx, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        assert!(matches!(
            execute_init(&ctx, false),
            Err(CommandError::Config(_))
        ));
        execute_init(&ctx, true).unwrap();

        env::remove_var("GF_CONFIG");
    }
}
