use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "element-registry.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "element-registry",
    version,
    about = "Build and check the UI element identifier registry used by Maestro flows"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: element-registry.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Contribution source: file, directory or http(s) URL. Repeatable; order matters.
    #[arg(long = "source", global = true)]
    pub sources: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, merge and validate every contribution
    Check {
        /// Output format: console, junit, json (default: from config, else console)
        #[arg(long)]
        format: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Fail when contributions disagree about a symbol
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Print the identifier for a namespace.symbol reference
    Lookup {
        /// Reference such as login.loginContinueButton
        reference: String,
    },

    /// List namespaces, or the symbols of one namespace
    List {
        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Write the merged registry out
    Export {
        /// Output format: json, yaml, maestro
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `element-registry.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Contribution locators in discovery order
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    #[serde(default)]
    pub deny_warnings: bool,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            deny_warnings: false,
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "console".to_string(),
            output: None,
        }
    }
}

// Serde default helpers
fn default_sources() -> Vec<String> { vec![".maestro/elements".to_string()] }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = config_path, error = %e, "ignoring malformed config file");
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings resolution (CLI > config > defaults)
// ============================================================================

/// Sources to load: CLI `--source` flags replace the config list entirely.
pub fn resolve_sources(cli_sources: &[String], config: &AppConfig) -> Vec<String> {
    if cli_sources.is_empty() {
        config.sources.clone()
    } else {
        cli_sources.to_vec()
    }
}

/// Report format and destination for `check`: CLI flags win over the config file.
pub fn resolve_report(
    format: Option<&str>,
    output: Option<&str>,
    config: &AppConfig,
) -> (String, Option<String>) {
    let format = format.unwrap_or(&config.report.format).to_string();
    let output = output
        .map(str::to_string)
        .or_else(|| config.report.output.clone());
    (format, output)
}
