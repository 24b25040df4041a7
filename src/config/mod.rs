//! Configuration for the feed reader
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/booktok/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod feed;
mod logging;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use feed::{DemoConfig, FileDemo, FileObserver, ObserverConfig};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend origin used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Default color theme
pub const DEFAULT_THEME: &str = "Midnight";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend origin serving /api/excerpts
    pub api_url: String,

    /// Excerpts requested per page (constant for a session)
    pub page_size: u32,

    /// Directory receiving favorites exports
    pub export_dir: PathBuf,

    /// Theme name: "Midnight", "Paper", "Terminal"
    pub theme: String,

    /// Program (plus arguments) that receives shared excerpts on stdin.
    /// Unset means share copies to the clipboard.
    pub share_command: Option<Vec<String>>,

    /// In-memory demo catalog
    pub demo: DemoConfig,

    /// Sentinel observer tuning
    pub observer: ObserverConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: crate::feed::pager::DEFAULT_PAGE_SIZE,
            export_dir: PathBuf::from("."),
            theme: DEFAULT_THEME.to_string(),
            share_command: None,
            demo: DemoConfig::default(),
            observer: ObserverConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub export_dir: Option<String>,
    pub theme: Option<String>,
    pub share_command: Option<Vec<String>>,

    /// Optional [demo] section
    pub demo: Option<FileDemo>,

    /// Optional [observer] section
    pub observer: Option<FileObserver>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that stop configuration from loading
#[derive(Debug)]
pub enum ConfigError {
    /// Config file exists but cannot be read
    Read { path: PathBuf, message: String },
    /// Config file is not valid TOML for this schema
    Parse { path: PathBuf, message: String },
    /// A value (usually from the environment) is out of range
    Invalid { key: &'static str, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "Cannot read {}: {}", path.display(), message)
            }
            Self::Parse { path, message } => {
                write!(f, "Failed to parse {}: {}", path.display(), message)
            }
            Self::Invalid { key, message } => write!(f, "Invalid value for {}: {}", key, message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    /// Print a boxed, actionable report to stderr
    pub fn report(&self) {
        eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
        eprintln!("║  CONFIG ERROR - Failed to load configuration                 ║");
        eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
        eprintln!("  {}\n", self);
        if matches!(self, Self::Parse { .. }) {
            eprintln!("  Tip: Check for:\n");
            eprintln!("    - Missing quotes around string values");
            eprintln!("    - Invalid boolean values (use true/false)");
            eprintln!("    - share_command must be an array, e.g. [\"wl-copy\"]");
            eprintln!("    - Typos in section names\n");
            eprintln!("  To reset, run `booktok config --reset`.\n");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/booktok/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("booktok").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    fn load_file_config() -> Result<FileConfig, ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_file_config(&contents).map_err(|message| {
                ConfigError::Parse {
                    path: path.clone(),
                    message,
                }
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(ConfigError::Read {
                path,
                message: e.to_string(),
            }),
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = Self::load_file_config()?;
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        // Backend origin: env > file > default
        let api_url = env("BOOKTOK_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Page size: env > file > default
        let page_size = match env("BOOKTOK_PAGE_SIZE") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "BOOKTOK_PAGE_SIZE",
                message: format!("expected a positive integer, got {:?}", raw),
            })?,
            None => file.page_size.unwrap_or(defaults.page_size),
        };
        if page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "page_size",
                message: "must be at least 1".to_string(),
            });
        }

        let export_dir = env("BOOKTOK_EXPORT_DIR")
            .or(file.export_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        let theme = env("BOOKTOK_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Share command: file only
        let share_command = file.share_command.filter(|c| !c.is_empty());

        // Demo mode: env only (runtime flag)
        let demo_enabled = env("BOOKTOK_DEMO")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let demo = DemoConfig::from_file(file.demo, demo_enabled, env("BOOKTOK_DEMO_DATA"));

        let observer = ObserverConfig::from_file(file.observer);
        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            api_url,
            page_size,
            export_dir,
            theme,
            share_command,
            demo,
            observer,
            logging,
        })
    }
}
