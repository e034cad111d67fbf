//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{Error, Result};

/// Default input file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/scorecard_summary.csv";
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;
/// Paper cards shown before "View all"
pub const DEFAULT_PREVIEW_COUNT: usize = 5;
/// Records per page on the JSON API
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_DATA_FILE: &str = "SCORECARD_DATA_FILE";
pub const ENV_BIND: &str = "SCORECARD_BIND";
pub const ENV_PORT: &str = "SCORECARD_PORT";

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub data_file: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub preview_count: Option<usize>,
    pub page_size: Option<usize>,
    pub paper_link_base: Option<String>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Find and parse the config file
    ///
    /// An explicit path must exist. Without one, the platform config
    /// directory is tried and a missing file is `Ok(None)`.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<(PathBuf, Self)>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::NotFound(format!("Config file {}", path.display())));
            }
            return Self::load(path).map(|cfg| Some((path.to_path_buf(), cfg)));
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path).map(|cfg| Some((path, cfg))),
            _ => Ok(None),
        }
    }
}

/// Platform config file location: `<config_dir>/scorecard-portal/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scorecard-portal").join("config.toml"))
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_file: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved portal settings
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub data_file: PathBuf,
    pub bind: String,
    pub port: u16,
    pub preview_count: usize,
    pub page_size: usize,
    pub paper_link_base: Option<String>,
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            preview_count: DEFAULT_PREVIEW_COUNT,
            page_size: DEFAULT_PAGE_SIZE,
            paper_link_base: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl PortalConfig {
    /// Resolve every setting from CLI, environment, TOML and defaults
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Self {
        let defaults = PortalConfig::default();

        let data_file = cli
            .data_file
            .clone()
            .or_else(|| env_value(ENV_DATA_FILE).map(PathBuf::from))
            .or_else(|| toml.data_file.clone())
            .unwrap_or(defaults.data_file);

        let bind = cli
            .bind
            .clone()
            .or_else(|| env_value(ENV_BIND))
            .or_else(|| toml.bind.clone())
            .unwrap_or(defaults.bind);

        let port = cli
            .port
            .or_else(env_port)
            .or(toml.port)
            .unwrap_or(defaults.port);

        Self {
            data_file,
            bind,
            port,
            preview_count: toml
                .preview_count
                .filter(|n| *n > 0)
                .unwrap_or(defaults.preview_count),
            page_size: toml
                .page_size
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
            paper_link_base: toml
                .paper_link_base
                .clone()
                .filter(|base| !base.trim().is_empty()),
            log_level: toml.log_level.clone().unwrap_or(defaults.log_level),
        }
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_port() -> Option<u16> {
    let raw = env_value(ENV_PORT)?;
    match raw.trim().parse::<u16>() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!("Ignoring {}={} (not a port number)", ENV_PORT, raw);
            None
        }
    }
}
