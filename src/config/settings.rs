use crate::core::GENESIS_DATA;
use crate::error::{LedgerError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

const GENESIS_DATA_KEY: &str = "LEDGER_GENESIS_DATA";
const LOG_LEVEL_KEY: &str = "LEDGER_LOG_LEVEL";
const SEPARATOR_WIDTH_KEY: &str = "LEDGER_SEPARATOR_WIDTH";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SEPARATOR_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Payload of the genesis block
    pub genesis_data: String,
    /// One of off, error, warn, info, debug, trace
    pub log_level: String,
    /// Number of `-` characters between blocks in the text report
    pub separator_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            genesis_data: String::from(GENESIS_DATA),
            log_level: String::from(DEFAULT_LOG_LEVEL),
            separator_width: DEFAULT_SEPARATOR_WIDTH,
        }
    }
}

impl Config {
    /// Defaults, then the optional TOML file, then environment variables
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| {
            LedgerError::Io(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        Ok(config)
    }

    /// Apply overrides looked up by variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data) = lookup(GENESIS_DATA_KEY) {
            self.genesis_data = data;
        }
        if let Some(level) = lookup(LOG_LEVEL_KEY) {
            self.log_level = level;
        }
        if let Some(width) = lookup(SEPARATOR_WIDTH_KEY) {
            self.separator_width = width.trim().parse().map_err(|e| {
                LedgerError::Config(format!("Invalid {SEPARATOR_WIDTH_KEY} '{width}': {e}"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.log_level_filter().map(|_| ())
    }

    pub fn log_level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| LedgerError::Config(format!("Unknown log level: {}", self.log_level)))
    }

    pub fn separator(&self) -> String {
        "-".repeat(self.separator_width)
    }
}
