use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::database::DatabaseConnection;
use crate::quiz::DEFAULT_PAGE_SIZE;

/// Application configuration module
/// This module handles loading, validating and saving the JSON
/// configuration file.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Quiz engine settings
    #[serde(default)]
    pub quiz: QuizConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Database location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DatabaseConfig {
    /// Path to the SQLite file; `:memory:` for an in-memory database.
    /// Falls back to the platform data directory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Resolve the configured path or the default location
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => DatabaseConnection::default_database_path(),
        }
    }
}

/// Pagination and selection settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizConfig {
    /// Questions per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Seed for the question draw; seeded from the operating system when unset
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            random_seed: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 100;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.quiz.page_size == 0 {
            return Err(anyhow!("quiz.page_size must be at least 1"));
        }
        if self.quiz.page_size > MAX_PAGE_SIZE {
            return Err(anyhow!(
                "quiz.page_size must be at most {}, got {}",
                MAX_PAGE_SIZE,
                self.quiz.page_size
            ));
        }
        if let Some(path) = &self.database.path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("database.path must not be empty"));
            }
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration, writing a default file when none exists yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }
}
