use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};

/// Root application configuration, loaded from `~/.config/betterreads/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub datadump: DatadumpConfig,
    pub database: DatabaseConfig,
    pub ingest: IngestConfig,
}

/// Locations of the two dump files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatadumpConfig {
    pub author: String,
    pub works: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Memoize author id -> name lookups while loading works.
    pub cache_author_names: bool,
    /// Emit a progress line every N dump lines. 0 disables progress logging.
    pub progress_interval: u64,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for DatabaseConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("betterreads");

        Self {
            path: data_dir.join("betterreads.db").to_string_lossy().to_string(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            cache_author_names: true,
            progress_interval: 10_000,
        }
    }
}

// ─── Load ──────────────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/betterreads/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("BETTERREADS_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("betterreads")
            .join("config.toml")
    }

    /// Load config from the standard path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific path, falling back to defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply `BETTERREADS_*` overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BETTERREADS_AUTHOR_DUMP") {
            self.datadump.author = path;
        }
        if let Some(path) = lookup("BETTERREADS_WORKS_DUMP") {
            self.datadump.works = path;
        }
        if let Some(path) = lookup("BETTERREADS_DATABASE") {
            self.database.path = path;
        }
    }

    // ─── Derived paths ─────────────────────────────────────

    pub fn author_dump_path(&self) -> Result<PathBuf> {
        Self::required_path(&self.datadump.author, "datadump.author")
    }

    pub fn works_dump_path(&self) -> Result<PathBuf> {
        Self::required_path(&self.datadump.works, "datadump.works")
    }

    /// Path to the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database.path)
    }

    fn required_path(value: &str, key: &str) -> Result<PathBuf> {
        if value.trim().is_empty() {
            return Err(LoaderError::Config(format!("{key} is not set")));
        }
        Ok(PathBuf::from(value))
    }
}
