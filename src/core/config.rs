//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE: &str = "fmea.db";

/// Default listen address
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Development origins allowed to call the API by default
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] =
    &["http://localhost:5173", "https://*.app.github.dev"];

/// Server configuration with layered hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database: PathBuf,

    /// Socket address the API listens on
    pub bind: String,

    /// CORS allow-list; an entry may contain one `*` wildcard
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            bind: DEFAULT_BIND.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// A partially specified config file; absent keys leave lower layers alone
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    database: Option<PathBuf>,
    bind: Option<String>,
    allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// `explicit` is a config file named on the command line; unlike the
    /// global file it must exist and parse.
    pub fn load(explicit: Option<&Path>) -> miette::Result<Self> {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/fmea-store/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match read_layer(&global_path) {
                    Ok(layer) => config.merge(layer),
                    Err(e) => log::warn!("Ignoring {}: {}", global_path.display(), e),
                }
            }
        }

        // 3. Config file given on the command line
        if let Some(path) = explicit {
            let layer = read_layer(path)
                .map_err(|e| miette::miette!("Failed to load config {}: {}", path.display(), e))?;
            config.merge(layer);
        }

        // 4. Environment variables
        config.merge(Self::env_layer(|key| std::env::var(key).ok()));

        Ok(config)
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fmea-store")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn env_layer(var: impl Fn(&str) -> Option<String>) -> ConfigLayer {
        ConfigLayer {
            database: var("FMEA_DATABASE").map(PathBuf::from),
            bind: var("FMEA_BIND"),
            allowed_origins: var("FMEA_ALLOWED_ORIGINS").map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            }),
        }
    }

    /// Merge another layer into this one (other takes precedence)
    fn merge(&mut self, other: ConfigLayer) {
        if let Some(database) = other.database {
            self.database = database;
        }
        if let Some(bind) = other.bind {
            self.bind = bind;
        }
        if let Some(origins) = other.allowed_origins {
            self.allowed_origins = origins;
        }
    }

    /// Apply command-line overrides (highest priority)
    pub fn with_overrides(mut self, database: Option<PathBuf>, bind: Option<String>) -> Self {
        self.merge(ConfigLayer {
            database,
            bind,
            allowed_origins: None,
        });
        self
    }
}

fn read_layer(path: &Path) -> Result<ConfigLayer, String> {
    let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_yml::from_str::<ConfigLayer>(&contents).map_err(|e| e.to_string())
}
