//! Configuration settings for Pitpool.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed API configuration.
    pub feed: FeedConfig,
    /// Pool store configuration.
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist or fails.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Feed API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed API base URL.
    pub base_url: String,
    /// API key appended to every feed request.
    pub api_key: String,
    /// Season year used in feed paths.
    pub season: u16,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum attempts for rate-limited requests.
    pub max_retries: u32,
    /// Base of the exponential backoff between retries, in seconds.
    pub backoff_factor: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sportradar.com/nascar-ot3/mc".to_string(),
            api_key: String::new(),
            season: 2025,
            timeout_secs: 10,
            max_retries: 3,
            backoff_factor: 2,
        }
    }
}

impl FeedConfig {
    /// URL of the season race schedule document.
    pub fn schedule_url(&self) -> String {
        format!(
            "{}/{}/races/schedule.json?api_key={}",
            self.base_url, self.season, self.api_key
        )
    }

    /// URL of the driver roster document.
    pub fn driver_list_url(&self) -> String {
        format!(
            "{}/{}/drivers/list.json?api_key={}",
            self.base_url, self.season, self.api_key
        )
    }

    /// URL of the results document for a single race.
    pub fn race_results_url(&self, race_id: &str) -> String {
        format!(
            "{}/{}/races/results.json?api_key={}&race_id={}",
            self.base_url, self.season, self.api_key, race_id
        )
    }
}

/// Pool store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the pool JSON document. Relative paths resolve against
    /// the platform data directory.
    pub pool_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pool_file: PathBuf::from("pool.json"),
        }
    }
}

impl StoreConfig {
    /// Absolute path of the pool document.
    pub fn resolved_pool_path(&self) -> crate::Result<PathBuf> {
        if self.pool_file.is_absolute() {
            Ok(self.pool_file.clone())
        } else {
            Ok(super::data_dir()?.join(&self.pool_file))
        }
    }
}
