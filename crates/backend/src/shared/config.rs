use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Analytics knobs that used to be scattered magic numbers. Passed down
/// explicitly instead of living in a mutable settings singleton.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Assumed margin applied to revenue to estimate profit
    #[serde(default = "default_profit_margin")]
    pub profit_margin: f64,
    /// Dashboard low-stock list includes products below this quantity
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
    /// Size of the lowest-stock list in the analytics view
    #[serde(default = "default_low_stock_limit")]
    pub low_stock_limit: usize,
    /// Top-N cap for products and customers
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
    /// Top-N cap for the province distribution
    #[serde(default = "default_geography_limit")]
    pub geography_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            profit_margin: default_profit_margin(),
            low_stock_threshold: default_low_stock_threshold(),
            low_stock_limit: default_low_stock_limit(),
            top_limit: default_top_limit(),
            geography_limit: default_geography_limit(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_profit_margin() -> f64 {
    0.22
}

fn default_low_stock_threshold() -> i64 {
    20
}

fn default_low_stock_limit() -> usize {
    5
}

fn default_top_limit() -> usize {
    5
}

fn default_geography_limit() -> usize {
    5
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000

[analytics]
profit_margin = 0.22
low_stock_threshold = 20
low_stock_limit = 5
top_limit = 5
geography_limit = 5
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Load the config once and cache it for the process lifetime
pub fn init() -> anyhow::Result<()> {
    let config = load_config()?;
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))?;
    Ok(())
}

pub fn get() -> &'static Config {
    CONFIG.get().expect("Config has not been initialized")
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.analytics.profit_margin, 0.22);
        assert_eq!(config.analytics.low_stock_threshold, 20);
    }

    #[test]
    fn analytics_section_is_optional() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.analytics.top_limit, 5);
        assert_eq!(config.analytics.geography_limit, 5);
        assert_eq!(config.server.port, 3000);
    }
}
