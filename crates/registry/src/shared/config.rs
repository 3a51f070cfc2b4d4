use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::shared::data::keys::DEFAULT_NAMESPACE;

pub const CONFIG_FILE_NAME: &str = "registry.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Каталог файлового хранилища (`<key>.json`)
    pub path: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// Размеры рейтингов на дашборде
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    pub top_departments: usize,
    pub top_sectors: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_departments: 8,
            top_sectors: 6,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Relative paths are resolved like `storage.path`
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            dir: "logs".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AuthConfig {
    pub require_login: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { require_login: true }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[storage]
path = "data"
namespace = "k_system"

[dashboard]
top_departments = 8
top_sectors = 6

[logging]
level = "info"
dir = "logs"

[auth]
require_login = true
"#;

/// Load configuration from registry.toml
///
/// Search order:
/// 1. Explicit path (`--config`), which must exist
/// 2. Next to the executable (for production)
/// 3. Falls back to embedded default config
///
/// Tracing is not initialized yet at this point, so nothing is logged here.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return read_config(&config_path);
        }
    }

    parse_config(DEFAULT_CONFIG)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    use anyhow::Context;

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("Invalid config {}", path.display()))
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Get the storage directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_storage_path(config: &Config) -> PathBuf {
    resolve_path(&config.storage.path)
}

/// Get the log directory from configuration
pub fn get_log_dir(config: &Config) -> PathBuf {
    resolve_path(&config.logging.dir)
}

fn resolve_path(value: &str) -> PathBuf {
    let path = Path::new(value);

    // If absolute path, use as is
    if path.is_absolute() {
        return path.to_path_buf();
    }

    match exe_dir() {
        Some(dir) => dir.join(path),
        // Fallback: use relative to current directory
        None => PathBuf::from(value),
    }
}

fn exe_dir() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    exe_path.parent().map(Path::to_path_buf)
}
