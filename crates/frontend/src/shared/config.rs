use serde::Deserialize;
use thiserror::Error;

/// Ключ localStorage с переопределением конфигурации (TOML)
pub const CONFIG_STORAGE_KEY: &str = "app_config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub remote: RemoteConfig,
    #[serde(default)]
    pub drilldown: DrilldownConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RemoteConfig {
    /// Пусто -> берётся из `window.location`
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_rpc_prefix")]
    pub rpc_prefix: String,
    /// Публичный ключ BaaS (заголовки `apikey` и `Authorization`)
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DrilldownConfig {
    pub endpoint: String,
    pub page_size: usize,
    pub chart_limit: usize,
}

impl Default for DrilldownConfig {
    fn default() -> Self {
        Self {
            endpoint: "get_drilldown_data".to_string(),
            page_size: 50,
            chart_limit: 20,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            drilldown: DrilldownConfig::default(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            rpc_prefix: default_rpc_prefix(),
            api_key: String::new(),
        }
    }
}

fn default_rpc_prefix() -> String {
    "/rest/v1/rpc".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[remote]
base_url = ""
rpc_prefix = "/rest/v1/rpc"
api_key = ""

[drilldown]
endpoint = "get_drilldown_data"
page_size = 50
chart_limit = 20
"#;

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG)
    }
}

/// Load configuration
///
/// Search order:
/// 1. TOML document in localStorage under [`CONFIG_STORAGE_KEY`]
/// 2. Falls back to embedded default config
pub fn load_config() -> Result<Config, ConfigError> {
    if let Some(contents) = read_override() {
        match Config::from_toml(&contents) {
            Ok(config) => {
                log::info!("Loaded config override from localStorage");
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring config override: {}", e),
        }
    }

    log::debug!("Using default embedded configuration");
    Config::embedded()
}

fn read_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok().flatten()?;
    storage
        .get_item(CONFIG_STORAGE_KEY)
        .ok()
        .flatten()
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = Config::embedded().unwrap();
        assert_eq!(config.remote.rpc_prefix, "/rest/v1/rpc");
        assert_eq!(config.drilldown.endpoint, "get_drilldown_data");
        assert_eq!(config.drilldown.page_size, 50);
        assert_eq!(config.drilldown.chart_limit, 20);
    }

    #[test]
    fn test_partial_override_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [remote]
            base_url = "https://xyz.supabase.co"
            "#,
        )
        .unwrap();
        assert_eq!(config.remote.base_url, "https://xyz.supabase.co");
        assert_eq!(config.remote.rpc_prefix, "/rest/v1/rpc");
        assert_eq!(config.drilldown, DrilldownConfig::default());
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(Config::from_toml("[remote\nbase_url = 1").is_err());
    }

    #[test]
    fn test_default_matches_embedded() {
        assert_eq!(Config::default(), Config::embedded().unwrap());
    }
}
