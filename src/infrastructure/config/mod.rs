use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use url::Url;

/// Service configuration: defaults, overridden by `sokoflow.toml`,
/// overridden by `SOKOFLOW_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote platform API. Defaults to the local mock
    /// server so the service runs against no backend out of the box.
    pub api_base_url: String,
    pub http_host: String,
    pub http_port: u16,
    pub request_timeout_secs: u64,
    pub mock_config_path: String,
    pub mock_autostart: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:4010".to_string(),
            http_host: "127.0.0.1".to_string(),
            http_port: 3001,
            request_timeout_secs: 30,
            mock_config_path: "mock_api.json".to_string(),
            mock_autostart: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("sokoflow.toml"))
            .merge(Env::prefixed("SOKOFLOW_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))?;

        config.api_base()?;
        Ok(config)
    }

    /// Parsed and validated remote API base URL.
    pub fn api_base(&self) -> Result<Url> {
        Url::parse(&self.api_base_url).map_err(|e| {
            AppError::ValidationError(format!(
                "Invalid api_base_url '{}': {}",
                self.api_base_url, e
            ))
        })
    }
}
