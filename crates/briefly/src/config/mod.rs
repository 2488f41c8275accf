use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{BrieflyError, Result};

/// Environment variable holding the provider endpoint URL
pub const ENV_API_URL: &str = "GEMINI_API_URL";
/// Environment variable holding the provider API key
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable holding the listen port
pub const ENV_PORT: &str = "BACKEND_PORT";

/// Main configuration structure for Briefly
///
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative-language provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `SocketAddr` parsing
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Provider endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Full generate endpoint, e.g. `https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent`
    #[serde(default)]
    pub api_url: String,
    /// API key appended as the `key` query parameter
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// The provider is only called when both URL and key are present.
    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from an explicit path, or from the first default
    /// location that exists, then apply environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_paths = [
                    dirs::home_dir().map(|h| h.join(".briefly").join("config.toml")),
                    dirs::config_dir().map(|c| c.join("briefly").join("config.toml")),
                    Some(PathBuf::from("config.toml")),
                ];

                match default_paths.iter().flatten().find(|p| p.exists()) {
                    Some(path) => Self::from_file(path)?,
                    None => {
                        tracing::info!("No config file found, using defaults");
                        Config::default()
                    }
                }
            }
        };

        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            BrieflyError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| BrieflyError::Config(format!("Failed to parse config: {e}")))
    }

    /// Overlay environment variables on top of file/default values.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.provider.api_url = url.trim().to_string();
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.provider.api_key = key.trim().to_string();
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|e| {
                BrieflyError::Config(format!("Invalid {ENV_PORT} value '{port}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Reject a provider URL that cannot be parsed.
    pub fn validate(&self) -> Result<()> {
        let api_url = self.provider.api_url.trim();
        if !api_url.is_empty() {
            Url::parse(api_url).map_err(|e| {
                BrieflyError::Config(format!("Invalid provider api_url '{api_url}': {e}"))
            })?;
        }
        Ok(())
    }
}
