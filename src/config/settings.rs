//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Prefix of namespaced environment variables (`AGRISCAN__SERVER__PORT`)
const ENV_PREFIX: &str = "AGRISCAN";

/// Plain environment variables understood for compatibility with existing
/// deployments, mapped to their configuration keys.
const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("IPFS_API_KEY", "storage.api_key"),
    ("PINATA_SECRET_KEY", "storage.secret_key"),
];

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

/// Gemini model configuration. Without an API key the gateways run in
/// mock mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub vision_model: String,
    #[serde(default = "default_gemini_model")]
    pub text_model: String,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    60000
}

impl GeminiConfig {
    /// The configured API key, if it is not blank
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }
}

/// IPFS pinning provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageProvider {
    NftStorage,
    Pinata,
}

impl StorageProvider {
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            StorageProvider::NftStorage => "https://api.nft.storage",
            StorageProvider::Pinata => "https://api.pinata.cloud",
        }
    }
}

/// Image pinning configuration. Without an API key uploads are disabled.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_provider")]
    pub provider: StorageProvider,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Only used by Pinata
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Overrides the provider's public API endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_provider() -> StorageProvider {
    StorageProvider::NftStorage
}

impl StorageConfig {
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn secret_key(&self) -> Option<&str> {
        non_blank(self.secret_key.as_deref())
    }

    pub fn endpoint(&self) -> String {
        non_blank(self.endpoint.as_deref())
            .unwrap_or_else(|| self.provider.default_endpoint())
            .trim_end_matches('/')
            .to_string()
    }
}

/// Analysis behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Answer with the fixed fallback diagnosis when the model call fails,
    /// instead of returning an error
    #[serde(default = "default_true")]
    pub fallback_on_error: bool,
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Settings {
    /// Load settings from configuration files and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load settings from a specific configuration file path and the process environment
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load settings from a configuration file path and an explicit set of
    /// environment variables
    pub fn load_with_env<P: AsRef<Path>>(path: P, env: HashMap<String, String>) -> Result<Self> {
        let path = path.as_ref().to_str().ok_or_else(|| {
            AppError::Config(config::ConfigError::Message(
                "Configuration path is not valid UTF-8".to_string(),
            ))
        })?;

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.body_limit_bytes", default_body_limit() as i64)?
            .set_default("gemini.base_url", default_gemini_base_url())?
            .set_default("gemini.vision_model", default_gemini_model())?
            .set_default("gemini.text_model", default_gemini_model())?
            .set_default("gemini.timeout_ms", default_timeout() as i64)?
            .set_default("storage.provider", "nft_storage")?
            .set_default("storage.timeout_ms", default_timeout() as i64)?
            .set_default("analysis.fallback_on_error", true)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (AGRISCAN__SECTION__KEY)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            );

        for (var, key) in LEGACY_ENV_VARS {
            let namespaced = format!("{}__{}", ENV_PREFIX, key.replace('.', "__").to_uppercase());
            if env.contains_key(&namespaced) {
                continue;
            }
            builder = builder.set_override_option(*key, env.get(*var).cloned())?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(config_error("Server port cannot be 0"));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(config_error("Request body limit cannot be 0"));
        }

        if !["json", "pretty", "text"].contains(&self.logging.format.as_str()) {
            return Err(config_error(format!(
                "Invalid log format '{}'. Must be 'json', 'pretty' or 'text'",
                self.logging.format
            )));
        }

        if self.storage.provider == StorageProvider::Pinata
            && self.storage.api_key().is_some()
            && self.storage.secret_key().is_none()
        {
            return Err(config_error(
                "Pinata storage requires both an API key and a secret key",
            ));
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> AppError {
    AppError::Config(config::ConfigError::Message(message.into()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                body_limit_bytes: default_body_limit(),
            },
            gemini: GeminiConfig {
                api_key: None,
                base_url: default_gemini_base_url(),
                vision_model: default_gemini_model(),
                text_model: default_gemini_model(),
                timeout_ms: default_timeout(),
            },
            storage: StorageConfig {
                provider: default_provider(),
                api_key: None,
                secret_key: None,
                endpoint: None,
                timeout_ms: default_timeout(),
            },
            analysis: AnalysisConfig {
                fallback_on_error: true,
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
