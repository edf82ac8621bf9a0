use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Where the chat service lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the chat service (scheme + host, no trailing path)
    pub base_url: String,
    /// Path of the single send endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl ServiceConfig {
    /// Full URL the delivery pipeline posts to
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), endpoint: default_endpoint() }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_endpoint() -> String {
    "/api/sendMessage".to_string()
}

/// Presentation settings for the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Display name of the bot, used in badges and welcome messages
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { bot_name: default_bot_name() }
    }
}

fn default_bot_name() -> String {
    "Ada but better".to_string()
}

/// Statically configured identity (stands in for a sign-in flow)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: FileLoggingConfig,
    #[serde(default)]
    pub privacy: PrivacySettings,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: FileLoggingConfig::default(),
            privacy: PrivacySettings::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// `[logging.file]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_file_level")]
    pub level: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: default_file_level() }
    }
}

fn default_file_level() -> String {
    "debug".to_string()
}

/// `[logging.privacy]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacySettings {
    /// `none`, `truncate` or `full`
    #[serde(default = "default_log_message_bodies")]
    pub log_message_bodies: String,
    #[serde(default = "default_truncate_length")]
    pub truncate_length: usize,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self { log_message_bodies: default_log_message_bodies(), truncate_length: default_truncate_length() }
    }
}

fn default_log_message_bodies() -> String {
    "truncate".to_string()
}

fn default_truncate_length() -> usize {
    200
}

/// Root configuration structure for banter.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    /// Signed-in identity, absent when browsing anonymously
    #[serde(default)]
    pub identity: Option<IdentityConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).map_err(|e| Error::Config(ConfigError::from(e).to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let base_url = &self.service.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(ConfigError::InvalidBaseUrl(base_url.clone()).to_string()));
        }

        if !self.service.endpoint.starts_with('/') {
            return Err(Error::Config(
                ConfigError::InvalidEndpoint(self.service.endpoint.clone()).to_string(),
            ));
        }

        if self.chat.bot_name.trim().is_empty() {
            return Err(Error::Config(ConfigError::EmptyBotName.to_string()));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# Banter Configuration Example
# Copy this file to banter.toml and customize as needed

[service]
# Base URL of the chat service
base_url = "http://localhost:3000"
# Endpoint that accepts the conversation and returns one reply
endpoint = "/api/sendMessage"

[chat]
# Name shown on bot messages and in the welcome text
bot_name = "Ada but better"

# Signed-in identity (optional). The name is sent with every message.
# [identity]
# name = "octocat"
# email = "octocat@example.com"

[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
level = "debug"

[logging.privacy]
# How message bodies appear in logs: "none", "truncate" or "full"
log_message_bodies = "truncate"
truncate_length = 200
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("base_url must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),

    #[error("endpoint must start with '/': {0}")]
    InvalidEndpoint(String),

    #[error("bot_name cannot be empty")]
    EmptyBotName,

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}
