//! Unified logging and observability system.
//!
//! Logging uses the tracing ecosystem, with structured events, optional file
//! output and privacy controls for message bodies.
//!
//! # Environment Variables
//!
//! - `BANTER_LOG`: Filter directive (like `RUST_LOG`), e.g., `banter_chat=debug`
//! - `BANTER_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `BANTER_LOG_DIR`: Directory for file logs (default `~/.banter/logs/`)
//!
//! # Configuration
//!
//! Logging is configured via the `[logging]` section in `banter.toml`:
//!
//! ```toml
//! [logging]
//! level = "warn"
//! format = "pretty"
//!
//! [logging.file]
//! enabled = false
//! level = "debug"
//!
//! [logging.privacy]
//! log_message_bodies = "truncate"
//! truncate_length = 200
//! ```
//!
//! # Example
//!
//! ```no_run
//! use banter_core::logging::{self, LoggingConfig};
//!
//! let _guard = logging::init_logging(Some(LoggingConfig::default()))?;
//! # Ok::<(), banter_core::Error>(())
//! ```

use crate::Error;
use crate::config::LoggingConfig as ConfigLoggingConfig;
use std::env;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    /// Parse a log format from a string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// How message bodies show up in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyLogging {
    /// Replace long bodies with a placeholder.
    None,
    /// Log the first `truncate_length` chars.
    #[default]
    Truncate,
    /// Log full bodies (may include personal data).
    Full,
}

impl BodyLogging {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(BodyLogging::None),
            "truncate" => Some(BodyLogging::Truncate),
            "full" => Some(BodyLogging::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLogging::None => "none",
            BodyLogging::Truncate => "truncate",
            BodyLogging::Full => "full",
        }
    }
}

impl FromStr for BodyLogging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyLogging::parse_str(s).ok_or_else(|| format!("invalid message body logging: {}", s))
    }
}

/// Privacy configuration for message bodies in logs.
#[derive(Debug, Clone)]
pub struct PrivacyConfig {
    pub log_message_bodies: BodyLogging,
    pub truncate_length: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self { log_message_bodies: BodyLogging::default(), truncate_length: 200 }
    }
}

/// Logging configuration wrapper that bridges config and logging modules.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level for stderr output.
    pub level: String,
    /// Output format for stderr.
    pub format: LogFormat,
    /// Write to stderr at all (the TUI owns the terminal and turns this off).
    pub stderr: bool,
    /// Level for the rolling log file, `None` disables file logging.
    pub file_level: Option<String>,
    /// Privacy controls for message bodies.
    pub privacy: PrivacyConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            stderr: true,
            file_level: None,
            privacy: PrivacyConfig::default(),
        }
    }
}

impl From<ConfigLoggingConfig> for LoggingConfig {
    fn from(config: ConfigLoggingConfig) -> Self {
        let format = LogFormat::parse_str(&config.format).unwrap_or_default();
        let log_message_bodies = BodyLogging::parse_str(&config.privacy.log_message_bodies).unwrap_or_default();

        Self {
            level: config.level,
            format,
            stderr: true,
            file_level: if config.file.enabled { Some(config.file.level) } else { None },
            privacy: PrivacyConfig { log_message_bodies, truncate_length: config.privacy.truncate_length },
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable file logging at the given level.
    pub fn with_file_logging(mut self, level: impl Into<String>) -> Self {
        self.file_level = Some(level.into());
        self
    }

    /// Route everything to the log file only.
    pub fn without_stderr(mut self) -> Self {
        self.stderr = false;
        self
    }

    pub fn with_privacy(mut self, config: PrivacyConfig) -> Self {
        self.privacy = config;
        self
    }

    /// Build an EnvFilter from this config and environment variables.
    fn build_env_filter(&self) -> EnvFilter {
        let fallback = if self.stderr { &self.level } else { self.file_level.as_ref().unwrap_or(&self.level) };
        let filter = env::var("BANTER_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| fallback.clone());

        EnvFilter::new(filter)
    }

    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Determine the appropriate format for stderr output.
    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("BANTER_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        match self.format {
            LogFormat::Pretty if !Self::is_tty() => LogFormat::Compact,
            format => format,
        }
    }

    /// Get the log directory path.
    fn get_log_dir() -> Result<PathBuf, Error> {
        if let Ok(custom_dir) = env::var("BANTER_LOG_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;

        Ok(PathBuf::from(home).join(".banter").join("logs"))
    }
}

/// Initialize the global tracing subscriber.
///
/// Sets up an environment-based filter (`BANTER_LOG` or `RUST_LOG`), a
/// formatted stderr layer and, when `file_level` is set, a JSON layer
/// writing to a daily rolling file. The returned guard must be kept alive
/// for the file writer to flush.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<Option<WorkerGuard>, Error> {
    let config = config.unwrap_or_default();
    let env_filter = config.build_env_filter();
    let format = config.detect_format();

    let (file_layer, guard) = match &config.file_level {
        Some(_) => {
            let log_dir = LoggingConfig::get_log_dir()?;
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| Error::Config(format!("Failed to create log directory: {}", e)))?;

            let file_appender = tracing_appender::rolling::daily(log_dir, "banter.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().json().with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    let registry = Registry::default().with(env_filter).with(file_layer);

    let result = if !config.stderr {
        registry.try_init()
    } else {
        match format {
            LogFormat::Pretty => registry
                .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
                .try_init(),
            LogFormat::Json => registry.with(fmt::layer().json().with_writer(io::stderr)).try_init(),
            LogFormat::Compact => registry.with(fmt::layer().compact().with_writer(io::stderr)).try_init(),
        }
    };

    result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;
    Ok(guard)
}

/// Redact a message body according to privacy settings.
pub fn redact_sensitive(content: &str, privacy: &PrivacyConfig) -> String {
    match privacy.log_message_bodies {
        BodyLogging::None => "[REDACTED]".to_string(),
        BodyLogging::Full => content.to_string(),
        BodyLogging::Truncate => {
            let char_count = content.chars().count();
            if char_count <= privacy.truncate_length {
                return content.to_string();
            }
            let mut truncated = content.chars().take(privacy.truncate_length).collect::<String>();
            truncated.push_str("...");
            truncated.push_str(&format!(" ({} total chars)", char_count));
            truncated
        }
    }
}
