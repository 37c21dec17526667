use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub session: SessionSettings,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

/// Limits and behaviour applied to every live session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Maximum chat message length in characters
    pub max_chat_length: usize,
    /// Maximum Q&A question length in characters
    pub max_question_length: usize,
    /// Maximum announcement length in characters
    pub max_notice_length: usize,
    /// Words seeded into the moderation list of every new session
    pub default_banned_words: Vec<String>,
    /// Buffer size of the outward event channel
    pub event_channel_capacity: usize,
    /// Bounded queue in front of each session actor
    pub command_queue_capacity: usize,
    /// Reject commands aimed at panels hidden for the broadcast type
    pub enforce_panel_capabilities: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_chat_length: 500,
            max_question_length: 500,
            max_notice_length: 280,
            default_banned_words: Vec::new(),
            event_channel_capacity: 256,
            command_queue_capacity: 64,
            enforce_panel_capabilities: false,
        }
    }
}

/// Operator console output options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Pretty-print command results instead of one JSON object per line
    pub pretty_output: bool,
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // CASTDECK_SESSION__MAX_CHAT_LENGTH, CASTDECK_LOGGING__LEVEL, ...
        builder = builder.add_source(
            Environment::with_prefix("CASTDECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Check for settings that would make every session unusable
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let session = &self.session;

        if session.max_chat_length == 0 {
            errors.push("session.max_chat_length must be greater than zero".to_string());
        }
        if session.max_question_length == 0 {
            errors.push("session.max_question_length must be greater than zero".to_string());
        }
        if session.max_notice_length == 0 {
            errors.push("session.max_notice_length must be greater than zero".to_string());
        }
        if session.event_channel_capacity == 0 {
            errors.push("session.event_channel_capacity must be greater than zero".to_string());
        }
        if session.command_queue_capacity == 0 {
            errors.push("session.command_queue_capacity must be greater than zero".to_string());
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be \"json\" or \"pretty\", got \"{}\"",
                self.logging.format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
