//! `FinanceAssistant.toml` settings. Every key has a default, so sections or
//! keys left out of the file fall back to it. The file itself must exist.

use std::path::{Path, PathBuf};
use std::time::Duration;

use finance_core::UserType;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub chat: ChatSettings,
    pub analytics: AnalyticsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatSettings {
    pub reply_delay_ms: u64,
    pub default_user_type: UserType,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            default_user_type: UserType::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsSettings {
    pub chart_init_delay_ms: u64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            chart_init_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Any `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Echo log records on stderr. Off by default so they do not interleave
    /// with the conversation.
    pub console: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: false,
            file: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat.reply_delay_ms)
    }

    pub fn chart_init_delay(&self) -> Duration {
        Duration::from_millis(self.analytics.chart_init_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.reply_delay(), Duration::from_secs(1));
        assert_eq!(settings.chart_init_delay(), Duration::from_millis(100));
        assert_eq!(settings.chat.default_user_type, UserType::Student);
    }

    #[test]
    fn sections_override_defaults() {
        let settings = Settings::parse(
            r#"
            [chat]
            reply_delay_ms = 250
            default_user_type = "professional"

            [logging]
            level = "debug"
            file = "finance.log"
            "#,
        )
        .unwrap();

        assert_eq!(settings.reply_delay(), Duration::from_millis(250));
        assert_eq!(settings.chat.default_user_type, UserType::Professional);
        assert_eq!(settings.logging.level, "debug");
        assert!(!settings.logging.console);
        assert_eq!(settings.logging.file, Some(PathBuf::from("finance.log")));
        assert_eq!(settings.analytics, AnalyticsSettings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("[chat]\nreply_delay = 5\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = Settings::load(Path::new("/nonexistent/finance.toml")).unwrap_err();

        assert!(error.to_string().contains("/nonexistent/finance.toml"));
    }
}
