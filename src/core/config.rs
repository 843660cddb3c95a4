//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::pricing::currency::Currency;

/// FabQuote configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default author recorded on produced quotes
    pub author: Option<String>,

    /// Default display currency (MXN, USD, or EUR)
    pub currency: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. User config (~/.config/fabquote/config.yaml)
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&path) {
                    if let Ok(user) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(user);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(author) = std::env::var("FABQUOTE_AUTHOR") {
            config.author = Some(author);
        }
        if let Ok(currency) = std::env::var("FABQUOTE_CURRENCY") {
            config.currency = Some(currency);
        }

        config
    }

    /// Get the path to the user config file
    ///
    /// `FABQUOTE_CONFIG_DIR` relocates the whole config directory (used by the
    /// test suite to isolate runs).
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("FABQUOTE_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.yaml"));
        }
        directories::ProjectDirs::from("", "", "fabquote")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the directory where session state lives
    ///
    /// `FABQUOTE_STATE_DIR` overrides the platform data directory.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("FABQUOTE_STATE_DIR") {
            return Some(PathBuf::from(dir));
        }
        directories::ProjectDirs::from("", "", "fabquote")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.currency.is_some() {
            self.currency = other.currency;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Get the author name, falling back to git config or username
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }

        // Try git config
        if let Ok(output) = std::process::Command::new("git")
            .args(["config", "user.name"])
            .output()
        {
            if output.status.success() {
                let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !name.is_empty() {
                    return name;
                }
            }
        }

        // Fall back to username
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Get the display currency, defaulting to MXN
    ///
    /// A malformed value in the config file is ignored rather than fatal;
    /// the pricing output must stay reachable with a broken config.
    pub fn currency(&self) -> Currency {
        self.currency
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Currency::Mxn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_default_is_mxn() {
        let config = Config::default();
        assert_eq!(config.currency(), Currency::Mxn);
    }

    #[test]
    fn test_currency_parses_configured_value() {
        let config = Config {
            currency: Some("usd".to_string()),
            ..Config::default()
        };
        assert_eq!(config.currency(), Currency::Usd);
    }

    #[test]
    fn test_currency_ignores_malformed_value() {
        let config = Config {
            currency: Some("doubloons".to_string()),
            ..Config::default()
        };
        assert_eq!(config.currency(), Currency::Mxn);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            author: Some("base".to_string()),
            ..Config::default()
        };
        base.merge(Config {
            author: Some("other".to_string()),
            currency: Some("EUR".to_string()),
            default_format: None,
        });
        assert_eq!(base.author.as_deref(), Some("other"));
        assert_eq!(base.currency.as_deref(), Some("EUR"));
    }
}
