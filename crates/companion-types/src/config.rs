//! Client configuration types.
//!
//! `ClientConfig` represents the `config.toml` that tells the companion
//! client where the remote store lives, where to send the user after a
//! successful save, and which language to speak.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language of user-facing copy (validation messages, notifications, labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Ru => write!(f, "ru"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(format!("unsupported locale: '{other}'")),
        }
    }
}

/// Top-level client configuration. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the companion store (e.g. "https://companions.example.com").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Route the user lands on after a successful save.
    #[serde(default = "default_landing_route")]
    pub landing_route: String,

    /// Connection-level timeout applied by the HTTP transport.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub locale: Locale,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_landing_route() -> String {
    "/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            landing_route: default_landing_route(),
            request_timeout_secs: default_request_timeout_secs(),
            locale: Locale::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.landing_route, "/");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_client_config_deserialize_empty_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
api_url = "https://companions.example.com"
landing_route = "/companions"
request_timeout_secs = 5
locale = "ru"
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "https://companions.example.com");
        assert_eq!(config.landing_route, "/companions");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.locale, Locale::Ru);
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("RU".parse::<Locale>(), Ok(Locale::Ru));
        assert!("de".parse::<Locale>().is_err());
    }
}
