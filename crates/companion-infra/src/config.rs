//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.companion/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use companion_types::config::ClientConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "COMPANION_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. `COMPANION_DATA_DIR` environment variable
/// 2. `~/.companion`
/// 3. `.companion` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".companion");
    }

    PathBuf::from(".companion")
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ClientConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Apply an explicit store URL (from a flag or `COMPANION_API_URL`) on top
/// of the loaded configuration. Blank overrides are ignored.
pub fn with_api_url_override(mut config: ClientConfig, api_url: Option<String>) -> ClientConfig {
    if let Some(url) = api_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        config.api_url = url;
    }
    config
}
