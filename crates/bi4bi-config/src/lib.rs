//! Configuration for the bi4bi wizard.
//!
//! Two concerns live here:
//!
//! - **Application settings** ([`Settings`]) — backend URL, credential
//!   file location, request timeout, and the back-navigation policy.
//!   Loaded figment-style: defaults, then a TOML file at the platform
//!   config path, then `BI4BI_`-prefixed environment variables.
//! - **Credential store** ([`store::CredentialStore`]) — the single-row
//!   CSV record holding the saved connection profile.

pub mod store;

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::{CredentialRecord, CredentialStore, StoreError};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Application settings. Everything has a default so a fresh install
/// runs without any config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Base URL of the backend rationalization service.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Location of the single-row credential record.
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Timeout for the connection test, in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Whether leaving the Configure screen via Back drops the selected
    /// tool. The reference behavior keeps it, hence the default.
    #[serde(default)]
    pub clear_selection_on_back: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            credentials_path: default_credentials_path(),
            request_timeout_secs: default_timeout(),
            clear_selection_on_back: false,
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8000".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_credentials_path() -> PathBuf {
    ProjectDirs::from("com", "bi4bi", "bi4bi").map_or_else(
        || dirs_fallback().join("credentials.csv"),
        |dirs| dirs.data_dir().join("credentials.csv"),
    )
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "bi4bi", "bi4bi").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("bi4bi");
    p
}

// ── Settings loading ────────────────────────────────────────────────

/// Load [`Settings`] from file + environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("BI4BI_"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

/// Load settings, falling back to defaults if loading fails.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::Settings;

    #[test]
    fn defaults_are_usable_without_a_config_file() {
        let settings = Settings::default();
        assert_eq!(settings.backend_url, "http://localhost:8000");
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(!settings.clear_selection_on_back);
        assert!(settings.credentials_path.ends_with("credentials.csv"));
    }
}
