//! # configs
//!
//! Application settings. Layering, lowest priority first: built-in defaults,
//! an optional `tomzora.toml`, then `TOMZORA__*` environment variables
//! (a `.env` file is loaded into the environment first).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_STORE_PATH: &str = "tomzora-store.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("unsplash.access_key is required (set TOMZORA__UNSPLASH__ACCESS_KEY)")]
    MissingAccessKey,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub unsplash: UnsplashConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashConfig {
    /// Sent as `client_id` on every request
    pub access_key: SecretString,
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info,services=debug`
    pub filter: String,
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        let builder = defaults()?
            .add_source(File::with_name("tomzora").required(false))
            .add_source(
                Environment::with_prefix("TOMZORA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        finish(builder)
    }

    /// Defaults overlaid with a TOML document. No file or environment lookup.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        finish(defaults()?.add_source(File::from_str(document, FileFormat::Toml)))
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("unsplash.base_url", DEFAULT_BASE_URL)?
        .set_default("store.backend", "file")?
        .set_default("store.path", DEFAULT_STORE_PATH)?
        .set_default("log.filter", "info")?
        .set_default("log.json", false)?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let raw = builder.build()?;
    let has_key = raw
        .get_string("unsplash.access_key")
        .map(|key| !key.trim().is_empty())
        .unwrap_or(false);
    if !has_key {
        return Err(ConfigError::MissingAccessKey);
    }
    Ok(raw.try_deserialize()?)
}
