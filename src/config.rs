//! Runtime configuration, read from the environment (and `.env`).

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::generators::common::get_static_dir;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ARCHIVE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Storage webhook; archiving is disabled when unset.
    pub archive_endpoint: Option<String>,
    pub archive_timeout: Duration,
    pub logo_path: PathBuf,
    pub template_dir: PathBuf,
    pub typst_binary: PathBuf,
    /// Empty means any origin may post the form.
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match get("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let archive_timeout_secs = match get("ARCHIVE_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "ARCHIVE_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => DEFAULT_ARCHIVE_TIMEOUT_SECS,
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            archive_endpoint: get("ARCHIVE_ENDPOINT_URL"),
            archive_timeout: Duration::from_secs(archive_timeout_secs),
            logo_path: get("LOGO_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| get_static_dir().join("logo.jpg")),
            template_dir: get("TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| get_static_dir().to_path_buf()),
            typst_binary: get("TYPST_BIN")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("typst")),
            allowed_origins,
        })
    }
}
