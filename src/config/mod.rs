//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU64, path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::notice::{DEFAULT_CLEAR_AFTER, DEFAULT_FADE_AFTER, NoticeTiming};

mod cli;

pub use cli::{
    CliArgs, Command, DeleteArgs, EditArgs, GlobalOverrides, PublishArgs, TokenAction, TokenArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "penpost";
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8787";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOKEN_STORE: &str = ".penpost/storage.json";
const DEFAULT_TOKEN_KEY: &str = "token";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub auth: AuthSettings,
    pub notice: NoticeTiming,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token_store: PathBuf,
    pub token_key: String,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("PENPOST").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    backend: RawBackendSettings,
    auth: RawAuthSettings,
    notice: RawNoticeSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.backend_url.as_ref() {
            self.backend.base_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.backend_timeout_seconds {
            self.backend.timeout_seconds = Some(seconds);
        }
        if let Some(path) = overrides.token_store.as_ref() {
            self.auth.token_store = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            backend,
            auth,
            notice,
            logging,
        } = raw;

        Ok(Self {
            backend: build_backend_settings(backend)?,
            auth: build_auth_settings(auth)?,
            notice: build_notice_timing(notice)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_backend_settings(backend: RawBackendSettings) -> Result<BackendSettings, LoadError> {
    let raw_url = backend
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("backend.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "backend.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }

    let timeout_secs = non_zero_u64(
        backend
            .timeout_seconds
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
        "backend.timeout_seconds",
    )?;

    Ok(BackendSettings {
        base_url,
        timeout: Duration::from_secs(timeout_secs.get()),
    })
}

fn build_auth_settings(auth: RawAuthSettings) -> Result<AuthSettings, LoadError> {
    let token_store = auth
        .token_store
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_STORE));

    let token_key = auth
        .token_key
        .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string());
    if token_key.trim().is_empty() {
        return Err(LoadError::invalid("auth.token_key", "must not be empty"));
    }

    Ok(AuthSettings {
        token_store,
        token_key,
    })
}

fn build_notice_timing(notice: RawNoticeSettings) -> Result<NoticeTiming, LoadError> {
    let fade_after = match notice.fade_after_ms {
        Some(ms) => Duration::from_millis(non_zero_u64(ms, "notice.fade_after_ms")?.get()),
        None => DEFAULT_FADE_AFTER,
    };
    let clear_after = match notice.clear_after_ms {
        Some(ms) => Duration::from_millis(non_zero_u64(ms, "notice.clear_after_ms")?.get()),
        None => DEFAULT_CLEAR_AFTER,
    };
    if fade_after >= clear_after {
        return Err(LoadError::invalid(
            "notice.fade_after_ms",
            "must be shorter than notice.clear_after_ms",
        ));
    }

    Ok(NoticeTiming {
        fade_after,
        clear_after,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBackendSettings {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAuthSettings {
    token_store: Option<PathBuf>,
    token_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawNoticeSettings {
    fade_after_ms: Option<u64>,
    clear_after_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

fn non_zero_u64(value: u64, key: &'static str) -> Result<NonZeroU64, LoadError> {
    NonZeroU64::new(value).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}
