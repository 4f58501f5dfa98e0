/*
 * Responsibility
 * - Read settings from the environment (.env is loaded when present)
 * - Validate them (startup fails on bad values)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Limits enforced by the HTTP-level layers (`middleware::http`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl HttpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let body_limit_bytes = match std::env::var("HTTP_BODY_LIMIT_BYTES") {
            Ok(raw) => parse_positive("HTTP_BODY_LIMIT_BYTES", &raw)?,
            Err(_) => defaults.body_limit_bytes,
        };

        let request_timeout = match std::env::var("HTTP_REQUEST_TIMEOUT_SECONDS") {
            Ok(raw) => Duration::from_secs(parse_positive("HTTP_REQUEST_TIMEOUT_SECONDS", &raw)?),
            Err(_) => defaults.request_timeout,
        };

        Ok(Self {
            body_limit_bytes,
            request_timeout,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub http: HttpConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(std::env::VarError::NotPresent) => 3000,
            Err(std::env::VarError::NotUnicode(_)) => return Err(ConfigError::Invalid("PORT")),
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        Ok(Self {
            addr,
            app_env: AppEnv::from_env(),
            http: HttpConfig::from_env()?,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::Missing("PORT"));
    }
    raw.parse().map_err(|_| ConfigError::Invalid("PORT"))
}

// Zero would reject every request, so it is treated as invalid.
fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(ConfigError::Invalid(key)),
    }
}
