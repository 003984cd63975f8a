//! Server Configuration
//!
//! Read once from the environment at startup (after `.env` is loaded).

use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:44044";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_HASH_COST: u32 = 2;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Deployment environment; selects the log format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Local,
    Dev,
    Prod,
}

impl FromStr for AppEnv {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(AppEnv::Local),
            "dev" => Ok(AppEnv::Dev),
            "prod" => Ok(AppEnv::Prod),
            other => bail!("APP_ENV must be one of local, dev, prod (got {other:?})"),
        }
    }
}

/// Never `Debug`: carries the database URL and key material
pub struct ApiConfig {
    pub env: AppEnv,
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub token_ttl: Duration,
    pub hash_cost: u32,
    pub password_pepper: Option<Vec<u8>>,
    /// Signing key for apps stored without a secret
    pub token_fallback_secret: Option<Vec<u8>>,
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let env = lookup("APP_ENV")
            .map(|v| v.parse::<AppEnv>())
            .transpose()?
            .unwrap_or(AppEnv::Local);

        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        Ok(Self {
            env,
            database_url,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            bind_addr: match lookup("BIND_ADDR") {
                Some(addr) => addr.parse().context("BIND_ADDR must be host:port")?,
                None => SocketAddr::from_str(DEFAULT_BIND_ADDR)?,
            },
            token_ttl: Duration::from_secs(parse_or(
                &lookup,
                "TOKEN_TTL_SECS",
                DEFAULT_TOKEN_TTL_SECS,
            )?),
            hash_cost: parse_or(&lookup, "HASH_COST", DEFAULT_HASH_COST)?,
            password_pepper: decode_b64(&lookup, "PASSWORD_PEPPER")?,
            token_fallback_secret: decode_b64(&lookup, "TOKEN_FALLBACK_SECRET")?,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            token_ttl: self.token_ttl,
            hash_cost: self.hash_cost,
            password_pepper: self.password_pepper.clone(),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        None => Ok(default),
    }
}

fn decode_b64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> anyhow::Result<Option<Vec<u8>>> {
    lookup(key)
        .filter(|v| !v.is_empty())
        .map(|v| general_purpose::STANDARD.decode(v.trim()))
        .transpose()
        .with_context(|| format!("{key} must be base64"))
}
