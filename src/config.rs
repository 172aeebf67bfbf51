//! Runtime configuration
//!
//! Built once in `main` from the process environment (after `.env` is
//! loaded) and handed to the components that need it.

use chrono::Duration;
use thiserror::Error;

use crate::auth::jwt::JwtConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWT_EXPIRATION: &str = "24h";
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Credentials for the first owner account, created when no employee exists
#[derive(Debug, Clone)]
pub struct BootstrapOwner {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub bootstrap_owner: Option<BootstrapOwner>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!("must be at least {MIN_JWT_SECRET_LEN} characters long"),
            });
        }

        let raw_expiration =
            lookup("JWT_EXPIRATION").unwrap_or_else(|| DEFAULT_JWT_EXPIRATION.to_string());
        let expiration = parse_duration(&raw_expiration).map_err(|reason| ConfigError::Invalid {
            name: "JWT_EXPIRATION",
            reason,
        })?;

        let bootstrap_owner = match (
            lookup("BOOTSTRAP_OWNER_USERNAME"),
            lookup("BOOTSTRAP_OWNER_PASSWORD"),
        ) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(BootstrapOwner { username, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            port,
            jwt: JwtConfig { secret, expiration },
            bootstrap_owner,
        })
    }
}

/// Parse durations written as `24h`, `90m`, `1h30m`, `3600s`
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("duration is empty".to_string());
    }

    let mut total = Duration::zero();
    let mut digits = String::new();

    for c in raw.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let value: i64 = digits
            .parse()
            .map_err(|_| format!("expected a number before '{c}' in '{raw}'"))?;
        digits.clear();

        total += match c {
            'h' => Duration::hours(value),
            'm' => Duration::minutes(value),
            's' => Duration::seconds(value),
            other => return Err(format!("unknown unit '{other}' in '{raw}'")),
        };
    }

    if !digits.is_empty() {
        return Err(format!("missing unit in '{raw}'"));
    }
    if total <= Duration::zero() {
        return Err("duration must be positive".to_string());
    }

    Ok(total)
}
