// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Every variable has a default so a bare `cargo run` against a local MySQL
//! works. A `.env` file is honoured for local development.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Connection settings for the relational store.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Full connection URL; wins over the individual fields when set.
    pub url_override: Option<String>,
    /// Upper bound on concurrent database work.
    pub max_connections: u32,
    /// How long a caller waits for a pooled connection before giving up.
    pub acquire_timeout: Duration,
}

impl DatabaseSettings {
    /// Connection URL for the pool.
    pub fn url(&self) -> String {
        if let Some(url) = &self.url_override {
            return url.clone();
        }

        let user = urlencoding::encode(&self.user);
        let credentials = if self.password.is_empty() {
            user.into_owned()
        } else {
            format!("{}:{}", user, urlencoding::encode(&self.password))
        };

        format!("mysql://{}@{}/{}", credentials, self.host, self.name)
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashing {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    pub database: DatabaseSettings,
    /// Idle lifetime of a session; every authenticated request renews it.
    pub session_ttl: Duration,
    /// Period of the expired-session sweeper.
    pub session_sweep_interval: Duration,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub cookie_secure: bool,
    /// Directory served under `/static`.
    pub static_dir: String,
    pub password_hashing: PasswordHashing,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 3000,
            database: DatabaseSettings {
                host: "localhost".to_string(),
                user: "root".to_string(),
                password: String::new(),
                name: "albergue".to_string(),
                url_override: Some("sqlite::memory:".to_string()),
                max_connections: 1,
                acquire_timeout: Duration::from_secs(2),
            },
            session_ttl: Duration::from_secs(30 * 60),
            session_sweep_interval: Duration::from_secs(60),
            cookie_secure: false,
            static_dir: "public".to_string(),
            // Cheap parameters so the test suite does not spend its time hashing.
            password_hashing: PasswordHashing {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = PasswordHashing::default();

        Ok(Self {
            port: parse_var("PORT", 3000)?,
            database: DatabaseSettings {
                host: var_or("DB_HOST", "localhost"),
                user: var_or("DB_USER", "root"),
                password: var_or("DB_PASSWORD", ""),
                name: var_or("DB_NAME", "albergue"),
                url_override: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
                max_connections: parse_var("DB_POOL_SIZE", 10)?,
                acquire_timeout: Duration::from_secs(parse_var("DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            },
            session_ttl: minutes_var("SESSION_TTL_MINUTES", 120)?,
            session_sweep_interval: Duration::from_secs(parse_var("SESSION_SWEEP_SECS", 60)?),
            cookie_secure: parse_var("COOKIE_SECURE", false)?,
            static_dir: var_or("STATIC_DIR", "public"),
            password_hashing: PasswordHashing {
                memory_kib: parse_var("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
                iterations: parse_var("ARGON2_ITERATIONS", defaults.iterations)?,
                parallelism: defaults.parallelism,
            },
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        _ => Ok(default),
    }
}

/// A duration given in whole minutes.
fn minutes_var(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    let minutes: u64 = parse_var(name, default)?;
    minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::Invalid {
            name,
            value: minutes.to_string(),
        })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
