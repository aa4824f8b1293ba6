//! Environment-driven configuration.
//!
//! Everything the process needs is read once at startup with
//! [`AppConfig::from_env`]. Missing signing secrets are a hard error so a
//! misconfigured deployment fails before it serves a single request.

use anyhow::{Context, bail};
use std::env;

/// Deployment environment. Controls the `Secure` attribute on session
/// cookies: development runs over plain HTTP, everything else does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Process-wide configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address, e.g. "0.0.0.0:5001".
    pub bind: String,
    /// Postgres connection string for the record store.
    pub database_url: String,
    /// Redis connection string for the credential store and caches.
    pub redis_url: String,
    /// Secret for signing short-lived access tokens.
    pub access_token_secret: String,
    /// Secret for signing long-lived refresh tokens. Must differ from the
    /// access secret so a leak of one signing domain cannot forge the other.
    pub refresh_token_secret: String,
    /// Browser origin allowed to send credentialed requests.
    pub frontend_origin: Option<String>,
    pub environment: Environment,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `ACCESS_TOKEN_SECRET`, `REFRESH_TOKEN_SECRET`, `DATABASE_URL` and
    /// `REDIS_URL` are required; `BIND`, `FRONTEND_URL` and `APP_ENV`
    /// have defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let access_token_secret =
            env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET is not set")?;
        let refresh_token_secret =
            env::var("REFRESH_TOKEN_SECRET").context("REFRESH_TOKEN_SECRET is not set")?;
        if access_token_secret.is_empty() || refresh_token_secret.is_empty() {
            bail!("token signing secrets must not be empty");
        }

        Ok(Self {
            bind: env::var("BIND").unwrap_or_else(|_| "0.0.0.0:5001".to_string()),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL is not set")?,
            redis_url: env::var("REDIS_URL").context("REDIS_URL is not set")?,
            access_token_secret,
            refresh_token_secret,
            frontend_origin: env::var("FRONTEND_URL").ok(),
            environment: parse_environment(env::var("APP_ENV").ok().as_deref()),
        })
    }
}

fn parse_environment(raw: Option<&str>) -> Environment {
    match raw {
        Some("production") | Some("prod") => Environment::Production,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_defaults_to_development() {
        assert_eq!(parse_environment(None), Environment::Development);
        assert_eq!(parse_environment(Some("staging")), Environment::Development);
        assert_eq!(parse_environment(Some("production")), Environment::Production);
        assert!(parse_environment(Some("prod")).is_production());
    }
}
