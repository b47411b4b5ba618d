//! Process configuration loaded from the environment (after `.env` via dotenvy).

use crate::error::ConfigError;
use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

/// Default request body limit (3 MiB), enough for inline image payloads.
pub const DEFAULT_BODY_LIMIT: usize = 3 * 1024 * 1024;

/// Server configuration.
///
/// | Env Var                   | Default    |
/// |---------------------------|------------|
/// | `DATABASE_URL`            | required   |
/// | `ADMIN_TOKEN`             | required   |
/// | `HOST`                    | `0.0.0.0`  |
/// | `PORT`                    | `5000`     |
/// | `DB_MAX_CONNECTIONS`      | `5`        |
/// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`       |
/// | `BODY_LIMIT_BYTES`        | `3145728`  |
pub struct AppConfig {
    pub database_url: String,
    pub admin_token: SecretString,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?;
        let admin_token = get("ADMIN_TOKEN").ok_or(ConfigError::MissingVar("ADMIN_TOKEN"))?;
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", get("PORT"), 5000u16)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5u32)?;
        let acquire_secs = parse_or("DB_ACQUIRE_TIMEOUT_SECS", get("DB_ACQUIRE_TIMEOUT_SECS"), 10u64)?;
        let body_limit = parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT)?;

        Ok(AppConfig {
            database_url,
            admin_token: SecretString::from(admin_token),
            host,
            port,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            body_limit,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = load(&[("DATABASE_URL", "postgres://localhost/site"), ("ADMIN_TOKEN", "t")]).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5000");
        assert_eq!(cfg.db_max_connections, 5);
        assert_eq!(cfg.body_limit, DEFAULT_BODY_LIMIT);
        assert_eq!(cfg.admin_token.expose_secret(), "t");
    }

    #[test]
    fn admin_token_is_required() {
        let err = load(&[("DATABASE_URL", "postgres://x"), ("ADMIN_TOKEN", "  ")]).err().unwrap();
        assert!(matches!(err, ConfigError::MissingVar("ADMIN_TOKEN")));
    }

    #[test]
    fn bad_port_is_reported() {
        let err = load(&[("DATABASE_URL", "postgres://x"), ("ADMIN_TOKEN", "t"), ("PORT", "http")])
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::InvalidVar { name: "PORT", .. }));
    }
}
