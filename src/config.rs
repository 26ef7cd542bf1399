use base64::{engine::general_purpose, Engine as _};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::services::PrecedencePolicy;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SESSION_KEY missing")]
    MissingSessionKey,
    #[error("SESSION_KEY must be base64")]
    InvalidSessionKey,
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub session_key: Vec<u8>,
    pub session_ttl: chrono::Duration,
    pub bind_addr: String,
    pub typing_delay: Duration,
    pub precedence: PrecedencePolicy,
    pub catalog_path: Option<PathBuf>,
    pub login_rate_limit: usize,
    pub login_rate_window_secs: u64,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let session_key_b64 = var("SESSION_KEY").ok_or(ConfigError::MissingSessionKey)?;
        let session_key = general_purpose::STANDARD
            .decode(session_key_b64.trim())
            .map_err(|_| ConfigError::InvalidSessionKey)?;
        if session_key.is_empty() {
            return Err(ConfigError::InvalidSessionKey);
        }

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| {
            let port = var("PORT").unwrap_or_else(|| "3000".to_string());
            format!("0.0.0.0:{}", port)
        });

        let crisis_first: bool = parse_or(&var, "CRISIS_OVERRIDES_CIVILITY", false)?;
        let precedence = if crisis_first {
            PrecedencePolicy::CrisisFirst
        } else {
            PrecedencePolicy::CivilityFirst
        };

        // SECURITY: Secure cookies on known hosting platforms or when forced
        let secure_cookies = ["RAILWAY_ENVIRONMENT", "RENDER", "FLY_APP_NAME", "PRODUCTION"]
            .into_iter()
            .any(|name| var(name).is_some());

        Ok(Self {
            database_url: var("DATABASE_URL"),
            db_max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 10)?,
            session_key,
            session_ttl: chrono::Duration::minutes(parse_or(&var, "SESSION_TTL_MINUTES", 60)?),
            bind_addr,
            typing_delay: Duration::from_millis(parse_or(&var, "TYPING_DELAY_MS", 1500)?),
            precedence,
            catalog_path: var("CONTENT_CATALOG_PATH").map(PathBuf::from),
            login_rate_limit: parse_or(&var, "LOGIN_RATE_LIMIT", 5)?,
            login_rate_window_secs: 60,
            secure_cookies,
        })
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("SESSION_KEY", "c2VjcmV0LWtleQ==")]).unwrap();
        assert_eq!(cfg.session_key, b"secret-key");
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.typing_delay, Duration::from_millis(1500));
        assert_eq!(cfg.session_ttl, chrono::Duration::minutes(60));
        assert_eq!(cfg.precedence, PrecedencePolicy::CivilityFirst);
        assert_eq!(cfg.login_rate_limit, 5);
        assert!(!cfg.secure_cookies);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("SESSION_KEY", "c2VjcmV0LWtleQ=="),
            ("PORT", "8080"),
            ("TYPING_DELAY_MS", "0"),
            ("CRISIS_OVERRIDES_CIVILITY", "true"),
            ("CONTENT_CATALOG_PATH", "/etc/mindcare/catalog.json"),
            ("RENDER", "1"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.typing_delay, Duration::ZERO);
        assert_eq!(cfg.precedence, PrecedencePolicy::CrisisFirst);
        assert_eq!(cfg.catalog_path, Some(PathBuf::from("/etc/mindcare/catalog.json")));
        assert!(cfg.secure_cookies);
    }

    #[test]
    fn test_session_key_is_required() {
        assert!(matches!(config(&[]), Err(ConfigError::MissingSessionKey)));
        assert!(matches!(
            config(&[("SESSION_KEY", "not base64!")]),
            Err(ConfigError::InvalidSessionKey)
        ));
    }

    #[test]
    fn test_bad_number_is_reported() {
        let err = config(&[("SESSION_KEY", "c2VjcmV0LWtleQ=="), ("TYPING_DELAY_MS", "soon")])
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "invalid value for TYPING_DELAY_MS: soon");
    }
}
