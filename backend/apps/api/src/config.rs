//! Server Configuration
//!
//! Read once at startup from the environment (and `.env`, loaded by `main`).

use std::str::FromStr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::token::SigningSecret;
use sqlx::postgres::PgConnectOptions;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default `RUST_LOG` filter
pub const DEFAULT_LOG_FILTER: &str = "alumni_api=info,auth=info,tower_http=info";

/// Process-wide configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// From `DATABASE_URL`, or the separate `DB_*` variables
    pub database: PgConnectOptions,
    pub max_connections: u32,
    pub port: u16,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let dialect = var("DB_DIALECT").unwrap_or_else(|| "postgres".to_string());
        if !matches!(dialect.as_str(), "postgres" | "postgresql") {
            bail!("Unsupported DB_DIALECT `{dialect}`: only postgres is supported");
        }

        let database = match var("DATABASE_URL") {
            Some(url) => {
                PgConnectOptions::from_str(&url).context("DATABASE_URL is not a valid URL")?
            }
            None => {
                let host = var("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
                let port = match var("DB_PORT") {
                    Some(p) => p.parse::<u16>().context("DB_PORT must be a port number")?,
                    None => DEFAULT_DB_PORT,
                };
                let name = var("DB_NAME").context("DB_NAME or DATABASE_URL must be set")?;
                let user = var("DB_USER").context("DB_USER or DATABASE_URL must be set")?;

                // Set field by field so credentials need no URL escaping
                let options = PgConnectOptions::new()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .database(&name);
                match var("DB_PASSWORD") {
                    Some(password) => options.password(&password),
                    None => options,
                }
            }
        };

        let max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(n) => n
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let port = match var("PORT") {
            Some(p) => p.parse::<u16>().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let mut auth = match var("JWT_SECRET") {
            Some(secret) => AuthConfig::new(SigningSecret::new(secret.into_bytes())),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this process");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };
        if let Some(pepper) = var("PASSWORD_PEPPER") {
            auth = auth.with_pepper(pepper.into_bytes());
        }

        Ok(Self {
            database,
            max_connections,
            port,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_database_from_parts() {
        let cfg = config(&[
            ("DB_HOST", "db"),
            ("DB_NAME", "alumni"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "pw"),
            ("JWT_SECRET", "s"),
        ])
        .unwrap();

        assert_eq!(cfg.database.get_host(), "db");
        assert_eq!(cfg.database.get_port(), 5432);
        assert_eq!(cfg.database.get_username(), "app");
        assert_eq!(cfg.database.get_database(), Some("alumni"));
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.auth.token_secret.as_bytes(), b"s");
        assert!(cfg.auth.pepper().is_none());
    }

    #[test]
    fn test_password_with_reserved_characters() {
        let cfg = config(&[
            ("DB_NAME", "alumni"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "p@ss/w#rd:x?"),
            ("JWT_SECRET", "s"),
        ])
        .unwrap();

        assert_eq!(cfg.database.get_host(), "localhost");
        assert_eq!(cfg.database.get_port(), 5432);
        assert_eq!(cfg.database.get_username(), "app");
        assert_eq!(cfg.database.get_database(), Some("alumni"));
    }

    #[test]
    fn test_database_url_overrides_parts() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://u@h/d"),
            ("DB_NAME", "ignored"),
            ("PORT", "8080"),
            ("JWT_SECRET", "s"),
            ("PASSWORD_PEPPER", "pep"),
        ])
        .unwrap();

        assert_eq!(cfg.database.get_host(), "h");
        assert_eq!(cfg.database.get_username(), "u");
        assert_eq!(cfg.database.get_database(), Some("d"));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.auth.pepper(), Some(&b"pep"[..]));
    }

    #[test]
    fn test_rejects_other_dialects() {
        let err = config(&[("DATABASE_URL", "postgres://u@h/d"), ("DB_DIALECT", "mysql")])
            .unwrap_err();
        assert!(err.to_string().contains("mysql"));
    }

    #[test]
    fn test_requires_database_name() {
        assert!(config(&[("DB_USER", "app"), ("JWT_SECRET", "s")]).is_err());
    }

    #[test]
    fn test_bad_port() {
        assert!(
            config(&[
                ("DATABASE_URL", "postgres://u@h/d"),
                ("PORT", "http"),
                ("JWT_SECRET", "s"),
            ])
            .is_err()
        );
    }
}
