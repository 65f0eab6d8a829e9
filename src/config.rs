use std::env;
use thiserror::Error;

/// 使用するストレージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// 環境変数から読み込むアプリケーション設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    pub storage: StorageBackend,
}

impl AppConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "postgres://localhost/library";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// 環境変数（と存在すれば .env）から設定を読み込む
    ///
    /// - DATABASE_URL
    /// - DATABASE_MAX_CONNECTIONS
    /// - PORT
    /// - STORAGE (postgres | memory)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.to_string());

        let max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            Self::DEFAULT_MAX_CONNECTIONS,
        )?;
        let port = parse_or(&lookup, "PORT", Self::DEFAULT_PORT)?;
        let storage = parse_or(&lookup, "STORAGE", StorageBackend::Postgres)?;

        Ok(Self {
            database_url,
            max_connections,
            port,
            storage,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.database_url, AppConfig::DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_values_from_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/lib"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("STORAGE", "memory"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://db/lib");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_invalid_storage_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("STORAGE", "redis")])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key: "STORAGE", .. }));
    }
}
