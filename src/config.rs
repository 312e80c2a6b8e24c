//! Server configuration from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Drop all tables before creating them. Destroys data; off unless `RESET_SCHEMA` is true.
    pub reset_schema: bool,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: "postgres://localhost/ecommerce".into(),
            bind_addr: "127.0.0.1:5000".into(),
            max_connections: 5,
            reset_schema: false,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            config.max_connections = parse("DB_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("RESET_SCHEMA") {
            config.reset_schema = parse_bool("RESET_SCHEMA", v)?;
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            config.body_limit_bytes = parse("BODY_LIMIT_BYTES", v)?;
        }
        Ok(config)
    }
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert!(!config.reset_schema);
    }

    #[test]
    fn reads_overrides() {
        let config = from_pairs(&[
            ("DATABASE_URL", "postgres://db/shop"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("RESET_SCHEMA", "TRUE"),
            ("BODY_LIMIT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "postgres://db/shop");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.max_connections, 12);
        assert!(config.reset_schema);
        assert_eq!(config.body_limit_bytes, 1024);
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = from_pairs(&[("DB_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", .. }));
        assert!(from_pairs(&[("RESET_SCHEMA", "maybe")]).is_err());
    }
}
