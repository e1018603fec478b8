//! Server configuration.
//!
//! Read from the environment (a `.env` file is loaded first if present):
//!
//! | Variable       | Default                      |
//! |----------------|------------------------------|
//! | `PORT`         | `8000`                       |
//! | `DATA_PATH`    | `data/CleanedData.csv`       |
//! | `CORS_ORIGINS` | the deployed frontends + `http://localhost:3000` |
//!
//! `CORS_ORIGINS` is comma-separated; `*` allows any origin.

use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_DATA_PATH: &str = "data/CleanedData.csv";

pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "https://datadashpro-frontend.windsurf.build",
    "https://datadashpro-frontend.onrender.com",
    "http://localhost:3000",
];

/// Origin value that allows every origin.
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load from `.env` and the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }

        if let Some(path) = get("DATA_PATH") {
            config.data_path = PathBuf::from(path);
        }

        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    /// Override the port (command-line flag).
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Override the dataset path (command-line flag).
    pub fn with_data_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_path = path;
        }
        self
    }

    /// `*` among the origins disables the allow-list.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins.len(), 3);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_env_values() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("DATA_PATH", "/srv/listings.csv"),
            ("CORS_ORIGINS", "https://a.example, https://b.example ,"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.data_path, PathBuf::from("/srv/listings.csv"));
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("eighty".into()));
    }

    #[test]
    fn test_empty_values_ignored() {
        let config = Config::from_lookup(lookup(&[("PORT", "  "), ("DATA_PATH", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn test_overrides_and_wildcard() {
        let config = Config::from_lookup(lookup(&[("CORS_ORIGINS", "*")]))
            .unwrap()
            .with_port(Some(3000))
            .with_data_path(None);

        assert_eq!(config.port, 3000);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(config.allows_any_origin());
    }
}
