use ex_core::catalog_file::load_catalog_file;
use ex_core::error::CatalogError;
use ex_core::Catalog;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = ".eventx/session.db";
const DEFAULT_PORT: u16 = 4830;
const DEFAULT_AUTH_DELAY_MS: u64 = 1000;
const DEFAULT_PAYMENT_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub auth_delay: Duration,
    pub payment_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let millis = |key: &str, default: u64| {
            non_empty(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map_or(Duration::from_millis(default), Duration::from_millis)
        };
        Self {
            db_path: non_empty("EVENTX_DB_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from),
            port: non_empty("EVENTX_PORT")
                .and_then(|value| value.trim().parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            catalog_path: non_empty("EVENTX_CATALOG").map(PathBuf::from),
            auth_delay: millis("EVENTX_AUTH_DELAY_MS", DEFAULT_AUTH_DELAY_MS),
            payment_delay: millis("EVENTX_PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), self.port)
    }

    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading catalog file");
                Catalog::from_source(load_catalog_file(path)?)
            }
            None => Catalog::seed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.db_path, PathBuf::from(".eventx/session.db"));
        assert_eq!(config.port, 4830);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.auth_delay, Duration::from_secs(1));
        assert_eq!(config.payment_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = config(&[
            ("EVENTX_DB_PATH", "/tmp/ex.db"),
            ("EVENTX_PORT", "not-a-port"),
            ("EVENTX_AUTH_DELAY_MS", "0"),
            ("EVENTX_PAYMENT_DELAY_MS", " 250 "),
            ("EVENTX_CATALOG", ""),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/ex.db"));
        assert_eq!(config.port, 4830);
        assert_eq!(config.auth_delay, Duration::ZERO);
        assert_eq!(config.payment_delay, Duration::from_millis(250));
        assert_eq!(config.catalog_path, None);
    }

    #[test]
    fn test_seed_catalog_when_unset() {
        let catalog = config(&[]).load_catalog().unwrap();
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_missing_catalog_file_fails() {
        let config = config(&[("EVENTX_CATALOG", "/definitely/missing.toml")]);
        assert!(config.load_catalog().is_err());
    }
}
