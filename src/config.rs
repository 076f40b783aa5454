use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UNSPLASH_API_ROOT: &str = "https://api.unsplash.com";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Everything the process reads from its environment, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Used when a download request doesn't carry its own basePath
    pub base_path: Option<PathBuf>,
    pub unsplash_access_key: String,
    pub unsplash_api_root: String,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values are treated the same as unset ones
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match read("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };
        let unsplash_access_key =
            read("UNSPLASH_ACCESS_KEY").ok_or(ConfigError::Missing("UNSPLASH_ACCESS_KEY"))?;
        let unsplash_api_root = read("UNSPLASH_API_ROOT")
            .map(|root| root.trim_end_matches('/').to_owned())
            .unwrap_or_else(|| DEFAULT_UNSPLASH_API_ROOT.to_owned());
        let user_agent = read("USER_AGENT")
            .unwrap_or_else(|| format!("imgrelay/{}", env!("CARGO_PKG_VERSION")));

        Ok(Config {
            port,
            base_path: read("BASE_PATH").map(PathBuf::from),
            unsplash_access_key,
            unsplash_api_root,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::{Config, ConfigError, DEFAULT_PORT, DEFAULT_UNSPLASH_API_ROOT};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[("UNSPLASH_ACCESS_KEY", "key")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.base_path, None);
        assert_eq!(config.unsplash_api_root, DEFAULT_UNSPLASH_API_ROOT);
        assert!(config.user_agent.starts_with("imgrelay/"));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("UNSPLASH_ACCESS_KEY", "key"),
            ("PORT", "8080"),
            ("BASE_PATH", "/srv/images"),
            ("UNSPLASH_API_ROOT", "http://localhost:9000/"),
            ("USER_AGENT", "tester"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_path, Some(PathBuf::from("/srv/images")));
        assert_eq!(config.unsplash_access_key, "key");
        assert_eq!(config.unsplash_api_root, "http://localhost:9000");
        assert_eq!(config.user_agent, "tester");
    }

    #[test]
    fn access_key_is_required() {
        let err = Config::from_lookup(lookup(&[("PORT", "8080")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("UNSPLASH_ACCESS_KEY"));

        let err = Config::from_lookup(lookup(&[("UNSPLASH_ACCESS_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("UNSPLASH_ACCESS_KEY"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[
            ("UNSPLASH_ACCESS_KEY", "key"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".to_owned()
            }
        );
    }

    #[test]
    fn empty_base_path_is_unset() {
        let config = Config::from_lookup(lookup(&[
            ("UNSPLASH_ACCESS_KEY", "key"),
            ("BASE_PATH", ""),
        ]))
        .unwrap();
        assert_eq!(config.base_path, None);
    }
}
