use std::path::PathBuf;
use std::time::Duration;

use marquee_service::Collections;

const DEFAULT_ADDR: &str = "0.0.0.0:9700";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: String,
    /// JSON file of `{ "<collection>": [documents...] }` loaded at startup.
    pub seed_path: Option<PathBuf>,
    pub request_timeout: Duration,
    pub collections: Collections,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number of milliseconds, got `{value}`")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("MARQUEE_API_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let seed_path = lookup("MARQUEE_SEED_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let request_timeout = match lookup("MARQUEE_REQUEST_TIMEOUT_MS") {
            None => Duration::from_millis(DEFAULT_TIMEOUT_MS),
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "MARQUEE_REQUEST_TIMEOUT_MS",
                        value,
                    });
                }
            },
        };

        let defaults = Collections::default();
        let collection = |name: &'static str, default: String| match lookup(name) {
            None => Ok(default),
            Some(value) if value.is_empty() => Err(ConfigError::Empty(name)),
            Some(value) => Ok(value),
        };
        let collections = Collections {
            principals: collection("MARQUEE_PRINCIPALS_COLLECTION", defaults.principals)?,
            titles: collection("MARQUEE_TITLES_COLLECTION", defaults.titles)?,
            names: collection("MARQUEE_NAMES_COLLECTION", defaults.names)?,
        };

        if bind_addr.is_empty() {
            return Err(ConfigError::Empty("MARQUEE_API_ADDR"));
        }

        Ok(Self {
            bind_addr,
            seed_path,
            request_timeout,
            collections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9700");
        assert_eq!(config.seed_path, None);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.collections, Collections::default());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("MARQUEE_API_ADDR", "127.0.0.1:8080"),
            ("MARQUEE_SEED_PATH", "/data/seed.json"),
            ("MARQUEE_REQUEST_TIMEOUT_MS", "250"),
            ("MARQUEE_NAMES_COLLECTION", "people"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.seed_path, Some(PathBuf::from("/data/seed.json")));
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.collections.names, "people");
        assert_eq!(config.collections.titles, "titles");
    }

    #[test]
    fn rejects_bad_timeout() {
        for value in ["0", "-1", "soon"] {
            assert!(matches!(
                config(&[("MARQUEE_REQUEST_TIMEOUT_MS", value)]),
                Err(ConfigError::InvalidTimeout { .. })
            ));
        }
    }

    #[test]
    fn rejects_empty_collection_name() {
        assert!(matches!(
            config(&[("MARQUEE_TITLES_COLLECTION", "")]),
            Err(ConfigError::Empty("MARQUEE_TITLES_COLLECTION"))
        ));
    }
}
