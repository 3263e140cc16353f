//! Service configuration.
//!
//! Settings come from a `transit-lab.toml` file (every section and key is
//! optional) and are then overridden by environment variables:
//!
//! | Variable                 | Setting                   |
//! |--------------------------|---------------------------|
//! | `HOST`                   | `server.host`             |
//! | `PORT`                   | `server.port`             |
//! | `PREDICTOR_URL`          | `predictor.url`           |
//! | `PREDICTOR_TIMEOUT_SECS` | `predictor.timeout_secs`  |
//! | `REPOSITORY_TYPE`        | `catalog.repository`      |
//! | `MODELS_DIR`             | `catalog.models_dir`      |
//! | `CATALOG_PATH`           | `catalog.path`            |
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [predictor]
//! url = "http://localhost:8000"
//! timeout_secs = 30
//!
//! [catalog]
//! repository = "file"
//! models_dir = "models"
//! path = "models/catalog.json"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::db::RepositoryType;

pub const CONFIG_FILE_NAME: &str = "transit-lab.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {variable}: {reason}")]
    InvalidOverride {
        variable: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub predictor: PredictorSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// External classification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorSettings {
    /// Base URL; `None` leaves the prediction endpoint unconfigured.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 30,
        }
    }
}

impl PredictorSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub repository: RepositoryType,
    pub models_dir: PathBuf,
    /// Catalog file used by the file repository.
    pub path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            repository: RepositoryType::Local,
            models_dir: PathBuf::from("models"),
            path: PathBuf::from("models/catalog.json"),
        }
    }
}

impl AppConfig {
    /// Parse a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// First `transit-lab.toml` found in the current directory, `backend/`,
    /// or the parent directory.
    pub fn find_default_file() -> Option<PathBuf> {
        [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Default file if one exists, otherwise built-in defaults.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        match Self::find_default_file() {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => {
                log::info!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Default location plus process environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = parse_override("PORT", &port)?;
        }
        if let Some(url) = get("PREDICTOR_URL") {
            self.predictor.url = Some(url);
        }
        if let Some(secs) = get("PREDICTOR_TIMEOUT_SECS") {
            self.predictor.timeout_secs = parse_override("PREDICTOR_TIMEOUT_SECS", &secs)?;
        }
        if let Some(kind) = get("REPOSITORY_TYPE") {
            self.catalog.repository = parse_override("REPOSITORY_TYPE", &kind)?;
        }
        if let Some(dir) = get("MODELS_DIR") {
            self.catalog.models_dir = PathBuf::from(dir);
        }
        if let Some(path) = get("CATALOG_PATH") {
            self.catalog.path = PathBuf::from(path);
        }
        Ok(())
    }
}

fn parse_override<T>(variable: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidOverride {
            variable,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert!(config.predictor.url.is_none());
        assert_eq!(config.predictor.timeout(), Duration::from_secs(30));
        assert_eq!(config.catalog.repository, RepositoryType::Local);
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[predictor]\nurl = \"http://classifier:8000\"\n\n[catalog]\nrepository = \"file\""
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(
            config.predictor.url.as_deref(),
            Some("http://classifier:8000")
        );
        assert_eq!(config.predictor.timeout_secs, 30);
        assert_eq!(config.catalog.repository, RepositoryType::File);
        assert_eq!(config.catalog.models_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/nonexistent/transit-lab.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[
                ("HOST", "127.0.0.1"),
                ("PORT", "9000"),
                ("PREDICTOR_URL", "http://localhost:8000"),
                ("PREDICTOR_TIMEOUT_SECS", "5"),
                ("REPOSITORY_TYPE", "FILE"),
                ("MODELS_DIR", "/srv/models"),
                ("CATALOG_PATH", "/srv/catalog.json"),
            ]))
            .unwrap();

        assert_eq!(config.server.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.predictor.timeout(), Duration::from_secs(5));
        assert_eq!(config.catalog.repository, RepositoryType::File);
        assert_eq!(config.catalog.models_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.catalog.path, PathBuf::from("/srv/catalog.json"));
    }

    #[test]
    fn test_empty_override_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[("HOST", "  "), ("PREDICTOR_URL", "")]))
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride {
                variable: "PORT",
                ..
            }
        ));
    }
}
