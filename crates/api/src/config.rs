//! Application Configuration
//!
//! Loaded from an optional TOML file, then overridden by `PRICER_*`
//! environment variables (`PRICER_SERVER__BIND_ADDR=127.0.0.1:9000`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trainer::TrainingConfig;

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "PRICER_CONFIG";

/// Config file used when `PRICER_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "pricer.toml";

/// Data locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Historical price CSV
    pub dataset_path: PathBuf,
    /// Trained artifact JSON
    pub artifact_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/fipe_2022.csv"),
            artifact_path: PathBuf::from("artifacts/price_model.json"),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub training: TrainingConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load from the file named by `PRICER_CONFIG` (default `pricer.toml`)
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from a specific file; a missing file falls back to defaults
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_layered(path, environment())
    }

    fn load_layered(path: &Path, env: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

/// `PRICER_<SECTION>__<KEY>` variables
fn environment() -> config::Environment {
    config::Environment::with_prefix("PRICER")
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.data.dataset_path, PathBuf::from("data/fipe_2022.csv"));
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.training, TrainingConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricer.toml");
        std::fs::write(
            &path,
            r#"
[data]
artifact_path = "/tmp/model.json"

[training]
test_fraction = 0.0
ridge_alpha = 0.5
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.data.artifact_path, PathBuf::from("/tmp/model.json"));
        assert_eq!(config.data.dataset_path, PathBuf::from("data/fipe_2022.csv"));
        assert_eq!(config.training.test_fraction, 0.0);
        assert_eq!(config.training.ridge_alpha, 0.5);
        assert_eq!(config.training.seed, 42);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pricer.toml");
        std::fs::write(&path, "[server]\nbind_addr = \"10.0.0.1:80\"\n").unwrap();

        let vars = [
            ("PRICER_SERVER__BIND_ADDR", "127.0.0.1:9000"),
            ("PRICER_DATA__DATASET_PATH", "/srv/fipe.csv"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = AppConfig::load_layered(&path, environment().source(Some(vars))).unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.data.dataset_path, PathBuf::from("/srv/fipe.csv"));
    }
}
