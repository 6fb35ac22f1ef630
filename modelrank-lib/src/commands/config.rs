use crate::Result;
use crate::engine::{EngineOptions, WeightTable};
use crate::fetch::HUGGING_FACE_BASE_URL;
use crate::metrics::builtin;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "modelrank.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Relative importance of each metric in the net score
    #[serde(default = "default_weights")]
    pub weights: WeightTable,

    /// Longest a single metric may run before it is recorded as failed
    #[serde(default = "default_metric_timeout", with = "humantime_serde")]
    pub metric_timeout: Duration,

    /// Number of metrics allowed to run at the same time for one resource
    #[serde(default = "default_max_concurrent_metrics")]
    pub max_concurrent_metrics: usize,

    /// Duration to keep cached evaluations before recomputing them
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Base URL model cards are downloaded from
    #[serde(default = "default_readme_base_url")]
    pub readme_base_url: String,

    /// Longest a single model card download may take
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,
}

fn default_weights() -> WeightTable {
    WeightTable::new([
        (builtin::DATASET_AND_CODE_SCORE, 0.2),
        (builtin::LICENSE, 0.3),
        (builtin::PERFORMANCE_CLAIMS, 0.2),
        (builtin::RAMP_UP_TIME, 0.3),
    ])
    .unwrap_or_default()
}

const fn default_metric_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_max_concurrent_metrics() -> usize {
    16
}

const fn default_cache_ttl() -> Duration {
    Duration::from_secs(7 * 24 * 3600)
}

fn default_readme_base_url() -> String {
    HUGGING_FACE_BASE_URL.to_string()
}

const fn default_fetch_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// With no explicit path, `modelrank.toml` in `base_dir` is used when it exists.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading modelrank configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading modelrank configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// Individual weights are already checked while parsing.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_metrics == 0 {
            return Err(app_err!("max_concurrent_metrics must be at least 1"));
        }

        if self.metric_timeout.is_zero() {
            return Err(app_err!("metric_timeout must be greater than zero"));
        }

        if self.fetch_timeout.is_zero() {
            return Err(app_err!("fetch_timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Engine settings derived from this configuration.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            default_weights: Some(self.weights.clone()),
            metric_timeout: Some(self.metric_timeout),
            max_concurrent_metrics: self.max_concurrent_metrics,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: default_weights(),
            metric_timeout: default_metric_timeout(),
            max_concurrent_metrics: default_max_concurrent_metrics(),
            cache_ttl: default_cache_ttl(),
            readme_base_url: default_readme_base_url(),
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, text: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_embedded() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_saved_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        Config::save_default(&path).unwrap();

        let config = Config::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(config, Config::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        assert_eq!(Config::load(&base, None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let _ = write_config(&dir, "max_concurrent_metrics = 2\n");
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let config = Config::load(&base, None).unwrap();
        assert_eq!(config.max_concurrent_metrics, 2);
        assert_eq!(config.weights, Config::default().weights);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let missing = Utf8PathBuf::from("/definitely/not/here/modelrank.toml");
        let _ = Config::load(Utf8Path::new("."), Some(&missing)).unwrap_err();
    }

    #[test]
    fn test_partial_weights_replace_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[weights]\nlicense = 1.0\n");

        let config = Config::load(Utf8Path::new("."), Some(&path)).unwrap();
        assert_eq!(config.weights.len(), 1);
        assert_eq!(config.weights.get("license"), Some(1.0));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[weights]\nlicense = -0.5\n");
        let _ = Config::load(Utf8Path::new("."), Some(&path)).unwrap_err();
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "unknown_field = \"value\"\n");
        let _ = Config::load(Utf8Path::new("."), Some(&path)).unwrap_err();
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "cache_ttl = \"not a valid duration\"\n");
        let _ = Config::load(Utf8Path::new("."), Some(&path)).unwrap_err();
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let config = Config {
            max_concurrent_metrics: 0,
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = Config {
            metric_timeout: Duration::ZERO,
            ..Config::default()
        };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_engine_options() {
        let options = Config::default().engine_options();
        assert_eq!(options.metric_timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.max_concurrent_metrics, 16);
        assert_eq!(options.default_weights.map(|w| w.len()), Some(4));
    }
}
