//! Processing shared between the eval and batch commands.

use super::config::Config;
use crate::Result;
use crate::cache::{CacheStore, FileCacheStore, NoCacheStore};
use crate::engine::{CacheStatus, Engine, EngineError, Evaluation, WeightTable};
use crate::fetch::ReadmeFetcher;
use crate::metrics::MetricRegistry;
use crate::resource::ResourceSpec;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::IntoAppError;
use std::sync::Arc;

const LOG_TARGET: &str = "    common";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the eval and batch commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `modelrank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where evaluations are cached
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Neither read nor write cached evaluations
    #[arg(long)]
    pub no_cache: bool,

    /// Download model cards from Hugging Face before evaluating
    #[arg(long)]
    pub fetch: bool,
}

/// Everything needed to evaluate resources from the command line.
#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub engine: Engine,
    fetcher: Option<ReadmeFetcher>,
    use_cache: bool,
}

impl Common {
    /// Set up logging, load the configuration, and build the engine.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        let registry = MetricRegistry::with_builtin_metrics().into_app_err("registering built-in metrics")?;

        let cache: Arc<dyn CacheStore> = if args.no_cache {
            Arc::new(NoCacheStore)
        } else {
            let cache_dir = if let Some(cache_path) = &args.cache_dir {
                cache_path.as_std_path().to_path_buf()
            } else {
                BaseDirs::new()
                    .into_app_err("could not determine cache directory")?
                    .cache_dir()
                    .join("modelrank")
            };

            log::debug!(target: LOG_TARGET, "Caching evaluations in '{}'", cache_dir.display());
            Arc::new(FileCacheStore::new(cache_dir, Some(config.cache_ttl))?)
        };

        let fetcher = if args.fetch {
            Some(ReadmeFetcher::new(Some(&config.readme_base_url), config.fetch_timeout)?)
        } else {
            None
        };

        let engine = Engine::new(Arc::new(registry), cache, config.engine_options());

        Ok(Self {
            config,
            engine,
            fetcher,
            use_cache: !args.no_cache,
        })
    }

    /// Evaluate one resource, attaching its model card first when fetching is enabled.
    ///
    /// The model card is only downloaded when the cache has no record for the resource. A
    /// failed download is logged and the resource is evaluated without it.
    pub async fn evaluate(&self, resource: ResourceSpec, weights: Option<&WeightTable>) -> Result<Evaluation, EngineError> {
        let resource = match &self.fetcher {
            Some(fetcher) => {
                if self.use_cache
                    && let Some(record) = self.engine.cached(&resource).await?
                {
                    log::info!(target: LOG_TARGET, "Using cached evaluation for '{resource}', skipping README download");
                    return Ok(Evaluation {
                        record,
                        cache_status: CacheStatus::Hit,
                        warnings: Vec::new(),
                    });
                }

                attach_readme(fetcher, resource).await
            }
            None => resource,
        };

        let evaluation = self.engine.evaluate(&resource, weights, self.use_cache).await?;
        for warning in &evaluation.warnings {
            log::warn!(target: LOG_TARGET, "{warning}");
        }

        Ok(evaluation)
    }
}

/// Attach the model card, evaluating without it if the download fails.
async fn attach_readme(fetcher: &ReadmeFetcher, resource: ResourceSpec) -> ResourceSpec {
    match fetcher.attach_readme(resource.clone()).await {
        Ok(with_readme) => with_readme,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not fetch README for '{resource}': {e:#}");
            resource
        }
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Parse a `NAME=VALUE` weight override.
pub fn parse_weight(s: &str) -> core::result::Result<(String, f64), String> {
    let (name, value) = s.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing metric name in '{s}'"));
    }

    let value: f64 = value.trim().parse().map_err(|e| format!("invalid weight in '{s}': {e}"))?;
    Ok((name.to_string(), value))
}
