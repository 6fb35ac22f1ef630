use super::Host;
use super::common::{LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::metrics::MetricRegistry;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct MetricsArgs {
    /// Path to configuration file (default is `modelrank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Print every registered metric with its configured weight and description.
pub fn list_metrics<H: Host>(host: &mut H, args: &MetricsArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let registry = MetricRegistry::with_builtin_metrics().into_app_err("registering built-in metrics")?;

    let mut out = host.output();
    for (name, factory) in registry.all_metrics() {
        let weight = config.weights.get(name).map_or_else(|| "-".to_string(), |w| format!("{w}"));
        let _ = writeln!(out, "{name:<24} {weight:>6}  {}", factory().description());
    }

    Ok(())
}
