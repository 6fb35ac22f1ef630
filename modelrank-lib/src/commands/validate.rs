use super::Host;
use super::config::Config;
use crate::Result;
use crate::metrics::MetricRegistry;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `modelrank.toml`)
    #[arg(value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Load a configuration file and check that every weighted metric exists.
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<()> {
    let config = Config::load(base_dir, config_path)?;
    let registry = MetricRegistry::with_builtin_metrics().into_app_err("registering built-in metrics")?;

    for (name, _) in config.weights.iter() {
        if let Err(e) = registry.get(name) {
            bail!("invalid weights: {e}");
        }
    }

    Ok(())
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match validate_config_inner(Utf8Path::new("."), config_path) {
        Ok(()) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
