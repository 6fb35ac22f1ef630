//! Command dispatch logic for modelrank

use super::{BatchArgs, EvalArgs, InitArgs, MetricsArgs, ValidateArgs, init_config, list_metrics, process_batch, process_eval, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "modelrank", author, version, long_about = None)]
#[command(about = "Appraise the trustworthiness of machine-learning models")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: ModelrankSubcommand,
}

#[derive(Subcommand, Debug)]
enum ModelrankSubcommand {
    /// Evaluate a single model and print its scores as an NDJSON line
    Eval(Box<EvalArgs>),
    /// Evaluate every model listed in a URL file
    Batch(Box<BatchArgs>),
    /// List the available metrics and their weights
    Metrics(MetricsArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        ModelrankSubcommand::Eval(eval_args) => process_eval(host, eval_args).await,
        ModelrankSubcommand::Batch(batch_args) => process_batch(host, batch_args).await,
        ModelrankSubcommand::Metrics(metrics_args) => list_metrics(host, metrics_args),
        ModelrankSubcommand::Init(init_args) => init_config(host, init_args),
        ModelrankSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
