//! Command-line interface and orchestration for modelrank
//!
//! This module implements the CLI commands and wires the library together: it parses
//! arguments, loads the configuration, builds the metric registry, cache store, and
//! evaluation engine, and prints results.
//!
//! # Commands
//!
//! - **eval**: Evaluate one model URL, optionally with linked dataset and code URLs, a local
//!   model card, a license identifier, and per-metric weight overrides
//! - **batch**: Evaluate every `code_url,dataset_url,model_url` line of a URL file
//! - **metrics**: List the registered metrics and their configured weights
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! Both evaluating commands print one NDJSON line per resource on standard output.
//! Configuration is a TOML file (`modelrank.toml`) holding the weight table, timeouts,
//! concurrency limits, and the cache TTL.

mod batch;
mod common;
mod config;
mod eval;
mod host;
mod init;
mod list_metrics;
mod run;
mod validate;

pub use batch::{BatchArgs, BatchRow, process_batch, read_rows};
pub use common::{CommonArgs, LogLevel};
pub use config::Config;
pub use eval::{EvalArgs, process_eval};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use list_metrics::{MetricsArgs, list_metrics};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};

#[cfg(test)]
pub use host::TestHost;
