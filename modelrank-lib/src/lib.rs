#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for modelrank
//!
//! This library evaluates a machine-learning model, together with the datasets and code
//! repositories it links to, against a set of pluggable trust metrics. The metric scores
//! are combined into a single weighted net score and results are cached by the resource's
//! canonical identity so identical requests are not recomputed.
//!
//! # Module Organization
//!
//! - [`resource`]: What gets evaluated and its canonical cache identity
//! - [`metrics`]: The metric trait, the metric registry, and the built-in metrics
//! - [`engine`]: Concurrent metric dispatch, weighted aggregation, evaluation records
//! - [`cache`]: Durable and in-memory stores for evaluation records
//! - [`reports`]: NDJSON rendering of evaluation records
//! - [`fetch`]: README retrieval for models hosted on Hugging Face
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod cache;
pub mod engine;
pub mod fetch;
pub mod metrics;
pub mod reports;
pub mod resource;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
