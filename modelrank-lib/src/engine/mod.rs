//! Metric evaluation engine
//!
//! The [`Engine`] is the single entry point for evaluating a resource. It consults the cache
//! store, and on a miss fans every registered metric out as its own tokio task against a
//! shared, read-only [`ResourceSpec`](crate::resource::ResourceSpec). Once every task has
//! completed (or failed, timed out, or panicked) the per-metric results are combined into a
//! net score using a [`WeightTable`], packaged into an [`EvaluationRecord`], and written back
//! to the cache.
//!
//! # Failure model
//!
//! A failing metric never aborts an evaluation: its result is recorded with a score of `0.0`,
//! the time spent up to the failure, and a note describing what went wrong. Cache read
//! failures are treated as misses and cache write failures are reported as warnings on the
//! returned [`Evaluation`]. Only a resource that fails validation produces an error, and that
//! happens before any metric is dispatched.

mod dispatcher;
mod engine_error;
mod evaluation_record;
mod evaluator;
mod weight_table;

pub use engine_error::EngineError;
pub use evaluation_record::{CacheStatus, Evaluation, EvaluationRecord};
pub use evaluator::{Engine, EngineOptions};
pub use weight_table::{WeightTable, aggregate};
