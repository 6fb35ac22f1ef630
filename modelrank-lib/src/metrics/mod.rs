//! Pluggable trust metrics
//!
//! Every metric implements the [`Metric`] trait: given a [`ResourceSpec`](crate::resource::ResourceSpec)
//! it produces a [`MetricOutcome`] holding a score in `[0, 1]` and human-readable notes, or
//! fails with a [`MetricError`]. Metrics are opaque to the engine; it only times them,
//! clamps their scores, and turns failures into zero-scored [`MetricResult`]s.
//!
//! # Registration
//!
//! Metrics are made available through a [`MetricRegistry`] that maps unique names to
//! factories. Registration is an explicit startup step and duplicate names are rejected.
//! The registry is built once, wrapped in an `Arc`, and handed to the engine; every
//! evaluation asks each factory for a fresh metric instance so no state leaks between
//! resources.
//!
//! The metrics shipped with this crate live in [`builtin`] and are registered through
//! [`MetricRegistry::with_builtin_metrics`].

pub mod builtin;
mod metric;
mod metric_error;
mod metric_result;
mod registry;

pub use metric::{Metric, MetricFactory, MetricOutcome};
pub use metric_error::MetricError;
pub use metric_result::MetricResult;
pub use registry::MetricRegistry;
