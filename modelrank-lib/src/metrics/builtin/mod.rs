//! Metrics shipped with modelrank
//!
//! These metrics only inspect the resource itself and the metadata attached to it, so they
//! perform no I/O of their own. README text and license identifiers are fetched ahead of
//! time by collaborators such as [`crate::fetch::ReadmeFetcher`].

mod bus_factor;
mod dataset_and_code;
mod license;
mod performance_claims;
mod ramp_up_time;

use super::MetricRegistry;
use crate::engine::EngineError;

pub use bus_factor::BusFactorMetric;
pub use dataset_and_code::DatasetAndCodeMetric;
pub use license::LicenseMetric;
pub use performance_claims::PerformanceClaimsMetric;
pub use ramp_up_time::RampUpTimeMetric;

pub const BUS_FACTOR: &str = "bus_factor";
pub const DATASET_AND_CODE_SCORE: &str = "dataset_and_code_score";
pub const LICENSE: &str = "license";
pub const PERFORMANCE_CLAIMS: &str = "performance_claims";
pub const RAMP_UP_TIME: &str = "ramp_up_time";

/// Register every built-in metric.
///
/// # Errors
///
/// Fails if any built-in name is already present in `registry`.
pub fn register_all(registry: &mut MetricRegistry) -> Result<(), EngineError> {
    registry.register(BUS_FACTOR, || Box::new(BusFactorMetric))?;
    registry.register(DATASET_AND_CODE_SCORE, || Box::new(DatasetAndCodeMetric))?;
    registry.register(LICENSE, || Box::new(LicenseMetric))?;
    registry.register(PERFORMANCE_CLAIMS, || Box::new(PerformanceClaimsMetric))?;
    registry.register(RAMP_UP_TIME, || Box::new(RampUpTimeMetric))?;
    Ok(())
}
