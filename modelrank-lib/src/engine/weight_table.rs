use super::EngineError;
use crate::metrics::MetricResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relative importance of each metric in the net score.
///
/// Weights are finite and non-negative. They need not sum to one: aggregation divides by the
/// sum of the weights that actually applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    /// Build a table, rejecting negative, infinite, or NaN weights.
    pub fn new<I, S>(weights: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (name, weight) in weights {
            let name = name.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::InvalidWeight { name, weight });
            }
            let _ = table.insert(name, weight);
        }

        Ok(Self { weights: table })
    }

    /// A table giving every named metric the same weight.
    #[must_use]
    pub fn uniform<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            weights: names.into_iter().map(|name| (name.into(), 1.0)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// A copy of this table with the entries of `overrides` replacing or adding to its own.
    #[must_use]
    pub fn merged_with(&self, overrides: &Self) -> Self {
        let mut weights = self.weights.clone();
        weights.extend(overrides.weights.iter().map(|(name, weight)| (name.clone(), *weight)));
        Self { weights }
    }
}

impl TryFrom<BTreeMap<String, f64>> for WeightTable {
    type Error = EngineError;

    fn try_from(weights: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<WeightTable> for BTreeMap<String, f64> {
    fn from(table: WeightTable) -> Self {
        table.weights
    }
}

/// Combine metric scores into a single net score.
///
/// Computes the weighted mean of every result whose metric has a positive weight, dividing by
/// the sum of the weights actually used. Metrics with no weight, and weights with no result,
/// are ignored. Returns `0.0` when no weight applies. The outcome does not depend on the order
/// of `results`.
#[must_use]
pub fn aggregate(results: &[MetricResult], weights: &WeightTable) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_used = 0.0;

    for (name, weight) in weights.iter() {
        if weight <= 0.0 {
            continue;
        }

        if let Some(result) = results.iter().find(|r| r.name == name) {
            weighted_sum += result.score * weight;
            weight_used += weight;
        }
    }

    if weight_used > 0.0 {
        (weighted_sum / weight_used).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    fn result(name: &str, score: f64) -> MetricResult {
        MetricResult {
            name: name.into(),
            score,
            latency: Duration::from_millis(5),
            notes: String::new(),
        }
    }

    #[test]
    fn test_weighted_mean() {
        let results = [result("license", 0.8), result("bus_factor", 0.6)];
        let weights = WeightTable::new([("license", 0.6), ("bus_factor", 0.4)]).unwrap();
        assert!((aggregate(&results, &weights) - 0.72).abs() < 1e-9);
    }

    #[test]
    fn test_missing_metric_is_excluded_and_weights_renormalize() {
        let results = [result("a", 1.0), result("b", 0.0)];
        let weights = WeightTable::new([("a", 1.0), ("b", 1.0), ("c", 1.0)]).unwrap();
        assert!((aggregate(&results, &weights) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unweighted_metric_contributes_nothing() {
        let results = [result("a", 1.0), result("b", 0.0)];
        let weights = WeightTable::new([("a", 2.0)]).unwrap();
        assert!((aggregate(&results, &weights) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weights_are_ignored() {
        let results = [result("a", 1.0), result("b", 0.0)];
        let weights = WeightTable::new([("a", 1.0), ("b", 0.0)]).unwrap();
        assert!((aggregate(&results, &weights) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_applicable_weights_yields_zero() {
        let results = [result("a", 1.0)];
        assert!(aggregate(&results, &WeightTable::default()).abs() < f64::EPSILON);
        assert!(aggregate(&[], &WeightTable::uniform(["a"])).abs() < f64::EPSILON);
    }

    #[test]
    fn test_order_independent() {
        let weights = WeightTable::new([("a", 0.3), ("b", 0.5), ("c", 0.2)]).unwrap();
        let forward = [result("a", 0.1), result("b", 0.7), result("c", 0.9)];
        let backward = [result("c", 0.9), result("b", 0.7), result("a", 0.1)];
        assert_eq!(aggregate(&forward, &weights).to_bits(), aggregate(&backward, &weights).to_bits());
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let results = [result("a", 1.0), result("b", 0.5)];
        let weights = WeightTable::new([("a", 3.0), ("b", 1.0)]).unwrap();
        assert!((aggregate(&results, &weights) - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(matches!(WeightTable::new([("a", -0.1)]), Err(EngineError::InvalidWeight { .. })));
        assert!(matches!(WeightTable::new([("a", f64::NAN)]), Err(EngineError::InvalidWeight { .. })));
        assert!(matches!(WeightTable::new([("a", f64::INFINITY)]), Err(EngineError::InvalidWeight { .. })));
    }

    #[test]
    fn test_uniform() {
        let table = WeightTable::uniform(["a", "b"]);
        assert_eq!(table.get("a"), Some(1.0));
        assert_eq!(table.get("b"), Some(1.0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_merged_with_overrides() {
        let base = WeightTable::new([("a", 1.0), ("b", 1.0)]).unwrap();
        let overrides = WeightTable::new([("b", 3.0), ("c", 2.0)]).unwrap();
        let merged = base.merged_with(&overrides);
        assert_eq!(merged.get("a"), Some(1.0));
        assert_eq!(merged.get("b"), Some(3.0));
        assert_eq!(merged.get("c"), Some(2.0));
    }

    #[test]
    fn test_deserialize_validates() {
        let table: WeightTable = toml::from_str("license = 0.5\nbus_factor = 0.5").unwrap();
        assert_eq!(table.get("license"), Some(0.5));

        let err = toml::from_str::<WeightTable>("license = -1.0").unwrap_err();
        assert!(err.to_string().contains("license"));
    }
}
