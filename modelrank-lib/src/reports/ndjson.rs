use crate::Result;
use crate::engine::EvaluationRecord;
use core::fmt::Write;
use serde_json::{Map, Value, json};

/// Keys present on every line regardless of which metrics ran.
pub const FIXED_KEYS: &[&str] = &["url", "category", "dataset_urls", "code_urls", "net_score", "net_score_latency"];

/// Appended to a metric's name to form the key holding its latency.
pub const LATENCY_SUFFIX: &str = "_latency";

/// Render one record as a single JSON object without a trailing newline.
///
/// The object holds `url`, `category`, `dataset_urls`, `code_urls`, `net_score`, and
/// `net_score_latency`, plus `<name>` and `<name>_latency` for every metric result,
/// failed metrics included. The registry refuses metric names that would collide with
/// any of these keys.
#[must_use]
#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn to_line(record: &EvaluationRecord) -> String {
    let mut obj = Map::new();

    for result in &record.results {
        obj.insert(result.name.clone(), json!(result.score));
        obj.insert(format!("{}{LATENCY_SUFFIX}", result.name), json!(result.latency_ms()));
    }

    obj.insert("url".to_string(), json!(record.identity.primary_url()));
    obj.insert("category".to_string(), json!(record.category.to_string()));
    obj.insert("dataset_urls".to_string(), json!(record.identity.dataset_urls()));
    obj.insert("code_urls".to_string(), json!(record.identity.code_urls()));
    obj.insert("net_score".to_string(), json!(record.net_score));
    obj.insert("net_score_latency".to_string(), json!(record.net_score_latency_ms()));

    Value::Object(obj).to_string()
}

/// Write every record as one NDJSON line.
pub fn generate<W: Write>(records: &[EvaluationRecord], writer: &mut W) -> Result<()> {
    for record in records {
        writeln!(writer, "{}", to_line(record))?;
    }

    Ok(())
}
