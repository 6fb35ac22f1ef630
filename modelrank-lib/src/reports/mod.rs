//! Output rendering for evaluation records
//!
//! Records are rendered as NDJSON: one self-contained JSON object per evaluated resource,
//! one object per line. Keys are emitted in sorted order and latencies are whole
//! milliseconds, so rendering the same record twice produces byte-identical output.

mod ndjson;

pub use ndjson::{FIXED_KEYS, LATENCY_SUFFIX, generate, to_line};
