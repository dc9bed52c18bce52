//! Metrics-in-message codec.
//!
//! Findings travel as a single message string per file. The structured
//! metrics ride in a bracketed prefix, `[METRICS:<json>] <detail>`, and the
//! report stage splits them back out. Decoding is total: a message that was
//! never encoded (or was mangled in transit) comes back as
//! `(None, original)` rather than an error.

use serde::Serialize;
use serde_json::Value;

const METRICS_OPEN: &str = "[METRICS:";

/// Embed `metrics` ahead of the human-readable `detail`.
pub fn encode<T: Serialize>(metrics: &T, detail: &str) -> String {
    match serde_json::to_string(metrics) {
        Ok(json) => format!("{METRICS_OPEN}{json}] {detail}"),
        Err(e) => {
            log::warn!("metrics payload dropped, serialization failed: {e}");
            detail.to_string()
        }
    }
}

/// Split a message into its metrics payload and human-readable detail.
///
/// The payload boundary is found by parsing one complete JSON value after
/// the prefix, so `]` inside JSON strings cannot truncate it.
pub fn decode(message: &str) -> (Option<Value>, String) {
    let Some(rest) = message.strip_prefix(METRICS_OPEN) else {
        return (None, message.to_string());
    };

    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
    let Some(Ok(value)) = stream.next() else {
        return (None, message.to_string());
    };

    let Some(tail) = rest.get(stream.byte_offset()..) else {
        return (None, message.to_string());
    };
    let Some(tail) = tail.strip_prefix(']') else {
        return (None, message.to_string());
    };

    let detail = tail.strip_prefix(' ').unwrap_or(tail);
    (Some(value), detail.to_string())
}
