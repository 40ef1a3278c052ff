//! Pulls operations out of free-form model text.
//!
//! The model is asked for a fenced ```json block, but replies vary. The
//! fenced block wins when present; otherwise the whole reply is parsed.

use crate::ParseError;
use regex::Regex;
use scribe_common::Operation;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

fn fenced_array() -> &'static Regex {
    static FENCED: OnceLock<Regex> = OnceLock::new();
    // Greedy so nested arrays inside the block stay intact
    FENCED.get_or_init(|| Regex::new(r"(?s)```json\s*(\[.*\])\s*```").unwrap())
}

/// JSON text of the operation array, fenced block preferred
fn json_payload(response: &str) -> &str {
    fenced_array()
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| response.trim())
}

/// Parse a model reply into operations.
///
/// Elements that are not well-formed operations (unknown `operation_type`,
/// wrong field types) are dropped with a warning. An array whose elements
/// are all dropped is still `Ok(vec![])`; the caller decides what empty means.
pub fn extract_operations(response: &str) -> Result<Vec<Operation>, ParseError> {
    let value: Value = serde_json::from_str(json_payload(response))?;

    let Value::Array(elements) = value else {
        return Err(ParseError::NotAnArray);
    };

    let operations = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let kind = element
                .get("operation_type")
                .and_then(Value::as_str)
                .unwrap_or("<missing>")
                .to_string();
            match serde_json::from_value::<Operation>(element) {
                Ok(operation) => Some(operation),
                Err(e) => {
                    warn!(index, operation_type = %kind, error = %e, "Dropping malformed operation");
                    None
                }
            }
        })
        .collect();

    Ok(operations)
}
