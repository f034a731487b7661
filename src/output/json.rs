//! JSON output for reports, plans and errors.

use crate::error::SubnetError;
use serde::Serialize;
use serde_json::json;

/// Pretty-print any result type as JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// The `{"error": ...}` object returned in place of a result.
pub fn error_json(err: &SubnetError) -> String {
    let value = json!({
        "error": err.to_string(),
        "code": err.error_code(),
        "input": err.input(),
    });
    // a json! value always serializes
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
