use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ExtractError, Result};

pub const DEFAULT_TEXT_FIELD: &str = "text";

pub fn parse_envelope(raw: &str, source: &Path) -> Result<Value> {
    debug!(bytes = raw.len(), path = %source.display(), "parsing envelope");
    serde_json::from_str(raw).map_err(|source_err| ExtractError::OuterJson {
        path: source.to_path_buf(),
        source: source_err,
    })
}

/// Reads `field` from the first element of an envelope array.
///
/// Anything else (not an array, an empty array, a non-object first element,
/// a missing or non-string field) yields an empty string.
pub fn text_field<'a>(envelope: &'a Value, field: &str) -> &'a str {
    envelope
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get(field))
        .and_then(Value::as_str)
        .unwrap_or("")
}
