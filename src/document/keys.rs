//! Key composer for the document `id` and `PK` values
//!
//! Each contributing field is rendered to its canonical string, in ascending
//! order index. With a single field the canonical string is the key. With
//! several, every segment is length-prefixed so the key can be split back
//! without a reserved separator:
//!
//! ```text
//! fields:   order_id = "abc", line = 42
//! single:   "abc"
//! multiple: "3:abc2:42"      (<utf8 byte length>:<text>, repeated)
//! ```
//!
//! Canonical strings: text verbatim, numbers in JSON form, `true`/`false`.
//! Null renders as the empty string for non-text keys. Text keys reject null,
//! since `""` already stands for the empty string.

use std::fmt::Write as _;

use serde_json::{Number, Value};

use super::errors::{json_type_name, CodecError, CodecResult};
use crate::schema::{KeyField, KeyType};

/// Renders a key field value to its canonical string
pub fn canonical_string(field: &KeyField, value: &Value) -> CodecResult<String> {
    let mismatch = || CodecError::UnsupportedKeyValue {
        field: field.name.clone(),
        expected: field.key_type.type_name(),
        found: json_type_name(value),
    };

    match (field.key_type, value) {
        (KeyType::String, Value::Null) => Err(mismatch()),
        (_, Value::Null) => Ok(String::new()),
        (KeyType::String, Value::String(s)) => Ok(s.clone()),
        (KeyType::Int, Value::Number(n)) if n.is_i64() => Ok(n.to_string()),
        (KeyType::UInt, Value::Number(n)) if n.is_u64() => Ok(n.to_string()),
        (KeyType::Float, Value::Number(n)) => n
            .as_f64()
            .map(|f| f.to_string())
            .ok_or_else(mismatch),
        (KeyType::Bool, Value::Bool(b)) => Ok(b.to_string()),
        _ => Err(mismatch()),
    }
}

/// Parses a canonical string back into a key field value
pub fn parse_segment(field: &KeyField, text: &str) -> CodecResult<Value> {
    let invalid = || CodecError::KeySegmentParse {
        field: field.name.clone(),
        expected: field.key_type.type_name(),
        text: text.to_string(),
    };

    if text.is_empty() && field.key_type != KeyType::String {
        return Ok(Value::Null);
    }

    match field.key_type {
        KeyType::String => Ok(Value::String(text.to_string())),
        KeyType::Int => text.parse::<i64>().map(Value::from).map_err(|_| invalid()),
        KeyType::UInt => text.parse::<u64>().map(Value::from).map_err(|_| invalid()),
        KeyType::Float => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(invalid),
        KeyType::Bool => text.parse::<bool>().map(Value::Bool).map_err(|_| invalid()),
    }
}

/// Joins canonical segments into one key value
pub fn join_segments(segments: &[String]) -> String {
    if let [single] = segments {
        return single.clone();
    }

    let capacity = segments.iter().map(|s| s.len() + 4).sum();
    let mut out = String::with_capacity(capacity);
    for segment in segments {
        // Writing to a String cannot fail
        let _ = write!(out, "{}:{}", segment.len(), segment);
    }
    out
}

/// Splits a key value into exactly `count` segments
pub fn split_segments<'a>(
    key: &'static str,
    composed: &'a str,
    count: usize,
) -> CodecResult<Vec<&'a str>> {
    match count {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![composed]),
        _ => {}
    }

    let malformed = |reason: String| CodecError::MalformedKey { key, reason };
    let mut segments = Vec::with_capacity(count);
    let mut rest = composed;

    while !rest.is_empty() {
        let colon = rest
            .find(':')
            .ok_or_else(|| malformed(format!("missing length prefix in '{}'", rest)))?;
        let prefix = &rest[..colon];
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(format!("invalid length prefix '{}'", prefix)));
        }
        let len: usize = prefix
            .parse()
            .map_err(|_| malformed(format!("invalid length prefix '{}'", prefix)))?;

        let body = &rest[colon + 1..];
        let segment = body.get(..len).ok_or_else(|| {
            malformed(format!(
                "segment length {} exceeds remaining input or splits a character",
                len
            ))
        })?;
        segments.push(segment);
        rest = &body[len..];
    }

    if segments.len() != count {
        return Err(malformed(format!(
            "expected {} segments, found {}",
            count,
            segments.len()
        )));
    }

    Ok(segments)
}

/// Composes a key from its fields' values, given in the fields' order
pub fn compose_key(fields: &[KeyField], values: &[Value]) -> CodecResult<String> {
    let segments = fields
        .iter()
        .zip(values)
        .map(|(field, value)| canonical_string(field, value))
        .collect::<CodecResult<Vec<_>>>()?;
    Ok(join_segments(&segments))
}

/// Decomposes a key back into one value per field
pub fn decompose_key(
    key: &'static str,
    fields: &[KeyField],
    composed: &str,
) -> CodecResult<Vec<Value>> {
    split_segments(key, composed, fields.len())?
        .into_iter()
        .zip(fields)
        .map(|(segment, field)| parse_segment(field, segment))
        .collect()
}
