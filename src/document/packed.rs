//! Packed-blob codec for the document `p` field
//!
//! Pipeline:
//!
//! ```text
//! pack:   [(field, value)] -> tokens -> bincode (standard) -> lz4 (size prepended) -> base64
//! unpack: base64 -> lz4 -> bincode -> tokens -> [(field, value)]
//! ```
//!
//! Field order in the blob is the order the caller supplies, which is the
//! descriptor's declaration order, so packing is deterministic.
//!
//! Each field value is stored as a flat pre-order stream of [`PackedValue`]
//! tokens. Lists and maps carry their entry count; map keys are `Text`
//! tokens. Nesting is limited to [`MAX_NESTING`] levels in both directions.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::errors::{CodecError, CodecResult};

/// Deepest container nesting a packed value may have
pub const MAX_NESTING: usize = 128;

/// One token of a packed value.
///
/// bincode is not self-describing, so JSON values are carried through this
/// explicit enum rather than through `serde_json::Value` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PackedValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    /// List header, followed by its items
    List(u32),
    /// Map header, followed by key / value pairs
    Map(u32),
}

impl PackedValue {
    /// Flattens a carried field value into tokens
    pub fn tokens(field: &str, value: &Value) -> CodecResult<Vec<PackedValue>> {
        let mut out = Vec::new();
        flatten(field, value, 0, &mut out)?;
        Ok(out)
    }

    /// Rebuilds a carried field value from its tokens
    pub fn into_json(field: &str, tokens: Vec<PackedValue>) -> CodecResult<Value> {
        let mut reader = TokenReader {
            field,
            tokens: tokens.into_iter(),
        };
        let value = reader.read_value(0)?;
        if reader.tokens.next().is_some() {
            return Err(reader.malformed("trailing tokens after value"));
        }
        Ok(value)
    }
}

fn too_deep(field: &str) -> String {
    format!("field '{}' nests deeper than {} levels", field, MAX_NESTING)
}

fn entry_count(field: &str, len: usize) -> CodecResult<u32> {
    u32::try_from(len)
        .map_err(|_| CodecError::Encode(format!("field '{}' holds a collection too large to pack", field)))
}

fn flatten(field: &str, value: &Value, depth: usize, out: &mut Vec<PackedValue>) -> CodecResult<()> {
    match value {
        Value::Null => out.push(PackedValue::Null),
        Value::Bool(b) => out.push(PackedValue::Bool(*b)),
        Value::Number(n) => out.push(if let Some(i) = n.as_i64() {
            PackedValue::Int(i)
        } else if let Some(u) = n.as_u64() {
            PackedValue::UInt(u)
        } else {
            PackedValue::Float(n.as_f64().unwrap_or(f64::NAN))
        }),
        Value::String(s) => out.push(PackedValue::Text(s.clone())),
        Value::Array(items) => {
            if depth >= MAX_NESTING {
                return Err(CodecError::Encode(too_deep(field)));
            }
            out.push(PackedValue::List(entry_count(field, items.len())?));
            for item in items {
                flatten(field, item, depth + 1, out)?;
            }
        }
        Value::Object(map) => {
            if depth >= MAX_NESTING {
                return Err(CodecError::Encode(too_deep(field)));
            }
            out.push(PackedValue::Map(entry_count(field, map.len())?));
            for (key, item) in map {
                out.push(PackedValue::Text(key.clone()));
                flatten(field, item, depth + 1, out)?;
            }
        }
    }
    Ok(())
}

struct TokenReader<'a> {
    field: &'a str,
    tokens: std::vec::IntoIter<PackedValue>,
}

impl TokenReader<'_> {
    fn malformed(&self, reason: &str) -> CodecError {
        CodecError::Decode(format!("field '{}': {}", self.field, reason))
    }

    fn enter(&self, depth: usize) -> CodecResult<()> {
        if depth >= MAX_NESTING {
            return Err(CodecError::Decode(too_deep(self.field)));
        }
        Ok(())
    }

    fn read_value(&mut self, depth: usize) -> CodecResult<Value> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| self.malformed("value is truncated"))?;

        Ok(match token {
            PackedValue::Null => Value::Null,
            PackedValue::Bool(b) => Value::Bool(b),
            PackedValue::Int(i) => Value::from(i),
            PackedValue::UInt(u) => Value::from(u),
            PackedValue::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| CodecError::NonFiniteFloat {
                    field: self.field.to_string(),
                })?,
            PackedValue::Text(s) => Value::String(s),
            PackedValue::List(count) => {
                self.enter(depth)?;
                // Counts come from the blob; never reserve more than remains
                let mut items = Vec::with_capacity((count as usize).min(self.tokens.len()));
                for _ in 0..count {
                    items.push(self.read_value(depth + 1)?);
                }
                Value::Array(items)
            }
            PackedValue::Map(count) => {
                self.enter(depth)?;
                let mut map = Map::new();
                for _ in 0..count {
                    let key = match self.tokens.next() {
                        Some(PackedValue::Text(key)) => key,
                        _ => return Err(self.malformed("map key is not text")),
                    };
                    let item = self.read_value(depth + 1)?;
                    map.insert(key, item);
                }
                Value::Object(map)
            }
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PackedBlob {
    fields: Vec<(String, Vec<PackedValue>)>,
}

/// Serializes and compresses the packed fields to raw bytes
pub fn pack_bytes<'a, I>(fields: I) -> CodecResult<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let blob = PackedBlob {
        fields: fields
            .into_iter()
            .map(|(name, value)| Ok((name.to_string(), PackedValue::tokens(name, value)?)))
            .collect::<CodecResult<Vec<_>>>()?,
    };

    let encoded = bincode::serde::encode_to_vec(&blob, bincode::config::standard())
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    Ok(lz4_flex::compress_prepend_size(&encoded))
}

/// Upper bound of the lz4 block format's expansion ratio
const MAX_EXPANSION: usize = 255;

/// Rejects size prefixes no valid lz4 block of this length could produce
fn check_declared_size(bytes: &[u8]) -> CodecResult<()> {
    let prefix: [u8; 4] = bytes
        .get(..4)
        .and_then(|p| p.try_into().ok())
        .ok_or_else(|| CodecError::Decompress("blob shorter than its size prefix".into()))?;
    let declared = u32::from_le_bytes(prefix) as usize;
    let limit = (bytes.len() - 4).saturating_mul(MAX_EXPANSION).saturating_add(16);
    if declared > limit {
        return Err(CodecError::Decompress(format!(
            "declared size {} exceeds what {} compressed bytes can hold",
            declared,
            bytes.len() - 4
        )));
    }
    Ok(())
}

/// Decompresses and deserializes raw blob bytes
pub fn unpack_bytes(bytes: &[u8]) -> CodecResult<Vec<(String, Value)>> {
    check_declared_size(bytes)?;
    let decompressed = lz4_flex::decompress_size_prepended(bytes)
        .map_err(|e| CodecError::Decompress(e.to_string()))?;

    let (blob, _): (PackedBlob, _) =
        bincode::serde::decode_from_slice(&decompressed, bincode::config::standard())
            .map_err(|e| CodecError::Decode(e.to_string()))?;

    blob.fields
        .into_iter()
        .map(|(name, tokens)| {
            let value = PackedValue::into_json(&name, tokens)?;
            Ok((name, value))
        })
        .collect()
}

/// Builds the text-encoded `p` value
pub fn pack<'a, I>(fields: I) -> CodecResult<String>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    Ok(STANDARD.encode(pack_bytes(fields)?))
}

/// Reads a text-encoded `p` value back into `(field, value)` pairs
pub fn unpack(blob: &str) -> CodecResult<Vec<(String, Value)>> {
    let bytes = STANDARD
        .decode(blob)
        .map_err(|e| CodecError::Base64(e.to_string()))?;
    unpack_bytes(&bytes)
}
