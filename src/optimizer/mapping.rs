//! Record <-> document mapping
//!
//! Encoding order: `id`, `PK`, searchable keys, `p`.
//! Decoding order: identifier fields, partition-key fields, searchable
//! fields, packed fields, version field.
//!
//! Neither direction mutates its input.

use serde_json::Value;
use tracing::warn;

use super::errors::MapResult;
use crate::document::{keys, packed, CodecError, Document};
use crate::record::Record;
use crate::schema::{KeyField, SchemaDescriptor, SchemaError, ID_KEY, PACKED_KEY, PARTITION_KEY};

/// Outcome of a decode that did not hard-fail.
///
/// `Defaulted` is returned instead of an error when the target type's own
/// schema is invalid, so bulk readers can skip such records without aborting.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The document was mapped onto a new record
    Record(T),
    /// The target type cannot be decoded; `value` is `T::default()`
    Defaulted { value: T, cause: SchemaError },
}

impl<T> Decoded<T> {
    /// The decoded record, or the default value on the soft-failure path
    pub fn into_inner(self) -> T {
        match self {
            Decoded::Record(value) | Decoded::Defaulted { value, .. } => value,
        }
    }

    /// The decoded record; `None` on the soft-failure path
    pub fn record(self) -> Option<T> {
        match self {
            Decoded::Record(value) => Some(value),
            Decoded::Defaulted { .. } => None,
        }
    }

    pub fn as_record(&self) -> Option<&T> {
        match self {
            Decoded::Record(value) => Some(value),
            Decoded::Defaulted { .. } => None,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Decoded::Defaulted { .. })
    }

    /// Why the soft-failure path was taken
    pub fn cause(&self) -> Option<&SchemaError> {
        match self {
            Decoded::Record(_) => None,
            Decoded::Defaulted { cause, .. } => Some(cause),
        }
    }
}

/// Composes the document `id` from a record's identifier fields
pub fn compose_identifier<T: Record>(record: &T, descriptor: &SchemaDescriptor) -> MapResult<String> {
    compose(record, descriptor.identifier_fields())
}

/// Composes the document `PK` from a record's partition-key fields
pub fn compose_partition_key<T: Record>(
    record: &T,
    descriptor: &SchemaDescriptor,
) -> MapResult<String> {
    compose(record, descriptor.partition_key_fields())
}

/// Splits an `id` value into `(field, value)` pairs
pub fn decompose_identifier(
    value: &str,
    descriptor: &SchemaDescriptor,
) -> MapResult<Vec<(String, Value)>> {
    decompose(ID_KEY, value, descriptor.identifier_fields())
}

/// Splits a `PK` value into `(field, value)` pairs
pub fn decompose_partition_key(
    value: &str,
    descriptor: &SchemaDescriptor,
) -> MapResult<Vec<(String, Value)>> {
    decompose(PARTITION_KEY, value, descriptor.partition_key_fields())
}

/// Builds the `p` blob from a record's packed fields.
///
/// Returns `None` when the type declares no packed fields.
pub fn pack_record<T: Record>(record: &T, descriptor: &SchemaDescriptor) -> MapResult<Option<String>> {
    let names = descriptor.packed_fields();
    if names.is_empty() {
        return Ok(None);
    }

    let values = names
        .iter()
        .map(|name| record.read_field(name))
        .collect::<Result<Vec<_>, _>>()?;

    let blob = packed::pack(names.iter().map(String::as_str).zip(values.iter()))?;
    Ok(Some(blob))
}

/// Reads a `p` blob, keeping only fields the descriptor declares as packed
pub fn unpack_fields(blob: &str, descriptor: &SchemaDescriptor) -> MapResult<Vec<(String, Value)>> {
    let declared = descriptor.packed_fields();
    let mut fields = packed::unpack(blob)?;

    fields.retain(|(name, _)| {
        let known = declared.iter().any(|d| d == name);
        if !known {
            warn!(
                type_name = descriptor.type_name(),
                field = %name,
                "skipping undeclared packed field"
            );
        }
        known
    });

    Ok(fields)
}

/// Maps a record onto a new document using its descriptor
pub fn encode<T: Record>(record: &T, descriptor: &SchemaDescriptor) -> MapResult<Document> {
    let mut document = Document::new();

    document.insert(
        ID_KEY,
        Value::String(compose_identifier(record, descriptor)?),
    );
    document.insert(
        PARTITION_KEY,
        Value::String(compose_partition_key(record, descriptor)?),
    );

    for searchable in descriptor.searchable_fields() {
        let value = record.read_field(&searchable.field)?;
        document.insert(searchable.document_key.clone(), value);
    }

    if let Some(blob) = pack_record(record, descriptor)? {
        document.insert(PACKED_KEY, Value::String(blob));
    }

    Ok(document)
}

/// Maps a document onto a new record using its descriptor.
///
/// Keys missing from the document leave the corresponding fields at their
/// default values.
pub fn decode<T: Record>(document: &Document, descriptor: &SchemaDescriptor) -> MapResult<T> {
    let mut record = T::default();

    if let Some(id) = document.get(ID_KEY) {
        let id = expect_str(ID_KEY, id)?;
        assign(&mut record, decompose_identifier(id, descriptor)?)?;
    }

    if let Some(pk) = document.get(PARTITION_KEY) {
        let pk = expect_str(PARTITION_KEY, pk)?;
        assign(&mut record, decompose_partition_key(pk, descriptor)?)?;
    }

    for searchable in descriptor.searchable_fields() {
        if let Some(value) = document.get(&searchable.document_key) {
            record.write_field(&searchable.field, value.clone())?;
        }
    }

    if let Some(blob) = document.get(PACKED_KEY) {
        let blob = expect_str(PACKED_KEY, blob)?;
        assign(&mut record, unpack_fields(blob, descriptor)?)?;
    }

    if let (Some(field), Some(etag)) = (descriptor.version_field(), document.etag()) {
        record.write_field(field, Value::String(etag.to_string()))?;
    }

    Ok(record)
}

fn compose<T: Record>(record: &T, fields: &[KeyField]) -> MapResult<String> {
    let values = fields
        .iter()
        .map(|f| record.read_field(&f.name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(keys::compose_key(fields, &values)?)
}

fn decompose(
    key: &'static str,
    value: &str,
    fields: &[KeyField],
) -> MapResult<Vec<(String, Value)>> {
    let values = keys::decompose_key(key, fields, value)?;
    Ok(fields
        .iter()
        .map(|f| f.name.clone())
        .zip(values)
        .collect())
}

fn assign<T: Record>(record: &mut T, fields: Vec<(String, Value)>) -> MapResult<()> {
    for (name, value) in fields {
        record.write_field(&name, value)?;
    }
    Ok(())
}

fn expect_str<'a>(key: &'static str, value: &'a Value) -> MapResult<&'a str> {
    value.as_str().ok_or_else(|| {
        CodecError::MalformedKey {
            key,
            reason: format!(
                "expected a string, got {}",
                crate::document::json_type_name(value)
            ),
        }
        .into()
    })
}
