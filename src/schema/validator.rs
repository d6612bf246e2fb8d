//! Registration-time schema checks
//!
//! Rules:
//! - Order indices are unique within the identifier group
//! - Order indices are unique within the partition-key group
//! - No searchable field maps to a reserved document key
//! - No two searchable fields map to the same document key
//!
//! All checks are pure: they run before the registry is touched.

use std::collections::HashMap;

use super::errors::{KeyGroup, SchemaError, SchemaResult};

/// Document key holding the composed identifier
pub const ID_KEY: &str = "id";
/// Document key holding the composed partition key
pub const PARTITION_KEY: &str = "PK";
/// Document key holding the packed blob
pub const PACKED_KEY: &str = "p";
/// Store-managed version marker
pub const ETAG_KEY: &str = "_etag";
/// Store-managed internal resource id
pub const RID_KEY: &str = "_rid";
/// Store-managed self link
pub const SELF_KEY: &str = "_self";
/// Store-managed attachments marker
pub const ATTACHMENTS_KEY: &str = "_attachments";
/// Store-managed last-modified timestamp (unix seconds)
pub const TIMESTAMP_KEY: &str = "_ts";

/// Document keys no searchable field may use
pub const RESERVED_KEYS: [&str; 8] = [
    ID_KEY,
    PARTITION_KEY,
    PACKED_KEY,
    ETAG_KEY,
    RID_KEY,
    SELF_KEY,
    ATTACHMENTS_KEY,
    TIMESTAMP_KEY,
];

/// Returns whether a document key is reserved
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Checks that no two fields in a key group share an order index.
///
/// `fields` is `(field name, order)` in declaration order. The error names the
/// first-declared field, then the colliding one.
pub fn check_unique_orders<'a, I>(group: KeyGroup, fields: I, type_name: &str) -> SchemaResult<()>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for (name, order) in fields {
        if let Some(first) = seen.insert(order, name) {
            return Err(SchemaError::duplicate_order(group, first, name, order, type_name));
        }
    }
    Ok(())
}

/// Checks searchable document keys against the reserved set and each other.
///
/// `fields` is `(field name, document key)` in declaration order.
pub fn check_searchable_keys<'a, I>(fields: I, type_name: &str) -> SchemaResult<()>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (field, key) in fields {
        if is_reserved_key(key) {
            return Err(SchemaError::ReservedSearchableKey {
                key: key.to_string(),
                field: field.to_string(),
                type_name: type_name.to_string(),
            });
        }
        if let Some(first) = seen.insert(key, field) {
            return Err(SchemaError::DuplicateDocumentKey {
                key: key.to_string(),
                first: first.to_string(),
                second: field.to_string(),
                type_name: type_name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keys() {
        for key in ["id", "PK", "p", "_etag", "_rid", "_self", "_attachments", "_ts"] {
            assert!(is_reserved_key(key), "{} should be reserved", key);
        }
        assert!(!is_reserved_key("pk"));
        assert!(!is_reserved_key("ID"));
        assert!(!is_reserved_key("status"));
    }

    #[test]
    fn test_unique_orders_pass() {
        let fields = [("a", 0), ("b", 1), ("c", 2)];
        assert!(check_unique_orders(KeyGroup::Identifier, fields, "T").is_ok());
    }

    #[test]
    fn test_duplicate_order_names_both_fields() {
        let fields = [("a", 0), ("b", 1), ("c", 1)];
        let err = check_unique_orders(KeyGroup::Identifier, fields, "T").unwrap_err();
        assert_eq!(
            err,
            SchemaError::IdentifierDuplicateOrder {
                first: "b".into(),
                second: "c".into(),
                order: 1,
                type_name: "T".into(),
            }
        );
    }

    #[test]
    fn test_reserved_searchable_key_rejected() {
        let err = check_searchable_keys([("status", "status"), ("legacy", "PK")], "T").unwrap_err();
        assert_eq!(err.code(), "DOCPACK_RESERVED_SEARCHABLE_KEY");
        assert!(err.to_string().contains("legacy"));
    }

    #[test]
    fn test_duplicate_document_key_rejected() {
        let err = check_searchable_keys([("a", "k"), ("b", "k")], "T").unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateDocumentKey { .. }));
    }
}
