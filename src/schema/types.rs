//! Field declarations
//!
//! A [`RecordSchema`] is the explicit field-role table a record type hands to
//! the registry. Declaring it never fails; consistency is checked when the
//! registry derives a [`SchemaDescriptor`] from it.
//!
//! Roles:
//! - identifier: composed (by order) into the document `id`
//! - partition key: composed (by order) into the document `PK`
//! - searchable: stored as its own top-level document key
//! - packed: stored inside the compressed `p` blob (the default)
//! - version: receives the store etag on read, never written
//!
//! [`SchemaDescriptor`]: super::SchemaDescriptor

/// Canonical form of a key segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyType {
    /// UTF-8 text, used verbatim
    #[default]
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit unsigned integer
    UInt,
    /// 64-bit floating point
    Float,
    /// `true` / `false`
    Bool,
}

impl KeyType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::Int => "int",
            KeyType::UInt => "uint",
            KeyType::Float => "float",
            KeyType::Bool => "bool",
        }
    }
}

/// Role declared for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRole {
    Identifier { order: u32, key_type: KeyType },
    PartitionKey { order: u32, key_type: KeyType },
    Searchable { document_key: String },
    Packed,
    Version,
}

impl FieldRole {
    /// Short label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            FieldRole::Identifier { .. } => "identifier",
            FieldRole::PartitionKey { .. } => "partition key",
            FieldRole::Searchable { .. } => "searchable",
            FieldRole::Packed => "packed",
            FieldRole::Version => "version",
        }
    }

    /// Identifier and partition-key roles may share one field
    pub fn is_key(&self) -> bool {
        matches!(
            self,
            FieldRole::Identifier { .. } | FieldRole::PartitionKey { .. }
        )
    }
}

/// One declaration in a [`RecordSchema`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub role: FieldRole,
}

/// Declared field-role table for a record type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSchema {
    table: Option<String>,
    partition_key_path: Option<String>,
    fields: Vec<FieldDecl>,
}

impl RecordSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the table name (defaults to the type's simple name)
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    /// Override the store partition-key path (defaults to `/PK`)
    pub fn partition_key_path(mut self, path: impl Into<String>) -> Self {
        self.partition_key_path = Some(path.into());
        self
    }

    /// Declare a string identifier field
    pub fn identifier(self, name: impl Into<String>, order: u32) -> Self {
        self.identifier_as(name, order, KeyType::String)
    }

    /// Declare an identifier field with an explicit key type
    pub fn identifier_as(self, name: impl Into<String>, order: u32, key_type: KeyType) -> Self {
        self.declare(name, FieldRole::Identifier { order, key_type })
    }

    /// Declare a string partition-key field
    pub fn partition_key(self, name: impl Into<String>, order: u32) -> Self {
        self.partition_key_as(name, order, KeyType::String)
    }

    /// Declare a partition-key field with an explicit key type
    pub fn partition_key_as(
        self,
        name: impl Into<String>,
        order: u32,
        key_type: KeyType,
    ) -> Self {
        self.declare(name, FieldRole::PartitionKey { order, key_type })
    }

    /// Declare a searchable field stored under its own name
    pub fn searchable(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let document_key = name.clone();
        self.declare(name, FieldRole::Searchable { document_key })
    }

    /// Declare a searchable field stored under a different document key
    pub fn searchable_as(self, name: impl Into<String>, document_key: impl Into<String>) -> Self {
        self.declare(
            name,
            FieldRole::Searchable {
                document_key: document_key.into(),
            },
        )
    }

    /// Declare a packed field
    pub fn packed(self, name: impl Into<String>) -> Self {
        self.declare(name, FieldRole::Packed)
    }

    /// Declare a field without a role; it is packed
    pub fn field(self, name: impl Into<String>) -> Self {
        self.packed(name)
    }

    /// Declare the field that receives the store etag
    pub fn version(self, name: impl Into<String>) -> Self {
        self.declare(name, FieldRole::Version)
    }

    fn declare(mut self, name: impl Into<String>, role: FieldRole) -> Self {
        self.fields.push(FieldDecl {
            name: name.into(),
            role,
        });
        self
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn declared_partition_key_path(&self) -> Option<&str> {
        self.partition_key_path.as_deref()
    }

    /// Declarations in declaration order
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let schema = RecordSchema::new()
            .packed("b")
            .identifier("a", 0)
            .searchable("c");

        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_field_defaults_to_packed() {
        let schema = RecordSchema::new().field("notes");
        assert_eq!(schema.fields()[0].role, FieldRole::Packed);
    }

    #[test]
    fn test_searchable_uses_field_name_as_key() {
        let schema = RecordSchema::new().searchable("status");
        assert_eq!(
            schema.fields()[0].role,
            FieldRole::Searchable {
                document_key: "status".into()
            }
        );
    }

    #[test]
    fn test_overrides() {
        let schema = RecordSchema::new().table("orders").partition_key_path("/tenant");
        assert_eq!(schema.table_name(), Some("orders"));
        assert_eq!(schema.declared_partition_key_path(), Some("/tenant"));
    }

    #[test]
    fn test_key_type_names() {
        assert_eq!(KeyType::String.type_name(), "string");
        assert_eq!(KeyType::Int.type_name(), "int");
        assert_eq!(KeyType::UInt.type_name(), "uint");
        assert_eq!(KeyType::Float.type_name(), "float");
        assert_eq!(KeyType::Bool.type_name(), "bool");
        assert_eq!(KeyType::default(), KeyType::String);
    }

    #[test]
    fn test_role_labels() {
        assert!(FieldRole::Identifier { order: 0, key_type: KeyType::String }.is_key());
        assert!(FieldRole::PartitionKey { order: 0, key_type: KeyType::Int }.is_key());
        assert!(!FieldRole::Packed.is_key());
        assert_eq!(FieldRole::Version.label(), "version");
    }
}
