//! Record model
//!
//! A record is an application type mapped to and from a [`Document`].
//! There is no runtime reflection: each record type describes its fields
//! through [`Record::schema`] and exposes them by name through
//! [`Record::read_field`] / [`Record::write_field`].
//!
//! Field values travel as `serde_json::Value`, so any serde-compatible field
//! type can be stored. [`to_value`] and [`from_value`] do the conversion.
//!
//! [`Document`]: crate::document::Document

use std::any::TypeId;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::schema::RecordSchema;

/// Result type for field accessors
pub type FieldResult<T> = Result<T, FieldError>;

/// Field accessor errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Unknown field '{0}'")]
    Unknown(String),

    #[error("Field '{field}' could not be converted: {reason}")]
    Conversion { field: String, reason: String },
}

impl FieldError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Unknown(_) => "DOCPACK_UNKNOWN_FIELD",
            FieldError::Conversion { .. } => "DOCPACK_FIELD_CONVERSION",
        }
    }

    /// Returns the field name the error refers to
    pub fn field(&self) -> &str {
        match self {
            FieldError::Unknown(field) => field,
            FieldError::Conversion { field, .. } => field,
        }
    }
}

/// A typed application value that can be mapped to a document.
///
/// Implementations list their fields once in [`Record::schema`]. Every field
/// named there must be readable and writable by name.
///
/// ```ignore
/// #[derive(Default)]
/// struct Order { order_id: String, customer: String, total: u64 }
///
/// impl Record for Order {
///     fn schema() -> RecordSchema {
///         RecordSchema::new()
///             .identifier("order_id", 0)
///             .partition_key("customer", 0)
///             .packed("total")
///     }
///
///     fn read_field(&self, field: &str) -> FieldResult<Value> {
///         match field {
///             "order_id" => to_value(field, &self.order_id),
///             "customer" => to_value(field, &self.customer),
///             "total" => to_value(field, &self.total),
///             _ => Err(FieldError::Unknown(field.into())),
///         }
///     }
///
///     fn write_field(&mut self, field: &str, value: Value) -> FieldResult<()> {
///         match field {
///             "order_id" => self.order_id = from_value(field, value)?,
///             "customer" => self.customer = from_value(field, value)?,
///             "total" => self.total = from_value(field, value)?,
///             _ => return Err(FieldError::Unknown(field.into())),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Record: Default + Send + Sync + 'static {
    /// Field-role table for this type
    fn schema() -> RecordSchema;

    /// Reads the current value of a declared field
    fn read_field(&self, field: &str) -> FieldResult<Value>;

    /// Assigns a value to a declared field
    fn write_field(&mut self, field: &str, value: Value) -> FieldResult<()>;
}

/// Converts a typed field into its carried value
pub fn to_value<T: Serialize + ?Sized>(field: &str, value: &T) -> FieldResult<Value> {
    serde_json::to_value(value).map_err(|e| FieldError::Conversion {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Converts a carried value back into a typed field
pub fn from_value<T: DeserializeOwned>(field: &str, value: Value) -> FieldResult<T> {
    serde_json::from_value(value).map_err(|e| FieldError::Conversion {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Handle to a record type, used when registering types.
#[derive(Clone, Copy)]
pub struct RecordType {
    type_id: TypeId,
    type_name: &'static str,
    schema: fn() -> RecordSchema,
}

impl RecordType {
    /// Handle for `T`
    pub fn of<T: Record>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            schema: T::schema,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path or generic arguments
    pub fn simple_name(&self) -> &'static str {
        simple_type_name(self.type_name)
    }

    /// Builds the declared field-role table
    pub fn schema(&self) -> RecordSchema {
        (self.schema)()
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for RecordType {}

fn simple_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_type_name() {
        assert_eq!(simple_type_name("app::model::Order"), "Order");
        assert_eq!(simple_type_name("Order"), "Order");
        assert_eq!(simple_type_name("app::Wrapper<app::Order>"), "Wrapper");
    }

    #[test]
    fn test_value_helpers() {
        let value = to_value("count", &42u32).unwrap();
        assert_eq!(value, Value::from(42));

        let back: u32 = from_value("count", value).unwrap();
        assert_eq!(back, 42);
    }

    #[test]
    fn test_conversion_error_names_field() {
        let err = from_value::<u32>("count", Value::from("nope")).unwrap_err();
        assert_eq!(err.field(), "count");
        assert_eq!(err.code(), "DOCPACK_FIELD_CONVERSION");
    }
}
