//! Shared record types for integration tests

#![allow(dead_code)]

use docpack::record::{from_value, to_value};
use docpack::{FieldError, FieldResult, KeyType, Record, RecordSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Implements `Record` for a struct whose listed fields are all
/// serde-convertible.
macro_rules! impl_record {
    ($ty:ident, $schema:expr, [$($field:ident),* $(,)?]) => {
        impl Record for $ty {
            fn schema() -> RecordSchema {
                $schema
            }

            fn read_field(&self, field: &str) -> FieldResult<Value> {
                $(
                    if field == stringify!($field) {
                        return to_value(field, &self.$field);
                    }
                )*
                Err(FieldError::Unknown(field.into()))
            }

            #[allow(unused_variables)]
            fn write_field(&mut self, field: &str, value: Value) -> FieldResult<()> {
                $(
                    if field == stringify!($field) {
                        self.$field = from_value(field, value)?;
                        return Ok(());
                    }
                )*
                Err(FieldError::Unknown(field.into()))
            }
        }
    };
}

// =============================================================================
// VALID TYPES
// =============================================================================

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub region: String,
    pub name: String,
    pub email: String,
    pub address: Address,
    pub loyalty_points: u32,
    pub balance: f64,
    pub tags: Vec<String>,
    pub etag: Option<String>,
}

impl_record!(
    Customer,
    RecordSchema::new()
        .table("customers")
        .identifier("customer_id", 0)
        .partition_key("region", 0)
        .searchable("name")
        .searchable_as("email", "mail")
        .packed("address")
        .packed("loyalty_points")
        .packed("balance")
        .packed("tags")
        .version("etag"),
    [customer_id, region, name, email, address, loyalty_points, balance, tags, etag]
);

pub fn sample_customer() -> Customer {
    Customer {
        customer_id: "C-1001".into(),
        region: "eu-west".into(),
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        address: Address {
            street: "12 Analytical Row".into(),
            city: "London".into(),
            zip: None,
        },
        loyalty_points: 42,
        balance: -17.25,
        tags: vec!["vip".into(), "early".into()],
        etag: None,
    }
}

/// Composite identifier and partition key
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Shipment {
    pub carrier: String,
    pub tracking_no: u64,
    pub warehouse: String,
    pub day: i64,
    pub weight_kg: f64,
    pub fragile: bool,
}

impl_record!(
    Shipment,
    RecordSchema::new()
        .table("shipments")
        .partition_key_path("/PK")
        .identifier_as("tracking_no", 1, KeyType::UInt)
        .identifier("carrier", 0)
        .partition_key("warehouse", 0)
        .partition_key_as("day", 1, KeyType::Int)
        .packed("weight_kg")
        .packed("fragile"),
    [carrier, tracking_no, warehouse, day, weight_kg, fragile]
);

/// One identifier and one packed field
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Memo {
    pub x: String,
    pub y: String,
}

impl_record!(
    Memo,
    RecordSchema::new().identifier("x", 0).packed("y"),
    [x, y]
);

/// No packed fields, so documents carry no `p`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tag {
    pub label: String,
    pub owner: String,
}

impl_record!(
    Tag,
    RecordSchema::new()
        .identifier("label", 0)
        .partition_key("owner", 0),
    [label, owner]
);

/// Shares field names and roles with `Memo`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoArchive {
    pub x: String,
    pub y: String,
}

impl_record!(
    MemoArchive,
    RecordSchema::new().table("memo_archive").identifier("x", 0).packed("y"),
    [x, y]
);

// =============================================================================
// INVALID TYPES
// =============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReservedId {
    pub id: String,
    pub body: String,
}

impl_record!(
    ReservedId,
    RecordSchema::new().searchable("id").packed("body"),
    [id, body]
);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReservedPk {
    pub key: String,
    pub region: String,
}

impl_record!(
    ReservedPk,
    RecordSchema::new()
        .identifier("key", 0)
        .searchable_as("region", "PK"),
    [key, region]
);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReservedP {
    pub p: String,
}

impl_record!(ReservedP, RecordSchema::new().searchable("p"), [p]);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DuplicateIdentifierOrder {
    pub first: String,
    pub second: String,
}

impl_record!(
    DuplicateIdentifierOrder,
    RecordSchema::new()
        .identifier("first", 2)
        .identifier("second", 2),
    [first, second]
);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DuplicatePartitionOrder {
    pub key: String,
    pub tenant: String,
    pub shard: String,
}

impl_record!(
    DuplicatePartitionOrder,
    RecordSchema::new()
        .identifier("key", 0)
        .partition_key("tenant", 0)
        .partition_key("shard", 0),
    [key, tenant, shard]
);

/// Optional text identifier
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Nickname {
    pub handle: Option<String>,
    pub display: String,
}

impl_record!(
    Nickname,
    RecordSchema::new().identifier("handle", 0).packed("display"),
    [handle, display]
);

/// Optional numeric identifier
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ticket {
    pub number: Option<i64>,
    pub note: String,
}

impl_record!(
    Ticket,
    RecordSchema::new()
        .identifier_as("number", 0, KeyType::Int)
        .packed("note"),
    [number, note]
);
