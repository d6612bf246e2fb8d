//! Record store integration tests
//!
//! Drives the mapper through the in-memory document store.

mod fixtures;

use std::sync::{Arc, Barrier};
use std::thread;

use docpack::record::RecordType;
use docpack::store::{
    ensure_collection, CollectionSpec, DocumentStore, InMemoryDocumentStore, RecordStore,
    StoreConfig, StoreError, StoreResult,
};
use docpack::Document;
use docpack::Optimizer;
use fixtures::*;

fn setup(config: StoreConfig) -> (Optimizer, Arc<InMemoryDocumentStore>, StoreConfig) {
    let optimizer = Optimizer::new(&[
        RecordType::of::<Customer>(),
        RecordType::of::<Shipment>(),
        RecordType::of::<Memo>(),
    ])
    .unwrap();
    let store = Arc::new(InMemoryDocumentStore::new(config.database.clone()));
    (optimizer, store, config)
}

// =============================================================================
// COLLECTION PROVISIONING
// =============================================================================

#[test]
fn test_collection_created_on_first_save() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop").with_throughput("customers", 1000));
    let records = RecordStore::new(&optimizer, store.clone(), config);

    assert!(!store.collection_exists("customers").unwrap());
    records.save(&sample_customer()).unwrap();

    let spec = store.collection_spec("customers").unwrap().unwrap();
    assert_eq!(spec.partition_key_path, "/PK");
    assert_eq!(spec.throughput, Some(1000));
}

#[test]
fn test_ensure_collection_reports_creation_once() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop"));
    let descriptor = optimizer.descriptor_of::<Memo>().unwrap();

    assert!(ensure_collection(store.as_ref(), &descriptor, &config).unwrap());
    assert!(!ensure_collection(store.as_ref(), &descriptor, &config).unwrap());

    let spec = store.collection_spec("Memo").unwrap().unwrap();
    assert_eq!(spec.throughput, Some(400));
}

#[test]
fn test_auto_create_disabled() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop").with_auto_create(false));
    let records = RecordStore::new(&optimizer, store.clone(), config);

    let err = records.save(&sample_customer()).unwrap_err();
    assert_eq!(err, StoreError::AutoCreateDisabled("customers".into()));
    assert!(!store.collection_exists("customers").unwrap());
}

/// Holds every existence check until all callers have made one, so each
/// of them goes on to create the collection.
struct LockstepStore {
    inner: InMemoryDocumentStore,
    checks: Barrier,
}

impl DocumentStore for LockstepStore {
    fn collection_exists(&self, collection: &str) -> StoreResult<bool> {
        let exists = self.inner.collection_exists(collection)?;
        self.checks.wait();
        Ok(exists)
    }

    fn create_collection(&self, spec: &CollectionSpec) -> StoreResult<()> {
        self.inner.create_collection(spec)
    }

    fn upsert(&self, collection: &str, document: Document) -> StoreResult<Document> {
        self.inner.upsert(collection, document)
    }

    fn read(&self, collection: &str, id: &str, partition_key: &str) -> StoreResult<Option<Document>> {
        self.inner.read(collection, id, partition_key)
    }
}

#[test]
fn test_concurrent_first_saves_share_one_collection() {
    const WRITERS: usize = 4;

    let optimizer = Optimizer::new(&[RecordType::of::<Memo>()]).unwrap();
    let store = Arc::new(LockstepStore {
        inner: InMemoryDocumentStore::new("shop"),
        checks: Barrier::new(WRITERS),
    });

    thread::scope(|scope| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let records = RecordStore::new(&optimizer, store.clone(), StoreConfig::new("shop"));
                scope.spawn(move || {
                    records.save(&Memo {
                        x: format!("m{}", i),
                        y: "hello".into(),
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
    });

    assert_eq!(store.inner.count("Memo").unwrap(), WRITERS);
}

// =============================================================================
// SAVE AND LOAD
// =============================================================================

#[test]
fn test_save_then_load() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop"));
    let records = RecordStore::new(&optimizer, store, config);
    let customer = sample_customer();

    let saved = records.save(&customer).unwrap();
    let etag = saved.etag.clone().unwrap();
    assert!(etag.starts_with('"'));

    let loaded: Customer = records.load("C-1001", "eu-west").unwrap().unwrap();
    assert_eq!(loaded.etag.as_deref(), Some(etag.as_str()));

    let mut expected = customer;
    expected.etag = Some(etag);
    assert_eq!(loaded, expected);
}

#[test]
fn test_resave_changes_etag() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop"));
    let records = RecordStore::new(&optimizer, store.clone(), config);

    let first = records.save(&sample_customer()).unwrap();
    let mut changed = first.clone();
    changed.loyalty_points += 10;
    let second = records.save(&changed).unwrap();

    assert_ne!(first.etag, second.etag);
    assert_eq!(second.loyalty_points, 52);
    assert_eq!(store.count("customers").unwrap(), 1);
}

#[test]
fn test_composite_key_load() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop"));
    let records = RecordStore::new(&optimizer, store, config);
    let shipment = Shipment {
        carrier: "ups".into(),
        tracking_no: 55,
        warehouse: "lhr".into(),
        day: 4,
        weight_kg: 0.75,
        fragile: true,
    };

    records.save(&shipment).unwrap();
    let (id, pk) = records.key_of(&shipment).unwrap();
    assert_eq!(id, "3:ups2:55");
    assert_eq!(pk, "3:lhr1:4");

    let loaded: Shipment = records.load(&id, &pk).unwrap().unwrap();
    assert_eq!(loaded, shipment);
}

#[test]
fn test_load_missing_document() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop"));
    let records = RecordStore::new(&optimizer, store, config);

    let loaded: Option<Memo> = records.load("nope", "").unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_unregistered_type_rejected() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop"));
    let records = RecordStore::new(&optimizer, store, config);

    let err = records.save(&Tag::default()).unwrap_err();
    assert_eq!(err.code(), "DOCPACK_TYPE_NOT_REGISTERED");
}

#[test]
fn test_stored_document_carries_store_fields() {
    let (optimizer, store, config) = setup(StoreConfig::new("shop"));
    let records = RecordStore::new(&optimizer, store.clone(), config);

    records
        .save(&Memo {
            x: "abc".into(),
            y: "hello".into(),
        })
        .unwrap();

    let doc = store.read("Memo", "abc", "").unwrap().unwrap();
    assert_eq!(doc.id(), Some("abc"));
    assert!(doc.etag().is_some());
    assert!(doc.timestamp().is_some());
    assert_eq!(
        doc.get("_self").and_then(|v| v.as_str()),
        Some("dbs/shop/colls/Memo/docs/0000000000000001")
    );
}
