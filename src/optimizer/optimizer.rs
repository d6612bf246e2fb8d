//! Entity-document optimizer
//!
//! Entry point for registration and mapping. An [`Optimizer`] can be built
//! and passed around explicitly with [`Optimizer::new`], or installed once
//! per process with [`Optimizer::init`] and fetched with [`Optimizer::get`].
//!
//! Lifecycle of the process-wide instance:
//! - `get` before `init` fails with `NotInitialized`
//! - the first successful `init` constructs the instance exactly once, even
//!   under concurrent callers
//! - later `init` calls return the existing instance unchanged
//! - a failed `init` leaves the instance unset

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::{debug, info, warn};

use super::errors::{MapResult, MapperError};
use super::mapping::{self, Decoded};
use super::registry::TypeRegistry;
use crate::document::Document;
use crate::record::{Record, RecordType};
use crate::schema::SchemaDescriptor;

static INSTANCE: OnceLock<Optimizer> = OnceLock::new();
static INIT_GATE: Mutex<()> = Mutex::new(());

/// Registry of record types plus the mapping operations over it
#[derive(Debug, Default)]
pub struct Optimizer {
    registry: TypeRegistry,
}

impl Optimizer {
    /// Builds a standalone optimizer holding the given types.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::Schema` if any type fails validation.
    pub fn new(types: &[RecordType]) -> MapResult<Self> {
        Ok(Self {
            registry: TypeRegistry::with_types(types)?,
        })
    }

    /// Installs the process-wide optimizer, or returns the installed one.
    ///
    /// `types` is only used by the call that performs construction.
    pub fn init(types: &[RecordType]) -> MapResult<&'static Self> {
        if let Some(existing) = INSTANCE.get() {
            debug!("optimizer already initialized");
            return Ok(existing);
        }

        let _gate = INIT_GATE.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = INSTANCE.get() {
            return Ok(existing);
        }

        let optimizer = Self::new(types)?;
        info!(types = optimizer.registry.len(), "optimizer initialized");
        Ok(INSTANCE.get_or_init(|| optimizer))
    }

    /// Returns the process-wide optimizer.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::NotInitialized` if `init` never succeeded.
    pub fn get() -> MapResult<&'static Self> {
        INSTANCE.get().ok_or(MapperError::NotInitialized)
    }

    /// Registers additional types; already-registered types are skipped.
    ///
    /// Returns the number of types appended.
    pub fn configure_types(&self, types: &[RecordType]) -> MapResult<usize> {
        Ok(self.registry.configure_types(types)?)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> Vec<Arc<SchemaDescriptor>> {
        self.registry.descriptors()
    }

    /// Type -> descriptor mapping
    pub fn type_map(&self) -> HashMap<TypeId, Arc<SchemaDescriptor>> {
        self.registry.type_map()
    }

    /// Descriptor for `T`, if registered
    pub fn descriptor_of<T: Record>(&self) -> Option<Arc<SchemaDescriptor>> {
        self.registry.descriptor_of::<T>()
    }

    /// Descriptor for `T`, failing when it is not registered
    pub fn registered<T: Record>(&self) -> MapResult<Arc<SchemaDescriptor>> {
        self.descriptor_of::<T>()
            .ok_or_else(|| MapperError::TypeNotRegistered {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    /// Maps a registered record to a new document.
    ///
    /// # Errors
    ///
    /// - `TypeNotRegistered` if `T` was never registered
    /// - `Field` if a declared field cannot be read
    /// - `Codec` if a key field holds an unsupported value
    pub fn to_document<T: Record>(&self, record: &T) -> MapResult<Document> {
        let descriptor = self.registered::<T>()?;
        let document = mapping::encode(record, &descriptor)?;

        debug!(
            type_name = descriptor.type_name(),
            id = document.id().unwrap_or_default(),
            keys = document.len(),
            "record mapped to document"
        );

        Ok(document)
    }

    /// Maps a document onto a new `T`.
    ///
    /// # Errors
    ///
    /// - `EmptyDocument` if the document has no properties
    /// - `TypeNotRegistered` if `T` is valid but was never registered
    /// - `Codec` / `Field` if the document cannot be mapped onto `T`
    ///
    /// If `T`'s own schema is invalid, returns `Decoded::Defaulted` instead
    /// of an error.
    pub fn from_document<T: Record>(&self, document: &Document) -> MapResult<Decoded<T>> {
        if document.is_empty() {
            return Err(MapperError::EmptyDocument);
        }

        let descriptor = match self.descriptor_of::<T>() {
            Some(descriptor) => descriptor,
            None => {
                return match SchemaDescriptor::build(&RecordType::of::<T>()) {
                    Err(cause) => {
                        warn!(
                            type_name = std::any::type_name::<T>(),
                            code = cause.code(),
                            "decoding into invalid type, returning default"
                        );
                        Ok(Decoded::Defaulted {
                            value: T::default(),
                            cause,
                        })
                    }
                    Ok(_) => Err(MapperError::TypeNotRegistered {
                        type_name: std::any::type_name::<T>().to_string(),
                    }),
                };
            }
        };

        let record = mapping::decode(document, &descriptor)?;

        debug!(
            type_name = descriptor.type_name(),
            id = document.id().unwrap_or_default(),
            "document mapped to record"
        );

        Ok(Decoded::Record(record))
    }
}
