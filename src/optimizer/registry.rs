//! Type registry
//!
//! Ordered list of schema descriptors plus a type -> descriptor mapping.
//!
//! - Registration appends; it never reorders or replaces
//! - Registering an already-known type is a no-op
//! - All new types of one call are validated before anything is appended
//! - Reads return snapshots and never observe a half-applied registration

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::record::{Record, RecordType};
use crate::schema::{SchemaDescriptor, SchemaResult};

#[derive(Debug, Default)]
struct RegistryState {
    descriptors: Vec<Arc<SchemaDescriptor>>,
    by_type: HashMap<TypeId, Arc<SchemaDescriptor>>,
}

/// Registry of record schema descriptors
#[derive(Debug, Default)]
pub struct TypeRegistry {
    state: RwLock<RegistryState>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given types, in order
    pub fn with_types(types: &[RecordType]) -> SchemaResult<Self> {
        let registry = Self::new();
        registry.configure_types(types)?;
        Ok(registry)
    }

    /// Registers additional record types.
    ///
    /// Returns the number of descriptors appended. Types already present are
    /// skipped without being re-derived.
    ///
    /// # Errors
    ///
    /// Returns the first `SchemaError` among the new types; in that case
    /// nothing is appended.
    pub fn configure_types(&self, types: &[RecordType]) -> SchemaResult<usize> {
        let pending: Vec<&RecordType> = {
            let state = self.read();
            let mut seen = HashSet::new();
            types
                .iter()
                .filter(|t| !state.by_type.contains_key(&t.type_id()))
                .filter(|t| seen.insert(t.type_id()))
                .collect()
        };

        if pending.is_empty() {
            debug!(requested = types.len(), "all types already registered");
            return Ok(0);
        }

        let built = pending
            .into_iter()
            .map(SchemaDescriptor::build)
            .collect::<SchemaResult<Vec<_>>>()?;

        let mut state = self.write();
        let mut appended = 0;
        for descriptor in built {
            // A concurrent writer may have registered the same type meanwhile
            if state.by_type.contains_key(&descriptor.type_id()) {
                continue;
            }
            let descriptor = Arc::new(descriptor);
            info!(
                type_name = descriptor.type_name(),
                table = descriptor.table_name(),
                position = state.descriptors.len(),
                "record type registered"
            );
            state
                .by_type
                .insert(descriptor.type_id(), Arc::clone(&descriptor));
            state.descriptors.push(descriptor);
            appended += 1;
        }

        Ok(appended)
    }

    /// Snapshot of the descriptors in registration order
    pub fn descriptors(&self) -> Vec<Arc<SchemaDescriptor>> {
        self.read().descriptors.clone()
    }

    /// Snapshot of the type -> descriptor mapping
    pub fn type_map(&self) -> HashMap<TypeId, Arc<SchemaDescriptor>> {
        self.read().by_type.clone()
    }

    /// Descriptor for a type id
    pub fn get(&self, type_id: TypeId) -> Option<Arc<SchemaDescriptor>> {
        self.read().by_type.get(&type_id).cloned()
    }

    /// Descriptor for a record type
    pub fn descriptor_of<T: Record>(&self) -> Option<Arc<SchemaDescriptor>> {
        self.get(TypeId::of::<T>())
    }

    /// Descriptor registered under a table name
    pub fn by_table(&self, table: &str) -> Option<Arc<SchemaDescriptor>> {
        self.read()
            .descriptors
            .iter()
            .find(|d| d.table_name() == table)
            .cloned()
    }

    pub fn contains<T: Record>(&self) -> bool {
        self.read().by_type.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.read().descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Descriptors are immutable and appends are applied in one critical
    // section, so a poisoned lock still guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
