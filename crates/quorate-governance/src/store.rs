//! Namespaced state store
//!
//! Independent modules (facets) share one `StateStore`. Each module addresses
//! its private region through a [`NamespaceKey`] derived by hashing a stable
//! tag, so adding a module never shifts or overlaps another module's state.

use quorate_common::StorageError;
use std::any::Any;
use std::collections::HashMap;

/// Stable, collision-resistant address of a module's state region
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceKey([u8; 32]);

impl NamespaceKey {
    /// Derive the key for a human-readable tag
    pub fn from_tag(tag: &str) -> Self {
        Self(*blake3::hash(tag.as_bytes()).as_bytes())
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Debug for NamespaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NamespaceKey({})", hex::encode(&self.0[..8]))
    }
}

type Region = Box<dyn Any + Send + Sync>;

/// Shared state space holding one region per namespace
#[derive(Default)]
pub struct StateStore {
    regions: HashMap<NamespaceKey, Region>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of a region, `None` if it was never resolved
    pub fn get<T: Any>(&self, key: &NamespaceKey) -> Result<Option<&T>, StorageError> {
        match self.regions.get(key) {
            None => Ok(None),
            Some(region) => (**region)
                .downcast_ref::<T>()
                .map(Some)
                .ok_or_else(|| type_mismatch(key)),
        }
    }

    /// Mutable handle to a region, created zeroed (`T::default()`) on first use
    pub fn resolve<T: Any + Default + Send + Sync>(
        &mut self,
        key: &NamespaceKey,
    ) -> Result<&mut T, StorageError> {
        let region = self
            .regions
            .entry(*key)
            .or_insert_with(|| Box::new(T::default()));
        (**region)
            .downcast_mut::<T>()
            .ok_or_else(|| type_mismatch(key))
    }

    pub fn contains(&self, key: &NamespaceKey) -> bool {
        self.regions.contains_key(key)
    }

    /// Number of materialized regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("regions", &self.regions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Mutable access to a store with some namespaces held back
///
/// Handed out by [`SharedGovernance::write`](crate::SharedGovernance::write)
/// so sibling modules can keep their regions in the same store without
/// reaching the governance, ownership, or journal regions.
pub struct SiblingStore<'a> {
    store: &'a mut StateStore,
    reserved: &'a [NamespaceKey],
}

impl<'a> SiblingStore<'a> {
    pub(crate) fn new(store: &'a mut StateStore, reserved: &'a [NamespaceKey]) -> Self {
        Self { store, reserved }
    }

    fn check(&self, key: &NamespaceKey) -> Result<(), StorageError> {
        if self.reserved.contains(key) {
            return Err(StorageError::ReservedNamespace {
                namespace: key.to_string(),
            });
        }
        Ok(())
    }

    pub fn get<T: Any>(&self, key: &NamespaceKey) -> Result<Option<&T>, StorageError> {
        self.check(key)?;
        self.store.get(key)
    }

    pub fn resolve<T: Any + Default + Send + Sync>(
        &mut self,
        key: &NamespaceKey,
    ) -> Result<&mut T, StorageError> {
        self.check(key)?;
        self.store.resolve(key)
    }

    pub fn contains(&self, key: &NamespaceKey) -> bool {
        self.store.contains(key)
    }
}

fn type_mismatch(key: &NamespaceKey) -> StorageError {
    StorageError::TypeMismatch {
        namespace: key.to_string(),
    }
}
