//! Per-shard storage.
//!
//! Each shard owns one [`BackendMap`]. The trait is deliberately small so the
//! locking protocol above it never depends on which table is underneath.

use std::hash::Hash;
use std::ops::ControlFlow;

mod dense;
mod simple;

pub use dense::DenseMap;
pub use simple::SimpleMap;

/// Minimal key/value store capability held by every shard.
///
/// Implementations are not synchronized; the owning shard's lock serializes
/// access.
pub trait BackendMap<K, V> {
    /// Insert or overwrite `key`, returning the previous value if any.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Look up `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Remove `key`, returning its value. Absent keys are a no-op.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Visit entries in unspecified order until `visit` breaks.
    ///
    /// Returns `Break` if the visitor stopped the walk early.
    fn for_each<F>(&self, visit: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Drop every entry at once.
    fn clear(&mut self);

    /// Check whether `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Check whether the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which backend each shard should be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// `std::collections::HashMap`.
    #[default]
    Simple,
    /// `hashbrown` swiss table, denser and with fewer probes per lookup.
    Dense,
}

/// Runtime-selected backend. Uses an enum to avoid boxing per shard.
#[derive(Debug)]
pub enum Backend<K, V> {
    /// See [`SimpleMap`].
    Simple(SimpleMap<K, V>),
    /// See [`DenseMap`].
    Dense(DenseMap<K, V>),
}

impl<K, V> Backend<K, V>
where
    K: Hash + Eq,
{
    /// Build an empty backend of `kind`, reserving `capacity` entries.
    pub fn new(kind: BackendKind, capacity: usize) -> Self {
        match kind {
            BackendKind::Simple => Backend::Simple(SimpleMap::with_capacity(capacity)),
            BackendKind::Dense => Backend::Dense(DenseMap::with_capacity(capacity)),
        }
    }

    /// The variant this backend was built as.
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Simple(_) => BackendKind::Simple,
            Backend::Dense(_) => BackendKind::Dense,
        }
    }
}

impl<K, V> BackendMap<K, V> for Backend<K, V>
where
    K: Hash + Eq,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self {
            Backend::Simple(map) => map.insert(key, value),
            Backend::Dense(map) => map.insert(key, value),
        }
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        match self {
            Backend::Simple(map) => map.get(key),
            Backend::Dense(map) => map.get(key),
        }
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        match self {
            Backend::Simple(map) => map.remove(key),
            Backend::Dense(map) => map.remove(key),
        }
    }

    fn for_each<F>(&self, visit: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        match self {
            Backend::Simple(map) => map.for_each(visit),
            Backend::Dense(map) => map.for_each(visit),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        match self {
            Backend::Simple(map) => map.len(),
            Backend::Dense(map) => map.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Backend::Simple(map) => map.clear(),
            Backend::Dense(map) => map.clear(),
        }
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        match self {
            Backend::Simple(map) => map.contains_key(key),
            Backend::Dense(map) => map.contains_key(key),
        }
    }
}
