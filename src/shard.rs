use crate::backend::{Backend, BackendKind, BackendMap};
use crate::stats::{ShardOps, ShardStats};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::hash::Hash;
use std::ops::ControlFlow;
use std::sync::Arc;

/// A single shard: one backend behind one read-write lock.
///
/// The lock only serializes access to this shard's backend. Coordination with
/// sibling shards is the map's job.
pub(crate) struct Shard<K, V> {
    backend: RwLock<Backend<K, Arc<V>>>,
    stats: ShardStats,
}

impl<K, V> Shard<K, V>
where
    K: Hash + Eq,
{
    pub fn new(kind: BackendKind, capacity: usize) -> Self {
        Self {
            backend: RwLock::new(Backend::new(kind, capacity)),
            stats: ShardStats::new(),
        }
    }

    #[cfg(feature = "lock-timing")]
    #[inline]
    fn timed<G>(&self, acquire: impl FnOnce() -> G) -> G {
        let start = std::time::Instant::now();
        let guard = acquire();
        self.stats
            .record_lock_wait(start.elapsed().as_nanos().min(u64::MAX as u128) as u64);
        guard
    }

    #[cfg(not(feature = "lock-timing"))]
    #[inline]
    fn timed<G>(&self, acquire: impl FnOnce() -> G) -> G {
        acquire()
    }

    /// Acquire the shard lock in shared mode.
    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, Backend<K, Arc<V>>> {
        self.stats.record_lock_acquisition();
        self.timed(|| self.backend.read())
    }

    /// Acquire the shard lock exclusively.
    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, Backend<K, Arc<V>>> {
        self.stats.record_lock_acquisition();
        self.timed(|| self.backend.write())
    }

    /// Insert a key-value pair, returning the previous value if any.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let previous = self.write().insert(key, Arc::new(value));
        self.stats.record_write();
        previous
    }

    /// Get a value by key, returning an Arc to enable zero-copy access.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let result = self.read().get(key).cloned();
        if result.is_some() {
            self.stats.record_read();
        }
        result
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.read().contains_key(key)
    }

    /// Remove a key-value pair, returning the value if it existed.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let result = self.write().remove(key);
        if result.is_some() {
            self.stats.record_remove();
        }
        result
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// Walk this shard's entries under a shared lock until `visit` breaks.
    pub fn for_each<F>(&self, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        self.read().for_each(|key, value| visit(key, &**value))
    }

    /// Append clones of every entry to `out`.
    pub fn collect_into(&self, out: &mut Vec<(K, Arc<V>)>)
    where
        K: Clone,
    {
        let backend = self.read();
        out.reserve(backend.len());
        let _ = backend.for_each(|key, value| {
            out.push((key.clone(), Arc::clone(value)));
            ControlFlow::Continue(())
        });
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.read().kind()
    }

    /// Get a snapshot of statistics for this shard.
    pub fn stats(&self) -> ShardOps {
        self.stats.snapshot()
    }
}
