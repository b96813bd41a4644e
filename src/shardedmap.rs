use crate::backend::BackendKind;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::hash::ShardHasher;
use crate::iter::SnapshotIter;
use crate::router::ShardRouter;
use crate::shard::Shard;
use crate::stats::{Diagnostics, ShardOps, Stats};
use parking_lot::RwLock;
use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::debug;

/// Which shards a per-shard walk should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardTarget {
    /// Every shard, with the same locking as [`ShardedMap::for_each`].
    All,
    /// One shard by index.
    Index(usize),
}

impl From<usize> for ShardTarget {
    fn from(index: usize) -> Self {
        ShardTarget::Index(index)
    }
}

/// Concurrent hash-sharded map.
///
/// Keys are spread over a fixed number of shards, each with its own lock, so
/// operations on different shards don't block each other. A top-level lock
/// sits above the shards: per-key operations take it shared, while
/// [`clear`](Self::clear), [`for_each`](Self::for_each) and
/// [`iter_snapshot`](Self::iter_snapshot) take it exclusively and therefore
/// see (and act on) the whole map at a single instant.
///
/// Locks are always taken top first, then shard, and are never re-entrant.
/// Visitors passed to the iteration methods must not call back into the same
/// map, and a visitor that never returns stalls every other caller.
///
/// Values are stored behind `Arc<V>` so reads can share them without copying.
///
/// # Example
///
/// ```rust
/// use shardedmap::{BackendKind, ShardedMap};
///
/// let map = ShardedMap::new(4, BackendKind::Simple)?;
/// map.insert("a", 1);
/// map.insert("b", 2);
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&"a").as_deref(), Some(&1));
///
/// map.remove(&"a");
/// assert!(map.get(&"a").is_none());
/// assert_eq!(map.len(), 1);
/// # Ok::<(), shardedmap::Error>(())
/// ```
pub struct ShardedMap<K, V> {
    shards: Box<[Shard<K, V>]>,
    router: ShardRouter,
    hasher: ShardHasher,
    top: RwLock<()>,
}

impl<K, V> ShardedMap<K, V>
where
    K: Hash + Eq,
{
    /// Create a map with `shard_count` shards of the given backend.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when `shard_count` is zero.
    pub fn new(shard_count: usize, backend: BackendKind) -> Result<Self> {
        Self::with_config(Config::new().shard_count(shard_count).backend(backend))
    }

    /// Create a map from a full configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Builds from an already validated config.
    fn build(config: Config) -> Self {
        let shard_count = config.shard_count;
        let shards = (0..shard_count)
            .map(|_| Shard::new(config.backend, config.capacity_per_shard))
            .collect();

        debug!(
            shard_count,
            backend = ?config.backend,
            hash_function = ?config.hash_function,
            capacity_per_shard = config.capacity_per_shard,
            "sharded map constructed"
        );

        Self {
            shards,
            router: ShardRouter::new(shard_count as u32),
            hasher: config.create_hasher(),
            top: RwLock::new(()),
        }
    }

    /// Shard index `key` routes to. Stable for the lifetime of the map.
    #[inline]
    pub fn shard_index(&self, key: &K) -> usize {
        self.router.route(self.hasher.hash_key(key))
    }

    #[inline]
    fn shard_for(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.shard_index(key)]
    }

    /// Insert a key-value pair. Returns the old value if the key existed.
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    ///
    /// let map = ShardedMap::default();
    /// assert!(map.insert("key", "value").is_none());
    /// assert_eq!(*map.insert("key", "new_value").unwrap(), "value");
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let _top = self.top.read();
        self.shard_for(&key).insert(key, value)
    }

    /// Get a value by key. Returns an `Arc<V>` so you can share it without copying.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let _top = self.top.read();
        self.shard_for(key).get(key)
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        let _top = self.top.read();
        self.shard_for(key).contains_key(key)
    }

    /// Remove a key-value pair, returning the value if it existed.
    ///
    /// Removing an absent key does nothing.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let _top = self.top.read();
        self.shard_for(key).remove(key)
    }

    /// Total number of entries across all shards.
    ///
    /// Shards are counted one after another, so concurrent writers can make
    /// the result a total that never existed at any single instant.
    pub fn len(&self) -> usize {
        let _top = self.top.read();
        self.shards.iter().map(Shard::len).sum()
    }

    /// Check if the map is empty. Same consistency as [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        let _top = self.top.read();
        self.shards.iter().all(Shard::is_empty)
    }

    /// Remove every entry from every shard.
    ///
    /// Holds the top lock exclusively, so no other operation interleaves.
    pub fn clear(&self) {
        let _top = self.top.write();
        let mut removed = 0;
        for shard in self.shards.iter() {
            removed += shard.len();
            shard.clear();
        }
        debug!(shard_count = self.shards.len(), removed, "cleared all shards");
    }

    /// Visit every entry, shard by shard, until `visit` breaks.
    ///
    /// Holds the top lock exclusively for the whole walk, blocking all other
    /// operations. Order within a shard is unspecified. Returns `Break` if the
    /// visitor stopped early, in which case later shards are skipped.
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    /// use std::ops::ControlFlow;
    ///
    /// let map = ShardedMap::default();
    /// for i in 0..10 {
    ///     map.insert(i, i * 2);
    /// }
    ///
    /// let mut seen = 0;
    /// let flow = map.for_each(|_, _| {
    ///     seen += 1;
    ///     if seen == 3 {
    ///         ControlFlow::Break(())
    ///     } else {
    ///         ControlFlow::Continue(())
    ///     }
    /// });
    /// assert!(flow.is_break());
    /// assert_eq!(seen, 3);
    /// ```
    pub fn for_each<F>(&self, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        let _top = self.top.write();
        for shard in self.shards.iter() {
            shard.for_each(&mut visit)?;
        }
        ControlFlow::Continue(())
    }

    /// Visit the entries of a single shard, or of all shards for
    /// [`ShardTarget::All`].
    ///
    /// A single-shard walk only takes the top lock shared, so other shards
    /// stay available. An index outside `[0, num_shards())` fails with
    /// [`Error::ShardIndexOutOfRange`] before anything is visited.
    pub fn for_each_in_shard<F>(
        &self,
        target: impl Into<ShardTarget>,
        mut visit: F,
    ) -> Result<ControlFlow<()>>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        let index = match target.into() {
            ShardTarget::All => return Ok(self.for_each(visit)),
            ShardTarget::Index(index) => index,
        };

        let shard = self.shards.get(index).ok_or(Error::ShardIndexOutOfRange {
            index,
            shard_count: self.shards.len(),
        })?;

        let _top = self.top.read();
        Ok(shard.for_each(&mut visit))
    }

    /// Clone every entry into an owned iterator.
    ///
    /// Taken under the exclusive top lock, so the snapshot is consistent
    /// across shards.
    pub fn iter_snapshot(&self) -> SnapshotIter<K, V>
    where
        K: Clone,
    {
        let _top = self.top.write();
        let mut entries = Vec::new();
        for shard in self.shards.iter() {
            shard.collect_into(&mut entries);
        }
        SnapshotIter::new(entries)
    }

    /// Number of shards. Fixed at construction.
    #[inline]
    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    /// Backend every shard was built with.
    pub fn backend_kind(&self) -> BackendKind {
        self.shards[0].kind()
    }

    /// Number of entries in each shard, in shard order.
    pub fn shard_loads(&self) -> Vec<usize> {
        let _top = self.top.read();
        self.shards.iter().map(Shard::len).collect()
    }

    /// Get detailed statistics about the map and its shards.
    pub fn stats(&self) -> Stats {
        let _top = self.top.read();
        let shard_sizes: Vec<usize> = self.shards.iter().map(Shard::len).collect();
        let operations: Vec<ShardOps> = self.shards.iter().map(Shard::stats).collect();
        let size = shard_sizes.iter().sum();

        Stats {
            size,
            shard_sizes,
            operations,
        }
    }

    /// Load-balance summary derived from [`stats`](Self::stats).
    pub fn diagnostics(&self) -> Diagnostics {
        self.stats().into()
    }
}

impl<K, V> Default for ShardedMap<K, V>
where
    K: Hash + Eq,
{
    /// A map with the default [`Config`].
    fn default() -> Self {
        Self::build(Config::default())
    }
}

impl<K, V> fmt::Debug for ShardedMap<K, V>
where
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedMap")
            .field("num_shards", &self.num_shards())
            .field("backend", &self.backend_kind())
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShardedMapBuilder;

    #[test]
    fn test_scenario() {
        let map = ShardedMap::new(4, BackendKind::Simple).unwrap();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a").as_deref(), Some(&1));

        map.remove(&"a");
        assert_eq!(map.get(&"a"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_zero_shards_rejected() {
        for kind in [BackendKind::Simple, BackendKind::Dense] {
            let err = ShardedMap::<String, i32>::new(0, kind).unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn test_num_shards_and_backend() {
        for n in [1, 3, 4, 10, 100] {
            let map = ShardedMap::<u64, u64>::new(n, BackendKind::Dense).unwrap();
            assert_eq!(map.num_shards(), n);
            assert_eq!(map.backend_kind(), BackendKind::Dense);
        }
    }

    #[test]
    fn test_shard_index_matches_placement() {
        let map = ShardedMap::new(8, BackendKind::Simple).unwrap();
        for i in 0..200u32 {
            map.insert(i, i);
        }

        let loads = map.shard_loads();
        let mut expected = vec![0; 8];
        for i in 0..200u32 {
            expected[map.shard_index(&i)] += 1;
        }
        assert_eq!(loads, expected);
    }

    #[test]
    fn test_for_each_in_shard_out_of_range() {
        let map: ShardedMap<&str, i32> = ShardedMap::new(4, BackendKind::Simple).unwrap();
        map.insert("a", 1);

        let mut visited = 0;
        let err = map
            .for_each_in_shard(4, |_, _| {
                visited += 1;
                ControlFlow::Continue(())
            })
            .unwrap_err();
        assert_eq!(
            err,
            Error::ShardIndexOutOfRange {
                index: 4,
                shard_count: 4
            }
        );
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_for_each_in_shard_visits_only_that_shard() {
        let map = ShardedMap::new(4, BackendKind::Dense).unwrap();
        for i in 0..100u32 {
            map.insert(i, i);
        }

        for index in 0..map.num_shards() {
            let mut keys = Vec::new();
            let flow = map
                .for_each_in_shard(index, |k, _| {
                    keys.push(*k);
                    ControlFlow::Continue(())
                })
                .unwrap();
            assert!(flow.is_continue());
            assert_eq!(keys.len(), map.shard_loads()[index]);
            assert!(keys.iter().all(|k| map.shard_index(k) == index));
        }
    }

    #[test]
    fn test_debug_output() {
        let map: ShardedMap<u8, u8> = ShardedMapBuilder::new()
            .shard_count(3)
            .backend(BackendKind::Dense)
            .build()
            .unwrap();
        let rendered = format!("{:?}", map);
        assert!(rendered.contains("num_shards: 3"));
        assert!(rendered.contains("Dense"));
    }
}
