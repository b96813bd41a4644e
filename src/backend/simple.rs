use super::BackendMap;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::ControlFlow;

/// Backend built on the standard library's `HashMap`.
///
/// Iteration order is unspecified and may change across mutations.
#[derive(Debug, Clone)]
pub struct SimpleMap<K, V> {
    map: HashMap<K, V>,
}

impl<K, V> SimpleMap<K, V>
where
    K: Hash + Eq,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for SimpleMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BackendMap<K, V> for SimpleMap<K, V>
where
    K: Hash + Eq,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    fn for_each<F>(&self, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        for (key, value) in &self.map {
            visit(key, value)?;
        }
        ControlFlow::Continue(())
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }
}
