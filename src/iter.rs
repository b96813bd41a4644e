use std::sync::Arc;

/// Owned snapshot of a map's entries.
///
/// Entries are cloned while the map is locked exclusively, so the snapshot is
/// a single consistent instant across every shard. No lock is held while the
/// iterator is consumed; later writes to the map are not reflected.
pub struct SnapshotIter<K, V> {
    entries: std::vec::IntoIter<(K, Arc<V>)>,
}

impl<K, V> SnapshotIter<K, V> {
    pub(crate) fn new(entries: Vec<(K, Arc<V>)>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for SnapshotIter<K, V> {
    type Item = (K, Arc<V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for SnapshotIter<K, V> {}

impl<K, V> std::fmt::Debug for SnapshotIter<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotIter")
            .field("remaining", &self.entries.len())
            .finish()
    }
}
