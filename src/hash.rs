use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Hash function used to route keys to shards.
///
/// Every map owns exactly one instance, seeded once at construction, so all
/// operations on that map agree on where a key lives. Uses an enum to avoid
/// trait object limitations with generics.
#[derive(Clone)]
pub enum ShardHasher {
    /// AHash keyed by a per-instance random state.
    AHash(ahash::RandomState),
    /// FxHash (unseeded, fastest, weakest distribution).
    #[cfg(feature = "fxhash")]
    FxHash,
}

impl ShardHasher {
    /// AHash with a fresh random seed.
    pub fn random() -> Self {
        ShardHasher::AHash(ahash::RandomState::new())
    }

    /// AHash with a fixed seed. Two hashers built from the same seed agree on
    /// every key.
    pub fn seeded(seed: u64) -> Self {
        ShardHasher::AHash(ahash::RandomState::with_seeds(
            seed,
            seed.rotate_left(16),
            seed.rotate_left(32),
            seed.rotate_left(48),
        ))
    }

    /// Hash a key to a 64-bit value.
    #[inline]
    pub fn hash_key<K: Hash + ?Sized>(&self, key: &K) -> u64 {
        match self {
            ShardHasher::AHash(state) => BuildHasher::hash_one(state, key),
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash => fxhash::hash64(key),
        }
    }
}

impl Default for ShardHasher {
    fn default() -> Self {
        Self::random()
    }
}

impl fmt::Debug for ShardHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShardHasher::AHash(_) => write!(f, "ShardHasher::AHash"),
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash => write!(f, "ShardHasher::FxHash"),
        }
    }
}
