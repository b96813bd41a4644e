use crate::backend::BackendKind;
use crate::error::Error;
use crate::hash::ShardHasher;

/// Default number of shards.
pub const DEFAULT_SHARD_COUNT: usize = 16;

/// Default entries reserved per shard at construction.
pub const DEFAULT_CAPACITY_PER_SHARD: usize = 1000;

/// Which hash function to use for shard assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// Use ahash (default, seeded per map instance).
    #[default]
    AHash,
    /// Use fxhash (faster, unseeded, potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

/// Configuration for a ShardedMap instance.
///
/// Setters never fail; the whole config is validated once when the map is
/// built.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) shard_count: usize,
    pub(crate) backend: BackendKind,
    pub(crate) hash_function: HashFunction,
    pub(crate) hash_seed: Option<u64>,
    pub(crate) capacity_per_shard: usize,
}

impl Config {
    /// Create a new config with defaults (16 shards, simple backend, ahash).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. Must be at least 1.
    pub fn shard_count(mut self, count: usize) -> Self {
        self.shard_count = count;
        self
    }

    /// Set the backend every shard is built with.
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.backend = kind;
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = hash_fn;
        self
    }

    /// Pin the ahash seed. Maps built with the same seed and shard count route
    /// every key to the same shard index.
    pub fn hash_seed(mut self, seed: u64) -> Self {
        self.hash_seed = Some(seed);
        self
    }

    /// Set initial capacity per shard. Total capacity will be approximately
    /// `capacity_per_shard * shard_count`.
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.capacity_per_shard = capacity;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.shard_count == 0 {
            return Err(Error::InvalidConfiguration {
                reason: "shard count must be at least 1",
            });
        }
        if u32::try_from(self.shard_count).is_err() {
            return Err(Error::InvalidConfiguration {
                reason: "shard count must fit in 32 bits",
            });
        }
        Ok(())
    }

    /// Build the hasher for one map instance.
    pub(crate) fn create_hasher(&self) -> ShardHasher {
        match self.hash_function {
            HashFunction::AHash => match self.hash_seed {
                Some(seed) => ShardHasher::seeded(seed),
                None => ShardHasher::random(),
            },
            #[cfg(feature = "fxhash")]
            HashFunction::FxHash => ShardHasher::FxHash,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            backend: BackendKind::Simple,
            hash_function: HashFunction::AHash,
            hash_seed: None,
            capacity_per_shard: DEFAULT_CAPACITY_PER_SHARD,
        }
    }
}

/// Builder for creating a ShardedMap with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ShardedMapBuilder {
    config: Config,
}

impl ShardedMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. Must be at least 1.
    pub fn shard_count(mut self, count: usize) -> Self {
        self.config = self.config.shard_count(count);
        self
    }

    /// Set the backend every shard is built with.
    pub fn backend(mut self, kind: BackendKind) -> Self {
        self.config = self.config.backend(kind);
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Pin the ahash seed.
    pub fn hash_seed(mut self, seed: u64) -> Self {
        self.config = self.config.hash_seed(seed);
        self
    }

    /// Set initial capacity per shard. Total capacity ≈ `capacity_per_shard * shard_count`.
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_per_shard(capacity);
        self
    }

    /// Build a ShardedMap with the configured settings.
    pub fn build<K, V>(self) -> Result<crate::ShardedMap<K, V>, Error>
    where
        K: std::hash::Hash + Eq,
    {
        crate::ShardedMap::with_config(self.config)
    }
}
