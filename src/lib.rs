//! # shardedmap
//!
//! A concurrent, in-memory, hash-sharded key/value map.
//!
//! Keys are routed to one of a fixed number of shards. Each shard owns its own
//! backing table and its own read-write lock, so threads touching different
//! shards never wait on each other. A top-level lock coordinates the few
//! operations that must see the whole map at once (clearing and full
//! iteration). Values are stored behind `Arc<T>` so reads can share them
//! without copying.
//!
//! ## Features
//!
//! - **Two-level locking**: per-key operations take the top lock shared and a
//!   single shard lock; `clear` and `for_each` take the top lock exclusively
//! - **Division-free routing**: a seeded 64-bit hash reduced with a
//!   multiply-shift, valid for any shard count
//! - **Pluggable backends**: `std` `HashMap` or a `hashbrown` swiss table per
//!   shard, picked at construction
//! - **Early-stop iteration**: visitors return `ControlFlow` and can stop the
//!   walk at any entry
//! - **Introspection**: shard routing, per-shard loads and (with the `metrics`
//!   feature) per-shard operation counters
//!
//! ## Example
//!
//! ```rust
//! use shardedmap::{BackendKind, ShardedMap};
//! use std::ops::ControlFlow;
//!
//! let map = ShardedMap::new(8, BackendKind::Dense)?;
//!
//! map.insert("key1", "value1");
//! map.insert("key2", "value2");
//!
//! if let Some(value) = map.get(&"key1") {
//!     println!("Found: {}", *value);
//! }
//!
//! map.for_each(|key, value| {
//!     println!("{}: {}", key, value);
//!     ControlFlow::Continue(())
//! });
//!
//! // Only one shard, and fail on a bad index
//! let shard = map.shard_index(&"key1");
//! map.for_each_in_shard(shard, |_, _| ControlFlow::Continue(()))?;
//! assert!(map.for_each_in_shard(8, |_, _| ControlFlow::Continue(())).is_err());
//!
//! map.clear();
//! assert!(map.is_empty());
//! # Ok::<(), shardedmap::Error>(())
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use shardedmap::{BackendKind, HashFunction, ShardedMapBuilder};
//!
//! let map = ShardedMapBuilder::new()
//!     .shard_count(12)
//!     .backend(BackendKind::Simple)
//!     .hash_function(HashFunction::AHash)
//!     .hash_seed(0x5eed)
//!     .capacity_per_shard(256)
//!     .build::<String, i32>()?;
//! assert_eq!(map.num_shards(), 12);
//! # Ok::<(), shardedmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Per-shard backing tables.
pub mod backend;
/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Hash function implementations.
pub mod hash;
/// Iterator implementations.
pub mod iter;
pub mod router;
mod shard;
/// Main ShardedMap implementation.
pub mod shardedmap;
pub mod stats;

// Re-export main types
pub use backend::{BackendKind, BackendMap, DenseMap, SimpleMap};
pub use config::{Config, HashFunction, ShardedMapBuilder};
pub use error::{Error, Result};
pub use shardedmap::{ShardTarget, ShardedMap};
pub use stats::{Diagnostics, ShardDiagnostics, ShardOps, Stats};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::ControlFlow;

    #[test]
    fn test_basic_operations() {
        let map = ShardedMap::default();

        // Insert
        assert!(map.insert("key1", "value1").is_none());
        assert_eq!(map.insert("key1", "value2").unwrap().as_ref(), &"value1");
        assert_eq!(map.len(), 1);

        // Get
        assert_eq!(map.get(&"key1").unwrap().as_ref(), &"value2");
        assert!(map.get(&"nonexistent").is_none());
        assert!(map.contains_key(&"key1"));

        // Remove
        assert_eq!(map.remove(&"key1").unwrap().as_ref(), &"value2");
        assert!(map.get(&"key1").is_none());
        assert!(!map.contains_key(&"key1"));
    }

    #[test]
    fn test_clear_then_iterate() {
        let map = ShardedMap::new(4, BackendKind::Dense).unwrap();
        for i in 0..100 {
            map.insert(i, i);
        }
        map.clear();

        assert_eq!(map.len(), 0);
        let mut visited = 0;
        let flow = map.for_each(|_, _| {
            visited += 1;
            ControlFlow::Continue(())
        });
        assert!(flow.is_continue());
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_stats() {
        let map = ShardedMap::default();
        map.insert("key1", "value1");
        map.insert("key2", "value2");

        let stats = map.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.shard_sizes.len(), config::DEFAULT_SHARD_COUNT);
    }

    #[test]
    fn test_builder() {
        let map = ShardedMapBuilder::new()
            .shard_count(8)
            .build::<String, i32>()
            .unwrap();

        map.insert("test".to_string(), 42);
        assert_eq!(*map.get(&"test".to_string()).unwrap(), 42);
    }
}
