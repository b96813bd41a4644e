use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or operating on a ShardedMap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested configuration cannot produce a usable map.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        reason: &'static str,
    },
    /// A shard index outside `[0, shard_count)` was requested.
    #[error("shard {index} does not exist (available shards: {shard_count})")]
    ShardIndexOutOfRange {
        /// The requested shard index.
        index: usize,
        /// Number of shards the map was built with.
        shard_count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::ShardIndexOutOfRange {
            index: 7,
            shard_count: 4,
        };
        assert_eq!(err.to_string(), "shard 7 does not exist (available shards: 4)");

        let err = Error::InvalidConfiguration {
            reason: "shard count must be at least 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: shard count must be at least 1"
        );
    }
}
