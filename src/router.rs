//! Key to shard routing.
//!
//! A 64-bit key hash is truncated to its low 32 bits and reduced into
//! `[0, shard_count)` with a multiply-shift instead of a modulo, see
//! <https://lemire.me/blog/2016/06/27/a-fast-alternative-to-the-modulo-reduction/>.

/// Map `x` into `[0, n)` without division.
///
/// Slightly biased for large `n`; negligible while `n` is far below 2^32.
#[inline]
pub fn fast_mod_n(x: u32, n: u32) -> u32 {
    ((x as u64 * n as u64) >> 32) as u32
}

/// Routes key hashes to a fixed number of shards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardRouter {
    shard_count: u32,
}

impl ShardRouter {
    /// Callers guarantee `1 <= shard_count <= u32::MAX`; the map validates
    /// this before a router is ever built.
    pub(crate) fn new(shard_count: u32) -> Self {
        debug_assert!(shard_count > 0);
        Self { shard_count }
    }

    /// Number of shards this router distributes over.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shard_count as usize
    }

    /// Shard index for a key hash.
    #[inline]
    pub fn route(&self, key_hash: u64) -> usize {
        fast_mod_n(key_hash as u32, self.shard_count) as usize
    }
}
