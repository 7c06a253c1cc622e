//! Sharded per-asset locks.

use std::hash::{Hash, Hasher};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use ft_core::AssetId;

#[cfg(feature = "fx-hash")]
type ShardHasher = rustc_hash::FxHasher;
#[cfg(not(feature = "fx-hash"))]
type ShardHasher = std::hash::DefaultHasher;

/// A fixed table of `RwLock<()>` shards keyed by asset id hash.
///
/// Two assets may share a shard; that only costs parallelism, never
/// correctness.  The same asset always maps to the same shard.
pub struct AssetLocks {
    shards: Box<[RwLock<()>]>,
}

impl AssetLocks {
    /// `shards` is clamped to at least 1.
    pub fn new(shards: usize) -> Self {
        Self { shards: (0..shards.max(1)).map(|_| RwLock::new(())).collect() }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Index of the shard guarding `id`.
    pub fn shard_of(&self, id: &AssetId) -> usize {
        let mut h = ShardHasher::default();
        id.hash(&mut h);
        (h.finish() % self.shards.len() as u64) as usize
    }

    /// Exclusive guard for a read-modify-write of `id`'s state.
    pub fn write(&self, id: &AssetId) -> RwLockWriteGuard<'_, ()> {
        self.shards[self.shard_of(id)].write()
    }

    /// Shared guard for a multi-read of `id`'s state that must not straddle
    /// an update.
    pub fn read(&self, id: &AssetId) -> RwLockReadGuard<'_, ()> {
        self.shards[self.shard_of(id)].read()
    }
}
