//! Shard partitioning and per-shard count maps.
//!
//! K-mer codes are partitioned across N maps (N a power of two) by their low
//! bits. Every encoded batch is broadcast to every shard; each counter keeps
//! only the codes whose shard id matches its own, so no two counters ever
//! touch the same key and no synchronization is needed between them.

use rustc_hash::FxHashMap;

/// Count map exclusively owned by one shard counter.
pub type CountMap = FxHashMap<u64, u64>;

/// The shard a code belongs to, given the low-bit mask `shards - 1`.
#[inline]
pub fn shard_of(code: u64, mask: u64) -> u64 {
    code & mask
}

/// One shard's counting state.
///
/// The counter owns its map for the lifetime of the run; the map is only
/// readable by others once the counter has been consumed via
/// [`into_counts`](Self::into_counts).
#[derive(Debug)]
pub struct ShardCounter {
    id: u64,
    mask: u64,
    counts: CountMap,
    occurrences: u64,
}

impl ShardCounter {
    /// Creates the counter for shard `id` of `shards` total.
    pub fn new(id: usize, shards: usize) -> Self {
        debug_assert!(shards.is_power_of_two() && id < shards);
        Self {
            id: id as u64,
            mask: shards as u64 - 1,
            counts: CountMap::default(),
            occurrences: 0,
        }
    }

    /// Counts the codes in a broadcast batch that belong to this shard.
    ///
    /// Codes owned by other shards are discarded; they were also delivered
    /// to their owners.
    pub fn accept(&mut self, batch: &[u64]) {
        for &code in batch {
            if shard_of(code, self.mask) != self.id {
                continue;
            }
            *self.counts.entry(code).or_insert(0) += 1;
            self.occurrences += 1;
        }
    }

    /// Total occurrences counted, before any histogram clamping.
    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }

    /// Releases the finished map for read-only aggregation.
    pub fn into_counts(self) -> CountMap {
        self.counts
    }
}
