//! Pipeline configuration.
//!
//! All knobs are validated eagerly via [`Config::validate`] before any worker
//! thread is spawned, so a misconfigured run fails at startup rather than
//! mid-stream.

use crate::error::KhistError;

/// Maximum k-mer length that fits 2 bits per base in a `u64` code.
pub const MAX_K: usize = 32;

/// Default k-mer length.
pub const DEFAULT_K: usize = 31;

/// Default number of count shards (must be a power of two).
pub const DEFAULT_SHARDS: usize = 16;

/// Default fragment splitter pool size.
pub const DEFAULT_SPLITTERS: usize = 4;

/// Default k-mer encoder pool size.
pub const DEFAULT_ENCODERS: usize = 8;

/// Default capacity of every inter-stage queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 3;

/// Default maximum accepted input line length, in bytes.
pub const DEFAULT_MAX_LINE_LEN: usize = 4_000_000;

/// Default header/annotation line marker.
pub const DEFAULT_HEADER_MARKER: u8 = b'>';

/// Configuration for one histogram run.
#[derive(Debug, Clone)]
pub struct Config {
    /// K-mer length (1-32).
    pub k: usize,
    /// Number of count shards; must be a power of two.
    pub shards: usize,
    /// Fragment splitter pool size.
    pub splitters: usize,
    /// K-mer encoder pool size.
    pub encoders: usize,
    /// Capacity of every inter-stage queue.
    pub queue_capacity: usize,
    /// Maximum accepted input line length, in bytes.
    pub max_line_len: usize,
    /// Lines beginning with this byte are skipped as headers.
    pub header_marker: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            shards: DEFAULT_SHARDS,
            splitters: DEFAULT_SPLITTERS,
            encoders: DEFAULT_ENCODERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            header_marker: DEFAULT_HEADER_MARKER,
        }
    }
}

impl Config {
    /// Checks every invariant the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: k out of range, shard count not
    /// a power of two, an empty worker pool, or a zero queue capacity.
    pub fn validate(&self) -> Result<(), KhistError> {
        if self.k == 0 || self.k > MAX_K {
            return Err(KhistError::InvalidKmerLength { k: self.k });
        }
        if !self.shards.is_power_of_two() {
            return Err(KhistError::InvalidShardCount {
                shards: self.shards,
            });
        }
        if self.splitters == 0 {
            return Err(KhistError::InvalidPoolSize { pool: "splitter" });
        }
        if self.encoders == 0 {
            return Err(KhistError::InvalidPoolSize { pool: "encoder" });
        }
        if self.queue_capacity == 0 {
            return Err(KhistError::InvalidQueueCapacity);
        }
        Ok(())
    }

    /// Low-bit mask selecting the shard id of a k-mer code.
    pub fn shard_mask(&self) -> u64 {
        self.shards as u64 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn k_zero_rejected() {
        let config = Config {
            k: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KhistError::InvalidKmerLength { k: 0 })
        ));
    }

    #[test]
    fn k_above_32_rejected() {
        let config = Config {
            k: 33,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KhistError::InvalidKmerLength { k: 33 })
        ));
    }

    #[test]
    fn k_bounds_accepted() {
        for k in [1, 32] {
            let config = Config {
                k,
                ..Config::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn non_power_of_two_shards_rejected() {
        for shards in [0, 3, 12, 100] {
            let config = Config {
                shards,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(KhistError::InvalidShardCount { .. })
            ));
        }
    }

    #[test]
    fn single_shard_accepted() {
        let config = Config {
            shards: 1,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.shard_mask(), 0);
    }

    #[test]
    fn empty_pools_rejected() {
        let config = Config {
            splitters: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KhistError::InvalidPoolSize { pool: "splitter" })
        ));

        let config = Config {
            encoders: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KhistError::InvalidPoolSize { pool: "encoder" })
        ));
    }

    #[test]
    fn zero_queue_capacity_rejected() {
        let config = Config {
            queue_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(KhistError::InvalidQueueCapacity)
        ));
    }

    #[test]
    fn shard_mask_keeps_low_bits() {
        let config = Config::default();
        assert_eq!(config.shard_mask(), 0b1111);
    }
}
