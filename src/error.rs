//! Error types for khist.
//!
//! Configuration violations are detected eagerly, before any pipeline stage
//! is started. Runtime errors abort the whole run; there are no
//! partial-histogram semantics.

use thiserror::Error;

/// Errors that can occur in khist operations.
#[derive(Debug, Error)]
pub enum KhistError {
    /// K-mer length is outside the valid range (1-32).
    #[error("invalid k-mer length {k}: must be between 1 and 32")]
    InvalidKmerLength { k: usize },

    /// Shard count is zero or not a power of two.
    #[error("invalid shard count {shards}: must be a power of two")]
    InvalidShardCount { shards: usize },

    /// A worker pool was configured with no workers.
    #[error("invalid {pool} pool size: must be at least 1")]
    InvalidPoolSize { pool: &'static str },

    /// Queue capacity of zero would stall every stage.
    #[error("invalid queue capacity: must be at least 1")]
    InvalidQueueCapacity,

    /// An input line exceeds the maximum accepted length.
    ///
    /// Fatal: the stream cannot safely resume mid-line.
    #[error("input line of {len} bytes exceeds the {max} byte limit")]
    LineTooLong { len: usize, max: usize },

    /// Failed to read from the input stream.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the histogram.
    #[error("failed to write output: {source}")]
    Write {
        #[from]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// A pipeline worker thread panicked.
    #[error("pipeline worker thread panicked")]
    WorkerPanic,
}
