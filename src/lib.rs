//! khist: streaming canonical k-mer frequency histograms.
//!
//! Reads plain-text sequence data (one sequence line per line, `>` header
//! lines ignored), counts every canonical k-mer, and reports a count-of-counts
//! histogram: how many distinct k-mers occurred once, twice, and so on, with
//! counts of 255 or more clamped into a single bucket. Useful for quick
//! characterization of sequencing data without materializing all distinct
//! k-mers in one structure.
//!
//! Processing is a five-stage pipeline over bounded queues:
//!
//! 1. line source (skips headers and empty lines),
//! 2. a pool of fragment splitters cutting lines at non-A/C/G/T bytes,
//! 3. a pool of rolling encoders producing canonical `u64` codes and
//!    broadcasting each batch to every shard,
//! 4. one counter per shard, each filtering the broadcast by the code's low
//!    bits and counting in a map it exclusively owns,
//! 5. histogram aggregation once every counter has finished.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use khist::{pipeline, Config};
//!
//! let config = Config { k: 4, ..Config::default() };
//! let input = Cursor::new(">seq1\nACGTACGTACGT\n".to_owned());
//! let (histogram, summary) = pipeline::run(input, &config)?;
//! assert_eq!(summary.total_kmers, 9);
//! # Ok::<(), khist::KhistError>(())
//! ```

pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod histogram;
pub mod input;
pub mod pipeline;
pub mod shard;
pub mod splitter;

pub use config::Config;
pub use error::KhistError;
pub use histogram::Histogram;
pub use input::Input;
pub use pipeline::RunSummary;
