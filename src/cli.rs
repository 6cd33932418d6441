//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{
    Config, DEFAULT_ENCODERS, DEFAULT_K, DEFAULT_MAX_LINE_LEN, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_SHARDS, DEFAULT_SPLITTERS,
};

/// A streaming, parallel canonical k-mer frequency histogram for DNA sequence text.
#[derive(Parser, Debug)]
#[command(name = "khist")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Input file path ("-" or omitted reads standard input)
    pub path: Option<PathBuf>,

    /// K-mer length (1-32)
    #[arg(short, long, default_value_t = DEFAULT_K, value_parser = parse_k)]
    pub kmer_len: usize,

    /// Number of count shards (power of two)
    #[arg(long, default_value_t = DEFAULT_SHARDS)]
    pub shards: usize,

    /// Fragment splitter pool size
    #[arg(long, default_value_t = DEFAULT_SPLITTERS)]
    pub splitters: usize,

    /// K-mer encoder pool size
    #[arg(long, default_value_t = DEFAULT_ENCODERS)]
    pub encoders: usize,

    /// Capacity of every inter-stage queue
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Maximum accepted line length in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    pub max_line_len: usize,

    /// Header/annotation lines begin with this character
    #[arg(long, default_value = ">", value_parser = parse_marker)]
    pub header_marker: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// Suppress the run summary on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for the histogram.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Tab-separated values (count\tdistinct)
    #[default]
    Tsv,
    /// JSON array of bucket objects
    Json,
}

impl Args {
    /// Pipeline configuration from the parsed arguments.
    ///
    /// Constraints clap does not express (shard count a power of two,
    /// non-empty pools) are enforced by [`Config::validate`] at startup.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            k: self.kmer_len,
            shards: self.shards,
            splitters: self.splitters,
            encoders: self.encoders,
            queue_capacity: self.queue_capacity,
            max_line_len: self.max_line_len,
            header_marker: self.header_marker,
        }
    }
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if k == 0 {
        return Err("k-mer length must be at least 1".to_string());
    }
    if k > 32 {
        return Err("k-mer length must be at most 32".to_string());
    }
    Ok(k)
}

fn parse_marker(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err("header marker must be a single ASCII character".to_string()),
    }
}
