//! The five-stage counting pipeline.
//!
//! Stages form a strict producer/consumer chain over bounded queues:
//! line source -> fragment splitters -> k-mer encoders -> shard counters,
//! with histogram aggregation after every counter has finished. Small queue
//! capacities give backpressure; a producer blocks when its downstream queue
//! is full.
//!
//! Shutdown discipline: each worker owns a clone of its output sender and
//! drops it when its input is exhausted, so a queue closes exactly when the
//! last producer into it has finished. Joining a pool is the per-stage
//! completion barrier; shard maps travel back through `join`, which also
//! enforces that aggregation cannot observe a map while its owner is live.

use std::{io::BufRead, sync::Arc, thread};

use bytes::Bytes;
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, info};

use crate::{
    config::Config,
    encoder::encode_fragment,
    error::KhistError,
    histogram::Histogram,
    shard::{CountMap, ShardCounter},
    splitter::split_fragments,
};

/// Batches are produced once per fragment and shared read-only by all shards.
type Batch = Arc<Vec<u64>>;

/// Totals from one completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    /// Sequence lines forwarded by the line source.
    pub sequence_lines: u64,
    /// Distinct canonical k-mers observed.
    pub distinct_kmers: u64,
    /// Total k-mer window positions counted, unclamped.
    pub total_kmers: u64,
}

/// Runs the whole pipeline over `reader` and aggregates the histogram.
///
/// The calling thread acts as the line source; splitters, encoders, and one
/// counter per shard run as scoped worker threads. Runs to stream exhaustion
/// or the first hard failure; a failure aborts the run without producing a
/// partial histogram.
///
/// # Errors
///
/// Returns a configuration error before any thread is spawned, or
/// `LineTooLong`/`Read` if the input stream fails mid-run.
pub fn run<R: BufRead>(
    reader: R,
    config: &Config,
) -> Result<(Histogram, RunSummary), KhistError> {
    config.validate()?;

    let (line_tx, line_rx) = bounded::<Bytes>(config.queue_capacity);
    let (fragment_tx, fragment_rx) = bounded::<Bytes>(config.queue_capacity);
    let mut batch_txs = Vec::with_capacity(config.shards);
    let mut batch_rxs = Vec::with_capacity(config.shards);
    for _ in 0..config.shards {
        let (tx, rx) = bounded::<Batch>(config.queue_capacity);
        batch_txs.push(tx);
        batch_rxs.push(rx);
    }

    thread::scope(|scope| {
        let counter_handles: Vec<_> = batch_rxs
            .into_iter()
            .enumerate()
            .map(|(id, rx)| {
                let shards = config.shards;
                scope.spawn(move || count_kmers(id, shards, &rx))
            })
            .collect();

        let encoder_handles: Vec<_> = (0..config.encoders)
            .map(|worker| {
                let rx = fragment_rx.clone();
                let txs = batch_txs.clone();
                let k = config.k;
                scope.spawn(move || encode_fragments(worker, k, &rx, &txs))
            })
            .collect();
        // The worker clones are the only senders left once these go.
        drop(fragment_rx);
        drop(batch_txs);

        let splitter_handles: Vec<_> = (0..config.splitters)
            .map(|worker| {
                let rx = line_rx.clone();
                let tx = fragment_tx.clone();
                let k = config.k;
                scope.spawn(move || split_lines(worker, k, &rx, &tx))
            })
            .collect();
        drop(line_rx);
        drop(fragment_tx);

        let source_result = read_lines(reader, &line_tx, config);
        drop(line_tx);

        // Join order follows the data flow; each join closes the next queue
        // by dropping the last senders into it.
        for handle in splitter_handles {
            handle.join().map_err(|_| KhistError::WorkerPanic)?;
        }
        for handle in encoder_handles {
            handle.join().map_err(|_| KhistError::WorkerPanic)?;
        }
        let mut maps: Vec<CountMap> = Vec::with_capacity(config.shards);
        let mut total_kmers = 0;
        for handle in counter_handles {
            let counter = handle.join().map_err(|_| KhistError::WorkerPanic)?;
            total_kmers += counter.occurrences();
            maps.push(counter.into_counts());
        }

        // A source failure aborts the run, but only after every worker has
        // drained and stopped.
        let sequence_lines = source_result?;

        let histogram = Histogram::from_shard_maps(&maps);
        let summary = RunSummary {
            sequence_lines,
            distinct_kmers: histogram.distinct_kmers(),
            total_kmers,
        };
        info!(
            sequence_lines = summary.sequence_lines,
            distinct_kmers = summary.distinct_kmers,
            total_kmers = summary.total_kmers,
            "pipeline complete"
        );
        Ok((histogram, summary))
    })
}

/// Stage 1: forwards non-empty, non-header lines from the raw stream.
fn read_lines<R: BufRead>(
    mut reader: R,
    tx: &Sender<Bytes>,
    config: &Config,
) -> Result<u64, KhistError> {
    let mut line = Vec::new();
    let mut forwarded = 0;
    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| KhistError::Read { source })?;
        if n == 0 {
            break;
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        if line.len() > config.max_line_len {
            return Err(KhistError::LineTooLong {
                len: line.len(),
                max: config.max_line_len,
            });
        }
        // Check emptiness before looking at the first byte.
        if line.is_empty() || line[0] == config.header_marker {
            continue;
        }
        if tx.send(Bytes::copy_from_slice(&line)).is_err() {
            break;
        }
        forwarded += 1;
    }
    debug!(forwarded, "line source finished");
    Ok(forwarded)
}

/// Stage 2: splits lines pulled from the shared queue into fragments.
fn split_lines(worker: usize, k: usize, rx: &Receiver<Bytes>, tx: &Sender<Bytes>) {
    for line in rx {
        for fragment in split_fragments(&line, k) {
            if tx.send(fragment).is_err() {
                return;
            }
        }
    }
    debug!(worker, "splitter finished");
}

/// Stage 3: encodes fragments and broadcasts each batch to every shard.
fn encode_fragments(worker: usize, k: usize, rx: &Receiver<Bytes>, txs: &[Sender<Batch>]) {
    for fragment in rx {
        let batch = Arc::new(encode_fragment(&fragment, k));
        if batch.is_empty() {
            continue;
        }
        for tx in txs {
            if tx.send(Arc::clone(&batch)).is_err() {
                return;
            }
        }
    }
    debug!(worker, "encoder finished");
}

/// Stage 4: filters the broadcast stream down to one shard and counts.
fn count_kmers(id: usize, shards: usize, rx: &Receiver<Batch>) -> ShardCounter {
    let mut counter = ShardCounter::new(id, shards);
    for batch in rx {
        counter.accept(&batch);
    }
    debug!(shard = id, occurrences = counter.occurrences(), "counter finished");
    counter
}
