//! Count-of-counts histogram over the finished shard maps.
//!
//! The histogram buckets distinct k-mers by how many times they occurred,
//! with every count of 255 or more clamped into the top bucket. It is built
//! once, after all shard counters have finished, by reading (never mutating)
//! their maps.

use std::io::Write;

use serde::Serialize;

use crate::{error::KhistError, shard::CountMap};

/// Top bucket; counts at or above it are clamped.
pub const MAX_BUCKET: u64 = 255;

/// Frequency histogram indexed by clamped occurrence count (1-255).
#[derive(Debug, Clone)]
pub struct Histogram {
    buckets: [u64; 256],
}

/// One rendered histogram row, used for JSON output.
#[derive(Debug, Serialize)]
pub struct Bucket {
    /// Clamped occurrence count (255 means "255 or more").
    pub count: u64,
    /// Number of distinct k-mers observed that many times.
    pub distinct: u64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self { buckets: [0; 256] }
    }
}

impl Histogram {
    /// Builds the histogram from every shard's finished map.
    pub fn from_shard_maps(maps: &[CountMap]) -> Self {
        let mut histogram = Self::default();
        for map in maps {
            for &count in map.values() {
                histogram.record(count);
            }
        }
        histogram
    }

    /// Buckets one k-mer's occurrence count, clamping at [`MAX_BUCKET`].
    pub fn record(&mut self, count: u64) {
        debug_assert!(count > 0, "a stored k-mer cannot have a zero count");
        self.buckets[count.min(MAX_BUCKET) as usize] += 1;
    }

    /// Non-empty buckets in ascending order, as `(count, distinct)` pairs.
    ///
    /// Bucket 0 is never reported: a map of observed keys cannot hold a
    /// zero-count k-mer.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, &distinct)| distinct > 0)
            .map(|(count, &distinct)| (count as u64, distinct))
    }

    /// Number of distinct k-mers across all buckets.
    pub fn distinct_kmers(&self) -> u64 {
        self.iter().map(|(_, distinct)| distinct).sum()
    }

    /// Whether any k-mer was observed at all.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Writes the two-column `<count>\t<distinct>` table.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<(), KhistError> {
        for (count, distinct) in self.iter() {
            writeln!(writer, "{count}\t{distinct}")?;
        }
        Ok(())
    }

    /// Writes the histogram as a JSON array of bucket objects.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<(), KhistError> {
        let rows: Vec<Bucket> = self
            .iter()
            .map(|(count, distinct)| Bucket { count, distinct })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &rows)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(u64, u64)]) -> CountMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn buckets_group_by_count() {
        let maps = vec![
            map_of(&[(0, 1), (4, 1), (8, 2)]),
            map_of(&[(1, 2), (5, 3)]),
        ];
        let histogram = Histogram::from_shard_maps(&maps);
        let rows: Vec<_> = histogram.iter().collect();
        assert_eq!(rows, vec![(1, 2), (2, 2), (3, 1)]);
    }

    #[test]
    fn counts_clamp_at_255() {
        let maps = vec![map_of(&[(1, 255), (2, 300), (3, 9999)])];
        let histogram = Histogram::from_shard_maps(&maps);
        let rows: Vec<_> = histogram.iter().collect();
        assert_eq!(rows, vec![(255, 3)]);
    }

    #[test]
    fn count_254_is_not_clamped() {
        let maps = vec![map_of(&[(1, 254)])];
        let histogram = Histogram::from_shard_maps(&maps);
        assert_eq!(histogram.iter().collect::<Vec<_>>(), vec![(254, 1)]);
    }

    #[test]
    fn empty_maps_make_empty_histogram() {
        let histogram = Histogram::from_shard_maps(&[CountMap::default()]);
        assert!(histogram.is_empty());
        assert_eq!(histogram.distinct_kmers(), 0);

        let mut out = Vec::new();
        histogram.write_tsv(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn distinct_kmers_sums_all_buckets() {
        let maps = vec![map_of(&[(1, 1), (2, 1), (3, 500), (4, 2)])];
        let histogram = Histogram::from_shard_maps(&maps);
        assert_eq!(histogram.distinct_kmers(), 4);
    }

    #[test]
    fn tsv_rows_are_tab_separated_and_ascending() {
        let maps = vec![map_of(&[(1, 3), (2, 1), (3, 1), (4, 3)])];
        let histogram = Histogram::from_shard_maps(&maps);

        let mut out = Vec::new();
        histogram.write_tsv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\t2\n3\t2\n");
    }

    #[test]
    fn json_output_lists_buckets() {
        let maps = vec![map_of(&[(1, 2), (2, 2)])];
        let histogram = Histogram::from_shard_maps(&maps);

        let mut out = Vec::new();
        histogram.write_json(&mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["count"], 2);
        assert_eq!(parsed[0]["distinct"], 2);
    }
}
