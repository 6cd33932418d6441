//! Fragment splitting on non-nucleotide characters.
//!
//! A sequence line is cut at every byte outside `{A, C, G, T}`; each maximal
//! separator-free run long enough to hold at least one k-mer window becomes a
//! fragment. Fragments are zero-copy slices of the owning line.

use bytes::Bytes;

#[inline]
fn is_nucleotide(byte: u8) -> bool {
    matches!(byte, b'A' | b'C' | b'G' | b'T')
}

/// Splits a line into its maximal valid runs of length `>= k`.
///
/// Runs shorter than `k` cannot yield a single window and are dropped.
pub fn split_fragments(line: &Bytes, k: usize) -> Vec<Bytes> {
    let mut fragments = Vec::new();
    let mut start = 0;
    for (i, &byte) in line.iter().enumerate() {
        if !is_nucleotide(byte) {
            if i - start >= k {
                fragments.push(line.slice(start..i));
            }
            start = i + 1;
        }
    }
    // The run ending at end-of-line.
    if line.len() - start >= k {
        fragments.push(line.slice(start..));
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &[u8], k: usize) -> Vec<Bytes> {
        split_fragments(&Bytes::copy_from_slice(line), k)
    }

    #[test]
    fn clean_line_is_one_fragment() {
        let fragments = split(b"ACGTACGT", 3);
        assert_eq!(fragments, vec![Bytes::from_static(b"ACGTACGT")]);
    }

    #[test]
    fn separators_split_into_maximal_runs() {
        let fragments = split(b"ACGTNNNGGGCCCxTTTT", 3);
        assert_eq!(
            fragments,
            vec![
                Bytes::from_static(b"ACGT"),
                Bytes::from_static(b"GGGCCC"),
                Bytes::from_static(b"TTTT"),
            ]
        );
    }

    #[test]
    fn runs_shorter_than_k_are_dropped() {
        let fragments = split(b"ACNACGNACGT", 4);
        assert_eq!(fragments, vec![Bytes::from_static(b"ACGT")]);
    }

    #[test]
    fn run_of_exactly_k_is_kept() {
        // The boundary: one window, no more.
        let fragments = split(b"NNACGNN", 3);
        assert_eq!(fragments, vec![Bytes::from_static(b"ACG")]);
    }

    #[test]
    fn run_of_k_minus_one_is_dropped() {
        assert!(split(b"NNACNN", 3).is_empty());
    }

    #[test]
    fn all_separators_yield_nothing() {
        assert!(split(b"NNNNNN", 3).is_empty());
        assert!(split(b"nnnn", 1).is_empty());
    }

    #[test]
    fn empty_line_yields_nothing() {
        assert!(split(b"", 1).is_empty());
    }

    #[test]
    fn lowercase_bases_are_separators() {
        let fragments = split(b"ACGTacgtACGT", 4);
        assert_eq!(
            fragments,
            vec![Bytes::from_static(b"ACGT"), Bytes::from_static(b"ACGT")]
        );
    }

    #[test]
    fn leading_and_trailing_separators() {
        let fragments = split(b"NNNACGTNNN", 4);
        assert_eq!(fragments, vec![Bytes::from_static(b"ACGT")]);
    }

    #[test]
    fn fragments_share_the_line_buffer() {
        let line = Bytes::from_static(b"ACGTNACGT");
        let fragments = split_fragments(&line, 4);
        assert_eq!(fragments.len(), 2);
        // Zero-copy: slices point into the original allocation.
        assert_eq!(fragments[0].as_ptr(), line.as_ptr());
    }
}
