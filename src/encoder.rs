//! Rolling canonical k-mer encoding.
//!
//! A k-mer is packed 2 bits per base into a `u64` and normalized to the
//! numerically smaller of its forward encoding and its reverse-complement
//! encoding, so a sequence and its opposite strand produce identical codes.
//!
//! The encoder is incremental: both encodings are maintained as rolling
//! accumulators updated in O(1) per base, rather than recomputed per window.
//! This relies on the base mapping A=0, C=1, G=2, T=3, under which the two
//! complementary pairs are bitwise complements within the 2-bit field
//! (`A ^ 0b11 == T`, `C ^ 0b11 == G`).

/// Maps a nucleotide byte to its 2-bit code, or `None` for any other byte.
///
/// Case-sensitive: lowercase bases are separators, matching the splitter.
#[inline]
pub fn base_bits(base: u8) -> Option<u64> {
    match base {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Incremental canonical k-mer encoder.
///
/// Feed bases one at a time with [`push`](Self::push); once `k` consecutive
/// valid bases have been consumed, every further push yields the canonical
/// code of the current window. A non-nucleotide byte resets the window.
#[derive(Debug, Clone)]
pub struct RollingEncoder {
    k: usize,
    /// 1s in every bit position a k-mer code occupies (low 2k bits).
    mask: u64,
    /// Bit offset of the top base in the reverse-complement accumulator.
    rc_shift: u32,
    forward: u64,
    revcomp: u64,
    /// Valid bases consumed since the last reset, saturating at `k`.
    filled: usize,
}

impl RollingEncoder {
    /// Creates an encoder for windows of `k` bases.
    ///
    /// `k` must already be validated to `1..=32`; see
    /// [`Config::validate`](crate::config::Config::validate).
    pub fn new(k: usize) -> Self {
        debug_assert!((1..=32).contains(&k));
        let mask = if k == 32 {
            u64::MAX
        } else {
            (1u64 << (2 * k)) - 1
        };
        Self {
            k,
            mask,
            rc_shift: 2 * (k as u32 - 1),
            forward: 0,
            revcomp: 0,
            filled: 0,
        }
    }

    /// Consumes one base and returns the canonical code of the window ending
    /// at it, if a full window of valid bases has been seen.
    #[inline]
    pub fn push(&mut self, base: u8) -> Option<u64> {
        let Some(bits) = base_bits(base) else {
            self.reset();
            return None;
        };
        // Newest base enters at the bottom of the forward code and, as its
        // complement, at the top of the reverse-complement code.
        self.forward = ((self.forward << 2) | bits) & self.mask;
        self.revcomp = (self.revcomp >> 2) | ((bits ^ 0b11) << self.rc_shift);
        if self.filled < self.k {
            self.filled += 1;
        }
        (self.filled == self.k).then(|| self.forward.min(self.revcomp))
    }

    /// Discards the current window.
    #[inline]
    pub fn reset(&mut self) {
        self.forward = 0;
        self.revcomp = 0;
        self.filled = 0;
    }
}

/// Encodes one fragment into its batch of canonical codes, one per window.
///
/// A fragment of length `L >= k` yields exactly `L - k + 1` codes, in window
/// order; a shorter fragment yields none.
pub fn encode_fragment(fragment: &[u8], k: usize) -> Vec<u64> {
    if fragment.len() < k {
        return Vec::new();
    }
    let mut encoder = RollingEncoder::new(k);
    let mut codes = Vec::with_capacity(fragment.len() - k + 1);
    for &base in fragment {
        if let Some(code) = encoder.push(base) {
            codes.push(code);
        }
    }
    codes
}
