//! Buffered single-bit streams over a uniform word generator.

use crate::error::panic_unsupported_range;

/// A uniform generator of machine words, the entropy supply for a
/// [FlipState].
///
/// The inclusive output range must be `[0, 2^m - 1]` or `[1, 2^m - 2]`
/// for some `1 <= m <= 64`; both shapes keep every one of the low `m`
/// bits individually uniform.
pub trait WordSource {
    /// Smallest word the generator can return.
    fn range_min(&self) -> u64;
    /// Largest word the generator can return.
    fn range_max(&self) -> u64;
    /// Draw the next word.
    fn next_word(&mut self) -> u64;
}

/// Adapter presenting any [rand::RngCore] as a full-range [WordSource].
///
/// [FlipState::from_rng] applies the wrapping for you. The operating
/// system's entropy stream is just another generator here:
///
/// ```
/// use rand::rngs::OsRng;
/// use rvg::{FlipState, RandSource};
///
/// let mut prng = FlipState::new(RandSource(OsRng));
/// assert!(prng.flip() < 2);
/// ```
#[derive(Clone, Debug)]
pub struct RandSource<R: rand::RngCore>(pub R);

impl<R: rand::RngCore> WordSource for RandSource<R> {
    #[inline]
    fn range_min(&self) -> u64 {
        0
    }
    #[inline]
    fn range_max(&self) -> u64 {
        u64::MAX
    }
    #[inline]
    fn next_word(&mut self) -> u64 {
        self.0.next_u64()
    }
}

/// A word source that returns its seed word forever and never evolves.
///
/// Useful for analyzing the generators on a fixed bit stream: a seed of
/// `0` yields the all-zeros stream, `u64::MAX` the all-ones stream.
#[derive(Clone, Copy, Debug)]
pub struct DeterministicRng {
    word: u64,
}

impl DeterministicRng {
    #[inline]
    pub fn new(word: u64) -> Self {
        DeterministicRng { word }
    }
}

impl WordSource for DeterministicRng {
    #[inline]
    fn range_min(&self) -> u64 {
        0
    }
    #[inline]
    fn range_max(&self) -> u64 {
        u64::MAX
    }
    #[inline]
    fn next_word(&mut self) -> u64 {
        self.word
    }
}

/// Number of bits needed to represent `x`.
#[inline]
pub fn word_bit_len(x: u64) -> u32 {
    u64::BITS - x.leading_zeros()
}

/// The state of a sequence of flips: a word generator plus a buffer of
/// not-yet-consumed bits.
#[derive(Debug)]
pub struct FlipState<S: WordSource> {
    rng: S,
    buffer: u64,
    buffer_size: u32,
    flip_pos: u32,
    num_flips: u64,
}

impl<R: rand::RngCore> FlipState<RandSource<R>> {
    /// Wrap a [rand] generator directly.
    ///
    /// Use `rand::rngs::OsRng` to flip bits straight from the operating
    /// system (the `/dev/urandom` role), or a seeded generator for
    /// reproducible streams:
    ///
    /// ```
    /// use rand::rngs::OsRng;
    /// use rvg::FlipState;
    ///
    /// let mut prng = FlipState::from_rng(OsRng);
    /// let word = prng.flip_k(64);
    /// let _ = word;
    /// ```
    #[inline]
    pub fn from_rng(rng: R) -> Self {
        FlipState::new(RandSource(rng))
    }
}

impl<S: WordSource> FlipState<S> {
    /// Wrap a word source into a bit stream.
    ///
    /// Panics if the source's range has an unsupported shape.
    pub fn new(rng: S) -> Self {
        let m_lo = rng.range_min();
        let m_hi = rng.range_max();
        if m_hi == 0 {
            panic_unsupported_range(m_lo, m_hi);
        }
        let buffer_size = word_bit_len(m_hi);
        // With buffer_size == 64 the wrapping shift makes both checks
        // reduce to comparisons against u64::MAX and u64::MAX - 1.
        let full = 1u64.wrapping_shl(buffer_size).wrapping_sub(1);
        match m_lo {
            0 if m_hi == full => (),
            1 if m_hi == full - 1 => (),
            _ => panic_unsupported_range(m_lo, m_hi),
        }
        FlipState {
            rng,
            buffer: 0,
            buffer_size,
            flip_pos: buffer_size,
            num_flips: 0,
        }
    }

    /// Number of usable bits per word of the underlying source.
    #[inline]
    pub fn buffer_size(&self) -> u32 {
        self.buffer_size
    }

    /// Total number of bits drawn so far.
    #[inline]
    pub fn num_flips(&self) -> u64 {
        self.num_flips
    }

    /// Reset the flip counter, e.g. between measurement runs.
    #[inline]
    pub fn reset_num_flips(&mut self) {
        self.num_flips = 0;
    }

    /// Give back the underlying word source.
    #[inline]
    pub fn into_inner(self) -> S {
        self.rng
    }

    /// Generate a single bit. Words are consumed LSB first.
    #[inline]
    pub fn flip(&mut self) -> u8 {
        if self.flip_pos == self.buffer_size {
            self.buffer = self.rng.next_word();
            self.flip_pos = 0;
        }
        let b = (self.buffer & 1) as u8;
        self.buffer >>= 1;
        self.flip_pos += 1;
        self.num_flips += 1;
        b
    }

    /// Generate a random `k`-bit number, composed MSB first across as
    /// many buffer refills as needed. Requires `1 <= k <= 64`.
    pub fn flip_k(&mut self, k: u32) -> u64 {
        debug_assert!(k >= 1 && k <= 64);
        if self.flip_pos == self.buffer_size {
            self.buffer = self.rng.next_word();
            self.flip_pos = 0;
        }
        let take = k.min(self.buffer_size - self.flip_pos);
        let b = self.buffer & (u64::MAX >> (u64::BITS - take));
        // take == 64 drains the buffer in one go.
        self.buffer = self.buffer.checked_shr(take).unwrap_or(0);
        self.flip_pos += take;
        self.num_flips += take as u64;
        if take == k {
            b
        } else {
            (b << (k - take)) + self.flip_k(k - take)
        }
    }

    /// Generate a random `k`-bit number one flip at a time, MSB first.
    pub fn randint(&mut self, k: u32) -> u64 {
        let mut n = 0;
        for _ in 0..k {
            n = (n << 1) + self.flip() as u64;
        }
        n
    }
}
