//! Exact Bernoulli coins with rational weight.

use crate::error::panic_bernoulli_weight;
use crate::flip::{FlipState, WordSource};
use dashu_int::UBig;

/// Flip a coin that is 1 with probability exactly `k/n`, for
/// `0 < k < n`, consuming two flips in expectation.
///
/// The walk materializes the binary expansion of `k/n` one bit per
/// iteration and commits to the expansion bit as soon as a fresh flip
/// agrees with it; when the doubled numerator hits `n` the remainder is
/// exactly one half and a single fresh flip decides. Callers must
/// short-circuit the trivial weights `k = 0` and `k = n` themselves.
pub fn bernoulli<S: WordSource>(mut k: u64, n: u64, prng: &mut FlipState<S>) -> u8 {
    if k == 0 || k >= n {
        panic_bernoulli_weight();
    }
    debug_assert!(n <= 1 << 63);
    loop {
        k <<= 1;
        if k == n {
            return prng.flip();
        }
        let b = if k > n {
            k -= n;
            1
        } else {
            0
        };
        if prng.flip() == b {
            return b;
        }
    }
}

/// Arbitrary-precision variant of [bernoulli].
pub fn bernoulli_big<S: WordSource>(k: &UBig, n: &UBig, prng: &mut FlipState<S>) -> u8 {
    if k.is_zero() || k >= n {
        panic_bernoulli_weight();
    }
    let mut k = k.clone();
    loop {
        k <<= 1;
        if &k == n {
            return prng.flip();
        }
        let b = if &k > n {
            k -= n;
            1
        } else {
            0
        };
        if prng.flip() == b {
            return b;
        }
    }
}
