//! Uniform variates assembled binade by binade.
//!
//! The exponent of a uniform variate on `[0, 1)` is geometric: a coin
//! decides whether the value lies in the top binade `[1/2, 1)`, otherwise
//! the walk descends one binade and repeats, stopping at the subnormal
//! floor. The mantissa is then a block of independent uniform bits. This
//! samples the exact floating-point density without ever computing a
//! quotient.

use crate::bits::{DBL_SIZE_M, FLT_SIZE_M};
use crate::ddf::DdfValue;
use crate::flip::{FlipState, WordSource};

/// How to round the infinite-precision uniform real to a float.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Round {
    /// Towards zero; the result lies in `[0, 1)`.
    Down,
    /// Away from zero; the result lies in `(0, 1]`.
    Up,
    /// To nearest, using one extra flip for the tie-less rounding bit.
    Nearest,
}

// f32 biased exponent of the binade [1/2, 1).
const EMF_TOP: u32 = 126;
// f64 biased exponent of the binade [1/2, 1).
const EM_TOP: u64 = 1022;

/// Sample the biased exponent and mantissa of a uniform `f32` on
/// `[0, 1)`, or on `[0, 1/2)` when `exp_offset` is set.
pub fn sample_random_emf<S: WordSource>(
    exp_offset: bool,
    prng: &mut FlipState<S>,
) -> (u32, u32) {
    let mut e = EMF_TOP - exp_offset as u32;
    while e > 0 && prng.flip() == 0 {
        e -= 1;
    }
    let m = prng.flip_k(FLT_SIZE_M) as u32;
    (e, m)
}

/// Sample the biased exponent and mantissa of a uniform `f64` on
/// `[0, 1)`, or on `[0, 1/2)` when `exp_offset` is set.
pub fn sample_random_em<S: WordSource>(
    exp_offset: bool,
    prng: &mut FlipState<S>,
) -> (u64, u64) {
    let mut e = EM_TOP - exp_offset as u64;
    while e > 0 && prng.flip() == 0 {
        e -= 1;
    }
    let m = prng.flip_k(DBL_SIZE_M);
    (e, m)
}

/// A uniform `f32` on the unit interval, rounded per `mode`.
pub fn uniformf<S: WordSource>(mode: Round, prng: &mut FlipState<S>) -> f32 {
    let (e, m) = sample_random_emf(false, prng);
    let f = f32::from_bits((e << FLT_SIZE_M) | m);
    match mode {
        Round::Down => f,
        Round::Up => f32::from_bits(f.to_bits() + 1),
        Round::Nearest => {
            if prng.flip() == 1 {
                f32::from_bits(f.to_bits() + 1)
            } else {
                f
            }
        }
    }
}

/// A uniform `f64` on the unit interval, rounded per `mode`.
pub fn uniform<S: WordSource>(mode: Round, prng: &mut FlipState<S>) -> f64 {
    let (e, m) = sample_random_em(false, prng);
    let f = f64::from_bits((e << DBL_SIZE_M) | m);
    match mode {
        Round::Down => f,
        Round::Up => f64::from_bits(f.to_bits() + 1),
        Round::Nearest => {
            if prng.flip() == 1 {
                f64::from_bits(f.to_bits() + 1)
            } else {
                f
            }
        }
    }
}

/// A uniform probability expressed as a dual-distribution value.
///
/// A fresh flip picks the side: `(0, q)` encodes `U = q` on `[0, 1/2)`
/// and `(1, q)` encodes `U = 1 - q` on `(1/2, 1]`; the half itself has
/// measure zero, so the union is exactly uniform.
pub fn uniformf_ext<S: WordSource>(prng: &mut FlipState<S>) -> DdfValue {
    let d = prng.flip() == 1;
    let (e, m) = sample_random_emf(true, prng);
    DdfValue::new(d, f32::from_bits((e << FLT_SIZE_M) | m))
}

/// Double-precision variant of [uniformf_ext], returned as a raw
/// side/tail pair.
pub fn uniform_ext<S: WordSource>(prng: &mut FlipState<S>) -> (bool, f64) {
    let d = prng.flip() == 1;
    let (e, m) = sample_random_em(true, prng);
    (d, f64::from_bits((e << DBL_SIZE_M) | m))
}
