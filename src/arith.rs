//! Exact arithmetic on probabilities.
//!
//! [subtract_exact] decomposes the difference of two single-precision
//! probabilities into a run-length encoded form of the infinite binary
//! expansion of the exact rational result, so individual expansion bits
//! can be read in constant time without any big-number arithmetic.
//! [subtract_big] is the same quantity materialized as an exact
//! [RBig] rational; it backs the reference generator and the debug
//! cross-checks.

use crate::bits::{FLT_SIZE, FLT_SIZE_E, FLT_SIZE_M};
use crate::ddf::DdfValue;
use crate::error::{panic_ddf_order, panic_nonfinite_prob, panic_subtract_domain};
use dashu_int::UBig;
use dashu_ratio::RBig;

/// Which exact difference to form.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubtractMode {
    /// `x - y`, requiring `y <= x` and not `(x, y) = (1, 0)`.
    Sub0,
    /// `1 - (x + y)`, requiring `x + y < 1` exclusive of `(0, 0)`.
    Sub1,
}

/// Run-length encoded binary expansion of an exact difference.
///
/// The expansion is `b_1^{n_1} . g_hi[n_hi bits] . b_2^{n_2} .
/// g_lo[n_lo bits] . 0^inf`, with both groups written MSB first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubtractExact {
    n_1: i32,
    n_2: i32,
    n_hi: i32,
    n_lo: i32,
    b_1: u8,
    b_2: u8,
    g_hi: i32,
    g_lo: i32,
}

// Unbiased exponent and full significand of a non-negative finite f32.
#[inline]
fn unpack_f32(x: f32) -> (i32, i32) {
    let bits = x.to_bits();
    let e = (bits >> FLT_SIZE_M) & 0xFF;
    let emax = (1i32 << (FLT_SIZE_E - 1)) - 1;
    // Subnormals share the minimum exponent and carry no hidden bit.
    let ehat = e as i32 - emax + (e == 0) as i32;
    let m = (bits & ((1 << FLT_SIZE_M) - 1)) as i32;
    let f = m + (((e > 0) as i32) << FLT_SIZE_M);
    (ehat, f)
}

/// Decompose `x - y` (mode [SubtractMode::Sub0]) or `1 - (x + y)`
/// ([SubtractMode::Sub1]) for non-negative finite `x`, `y`.
///
/// Panics when the operands violate the mode's domain, in which case the
/// result would need an integer part or a sign.
pub fn subtract_exact(mode: SubtractMode, x: f32, y: f32) -> SubtractExact {
    let (x, y) = match mode {
        SubtractMode::Sub0 => {
            if !(y <= x) || (x == 1.0 && y == 0.0) {
                panic_subtract_domain();
            }
            (x, y)
        }
        SubtractMode::Sub1 => {
            if (x == 0.5 && y == 0.5) || (x == 0.0 && y == 0.0) {
                panic_subtract_domain();
            }
            // Alignment below assumes the larger operand is first.
            (x.max(y), x.min(y))
        }
    };

    let (ehat_x, f_x) = unpack_f32(x);
    let (ehat_y, f_y) = unpack_f32(y);

    let shift = ehat_x - ehat_y;
    let mant1 = FLT_SIZE_M as i32 + 1;
    let f_hi = f_y >> shift.min(FLT_SIZE as i32 - 1);
    let f_lo = f_y & ((1 << shift.min(mant1)) - 1);

    match mode {
        SubtractMode::Sub0 => {
            let b_2 = (f_lo > 0) as i32;
            let n_lo = shift.min(mant1);
            SubtractExact {
                n_1: -ehat_x - 1 + (x == 1.0) as i32,
                n_2: (shift - mant1).max(0),
                n_hi: mant1 - (x == 1.0) as i32,
                n_lo,
                b_1: 0,
                b_2: b_2 as u8,
                g_hi: f_x - f_hi - b_2,
                g_lo: (b_2 << n_lo) - f_lo,
            }
        }
        SubtractMode::Sub1 => {
            let b_2 = (f_lo > 0) as i32;
            let n_lo = shift.min(mant1);
            let n_hi = mant1 + 1 - (x == 0.5) as i32;
            SubtractExact {
                n_1: -ehat_x - 2 + (x == 0.5) as i32,
                n_2: (shift - mant1).max(0),
                n_hi,
                n_lo,
                b_1: 1,
                b_2: b_2 as u8,
                g_hi: (1 << n_hi) - f_x - f_hi - b_2,
                g_lo: (b_2 << n_lo) - f_lo,
            }
        }
    }
}

/// Exact difference `p0 - p1` of two dual-distribution values with
/// `p1 <= p0`.
///
/// Panics on the `(d0, d1) = (0, 1)` direction pair, which orders `p0`
/// below the median and `p1` above it.
pub fn subtract_exact_ext(v0: DdfValue, v1: DdfValue) -> SubtractExact {
    match (v0.d, v1.d) {
        (false, false) => subtract_exact(SubtractMode::Sub0, v0.q, v1.q),
        (true, true) => subtract_exact(SubtractMode::Sub0, v1.q, v0.q),
        (true, false) => subtract_exact(SubtractMode::Sub1, v0.q, v1.q),
        (false, true) => panic_ddf_order(),
    }
}

impl SubtractExact {
    /// The `l`-th bit (1-based) of the infinite binary expansion.
    pub fn ith_bit(&self, l: u32) -> u8 {
        debug_assert!(l >= 1);
        debug_assert!(self.g_hi < (1 << self.n_hi) && self.g_lo < (1 << self.n_lo));
        let l = l as i64;
        let n_1 = self.n_1 as i64;
        let n_hi = self.n_hi as i64;
        let n_2 = self.n_2 as i64;
        let n_lo = self.n_lo as i64;
        if l <= n_1 {
            self.b_1
        } else if l <= n_1 + n_hi {
            ((self.g_hi >> (n_hi - (l - n_1))) & 1) as u8
        } else if l <= n_1 + n_hi + n_2 {
            self.b_2
        } else if l <= n_1 + n_hi + n_2 + n_lo {
            ((self.g_lo >> (n_lo - (l - (n_1 + n_hi + n_2)))) & 1) as u8
        } else {
            0
        }
    }
}

fn rational_of(x: f32) -> RBig {
    match RBig::try_from(x) {
        Ok(r) => r,
        Err(_) => panic_nonfinite_prob(),
    }
}

/// The exact rational `x - y` or `1 - (x + y)`, per `mode`.
pub fn subtract_big(mode: SubtractMode, x: f32, y: f32) -> RBig {
    let (qx, qy) = (rational_of(x), rational_of(y));
    match mode {
        SubtractMode::Sub0 => qx - qy,
        SubtractMode::Sub1 => RBig::ONE - (qx + qy),
    }
}

/// The exact rational `p0 - p1` of two dual-distribution values.
pub fn subtract_big_ext(v0: DdfValue, v1: DdfValue) -> RBig {
    match (v0.d, v1.d) {
        (false, false) => subtract_big(SubtractMode::Sub0, v0.q, v1.q),
        (true, true) => subtract_big(SubtractMode::Sub0, v1.q, v0.q),
        (true, false) => subtract_big(SubtractMode::Sub1, v0.q, v1.q),
        (false, true) => panic_ddf_order(),
    }
}

/// The `i`-th bit (1-based) of the binary expansion of `k/n`, for
/// `0 < k < n`.
pub fn ith_bit_of_fraction(mut k: u64, n: u64, i: u64) -> u8 {
    debug_assert!(i > 0 && k > 0 && k < n);
    let mut b = 0;
    for j in 1..=i {
        k <<= 1;
        if k == n {
            // The remainder is exactly one half: a single 1 bit here,
            // zeros forever after.
            return (j == i) as u8;
        }
        if k > n {
            b = 1;
            k -= n;
        } else {
            b = 0;
        }
    }
    b
}

/// Arbitrary-precision variant of [ith_bit_of_fraction].
pub fn ith_bit_of_fraction_big(k: &UBig, n: &UBig, i: u64) -> u8 {
    debug_assert!(i > 0 && !k.is_zero() && k < n);
    let mut k = k.clone();
    let mut b = 0;
    for j in 1..=i {
        k <<= 1;
        if &k == n {
            return (j == i) as u8;
        }
        if &k > n {
            b = 1;
            k -= n;
        } else {
            b = 0;
        }
    }
    b
}
