//! Exact distribution inversion by binary search on the lexicographic
//! index.
//!
//! Each inverter runs exactly 64 iterations, one per index bit, and
//! evaluates the distribution function once per iteration. The counting
//! formulation below accumulates the number of indices whose probability
//! falls short of the target, which is precisely the lexicographic rank
//! of the answer.

use crate::bits::{lex_to_f64, DBL_SIZE};
use crate::cdf::Cdf;
use crate::ddf::{Ddf, DdfValue};

/// The exact `q`-quantile of `cdf` for `q` in `[0, 1]`: the least
/// double `x` (lexicographically) with `cdf(x) >= q`, so that
/// `cdf(pred(x)) < q`.
pub fn quantile<C: Cdf>(cdf: &C, q: f32) -> f64 {
    let mut b: u64 = 0;
    let mut i = DBL_SIZE;
    while i > 0 {
        i -= 1;
        let cand = b + (1u64 << i);
        if cdf.eval(lex_to_f64(cand - 1)) < q {
            b = cand;
        }
    }
    lex_to_f64(b)
}

/// The exact `q`-quantile of the survival function `sf`: the least
/// double `x` with `sf(x) <= q`, so that `sf(pred(x)) > q`.
pub fn quantile_sf<C: Cdf>(sf: &C, q: f32) -> f64 {
    let mut b: u64 = 0;
    let mut i = DBL_SIZE;
    while i > 0 {
        i -= 1;
        let cand = b + (1u64 << i);
        if sf.eval(lex_to_f64(cand - 1)) > q {
            b = cand;
        }
    }
    lex_to_f64(b)
}

/// The exact quantile of a dual distribution function at the
/// probability encoded by `target`: the least double `x` with
/// `target <= ddf(x)` in the dual order.
pub fn quantile_ext<D: Ddf>(ddf: &D, target: DdfValue) -> f64 {
    let mut b: u64 = 0;
    let mut i = DBL_SIZE;
    while i > 0 {
        i -= 1;
        let cand = b + (1u64 << i);
        if !target.le(&ddf.eval(lex_to_f64(cand - 1))) {
            b = cand;
        }
    }
    lex_to_f64(b)
}

/// Support endpoints of `cdf`: the quantiles at the smallest positive
/// single and at 1.
pub fn bounds_quantile<C: Cdf>(cdf: &C) -> (f64, f64) {
    (quantile(cdf, f32::from_bits(1)), quantile(cdf, 1.0))
}

/// Support endpoints of the survival function `sf`, mirroring
/// [bounds_quantile].
pub fn bounds_quantile_sf<C: Cdf>(sf: &C) -> (f64, f64) {
    let below_one = f32::from_bits(1.0f32.to_bits() - 1);
    (quantile_sf(sf, below_one), quantile_sf(sf, 0.0))
}

/// Support endpoints of a dual distribution function.
pub fn bounds_quantile_ext<D: Ddf>(ddf: &D) -> (f64, f64) {
    let lo = quantile_ext(ddf, DdfValue::new(false, f32::from_bits(1)));
    let hi = quantile_ext(ddf, DdfValue::new(true, 0.0));
    (lo, hi)
}
