//! Random variate generation by trie descent over the lexicographic
//! order of the doubles.
//!
//! Both generators walk the same binary trie: the root block covers all
//! 2^64 bit patterns, and each level splits the current block at its
//! lexicographic midpoint, choosing a side with probability proportional
//! to the CDF mass of the two halves. [generate_cbs] realizes the choice
//! with an exact rational Bernoulli coin per level; [generate_opt]
//! instead compares single bits of the two sub-block masses against a
//! committed position in the consumed bit stream, which lets it reuse
//! information across levels and reach the information-theoretic minimum
//! of consumed flips.

use crate::arith::{subtract_big, subtract_big_ext, subtract_exact, subtract_exact_ext, SubtractMode};
use crate::bernoulli::bernoulli_big;
use crate::bits::{lex_to_f64, DBL_SIZE};
use crate::cdf::Cdf;
use crate::ddf::{Ddf, DdfValue};
use crate::flip::{FlipState, WordSource};
use dashu_int::ops::UnsignedAbs;
use dashu_ratio::RBig;

/// CDF values at the endpoints of the block of doubles whose
/// lexicographic index starts with the `l`-bit prefix `b`.
///
/// Returns `(cdf(pred(b 0^m)), cdf(b 1^m))` with `m = 64 - l`; the
/// all-blocks base case `l = 0` is `(0, 1)`, and the leftmost block has
/// no predecessor and reports 0 on the left.
pub fn cdf_interval<C: Cdf>(cdf: &C, b: u64, l: u32) -> (f32, f32) {
    debug_assert!(l <= DBL_SIZE);
    if l == 0 {
        return (0.0, 1.0);
    }
    let m = DBL_SIZE - l;
    let cdf_r = cdf.eval(lex_to_f64((b << m) + (1u64 << m) - 1));
    let cdf_l = if b > 0 {
        cdf.eval(lex_to_f64((b << m) - 1))
    } else {
        0.0
    };
    (cdf_l, cdf_r)
}

/// Dual-distribution variant of [cdf_interval]; the base case is the
/// pair representing probabilities 0 and 1.
pub fn cdf_interval_ext<D: Ddf>(ddf: &D, b: u64, l: u32) -> (DdfValue, DdfValue) {
    debug_assert!(l <= DBL_SIZE);
    if l == 0 {
        return (DdfValue::new(false, 0.0), DdfValue::new(true, 0.0));
    }
    let m = DBL_SIZE - l;
    let v_r = ddf.eval(lex_to_f64((b << m) + (1u64 << m) - 1));
    let v_l = if b > 0 {
        ddf.eval(lex_to_f64((b << m) - 1))
    } else {
        DdfValue::new(false, 0.0)
    };
    (v_l, v_r)
}

/// Draw one double from `cdf`, consuming the minimum expected number of
/// flips.
///
/// The committed position `ell` counts how many bits of the consumed
/// stream are already reflected in the block boundaries; when the
/// sub-block masses diverge at that position the descent is forced and
/// costs nothing, otherwise fresh flips advance the position until one
/// agrees with a mass bit.
pub fn generate_opt<C: Cdf, S: WordSource>(cdf: &C, prng: &mut FlipState<S>) -> f64 {
    let mut b: u64 = 0;
    let mut ell: u32 = 0;
    let mut cdf_l: f32 = 0.0;
    let mut cdf_r: f32 = 1.0;

    for l in 0..DBL_SIZE {
        // Midpoint of the current block: b followed by 0 1^m.
        let m = DBL_SIZE - (l + 1);
        let cdf_m = cdf.eval(lex_to_f64(((b << 1) << m) + (1u64 << m) - 1));

        let b0 = b << 1;
        let b1 = b0 | 1;

        #[cfg(debug_assertions)]
        {
            let (check_l, check_r) = cdf_interval(cdf, b, l);
            debug_assert!(check_l == cdf_l && check_r == cdf_r);
            debug_assert!(cdf_interval(cdf, b0, l + 1) == (cdf_l, cdf_m));
            debug_assert!(cdf_interval(cdf, b1, l + 1) == (cdf_m, cdf_r));
            debug_assert!(cdf_l <= cdf_m && cdf_m <= cdf_r);
        }

        // Massless half: descend the other way for free.
        if cdf_m == cdf_r {
            b = b0;
            cdf_r = cdf_m;
            continue;
        }
        if cdf_m == cdf_l {
            b = b1;
            cdf_l = cdf_m;
            continue;
        }

        let ss0 = subtract_exact(SubtractMode::Sub0, cdf_m, cdf_l);
        let ss1 = subtract_exact(SubtractMode::Sub0, cdf_r, cdf_m);

        if ell > 0 {
            // The committed bits already tell the halves apart.
            let a0 = ss0.ith_bit(ell);
            let a1 = ss1.ith_bit(ell);
            if a0 == 1 && a1 == 0 {
                b = b0;
                cdf_r = cdf_m;
                continue;
            }
            if a0 == 0 && a1 == 1 {
                b = b1;
                cdf_l = cdf_m;
                continue;
            }
        }
        loop {
            ell += 1;
            let a0 = ss0.ith_bit(ell);
            let a1 = ss1.ith_bit(ell);
            let x = prng.flip();
            if x == 0 && a0 == 1 {
                b = b0;
                cdf_r = cdf_m;
                break;
            }
            if x == 1 && a1 == 1 {
                b = b1;
                cdf_l = cdf_m;
                break;
            }
        }
    }

    lex_to_f64(b)
}

/// Dual-distribution variant of [generate_opt].
pub fn generate_opt_ext<D: Ddf, S: WordSource>(ddf: &D, prng: &mut FlipState<S>) -> f64 {
    let mut b: u64 = 0;
    let mut ell: u32 = 0;
    let mut v_l = DdfValue::new(false, 0.0);
    let mut v_r = DdfValue::new(true, 0.0);

    for l in 0..DBL_SIZE {
        let m = DBL_SIZE - (l + 1);
        let v_m = ddf.eval(lex_to_f64(((b << 1) << m) + (1u64 << m) - 1));

        let b0 = b << 1;
        let b1 = b0 | 1;

        #[cfg(debug_assertions)]
        {
            let (check_l, check_r) = cdf_interval_ext(ddf, b, l);
            debug_assert!(check_l == v_l && check_r == v_r);
            debug_assert!(cdf_interval_ext(ddf, b0, l + 1) == (v_l, v_m));
            debug_assert!(cdf_interval_ext(ddf, b1, l + 1) == (v_m, v_r));
            debug_assert!(v_l.le(&v_m) && v_m.le(&v_r));
        }

        if v_m == v_r {
            b = b0;
            v_r = v_m;
            continue;
        }
        if v_m == v_l {
            b = b1;
            v_l = v_m;
            continue;
        }

        let ss0 = subtract_exact_ext(v_m, v_l);
        let ss1 = subtract_exact_ext(v_r, v_m);

        if ell > 0 {
            let a0 = ss0.ith_bit(ell);
            let a1 = ss1.ith_bit(ell);
            if a0 == 1 && a1 == 0 {
                b = b0;
                v_r = v_m;
                continue;
            }
            if a0 == 0 && a1 == 1 {
                b = b1;
                v_l = v_m;
                continue;
            }
        }
        loop {
            ell += 1;
            let a0 = ss0.ith_bit(ell);
            let a1 = ss1.ith_bit(ell);
            let x = prng.flip();
            if x == 0 && a0 == 1 {
                b = b0;
                v_r = v_m;
                break;
            }
            if x == 1 && a1 == 1 {
                b = b1;
                v_l = v_m;
                break;
            }
        }
    }

    lex_to_f64(b)
}

/// Draw one double from `cdf` by conditional bit sampling: one exact
/// rational Bernoulli coin per non-trivial level.
///
/// Simpler than [generate_opt] and distributed identically; it is the
/// reference the optimal generator is validated against.
pub fn generate_cbs<C: Cdf, S: WordSource>(cdf: &C, prng: &mut FlipState<S>) -> f64 {
    let mut b: u64 = 0;
    let mut cdf_l: f32 = 0.0;
    let mut cdf_r: f32 = 1.0;
    // Exact mass of the current block.
    let mut cdf_w = RBig::ONE;

    for l in 0..DBL_SIZE {
        let m = DBL_SIZE - (l + 1);
        let cdf_m = cdf.eval(lex_to_f64(((b << 1) << m) + (1u64 << m) - 1));

        let b0 = b << 1;
        let b1 = b0 | 1;

        #[cfg(debug_assertions)]
        {
            let (check_l, check_r) = cdf_interval(cdf, b, l);
            debug_assert!(check_l == cdf_l && check_r == cdf_r);
            debug_assert!(cdf_interval(cdf, b0, l + 1) == (cdf_l, cdf_m));
            debug_assert!(cdf_interval(cdf, b1, l + 1) == (cdf_m, cdf_r));
            debug_assert!(cdf_l <= cdf_m && cdf_m <= cdf_r);
        }

        if cdf_m == cdf_r {
            b = b0;
            cdf_r = cdf_m;
            continue;
        }
        if cdf_m == cdf_l {
            b = b1;
            cdf_l = cdf_m;
            continue;
        }

        // p(b1)/p(b), in lowest terms.
        let cdf_w1 = subtract_big(SubtractMode::Sub0, cdf_r, cdf_m);
        let r = &cdf_w1 / &cdf_w;
        let (k, n) = r.into_parts();

        #[cfg(debug_assertions)]
        {
            let cdf_w0 = subtract_big(SubtractMode::Sub0, cdf_m, cdf_l);
            debug_assert!(cdf_w == &cdf_w0 + &cdf_w1);
        }

        if bernoulli_big(&k.unsigned_abs(), &n, prng) == 0 {
            b = b0;
            cdf_r = cdf_m;
            cdf_w = subtract_big(SubtractMode::Sub0, cdf_m, cdf_l);
        } else {
            b = b1;
            cdf_l = cdf_m;
            cdf_w = cdf_w1;
        }
    }

    lex_to_f64(b)
}

/// Dual-distribution variant of [generate_cbs].
pub fn generate_cbs_ext<D: Ddf, S: WordSource>(ddf: &D, prng: &mut FlipState<S>) -> f64 {
    let mut b: u64 = 0;
    let mut v_l = DdfValue::new(false, 0.0);
    let mut v_r = DdfValue::new(true, 0.0);
    let mut cdf_w = RBig::ONE;

    for l in 0..DBL_SIZE {
        let m = DBL_SIZE - (l + 1);
        let v_m = ddf.eval(lex_to_f64(((b << 1) << m) + (1u64 << m) - 1));

        let b0 = b << 1;
        let b1 = b0 | 1;

        #[cfg(debug_assertions)]
        {
            let (check_l, check_r) = cdf_interval_ext(ddf, b, l);
            debug_assert!(check_l == v_l && check_r == v_r);
            debug_assert!(cdf_interval_ext(ddf, b0, l + 1) == (v_l, v_m));
            debug_assert!(cdf_interval_ext(ddf, b1, l + 1) == (v_m, v_r));
            debug_assert!(v_l.le(&v_m) && v_m.le(&v_r));
        }

        if v_m == v_r {
            b = b0;
            v_r = v_m;
            continue;
        }
        if v_m == v_l {
            b = b1;
            v_l = v_m;
            continue;
        }

        let cdf_w1 = subtract_big_ext(v_r, v_m);
        let r = &cdf_w1 / &cdf_w;
        let (k, n) = r.into_parts();

        #[cfg(debug_assertions)]
        {
            let cdf_w0 = subtract_big_ext(v_m, v_l);
            debug_assert!(cdf_w == &cdf_w0 + &cdf_w1);
        }

        if bernoulli_big(&k.unsigned_abs(), &n, prng) == 0 {
            b = b0;
            v_r = v_m;
            cdf_w = subtract_big_ext(v_m, v_l);
        } else {
            b = b1;
            v_l = v_m;
            cdf_w = cdf_w1;
        }
    }

    lex_to_f64(b)
}
