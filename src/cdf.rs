//! Cumulative distribution functions and the wrappers that normalize
//! user-supplied ones.
//!
//! A [Cdf] maps a double to the single-precision probability
//! `P(X <= x)`, is monotone non-decreasing along the lexicographic order
//! of its input, and maps NaN to 1. Survival functions reuse the same
//! trait with the mirrored conventions (`P(X > x)`, NaN to 0). The
//! factory functions below install those conventions over a plain
//! real-valued function, replacing hand-written boilerplate at every
//! call site.

/// A cumulative (or survival) distribution function over the doubles.
pub trait Cdf {
    /// Evaluate the distribution function at `x`.
    fn eval(&self, x: f64) -> f32;
}

impl<F: Fn(f64) -> f32> Cdf for F {
    #[inline]
    fn eval(&self, x: f64) -> f32 {
        self(x)
    }
}

/// Wrap a real-valued CDF, mapping NaN to 1.
pub fn cdf_p<F: Fn(f64) -> f64>(f: F) -> impl Cdf {
    move |x: f64| if x.is_nan() { 1.0 } else { f(x) as f32 }
}

/// Wrap a real-valued SF, mapping NaN to 0.
pub fn cdf_q<F: Fn(f64) -> f64>(f: F) -> impl Cdf {
    move |x: f64| if x.is_nan() { 0.0 } else { f(x) as f32 }
}

/// Wrap a real-valued CDF supported on the unsigned integers: NaN and
/// inputs beyond `u64::MAX` map to 1, negative-signed inputs (including
/// `-0.0`) to 0.
pub fn cdf_uint_p<F: Fn(f64) -> f64>(f: F) -> impl Cdf {
    move |x: f64| {
        if x.is_nan() {
            1.0
        } else if x.is_sign_negative() {
            0.0
        } else if x > u64::MAX as f64 {
            1.0
        } else {
            f(x) as f32
        }
    }
}

/// Wrap a real-valued SF supported on the unsigned integers, with the
/// conventions of [cdf_uint_p] mirrored.
pub fn cdf_uint_q<F: Fn(f64) -> f64>(f: F) -> impl Cdf {
    move |x: f64| {
        if x.is_nan() {
            0.0
        } else if x.is_sign_negative() {
            1.0
        } else if x > u64::MAX as f64 {
            0.0
        } else {
            f(x) as f32
        }
    }
}

/// CDF of a discrete distribution over `0..weights.len()`, where
/// `weights[i]` is the cumulative probability of `{0, ..., i}`.
pub fn cdf_discrete(weights: &[f32]) -> impl Cdf + '_ {
    move |x: f64| {
        if x.is_nan() {
            1.0
        } else if x.is_sign_negative() {
            0.0
        } else if x >= weights.len() as f64 {
            1.0
        } else {
            weights[x as usize]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_wrapper_conventions() {
        let cdf = cdf_uint_p(|x| 1.0 - 0.5f64.powi(1 + x as i32));
        assert_eq!(cdf.eval(f64::NAN), 1.0);
        assert_eq!(cdf.eval(-0.0), 0.0);
        assert_eq!(cdf.eval(-3.0), 0.0);
        assert_eq!(cdf.eval(1.9e19), 1.0);
        assert_eq!(cdf.eval(0.0), 0.5);
    }

    #[test]
    fn discrete_cdf_steps() {
        let w = [0.1f32, 0.3, 0.5, 1.0];
        let cdf = cdf_discrete(&w);
        assert_eq!(cdf.eval(0.0), 0.1);
        assert_eq!(cdf.eval(2.5), 0.5);
        assert_eq!(cdf.eval(4.0), 1.0);
        assert_eq!(cdf.eval(-1.0), 0.0);
        assert_eq!(cdf.eval(f64::NAN), 1.0);
    }
}
