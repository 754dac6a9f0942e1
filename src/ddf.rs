//! Dual distribution functions.
//!
//! Near the upper half of a distribution the CDF is close to 1 and its
//! single-precision value carries almost no information about the tail.
//! A dual distribution function (DDF) therefore reports probabilities as
//! a side/tail pair: `(d = 0, q)` stands for the probability `q` taken
//! from the CDF, `(d = 1, q)` for `1 - q` taken from the survival
//! function. The switch happens at the exact quantile of the first
//! single above one half, so `q` never exceeds `1/2` on either side and
//! subtractions of nearby probabilities stay exact.

use crate::bits::{next_down_64, next_up_32};
use crate::cdf::Cdf;
use crate::error::DdfError;
use crate::quantile::quantile;

/// One probability reported by a dual distribution function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DdfValue {
    /// Which side of the median cutoff the value comes from.
    pub d: bool,
    /// The tail probability: `p = q` when `d` is false, `p = 1 - q`
    /// otherwise.
    pub q: f32,
}

impl DdfValue {
    #[inline]
    pub fn new(d: bool, q: f32) -> Self {
        DdfValue { d, q }
    }

    /// Whether the pair satisfies the representation invariant:
    /// `q` in `[0, 1/2]` on the CDF side, `[0, 1/2)` on the SF side.
    #[inline]
    pub fn is_valid(&self) -> bool {
        if self.d {
            0.0 <= self.q && self.q < 0.5
        } else {
            0.0 <= self.q && self.q <= 0.5
        }
    }

    /// The represented probability, widened to a double.
    #[inline]
    pub fn prob(&self) -> f64 {
        if self.d {
            1.0 - self.q as f64
        } else {
            self.q as f64
        }
    }

    /// Total order on represented probabilities: `self <= other`.
    #[inline]
    pub fn le(&self, other: &DdfValue) -> bool {
        debug_assert!(self.is_valid() && other.is_valid());
        (!self.d & other.d)
            || (!self.d && !other.d && self.q <= other.q)
            || (self.d && other.d && other.q <= self.q)
    }
}

/// A dual distribution function over the doubles.
pub trait Ddf {
    /// Evaluate the DDF at `x`.
    fn eval(&self, x: f64) -> DdfValue;
}

impl<F: Fn(f64) -> DdfValue> Ddf for F {
    #[inline]
    fn eval(&self, x: f64) -> DdfValue {
        self(x)
    }
}

/// A DDF assembled from a (CDF, SF) pair around a precomputed cutoff.
#[derive(Clone, Copy, Debug)]
pub struct DualDist<C, S> {
    cdf: C,
    sf: S,
    cutoff: f64,
    cutoff_negative: bool,
}

impl<C: Cdf, S: Cdf> DualDist<C, S> {
    /// Pair a CDF with its survival function.
    ///
    /// The cutoff is the exact quantile of the first single above one
    /// half. Construction fails if either function disagrees with the
    /// cutoff on the adjacent side, which would let a tail probability
    /// escape `[0, 1/2]`.
    pub fn new(cdf: C, sf: S) -> Result<Self, DdfError> {
        let cutoff = quantile(&cdf, next_up_32(0.5));
        if cdf.eval(next_down_64(cutoff)) > 0.5 {
            return Err(DdfError::InvalidCdf);
        }
        if sf.eval(cutoff) >= 0.5 {
            return Err(DdfError::InvalidSf);
        }
        Ok(DualDist {
            cutoff_negative: cutoff.is_sign_negative(),
            cdf,
            sf,
            cutoff,
        })
    }

    /// The x below which probabilities are reported from the CDF side.
    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

impl<C: Cdf, S: Cdf> Ddf for DualDist<C, S> {
    fn eval(&self, x: f64) -> DdfValue {
        // A signed-zero cutoff splits -0.0 and +0.0: numeric comparison
        // cannot see the difference, the sign test can.
        let below = x < self.cutoff
            || (x == self.cutoff && x.is_sign_negative() && !self.cutoff_negative);
        let v = if below {
            DdfValue::new(false, self.cdf.eval(x))
        } else {
            DdfValue::new(true, self.sf.eval(x))
        };
        debug_assert!(v.is_valid());
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddf_value_order() {
        let lo = DdfValue::new(false, 0.2);
        let mid = DdfValue::new(false, 0.5);
        let hi = DdfValue::new(true, 0.3);
        let top = DdfValue::new(true, 0.0);
        assert!(lo.le(&mid) && mid.le(&hi) && hi.le(&top));
        assert!(!hi.le(&mid) && !top.le(&hi));
        assert!(lo.le(&lo));
    }

    #[test]
    fn ddf_value_validity() {
        assert!(DdfValue::new(false, 0.5).is_valid());
        assert!(!DdfValue::new(true, 0.5).is_valid());
        assert!(!DdfValue::new(false, 0.6).is_valid());
    }
}
