//! Error types and panic cases.

use core::fmt::{self, Display, Formatter};

/// A (CDF, SF) pair failed validation around the median cutoff.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DdfError {
    /// The CDF still exceeds 1/2 immediately below the cutoff.
    InvalidCdf,
    /// The SF is at least 1/2 at the cutoff.
    InvalidSf,
}

impl Display for DdfError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DdfError::InvalidCdf => f.write_str("CDF is inconsistent with its median cutoff"),
            DdfError::InvalidSf => f.write_str("SF is inconsistent with its median cutoff"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DdfError {}

/// Panics when a word generator has a range shape other than
/// [0, 2^m - 1] or [1, 2^m - 2].
pub(crate) fn panic_unsupported_range(min: u64, max: u64) -> ! {
    panic!(
        "word generator range [{}, {}] is not [0, 2^m - 1] or [1, 2^m - 2]",
        min, max
    )
}

/// Panics when a Bernoulli weight k/n is degenerate or improper.
pub(crate) fn panic_bernoulli_weight() -> ! {
    panic!("bernoulli weight k/n requires 0 < k < n")
}

/// Panics when exact subtraction operands violate the mode's preconditions.
pub(crate) fn panic_subtract_domain() -> ! {
    panic!("operands outside the domain of exact subtraction")
}

/// Panics when a pair of dual-distribution values cannot be subtracted,
/// i.e. the minuend lies below the median while the subtrahend lies above.
pub(crate) fn panic_ddf_order() -> ! {
    panic!("dual distribution values are not monotonically ordered")
}

/// Panics when a distribution function returns a non-finite probability.
pub(crate) fn panic_nonfinite_prob() -> ! {
    panic!("distribution function returned a non-finite probability")
}
