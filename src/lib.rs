// Copyright (c) 2026 the rvg developers
//
// Licensed under either of
//
// * Apache License, Version 2.0
//   (https://www.apache.org/licenses/LICENSE-2.0)
// * MIT license
//   (https://opensource.org/licenses/MIT)
//
// at your option.
//
// Unless you explicitly state otherwise, any contribution intentionally submitted
// for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
// dual licensed as above, without any additional terms or conditions.

//! Exact random variate generation from user-supplied distribution
//! functions.
//!
//! Given a cumulative distribution function over the doubles, the
//! generators in this crate draw samples whose distribution is exactly
//! the one obtained by rounding an ideal real-valued variate of the
//! target distribution to a representable double. All probability
//! comparisons on the sampling path are carried out exactly, either by
//! run-length decompositions of single-precision differences
//! ([generate_opt]) or by arbitrary-precision rationals
//! ([generate_cbs]); the only randomness consumed is a stream of
//! uniform bits drawn through a [FlipState].
//!
//! Distributions enter as plain closures `f64 -> f32` returning
//! `P(X <= x)`, optionally paired with a survival function through
//! [DualDist] to keep tail probabilities accurate above the median.
//! [quantile] and friends invert a distribution function exactly over
//! the 64-bit lexicographic order of the doubles.
//!
//! # Examples
//!
//! ```
//! use rvg::{generate_opt, quantile, DeterministicRng, FlipState};
//!
//! // F(x) = x^2 over [0, 1].
//! let cdf = |x: f64| {
//!     if x.is_nan() {
//!         1.0f32
//!     } else if x.is_sign_negative() {
//!         0.0
//!     } else if x >= 1.0 {
//!         1.0
//!     } else {
//!         (x * x) as f32
//!     }
//! };
//!
//! let mut prng = FlipState::new(DeterministicRng::new(0x243F_6A88_85A3_08D3));
//! let sample = generate_opt(&cdf, &mut prng);
//! assert!((0.0..=1.0).contains(&sample));
//!
//! let median = quantile(&cdf, 0.5);
//! assert!((median - 0.5f64.sqrt()).abs() < 1e-7);
//! ```
//!
//! Any [rand::RngCore] can supply the bits:
//!
//! ```
//! # #[cfg(feature = "std")] {
//! use rand::{rngs::StdRng, SeedableRng};
//! use rvg::FlipState;
//!
//! let mut prng = FlipState::from_rng(StdRng::seed_from_u64(7));
//! assert!(prng.flip() < 2);
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod arith;
mod bernoulli;
mod bits;
mod cdf;
mod ddf;
mod error;
mod flip;
mod generate;
mod quantile;
mod uniform;

pub use arith::{
    ith_bit_of_fraction, ith_bit_of_fraction_big, subtract_big, subtract_big_ext, subtract_exact,
    subtract_exact_ext, SubtractExact, SubtractMode,
};
pub use bernoulli::{bernoulli, bernoulli_big};
pub use bits::{
    f64_to_lex, float2lex_32, float2lex_64, lex2float_32, lex2float_64, lex2sm_32, lex2sm_64,
    lex_to_f64, next_down_64, next_up_32, sm2lex_32, sm2lex_64, DBL_SIZE, DBL_SIZE_E, DBL_SIZE_M,
    FLT_SIZE, FLT_SIZE_E, FLT_SIZE_M,
};
pub use cdf::{cdf_discrete, cdf_p, cdf_q, cdf_uint_p, cdf_uint_q, Cdf};
pub use ddf::{Ddf, DdfValue, DualDist};
pub use error::DdfError;
pub use flip::{word_bit_len, DeterministicRng, FlipState, RandSource, WordSource};
pub use generate::{
    cdf_interval, cdf_interval_ext, generate_cbs, generate_cbs_ext, generate_opt, generate_opt_ext,
};
pub use quantile::{
    bounds_quantile, bounds_quantile_ext, bounds_quantile_sf, quantile, quantile_ext, quantile_sf,
};
pub use uniform::{
    sample_random_em, sample_random_emf, uniform, uniform_ext, uniformf, uniformf_ext, Round,
};
