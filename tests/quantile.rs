use rvg::{
    bounds_quantile, bounds_quantile_ext, bounds_quantile_sf, f64_to_lex, lex_to_f64, quantile,
    quantile_ext, quantile_sf, Cdf, DdfError, DdfValue, DualDist,
};

fn pred(x: f64) -> f64 {
    lex_to_f64(f64_to_lex(x) - 1)
}

fn square_cdf(x: f64) -> f32 {
    if x.is_nan() {
        1.0
    } else if x.is_sign_negative() {
        0.0
    } else if x >= 1.0 {
        1.0
    } else {
        (x * x) as f32
    }
}

fn exp_cdf(x: f64) -> f32 {
    if x.is_nan() {
        1.0
    } else if x.is_sign_negative() {
        0.0
    } else {
        (1.0 - (-x).exp()) as f32
    }
}

fn exp_sf(x: f64) -> f32 {
    if x.is_nan() {
        0.0
    } else if x.is_sign_negative() {
        1.0
    } else {
        (-x).exp() as f32
    }
}

fn cauchy_cdf(x: f64) -> f32 {
    if x.is_nan() {
        1.0
    } else {
        (0.5 + x.atan() / core::f64::consts::PI) as f32
    }
}

// cdf(x) >= q together with cdf(pred(x)) < q pins the exact inverse.
fn assert_quantile_invariant<C: Cdf>(cdf: &C, q: f32) {
    let x = quantile(cdf, q);
    assert!(cdf.eval(x) >= q, "q = {}", q);
    if f64_to_lex(x) > 0 {
        assert!(cdf.eval(pred(x)) < q, "q = {}", q);
    }
}

#[test]
fn square_quantiles() {
    let q25 = quantile(&square_cdf, 0.25);
    assert!((q25 - 0.5).abs() < 1e-7, "q25 = {}", q25);
    let q50 = quantile(&square_cdf, 0.5);
    assert!((q50 - 0.5f64.sqrt()).abs() < 1e-7, "q50 = {}", q50);
    for q in [0.1f32, 0.25, 0.5, 0.75, 0.9, 1.0] {
        assert_quantile_invariant(&square_cdf, q);
    }
}

#[test]
fn quantile_invariants_hold_for_cauchy() {
    for q in [
        f32::from_bits(1),
        1e-30,
        0.001,
        0.25,
        0.5,
        0.75,
        0.999,
        1.0 - f32::EPSILON / 2.0,
        1.0,
    ] {
        assert_quantile_invariant(&cauchy_cdf, q);
    }
}

#[test]
fn zero_quantile_is_the_bottom_of_the_order() {
    assert_eq!(quantile(&cauchy_cdf, 0.0), f64::NEG_INFINITY);
}

#[test]
fn exponential_support_bounds() {
    let (xlo, xhi) = bounds_quantile(&exp_cdf);
    // The smallest x whose single-precision CDF value is positive.
    assert!(xlo > 0.0 && xlo < 1e-40, "xlo = {:e}", xlo);
    assert!(exp_cdf(xlo) > 0.0);
    assert_eq!(exp_cdf(pred(xlo)), 0.0);
    // 1 - exp(-x) rounds to single-precision 1 from 25 ln 2 onwards.
    assert!(xhi > 17.0 && xhi < 18.0, "xhi = {}", xhi);
    assert_eq!(exp_cdf(xhi), 1.0);
    assert!(exp_cdf(pred(xhi)) < 1.0);
}

#[test]
fn survival_bounds_reach_deeper_into_the_tail() {
    let (slo, shi) = bounds_quantile_sf(&exp_sf);
    assert!(slo > 0.0 && slo < 1e-6, "slo = {:e}", slo);
    assert!(exp_sf(slo) < 1.0);
    assert_eq!(exp_sf(pred(slo)), 1.0);
    // exp(-x) underflows single precision only past 104; the survival
    // side sees far more of the upper tail than the CDF side.
    assert!(shi > 100.0 && shi < 110.0, "shi = {}", shi);
    assert_eq!(exp_sf(shi), 0.0);
    assert!(exp_sf(pred(shi)) > 0.0);
}

#[test]
fn dual_bounds_take_the_better_side() {
    let ddf = DualDist::new(exp_cdf, exp_sf).unwrap();
    let (xlo, xhi) = bounds_quantile_ext(&ddf);
    assert_eq!(xlo.to_bits(), bounds_quantile(&exp_cdf).0.to_bits());
    assert_eq!(xhi.to_bits(), bounds_quantile_sf(&exp_sf).1.to_bits());
}

#[test]
fn dual_quantile_inverts_both_sides() {
    let ddf = DualDist::new(exp_cdf, exp_sf).unwrap();
    // Below the median: the target probability comes from the CDF side.
    let x = quantile_ext(&ddf, DdfValue::new(false, 0.25));
    assert!((x - 0.2876820).abs() < 1e-5, "x = {}", x); // -ln(0.75)
    // Above: survival weight 0.25, i.e. the 0.75 quantile.
    let x = quantile_ext(&ddf, DdfValue::new(true, 0.25));
    assert!((x - 1.3862943).abs() < 1e-5, "x = {}", x); // -ln(0.25)
}

#[test]
fn ddf_construction_rejects_inconsistent_pairs() {
    let bad_sf = |_: f64| 0.6f32;
    match DualDist::new(exp_cdf, bad_sf) {
        Err(DdfError::InvalidSf) => (),
        other => panic!("expected InvalidSf, got {:?}", other.map(|_| ())),
    }
    assert_eq!(
        DdfError::InvalidSf.to_string(),
        "SF is inconsistent with its median cutoff"
    );
}

#[test]
fn cutoff_sits_just_above_the_median() {
    let ddf = DualDist::new(exp_cdf, exp_sf).unwrap();
    let c = ddf.cutoff();
    assert!((c - core::f64::consts::LN_2).abs() < 1e-6, "cutoff = {}", c);
    assert!(exp_cdf(c) > 0.5);
    assert!(exp_cdf(pred(c)) <= 0.5);
}
