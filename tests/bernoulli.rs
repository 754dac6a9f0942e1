use dashu_int::UBig;
use rand::{rngs::StdRng, SeedableRng};
use rvg::{bernoulli, bernoulli_big, FlipState};

#[test]
fn empirical_frequency_converges() {
    let mut prng = FlipState::from_rng(StdRng::seed_from_u64(20));
    for (k, n) in [(1u64, 2u64), (1, 3), (3, 7), (13, 64), (999, 1000)] {
        let trials = 200_000;
        let mut ones = 0u64;
        for _ in 0..trials {
            ones += bernoulli(k, n, &mut prng) as u64;
        }
        let p = k as f64 / n as f64;
        let sigma = (p * (1.0 - p) / trials as f64).sqrt();
        let err = (ones as f64 / trials as f64 - p).abs();
        assert!(err < 6.0 * sigma.max(1e-4), "k/n = {}/{}: err {}", k, n, err);
    }
}

#[test]
fn expected_flips_stay_near_two() {
    let mut prng = FlipState::from_rng(StdRng::seed_from_u64(21));
    let trials = 100_000;
    prng.reset_num_flips();
    for _ in 0..trials {
        let _ = bernoulli(3, 7, &mut prng);
    }
    let avg = prng.num_flips() as f64 / trials as f64;
    // The walk stops with probability 1/2 per flip.
    assert!(avg > 1.9 && avg < 2.1, "average flips {}", avg);
}

#[test]
fn big_variant_matches_native_on_random_streams() {
    for seed in 0..20 {
        let mut fa = FlipState::from_rng(StdRng::seed_from_u64(seed));
        let mut fb = FlipState::from_rng(StdRng::seed_from_u64(seed));
        for (k, n) in [(1u64, 3u64), (2, 5), (7, 16), (11, 12)] {
            assert_eq!(
                bernoulli(k, n, &mut fa),
                bernoulli_big(&UBig::from(k), &UBig::from(n), &mut fb)
            );
            assert_eq!(fa.num_flips(), fb.num_flips());
        }
    }
}

#[test]
fn big_weights_beyond_native_range() {
    // k/n = (2^80 + 1) / 2^81, essentially one half.
    let n = UBig::ONE << 81;
    let k = (UBig::ONE << 80) + UBig::ONE;
    let mut prng = FlipState::from_rng(StdRng::seed_from_u64(22));
    let trials = 20_000;
    let mut ones = 0u64;
    for _ in 0..trials {
        ones += bernoulli_big(&k, &n, &mut prng) as u64;
    }
    let freq = ones as f64 / trials as f64;
    assert!((freq - 0.5).abs() < 0.02, "freq {}", freq);
}
