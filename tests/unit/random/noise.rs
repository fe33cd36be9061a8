use super::*;

#[test]
fn value_noise_is_deterministic_per_seed() {
    let a = ValueNoise::seeded(1234);
    let b = ValueNoise::seeded(1234);
    for i in 0..64 {
        let x = f64::from(i) * 0.37;
        assert_eq!(a.sample(x, 10.0), b.sample(x, 10.0));
    }
}

#[test]
fn value_noise_is_bounded() {
    let n = ValueNoise::seeded(7);
    for i in 0..500 {
        let v = n.sample(f64::from(i) * 0.008 * 5.0, f64::from(i % 3) * 10.0);
        assert!((0.0..0.9375).contains(&v), "sample out of range: {v}");
    }
}

#[test]
fn value_noise_is_symmetric_in_sign() {
    let n = ValueNoise::seeded(3);
    assert_eq!(n.sample(-1.25, -2.5), n.sample(1.25, 2.5));
}

#[test]
fn value_noise_differs_across_seeds() {
    let a = ValueNoise::seeded(1);
    let b = ValueNoise::seeded(2);
    let differs = (0..32).any(|i| {
        let x = f64::from(i) * 0.5;
        a.sample(x, 0.0) != b.sample(x, 0.0)
    });
    assert!(differs);
}

#[test]
fn simplex_is_bounded_and_smooth() {
    let mut prev = simplex2([0.0, 0.0]);
    for i in 1..2000 {
        let x = f64::from(i) * 0.01;
        let v = simplex2([x, x * 0.7 + 3.0]);
        assert!((-1.05..=1.05).contains(&v), "simplex out of range: {v}");
        assert!((v - prev).abs() < 0.2, "simplex jumped at {x}");
        prev = v;
    }
}

#[test]
fn simplex_vanishes_on_lattice_origin() {
    assert!(simplex2([0.0, 0.0]).abs() < 1e-12);
}

#[test]
fn hash_is_unit_ranged() {
    for i in 0..100 {
        let h = hash2([f64::from(i), f64::from(i * 3)]);
        assert!((0.0..1.0).contains(&h));
    }
}
