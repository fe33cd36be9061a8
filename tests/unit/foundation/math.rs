use super::*;

#[test]
fn fnv_hash_is_incremental() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"poster");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"po");
    b.write_bytes(b"ster");
    assert_eq!(a.finish(), b.finish());
    assert_eq!(Fnv1a64::new_default().finish(), 0xcbf2_9ce4_8422_2325);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn map_range_is_unclamped_and_linear() {
    assert_eq!(map_range(40.0, 40.0, 100.0, 200.0, 500.0), 200.0);
    assert_eq!(map_range(100.0, 40.0, 100.0, 200.0, 500.0), 500.0);
    assert_eq!(map_range(70.0, 40.0, 100.0, 200.0, 500.0), 350.0);
    assert_eq!(map_range(10.0, 10.0, 10.0, 1.0, 2.0), 1.0);
    assert!(map_range(130.0, 40.0, 100.0, 200.0, 500.0) > 500.0);
}

#[test]
fn smoothstep_handles_reversed_edges() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert_eq!(smoothstep(0.65, 0.0, 0.0), 1.0);
    assert_eq!(smoothstep(0.65, 0.0, 0.65), 0.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn fract_stays_in_unit_interval() {
    for x in [-2.75, -0.5, 0.0, 0.25, 10_000.125] {
        let f = fract(x);
        assert!((0.0..1.0).contains(&f), "fract({x}) = {f}");
    }
}
