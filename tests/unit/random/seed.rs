use super::*;

#[test]
fn strips_separators_and_parses() {
    assert_eq!(Seed::from_date("2026-01-31").raw(), 20_260_131);
    assert_eq!(Seed::from_date(" 2026-02-10 ").raw(), 20_260_210);
}

#[test]
fn non_numeric_dates_fall_back_to_zero() {
    assert_eq!(Seed::from_date("today").raw(), 0);
    assert_eq!(Seed::from_date("").raw(), 0);
    assert_eq!(Seed::from_date("x2026").raw(), 0);
    assert_eq!(Seed::from_date("today"), Seed::from_raw(0));
}

#[test]
fn trailing_garbage_keeps_leading_digits() {
    assert_eq!(Seed::from_date("2026-01-31T08:00").raw(), 20_260_131);
}

#[test]
fn overflowing_digits_fall_back_to_zero() {
    assert_eq!(Seed::from_date("99999999999999999999999").raw(), 0);
}

#[test]
fn diffusion_matches_formula() {
    let raw = 20_260_131i64;
    let expected = ((raw as f64 * 9301.0 + 49297.0).sin().abs() * 233_280.0).floor() as u32;
    assert_eq!(Seed::from_raw(raw).diffused(), expected);
    assert!(Seed::from_raw(raw).diffused() < 233_280);
}

#[test]
fn same_date_same_seed() {
    assert_eq!(Seed::from_date("2026-02-09"), Seed::from_date("2026-02-09"));
}

#[test]
fn shader_seed_is_bounded() {
    let s = Seed::from_date("2026-02-09").shader_seed();
    assert!((0.0..100.0).contains(&s));
}
