use super::*;

#[test]
fn fixed_advance_single_line() {
    let mut m = FixedAdvance::default();
    let e = m.measure("ABCDE", TextStyle::new(10.0, 1.0), None).unwrap();
    assert_eq!(e.lines, 1);
    assert!((e.width - 30.0).abs() < 1e-9);
    assert!((e.height - 10.0).abs() < 1e-9);
}

#[test]
fn fixed_advance_wraps_greedily() {
    let mut m = FixedAdvance { ratio: 1.0 };
    // 10px per char; "AAA BBB" is 70px, so a 50px box breaks it.
    let e = m
        .measure("AAA BBB CC", TextStyle::new(10.0, 1.5), Some(65.0))
        .unwrap();
    assert_eq!(e.lines, 2);
    assert!((e.width - 60.0).abs() < 1e-9, "{e:?}");
    assert!((e.height - 30.0).abs() < 1e-9);
}

#[test]
fn overlong_word_takes_its_own_line() {
    let mut m = FixedAdvance { ratio: 1.0 };
    let e = m
        .measure("A LONGWORD B", TextStyle::new(10.0, 1.0), Some(30.0))
        .unwrap();
    assert_eq!(e.lines, 3);
    assert!((e.width - 80.0).abs() < 1e-9);
}

#[test]
fn empty_text_has_no_lines() {
    let mut m = FixedAdvance::default();
    let e = m.measure("", TextStyle::new(12.0, 1.0), None).unwrap();
    assert_eq!(e.width, 0.0);
    assert_eq!(e.lines, 0);
}

#[test]
fn rejects_bad_styles() {
    let mut m = FixedAdvance::default();
    assert!(m.measure("x", TextStyle::new(0.0, 1.0), None).is_err());
    assert!(m.measure("x", TextStyle::new(10.0, f64::NAN), None).is_err());
}

#[test]
fn empty_font_bytes_are_rejected() {
    assert!(FontFace::from_bytes(Vec::new()).is_err());
}
