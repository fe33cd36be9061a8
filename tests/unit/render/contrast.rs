use super::*;

fn solid(w: u32, h: u32, v: u8) -> FrameRGBA {
    let mut f = FrameRGBA::new(w, h, true);
    for px in f.data.chunks_exact_mut(4) {
        px.copy_from_slice(&[v, v, v, 255]);
    }
    f
}

fn bound(kind: TextKind, left: f64, top: f64, right: f64, bottom: f64) -> TextBound {
    TextBound {
        kind,
        id: None,
        top,
        bottom,
        left,
        right,
    }
}

#[test]
fn threshold_collapses_to_fifty() {
    assert_eq!(select_text_color(200.0), TEXT_BRIGHT);
    assert_eq!(select_text_color(120.0), TEXT_BRIGHT);
    assert_eq!(select_text_color(50.5), TEXT_BRIGHT);
    assert_eq!(select_text_color(50.0), TEXT_MUTED);
    assert_eq!(select_text_color(0.0), TEXT_MUTED);
}

#[test]
fn exp_blocks_use_dim_gray() {
    assert_eq!(color_for_kind(TextKind::Exp, TEXT_MUTED), EXP_MUTED);
    assert_eq!(color_for_kind(TextKind::Exp, TEXT_BRIGHT), TEXT_BRIGHT);
    assert_eq!(color_for_kind(TextKind::Bottom, TEXT_MUTED), TEXT_MUTED);
    assert_eq!(color_for_kind(TextKind::Title, TEXT_MUTED), TEXT_MUTED);
}

#[test]
fn samples_scale_with_density() {
    // Left half dark, right half bright, at density 2.
    let mut f = solid(40, 20, 10);
    for y in 0..20 {
        for x in 20..40 {
            let i = (y * 40 + x) * 4;
            f.data[i..i + 3].copy_from_slice(&[250, 250, 250]);
        }
    }
    let left = bound(TextKind::Title, 0.0, 0.0, 10.0, 10.0);
    let right = bound(TextKind::Title, 10.0, 0.0, 20.0, 10.0);
    assert_eq!(sample_brightness(&f, &left, PixelDensity(2)), 10.0);
    assert_eq!(sample_brightness(&f, &right, PixelDensity(2)), 250.0);
}

#[test]
fn empty_or_outside_bounds_read_as_dark() {
    let f = solid(10, 10, 255);
    let empty = bound(TextKind::Title, 5.0, 5.0, 5.0, 5.0);
    assert_eq!(sample_brightness(&f, &empty, PixelDensity(1)), 0.0);
    let below = bound(TextKind::Title, 0.0, 50.0, 10.0, 60.0);
    assert_eq!(sample_brightness(&f, &below, PixelDensity(1)), 0.0);
    let above = bound(TextKind::Title, 0.0, -30.0, 5.0, -25.0);
    assert_eq!(sample_brightness(&f, &above, PixelDensity(1)), 0.0);
}

#[test]
fn selection_is_idempotent_on_unchanged_frame() {
    let f = solid(60, 60, 90);
    let bounds = [
        bound(TextKind::Title, 0.0, 0.0, 30.0, 20.0),
        bound(TextKind::Exp, 10.0, 30.0, 50.0, 50.0),
        bound(TextKind::Bottom, 0.0, 50.0, 60.0, 60.0),
    ];
    let a = adaptive_text_colors(&f, &bounds, PixelDensity(1));
    let b = adaptive_text_colors(&f, &bounds, PixelDensity(1));
    assert_eq!(a, b);
    assert!(a.iter().all(|c| c.color == TEXT_BRIGHT));
}
