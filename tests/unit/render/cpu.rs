use super::*;
use crate::compile::plan::DrawLayer;
use crate::foundation::core::Canvas;

fn plan_with(ops: Vec<DrawOp>) -> PosterPlan {
    let mut plan = PosterPlan::new(Canvas::new(20.0, 10.0).unwrap());
    for op in ops {
        plan.push(DrawLayer::Background, op);
    }
    plan
}

#[test]
fn clear_fills_device_surface() {
    let plan = plan_with(vec![DrawOp::Clear {
        color: Rgba8::rgb(8, 9, 12),
    }]);
    let mut backend = CpuBackend::new(None);
    let frame = backend.render_plan(&plan, PixelDensity(2)).unwrap();
    assert_eq!((frame.width, frame.height), (40, 20));
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some([8, 9, 12, 255]));
    assert_eq!(frame.pixel(39, 19), Some([8, 9, 12, 255]));
}

#[test]
fn disc_covers_its_center_only() {
    let plan = plan_with(vec![
        DrawOp::Clear {
            color: Rgba8::rgb(0, 0, 0),
        },
        DrawOp::Disc {
            center: Point::new(10.0, 5.0),
            diameter: 4.0,
            color: Rgba8::rgb(255, 255, 255),
        },
    ]);
    let frame = CpuBackend::new(None).render_plan(&plan, PixelDensity(1)).unwrap();
    assert_eq!(frame.pixel(10, 5), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 255]));
}

#[test]
fn labels_and_text_are_skipped_without_font() {
    let plan = plan_with(vec![
        DrawOp::Clear {
            color: Rgba8::rgb(0, 0, 0),
        },
        DrawOp::Label {
            text: "OSLO".to_string(),
            anchor: Point::new(2.0, 5.0),
            size: 10.0,
            align: LabelAlign::Left,
            color: Rgba8::rgb(255, 255, 255),
        },
    ]);
    let mut backend = CpuBackend::new(None);
    let mut frame = backend.render_plan(&plan, PixelDensity(1)).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));

    let run = TextRun {
        text: "PULSE".to_string(),
        origin: Point::new(0.0, 0.0),
        size: 8.0,
        color: Rgba8::rgb(255, 255, 255),
        wrap_width: None,
        rotation_deg: 0.0,
        pivot: Point::ZERO,
    };
    let before = frame.clone();
    assert!(!backend.draw_text(&mut frame, std::slice::from_ref(&run), PixelDensity(1)).unwrap());
    assert_eq!(frame, before);
}

#[test]
fn oversized_surfaces_are_rejected() {
    let plan = PosterPlan::new(Canvas::new(70_000.0, 10.0).unwrap());
    assert!(CpuBackend::new(None).render_plan(&plan, PixelDensity(1)).is_err());
}

#[test]
fn channel_split_shifts_each_channel() {
    let mut frame = FrameRGBA::new(5, 1, true);
    for px in frame.data.chunks_exact_mut(4) {
        px.copy_from_slice(&[0, 0, 0, 255]);
    }
    let mut mask = vec![0u8; 5 * 4];
    mask[2 * 4 + 3] = 255;
    channel_split_over(&mut frame, &mask, [(1, 0), (0, 0), (-1, 0)], Rgba8::rgb(200, 210, 220));
    assert_eq!(frame.pixel(3, 0), Some([200, 0, 0, 255]));
    assert_eq!(frame.pixel(2, 0), Some([0, 210, 0, 255]));
    assert_eq!(frame.pixel(1, 0), Some([0, 0, 220, 255]));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn over_composites_premultiplied_layers() {
    let mut dst = vec![100, 100, 100, 255];
    premul_over_in_place(&mut dst, &[128, 0, 0, 128]).unwrap();
    assert_eq!(dst, vec![178, 50, 50, 255]);
    assert!(premul_over_in_place(&mut dst, &[0; 8]).is_err());
}
