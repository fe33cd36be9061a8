use super::*;
use crate::dataset::model::MainLocation;
use crate::layout::solver::solve_layout;
use crate::random::prng::Lcg;

fn story(geo: bool, intensity: f64, color: &str) -> StoryRecord {
    StoryRecord {
        headline: "H".to_string(),
        description: "D".to_string(),
        intensity,
        color: color.to_string(),
        url: String::new(),
        image_url: None,
        main_location: geo.then(|| MainLocation {
            name: "Tokyo".to_string(),
            lat: 35.6762,
            lng: 139.6503,
        }),
    }
}

fn compile(stories: &[StoryRecord]) -> PosterPlan {
    let canvas = Canvas::new(600.0, 800.0).unwrap();
    let layout = solve_layout(canvas, &[], stories, &mut Lcg::new(1234));
    compile_poster(canvas, stories, &layout, &ValueNoise::seeded(1234))
}

#[test]
fn empty_poster_is_background_and_grid() {
    let plan = compile(&[]);
    assert_eq!(plan.count(DrawLayer::Background), 1);
    assert_eq!(plan.count(DrawLayer::Grid), 20 + 27);
    assert_eq!(plan.ops.len(), 1 + 47);
}

#[test]
fn heatmap_rings_shrink_and_fade_in() {
    let plan = compile(&[story(true, 100.0, "#ff2d55")]);
    let discs: Vec<_> = plan
        .ops_in(DrawLayer::Heatmap)
        .map(|op| match op {
            DrawOp::Disc { color, .. } => *color,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    // r = 500, 495, ..., 15, then the center dot.
    assert_eq!(discs.len(), 98 + 1);
    assert_eq!(discs[0].a, 0);
    assert_eq!(discs[97].a, 109);
    assert_eq!(discs[0].r, 0xff);
    assert_eq!(*discs.last().unwrap(), Rgba8::rgba(255, 255, 255, 180));
}

#[test]
fn intensity_is_clamped_to_range() {
    let low = compile(&[story(true, 10.0, "#ff2d55")]);
    let floor = compile(&[story(true, 40.0, "#ff2d55")]);
    assert_eq!(low.count(DrawLayer::Heatmap), floor.count(DrawLayer::Heatmap));
}

#[test]
fn invalid_story_color_falls_back_to_palette() {
    let plan = compile(&[story(true, 60.0, "not-a-color")]);
    let first = plan.ops_in(DrawLayer::Heatmap).next().unwrap();
    match first {
        DrawOp::Disc { color, .. } => assert_eq!(color.with_alpha(255), PALETTE[0]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn markers_carry_two_line_labels() {
    let plan = compile(&[story(true, 60.0, "#34c759")]);
    let labels: Vec<_> = plan
        .ops_in(DrawLayer::Labels)
        .map(|op| match op {
            DrawOp::Label { text, size, .. } => (text.clone(), *size),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        labels,
        [("TOKYO".to_string(), 10.0), ("35.7, 139.7".to_string(), 8.0)]
    );
    assert_eq!(plan.count(DrawLayer::Markers), 1);
    assert_eq!(plan.count(DrawLayer::Curves), 0);
}

#[test]
fn curves_are_dashed_in_fifteen_segments() {
    let plan = compile(&[story(true, 60.0, "#fff"), story(false, 60.0, "#fff"), story(true, 60.0, "#fff")]);
    assert_eq!(plan.count(DrawLayer::Curves), 15);
    assert_eq!(plan.count(DrawLayer::Markers), 2);
}

#[test]
fn to_fixed_rounds_like_javascript() {
    assert_eq!(to_fixed1(0.25), "0.3");
    assert_eq!(to_fixed1(-0.25), "-0.3");
    assert_eq!(to_fixed1(1.15), "1.1");
    assert_eq!(to_fixed1(51.5074), "51.5");
    assert_eq!(to_fixed1(-0.1278), "-0.1");
}
