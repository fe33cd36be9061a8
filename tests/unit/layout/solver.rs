use super::*;
use crate::dataset::model::MainLocation;

fn story(geo: bool) -> StoryRecord {
    StoryRecord {
        headline: "H".to_string(),
        description: "D".to_string(),
        intensity: 70.0,
        color: "#ff2d55".to_string(),
        url: String::new(),
        image_url: None,
        main_location: geo.then(|| MainLocation {
            name: "Oslo".to_string(),
            lat: 59.91,
            lng: 10.75,
        }),
    }
}

fn title(id: usize, top: f64, bottom: f64) -> TextBound {
    TextBound {
        kind: TextKind::Title,
        id: Some(id),
        top,
        bottom,
        left: 36.0,
        right: 564.0,
    }
}

fn canvas() -> Canvas {
    Canvas::new(600.0, 800.0).unwrap()
}

fn titles() -> Vec<TextBound> {
    vec![title(0, 288.0, 324.0), title(1, 384.0, 420.0), title(2, 480.0, 516.0)]
}

#[test]
fn slots_follow_title_gaps() {
    let stories = [story(true), story(true), story(true)];
    let layout = solve_layout(canvas(), &titles(), &stories, &mut Lcg::new(42));
    let p = &layout.positions;
    assert_eq!(p.len(), 3);
    assert!((228.0..=258.0).contains(&p[0].y), "{p:?}");
    assert!((346.0..=362.0).contains(&p[1].y), "{p:?}");
    assert!((442.0..=458.0).contains(&p[2].y), "{p:?}");
    for pos in p {
        assert!((120.0..480.0).contains(&pos.x));
    }
}

#[test]
fn replaying_same_seed_is_identical() {
    let stories = [story(true), story(false), story(true)];
    let a = solve_layout(canvas(), &titles(), &stories, &mut Lcg::new(7));
    let b = solve_layout(canvas(), &titles(), &stories, &mut Lcg::new(7));
    assert_eq!(a, b);
}

#[test]
fn fallback_without_three_titles() {
    let stories = [story(true), story(true), story(true)];
    let bounds = [title(0, 288.0, 324.0)];
    let layout = solve_layout(canvas(), &bounds, &stories, &mut Lcg::new(3));
    let p = &layout.positions;
    assert!((230.0..=250.0).contains(&p[0].y));
    assert!((310.0..=330.0).contains(&p[1].y));
    assert!((470.0..=490.0).contains(&p[2].y));
}

#[test]
fn non_geo_story_keeps_slot_but_leaves_chain() {
    let stories = [story(true), story(false), story(true)];
    let layout = solve_layout(canvas(), &titles(), &stories, &mut Lcg::new(11));
    assert_eq!(layout.positions.len(), 3);
    let marker_ids: Vec<_> = layout.markers.iter().map(|m| m.story).collect();
    assert_eq!(marker_ids, [0, 2]);
    assert_eq!(layout.curves.len(), 1);
    assert_eq!((layout.curves[0].from, layout.curves[0].to), (0, 2));
    assert_eq!(layout.curves[0].start, layout.positions[0].point());
    assert_eq!(layout.curves[0].end, layout.positions[2].point());
}

#[test]
fn single_geo_story_has_marker_but_no_curve() {
    let stories = [story(false), story(true)];
    let layout = solve_layout(canvas(), &titles(), &stories, &mut Lcg::new(5));
    assert!(layout.curves.is_empty());
    assert_eq!(layout.markers.len(), 1);
}

#[test]
fn label_side_stays_on_canvas() {
    let stories = [story(true), story(true), story(true)];
    for seed in 0..200 {
        let layout = solve_layout(canvas(), &titles(), &stories, &mut Lcg::new(seed));
        for m in &layout.markers {
            if m.position.x < 150.0 {
                assert_eq!(m.label_side, LabelSide::Right);
            }
            if m.position.x > 450.0 {
                assert_eq!(m.label_side, LabelSide::Left);
            }
        }
    }
}

#[test]
fn curve_control_is_bent_midpoint() {
    let stories = [story(true), story(true)];
    let layout = solve_layout(canvas(), &titles(), &stories, &mut Lcg::new(9));
    let c = layout.curves[0];
    let mid = c.start.midpoint(c.end);
    assert!((c.control.x - mid.x).abs() <= 50.0);
    assert!((c.control.y - mid.y).abs() <= 30.0);
    assert_eq!(quad_point(c.start, c.control, c.end, 0.0), c.start);
    let end = quad_point(c.start, c.control, c.end, 1.0);
    assert!((end.x - c.end.x).abs() < 1e-9 && (end.y - c.end.y).abs() < 1e-9);
}

#[test]
fn no_stories_no_layout() {
    let layout = solve_layout(canvas(), &titles(), &[], &mut Lcg::new(1));
    assert_eq!(layout, StoryLayout::default());
}
