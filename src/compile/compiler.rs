use crate::compile::plan::{DrawLayer, DrawOp, LabelAlign, PosterPlan};
use crate::dataset::model::StoryRecord;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::math::map_range;
use crate::layout::solver::{LabelSide, StoryLayout, quad_point};
use crate::palette::color::parse_css_color;
use crate::palette::gradient::PALETTE;
use crate::random::noise::ValueNoise;

pub const BACKGROUND: Rgba8 = Rgba8::rgb(8, 9, 12);
const GRID_COLOR: Rgba8 = Rgba8::rgba(255, 255, 255, 12);
const GRID_STEP: f64 = 30.0;
const GRID_WIDTH: f64 = 0.5;
const CURVE_COLOR: Rgba8 = Rgba8::rgba(255, 255, 255, 30);
const CURVE_STEPS: usize = 30;
const HEAT_CENTER: Rgba8 = Rgba8::rgba(255, 255, 255, 180);
const MARKER_COLOR: Rgba8 = Rgba8::rgba(255, 255, 255, 200);
const MARKER_DIAMETER: f64 = 6.0;
const LABEL_GAP: f64 = 14.0;
const REFERENCE_WIDTH: f64 = 600.0;

/// Lower the poster canvas into draw ops.
///
/// `stories` must be the same slice the layout was solved for.
#[tracing::instrument(skip_all, fields(markers = layout.markers.len(), curves = layout.curves.len()))]
pub fn compile_poster(
    canvas: Canvas,
    stories: &[StoryRecord],
    layout: &StoryLayout,
    noise: &ValueNoise,
) -> PosterPlan {
    let mut plan = PosterPlan::new(canvas);
    plan.push(DrawLayer::Background, DrawOp::Clear { color: BACKGROUND });
    push_grid(&mut plan);
    push_heatmap(&mut plan, stories, layout, noise);
    push_curves(&mut plan, layout);
    push_markers(&mut plan, stories, layout);
    tracing::debug!(ops = plan.ops.len(), "poster plan compiled");
    plan
}

fn push_grid(plan: &mut PosterPlan) {
    let (w, h) = (plan.canvas.width, plan.canvas.height);
    let mut x = 0.0;
    while x < w {
        plan.push(
            DrawLayer::Grid,
            DrawOp::Line {
                from: Point::new(x, 0.0),
                to: Point::new(x, h),
                width: GRID_WIDTH,
                color: GRID_COLOR,
            },
        );
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y < h {
        plan.push(
            DrawLayer::Grid,
            DrawOp::Line {
                from: Point::new(0.0, y),
                to: Point::new(w, y),
                width: GRID_WIDTH,
                color: GRID_COLOR,
            },
        );
        y += GRID_STEP;
    }
}

fn push_heatmap(
    plan: &mut PosterPlan,
    stories: &[StoryRecord],
    layout: &StoryLayout,
    noise: &ValueNoise,
) {
    let scale = plan.canvas.width / REFERENCE_WIDTH;
    for m in &layout.markers {
        let Some(story) = stories.get(m.story) else {
            continue;
        };
        let base = story_color(story, m.story);
        let center = m.position.point();
        let intensity = story.intensity.clamp(40.0, 100.0);
        let max_r = map_range(intensity, 40.0, 100.0, 200.0, 500.0) * scale;

        let mut r = max_r;
        while r > 10.0 {
            let alpha = map_range(r, 10.0, max_r, 110.0, 0.0).round().clamp(0.0, 255.0) as u8;
            let wobble = noise.sample(r * 0.008, m.story as f64 * 10.0) * 30.0 * scale;
            plan.push(
                DrawLayer::Heatmap,
                DrawOp::Disc {
                    center,
                    diameter: r + wobble,
                    color: base.with_alpha(alpha),
                },
            );
            r -= 5.0;
        }
        plan.push(
            DrawLayer::Heatmap,
            DrawOp::Disc {
                center,
                diameter: 6.0 * scale + 2.0,
                color: HEAT_CENTER,
            },
        );
    }
}

fn push_curves(plan: &mut PosterPlan, layout: &StoryLayout) {
    for c in &layout.curves {
        for i in (0..CURVE_STEPS).step_by(2) {
            let t1 = i as f64 / CURVE_STEPS as f64;
            let t2 = (i + 1) as f64 / CURVE_STEPS as f64;
            plan.push(
                DrawLayer::Curves,
                DrawOp::Line {
                    from: quad_point(c.start, c.control, c.end, t1),
                    to: quad_point(c.start, c.control, c.end, t2),
                    width: 1.0,
                    color: CURVE_COLOR,
                },
            );
        }
    }
}

fn push_markers(plan: &mut PosterPlan, stories: &[StoryRecord], layout: &StoryLayout) {
    for m in &layout.markers {
        let Some(loc) = stories.get(m.story).and_then(|s| s.main_location.as_ref()) else {
            continue;
        };
        let (x, y) = (m.position.x, m.position.y);
        let label_x = x + m.label_side.sign() * LABEL_GAP;
        let align = match m.label_side {
            LabelSide::Right => LabelAlign::Left,
            LabelSide::Left => LabelAlign::Right,
        };

        plan.push(
            DrawLayer::Labels,
            DrawOp::Label {
                text: loc.name.to_uppercase(),
                anchor: Point::new(label_x, y - 5.0),
                size: 10.0,
                align,
                color: Rgba8::rgba(255, 255, 255, 200),
            },
        );
        plan.push(
            DrawLayer::Labels,
            DrawOp::Label {
                text: format!("{}, {}", to_fixed1(loc.lat), to_fixed1(loc.lng)),
                anchor: Point::new(label_x, y + 7.0),
                size: 8.0,
                align,
                color: Rgba8::rgba(255, 255, 255, 100),
            },
        );
        plan.push(
            DrawLayer::Markers,
            DrawOp::Disc {
                center: m.position.point(),
                diameter: MARKER_DIAMETER,
                color: MARKER_COLOR,
            },
        );
    }
}

fn story_color(story: &StoryRecord, index: usize) -> Rgba8 {
    match parse_css_color(&story.color) {
        Ok(c) => c,
        Err(e) => {
            let fallback = PALETTE[index % PALETTE.len()];
            tracing::warn!(
                index,
                color = %story.color,
                error = %e,
                "invalid story color, using palette"
            );
            fallback
        }
    }
}

/// One-decimal formatting with exact ties rounded away from zero.
pub(crate) fn to_fixed1(v: f64) -> String {
    let quarters = v * 4.0;
    let exact_tie = quarters.fract() == 0.0 && (quarters as i64) % 2 != 0;
    if exact_tie {
        format!("{:.1}", (v * 10.0).round() / 10.0)
    } else {
        format!("{v:.1}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
