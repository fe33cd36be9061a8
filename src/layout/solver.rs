//! Story marker placement.
//!
//! Positions, curve bends and label sides are drawn once from a single PRNG stream and
//! handed to every drawing stage, so heatmap blobs and marker dots always coincide.

use crate::dataset::model::{MAX_STORIES, StoryRecord};
use crate::foundation::core::{Canvas, Point, Vec2};
use crate::layout::typeset::{TextBound, TextKind};
use crate::random::prng::Lcg;

const FALLBACK_CENTER_FRAC: f64 = 0.45;
const FALLBACK_SPACING: f64 = 120.0;

/// Resolved placement of one story slot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryPosition {
    pub x: f64,
    pub y: f64,
}

impl StoryPosition {
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Side of the dot a marker label sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LabelSide {
    Left,
    Right,
}

impl LabelSide {
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// A geo-tagged story that gets a marker and a heatmap blob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPlacement {
    /// Index into the active story list.
    pub story: usize,
    pub position: StoryPosition,
    pub label_side: LabelSide,
}

/// Dashed bend between two consecutive geo-tagged stories.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePlacement {
    pub from: usize,
    pub to: usize,
    pub start: Point,
    pub end: Point,
    pub control: Point,
}

/// Everything the drawing stages need to know about story placement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoryLayout {
    /// One per active story slot, geo-tagged or not.
    pub positions: Vec<StoryPosition>,
    pub markers: Vec<MarkerPlacement>,
    pub curves: Vec<CurvePlacement>,
}

/// Place up to three story slots.
///
/// Draw order on `rng`: per slot `x` then `y`; then two control offsets per curve; then one
/// label-side draw per marker.
pub fn solve_layout(
    canvas: Canvas,
    bounds: &[TextBound],
    stories: &[StoryRecord],
    rng: &mut Lcg,
) -> StoryLayout {
    let stories = &stories[..stories.len().min(MAX_STORIES)];
    let titles: Vec<&TextBound> = bounds.iter().filter(|b| b.kind == TextKind::Title).collect();
    let (w, h) = (canvas.width, canvas.height);

    let positions: Vec<StoryPosition> = (0..stories.len())
        .map(|i| {
            let x = w * (0.2 + rng.below(0.6));
            let y = if titles.len() >= MAX_STORIES {
                match i {
                    0 => rng.range(titles[0].top - 60.0, titles[0].top - 30.0),
                    _ => {
                        let gap_center = (titles[i - 1].bottom + titles[i].top) * 0.5;
                        gap_center + rng.range(-8.0, 8.0)
                    }
                }
            } else {
                let mut y = h * FALLBACK_CENTER_FRAC
                    + (i as f64 - 1.0) * FALLBACK_SPACING
                    + rng.range(-10.0, 10.0);
                if i == 1 {
                    y -= 40.0;
                }
                y
            };
            StoryPosition { x, y }
        })
        .collect();

    let geo: Vec<usize> = stories
        .iter()
        .enumerate()
        .filter(|(_, s)| s.main_location.is_some())
        .map(|(i, _)| i)
        .collect();

    let curves = if geo.len() >= 2 {
        geo.windows(2)
            .map(|pair| {
                let (start, end) = (positions[pair[0]].point(), positions[pair[1]].point());
                let bend = Vec2::new(rng.range(-50.0, 50.0), rng.range(-30.0, 30.0));
                CurvePlacement {
                    from: pair[0],
                    to: pair[1],
                    start,
                    end,
                    control: start.midpoint(end) + bend,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let markers = geo
        .iter()
        .map(|&i| {
            let position = positions[i];
            let mut label_side = if rng.next_f64() > 0.5 {
                LabelSide::Right
            } else {
                LabelSide::Left
            };
            if position.x < w * 0.25 {
                label_side = LabelSide::Right;
            }
            if position.x > w * 0.75 {
                label_side = LabelSide::Left;
            }
            MarkerPlacement {
                story: i,
                position,
                label_side,
            }
        })
        .collect();

    StoryLayout {
        positions,
        markers,
        curves,
    }
}

/// Point on the quadratic bezier `start -> control -> end` at `t`.
pub fn quad_point(start: Point, control: Point, end: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let x = u * u * start.x + 2.0 * u * t * control.x + t * t * end.x;
    let y = u * u * start.y + 2.0 * u * t * control.y + t * t * end.y;
    Point::new(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
