use crate::foundation::core::{Canvas, Point, Rgba8};

/// Poster stage a draw op was emitted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawLayer {
    Background,
    Grid,
    Heatmap,
    Curves,
    Labels,
    Markers,
}

/// Horizontal anchoring of a label; labels are always vertically centered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Right,
}

/// Backend-agnostic draw command in logical poster units.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the whole surface.
    Clear { color: Rgba8 },
    /// Stroked straight segment with butt caps.
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba8,
    },
    /// Filled circle.
    Disc {
        center: Point,
        diameter: f64,
        color: Rgba8,
    },
    /// Single-line text. Skipped by backends without a font.
    Label {
        text: String,
        anchor: Point,
        size: f64,
        align: LabelAlign,
        color: Rgba8,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlannedOp {
    pub layer: DrawLayer,
    pub op: DrawOp,
}

/// Ordered draw list for one poster canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct PosterPlan {
    pub canvas: Canvas,
    pub ops: Vec<PlannedOp>,
}

impl PosterPlan {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            ops: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, layer: DrawLayer, op: DrawOp) {
        self.ops.push(PlannedOp { layer, op });
    }

    pub fn ops_in(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(move |p| p.layer == layer)
            .map(|p| &p.op)
    }

    pub fn count(&self, layer: DrawLayer) -> usize {
        self.ops_in(layer).count()
    }
}
