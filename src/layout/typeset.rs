//! Phase one of the poster pipeline: place every text block and report its bounds.
//!
//! Geometry is expressed as fractions of the canvas so desktop and mobile targets share one
//! layout. The drawing phase only ever sees the resulting [`TextBound`]s.

use crate::config::RenderTarget;
use crate::dataset::model::{MAX_STORIES, PosterDataset};
use crate::dataset::sentiment::resolve_bottom_word;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::PosterResult;
use crate::layout::text::{TextMeasure, TextStyle};
use crate::random::seed::streams;

const PAD_FRAC: f64 = 0.06;
const EXP_GAP_FRAC: f64 = 0.03;
const EXP_LINE_HEIGHT: f64 = 1.35;
const TITLE_SIZE_FRAC: f64 = 0.058;
const TITLE_LINE_HEIGHT: f64 = 1.05;
const TITLE_TOP_FRAC: f64 = 0.36;
const TITLE_GAP_FRAC: f64 = 0.075;

/// Which poster element a bound belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Title,
    Exp,
    Bottom,
}

/// Measured rectangle of one text element, in poster-local logical units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBound {
    pub kind: TextKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl TextBound {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
}

/// A placed text block: content, style and the bound it occupies.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub bound: TextBound,
    pub text: String,
    pub style: TextStyle,
    pub align: TextAlign,
    /// Wrap width used while measuring.
    pub wrap_width: Option<f64>,
}

/// Vertical date label along the left edge.
#[derive(Clone, Debug, PartialEq)]
pub struct SidebarLabel {
    pub text: String,
    pub center: Point,
    pub size: f64,
}

/// Text content of one poster, resolved from a dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct PosterText {
    /// Upper-cased headlines, one per active story.
    pub titles: Vec<String>,
    pub descriptions: Vec<String>,
    pub bottom_word: String,
    pub sidebar: String,
}

impl PosterText {
    /// `today` is the current `YYYY-MM-DD` date used for the sidebar label.
    pub fn from_dataset(ds: &PosterDataset, today: &str) -> Self {
        let stories = ds.active_stories();
        let mut sentiment_rng = ds.seed().stream(streams::SENTIMENT);
        Self {
            titles: stories.iter().map(|s| s.headline.to_uppercase()).collect(),
            descriptions: stories.iter().map(|s| s.description.clone()).collect(),
            bottom_word: resolve_bottom_word(&ds.bottom_word, stories, &mut sentiment_rng),
            sidebar: ds.sidebar_label(today),
        }
    }
}

/// Result of typesetting: every block plus the sidebar label.
#[derive(Clone, Debug, PartialEq)]
pub struct PosterTypeset {
    pub canvas: Canvas,
    pub items: Vec<TextItem>,
    pub sidebar: SidebarLabel,
}

impl PosterTypeset {
    /// Bounds in registration order: titles, descriptions, bottom word.
    pub fn bounds(&self) -> Vec<TextBound> {
        self.items.iter().map(|i| i.bound).collect()
    }

    pub fn title_bounds(&self) -> impl Iterator<Item = &TextBound> {
        self.items
            .iter()
            .map(|i| &i.bound)
            .filter(|b| b.kind == TextKind::Title)
    }
}

/// Lay out titles, description columns, the bottom word and the sidebar label.
#[tracing::instrument(skip_all, fields(target = ?target))]
pub fn typeset(
    text: &PosterText,
    target: RenderTarget,
    measure: &mut dyn TextMeasure,
) -> PosterResult<PosterTypeset> {
    let canvas = target.canvas()?;
    let (w, h) = (canvas.width, canvas.height);
    let pad = w * PAD_FRAC;
    let small_size = (9.0 * w / 600.0).max(7.0);
    let mut items = Vec::new();

    let title_style = TextStyle::new(w * TITLE_SIZE_FRAC, TITLE_LINE_HEIGHT);
    let title_width = w - 2.0 * pad;
    let mut top = h * TITLE_TOP_FRAC;
    for (i, title) in text.titles.iter().take(MAX_STORIES).enumerate() {
        if title.trim().is_empty() {
            continue;
        }
        let extent = measure.measure(title, title_style, Some(title_width))?;
        let bound = TextBound {
            kind: TextKind::Title,
            id: Some(i),
            top,
            bottom: top + extent.height,
            left: pad,
            right: pad + title_width,
        };
        top = bound.bottom + h * TITLE_GAP_FRAC;
        items.push(TextItem {
            bound,
            text: title.clone(),
            style: title_style,
            align: TextAlign::Start,
            wrap_width: Some(title_width),
        });
    }

    let gap = w * EXP_GAP_FRAC;
    let col_width = (w - 2.0 * pad - 2.0 * gap) / MAX_STORIES as f64;
    let exp_style = TextStyle::new(small_size, EXP_LINE_HEIGHT);
    for (i, desc) in text.descriptions.iter().take(MAX_STORIES).enumerate() {
        let extent = measure.measure(desc, exp_style, Some(col_width))?;
        let left = pad + i as f64 * (col_width + gap);
        items.push(TextItem {
            bound: TextBound {
                kind: TextKind::Exp,
                id: Some(i),
                top: pad,
                bottom: pad + extent.height,
                left,
                right: left + col_width,
            },
            text: desc.clone(),
            style: exp_style,
            align: TextAlign::Start,
            wrap_width: Some(col_width),
        });
    }

    let (bottom_size, bottom_pad) = if target.is_mobile() {
        ((0.14 * w).max(40.0), 20.0)
    } else {
        (80.0, 40.0)
    };
    let bottom_style = TextStyle::new(bottom_size, 1.0);
    let extent = measure.measure(&text.bottom_word, bottom_style, None)?;
    let bottom = h - bottom_pad * 0.5;
    let left = (w - extent.width) * 0.5;
    items.push(TextItem {
        bound: TextBound {
            kind: TextKind::Bottom,
            id: None,
            top: bottom - extent.height.max(bottom_style.line_px()),
            bottom,
            left,
            right: left + extent.width,
        },
        text: text.bottom_word.clone(),
        style: bottom_style,
        align: TextAlign::Center,
        wrap_width: None,
    });

    let sidebar = SidebarLabel {
        text: text.sidebar.clone(),
        center: Point::new(pad * 0.45, h * 0.5),
        size: small_size,
    };

    tracing::debug!(items = items.len(), "typeset complete");
    Ok(PosterTypeset {
        canvas,
        items,
        sidebar,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/typeset.rs"]
mod tests;
