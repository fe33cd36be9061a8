//! Pulse renders a deterministic daily news poster.
//!
//! A poster is fully determined by its date and its story dataset:
//!
//! - derive a [`Seed`] from the date string
//! - [`typeset`] the text for a [`RenderTarget`] and [`solve_layout`] the story markers once
//! - compile a [`PosterPlan`] and rasterize it on the [`CpuBackend`]
//! - apply grain, pick text colors with the adaptive contrast pass and draw the text overlay
//!
//! Gallery thumbnails come from two software fragment programs: the animated
//! [`AuroraShader`] for the featured poster and the static [`GlowShader`] served by one shared
//! [`StaticPosterRenderer`] for the rest.
#![forbid(unsafe_code)]

mod compile;
mod config;
mod dataset;
mod encode;
mod foundation;
mod layout;
mod palette;
mod random;
mod render;
mod shader;

pub use crate::foundation::core::{BezPath, Canvas, PixelDensity, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::config::{
    AuroraParams, DESKTOP_HEIGHT, DESKTOP_WIDTH, MAX_DEVICE_PX, PosterConfig, RenderTarget,
    ThumbnailSize,
};

pub use crate::random::noise::ValueNoise;
pub use crate::random::prng::Lcg;
pub use crate::random::seed::{Seed, streams};

pub use crate::palette::color::parse_css_color;
pub use crate::palette::gradient::{
    GradientSpec, PALETTE, gradient_draw, palette_index, render_gradient_fallback,
};

pub use crate::dataset::archive::{
    ArchiveEntry, ArchiveIndex, ArchiveStore, DatasetSource, archive_file_name,
};
pub use crate::dataset::model::{
    MAX_STORIES, MainLocation, PosterDataset, StoryRecord, display_date, today_utc,
};
pub use crate::dataset::sentiment::{
    DEFAULT_BOTTOM_WORD, SentimentScores, SentimentWord, resolve_bottom_word, sentiment_word,
};

pub use crate::layout::solver::{
    CurvePlacement, LabelSide, MarkerPlacement, StoryLayout, StoryPosition, quad_point,
    solve_layout,
};
pub use crate::layout::text::{
    FixedAdvance, FontFace, FontMeasure, TextExtent, TextMeasure, TextStyle,
};
pub use crate::layout::typeset::{
    PosterText, PosterTypeset, SidebarLabel, TextAlign, TextBound, TextItem, TextKind, typeset,
};
pub use crate::layout::typography::ChannelSplit;

pub use crate::compile::compiler::{BACKGROUND, compile_poster};
pub use crate::compile::plan::{DrawLayer, DrawOp, LabelAlign, PlannedOp, PosterPlan};

pub use crate::render::backend::{FrameRGBA, RenderBackend, TextRun};
pub use crate::render::contrast::{
    EXP_MUTED, TEXT_BRIGHT, TEXT_MUTED, TextColor, adaptive_text_colors, color_for_kind,
    sample_brightness, select_text_color,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::grain::apply_grain;
pub use crate::render::overlay::{block_runs, draw_overlay, sidebar_run};
pub use crate::render::pipeline::{PosterRender, PosterRenderer, render_poster};

pub use crate::shader::animation::{AuroraLoop, CancelHandle, FrameClock};
pub use crate::shader::aurora::{AuroraShader, MAX_CURTAINS, derive_highlight};
pub use crate::shader::gallery::{
    FALLBACK_OPACITY, FeaturedPoster, GalleryBatch, Thumbnail, ThumbnailSource, render_gallery,
};
pub use crate::shader::glow::GlowShader;
pub use crate::shader::program::{FragmentShader, MAX_SURFACE_PX, ShaderProgram};
pub use crate::shader::static_renderer::{RendererState, StaticPosterRenderer};

pub use crate::encode::png::{encode_png, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
