use crate::compile::compiler::compile_poster;
use crate::config::PosterConfig;
use crate::dataset::model::PosterDataset;
use crate::foundation::error::PosterResult;
use crate::layout::solver::{StoryLayout, solve_layout};
use crate::layout::text::{FixedAdvance, FontFace, FontMeasure, TextMeasure};
use crate::layout::typeset::{PosterText, PosterTypeset, typeset};
use crate::layout::typography::ChannelSplit;
use crate::palette::gradient::GradientSpec;
use crate::random::noise::ValueNoise;
use crate::random::seed::{Seed, streams};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::contrast::{TextColor, adaptive_text_colors};
use crate::render::cpu::CpuBackend;
use crate::render::grain::apply_grain;
use crate::render::overlay::draw_overlay;

/// Everything produced while rendering one poster.
#[derive(Clone, Debug)]
pub struct PosterRender {
    pub seed: Seed,
    /// Premultiplied device-pixel frame.
    pub frame: FrameRGBA,
    pub typeset: PosterTypeset,
    pub layout: StoryLayout,
    /// Contrast-pass colors, in the order of [`PosterTypeset::bounds`].
    pub text_colors: Vec<TextColor>,
    pub gradient: GradientSpec,
    pub channel_split: ChannelSplit,
    /// Whether text was drawn over the canvas (requires a font).
    pub text_drawn: bool,
}

/// Reusable poster renderer: keeps the raster context and font between posters.
pub struct PosterRenderer {
    config: PosterConfig,
    backend: CpuBackend,
    measure: Box<dyn TextMeasure>,
}

impl PosterRenderer {
    /// A configured font that cannot be read is logged and ignored.
    pub fn new(config: PosterConfig) -> PosterResult<Self> {
        config.validate()?;
        let font = match &config.font {
            Some(path) => match FontFace::from_path(path) {
                Ok(f) => Some(f),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "font unavailable, text will be estimated and not drawn"
                    );
                    None
                }
            },
            None => None,
        };
        let measure: Box<dyn TextMeasure> = match &font {
            Some(f) => Box::new(FontMeasure::new(f.clone())),
            None => Box::new(FixedAdvance::default()),
        };
        Ok(Self {
            backend: CpuBackend::new(font),
            measure,
            config,
        })
    }

    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    /// Typeset, solve, compile, rasterize, grain, contrast, overlay.
    ///
    /// `today` (`YYYY-MM-DD`) only affects the sidebar label.
    #[tracing::instrument(skip(self, ds), fields(date = %ds.date, stories = ds.stories.len()))]
    pub fn render(&mut self, ds: &PosterDataset, today: &str) -> PosterResult<PosterRender> {
        let target = self.config.target;
        let density = target.density();
        let seed = ds.seed();
        let stories = ds.active_stories();

        let text = PosterText::from_dataset(ds, today);
        let typeset = typeset(&text, target, self.measure.as_mut())?;
        let bounds = typeset.bounds();

        let layout = solve_layout(typeset.canvas, &bounds, stories, &mut seed.layout_rng());
        let noise = ValueNoise::seeded(seed.stream_seed(streams::HEATMAP_NOISE));
        let plan = compile_poster(typeset.canvas, stories, &layout, &noise);

        let mut frame = self.backend.render_plan(&plan, density)?;
        apply_grain(
            &mut frame,
            self.config.grain_strength(),
            &mut seed.stream(streams::GRAIN),
        );
        let text_colors = adaptive_text_colors(&frame, &bounds, density);

        let channel_split = ChannelSplit::from_seed(seed);
        let text_drawn = draw_overlay(
            &mut self.backend,
            &mut frame,
            &typeset,
            &text_colors,
            &channel_split,
            density,
        )?;

        tracing::debug!(
            width = frame.width,
            height = frame.height,
            markers = layout.markers.len(),
            text_drawn,
            "poster rendered"
        );
        Ok(PosterRender {
            seed,
            frame,
            typeset,
            layout,
            text_colors,
            gradient: GradientSpec::from_seed(seed),
            channel_split,
            text_drawn,
        })
    }
}

/// One-shot convenience over [`PosterRenderer`].
pub fn render_poster(
    ds: &PosterDataset,
    config: &PosterConfig,
    today: &str,
) -> PosterResult<PosterRender> {
    PosterRenderer::new(config.clone())?.render(ds, today)
}
