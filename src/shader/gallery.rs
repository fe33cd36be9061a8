//! Thumbnail batch for an archive listing.
//!
//! Only the featured (first) entry gets a live aurora loop. Every other entry is rasterized once
//! through a single shared [`StaticPosterRenderer`], released when the batch ends. Entries the
//! static program cannot serve fall back to the rasterized CSS gradient.

use crate::config::PosterConfig;
use crate::dataset::archive::ArchiveEntry;
use crate::palette::gradient::{GradientSpec, render_gradient_fallback};
use crate::random::seed::Seed;
use crate::render::backend::FrameRGBA;
use crate::shader::animation::{AuroraLoop, FrameClock};
use crate::shader::aurora::AuroraShader;
use crate::shader::glow::GlowShader;
use crate::shader::static_renderer::StaticPosterRenderer;

/// Layer opacity of the gradient fallback in the gallery grid.
pub const FALLBACK_OPACITY: f64 = 0.6;

/// How a thumbnail's pixels were produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbnailSource {
    Aurora,
    StaticShader,
    GradientFallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    pub date: String,
    pub source: ThumbnailSource,
    /// `None` only when even the gradient fallback could not be rasterized.
    pub frame: Option<FrameRGBA>,
}

/// The featured entry: its first frame plus the running loop.
#[derive(Debug)]
pub struct FeaturedPoster {
    pub thumbnail: Thumbnail,
    pub animation: Option<AuroraLoop>,
}

#[derive(Debug, Default)]
pub struct GalleryBatch {
    pub featured: Option<FeaturedPoster>,
    pub thumbnails: Vec<Thumbnail>,
    /// Program constructions performed by the shared static renderer.
    pub static_builds: u32,
}

impl GalleryBatch {
    /// All thumbnails in entry order, featured first.
    pub fn all(&self) -> impl Iterator<Item = &Thumbnail> {
        self.featured
            .iter()
            .map(|f| &f.thumbnail)
            .chain(self.thumbnails.iter())
    }
}

/// Render thumbnails for `entries` (newest first, as stored in the index).
#[tracing::instrument(skip_all, fields(entries = entries.len()))]
pub fn render_gallery(
    entries: &[ArchiveEntry],
    config: &PosterConfig,
    clock: FrameClock,
) -> GalleryBatch {
    let (width, height) = (config.thumbnail.width, config.thumbnail.height);
    let mut batch = GalleryBatch::default();
    let Some((first, rest)) = entries.split_first() else {
        return batch;
    };

    let spec = GradientSpec::from_date(&first.date);
    let shader = AuroraShader::from_gradient(&spec, config.aurora);
    let mut animation = AuroraLoop::start(shader, width, height, clock, config.parallel);
    let preview = animation.as_mut().and_then(AuroraLoop::tick);
    let thumbnail = match preview {
        Some(frame) => Thumbnail {
            date: first.date.clone(),
            source: ThumbnailSource::Aurora,
            frame: Some(frame),
        },
        None => fallback_thumbnail(&first.date, &spec, width, height),
    };
    batch.featured = Some(FeaturedPoster {
        thumbnail,
        animation,
    });

    let mut shared = StaticPosterRenderer::new(config.parallel);
    for entry in rest {
        let seed = Seed::from_date(&entry.date);
        let spec = GradientSpec::from_seed(seed);
        let params = GlowShader::from_gradient(&spec, seed);
        let thumb = match shared.render(&params, width, height) {
            Some(frame) => Thumbnail {
                date: entry.date.clone(),
                source: ThumbnailSource::StaticShader,
                frame: Some(frame),
            },
            None => fallback_thumbnail(&entry.date, &spec, width, height),
        };
        batch.thumbnails.push(thumb);
    }
    batch.static_builds = shared.builds();
    shared.release();

    tracing::debug!(
        thumbnails = batch.thumbnails.len() + 1,
        static_builds = batch.static_builds,
        "gallery batch rendered"
    );
    batch
}

fn fallback_thumbnail(date: &str, spec: &GradientSpec, width: u32, height: u32) -> Thumbnail {
    let frame = match render_gradient_fallback(spec, width, height, FALLBACK_OPACITY) {
        Ok(f) => Some(f),
        Err(e) => {
            tracing::warn!(date, error = %e, "thumbnail unavailable");
            None
        }
    };
    Thumbnail {
        date: date.to_owned(),
        source: ThumbnailSource::GradientFallback,
        frame,
    }
}
