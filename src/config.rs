use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, PixelDensity};
use crate::foundation::error::{PosterError, PosterResult};

/// Desktop poster size in logical units.
pub const DESKTOP_WIDTH: f64 = 600.0;
pub const DESKTOP_HEIGHT: f64 = 800.0;

/// Largest device-pixel edge the CPU backend can rasterize.
pub const MAX_DEVICE_PX: u32 = u16::MAX as u32;

/// Poster surface the renderer targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderTarget {
    /// Fixed 600x800 logical surface at density 2.
    #[default]
    Desktop,
    /// Constrained surface equal to the viewport, density 1.
    Mobile { width: f64, height: f64 },
}

impl RenderTarget {
    /// Logical surface, rejected when its device-pixel size is empty or exceeds
    /// [`MAX_DEVICE_PX`] on either edge.
    pub fn canvas(self) -> PosterResult<Canvas> {
        let canvas = match self {
            Self::Desktop => Canvas::new(DESKTOP_WIDTH, DESKTOP_HEIGHT)?,
            Self::Mobile { width, height } => Canvas::new(width, height)?,
        };
        let density = self.density();
        for (edge, logical) in [("width", canvas.width), ("height", canvas.height)] {
            let px = density.device_px(logical);
            if px == 0 || px > MAX_DEVICE_PX {
                return Err(PosterError::validation(format!(
                    "target {edge} of {px} device px must be in 1..={MAX_DEVICE_PX}"
                )));
            }
        }
        Ok(canvas)
    }

    pub fn density(self) -> PixelDensity {
        match self {
            Self::Desktop => PixelDensity(2),
            Self::Mobile { .. } => PixelDensity(1),
        }
    }

    /// Default grain strength; lower on mobile.
    pub fn grain_strength(self) -> f64 {
        match self {
            Self::Desktop => 15.0,
            Self::Mobile { .. } => 3.0,
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile { .. })
    }
}

/// Animated aurora uniforms.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AuroraParams {
    pub speed: f64,
    pub scale: f64,
    /// Vertical center of the curtain band, as a fraction of height.
    pub height: f64,
    /// Number of curtains; the shader evaluates at most 5.
    pub curtains: u32,
    pub shimmer: f64,
    pub intensity: f64,
    pub background: [f64; 3],
}

impl Default for AuroraParams {
    fn default() -> Self {
        Self {
            speed: 0.15,
            scale: 1.4,
            height: 0.12,
            curtains: 4,
            shimmer: 0.7,
            intensity: 2.2,
            background: [0.0, 0.0, 0.02],
        }
    }
}

impl AuroraParams {
    pub fn validate(&self) -> PosterResult<()> {
        let finite = [self.speed, self.scale, self.height, self.shimmer, self.intensity]
            .into_iter()
            .chain(self.background)
            .all(f64::is_finite);
        if !finite {
            return Err(PosterError::validation("aurora parameters must be finite"));
        }
        if self.scale <= 0.0 {
            return Err(PosterError::validation("aurora scale must be > 0"));
        }
        Ok(())
    }
}

/// Thumbnail raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ThumbnailSize {
    fn default() -> Self {
        Self {
            width: 300,
            height: 400,
        }
    }
}

/// Engine configuration. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    pub target: RenderTarget,
    /// Overrides the target's grain strength.
    pub grain: Option<f64>,
    /// Font file used to typeset and draw text. Without it text is measured with fixed advances
    /// and not drawn.
    pub font: Option<PathBuf>,
    pub aurora: AuroraParams,
    pub thumbnail: ThumbnailSize,
    /// Shade shader rows with rayon.
    pub parallel: bool,
}

impl PosterConfig {
    pub fn from_json_str(s: &str) -> PosterResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| PosterError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| PosterError::io(format!("read {}: {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> PosterResult<()> {
        self.target.canvas()?;
        if let Some(g) = self.grain
            && !(g.is_finite() && g >= 0.0)
        {
            return Err(PosterError::validation("grain must be finite and >= 0"));
        }
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(PosterError::validation("thumbnail size must be non-zero"));
        }
        self.aurora.validate()
    }

    pub fn grain_strength(&self) -> f64 {
        self.grain.unwrap_or_else(|| self.target.grain_strength())
    }
}
