use vello_cpu::kurbo::Shape;

use crate::compile::plan::{DrawOp, LabelAlign, PosterPlan};
use crate::foundation::core::{PixelDensity, Point, Rgba8};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::mul_div255_u16;
use crate::layout::text::{FontFace, TextBrush, TextLayoutEngine};
use crate::render::backend::{FrameRGBA, RenderBackend, TextRun, premultiply_rgba8_in_place};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU backend powered by `vello_cpu` for vector and text rasterization.
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    font: Option<FontFace>,
    font_data: Option<vello_cpu::peniko::FontData>,
    text_engine: TextLayoutEngine,
}

impl CpuBackend {
    /// Without a font, labels and overlay text are skipped.
    pub fn new(font: Option<FontFace>) -> Self {
        let font_data = font.as_ref().map(FontFace::font_data);
        Self {
            ctx: None,
            font,
            font_data,
            text_engine: TextLayoutEngine::new(),
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PosterResult<R>,
    ) -> PosterResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        base: vello_cpu::kurbo::Affine,
        full: vello_cpu::kurbo::Rect,
    ) -> PosterResult<()> {
        ctx.set_transform(base);
        match op {
            DrawOp::Clear { color } => {
                ctx.set_paint(paint(*color));
                ctx.fill_rect(&full);
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(*from));
                path.line_to(point_to_cpu(*to));
                ctx.set_paint(paint(*color));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                ctx.stroke_path(&path);
            }
            DrawOp::Disc {
                center,
                diameter,
                color,
            } => {
                if *diameter <= 0.0 || color.a == 0 {
                    return Ok(());
                }
                let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(*center), diameter * 0.5);
                ctx.set_paint(paint(*color));
                ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
            }
            DrawOp::Label {
                text,
                anchor,
                size,
                align,
                color,
            } => {
                let Some(font) = self.font.clone() else {
                    return Ok(());
                };
                let layout =
                    self.text_engine
                        .layout_plain(text, &font, *size as f32, brush(*color), None)?;
                let (lw, lh) = (f64::from(layout.width()), f64::from(layout.height()));
                let left = match align {
                    LabelAlign::Left => anchor.x,
                    LabelAlign::Right => anchor.x - lw,
                };
                let tr = base * vello_cpu::kurbo::Affine::translate((left, anchor.y - lh * 0.5));
                self.fill_layout(ctx, &layout, tr);
            }
        }
        Ok(())
    }

    fn fill_layout(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &parley::Layout<TextBrush>,
        transform: vello_cpu::kurbo::Affine,
    ) {
        let Some(font) = self.font_data.as_ref() else {
            return;
        };
        ctx.set_transform(transform);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let b = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(b.r, b.g, b.b, b.a));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize runs into a fresh premultiplied layer the size of `frame`.
    fn render_text_layer(
        &mut self,
        width: u32,
        height: u32,
        runs: &[TextRun],
        density: PixelDensity,
    ) -> PosterResult<Option<Vec<u8>>> {
        let Some(font) = self.font.clone() else {
            tracing::debug!("no font configured, skipping text");
            return Ok(None);
        };
        let (w, h) = surface_size(width, height)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        let scale = vello_cpu::kurbo::Affine::scale(density.as_f64());

        self.with_ctx_mut(w, h, |this, ctx| {
            for run in runs {
                let layout = this.text_engine.layout_plain(
                    &run.text,
                    &font,
                    run.size as f32,
                    brush(run.color),
                    run.wrap_width.map(|v| v as f32),
                )?;
                let pivot = point_to_cpu(run.pivot).to_vec2();
                let tr = scale
                    * vello_cpu::kurbo::Affine::translate(pivot)
                    * vello_cpu::kurbo::Affine::rotate(run.rotation_deg.to_radians())
                    * vello_cpu::kurbo::Affine::translate(-pivot)
                    * vello_cpu::kurbo::Affine::translate((run.origin.x, run.origin.y));
                this.fill_layout(ctx, &layout, tr);
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;
        Ok(Some(pixmap.data_as_u8_slice().to_vec()))
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = plan.ops.len(), density = density.0))]
    fn render_plan(&mut self, plan: &PosterPlan, density: PixelDensity) -> PosterResult<FrameRGBA> {
        let width = density.device_px(plan.canvas.width);
        let height = density.device_px(plan.canvas.height);
        let (w, h) = surface_size(width, height)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        let base = vello_cpu::kurbo::Affine::scale(density.as_f64());
        let full = vello_cpu::kurbo::Rect::new(0.0, 0.0, plan.canvas.width, plan.canvas.height);

        self.with_ctx_mut(w, h, |this, ctx| {
            for planned in &plan.ops {
                this.draw_op(ctx, &planned.op, base, full)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_text(
        &mut self,
        frame: &mut FrameRGBA,
        runs: &[TextRun],
        density: PixelDensity,
    ) -> PosterResult<bool> {
        frame.validate()?;
        let Some(layer) = self.render_text_layer(frame.width, frame.height, runs, density)? else {
            return Ok(false);
        };
        ensure_premultiplied(frame);
        premul_over_in_place(&mut frame.data, &layer)?;
        Ok(true)
    }

    fn draw_channel_split(
        &mut self,
        frame: &mut FrameRGBA,
        run: &TextRun,
        offsets: [kurbo::Vec2; 3],
        density: PixelDensity,
    ) -> PosterResult<bool> {
        frame.validate()?;
        let mask_run = TextRun {
            color: Rgba8::rgb(255, 255, 255),
            ..run.clone()
        };
        let Some(mask) = self.render_text_layer(
            frame.width,
            frame.height,
            std::slice::from_ref(&mask_run),
            density,
        )?
        else {
            return Ok(false);
        };
        ensure_premultiplied(frame);
        let d = density.as_f64();
        let shifts = offsets.map(|o| ((o.x * d).round() as i64, (o.y * d).round() as i64));
        channel_split_over(frame, &mask, shifts, run.color);
        Ok(true)
    }
}

fn surface_size(width: u32, height: u32) -> PosterResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PosterError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PosterError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(PosterError::render("surface size must be non-zero"));
    }
    Ok((w, h))
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn brush(c: Rgba8) -> TextBrush {
    TextBrush {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn ensure_premultiplied(frame: &mut FrameRGBA) {
    if !frame.premultiplied {
        premultiply_rgba8_in_place(&mut frame.data);
        frame.premultiplied = true;
    }
}

fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> PosterResult<()> {
    if dst.len() != src.len() {
        return Err(PosterError::render("composite layer size mismatch"));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for k in 0..4 {
            let v = u16::from(s[k]) + mul_div255_u16(u16::from(d[k]), inv);
            d[k] = v.min(255) as u8;
        }
    }
    Ok(())
}

/// Per channel `k`, blend toward `fill[k]` by the mask coverage sampled at `-shifts[k]`.
fn channel_split_over(frame: &mut FrameRGBA, mask: &[u8], shifts: [(i64, i64); 3], fill: Rgba8) {
    let (w, h) = (i64::from(frame.width), i64::from(frame.height));
    let fill = [fill.r, fill.g, fill.b];
    let coverage = |x: i64, y: i64| -> u16 {
        if x < 0 || y < 0 || x >= w || y >= h {
            return 0;
        }
        u16::from(mask[((y * w + x) * 4 + 3) as usize])
    };

    for y in 0..h {
        for x in 0..w {
            let i = ((y * w + x) * 4) as usize;
            let mut any = 0u16;
            for k in 0..3 {
                let (dx, dy) = shifts[k];
                let a = coverage(x - dx, y - dy);
                any = any.max(a);
                if a == 0 {
                    continue;
                }
                let inv = 255 - a;
                let src = mul_div255_u16(u16::from(fill[k]), a);
                let dst = mul_div255_u16(u16::from(frame.data[i + k]), inv);
                frame.data[i + k] = (src + dst).min(255) as u8;
            }
            if any > 0 {
                let inv = 255 - any;
                let a = any + mul_div255_u16(u16::from(frame.data[i + 3]), inv);
                frame.data[i + 3] = a.min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
