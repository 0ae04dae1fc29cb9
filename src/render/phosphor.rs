use crate::config::RenderConfig;
use crate::foundation::core::{Canvas, PixelBuffer, Rgba8};
use crate::foundation::error::{CrtError, CrtResult};
use crate::layout::wrap::wrap_text;
use crate::render::composite::over;
use crate::text::engine::GlyphEngine;

/// Texels at or above this coverage light up; everything else stays dark.
const LIT_THRESHOLD: u8 = 128;

/// Low-resolution glyph raster: the coarse CRT pixel grid text is drawn onto before upscaling.
pub(crate) struct PhosphorRaster {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl PhosphorRaster {
    pub(crate) fn new(canvas: Canvas) -> CrtResult<Self> {
        let (w, h) = canvas.as_u16()?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Draw `text` (plus the cursor glyph when visible) wrapped to the phosphor width budget.
    ///
    /// Lines run top to bottom at a fixed line height, left-aligned. Coverage is thresholded so
    /// each texel is either fully lit in `color` or transparent.
    pub(crate) fn render(
        &mut self,
        engine: &mut GlyphEngine,
        cfg: &RenderConfig,
        text: &str,
        cursor_visible: bool,
        color: Rgba8,
    ) -> CrtResult<PixelBuffer> {
        let mut visible = String::with_capacity(text.len() + 4);
        visible.push_str(text);
        if cursor_visible {
            visible.push(cfg.cursor);
        }

        let mut out = PixelBuffer::transparent(self.canvas)?;
        let lines = wrap_text(|s| engine.measure(s), &visible, cfg.max_text_width());
        if lines.is_empty() {
            return Ok(out);
        }

        self.ctx.reset();
        let (x, mut y) = cfg.text_origin();
        let line_height = cfg.line_height();
        for line in &lines {
            if y >= self.canvas.height as f32 {
                break;
            }
            engine.draw_line(&mut self.ctx, line, x, y, color);
            y += line_height;
        }
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let lit = color.premul().to_array();
        for (dst, src) in out
            .data
            .chunks_exact_mut(4)
            .zip(self.pixmap.data_as_u8_slice().chunks_exact(4))
        {
            if src[3] >= LIT_THRESHOLD {
                dst.copy_from_slice(&lit);
            }
        }
        Ok(out)
    }
}

/// Stretch `src` over `dst` one display scanline at a time.
///
/// Each output row samples phosphor row `floor(y * src_h / dst_h)` and is shifted right by
/// `amplitude * sin(pi * y / dst_h)`, a per-row stand-in for barrel distortion of the glass.
/// Sampling is nearest-neighbor and every write is weighted by the clip `mask`.
pub(crate) fn upscale_warped(
    dst: &mut PixelBuffer,
    src: &PixelBuffer,
    mask: &[u8],
    amplitude: f32,
) -> CrtResult<()> {
    if mask.len() != dst.canvas().pixel_count() {
        return Err(CrtError::render("clip mask does not match display canvas"));
    }
    if src.width == 0 || src.height == 0 || dst.height == 0 {
        return Ok(());
    }

    let (dw, dh) = (dst.width, dst.height);
    let scale_x = src.width as f32 / dw as f32;
    for y in 0..dh {
        let sy = ((u64::from(y) * u64::from(src.height)) / u64::from(dh)) as u32;
        let sy = sy.min(src.height - 1);
        let offset = amplitude * (std::f32::consts::PI * y as f32 / dh as f32).sin();
        let mask_row = &mask[(y as usize) * (dw as usize)..(y as usize + 1) * (dw as usize)];
        let src_row_start = src.index(0, sy);
        let row = dst.row_mut(y);

        for x in 0..dw {
            let coverage = mask_row[x as usize];
            if coverage == 0 {
                continue;
            }
            let sx = (x as f32 + 0.5 - offset) * scale_x;
            if sx < 0.0 || sx >= src.width as f32 {
                continue;
            }
            let si = src_row_start + (sx as usize) * 4;
            let s = [
                src.data[si],
                src.data[si + 1],
                src.data[si + 2],
                src.data[si + 3],
            ];
            if s[3] == 0 {
                continue;
            }
            let di = (x as usize) * 4;
            let d = [row[di], row[di + 1], row[di + 2], row[di + 3]];
            row[di..di + 4].copy_from_slice(&over(d, s, f32::from(coverage) / 255.0));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/phosphor.rs"]
mod tests;
