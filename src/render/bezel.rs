use crate::config::RenderConfig;
use crate::foundation::core::{Canvas, PixelBuffer, Rgba8};
use crate::foundation::error::CrtResult;
use crate::render::blur::{blur_mask, sigma_for_shadow_blur};
use crate::render::composite::fill_masked_in_place;
use crate::theme::registry::Theme;

/// The static part of every frame: black outer frame, shadowed bezel fill, and the bezel's
/// coverage mask that clips all later stages.
pub(crate) struct Bezel {
    pub(crate) theme: Theme,
    /// One coverage byte per display pixel.
    pub(crate) mask: Vec<u8>,
    pub(crate) base: PixelBuffer,
}

impl Bezel {
    pub(crate) fn build(cfg: &RenderConfig, theme: &Theme) -> CrtResult<Self> {
        let canvas = cfg.canvas;
        let m = cfg.bezel.margin;
        let rect = kurbo::RoundedRect::new(
            m,
            m,
            f64::from(canvas.width) - m,
            f64::from(canvas.height) - m,
            cfg.bezel.radius,
        );
        let mask = shape_coverage(canvas, &rect)?;

        let mut base = PixelBuffer::filled(canvas, Rgba8::BLACK.premul())?;

        let shadow = blur_mask(
            &mask,
            canvas.width,
            canvas.height,
            sigma_for_shadow_blur(theme.shadow_blur),
        )?;
        fill_masked_in_place(
            &mut base.data,
            &shadow,
            Rgba8::BLACK.premul().to_array(),
            cfg.bezel.shadow_alpha,
        )?;
        fill_masked_in_place(
            &mut base.data,
            &mask,
            theme.background.premul().to_array(),
            1.0,
        )?;

        tracing::debug!(theme = theme.key, "bezel prepared");
        Ok(Self {
            theme: *theme,
            mask,
            base,
        })
    }
}

/// Rasterize `shape` in white and keep the alpha channel as an anti-aliased coverage mask.
pub(crate) fn shape_coverage(canvas: Canvas, shape: &impl kurbo::Shape) -> CrtResult<Vec<u8>> {
    let (w, h) = canvas.as_u16()?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        path.push(el);
    }
    ctx.fill_path(&path);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/render/bezel.rs"]
mod tests;
