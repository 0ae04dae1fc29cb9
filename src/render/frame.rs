use crate::config::RenderConfig;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::CrtResult;
use crate::render::bezel::Bezel;
use crate::render::overlay::{OverlayMaps, sprinkle_noise};
use crate::render::phosphor::{PhosphorRaster, upscale_warped};
use crate::text::engine::GlyphEngine;
use crate::theme::registry::Theme;

/// Renders complete CRT frames for one configuration.
///
/// A renderer owns its font state and scratch rasters, so it is cheap to call repeatedly but must
/// not be shared between threads; concurrent builds each construct their own.
pub struct FrameRenderer {
    cfg: RenderConfig,
    glyphs: GlyphEngine,
    phosphor: PhosphorRaster,
    overlays: OverlayMaps,
    bezel: Option<Bezel>,
}

impl FrameRenderer {
    pub fn new(cfg: RenderConfig) -> CrtResult<Self> {
        cfg.validate()?;
        let glyphs = GlyphEngine::new(&cfg);
        let phosphor = PhosphorRaster::new(cfg.phosphor_canvas())?;
        let overlays = OverlayMaps::new(cfg.canvas);
        Ok(Self {
            cfg,
            glyphs,
            phosphor,
            overlays,
            bezel: None,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    /// Render one frame showing `text`, optionally followed by the cursor glyph.
    ///
    /// Stages run in a fixed order: black backdrop, shadowed bezel, phosphor text upscaled with
    /// the curvature warp, then the overlay stack, all clipped to the bezel. Noise specks are drawn
    /// only when `noise` is given.
    pub fn render(
        &mut self,
        text: &str,
        cursor_visible: bool,
        theme: &Theme,
        noise: Option<&mut dyn rand::RngCore>,
    ) -> CrtResult<PixelBuffer> {
        let bezel = match self.bezel.take() {
            Some(b) if b.theme == *theme => b,
            _ => Bezel::build(&self.cfg, theme)?,
        };
        let result = self.render_with(&bezel, text, cursor_visible, theme, noise);
        self.bezel = Some(bezel);
        result
    }

    fn render_with(
        &mut self,
        bezel: &Bezel,
        text: &str,
        cursor_visible: bool,
        theme: &Theme,
        noise: Option<&mut dyn rand::RngCore>,
    ) -> CrtResult<PixelBuffer> {
        let mut frame = bezel.base.clone();

        let phosphor =
            self.phosphor
                .render(&mut self.glyphs, &self.cfg, text, cursor_visible, theme.text)?;
        upscale_warped(
            &mut frame,
            &phosphor,
            &bezel.mask,
            self.cfg.curvature_amplitude,
        )?;

        self.overlays
            .apply(&mut frame, &bezel.mask, theme, self.cfg.scanline_period)?;
        if let Some(rng) = noise {
            sprinkle_noise(&mut frame, &bezel.mask, self.cfg.noise_specks, rng)?;
        }
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
