use std::borrow::Cow;
use std::collections::HashMap;

use crate::config::RenderConfig;
use crate::foundation::core::Rgba8;

/// Shapes, measures and rasterizes single lines of phosphor text.
///
/// Fonts come from the platform collection plus an optional file named in the config. A font file
/// that cannot be read or parsed is logged and skipped; the family list then resolves against the
/// platform fonts alone.
pub(crate) struct GlyphEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: String,
    size_px: f32,
    bold: bool,
    fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl GlyphEngine {
    pub(crate) fn new(cfg: &RenderConfig) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let mut family = cfg.font_family.clone();

        if let Some(path) = &cfg.font_path {
            match std::fs::read(path) {
                Ok(bytes) => {
                    let families = font_ctx
                        .collection
                        .register_fonts(parley::fontique::Blob::from(bytes), None);
                    let family_id = families.first().map(|(id, _)| *id);
                    let name = family_id.and_then(|id| {
                        font_ctx.collection.family_name(id).map(str::to_owned)
                    });
                    match name {
                        Some(name) => family = format!("\"{name}\", {family}"),
                        None => tracing::warn!(
                            path = %path.display(),
                            "font file registered no families; using platform fonts"
                        ),
                    }
                }
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "font file unavailable; using platform fonts"
                ),
            }
        }

        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            size_px: cfg.pixel_font_size(),
            bold: cfg.bold,
            fonts: HashMap::new(),
        }
    }

    /// Advance width of `text` on one unbroken line, in phosphor pixels.
    pub(crate) fn measure(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, Rgba8::WHITE).width()
    }

    /// Fill the glyphs of `text` with `color`, top-left of the line box at `(x, y)`.
    pub(crate) fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        x: f32,
        y: f32,
        color: Rgba8,
    ) {
        if text.is_empty() {
            return;
        }
        let layout = self.layout_line(text, color);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(y),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let font = run.run().font();
                let data = self
                    .fonts
                    .entry((font.data.id(), font.index))
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(font.data.data().to_vec()),
                            font.index,
                        )
                    })
                    .clone();
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn layout_line(&mut self, text: &str, color: Rgba8) -> parley::Layout<Rgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        if self.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
