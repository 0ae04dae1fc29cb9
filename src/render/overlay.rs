use crate::foundation::core::{Canvas, PixelBuffer, Rgba8};
use crate::foundation::error::{CrtError, CrtResult};
use crate::foundation::math::{lerp, unit_to_u8};
use crate::render::composite::{add, over};
use crate::theme::registry::Theme;

const WASH_ALPHA: f32 = 0.08;
const BLOOM_ALPHA: f32 = 0.20;
const SCANLINE_ALPHA: f32 = 0.06;
const VIGNETTE_ALPHA: f32 = 0.20;
const NOISE_ALPHA: f32 = 0.01;
const NOISE_MIN_SIZE: f32 = 0.3;
const NOISE_SIZE_RANGE: f32 = 1.0;

/// Random `f32` draws consumed per noise speck: x, y, size, color.
pub(crate) const DRAWS_PER_SPECK: u64 = 4;

/// Additive sweep stops: (offset from top, white alpha).
const SWEEP_STOPS: [(f32, f32); 4] = [(0.0, 0.08), (0.40, 0.04), (0.75, 0.01), (1.0, 0.0)];

/// Theme-independent overlay intensities, precomputed once per canvas.
///
/// `bloom` and `vignette` hold one alpha per pixel; `sweep` holds one per row.
pub(crate) struct OverlayMaps {
    canvas: Canvas,
    bloom: Vec<u8>,
    vignette: Vec<u8>,
    sweep: Vec<u8>,
}

impl OverlayMaps {
    pub(crate) fn new(canvas: Canvas) -> Self {
        let (w, h) = (canvas.width as f32, canvas.height as f32);
        let short = w.min(h);
        let long = w.max(h);

        let bloom = radial_map(canvas, short / 10.0, long / 1.2, |t| {
            unit_to_u8(BLOOM_ALPHA * (1.0 - t))
        });
        let vignette = radial_map(canvas, short / 8.0, long / 1.1, |t| {
            unit_to_u8(VIGNETTE_ALPHA * t)
        });
        let sweep = (0..canvas.height)
            .map(|y| unit_to_u8(sweep_alpha((y as f32 + 0.5) / h)))
            .collect();

        Self {
            canvas,
            bloom,
            vignette,
            sweep,
        }
    }

    /// Layer wash, bloom, sweep, scanlines and vignette over `buf`, weighted by the clip `mask`.
    pub(crate) fn apply(
        &self,
        buf: &mut PixelBuffer,
        mask: &[u8],
        theme: &Theme,
        scanline_period: u32,
    ) -> CrtResult<()> {
        if buf.canvas() != self.canvas || mask.len() != self.canvas.pixel_count() {
            return Err(CrtError::render("overlay maps do not match frame canvas"));
        }

        let wash = theme.glow.premul().to_array();
        let scan = theme.scan.premul().to_array();
        let period = scanline_period.max(1);
        let width = self.canvas.width as usize;

        for y in 0..self.canvas.height {
            let sweep = self.sweep[y as usize];
            let sweep_px = [sweep, sweep, sweep, sweep];
            let scanline = y % period == 0;
            let row_start = (y as usize) * width;
            let row = buf.row_mut(y);

            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let i = row_start + x;
                let m = mask[i];
                if m == 0 {
                    continue;
                }
                let clip = f32::from(m) / 255.0;
                let b = self.bloom[i];

                let mut d = [px[0], px[1], px[2], px[3]];
                d = over(d, wash, WASH_ALPHA * clip);
                d = over(d, [b, b, b, b], clip);
                d = add(d, sweep_px, clip);
                if scanline {
                    d = over(d, scan, SCANLINE_ALPHA * clip);
                }
                d = over(d, [0, 0, 0, self.vignette[i]], clip);
                px.copy_from_slice(&d);
            }
        }
        Ok(())
    }
}

/// Scatter `count` faint square specks, each randomly white or black.
///
/// Specks cover fractional pixel areas; partially covered pixels receive proportional opacity.
pub(crate) fn sprinkle_noise(
    buf: &mut PixelBuffer,
    mask: &[u8],
    count: u32,
    rng: &mut dyn rand::RngCore,
) -> CrtResult<()> {
    use rand::Rng as _;

    let canvas = buf.canvas();
    if mask.len() != canvas.pixel_count() {
        return Err(CrtError::render("noise mask does not match frame canvas"));
    }
    let (w, h) = (canvas.width as f32, canvas.height as f32);

    for _ in 0..count {
        let x0 = rng.r#gen::<f32>() * w;
        let y0 = rng.r#gen::<f32>() * h;
        let size = rng.r#gen::<f32>() * NOISE_SIZE_RANGE + NOISE_MIN_SIZE;
        let color = if rng.r#gen::<f32>() > 0.5 {
            Rgba8::WHITE
        } else {
            Rgba8::BLACK
        };
        let color = color.premul().to_array();

        let (x1, y1) = ((x0 + size).min(w), (y0 + size).min(h));
        for py in (y0.floor() as u32)..(y1.ceil() as u32) {
            let cov_y = overlap(py as f32, y0, y1);
            for px in (x0.floor() as u32)..(x1.ceil() as u32) {
                let area = cov_y * overlap(px as f32, x0, x1);
                let m = mask[(py as usize) * (canvas.width as usize) + px as usize];
                if area <= 0.0 || m == 0 {
                    continue;
                }
                let i = buf.index(px, py);
                let d = [buf.data[i], buf.data[i + 1], buf.data[i + 2], buf.data[i + 3]];
                let out = over(d, color, NOISE_ALPHA * area * f32::from(m) / 255.0);
                buf.data[i..i + 4].copy_from_slice(&out);
            }
        }
    }
    Ok(())
}

/// Length of `[cell, cell + 1) ∩ [a, b)`.
fn overlap(cell: f32, a: f32, b: f32) -> f32 {
    ((cell + 1.0).min(b) - cell.max(a)).max(0.0)
}

fn sweep_alpha(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    for pair in SWEEP_STOPS.windows(2) {
        let (t0, a0) = pair[0];
        let (t1, a1) = pair[1];
        if t <= t1 {
            return lerp(a0, a1, (t - t0) / (t1 - t0));
        }
    }
    0.0
}

/// Concentric radial gradient centered on the canvas, padded beyond both radii.
fn radial_map(canvas: Canvas, r0: f32, r1: f32, alpha_at: impl Fn(f32) -> u8) -> Vec<u8> {
    let cx = canvas.width as f32 / 2.0;
    let cy = canvas.height as f32 / 2.0;
    let span = (r1 - r0).max(f32::EPSILON);

    let mut out = Vec::with_capacity(canvas.pixel_count());
    for y in 0..canvas.height {
        let dy = y as f32 + 0.5 - cy;
        for x in 0..canvas.width {
            let dx = x as f32 + 0.5 - cx;
            let t = ((dx.hypot(dy) - r0) / span).clamp(0.0, 1.0);
            out.push(alpha_at(t));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
