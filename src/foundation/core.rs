use crate::foundation::error::{CrtError, CrtResult};

/// Pixel dimensions of a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Integer downscale used for the phosphor grid: `floor(dim / scale)` on both axes.
    pub fn downscaled(self, scale: u32) -> Self {
        let scale = scale.max(1);
        Self {
            width: self.width / scale,
            height: self.height / scale,
        }
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    pub(crate) fn byte_len(self) -> CrtResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CrtError::render("pixel buffer size overflow"))
    }

    /// Dimensions as the `u16` pair expected by `vello_cpu`.
    pub(crate) fn as_u16(self) -> CrtResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| CrtError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| CrtError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight-alpha RGBA8 color, as written in theme presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    /// `#rrggbb`, with an alpha pair appended only when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A fixed-size raster of premultiplied RGBA8 pixels, row-major and tightly packed.
///
/// Full-resolution buffers are the display canvas; low-resolution ones hold the phosphor grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a buffer filled with one premultiplied color.
    pub fn filled(canvas: Canvas, color: Rgba8Premul) -> CrtResult<Self> {
        let len = canvas.byte_len()?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| CrtError::render(format!("pixel buffer allocation failed: {e}")))?;
        let px = color.to_array();
        for _ in 0..canvas.pixel_count() {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    pub fn transparent(canvas: Canvas) -> CrtResult<Self> {
        Self::filled(canvas, Rgba8Premul::transparent())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = (self.width as usize) * 4;
        let start = (y as usize) * stride;
        &mut self.data[start..start + stride]
    }
}

/// One rendered frame of the animation and how long it stays on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub pixels: PixelBuffer,
    /// Display duration in milliseconds, quantized by the encoder.
    pub delay_ms: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
