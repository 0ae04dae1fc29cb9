//! Build configuration.
//!
//! Every knob of the renderer, the timeline and the encoder lives in [`RenderConfig`]. The
//! defaults reproduce the stock CRT look; a JSON file can override any subset of fields.

use std::path::{Path, PathBuf};

use crate::foundation::core::Canvas;
use crate::foundation::error::{CrtError, CrtResult};

/// Timing of the three timeline phases.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Delay of each typing frame.
    pub type_delay_ms: u32,
    /// Delay of each idle/trailing blink frame.
    pub blink_delay_ms: u32,
    /// Number of blink frames before typing starts.
    pub idle_frames: u32,
    /// Number of blink frames after the text is complete.
    pub trailing_frames: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            type_delay_ms: 60,
            blink_delay_ms: 380,
            idle_frames: 3,
            trailing_frames: 6,
        }
    }
}

/// Geometry of the rounded screen inset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BezelConfig {
    /// Inset from every canvas edge, in display pixels.
    pub margin: f64,
    /// Corner radius, in display pixels.
    pub radius: f64,
    /// Opacity of the black drop shadow under the bezel.
    pub shadow_alpha: f32,
}

impl Default for BezelConfig {
    fn default() -> Self {
        Self {
            margin: 8.0,
            radius: 14.0,
            shadow_alpha: 0.5,
        }
    }
}

/// Full configuration for one animation build.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Display resolution of every frame.
    pub canvas: Canvas,
    /// Integer factor between display and phosphor resolution.
    pub phosphor_scale: u32,
    /// Nominal font size at display resolution.
    pub base_font_size: f32,
    /// CSS-style font family list; unmatched names fall back to the platform default.
    pub font_family: String,
    /// Optional font file registered before the family list is resolved.
    pub font_path: Option<PathBuf>,
    pub bold: bool,
    /// Line height as a multiple of the phosphor font size.
    pub line_height_factor: f32,
    /// Left/right text padding at display resolution.
    pub padding_x: f32,
    /// Top text padding at display resolution.
    pub padding_y: f32,
    pub bezel: BezelConfig,
    /// Peak horizontal displacement of the curvature warp, in display pixels.
    pub curvature_amplitude: f32,
    /// Vertical distance between scanlines, in display pixels.
    pub scanline_period: u32,
    /// Number of noise specks per frame.
    pub noise_specks: u32,
    /// Glyph appended to the visible text while the cursor is on.
    pub cursor: char,
    pub timing: TimingConfig,
    /// Color quantization setting handed to the GIF encoder (1 = best, 30 = fastest).
    pub gif_quality: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::new(500, 200),
            phosphor_scale: 3,
            base_font_size: 32.0,
            font_family: "\"Courier New\", monospace".to_owned(),
            font_path: None,
            bold: true,
            line_height_factor: 1.4,
            padding_x: 16.0,
            padding_y: 20.0,
            bezel: BezelConfig::default(),
            curvature_amplitude: 2.0,
            scanline_period: 4,
            noise_specks: 80,
            cursor: '_',
            timing: TimingConfig::default(),
            gif_quality: 10,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> CrtResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CrtError::validation("canvas width/height must be non-zero"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(CrtError::validation(format!(
                "canvas {}x{} exceeds the GIF limit of {}",
                self.canvas.width,
                self.canvas.height,
                u16::MAX
            )));
        }
        if self.phosphor_scale == 0 {
            return Err(CrtError::validation("phosphor_scale must be >= 1"));
        }
        let phosphor = self.phosphor_canvas();
        if phosphor.width == 0 || phosphor.height == 0 {
            return Err(CrtError::validation(
                "phosphor_scale leaves a zero-sized phosphor buffer",
            ));
        }
        if !self.base_font_size.is_finite() || self.base_font_size <= 0.0 {
            return Err(CrtError::validation(
                "base_font_size must be finite and > 0",
            ));
        }
        if !self.line_height_factor.is_finite() || self.line_height_factor <= 0.0 {
            return Err(CrtError::validation(
                "line_height_factor must be finite and > 0",
            ));
        }
        if !self.curvature_amplitude.is_finite() {
            return Err(CrtError::validation("curvature_amplitude must be finite"));
        }
        if self.scanline_period == 0 {
            return Err(CrtError::validation("scanline_period must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.bezel.shadow_alpha) {
            return Err(CrtError::validation("bezel.shadow_alpha must be in [0, 1]"));
        }
        if !(1..=30).contains(&self.gif_quality) {
            return Err(CrtError::validation("gif_quality must be in 1..=30"));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> CrtResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| CrtError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> CrtResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            CrtError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    pub fn phosphor_canvas(&self) -> Canvas {
        self.canvas.downscaled(self.phosphor_scale)
    }

    /// Font size used on the phosphor grid, never below 10px.
    pub fn pixel_font_size(&self) -> f32 {
        (self.base_font_size / self.phosphor_scale.max(1) as f32)
            .round()
            .max(10.0)
    }

    pub fn line_height(&self) -> f32 {
        (self.pixel_font_size() * self.line_height_factor).round()
    }

    /// Width budget for one wrapped line, in phosphor pixels.
    pub fn max_text_width(&self) -> f32 {
        (self.canvas.width as f32 - self.padding_x * 2.0) / self.phosphor_scale.max(1) as f32
    }

    /// Top-left of the first text line, in phosphor pixels.
    pub fn text_origin(&self) -> (f32, f32) {
        let s = self.phosphor_scale.max(1) as f32;
        (self.padding_x / s, self.padding_y / s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
