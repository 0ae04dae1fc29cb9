//! Process-wide theme presets.
//!
//! The registry is an immutable map built on first use and shared read-only by every build.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::foundation::core::Rgba8;

/// A named, immutable bundle of colors and effect parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Registry key, lowercase.
    pub key: &'static str,
    /// Human-readable name.
    pub label: &'static str,
    /// Bezel fill behind the phosphor text.
    pub background: Rgba8,
    /// Phosphor glyph color.
    pub text: Rgba8,
    /// Color of the flat luminance wash.
    pub glow: Rgba8,
    /// Scanline color.
    pub scan: Rgba8,
    /// Drop shadow blur magnitude under the bezel, in display pixels.
    pub shadow_blur: f32,
}

/// Key of the preset used for unknown or absent theme keys.
pub const DEFAULT_THEME_KEY: &str = "green";

static PRESETS: [Theme; 3] = [
    Theme {
        key: "black",
        label: "Black CRT",
        background: Rgba8::opaque(0x00, 0x00, 0x00),
        text: Rgba8::opaque(0x00, 0xff, 0x66),
        glow: Rgba8::opaque(0x00, 0x00, 0x00),
        scan: Rgba8::opaque(0x00, 0x00, 0x00),
        shadow_blur: 32.0,
    },
    Theme {
        key: "green",
        label: "Green CRT",
        background: Rgba8::opaque(0x0a, 0x2d, 0x0a),
        text: Rgba8::opaque(0x00, 0xff, 0x66),
        glow: Rgba8::opaque(0x00, 0xff, 0x66),
        scan: Rgba8::opaque(0x00, 0xff, 0x66),
        shadow_blur: 26.0,
    },
    Theme {
        key: "blue",
        label: "Blue CRT",
        background: Rgba8::opaque(0x00, 0x11, 0x22),
        text: Rgba8::opaque(0x00, 0xff, 0x66),
        glow: Rgba8::opaque(0x00, 0x66, 0xff),
        scan: Rgba8::opaque(0x00, 0x66, 0xff),
        shadow_blur: 24.0,
    },
];

static REGISTRY: LazyLock<BTreeMap<&'static str, &'static Theme>> =
    LazyLock::new(|| PRESETS.iter().map(|t| (t.key, t)).collect());

/// All presets in key order.
pub fn themes() -> impl Iterator<Item = &'static Theme> {
    REGISTRY.values().copied()
}

/// Exact lookup after trimming and lowercasing `key`.
pub fn lookup_theme(key: &str) -> Option<&'static Theme> {
    let key = key.trim().to_lowercase();
    REGISTRY.get(key.as_str()).copied()
}

pub fn default_theme() -> &'static Theme {
    PRESETS
        .iter()
        .find(|t| t.key == DEFAULT_THEME_KEY)
        .unwrap_or(&PRESETS[0])
}

/// Resolve a requested key, falling back to [`default_theme`] for anything unrecognized.
pub fn resolve_theme(key: Option<&str>) -> &'static Theme {
    match key.and_then(lookup_theme) {
        Some(theme) => theme,
        None => {
            tracing::debug!(requested = ?key, fallback = DEFAULT_THEME_KEY, "theme fallback");
            default_theme()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;
