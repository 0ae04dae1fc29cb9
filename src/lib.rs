//! Crtype renders short text as a retro CRT terminal typing animation and encodes it as a looping
//! GIF.
//!
//! A build runs in four stages:
//!
//! - Build a [`Timeline`] of idle, typing, and trailing steps for the text
//! - Render each step with a [`FrameRenderer`]: bezel, low-resolution phosphor text, curvature
//!   warp, and the overlay stack
//! - Stream frames in order into an [`AnimationSink`], usually a [`GifSink`]
//! - Hand back bytes, a finished file, or a [`TempArtifact`] that cleans up after itself
//!
//! All pixel buffers are **premultiplied** RGBA8. Rendering is CPU-only and, with noise disabled
//! or seeded, fully deterministic.
#![forbid(unsafe_code)]

mod config;
mod encode;
mod foundation;
mod layout;
mod render;
mod text;
mod theme;
mod timeline;

pub use crate::config::{BezelConfig, RenderConfig, TimingConfig};
pub use crate::encode::artifact::TempArtifact;
pub use crate::encode::gif::GifSink;
pub use crate::encode::sink::{AnimationSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{Canvas, Frame, PixelBuffer, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{CrtError, CrtResult};
pub use crate::layout::wrap::wrap_text;
pub use crate::render::frame::FrameRenderer;
pub use crate::render::pipeline::{
    AnimationRequest, BuildOptions, BuildStats, NoiseMode, build_animation,
    build_animation_to_path, build_animation_to_temp, build_gif, build_gif_bytes, render_step,
};
pub use crate::theme::registry::{
    DEFAULT_THEME_KEY, Theme, default_theme, lookup_theme, resolve_theme, themes,
};
pub use crate::timeline::builder::{Phase, Timeline, TimelineStep};
