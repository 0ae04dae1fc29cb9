use std::io::Write;
use std::path::Path;

use rand::SeedableRng as _;

use crate::config::RenderConfig;
use crate::encode::artifact::{TempArtifact, sibling_temp_path};
use crate::encode::gif::GifSink;
use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::core::Frame;
use crate::foundation::error::{CrtError, CrtResult};
use crate::render::frame::FrameRenderer;
use crate::render::overlay::DRAWS_PER_SPECK;
use crate::theme::registry::resolve_theme;
use crate::timeline::builder::Timeline;

/// What to animate: the text and the theme key to look up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationRequest {
    pub text: String,
    /// Unknown or absent keys fall back to the default theme.
    pub theme_key: Option<String>,
}

impl AnimationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            theme_key: None,
        }
    }

    pub fn with_theme(mut self, key: impl Into<String>) -> Self {
        self.theme_key = Some(key.into());
        self
    }
}

/// Source of randomness for the noise overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoiseMode {
    /// No specks are drawn; output depends only on the request and config.
    Disabled,
    /// Specks from a generator seeded with this value; output is reproducible.
    Seeded(u64),
    /// Specks from an OS-seeded generator.
    #[default]
    Entropy,
}

impl NoiseMode {
    fn rng(self) -> Option<rand::rngs::StdRng> {
        match self {
            NoiseMode::Disabled => None,
            NoiseMode::Seeded(seed) => Some(rand::rngs::StdRng::seed_from_u64(seed)),
            NoiseMode::Entropy => Some(rand::rngs::StdRng::from_entropy()),
        }
    }
}

/// Options shared by every build entry point.
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    pub config: RenderConfig,
    pub noise: NoiseMode,
}

/// Summary of a finished build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildStats {
    pub frames: usize,
    /// Sum of the requested frame delays, before quantization.
    pub duration_ms: u64,
    /// Key of the theme actually used.
    pub theme: &'static str,
}

/// Render every timeline step of `request` and stream the frames into `sink` in order.
///
/// The sink sees `begin`, one `push_frame` per step, then `end`. The first failing stage aborts
/// the build and is returned; no further sink calls are made after a failure.
#[tracing::instrument(skip(request, opts, sink), fields(chars = request.text.chars().count()))]
pub fn build_animation(
    request: &AnimationRequest,
    opts: &BuildOptions,
    sink: &mut dyn AnimationSink,
) -> CrtResult<BuildStats> {
    let theme = resolve_theme(request.theme_key.as_deref());
    let timeline = Timeline::build(&request.text, &opts.config.timing);
    let mut renderer = FrameRenderer::new(opts.config.clone())?;
    let mut rng = opts.noise.rng();
    tracing::debug!(steps = timeline.len(), theme = theme.key, "timeline built");

    sink.begin(SinkConfig {
        canvas: opts.config.canvas,
        frame_count: timeline.len(),
        quality: opts.config.gif_quality,
    })?;

    for (index, step) in timeline.iter().enumerate() {
        let noise = rng.as_mut().map(|r| r as &mut dyn rand::RngCore);
        let pixels = renderer.render(step.prefix, step.cursor_visible, theme, noise)?;
        sink.push_frame(&pixels, step.delay_ms)?;
        tracing::trace!(index, phase = ?step.phase, "frame pushed");
    }
    sink.end()?;

    Ok(BuildStats {
        frames: timeline.len(),
        duration_ms: timeline.total_duration_ms(),
        theme: theme.key,
    })
}

/// Build a looping GIF and stream it into `writer`.
pub fn build_gif<W: Write + Send>(
    request: &AnimationRequest,
    opts: &BuildOptions,
    writer: W,
) -> CrtResult<BuildStats> {
    let mut sink = GifSink::new(writer);
    build_animation(request, opts, &mut sink)
}

/// Build a looping GIF in memory.
pub fn build_gif_bytes(request: &AnimationRequest, opts: &BuildOptions) -> CrtResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let stats = build_gif(request, opts, &mut bytes)?;
    tracing::debug!(bytes = bytes.len(), frames = stats.frames, "gif encoded");
    Ok(bytes)
}

/// Build a GIF at `out`.
///
/// Frames are written to a sibling temporary file that is renamed over `out` only after the
/// stream is complete; on any failure the temporary is removed and `out` is left untouched.
#[tracing::instrument(skip(request, opts, out), fields(out = %out.display()))]
pub fn build_animation_to_path(
    request: &AnimationRequest,
    opts: &BuildOptions,
    out: &Path,
) -> CrtResult<BuildStats> {
    if let Some(dir) = out.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    let tmp = TempArtifact::adopt(sibling_temp_path(out));
    let file = std::fs::File::create(tmp.path())?;
    let stats = build_gif(request, opts, std::io::BufWriter::new(file))?;
    tmp.persist(out)?;
    tracing::debug!(frames = stats.frames, "gif written");
    Ok(stats)
}

/// Build a GIF into the system temp directory.
///
/// The returned guard owns the file and deletes it when dropped; call
/// [`TempArtifact::persist`] to keep it.
pub fn build_animation_to_temp(
    request: &AnimationRequest,
    opts: &BuildOptions,
) -> CrtResult<TempArtifact> {
    let tmp = TempArtifact::in_temp_dir("crtype", "gif");
    let file = std::fs::File::create(tmp.path())?;
    build_gif(request, opts, std::io::BufWriter::new(file))?;
    Ok(tmp)
}

/// Render a single timeline step without encoding anything.
///
/// Noise for step `index` matches what a full build with the same options would draw.
#[tracing::instrument(skip(request, opts))]
pub fn render_step(
    request: &AnimationRequest,
    opts: &BuildOptions,
    index: usize,
) -> CrtResult<Frame> {
    let theme = resolve_theme(request.theme_key.as_deref());
    let timeline = Timeline::build(&request.text, &opts.config.timing);
    let step = timeline.get(index).ok_or_else(|| {
        CrtError::validation(format!(
            "step {index} is out of range for a timeline of {} steps",
            timeline.len()
        ))
    })?;

    let mut renderer = FrameRenderer::new(opts.config.clone())?;
    let mut rng = opts.noise.rng();
    if let Some(r) = rng.as_mut() {
        skip_noise(r, opts.config.noise_specks, index);
    }
    let noise = rng.as_mut().map(|r| r as &mut dyn rand::RngCore);
    let pixels = renderer.render(step.prefix, step.cursor_visible, theme, noise)?;
    Ok(Frame {
        pixels,
        delay_ms: step.delay_ms,
    })
}

/// Advance `rng` past the draws made for `frames` earlier frames.
fn skip_noise(rng: &mut rand::rngs::StdRng, specks: u32, frames: usize) {
    use rand::Rng as _;
    let draws = u64::from(specks) * DRAWS_PER_SPECK * frames as u64;
    for _ in 0..draws {
        let _: f32 = rng.r#gen();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
