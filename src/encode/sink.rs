use crate::foundation::core::{Canvas, PixelBuffer};
use crate::foundation::error::CrtResult;

/// Configuration provided to an [`AnimationSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Size of every frame that will be pushed.
    pub canvas: Canvas,
    /// Number of frames the timeline will push.
    pub frame_count: usize,
    /// Palette quantization quality, 1 (best) to 30 (fastest).
    pub quality: i32,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// `begin` is called once, then `push_frame` once per timeline step in order, then `end` once.
/// A sink that returns an error from any call receives no further calls.
pub trait AnimationSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> CrtResult<()>;
    /// Push one frame and its display duration in milliseconds.
    fn push_frame(&mut self, frame: &PixelBuffer, delay_ms: u32) -> CrtResult<()>;
    fn end(&mut self) -> CrtResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(PixelBuffer, u32)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames with their delays, in push order.
    pub fn frames(&self) -> &[(PixelBuffer, u32)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AnimationSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CrtResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.frames.reserve(cfg.frame_count);
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &PixelBuffer, delay_ms: u32) -> CrtResult<()> {
        self.frames.push((frame.clone(), delay_ms));
        Ok(())
    }

    fn end(&mut self) -> CrtResult<()> {
        self.finished = true;
        Ok(())
    }
}
