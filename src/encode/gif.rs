use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{CrtError, CrtResult};

/// Streams frames into an infinitely looping GIF89a.
///
/// Each frame is quantized to its own palette as it arrives, so memory stays bounded by a single
/// frame regardless of animation length. The stream is complete (trailer written, writer
/// flushed) once `end` returns `Ok`.
pub struct GifSink<W: Write + Send> {
    writer: Option<W>,
    encoder: Option<GifEncoder<TrapWriter<W>>>,
    trap: Arc<Mutex<Option<io::Error>>>,
    cfg: Option<SinkConfig>,
    pushed: usize,
}

impl<W: Write + Send> GifSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
            encoder: None,
            trap: Arc::new(Mutex::new(None)),
            cfg: None,
            pushed: 0,
        }
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> usize {
        self.pushed
    }

    fn take_trapped(&self) -> Option<io::Error> {
        self.trap.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl<W: Write + Send> AnimationSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> CrtResult<()> {
        if cfg.canvas.width == 0 || cfg.canvas.height == 0 {
            return Err(CrtError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        cfg.canvas.as_u16()?;
        if !(1..=30).contains(&cfg.quality) {
            return Err(CrtError::validation("gif quality must be in 1..=30"));
        }
        let writer = self
            .writer
            .take()
            .ok_or_else(|| CrtError::encode("gif sink already started"))?;

        let trap = TrapWriter {
            inner: writer,
            error: Arc::clone(&self.trap),
        };
        let mut encoder = GifEncoder::new_with_speed(trap, cfg.quality);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| CrtError::encode(format!("failed to set gif loop mode: {e}")))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.pushed = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &PixelBuffer, delay_ms: u32) -> CrtResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| CrtError::encode("gif sink not started"))?;
        if frame.canvas() != cfg.canvas {
            return Err(CrtError::encode(format!(
                "frame is {}x{}, gif stream is {}x{}",
                frame.width, frame.height, cfg.canvas.width, cfg.canvas.height
            )));
        }
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| CrtError::encode("gif sink not started"))?;

        let rgba = image::RgbaImage::from_raw(
            frame.width,
            frame.height,
            flatten_premul_over_black(&frame.data),
        )
            .ok_or_else(|| CrtError::encode("frame buffer does not match its dimensions"))?;
        let delay = image::Delay::from_numer_denom_ms(u32::from(delay_centis(delay_ms)) * 10, 1);

        if let Err(e) = encoder.encode_frame(image::Frame::from_parts(rgba, 0, 0, delay)) {
            return Err(match self.take_trapped() {
                Some(io) => CrtError::Io(io),
                None => CrtError::encode(format!("gif frame encode failed: {e}")),
            });
        }
        self.pushed += 1;
        tracing::trace!(frame = self.pushed, delay_ms, "gif frame encoded");
        Ok(())
    }

    fn end(&mut self) -> CrtResult<()> {
        if self.pushed == 0 {
            self.encoder = None;
            return Err(CrtError::encode("gif stream needs at least one frame"));
        }
        // Dropping the encoder writes the trailer and flushes the writer.
        drop(self.encoder.take());
        if let Some(e) = self.take_trapped() {
            return Err(CrtError::Io(e));
        }
        tracing::debug!(frames = self.pushed, "gif stream finished");
        Ok(())
    }
}

/// Quantize a delay to GIF centiseconds, rounding half up.
pub(crate) fn delay_centis(delay_ms: u32) -> u16 {
    let cs = (u64::from(delay_ms) + 5) / 10;
    u16::try_from(cs).unwrap_or(u16::MAX)
}

/// Composite premultiplied pixels over opaque black into straight RGBA8.
///
/// Black contributes nothing under source-over, so the premultiplied color channels are already
/// the flattened result.
fn flatten_premul_over_black(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for px in src.chunks_exact(4) {
        out.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    out
}

/// Passes writes through and keeps the first I/O error, including ones raised while the encoder
/// is being dropped.
struct TrapWriter<W: Write> {
    inner: W,
    error: Arc<Mutex<Option<io::Error>>>,
}

impl<W: Write> TrapWriter<W> {
    fn record<T>(&self, res: io::Result<T>) -> io::Result<T> {
        if let Err(e) = &res
            && let Ok(mut slot) = self.error.lock()
            && slot.is_none()
        {
            *slot = Some(io::Error::new(e.kind(), e.to_string()));
        }
        res
    }
}

impl<W: Write> Write for TrapWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let res = self.inner.write(buf);
        self.record(res)
    }

    fn flush(&mut self) -> io::Result<()> {
        let res = self.inner.flush();
        self.record(res)
    }
}

impl<W: Write> Drop for TrapWriter<W> {
    fn drop(&mut self) {
        let res = self.inner.flush();
        let _ = self.record(res);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
