use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;

fn small_opts(noise: NoiseMode) -> BuildOptions {
    BuildOptions {
        config: RenderConfig {
            canvas: Canvas::new(96, 48),
            ..RenderConfig::default()
        },
        noise,
    }
}

#[test]
fn sink_receives_one_frame_per_step_in_order() {
    let mut sink = InMemorySink::new();
    let stats = build_animation(
        &AnimationRequest::new("Hi"),
        &small_opts(NoiseMode::Disabled),
        &mut sink,
    )
    .unwrap();

    assert_eq!(stats.frames, 11);
    assert_eq!(stats.theme, "green");
    assert_eq!(stats.duration_ms, 3 * 380 + 2 * 60 + 6 * 380);
    assert!(sink.is_finished());
    let cfg = sink.config().unwrap();
    assert_eq!(cfg.frame_count, 11);
    assert_eq!(cfg.canvas, Canvas::new(96, 48));

    let delays: Vec<u32> = sink.frames().iter().map(|(_, d)| *d).collect();
    assert_eq!(delays, vec![380, 380, 380, 60, 60, 380, 380, 380, 380, 380, 380]);
}

#[test]
fn blinking_alternates_cursor_visibility() {
    let opts = BuildOptions {
        config: RenderConfig::default(),
        noise: NoiseMode::Disabled,
    };
    let mut sink = InMemorySink::new();
    build_animation(&AnimationRequest::new(""), &opts, &mut sink).unwrap();
    let frames = sink.frames();
    assert_eq!(frames.len(), 9);

    // Idle 0, idle 2 and trailing 0 show the cursor; idle 1 and trailing 1 hide it.
    assert_eq!(frames[0].0, frames[2].0);
    assert_eq!(frames[2].0, frames[3].0);
    assert_eq!(frames[1].0, frames[4].0);
    assert_ne!(frames[0].0, frames[1].0);
}

#[test]
fn typing_frames_reveal_one_more_character() {
    let opts = BuildOptions {
        config: RenderConfig::default(),
        noise: NoiseMode::Disabled,
    };
    let mut sink = InMemorySink::new();
    build_animation(&AnimationRequest::new("Hi"), &opts, &mut sink).unwrap();
    let frames = sink.frames();
    assert_eq!(frames.len(), 11);

    // Cursor only, then "H_", then "Hi_".
    assert_ne!(frames[2].0, frames[3].0);
    assert_ne!(frames[3].0, frames[4].0);
}

#[test]
fn unknown_theme_renders_like_the_default() {
    let opts = small_opts(NoiseMode::Disabled);
    let mut unknown = InMemorySink::new();
    let mut default = InMemorySink::new();
    build_animation(
        &AnimationRequest::new("ok").with_theme("no-such-theme"),
        &opts,
        &mut unknown,
    )
    .unwrap();
    build_animation(
        &AnimationRequest::new("ok").with_theme("green"),
        &opts,
        &mut default,
    )
    .unwrap();
    assert_eq!(unknown.frames(), default.frames());
}

#[test]
fn render_step_matches_the_full_build() {
    let opts = small_opts(NoiseMode::Seeded(99));
    let request = AnimationRequest::new("ab").with_theme("blue");
    let mut sink = InMemorySink::new();
    build_animation(&request, &opts, &mut sink).unwrap();

    for index in [0usize, 4, 7] {
        let frame = render_step(&request, &opts, index).unwrap();
        assert_eq!(frame.pixels, sink.frames()[index].0, "step {index}");
        assert_eq!(frame.delay_ms, sink.frames()[index].1);
    }
}

#[test]
fn render_step_rejects_out_of_range_index() {
    let err = render_step(
        &AnimationRequest::new("ab"),
        &small_opts(NoiseMode::Disabled),
        11,
    )
    .unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

struct FailingSink {
    pushed: usize,
    fail_at: usize,
    ended: bool,
}

impl AnimationSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> CrtResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _frame: &crate::PixelBuffer, _delay_ms: u32) -> CrtResult<()> {
        if self.pushed == self.fail_at {
            return Err(CrtError::encode("sink refused frame"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> CrtResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn sink_failure_aborts_the_build() {
    let mut sink = FailingSink {
        pushed: 0,
        fail_at: 2,
        ended: false,
    };
    let err = build_animation(
        &AnimationRequest::new("abc"),
        &small_opts(NoiseMode::Disabled),
        &mut sink,
    )
    .unwrap_err();
    assert!(err.to_string().contains("sink refused frame"));
    assert_eq!(sink.pushed, 2);
    assert!(!sink.ended);
}

#[test]
fn invalid_config_fails_before_the_sink_starts() {
    let opts = BuildOptions {
        config: RenderConfig {
            phosphor_scale: 0,
            ..RenderConfig::default()
        },
        noise: NoiseMode::Disabled,
    };
    let mut sink = InMemorySink::new();
    assert!(build_animation(&AnimationRequest::new("x"), &opts, &mut sink).is_err());
    assert!(sink.config().is_none());
}
