use crate::config::TimingConfig;

/// Which part of the animation a step belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Cursor blinks over an empty screen.
    Idle,
    /// One more codepoint is revealed per step.
    Typing,
    /// Cursor blinks after the full text.
    Trailing,
}

/// One frame's worth of state: what text is visible, whether the cursor is on, and for how long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineStep<'a> {
    pub phase: Phase,
    /// Codepoint prefix of the input text.
    pub prefix: &'a str,
    pub cursor_visible: bool,
    pub delay_ms: u32,
}

/// Ordered steps of one animation: idle, then typing, then trailing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline<'a> {
    steps: Vec<TimelineStep<'a>>,
}

impl<'a> Timeline<'a> {
    /// Build the timeline for `text`.
    ///
    /// The result has `idle_frames + codepoints(text) + trailing_frames` steps and depends on
    /// nothing but the codepoint boundaries of `text` and the timing constants.
    pub fn build(text: &'a str, timing: &TimingConfig) -> Self {
        let codepoints = text.chars().count();
        let mut steps = Vec::with_capacity(
            timing.idle_frames as usize + codepoints + timing.trailing_frames as usize,
        );

        for i in 0..timing.idle_frames {
            steps.push(TimelineStep {
                phase: Phase::Idle,
                prefix: "",
                cursor_visible: i % 2 == 0,
                delay_ms: timing.blink_delay_ms,
            });
        }

        for (start, ch) in text.char_indices() {
            steps.push(TimelineStep {
                phase: Phase::Typing,
                prefix: &text[..start + ch.len_utf8()],
                cursor_visible: true,
                delay_ms: timing.type_delay_ms,
            });
        }

        for i in 0..timing.trailing_frames {
            steps.push(TimelineStep {
                phase: Phase::Trailing,
                prefix: text,
                cursor_visible: i % 2 == 0,
                delay_ms: timing.blink_delay_ms,
            });
        }

        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[TimelineStep<'a>] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&TimelineStep<'a>> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineStep<'a>> {
        self.steps.iter()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.delay_ms)).sum()
    }
}

impl<'t, 'a> IntoIterator for &'t Timeline<'a> {
    type Item = &'t TimelineStep<'a>;
    type IntoIter = std::slice::Iter<'t, TimelineStep<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
