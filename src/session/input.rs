//! Input events and the sources the loop drains each frame.

use std::collections::VecDeque;

/// A pressed key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Escape.
    Escape,
    /// A printable key.
    Char(char),
    /// Anything else.
    Other,
}

impl Key {
    /// Escape and `q`/`Q` end the session.
    pub fn is_exit(self) -> bool {
        matches!(self, Self::Escape | Self::Char('q' | 'Q'))
    }
}

/// One input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or the run budget is spent.
    Quit,
    /// A key went down.
    KeyDown(Key),
}

impl InputEvent {
    /// Whether this event ends the session.
    pub fn is_exit(self) -> bool {
        match self {
            Self::Quit => true,
            Self::KeyDown(key) => key.is_exit(),
        }
    }
}

/// Source of pending input events, drained once per frame.
pub trait InputSource {
    /// Append every pending event to `out`.
    fn poll(&mut self, out: &mut Vec<InputEvent>);
}

/// Never produces events; the loop runs until something else stops it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _out: &mut Vec<InputEvent>) {}
}

/// Emits [`InputEvent::Quit`] on the n-th poll.
///
/// The iteration that observes the quit still updates and renders, so a budget of `n` yields `n`
/// presented frames.
#[derive(Clone, Copy, Debug)]
pub struct FrameBudget {
    remaining: u64,
}

impl FrameBudget {
    /// Quit after `frames` polls.
    pub fn frames(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl InputSource for FrameBudget {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            out.push(InputEvent::Quit);
        }
    }
}

/// Replays one batch of events per poll, then nothing.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    /// Replay `batches` in order.
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
        }
    }

    /// Batches not yet replayed.
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        if let Some(batch) = self.batches.pop_front() {
            out.extend(batch);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/input.rs"]
mod tests;
