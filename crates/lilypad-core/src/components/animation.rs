//! Tick-counter animation cycling.
//!
//! The simulation runs on whole ticks, so frame selection is integer
//! arithmetic: a frame advances every `delay` ticks and the sequence
//! loops with the counter.

/// Selects animation frames from a running tick counter.
///
/// The counter only resets on explicit state changes (a jump, a facing
/// change), so switching between sets of equal length keeps the beat.
#[derive(Debug, Clone)]
pub struct FrameCycle {
    delay: u32,
    counter: u32,
}

impl FrameCycle {
    pub fn new(delay: u32) -> Self {
        Self {
            delay: delay.max(1),
            counter: 0,
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Frame to show right now for a set of `frame_count` frames.
    pub fn frame_index(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        (self.counter / self.delay) as usize % frame_count
    }

    /// Count one elapsed tick.
    pub fn advance(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }
}
