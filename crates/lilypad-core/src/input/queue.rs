/// The game's actions. The bridge maps platform key codes to these
/// before anything reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
}

/// Input event types the simulation understands.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A key went down.
    KeyDown(Key),
    /// A key came back up.
    KeyUp(Key),
    /// The frontend asked the loop to end.
    Quit,
}

/// A queue of input events.
/// JS writes events into the queue; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// What one simulation tick gets to see.
///
/// Movement keys are level-triggered (held state), the jump is
/// edge-triggered, and quit is a latch.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump_pressed: bool,
    pub left_held: bool,
    pub right_held: bool,
    pub quit: bool,
}

/// Folds queued events into held-key state between frames and hands
/// each tick its view of the input.
#[derive(Debug, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    jump_pressed: bool,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.left_held = true,
            InputEvent::KeyUp(Key::Left) => self.left_held = false,
            InputEvent::KeyDown(Key::Right) => self.right_held = true,
            InputEvent::KeyUp(Key::Right) => self.right_held = false,
            InputEvent::KeyDown(Key::Jump) => self.jump_pressed = true,
            InputEvent::KeyUp(Key::Jump) => {}
            InputEvent::Quit => self.quit = true,
        }
    }

    /// Snapshot for the next tick. The jump edge is consumed, so one
    /// press triggers exactly one jump even when a frame runs several
    /// catch-up ticks.
    pub fn take_tick(&mut self) -> TickInput {
        TickInput {
            jump_pressed: std::mem::take(&mut self.jump_pressed),
            left_held: self.left_held,
            right_held: self.right_held,
            quit: self.quit,
        }
    }
}
