use crate::api::types::EntityId;

/// Input event types the engine understands.
/// Pointer events arrive already resolved to an entity: hit-testing happens in JS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The user clicked an entity.
    Click { id: EntityId },
    /// The pointer started hovering an entity.
    HoverEnter { id: EntityId },
    /// The pointer left whatever it was hovering.
    HoverLeave,
    /// Camera drag in radians (azimuth, elevation).
    Drag { dx: f32, dy: f32 },
    /// Camera zoom as a distance multiplier (<1 zooms in).
    Zoom { factor: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A custom event from the UI layer (control panel buttons, sliders, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
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

    /// Iterate over pending events in arrival order without consuming them.
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
