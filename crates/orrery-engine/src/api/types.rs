use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
/// The presentation layer reports clicks and hovers using these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to TypeScript through WASM memory.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// Encode a boolean as a payload float (1.0 / 0.0).
    #[inline]
    pub fn flag(value: bool) -> f32 {
        if value { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }

    #[test]
    fn flag_encodes_bool() {
        assert_eq!(GameEvent::flag(true), 1.0);
        assert_eq!(GameEvent::flag(false), 0.0);
    }
}
