use glam::Vec3;
use crate::api::types::EntityId;

/// Fat Entity: a single struct holding everything the renderer needs for one body.
/// Game logic owns the simulation state; entities only carry the derived pose.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Rotation about the entity's own Y axis, in radians.
    pub rotation: f32,
    /// Rotation about the world X axis, in radians.
    pub tilt: f32,
    /// Sphere radius in world units.
    pub radius: f32,
    /// Display scale multiplier on top of `radius` (hover pulse etc.).
    pub scale: f32,
    /// RGB color, components in [0, 1].
    pub color: [f32; 3],
    /// Emissive strength (0 = lit only by the scene, >1 for HDR glow).
    pub emissive: f32,
    /// Highlight amount for outlines / orbit rings (0..1).
    pub highlight: f32,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: 0.0,
            tilt: 0.0,
            radius: 1.0,
            scale: 1.0,
            color: [1.0, 1.0, 1.0],
            emissive: 0.0,
            highlight: 0.0,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}
