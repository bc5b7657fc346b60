/// Body registry: the static table of orbiting bodies plus the central sun.
///
/// Distances and sizes are scene units chosen for readability, not astronomy.
/// Speeds are radians per second at multiplier 1.0.

use serde::Deserialize;

use crate::error::{SettingsError, SettingsResult};

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_TAG: &str = "sun";
pub const SUN_RADIUS: f32 = 8.0;
pub const SUN_COLOR: [f32; 3] = hex_rgb(0xFDB813);
pub const SUN_EMISSIVE: f32 = 3.0;
/// Axial spin of the sun (rad/s).
pub const SUN_SPIN: f64 = 0.05;

pub const CORONA_TAG: &str = "corona";
pub const CORONA_RADIUS: f32 = 8.6;
pub const CORONA_COLOR: [f32; 3] = hex_rgb(0xFFD700);
pub const CORONA_EMISSIVE: f32 = 1.5;
/// Corona shell spin (rad/s).
pub const CORONA_SPIN: f64 = 0.02;
/// Corona tumble about the world X axis (rad/s).
pub const CORONA_TUMBLE: f64 = 0.01;

/// Planet surface glow, relative to its own color.
pub const PLANET_EMISSIVE: f32 = 0.05;

/// Convert 0xRRGGBB into RGB floats in [0, 1].
pub const fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Parse a "#RRGGBB" string into RGB floats.
pub fn parse_color(text: &str) -> SettingsResult<[f32; 3]> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.len() != 6 {
        return Err(SettingsError::InvalidColor(text.to_string()));
    }
    u32::from_str_radix(digits, 16)
        .map(hex_rgb)
        .map_err(|_| SettingsError::InvalidColor(text.to_string()))
}

/// Body description as written in settings JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyDesc {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub radius: f32,
    pub distance: f64,
    /// Base orbital angular speed (rad/s).
    pub orbit_speed: f64,
    /// Axial spin rate (rad/s).
    pub spin_speed: f64,
    /// "#RRGGBB"
    pub color: String,
    #[serde(default)]
    pub has_rings: bool,
}

/// One orbiting body. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub key: String,
    pub name: String,
    pub description: String,
    pub radius: f32,
    pub distance: f64,
    pub orbit_speed: f64,
    pub spin_speed: f64,
    pub color: [f32; 3],
    pub has_rings: bool,
}

impl Body {
    fn builtin(
        key: &str,
        name: &str,
        description: &str,
        radius: f32,
        distance: f64,
        orbit_speed: f64,
        spin_speed: f64,
        color: u32,
    ) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            radius,
            distance,
            orbit_speed,
            spin_speed,
            color: hex_rgb(color),
            has_rings: false,
        }
    }

    fn with_rings(mut self) -> Self {
        self.has_rings = true;
        self
    }

    fn from_desc(desc: BodyDesc) -> SettingsResult<Self> {
        let invalid = |reason: &str| SettingsError::InvalidBody {
            key: desc.key.clone(),
            reason: reason.to_string(),
        };
        if desc.key.is_empty() {
            return Err(invalid("empty key"));
        }
        if !(desc.radius.is_finite() && desc.radius > 0.0) {
            return Err(invalid("radius must be positive"));
        }
        if !(desc.distance.is_finite() && desc.distance > 0.0) {
            return Err(invalid("distance must be positive"));
        }
        if !desc.orbit_speed.is_finite() || !desc.spin_speed.is_finite() {
            return Err(invalid("speeds must be finite"));
        }
        let color = parse_color(&desc.color)?;
        Ok(Self {
            key: desc.key,
            name: desc.name,
            description: desc.description,
            radius: desc.radius,
            distance: desc.distance,
            orbit_speed: desc.orbit_speed,
            spin_speed: desc.spin_speed,
            color,
            has_rings: desc.has_rings,
        })
    }
}

/// Ordered, key-unique table of bodies. The index of a body is its arena slot
/// in every per-body array of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    bodies: Vec<Body>,
}

impl Registry {
    /// The eight planets.
    pub fn solar() -> Self {
        Self {
            bodies: vec![
                Body::builtin("mercury", "Mercury", "Closest to the Sun", 1.2, 14.0, 0.048, 0.006, 0x8C7853),
                Body::builtin("venus", "Venus", "Hottest planet", 2.5, 18.0, 0.035, 0.004, 0xFFC649),
                Body::builtin("earth", "Earth", "Our home planet", 2.6, 25.0, 0.03, 0.01, 0x6B93D6),
                Body::builtin("mars", "Mars", "The Red Planet", 1.4, 32.0, 0.024, 0.0097, 0xC1440E),
                Body::builtin("jupiter", "Jupiter", "Largest planet", 5.8, 40.0, 0.013, 0.024, 0xD8CA9D),
                Body::builtin("saturn", "Saturn", "Planet with rings", 4.0, 52.0, 0.0096, 0.022, 0xFAD5A5).with_rings(),
                Body::builtin("uranus", "Uranus", "Ice giant", 3.8, 64.0, 0.0068, 0.014, 0x4FD0E7),
                Body::builtin("neptune", "Neptune", "Farthest planet", 3.6, 78.0, 0.0054, 0.016, 0x4B70DD),
            ],
        }
    }

    /// Validate descriptions and build a registry.
    pub fn from_descs(descs: Vec<BodyDesc>) -> SettingsResult<Self> {
        if descs.is_empty() {
            return Err(SettingsError::EmptyRegistry);
        }
        let mut bodies: Vec<Body> = Vec::with_capacity(descs.len());
        for desc in descs {
            if bodies.iter().any(|b| b.key == desc.key) {
                return Err(SettingsError::DuplicateBody(desc.key));
            }
            bodies.push(Body::from_desc(desc)?);
        }
        Ok(Self { bodies })
    }

    /// Parse a JSON array of body descriptions.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let descs: Vec<BodyDesc> = serde_json::from_str(json)?;
        Self::from_descs(descs)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.key == key)
    }

    pub fn by_key(&self, key: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::solar()
    }
}
