use serde::Deserialize;

use crate::api::types::{EntityId, GameEvent};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::RenderBuffer;

/// Configuration for the engine, provided by the game.
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum number of render instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
    /// Vertical field of view in degrees (default: 75).
    pub fov_y_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Camera position at scene start.
    pub camera_position: [f32; 3],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_instances: 64,
            max_events: 64,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_position: [0.0, 20.0, 40.0],
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called before init and again after every
    /// accepted settings load.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply game-specific settings from JSON. Games without settings accept anything.
    fn load_settings(&mut self, _json: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    /// Seed randomness from host entropy. Called once, right after construction.
    fn reseed(&mut self, _entropy: u64) {}

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick. `dt` is the real time elapsed since the previous frame, in seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);

    /// Optional read-only render pass: write the camera and any custom instances.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a context whose scene and event storage are sized from the config.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for the game's render pass.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub camera: &'a mut CameraUniform,
}
