pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::{Clock, Expiry};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{Camera3D, CameraMode, CameraUniform};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::render::build_render_buffer;
pub use extensions::{lerp, lerp_vec3};
