// extensions/mod.rs
//
// Small math helpers shared by the camera and by games.
// No dependencies on Entity/Scene.

pub mod easing;

pub use easing::{lerp, lerp_vec3};
