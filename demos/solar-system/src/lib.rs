use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod bodies;
pub mod controls;
pub mod error;
pub mod focus;
pub mod follow;
pub mod game;
pub mod orbit;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use game::SolarSystem;
pub use settings::Settings;
pub use sim::Simulation;

orrery_web::export_game!(SolarSystem, "solar-system");
