use glam::Vec3;
use log::warn;
use orrery_engine::CameraMode;
use serde::Deserialize;

use crate::bodies::{BodyDesc, Registry};
use crate::error::SettingsResult;

/// Seed used when neither the settings nor the host supply one.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Tunables for the simulation, loaded from JSON before (or after) init.
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper bound of every speed multiplier.
    pub max_speed: f64,
    /// Seconds a focus target stays active after a click.
    pub focus_duration_secs: f64,
    /// Vertical lift of the focus vantage point.
    pub vantage_height: f32,
    /// Camera offset from the focus target in follow mode.
    pub follow_offset: [f32; 3],
    /// Fraction of the remaining gap the follow camera closes per frame.
    pub follow_alpha: f32,
    pub initial_camera_mode: CameraMode,
    /// Eye-to-target distance limits for user zoom.
    pub min_distance: f32,
    pub max_distance: f32,
    /// RNG seed for initial phases and vantage angles. When absent the host
    /// supplies entropy, so each session starts from a different layout.
    pub seed: Option<u64>,
    /// Replaces the built-in planets when present.
    pub bodies: Option<Vec<BodyDesc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            focus_duration_secs: 5.0,
            vantage_height: 2.0,
            follow_offset: [8.0, 8.0, 8.0],
            follow_alpha: 0.03,
            initial_camera_mode: CameraMode::Free,
            min_distance: 10.0,
            max_distance: 100.0,
            seed: None,
            bodies: None,
        }
    }
}

impl Settings {
    /// The older tuning: [0, 3] sliders, 3 s focus, +5 offset, faster smoothing,
    /// vantage point in the orbital plane.
    pub fn legacy() -> Self {
        Self {
            max_speed: 3.0,
            focus_duration_secs: 3.0,
            vantage_height: 0.0,
            follow_offset: [5.0, 5.0, 5.0],
            follow_alpha: 0.05,
            ..Self::default()
        }
    }

    /// Parse and sanitize. Body descriptions are validated by `registry()`.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Pull out-of-range values back to something usable, warning for each.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            let fixed = if self.max_speed.is_finite() { 0.0 } else { defaults.max_speed };
            warn!("max_speed {} out of range, using {}", self.max_speed, fixed);
            self.max_speed = fixed;
        }
        if !(self.focus_duration_secs.is_finite() && self.focus_duration_secs > 0.0) {
            warn!(
                "focus_duration_secs {} must be positive, using {}",
                self.focus_duration_secs, defaults.focus_duration_secs
            );
            self.focus_duration_secs = defaults.focus_duration_secs;
        }
        if !self.vantage_height.is_finite() {
            warn!("vantage_height is not finite, using {}", defaults.vantage_height);
            self.vantage_height = defaults.vantage_height;
        }
        if !self.follow_offset.iter().all(|c| c.is_finite()) {
            warn!("follow_offset is not finite, using {:?}", defaults.follow_offset);
            self.follow_offset = defaults.follow_offset;
        }
        if !(self.follow_alpha > 0.0 && self.follow_alpha <= 1.0) {
            let clamped = if self.follow_alpha > 1.0 { 1.0 } else { defaults.follow_alpha };
            warn!("follow_alpha {} outside (0, 1], using {}", self.follow_alpha, clamped);
            self.follow_alpha = clamped;
        }
        if !(self.min_distance.is_finite() && self.max_distance.is_finite())
            || self.min_distance < 0.0
            || self.min_distance > self.max_distance
        {
            warn!(
                "distance limits [{}, {}] invalid, using [{}, {}]",
                self.min_distance, self.max_distance, defaults.min_distance, defaults.max_distance
            );
            self.min_distance = defaults.min_distance;
            self.max_distance = defaults.max_distance;
        }
    }

    pub fn follow_offset(&self) -> Vec3 {
        Vec3::from_array(self.follow_offset)
    }

    /// Build the body registry: the override if present, else the planets.
    pub fn registry(&self) -> SettingsResult<Registry> {
        match &self.bodies {
            Some(descs) => Registry::from_descs(descs.clone()),
            None => Ok(Registry::solar()),
        }
    }
}
