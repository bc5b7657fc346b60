/// Speed and pause controls.
///
/// One multiplier per body, indexed like the registry. The multiplier is user
/// intent and survives pause; pause only zeroes the effective value.

use crate::orbit::effective_multiplier;

pub const DEFAULT_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedControls {
    multipliers: Vec<f64>,
    max: f64,
    paused: bool,
}

impl SpeedControls {
    pub fn new(body_count: usize, max: f64) -> Self {
        Self {
            multipliers: vec![DEFAULT_MULTIPLIER; body_count],
            max: max.max(0.0),
            paused: false,
        }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Store a clamped multiplier. Returns the stored value, or None when the
    /// index is unknown or the value is not finite (nothing changes then).
    pub fn set_speed(&mut self, index: usize, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let slot = self.multipliers.get_mut(index)?;
        *slot = value.clamp(0.0, self.max);
        Some(*slot)
    }

    /// Stored multiplier; unknown indices read as the default.
    pub fn speed(&self, index: usize) -> f64 {
        self.multipliers.get(index).copied().unwrap_or(DEFAULT_MULTIPLIER)
    }

    /// Multiplier the orbit integrator sees this frame.
    pub fn effective(&self, index: usize) -> f64 {
        effective_multiplier(self.speed(index), self.paused)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip pause and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Every multiplier back to the default. Pause is left alone.
    pub fn reset_all(&mut self) {
        self.multipliers.fill(DEFAULT_MULTIPLIER);
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}
