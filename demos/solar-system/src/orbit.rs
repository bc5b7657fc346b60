/// Circular orbit and axial spin integrators. Pure math, no engine state.
///
/// Phases use f64 so long sessions at high multipliers keep precision.
/// Convert to f32 only when producing world positions.

use glam::Vec3;

use crate::bodies::Body;

/// Per-body mutable state: orbital phase and axial spin, both in radians.
/// Neither is wrapped; `cos`/`sin` handle any magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitalState {
    pub phase: f64,
    pub spin: f64,
}

impl OrbitalState {
    pub fn new(phase: f64) -> Self {
        Self { phase, spin: 0.0 }
    }

    /// Advance one frame. `effective` is the speed multiplier after pause gating;
    /// spin ignores it.
    pub fn step(&mut self, dt: f64, body: &Body, effective: f64) {
        self.phase = advance_phase(self.phase, dt, body.orbit_speed, effective);
        self.spin = advance_spin(self.spin, dt, body.spin_speed);
    }

    pub fn position(&self, distance: f64) -> Vec3 {
        orbital_position(self.phase, distance)
    }
}

/// Multiplier actually applied to the orbit this frame.
#[inline]
pub fn effective_multiplier(multiplier: f64, paused: bool) -> f64 {
    if paused { 0.0 } else { multiplier }
}

/// `phase + dt * effective * base_speed`. Linear in dt, so splitting a
/// frame into pieces lands on the same phase.
#[inline]
pub fn advance_phase(phase: f64, dt: f64, base_speed: f64, effective: f64) -> f64 {
    phase + dt * effective * base_speed
}

#[inline]
pub fn advance_spin(spin: f64, dt: f64, rate: f64) -> f64 {
    spin + dt * rate
}

/// Point on the circular orbit in the y = 0 plane.
pub fn orbital_position(phase: f64, distance: f64) -> Vec3 {
    Vec3::new(
        (phase.cos() * distance) as f32,
        0.0,
        (phase.sin() * distance) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Registry;

    const EPS: f64 = 1e-12;

    fn earth() -> Body {
        Registry::solar().by_key("earth").unwrap().clone()
    }

    #[test]
    fn earth_advances_by_base_speed() {
        let body = earth();
        let mut state = OrbitalState::new(1.0);
        state.step(1.0, &body, 1.0);
        assert!((state.phase - 1.03).abs() < EPS);
    }

    #[test]
    fn doubled_multiplier_doubles_advance() {
        let body = earth();
        let mut state = OrbitalState::new(0.0);
        state.step(1.0, &body, 2.0);
        assert!((state.phase - 0.06).abs() < EPS);
    }

    #[test]
    fn paused_orbit_holds_phase_but_spin_continues() {
        let body = earth();
        let mut state = OrbitalState::new(0.5);
        state.step(1.0, &body, effective_multiplier(1.0, true));
        assert_eq!(state.phase, 0.5);
        assert!((state.spin - body.spin_speed).abs() < EPS);
    }

    #[test]
    fn split_frames_match_single_frame() {
        let whole = advance_phase(0.3, 0.75, 0.03, 2.5);
        let split = advance_phase(advance_phase(0.3, 0.25, 0.03, 2.5), 0.5, 0.03, 2.5);
        assert!((whole - split).abs() < EPS);
    }

    #[test]
    fn position_lies_on_circle_in_plane() {
        for i in 0..16 {
            let phase = i as f64 * 0.7;
            let p = orbital_position(phase, 25.0);
            assert_eq!(p.y, 0.0);
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 25.0).abs() < 1e-4);
        }
    }

    #[test]
    fn phase_zero_sits_on_positive_x() {
        let p = orbital_position(0.0, 14.0);
        assert!((p - Vec3::new(14.0, 0.0, 0.0)).length() < 1e-6);
        let q = orbital_position(std::f64::consts::FRAC_PI_2, 14.0);
        assert!((q - Vec3::new(0.0, 0.0, 14.0)).length() < 1e-5);
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let body = earth();
        let mut state = OrbitalState { phase: 2.0, spin: 1.0 };
        state.step(0.0, &body, 3.0);
        assert_eq!(state, OrbitalState { phase: 2.0, spin: 1.0 });
    }
}
