/// Simulation context: owns all per-frame state for one solar system.
///
/// Per-body state lives in flat arrays indexed by registry position.
/// Entry points taking a body key treat unknown keys as no-ops.

use glam::Vec3;
use log::debug;
use orrery_engine::{lerp, Camera3D, CameraMode, Clock, GameConfig, Rng};

use crate::bodies::{Body, Registry, CORONA_SPIN, CORONA_TUMBLE, SUN_SPIN};
use crate::controls::SpeedControls;
use crate::error::SettingsResult;
use crate::focus::{FocusPhase, FocusTarget, FocusTrigger, HoverState};
use crate::follow::CameraController;
use crate::orbit::{advance_spin, OrbitalState};
use crate::settings::{Settings, DEFAULT_SEED};

/// Display scale of the hovered body.
pub const HOVER_SCALE: f32 = 1.1;
/// Per-frame easing of display scale back toward 1.
pub const HOVER_EASE: f32 = 0.1;

/// Overlay data for one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub distance: f64,
    pub radius: f32,
    pub speed: f64,
}

pub struct Simulation {
    registry: Registry,
    states: Vec<OrbitalState>,
    display_scales: Vec<f32>,
    sun_spin: f64,
    corona_spin: f64,
    corona_tumble: f64,
    controls: SpeedControls,
    hover: HoverState,
    focus: FocusTrigger,
    follow: CameraController,
    camera: Camera3D,
    clock: Clock,
    rng: Rng,
}

impl Simulation {
    /// Build a simulation over `registry`. Every body starts at a random phase.
    pub fn new(registry: Registry, settings: &Settings, config: &GameConfig) -> Self {
        let mut rng = Rng::new(settings.seed.unwrap_or(DEFAULT_SEED));
        let states = registry
            .iter()
            .map(|_| OrbitalState::new(rng.next_angle()))
            .collect();

        let mut camera = Camera3D::from_config(config);
        camera.set_distance_limits(settings.min_distance, settings.max_distance);
        camera.set_mode(settings.initial_camera_mode);

        Self {
            display_scales: vec![1.0; registry.len()],
            controls: SpeedControls::new(registry.len(), settings.max_speed),
            states,
            registry,
            sun_spin: 0.0,
            corona_spin: 0.0,
            corona_tumble: 0.0,
            hover: HoverState::default(),
            focus: FocusTrigger::new(settings.focus_duration_secs, settings.vantage_height),
            follow: CameraController::new(settings.follow_offset(), settings.follow_alpha),
            camera,
            clock: Clock::new(),
            rng,
        }
    }

    /// Build from settings, using their body override if any.
    pub fn from_settings(settings: &Settings, config: &GameConfig) -> SettingsResult<Self> {
        Ok(Self::new(settings.registry()?, settings, config))
    }

    /// One frame: integrate orbits and spins, expire focus, drive the follow
    /// camera, ease hover scales.
    pub fn advance(&mut self, dt: f32) {
        let dt = self.clock.advance(dt) as f64;
        let now = self.clock.now();

        for (i, (state, body)) in self.states.iter_mut().zip(self.registry.iter()).enumerate() {
            state.step(dt, body, self.controls.effective(i));
        }
        self.sun_spin = advance_spin(self.sun_spin, dt, SUN_SPIN);
        self.corona_spin = advance_spin(self.corona_spin, dt, CORONA_SPIN);
        self.corona_tumble = advance_spin(self.corona_tumble, dt, CORONA_TUMBLE);

        if self.focus.expire(now) {
            debug!("focus expired at t={:.2}s", now);
        }
        self.follow.update(&mut self.camera, self.focus.active());

        for (i, scale) in self.display_scales.iter_mut().enumerate() {
            *scale = if self.hover.is_hovered(i) {
                HOVER_SCALE
            } else {
                lerp(*scale, 1.0, HOVER_EASE)
            };
        }
    }

    // ---- Events ----

    pub fn on_body_clicked(&mut self, key: &str) {
        if let Some(index) = self.resolve(key) {
            self.click_body(index);
        }
    }

    pub fn on_body_hover_enter(&mut self, key: &str) {
        if let Some(index) = self.resolve(key) {
            self.hover_body(index);
        }
    }

    pub fn on_body_hover_leave(&mut self) {
        self.hover.leave();
    }

    /// Arm focus on the body at `index`; a new click replaces the old target.
    pub fn click_body(&mut self, index: usize) {
        let Some(body) = self.registry.get(index) else {
            debug!("click on unknown body index {} ignored", index);
            return;
        };
        let target = self.focus.arm(index, body.distance, self.clock.now(), &mut self.rng);
        debug!(
            "focus armed on {} at ({:.1}, {:.1}, {:.1})",
            body.key, target.point.x, target.point.y, target.point.z
        );
    }

    pub fn hover_body(&mut self, index: usize) {
        if index < self.registry.len() {
            self.hover.enter(index);
        } else {
            debug!("hover on unknown body index {} ignored", index);
        }
    }

    // ---- Controls ----

    pub fn set_speed(&mut self, key: &str, value: f64) {
        if let Some(index) = self.resolve(key) {
            self.set_speed_at(index, value);
        }
    }

    pub fn set_speed_at(&mut self, index: usize, value: f64) {
        if self.controls.set_speed(index, value).is_none() {
            debug!("set_speed({}, {}) ignored", index, value);
        }
    }

    /// Flip the pause flag and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.controls.toggle_pause();
        debug!("paused: {}", paused);
        paused
    }

    pub fn reset_all_speeds(&mut self) {
        self.controls.reset_all();
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        if self.camera.set_mode(mode) {
            debug!("camera mode: {:?}", mode);
        }
    }

    pub fn toggle_camera_mode(&mut self) -> CameraMode {
        let mode = self.camera.mode().toggled();
        self.set_camera_mode(mode);
        mode
    }

    /// User drag, in radians. Only honored in free mode.
    pub fn user_orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.camera.user_orbit(d_azimuth, d_elevation);
    }

    /// User wheel, as a distance multiplier. Only honored in free mode.
    pub fn user_zoom(&mut self, factor: f32) {
        self.camera.user_zoom(factor);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    // ---- Read accessors ----

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn resolve(&self, key: &str) -> Option<usize> {
        let index = self.registry.index_of(key);
        if index.is_none() {
            debug!("unknown body '{}' ignored", key);
        }
        index
    }

    pub fn position(&self, key: &str) -> Option<Vec3> {
        self.registry.index_of(key).and_then(|i| self.position_at(i))
    }

    pub fn position_at(&self, index: usize) -> Option<Vec3> {
        let body = self.registry.get(index)?;
        self.states.get(index).map(|s| s.position(body.distance))
    }

    pub fn phase(&self, key: &str) -> Option<f64> {
        self.state(key).map(|s| s.phase)
    }

    pub fn spin(&self, key: &str) -> Option<f64> {
        self.state(key).map(|s| s.spin)
    }

    pub fn state_at(&self, index: usize) -> Option<&OrbitalState> {
        self.states.get(index)
    }

    fn state(&self, key: &str) -> Option<&OrbitalState> {
        self.registry.index_of(key).and_then(|i| self.states.get(i))
    }

    pub fn sun_spin(&self) -> f64 {
        self.sun_spin
    }

    pub fn corona_spin(&self) -> f64 {
        self.corona_spin
    }

    pub fn corona_tumble(&self) -> f64 {
        self.corona_tumble
    }

    pub fn hovered(&self) -> Option<&Body> {
        self.hover.hovered().and_then(|i| self.registry.get(i))
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hover.hovered()
    }

    pub fn display_scale(&self, index: usize) -> f32 {
        self.display_scales.get(index).copied().unwrap_or(1.0)
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode()
    }

    /// Stored multiplier for display; None for unknown keys.
    pub fn speed(&self, key: &str) -> Option<f64> {
        self.registry.index_of(key).map(|i| self.controls.speed(i))
    }

    pub fn speed_at(&self, index: usize) -> f64 {
        self.controls.speed(index)
    }

    pub fn max_speed(&self) -> f64 {
        self.controls.max()
    }

    pub fn is_paused(&self) -> bool {
        self.controls.is_paused()
    }

    pub fn focus_target(&self) -> Option<&FocusTarget> {
        self.focus.active()
    }

    pub fn focus_phase(&self) -> FocusPhase {
        self.focus.phase()
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    /// Seconds on the simulation clock. Keeps running while paused.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn body_info(&self, key: &str) -> Option<BodyInfo<'_>> {
        let index = self.registry.index_of(key)?;
        let body = self.registry.get(index)?;
        Some(BodyInfo {
            name: &body.name,
            description: &body.description,
            distance: body.distance,
            radius: body.radius,
            speed: self.controls.speed(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const EPS: f64 = 1e-12;

    fn sim() -> Simulation {
        sim_with(Settings::default())
    }

    fn sim_with(settings: Settings) -> Simulation {
        Simulation::new(Registry::solar(), &settings, &GameConfig::default())
    }

    fn keys(sim: &Simulation) -> Vec<String> {
        sim.registry().iter().map(|b| b.key.clone()).collect()
    }

    #[test]
    fn initial_phases_are_random_in_range() {
        let s = sim();
        let phases: Vec<f64> = keys(&s).iter().map(|k| s.phase(k).unwrap()).collect();
        assert!(phases.iter().all(|p| (0.0..TAU).contains(p)));
        assert!(phases.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn earth_example_scenario() {
        let mut s = sim();
        let p0 = s.phase("earth").unwrap();
        s.advance(1.0);
        assert!((s.phase("earth").unwrap() - p0 - 0.03).abs() < EPS);

        s.set_speed("earth", 2.0);
        let p1 = s.phase("earth").unwrap();
        s.advance(1.0);
        assert!((s.phase("earth").unwrap() - p1 - 0.06).abs() < EPS);

        s.toggle_pause();
        let p2 = s.phase("earth").unwrap();
        s.advance(1.0);
        assert_eq!(s.phase("earth").unwrap(), p2);
    }

    #[test]
    fn integration_is_additive() {
        let mut whole = sim();
        let mut split = sim();
        whole.set_speed("mars", 3.5);
        split.set_speed("mars", 3.5);
        whole.advance(0.75);
        split.advance(0.25);
        split.advance(0.5);
        for key in keys(&whole) {
            let a = whole.phase(&key).unwrap();
            let b = split.phase(&key).unwrap();
            assert!((a - b).abs() < EPS, "{}: {} vs {}", key, a, b);
        }
    }

    #[test]
    fn pause_freezes_orbit_but_not_spin() {
        let mut s = sim();
        s.advance(0.5);
        assert!(s.toggle_pause());
        let before: Vec<(f64, f64)> = keys(&s)
            .iter()
            .map(|k| (s.phase(k).unwrap(), s.spin(k).unwrap()))
            .collect();
        let sun_before = s.sun_spin();
        let tumble_before = s.corona_tumble();
        s.advance(2.0);
        for (key, (phase, spin)) in keys(&s).iter().zip(before) {
            let body = s.registry().by_key(key).unwrap();
            assert_eq!(s.phase(key).unwrap(), phase, "{} moved while paused", key);
            assert!((s.spin(key).unwrap() - spin - 2.0 * body.spin_speed).abs() < EPS);
        }
        assert!((s.sun_spin() - sun_before - 2.0 * SUN_SPIN).abs() < EPS);
        assert!((s.corona_tumble() - tumble_before - 2.0 * CORONA_TUMBLE).abs() < EPS);
    }

    #[test]
    fn corona_tumbles_slower_than_it_spins() {
        let mut s = sim();
        s.advance(10.0);
        assert!((s.corona_tumble() - 10.0 * CORONA_TUMBLE).abs() < EPS);
        assert!((s.corona_spin() - 10.0 * CORONA_SPIN).abs() < EPS);
    }

    #[test]
    fn reset_matches_default_multipliers() {
        let mut reset = sim();
        let mut fresh = sim();
        for (i, key) in keys(&reset).iter().enumerate() {
            reset.set_speed(key, i as f64 * 0.7);
        }
        reset.reset_all_speeds();

        let before: Vec<f64> = keys(&reset).iter().map(|k| reset.phase(k).unwrap()).collect();
        reset.advance(1.5);
        fresh.advance(1.5);
        for (key, p0) in keys(&reset).iter().zip(before) {
            let delta_reset = reset.phase(key).unwrap() - p0;
            let delta_fresh = fresh.phase(key).unwrap() - p0;
            assert!((delta_reset - delta_fresh).abs() < EPS, "{}", key);
            assert_eq!(reset.speed(key), Some(1.0));
        }
    }

    #[test]
    fn speeds_clamp_to_configured_range() {
        let mut s = sim();
        s.set_speed("earth", 9.0);
        assert_eq!(s.speed("earth"), Some(5.0));
        s.set_speed("earth", -1.0);
        assert_eq!(s.speed("earth"), Some(0.0));

        let mut legacy = sim_with(Settings::legacy());
        legacy.set_speed("venus", 4.0);
        assert_eq!(legacy.speed("venus"), Some(3.0));
    }

    #[test]
    fn unknown_keys_are_no_ops() {
        let mut s = sim();
        s.on_body_clicked("pluto");
        s.on_body_hover_enter("pluto");
        s.set_speed("pluto", 2.0);
        assert!(s.focus_target().is_none());
        assert!(s.hovered().is_none());
        assert_eq!(s.speed("pluto"), None);
        assert!(keys(&s).iter().all(|k| s.speed(k) == Some(1.0)));
        assert!(s.position("pluto").is_none());
    }

    #[test]
    fn position_follows_phase_on_orbit() {
        let mut s = sim();
        s.advance(3.0);
        let phase = s.phase("jupiter").unwrap();
        let pos = s.position("jupiter").unwrap();
        assert!((pos.x as f64 - phase.cos() * 40.0).abs() < 1e-4);
        assert!((pos.z as f64 - phase.sin() * 40.0).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn click_sets_target_at_orbit_distance_then_expires() {
        let mut s = sim();
        s.on_body_clicked("earth");
        let target = *s.focus_target().unwrap();
        let r = (target.point.x * target.point.x + target.point.z * target.point.z).sqrt();
        assert!((r - 25.0).abs() < 1e-4);
        assert_eq!(target.point.y, 2.0);
        assert_eq!(s.focus_phase(), FocusPhase::Traveling);

        for _ in 0..4 {
            s.advance(1.0);
        }
        assert!(s.focus_target().is_some());
        s.advance(1.0);
        assert!(s.focus_target().is_none());
        assert_eq!(s.focus_phase(), FocusPhase::Idle);
    }

    #[test]
    fn expiry_ignores_pause() {
        let mut s = sim();
        s.toggle_pause();
        s.on_body_clicked("mars");
        s.advance(5.0);
        assert!(s.focus_target().is_none());
    }

    #[test]
    fn second_click_restarts_window() {
        let mut s = sim();
        s.on_body_clicked("earth");
        for _ in 0..4 {
            s.advance(1.0);
        }
        s.on_body_clicked("neptune");
        for _ in 0..4 {
            s.advance(1.0);
        }
        assert_eq!(s.focus_target().map(|t| t.body), s.registry().index_of("neptune"));
        s.advance(1.0);
        assert!(s.focus_target().is_none());
    }

    #[test]
    fn follow_camera_closes_in_monotonically() {
        let mut s = sim();
        s.set_camera_mode(CameraMode::Follow);
        s.on_body_clicked("saturn");
        let target = s.focus_target().unwrap().point;
        let ideal = target + Vec3::splat(8.0);
        let mut last = s.camera().position.distance(ideal);
        for frame in 0..120 {
            s.advance(1.0 / 60.0);
            let d = s.camera().position.distance(ideal);
            assert!(d < last, "frame {}: {} !< {}", frame, d, last);
            last = d;
            assert_eq!(s.camera().target, target);
        }
    }

    #[test]
    fn free_mode_leaves_camera_to_user() {
        let mut s = sim();
        let start = s.camera().position;
        s.on_body_clicked("earth");
        s.advance(0.5);
        assert_eq!(s.camera().position, start);

        s.user_orbit(0.3, 0.1);
        assert_ne!(s.camera().position, start);
    }

    #[test]
    fn follow_mode_ignores_user_controls() {
        let mut s = sim();
        s.set_camera_mode(CameraMode::Follow);
        let start = s.camera().position;
        s.user_orbit(0.5, 0.2);
        s.user_zoom(0.5);
        assert_eq!(s.camera().position, start);
    }

    #[test]
    fn leaving_follow_keeps_expiry_running() {
        let mut s = sim();
        s.set_camera_mode(CameraMode::Follow);
        s.on_body_clicked("venus");
        s.set_camera_mode(CameraMode::Free);
        let parked = s.camera().position;
        s.advance(2.0);
        assert!(s.focus_target().is_some());
        assert_eq!(s.camera().position, parked);

        assert_eq!(s.toggle_camera_mode(), CameraMode::Follow);
        s.advance(1.0);
        assert_ne!(s.camera().position, parked);
        s.advance(2.0);
        assert!(s.focus_target().is_none());
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut s = sim();
        s.user_zoom(100.0);
        assert!((s.camera().distance() - 100.0).abs() < 1e-3);
        s.user_zoom(0.001);
        assert!((s.camera().distance() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn hover_pulse_and_release() {
        let mut s = sim();
        let mars = s.registry().index_of("mars").unwrap();
        s.on_body_hover_enter("mars");
        assert_eq!(s.hovered().map(|b| b.name.as_str()), Some("Mars"));
        s.advance(0.016);
        assert_eq!(s.display_scale(mars), HOVER_SCALE);

        s.on_body_hover_leave();
        assert!(s.hovered().is_none());
        s.advance(0.016);
        assert!((s.display_scale(mars) - 1.09).abs() < 1e-6);
        for _ in 0..200 {
            s.advance(0.016);
        }
        assert!((s.display_scale(mars) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn bad_deltas_count_as_zero() {
        let mut s = sim();
        let p0 = s.phase("earth").unwrap();
        s.advance(-1.0);
        s.advance(f32::NAN);
        assert_eq!(s.phase("earth").unwrap(), p0);
        assert_eq!(s.now(), 0.0);
    }

    #[test]
    fn body_info_reports_current_multiplier() {
        let mut s = sim();
        s.set_speed("jupiter", 2.5);
        let info = s.body_info("jupiter").unwrap();
        assert_eq!(info.name, "Jupiter");
        assert_eq!(info.description, "Largest planet");
        assert_eq!(info.speed, 2.5);
        assert!(s.body_info("pluto").is_none());
    }

    #[test]
    fn initial_camera_mode_from_settings() {
        let s = sim_with(Settings {
            initial_camera_mode: CameraMode::Follow,
            ..Settings::default()
        });
        assert_eq!(s.camera_mode(), CameraMode::Follow);
    }
}
