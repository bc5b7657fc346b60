/// Solar System: sun, planets on circular orbits, click-to-focus camera.
///
/// The simulation owns all state; entities only mirror its derived poses
/// so the renderer can read them from the instance buffer.

use std::f64::consts::TAU;

use log::info;
use orrery_engine::*;

use crate::bodies::{
    self, Registry, CORONA_COLOR, CORONA_EMISSIVE, CORONA_RADIUS, CORONA_TAG, PLANET_EMISSIVE,
    SUN_COLOR, SUN_EMISSIVE, SUN_RADIUS, SUN_TAG,
};
use crate::settings::Settings;
use crate::sim::Simulation;

// ── Custom event kinds from the UI ───────────────────────────────────

/// a = body index, b = multiplier
const CUSTOM_SET_SPEED: u32 = 1;
const CUSTOM_TOGGLE_PAUSE: u32 = 2;
const CUSTOM_RESET_SPEEDS: u32 = 3;
/// a = 0 free, 1 follow
const CUSTOM_SET_CAMERA_MODE: u32 = 4;
const CUSTOM_TOGGLE_CAMERA_MODE: u32 = 5;
/// Viewport resize (sent by worker as kind=99).
const CUSTOM_RESIZE: u32 = 99;

const KEY_SPACE: u32 = 32;
const KEY_F: u32 = 70;

// ── Game event kinds to the UI ───────────────────────────────────────

/// a = paused, b = camera mode, c = hovered index or -1
const EVENT_STATE: f32 = 1.0;
/// a = focused body index or -1, b = seconds left
const EVENT_FOCUS: f32 = 2.0;
/// a = body index, b = multiplier, c = max multiplier
const EVENT_SPEED: f32 = 3.0;
/// a = hovered index, b = orbit distance, c = radius
const EVENT_HOVER_INFO: f32 = 4.0;

/// Outer radius of a ring system relative to its planet.
const RING_SCALE: f32 = 2.0;
const RING_COLOR: [f32; 3] = bodies::hex_rgb(0xC2B280);

const BASE_INSTANCES: usize = 64;
const BASE_EVENTS: usize = 64;

struct BodyEntities {
    planet: EntityId,
    rings: Option<EntityId>,
}

pub struct SolarSystem {
    sim: Simulation,
    settings: Settings,
    /// Host entropy, used as the seed when the settings carry none.
    entropy: Option<u64>,
    sun: Option<EntityId>,
    corona: Option<EntityId>,
    bodies: Vec<BodyEntities>,
    needs_respawn: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        let registry = Registry::solar();
        let settings = Settings::default();
        let config = engine_config(&registry);
        let sim = Simulation::new(registry, &settings, &config);
        Self {
            sim,
            settings,
            entropy: None,
            sun: None,
            corona: None,
            bodies: Vec::new(),
            needs_respawn: true,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Replace the simulation with a fresh one over `registry` and schedule a respawn.
    fn rebuild(&mut self, registry: Registry) {
        let settings = Settings {
            seed: self.settings.seed.or(self.entropy),
            ..self.settings.clone()
        };
        let config = engine_config(&registry);
        self.sim = Simulation::new(registry, &settings, &config);
        self.needs_respawn = true;
    }

    fn spawn_all(&mut self, ctx: &mut EngineContext) {
        ctx.scene.clear();

        let sun = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun)
                .with_tag(SUN_TAG)
                .with_radius(SUN_RADIUS)
                .with_color(SUN_COLOR)
                .with_emissive(SUN_EMISSIVE),
        );
        let corona = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(corona)
                .with_tag(CORONA_TAG)
                .with_radius(CORONA_RADIUS)
                .with_color(CORONA_COLOR)
                .with_emissive(CORONA_EMISSIVE),
        );

        self.bodies.clear();
        for (i, body) in self.sim.registry().iter().enumerate() {
            let pos = self.sim.position_at(i).unwrap_or_default();
            let planet = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(planet)
                    .with_tag(body.key.as_str())
                    .with_pos(pos)
                    .with_radius(body.radius)
                    .with_color(body.color)
                    .with_emissive(PLANET_EMISSIVE),
            );
            let rings = body.has_rings.then(|| {
                let id = ctx.next_id();
                ctx.scene.spawn(
                    Entity::new(id)
                        .with_tag(format!("{}:rings", body.key))
                        .with_pos(pos)
                        .with_radius(body.radius * RING_SCALE)
                        .with_color(RING_COLOR),
                );
                id
            });
            self.bodies.push(BodyEntities { planet, rings });
        }

        self.sun = Some(sun);
        self.corona = Some(corona);
        self.needs_respawn = false;
    }

    /// Registry index of the body an entity belongs to (planet or its rings).
    fn body_index(&self, id: EntityId) -> Option<usize> {
        self.bodies
            .iter()
            .position(|b| b.planet == id || b.rings == Some(id))
    }

    fn handle_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Click { id } => match self.body_index(id) {
                    Some(index) => self.sim.click_body(index),
                    None => log::debug!("click on non-body entity {:?}", id),
                },
                InputEvent::HoverEnter { id } => {
                    if let Some(index) = self.body_index(id) {
                        self.sim.hover_body(index);
                    }
                }
                InputEvent::HoverLeave => self.sim.on_body_hover_leave(),
                InputEvent::Drag { dx, dy } => self.sim.user_orbit(dx, dy),
                InputEvent::Zoom { factor } => self.sim.user_zoom(factor),
                InputEvent::KeyDown { key_code } => match key_code {
                    KEY_SPACE => {
                        self.sim.toggle_pause();
                    }
                    KEY_F => {
                        self.sim.toggle_camera_mode();
                    }
                    _ => {}
                },
                InputEvent::Custom { kind, a, b, .. } => self.handle_custom(kind, a, b),
            }
        }
    }

    fn handle_custom(&mut self, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_SET_SPEED => {
                if a.is_finite() && a >= 0.0 {
                    self.sim.set_speed_at(a as usize, b as f64);
                }
            }
            CUSTOM_TOGGLE_PAUSE => {
                self.sim.toggle_pause();
            }
            CUSTOM_RESET_SPEEDS => self.sim.reset_all_speeds(),
            CUSTOM_SET_CAMERA_MODE => self.sim.set_camera_mode(CameraMode::from_wire(a)),
            CUSTOM_TOGGLE_CAMERA_MODE => {
                self.sim.toggle_camera_mode();
            }
            CUSTOM_RESIZE => self.sim.resize(a, b),
            _ => log::debug!("unhandled custom event kind {}", kind),
        }
    }

    fn sync_entities(&self, ctx: &mut EngineContext) {
        if let Some(entity) = self.sun.and_then(|id| ctx.scene.get_mut(id)) {
            entity.rotation = wrap_angle(self.sim.sun_spin());
        }
        if let Some(entity) = self.corona.and_then(|id| ctx.scene.get_mut(id)) {
            entity.rotation = wrap_angle(self.sim.corona_spin());
            entity.tilt = wrap_angle(self.sim.corona_tumble());
        }

        let hovered = self.sim.hovered_index();
        for (i, ids) in self.bodies.iter().enumerate() {
            let (Some(pos), Some(state)) = (self.sim.position_at(i), self.sim.state_at(i)) else {
                continue;
            };
            let highlight = if hovered == Some(i) { 1.0 } else { 0.0 };
            let scale = self.sim.display_scale(i);
            if let Some(entity) = ctx.scene.get_mut(ids.planet) {
                entity.pos = pos;
                entity.rotation = wrap_angle(state.spin);
                entity.scale = scale;
                entity.highlight = highlight;
            }
            if let Some(entity) = ids.rings.and_then(|id| ctx.scene.get_mut(id)) {
                entity.pos = pos;
                entity.scale = scale;
                entity.highlight = highlight;
            }
        }
    }

    fn emit_events(&self, ctx: &mut EngineContext) {
        let hovered = self.sim.hovered_index();
        ctx.emit_event(GameEvent::new(
            EVENT_STATE,
            GameEvent::flag(self.sim.is_paused()),
            self.sim.camera_mode().to_wire(),
            hovered.map_or(-1.0, |i| i as f32),
        ));

        let now = self.sim.now();
        let (focused, remaining) = self
            .sim
            .focus_target()
            .map_or((-1.0, 0.0), |t| (t.body as f32, t.remaining(now) as f32));
        ctx.emit_event(GameEvent::new(EVENT_FOCUS, focused, remaining, 0.0));

        let max = self.sim.max_speed() as f32;
        for i in 0..self.sim.registry().len() {
            ctx.emit_event(GameEvent::new(EVENT_SPEED, i as f32, self.sim.speed_at(i) as f32, max));
        }

        if let Some((i, body)) = hovered.and_then(|i| self.sim.registry().get(i).map(|b| (i, b))) {
            ctx.emit_event(GameEvent::new(EVENT_HOVER_INFO, i as f32, body.distance as f32, body.radius));
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine limits sized for the registry: planets, ring systems, sun and corona.
fn engine_config(registry: &Registry) -> GameConfig {
    let instances = 2 + registry.len() + registry.iter().filter(|b| b.has_rings).count();
    GameConfig {
        max_instances: BASE_INSTANCES.max(instances),
        max_events: BASE_EVENTS.max(registry.len() + 3),
        ..GameConfig::default()
    }
}

/// Spin angles grow without bound; renderers only need them mod 2π.
fn wrap_angle(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        engine_config(self.sim.registry())
    }

    fn load_settings(&mut self, json: &str) -> Result<(), Box<dyn std::error::Error>> {
        let settings = Settings::from_json(json)?;
        let registry = settings.registry()?;
        self.settings = settings;
        self.rebuild(registry);
        info!(
            "solar system settings: {} bodies, max speed {}, camera {:?}",
            self.sim.registry().len(),
            self.sim.max_speed(),
            self.sim.camera_mode()
        );
        Ok(())
    }

    fn reseed(&mut self, entropy: u64) {
        self.entropy = Some(entropy);
        if self.settings.seed.is_none() {
            self.rebuild(self.sim.registry().clone());
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.spawn_all(ctx);
        self.sync_entities(ctx);
        info!("solar system: {} bodies spawned", self.bodies.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        if self.needs_respawn {
            self.spawn_all(ctx);
        }
        self.handle_input(input);
        self.sim.advance(dt);
        self.sync_entities(ctx);
        self.emit_events(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        *ctx.camera = self.sim.camera().uniform();
    }
}
