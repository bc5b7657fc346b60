use orrery_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer, CameraUniform, GameEvent,
    build_render_buffer,
};

/// Generic game runner that wires up the frame loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly. See `export_game!`.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    camera: CameraUniform,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            camera: CameraUniform::default(),
            game,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction (and after any settings load).
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.ctx = EngineContext::with_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.refresh_render_data();
    }

    /// Forward host entropy to the game.
    pub fn reseed(&mut self, entropy: u64) {
        self.game.reseed(entropy);
    }

    /// Forward a settings JSON document to the game. Returns false (and logs) on rejection.
    /// Accepted settings may change the game's capacities, so the config is re-read.
    pub fn load_settings(&mut self, json: &str) -> bool {
        match self.game.load_settings(json) {
            Ok(()) => {
                log::info!("settings loaded ({} bytes)", json.len());
                self.refresh_config();
                true
            }
            Err(err) => {
                log::warn!("settings rejected: {}", err);
                false
            }
        }
    }

    fn refresh_config(&mut self) {
        self.config = self.game.config();
        let instances = &mut self.render_buffer.instances;
        instances.reserve(self.config.max_instances.saturating_sub(instances.len()));
        let events = &mut self.ctx.events;
        events.reserve(self.config.max_events.saturating_sub(events.len()));
        log::debug!(
            "capacities: {} instances, {} events",
            self.config.max_instances, self.config.max_events
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: update the game with the real frame delta, then rebuild render data.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.game.update(&mut self.ctx, &self.input, dt);
        self.input.drain();

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "dropping {} game events over capacity",
                self.ctx.events.len() - self.config.max_events
            );
            self.ctx.events.truncate(self.config.max_events);
        }

        self.refresh_render_data();
    }

    fn refresh_render_data(&mut self) {
        build_render_buffer(
            self.ctx.scene.iter(),
            &mut self.render_buffer,
            self.config.max_instances,
        );
        let mut render_ctx = RenderContext {
            render_buffer: &mut self.render_buffer,
            camera: &mut self.camera,
        };
        self.game.render(&mut render_ctx);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    pub fn camera(&self) -> &CameraUniform {
        &self.camera
    }

    // ---- Pointer accessors for reads from WASM memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera.as_ptr()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.config.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
