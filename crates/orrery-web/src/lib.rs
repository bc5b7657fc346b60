pub mod entropy;
pub mod runner;

pub use entropy::host_entropy;
pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, settings, tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod game;
/// use game::MyScene;
///
/// orrery_web::export_game!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.get_or_insert_with(|| {
                    let mut runner = $crate::GameRunner::new(<$game_type>::new());
                    runner.reseed($crate::host_entropy());
                    runner
                });
                f(runner)
            })
        }

        /// Install logging and create the runner. Settings may be loaded before `game_init`.
        #[wasm_bindgen]
        pub fn game_create() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
            with_runner(|_| ());
        }

        #[wasm_bindgen]
        pub fn game_load_settings(json: &str) -> bool {
            with_runner(|r| r.load_settings(json))
        }

        #[wasm_bindgen]
        pub fn game_init() {
            game_create();
            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn game_click(id: u32) {
            with_runner(|r| r.push_input(InputEvent::Click { id: EntityId(id) }));
        }

        #[wasm_bindgen]
        pub fn game_hover_enter(id: u32) {
            with_runner(|r| r.push_input(InputEvent::HoverEnter { id: EntityId(id) }));
        }

        #[wasm_bindgen]
        pub fn game_hover_leave() {
            with_runner(|r| r.push_input(InputEvent::HoverLeave));
        }

        #[wasm_bindgen]
        pub fn game_drag(dx: f32, dy: f32) {
            with_runner(|r| r.push_input(InputEvent::Drag { dx, dy }));
        }

        #[wasm_bindgen]
        pub fn game_zoom(factor: f32) {
            with_runner(|r| r.push_input(InputEvent::Zoom { factor }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
