use std::cell::RefCell;
use glam::Vec3;
use wasm_bindgen::prelude::*;
use playmaker::{EntityFrame, EntityId, InputEvent, PathId};

pub mod runner;

pub use runner::PlayRunner;

thread_local! {
    static RUNNER: RefCell<Option<PlayRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the page's runner. Calls made before `play_init` are logged and skipped.
fn with_runner<R>(f: impl FnOnce(&mut PlayRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("playmaker: not initialized, call play_init() first");
                None
            }
        }
    })
}

/// Create the runner. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn play_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = match PlayRunner::from_config_json(config_json) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("playmaker: bad config: {e}");
            return false;
        }
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("playmaker: initialized");
    true
}

#[wasm_bindgen]
pub fn play_load(json: &str) -> i32 {
    with_runner(|r| match r.load_play(json) {
        Ok(placed) => placed as i32,
        Err(e) => {
            log::error!("playmaker: load failed: {e}");
            -1
        }
    })
    .unwrap_or(-1)
}

#[wasm_bindgen]
pub fn play_set_court(code: u32) -> bool {
    let Some(kind) = runner::court_kind(code) else {
        log::warn!("playmaker: unknown court code {code}");
        return false;
    };
    with_runner(|r| r.set_court(kind)).is_some()
}

#[wasm_bindgen]
pub fn play_set_screen(width: f32, height: f32) {
    with_runner(|r| r.set_screen_target(width, height));
}

/// `anchor` is a column-major 4x4 transform; court size in meters.
#[wasm_bindgen]
pub fn play_set_world(anchor: &[f32], width_meters: f32, height_meters: f32) -> bool {
    with_runner(|r| r.set_world_target(anchor, width_meters, height_meters)).unwrap_or(false)
}

/// Arm a new stroke (0 = pen, 1 = arrow). Returns the id the finished path will get, or -1.
#[wasm_bindgen]
pub fn play_begin_stroke(kind: u32) -> i64 {
    let Some(kind) = runner::path_kind(kind) else {
        log::warn!("playmaker: unknown path kind {kind}");
        return -1;
    };
    with_runner(|r| r.begin_stroke(kind).map_or(-1, |id| i64::from(id.0))).unwrap_or(-1)
}

#[wasm_bindgen]
pub fn play_pointer_down(x: f32, y: f32, z: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { pos: Vec3::new(x, y, z) }));
}

#[wasm_bindgen]
pub fn play_pointer_move(x: f32, y: f32, z: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { pos: Vec3::new(x, y, z) }));
}

#[wasm_bindgen]
pub fn play_pointer_up(x: f32, y: f32, z: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { pos: Vec3::new(x, y, z) }));
}

#[wasm_bindgen]
pub fn play_assign(entity: u32, path: u32) -> bool {
    with_runner(|r| r.assign(EntityId(entity), PathId(path))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn play_move_entity(entity: u32, x: f32, y: f32, z: f32) -> bool {
    with_runner(|r| r.move_entity(EntityId(entity), x, y, z)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn play_start() -> u32 {
    with_runner(|r| r.play() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn play_stop() -> u32 {
    with_runner(|r| r.stop() as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn play_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn play_select_path(x: f32, y: f32, z: f32) -> i64 {
    with_runner(|r| r.select_path(x, y, z)).unwrap_or(-1)
}

#[wasm_bindgen]
pub fn play_select_entity(x: f32, y: f32, z: f32) -> i64 {
    with_runner(|r| r.select_entity(x, y, z)).unwrap_or(-1)
}

#[wasm_bindgen]
pub fn play_all_finished() -> bool {
    with_runner(|r| r.all_finished()).unwrap_or(true)
}

// ---- Frame accessors ----

#[wasm_bindgen]
pub fn get_frames_ptr() -> *const f32 {
    with_runner(|r| r.frames_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_count() -> u32 {
    with_runner(|r| r.frame_count()).unwrap_or(0)
}

/// Floats per frame record.
#[wasm_bindgen]
pub fn get_frame_floats() -> u32 {
    EntityFrame::FLOATS as u32
}
