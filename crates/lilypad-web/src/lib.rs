use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use lilypad_core::{InputEvent, Key};

pub mod runner;

pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Browser key codes for the three actions. WASD left hand plus the
/// arrow keys; space jumps.
fn map_key(key_code: u32) -> Option<Key> {
    match key_code {
        65 | 37 => Some(Key::Left),
        68 | 39 => Some(Key::Right),
        32 => Some(Key::Jump),
        _ => None,
    }
}

#[wasm_bindgen]
pub fn game_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::new());
    });
    log::info!("lilypad: initialized");
}

#[wasm_bindgen]
pub fn game_load_manifest(json: &str) -> bool {
    with_runner(|r| match r.load_manifest(json) {
        Ok(()) => true,
        Err(e) => {
            log::error!("manifest rejected: {}", e);
            false
        }
    })
}

#[wasm_bindgen]
pub fn game_load_level(json: &str) -> bool {
    with_runner(|r| match r.load_level(json) {
        Ok(()) => true,
        Err(e) => {
            log::error!("level rejected: {}", e);
            false
        }
    })
}

#[wasm_bindgen]
pub fn game_load_sheet(path: &str, width: u32, height: u32, rgba: &[u8]) {
    with_runner(|r| r.load_sheet(path, width, height, rgba.to_vec()));
}

#[wasm_bindgen]
pub fn game_start() -> bool {
    with_runner(|r| match r.start() {
        Ok(()) => true,
        Err(e) => {
            log::error!("start failed: {}", e);
            false
        }
    })
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    if let Some(key) = map_key(key_code) {
        with_runner(|r| r.push_input(InputEvent::KeyDown(key)));
    }
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    if let Some(key) = map_key(key_code) {
        with_runner(|r| r.push_input(InputEvent::KeyUp(key)));
    }
}

#[wasm_bindgen]
pub fn game_quit() {
    with_runner(|r| r.push_input(InputEvent::Quit));
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
pub fn get_scroll_x() -> f32 {
    with_runner(|r| r.scroll_x())
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(|r| r.viewport_width())
}

#[wasm_bindgen]
pub fn get_viewport_height() -> f32 {
    with_runner(|r| r.viewport_height())
}

#[wasm_bindgen]
pub fn game_is_running() -> bool {
    with_runner(|r| r.is_running())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
