//! Task manager SPA. State transitions and form validation are plain
//! Rust, testable on any target; the sauron application, fetch client,
//! and DOM glue only exist on wasm32.

pub mod form;
pub mod state;

#[cfg(target_arch = "wasm32")]
pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod app;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    sauron::Program::mount_to_body(app::App::default());
}
